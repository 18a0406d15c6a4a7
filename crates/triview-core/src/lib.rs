pub mod error;
pub mod tile;
pub mod viewport;
pub mod drag;
pub mod midpoint;
pub mod controller;
pub mod client;
pub mod config;
