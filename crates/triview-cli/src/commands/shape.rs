use anyhow::Result;
use clap::Args;

use triview_core::config::ClientConfig;
use triview_core::midpoint::{Axis, MidpointCoordinator};

use super::connect;

#[derive(Args)]
pub struct ShapeArgs {}

pub fn run(_args: &ShapeArgs, config: &ClientConfig) -> Result<()> {
    let client = connect(config)?;
    let shape = client.volume_shape()?;

    let mut coordinator = MidpointCoordinator::new();
    coordinator.initialize(shape);

    println!("Volume shape:");
    for axis in Axis::ALL {
        println!(
            "  {:9} {:4} voxels (center {})",
            axis.to_string(),
            shape.dim(axis),
            coordinator.midpoint(axis)
        );
    }
    Ok(())
}
