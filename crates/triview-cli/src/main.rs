mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use triview_core::config::ClientConfig;

#[derive(Parser)]
#[command(name = "triview", about = "Headless client for the slice-rendering server")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./triview.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL (overrides config)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Login username (overrides config)
    #[arg(long, global = true)]
    username: Option<String>,

    /// Login password (overrides config)
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a DICOM series and ROI files
    Upload(commands::upload::UploadArgs),
    /// Show the uploaded volume's dimensions
    Shape(commands::shape::ShapeArgs),
    /// Re-render slices at given midpoints
    Regenerate(commands::regenerate::RegenerateArgs),
    /// Save the fused array dump
    Download(commands::download::DownloadArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::load_or_default(std::path::Path::new("triview.toml")),
    };
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }
    if let Some(username) = &cli.username {
        config.username = username.clone();
    }
    if let Some(password) = &cli.password {
        config.password = password.clone();
    }

    match &cli.command {
        Commands::Upload(args) => commands::upload::run(args, &config),
        Commands::Shape(args) => commands::shape::run(args, &config),
        Commands::Regenerate(args) => commands::regenerate::run(args, &config),
        Commands::Download(args) => commands::download::run(args, &config),
    }
}
