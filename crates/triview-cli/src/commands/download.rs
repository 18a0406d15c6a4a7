use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;

use triview_core::config::ClientConfig;

use super::connect;

#[derive(Args)]
pub struct DownloadArgs {
    /// Destination folder
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub fn run(args: &DownloadArgs, config: &ClientConfig) -> Result<()> {
    let client = connect(config)?;
    let path = client.download_array(&args.out)?;
    println!("{} saved {}", style("✓").green(), path.display());
    Ok(())
}
