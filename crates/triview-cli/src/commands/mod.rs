pub mod download;
pub mod regenerate;
pub mod shape;
pub mod upload;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use console::style;

use triview_core::client::ApiClient;
use triview_core::config::ClientConfig;
use triview_core::midpoint::MidpointVector;
use triview_core::tile::ImageTile;

/// Build a client and establish the session.
pub fn connect(config: &ClientConfig) -> Result<ApiClient> {
    let client = ApiClient::from_config(config);
    client
        .login(&config.username, &config.password)
        .with_context(|| format!("login to {} failed", client.base_url()))?;
    Ok(client)
}

/// Regular files directly inside `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("cannot read {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Parse a `sagittal,coronal,axial` triple.
pub fn parse_midpoints(text: &str) -> Result<MidpointVector> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        bail!("expected three comma-separated midpoints, got {text:?}");
    }
    let mut vector = [0usize; 3];
    for (slot, part) in vector.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .with_context(|| format!("invalid midpoint {part:?}"))?;
    }
    Ok(vector)
}

pub fn print_tiles(tiles: &[ImageTile]) {
    println!("{} {} slice images:", style("✓").green(), tiles.len());
    for tile in tiles {
        println!("  {:10} {:6} {}", tile.view, tile.kind, tile.url);
    }
}
