use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use triview_core::config::ClientConfig;
use triview_core::midpoint::{Axis, MidpointCoordinator};

use super::{connect, parse_midpoints, print_tiles};

#[derive(Args)]
pub struct RegenerateArgs {
    /// Midpoints as sagittal,coronal,axial; out-of-range values are clamped
    #[arg(long)]
    pub midpoints: String,

    /// Also save the regenerated images into this folder
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &RegenerateArgs, config: &ClientConfig) -> Result<()> {
    let requested = parse_midpoints(&args.midpoints)?;

    let client = connect(config)?;
    let shape = client.volume_shape()?;

    let mut coordinator = MidpointCoordinator::new();
    coordinator.initialize(shape);
    for axis in Axis::ALL {
        let stored = coordinator.update_axis(axis, requested[axis.index()] as i64)?;
        if stored != requested[axis.index()] {
            eprintln!(
                "{} {axis} midpoint clamped to {stored} (volume has {} voxels)",
                style("!").yellow(),
                shape.dim(axis)
            );
        }
    }
    let midpoints = [
        coordinator.midpoint(Axis::Sagittal),
        coordinator.midpoint(Axis::Coronal),
        coordinator.midpoint(Axis::Axial),
    ];

    let tiles = client.regenerate(midpoints)?;
    print_tiles(&tiles);

    if let Some(dir) = &args.out {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create {}", dir.display()))?;
        for tile in &tiles {
            let bytes = client.fetch_image(&tile.url)?;
            let path = dir.join(format!("{}_{}.png", tile.view, tile.kind));
            std::fs::write(&path, bytes)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("  saved {}", path.display());
        }
    }
    Ok(())
}
