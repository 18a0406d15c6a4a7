use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use triview_core::config::ClientConfig;

use super::{connect, list_files, parse_midpoints, print_tiles};

#[derive(Args)]
pub struct UploadArgs {
    /// Folder with the DICOM series
    #[arg(long)]
    pub dicom: Option<PathBuf>,

    /// Folder with the ROI NIfTI files
    #[arg(long)]
    pub roi: Option<PathBuf>,

    /// Initial midpoints as sagittal,coronal,axial (defaults to volume centers)
    #[arg(long)]
    pub midpoints: Option<String>,
}

pub fn run(args: &UploadArgs, config: &ClientConfig) -> Result<()> {
    let dicom_files = match &args.dicom {
        Some(dir) => list_files(dir)?,
        None => Vec::new(),
    };
    let nifti_files = match &args.roi {
        Some(dir) => list_files(dir)?,
        None => Vec::new(),
    };
    let midpoints = args.midpoints.as_deref().map(parse_midpoints).transpose()?;

    let client = connect(config)?;

    let total = dicom_files.len() + nifti_files.len();
    let pb = ProgressBar::new(total as u64).with_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")?.progress_chars("=> "),
    );
    pb.set_message("Uploading");

    let tiles =
        client.upload_with_progress(&dicom_files, &nifti_files, midpoints, |done, _total| {
            pb.set_position(done as u64);
        })?;
    pb.finish_and_clear();

    print_tiles(&tiles);
    Ok(())
}
