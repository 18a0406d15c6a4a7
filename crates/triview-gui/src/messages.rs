use std::path::PathBuf;

use triview_core::error::TriviewError;
use triview_core::midpoint::{MidpointVector, VolumeShape};
use triview_core::tile::ImageTile;

/// Commands sent from the UI thread to the network worker.
pub enum WorkerCommand {
    /// Establish the server session with the configured credentials.
    Login,

    /// Submit the selected DICOM/ROI folders, then query the volume shape.
    Upload {
        dicom_dir: Option<PathBuf>,
        nifti_dir: Option<PathBuf>,
        midpoints: Option<MidpointVector>,
    },

    /// Re-render all slices at the given midpoint vector.
    Regenerate { midpoints: MidpointVector },

    /// Save the fused array dump into `dir`.
    DownloadArray { dir: PathBuf },

    Logout,
}

/// One tile with its decoded pixels, ready for texture upload.
pub struct TilePixmap {
    pub tile: ImageTile,
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

/// Results sent from the worker back to the UI thread.
pub enum WorkerResult {
    LoggedIn,

    /// Upload accepted; tiles fetched and decoded.
    UploadComplete { tiles: Vec<TilePixmap> },

    /// Shape query answered (queried right after a successful upload).
    ShapeReady { shape: VolumeShape },

    RegenerateComplete { tiles: Vec<TilePixmap> },

    /// The regeneration boundary failed; existing state must be preserved.
    RegenerateFailed { error: TriviewError },

    ArraySaved { path: PathBuf },

    /// Folder picker dialogs run on their own threads and report here.
    DicomFolderSelected { path: PathBuf },
    NiftiFolderSelected { path: PathBuf },

    LoggedOut,

    Error { message: String },
    Log { message: String },
}
