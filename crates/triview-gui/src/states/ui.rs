use std::path::PathBuf;

/// Overall UI state not derived from the image collection.
#[derive(Default)]
pub struct UIState {
    pub logged_in: bool,

    /// Folder selections for the next upload.
    pub dicom_dir: Option<PathBuf>,
    pub nifti_dir: Option<PathBuf>,

    /// An upload request is in flight (distinct from the controller's
    /// regeneration backpressure flag).
    pub upload_in_flight: bool,

    /// Last non-regeneration failure, shown until the next action.
    pub last_error: Option<String>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn has_selection(&self) -> bool {
        self.dicom_dir.is_some() || self.nifti_dir.is_some()
    }
}
