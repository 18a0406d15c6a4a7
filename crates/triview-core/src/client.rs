use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{Result, TriviewError};
use crate::midpoint::{MidpointVector, VolumeShape};
use crate::tile::ImageTile;

pub mod multipart;

use multipart::MultipartBody;

/// Fixed client-side filename for the array download stream.
pub const ARRAY_FILENAME: &str = "combined_array.txt";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct StatusResponse {
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ShapeResponse {
    shape: Vec<usize>,
}

#[derive(Deserialize)]
struct ImagesResponse {
    images: Vec<ImageTile>,
}

/// Session-holding HTTP client for the slice-rendering server.
///
/// The agent keeps the login cookie, so one client instance is one
/// authenticated session. All calls are blocking; the GUI drives them from
/// its worker thread.
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.server_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Establish the server session.
    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        let resp = self
            .agent
            .post(&self.url("/login"))
            .send_form(&[("username", username), ("password", password)])
            .map_err(map_err)?;
        let status: StatusResponse = resp
            .into_json()
            .map_err(|e| TriviewError::Decode(e.to_string()))?;
        if status.status != "success" {
            return Err(TriviewError::Http {
                status: 401,
                message: status.error.unwrap_or_else(|| "login rejected".to_string()),
            });
        }
        info!("logged in as {username}");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.agent.get(&self.url("/logout")).call().map_err(map_err)?;
        Ok(())
    }

    /// Query the uploaded volume's dimensions.
    pub fn volume_shape(&self) -> Result<VolumeShape> {
        let resp = self
            .agent
            .get(&self.url("/get_dicom_shape"))
            .call()
            .map_err(|e| TriviewError::ShapeUnavailable(map_err(e).to_string()))?;
        let shape: ShapeResponse = resp
            .into_json()
            .map_err(|e| TriviewError::ShapeUnavailable(e.to_string()))?;
        VolumeShape::from_dims(&shape.shape)
    }

    /// Submit DICOM series and ROI files, plus the initial midpoint vector
    /// when one is already known. Returns the derived slice tiles.
    pub fn upload(
        &self,
        dicom_files: &[PathBuf],
        nifti_files: &[PathBuf],
        midpoints: Option<MidpointVector>,
    ) -> Result<Vec<ImageTile>> {
        self.upload_with_progress(dicom_files, nifti_files, midpoints, |_, _| {})
    }

    /// Same as [`upload`](Self::upload), reporting (files done, files total)
    /// while the request body is assembled.
    pub fn upload_with_progress(
        &self,
        dicom_files: &[PathBuf],
        nifti_files: &[PathBuf],
        midpoints: Option<MidpointVector>,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Vec<ImageTile>> {
        if dicom_files.is_empty() && nifti_files.is_empty() {
            return Err(TriviewError::Validation(
                "no files selected for upload".to_string(),
            ));
        }

        let total = dicom_files.len() + nifti_files.len();
        let mut done = 0;
        let mut body = MultipartBody::new();
        for path in dicom_files {
            body.add_file("dicom_files", path)?;
            done += 1;
            progress(done, total);
        }
        for path in nifti_files {
            body.add_file("nifti_files", path)?;
            done += 1;
            progress(done, total);
        }
        if let Some(m) = midpoints {
            body.add_text("midpoints", &format_midpoints(m));
        }

        let (content_type, bytes) = body.finish();
        debug!(files = total, bytes = bytes.len(), "uploading volume");
        let resp = self
            .agent
            .post(&self.url("/upload"))
            .set("Content-Type", &content_type)
            .send_bytes(&bytes)
            .map_err(map_err)?;
        let images: ImagesResponse = resp
            .into_json()
            .map_err(|e| TriviewError::Decode(e.to_string()))?;
        Ok(images.images)
    }

    /// Ask the server to re-render all slices at the given midpoints.
    pub fn regenerate(&self, midpoints: MidpointVector) -> Result<Vec<ImageTile>> {
        let resp = self
            .agent
            .post(&self.url("/regenerate"))
            .send_form(&[("midpoints", format_midpoints(midpoints).as_str())])
            .map_err(map_err)?;
        let images: ImagesResponse = resp
            .into_json()
            .map_err(|e| TriviewError::Decode(e.to_string()))?;
        Ok(images.images)
    }

    /// Fetch one tile image (PNG bytes). Tile urls may be absolute or
    /// server-relative.
    pub fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.url(url)
        };
        let resp = self.agent.get(&url).call().map_err(map_err)?;
        let mut bytes = Vec::new();
        resp.into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| TriviewError::Network(e.to_string()))?;
        Ok(bytes)
    }

    /// Stream the fused 3-D array dump into `dir` under its fixed filename.
    /// The payload is opaque to the client.
    pub fn download_array(&self, dir: &Path) -> Result<PathBuf> {
        let resp = self
            .agent
            .get(&self.url("/download_array"))
            .call()
            .map_err(map_err)?;

        let path = dir.join(ARRAY_FILENAME);
        let mut file = File::create(&path)?;
        let mut reader = resp.into_reader();
        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = reader
                .read(&mut buf)
                .map_err(|e| TriviewError::Network(e.to_string()))?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])?;
        }
        info!(path = %path.display(), "array saved");
        Ok(path)
    }
}

fn format_midpoints(m: MidpointVector) -> String {
    format!("{},{},{}", m[0], m[1], m[2])
}

fn map_err(e: ureq::Error) -> TriviewError {
    match e {
        ureq::Error::Status(status, resp) => {
            // The server reports failures as {"error": "..."} bodies.
            let message = resp
                .into_json::<StatusResponse>()
                .ok()
                .and_then(|s| s.error)
                .unwrap_or_else(|| "request failed".to_string());
            TriviewError::Http { status, message }
        }
        ureq::Error::Transport(t) => TriviewError::Network(t.to_string()),
    }
}
