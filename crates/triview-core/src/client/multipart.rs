use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, TriviewError};

/// Minimal `multipart/form-data` body builder for the upload endpoint.
pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        Self {
            boundary: format!("triview-{}-{nanos:08x}", std::process::id()),
            buf: Vec::new(),
        }
    }

    pub fn add_text(&mut self, name: &str, value: &str) {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
    }

    pub fn add_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                TriviewError::Validation(format!("unusable file name: {}", path.display()))
            })?
            .to_string();
        let contents = fs::read(path)?;

        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        self.buf
            .extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        self.buf.extend_from_slice(&contents);
        self.buf.extend_from_slice(b"\r\n");
        Ok(())
    }

    /// Close the body. Returns the Content-Type header value and the bytes.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.buf,
        )
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn text_field_layout() {
        let mut body = MultipartBody::new();
        body.add_text("midpoints", "1,2,3");
        let (content_type, bytes) = body.finish();
        let text = String::from_utf8(bytes).unwrap();

        let boundary = content_type.split("boundary=").nth(1).unwrap();
        assert!(text.starts_with(&format!("--{boundary}\r\n")));
        assert!(text.contains("Content-Disposition: form-data; name=\"midpoints\"\r\n\r\n1,2,3\r\n"));
        assert!(text.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn file_field_carries_filename_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slice.dcm");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"DICM-bytes").unwrap();

        let mut body = MultipartBody::new();
        body.add_file("dicom_files", &path).unwrap();
        let (_, bytes) = body.finish();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("name=\"dicom_files\"; filename=\"slice.dcm\""));
        assert!(text.contains("Content-Type: application/octet-stream\r\n\r\nDICM-bytes\r\n"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut body = MultipartBody::new();
        assert!(body
            .add_file("dicom_files", Path::new("/no/such/file.dcm"))
            .is_err());
    }
}
