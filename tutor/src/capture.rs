//! Capture collaborator: reads the image the learner took or picked.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tutor_core::FlowError;

/// A captured image held in memory.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl CapturedImage {
    /// MIME type guessed from the extension; only used for logging.
    pub fn mime_type(&self) -> &'static str {
        match self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            Some("tif") | Some("tiff") => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

/// Reads the image at `path`. Missing, unreadable or empty files are capture failures.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_image(path: impl AsRef<Path>) -> Result<CapturedImage, FlowError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| FlowError::CaptureFailed(format!("{}: {}", path.display(), e)))?;
    if bytes.is_empty() {
        return Err(FlowError::CaptureFailed(format!(
            "{}: file is empty",
            path.display()
        )));
    }
    let image = CapturedImage {
        path: path.to_path_buf(),
        bytes,
    };
    info!(size = image.bytes.len(), mime = image.mime_type(), "Image captured");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        let img = |p: &str| CapturedImage {
            path: PathBuf::from(p),
            bytes: vec![1],
        };
        assert_eq!(img("a.PNG").mime_type(), "image/png");
        assert_eq!(img("a.jpeg").mime_type(), "image/jpeg");
        assert_eq!(img("noext").mime_type(), "application/octet-stream");
    }
}
