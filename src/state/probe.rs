//! Image metadata probe
//!
//! Reads just enough of an image file to report its dimensions, format and
//! size for the status line. Runs on the blocking pool so large files never
//! stall the UI.

use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::ViewerError;

/// What the status line shows about the displayed image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDetails {
    pub width: u32,
    pub height: u32,
    /// Short format name, e.g. "png" (None if the header was not recognised)
    pub format: Option<String>,
    /// File size in bytes
    pub bytes: u64,
}

impl ImageDetails {
    /// One-line summary, e.g. `1920 × 1080 · PNG · 2.3 MB`
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} × {}", self.width, self.height)];
        if let Some(format) = &self.format {
            parts.push(format.to_uppercase());
        }
        parts.push(format_size(self.bytes));
        parts.join(" · ")
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Whether the image crate can read this file's header.
/// SVG is rendered directly and has no pixel dimensions to probe.
pub fn can_probe(path: &Path) -> bool {
    !path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// Probe an image file on the blocking pool
///
/// # Returns
/// * `Ok(details)` - Dimensions, format and size
/// * `Err(String)` - Error message if the file could not be read
pub async fn probe_image(path: PathBuf) -> Result<ImageDetails, String> {
    task::spawn_blocking(move || probe_image_blocking(&path).map_err(|e| e.to_string()))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

fn probe_image_blocking(path: &Path) -> Result<ImageDetails, ViewerError> {
    let probe_error = |message: String| ViewerError::Probe {
        path: path.to_path_buf(),
        message,
    };

    let bytes = std::fs::metadata(path)
        .map_err(|e| probe_error(e.to_string()))?
        .len();

    let reader = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| probe_error(e.to_string()))?;

    let format = reader
        .format()
        .and_then(|format| format.extensions_str().first().map(|ext| ext.to_string()));

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| probe_error(e.to_string()))?;

    Ok(ImageDetails {
        width,
        height,
        format,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_summary() {
        let details = ImageDetails {
            width: 1920,
            height: 1080,
            format: Some("png".to_string()),
            bytes: 3 * 1024 * 1024,
        };
        assert_eq!(details.summary(), "1920 × 1080 · PNG · 3.0 MB");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
    }

    #[test]
    fn test_can_probe() {
        assert!(can_probe(Path::new("/x/a.png")));
        assert!(!can_probe(Path::new("/x/a.SVG")));
    }

    #[tokio::test]
    async fn test_probe_real_png() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("tiny.png");
        image::RgbImage::new(3, 2).save(&path).expect("failed to write png");

        let details = probe_image(path).await.unwrap();
        assert_eq!((details.width, details.height), (3, 2));
        assert_eq!(details.format.as_deref(), Some("png"));
        assert!(details.bytes > 0);
    }

    #[tokio::test]
    async fn test_probe_garbage_fails() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"fake").unwrap();

        assert!(probe_image(path).await.is_err());
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let result = probe_image(PathBuf::from("/nonexistent/path.png")).await;
        assert!(result.is_err());
    }
}
