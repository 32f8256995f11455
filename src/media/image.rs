//! Image validation for the captioning pipeline.
//!
//! Accepted uploads are jpeg/jpg/png, at most 5 MiB, and the bytes must
//! actually decode as an image.

use std::fs;
use std::path::{Path, PathBuf};

use image::{GenericImageView, ImageFormat};

use super::MediaError;

/// Upper bound on accepted image files.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

/// An image that passed validation and may be sent to the vision
/// backend.
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    pub path: PathBuf,
    pub format: ImageFormat,
    pub size_bytes: u64,
    pub dimensions: (u32, u32),
}

/// Check that `path` points to an acceptable image.
///
/// Validates existence, extension, size and that the content decodes.
/// Extension and content format are checked independently against the
/// allowlist.
pub fn validate_image(path: &Path) -> Result<ValidatedImage, MediaError> {
    if !path.exists() {
        return Err(MediaError::ImageNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(MediaError::UnsupportedImageFormat(
            path.display().to_string(),
        ));
    }

    let size_bytes = fs::metadata(path)?.len();
    if size_bytes > MAX_IMAGE_BYTES {
        return Err(MediaError::ImageTooLarge {
            size: size_bytes,
            limit: MAX_IMAGE_BYTES,
        });
    }

    let reader = image::io::Reader::open(path)?.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| MediaError::InvalidImage("unrecognized image data".to_string()))?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(MediaError::UnsupportedImageFormat(
            path.display().to_string(),
        ));
    }

    let decoded = reader
        .decode()
        .map_err(|e| MediaError::InvalidImage(e.to_string()))?;

    Ok(ValidatedImage {
        path: path.to_path_buf(),
        format,
        size_bytes,
        dimensions: decoded.dimensions(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        image::RgbImage::new(4, 4).save(path).unwrap();
    }

    #[test]
    fn test_validate_accepts_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        write_png(&path);

        let validated = validate_image(&path).unwrap();
        assert_eq!(validated.format, ImageFormat::Png);
        assert_eq!(validated.dimensions, (4, 4));
        assert!(validated.size_bytes > 0);
    }

    #[test]
    fn test_validate_accepts_jpeg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        image::RgbImage::new(4, 4).save(&path).unwrap();

        let validated = validate_image(&path).unwrap();
        assert_eq!(validated.format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_validate_missing_file() {
        let result = validate_image(Path::new("/nonexistent/photo.png"));
        assert!(matches!(result.unwrap_err(), MediaError::ImageNotFound(_)));
    }

    #[test]
    fn test_validate_rejects_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let result = validate_image(&path);
        assert!(matches!(
            result.unwrap_err(),
            MediaError::UnsupportedImageFormat(_)
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.png");
        fs::write(&path, vec![0u8; (MAX_IMAGE_BYTES + 1) as usize]).unwrap();

        let result = validate_image(&path);
        assert!(matches!(
            result.unwrap_err(),
            MediaError::ImageTooLarge { .. }
        ));
    }

    #[test]
    fn test_validate_rejects_garbage_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.png");
        fs::write(&path, b"definitely not an image").unwrap();

        let result = validate_image(&path);
        assert!(matches!(result.unwrap_err(), MediaError::InvalidImage(_)));
    }

    #[test]
    fn test_validate_allows_mismatched_allowed_formats() {
        // A PNG named .jpg passes: both the extension and the content
        // format sit in the allowlist.
        let dir = TempDir::new().unwrap();
        let png = dir.path().join("photo.png");
        write_png(&png);
        let renamed = dir.path().join("photo.jpg");
        fs::copy(&png, &renamed).unwrap();

        let validated = validate_image(&renamed).unwrap();
        assert_eq!(validated.format, ImageFormat::Png);
    }
}
