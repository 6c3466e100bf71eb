//! Object storage for furniture photos.
//!
//! Handlers talk to a [`PhotoStore`] trait object held in `AppState`, so the
//! S3 backend ([`s3::S3PhotoStore`]) can be swapped for an in-memory store in
//! tests.

pub mod s3;

use async_trait::async_trait;
use image::ImageFormat;

pub use s3::S3PhotoStore;

/// Errors raised by a [`PhotoStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    Upload(String),

    #[error("delete failed: {0}")]
    Delete(String),

    #[error("bucket unreachable: {0}")]
    Unavailable(String),
}

/// Write/delete access to the bucket holding furniture photos.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store `bytes` under `key`.
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>)
        -> Result<(), StorageError>;

    /// Remove the object at `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL clients use to fetch the object.
    fn public_url(&self, key: &str) -> String;

    /// Confirm the bucket is reachable with the configured credentials.
    async fn check(&self) -> Result<(), StorageError>;
}

/// Accepted photo encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Png,
    Jpeg,
    WebP,
}

impl PhotoFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }
}

/// Identify an upload by its magic bytes, ignoring the client's filename and
/// content type. Returns `None` for anything but PNG, JPEG or WebP.
pub fn sniff_photo(bytes: &[u8]) -> Option<PhotoFormat> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Png => Some(PhotoFormat::Png),
        ImageFormat::Jpeg => Some(PhotoFormat::Jpeg),
        ImageFormat::WebP => Some(PhotoFormat::WebP),
        _ => None,
    }
}

/// Fresh object key for a furniture photo.
pub fn photo_key(format: PhotoFormat) -> String {
    format!("furniture/{}.{}", uuid::Uuid::new_v4(), format.extension())
}

/// Delete `keys`, logging failures instead of returning them.
///
/// Used after a commit (or a failed transaction) when the database is
/// already the source of truth and an orphaned object is the only cost.
pub async fn delete_best_effort(store: &dyn PhotoStore, keys: &[String]) {
    for key in keys {
        if let Err(e) = store.delete(key).await {
            tracing::warn!(key = %key, error = %e, "Failed to delete photo object");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_MAGIC: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";
    const WEBP_MAGIC: &[u8] = b"RIFF\x24\0\0\0WEBPVP8 ";

    #[test]
    fn sniffs_accepted_formats() {
        assert_eq!(sniff_photo(PNG_MAGIC), Some(PhotoFormat::Png));
        assert_eq!(sniff_photo(JPEG_MAGIC), Some(PhotoFormat::Jpeg));
        assert_eq!(sniff_photo(WEBP_MAGIC), Some(PhotoFormat::WebP));
    }

    #[test]
    fn rejects_other_content() {
        assert_eq!(sniff_photo(b"GIF89a\x01\0\x01\0"), None);
        assert_eq!(sniff_photo(b"%PDF-1.7"), None);
        assert_eq!(sniff_photo(b""), None);
    }

    #[test]
    fn keys_are_unique_and_carry_extension() {
        let a = photo_key(PhotoFormat::Jpeg);
        let b = photo_key(PhotoFormat::Jpeg);
        assert_ne!(a, b);
        assert!(a.starts_with("furniture/"));
        assert!(a.ends_with(".jpg"));
    }
}
