//! Disk-backed file storage for uploaded product images.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The multipart request carried no usable file field.
    #[error("no file uploaded")]
    MissingFile,

    /// Filesystem failure.
    #[error("upload write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Write uploaded bytes into `dir` under a collision-free name and
/// return the stored filename.
///
/// The name is a millisecond timestamp plus a random suffix, keeping
/// the extension of the original filename.
///
/// # Errors
///
/// Returns `UploadError::Io` if the directory cannot be created or the
/// file cannot be written.
pub async fn store_upload(
    dir: &Path,
    original_name: &str,
    data: &[u8],
) -> Result<String, UploadError> {
    tokio::fs::create_dir_all(dir).await?;

    let extension = Path::new(original_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let filename = format!(
        "{}-{}{}",
        Utc::now().timestamp_millis(),
        rand::random::<u32>(),
        extension
    );

    let path: PathBuf = dir.join(&filename);
    tokio::fs::write(&path, data).await?;

    Ok(filename)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_upload_keeps_extension() {
        let dir = std::env::temp_dir().join(format!("maracuja-upload-{}", rand::random::<u32>()));
        let name = store_upload(&dir, "photo.png", b"not-really-a-png")
            .await
            .unwrap();
        assert!(name.ends_with(".png"));
        let stored = tokio::fs::read(dir.join(&name)).await.unwrap();
        assert_eq!(stored, b"not-really-a-png");
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_upload_unique_names() {
        let dir = std::env::temp_dir().join(format!("maracuja-upload-{}", rand::random::<u32>()));
        let a = store_upload(&dir, "a.jpg", b"one").await.unwrap();
        let b = store_upload(&dir, "a.jpg", b"two").await.unwrap();
        assert_ne!(a, b);
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
