//! Download helpers for saving remote files (images, video, anything) to
//! disk.
//!
//! The body is streamed chunk by chunk rather than buffered whole, so
//! large media files do not sit in memory. After the write the file is
//! checked to exist and be non-empty; a successful request that yields an
//! empty file is treated as a failure.

use futures::StreamExt;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::error::{FetchError, FetchResult};

/// Shared HTTP client.
static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Download `url` and save the body to `dest`, creating parent
/// directories as needed. Returns the path written.
pub async fn save_from_url(url: &str, dest: impl AsRef<Path>) -> FetchResult<PathBuf> {
    let dest = dest.as_ref();

    let response = CLIENT.get(url).send().await?.error_for_status()?;

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);

    let metadata = tokio::fs::metadata(dest).await?;
    if metadata.len() == 0 {
        return Err(FetchError::EmptyDownload(dest.to_path_buf()));
    }

    Ok(dest.to_path_buf())
}

/// Read a saved file back as bytes.
pub fn file_bytes(path: impl AsRef<Path>) -> FetchResult<Vec<u8>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FetchError::NotFound(path.to_path_buf()));
    }
    Ok(std::fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_bytes_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, b"\x89PNG\r\n").unwrap();

        assert_eq!(file_bytes(&path).unwrap(), b"\x89PNG\r\n");
    }

    #[test]
    fn test_file_bytes_missing() {
        assert!(matches!(
            file_bytes("/no/such/blob.bin"),
            Err(FetchError::NotFound(_))
        ));
    }
}
