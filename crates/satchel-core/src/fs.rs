//! Filesystem helpers

use std::path::{Path, PathBuf};

use tokio::io::{AsyncWriteExt, BufReader, BufWriter};
use tracing::debug;

use crate::{Result, SatchelError};

const COPY_BUFFER_SIZE: usize = 4096;

/// Look for `file_name` in `start` and then in up to `limit` parent
/// directories. Returns the first path found.
pub fn find_file_upwards(start: impl AsRef<Path>, file_name: &str, limit: usize) -> Option<PathBuf> {
    let mut directory = start.as_ref();
    for _ in 0..=limit {
        let candidate = directory.join(file_name);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "found file");
            return Some(candidate);
        }
        directory = directory.parent()?;
    }
    None
}

/// Copy `source` to `destination`, replacing any existing file. Returns the
/// number of bytes copied. Dropping the future abandons the copy.
pub async fn copy_file(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<u64> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    let input = tokio::fs::File::open(source)
        .await
        .map_err(|e| SatchelError::file("open", source, e))?;
    let output = tokio::fs::File::create(destination)
        .await
        .map_err(|e| SatchelError::file("create", destination, e))?;

    let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, input);
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, output);
    let copied = tokio::io::copy(&mut reader, &mut writer)
        .await
        .map_err(|e| SatchelError::file("write", destination, e))?;
    writer
        .flush()
        .await
        .map_err(|e| SatchelError::file("flush", destination, e))?;

    debug!(
        source = %source.display(),
        destination = %destination.display(),
        bytes = copied,
        "copied file"
    );
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_file_upwards() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a").join("b").join("c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("a").join("marker.toml"), "").unwrap();

        // c -> b -> a takes two steps up
        let found = find_file_upwards(&nested, "marker.toml", 2).unwrap();
        assert_eq!(found, root.path().join("a").join("marker.toml"));
        assert_eq!(find_file_upwards(&nested, "marker.toml", 1), None);
        assert_eq!(find_file_upwards(&nested, "absent.toml", 3), None);
    }

    #[test]
    fn test_find_file_in_start_directory() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("here.txt"), "x").unwrap();
        assert!(find_file_upwards(root.path(), "here.txt", 0).is_some());
    }

    #[tokio::test]
    async fn test_copy_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.bin");
        let destination = dir.path().join("destination.bin");
        let payload: Vec<u8> = (0..10_000u32).map(|n| (n % 251) as u8).collect();
        std::fs::write(&source, &payload).unwrap();
        std::fs::write(&destination, vec![0u8; 20_000]).unwrap();

        let copied = copy_file(&source, &destination).await.unwrap();
        assert_eq!(copied, payload.len() as u64);
        assert_eq!(std::fs::read(&destination).unwrap(), payload);
    }

    #[tokio::test]
    async fn test_copy_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let err = copy_file(dir.path().join("missing"), dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(
            &err,
            SatchelError::File { action: "open", path, .. } if path.ends_with("missing")
        ));
        assert!(err.to_string().starts_with("Failed to open"));
    }
}
