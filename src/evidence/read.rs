//! Fallible reads that degrade to neutral values.
//!
//! Every probe reads externally-owned files that may be missing, unreadable
//! or malformed at any moment. The recovery policy is uniform and lives
//! here once: substitute nothing and let the caller fall back to its
//! documented default.

use std::path::{Path, PathBuf};

/// Read a text file, or `None` when it cannot be read.
pub(crate) async fn read_text(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Source not present");
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read source");
            None
        }
    }
}

/// Read and parse a JSON file, or `None` when unreadable or malformed.
pub(crate) async fn read_json(path: &Path) -> Option<serde_json::Value> {
    let content = read_text(path).await?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Malformed JSON source");
            None
        }
    }
}

/// List a directory's entries, empty when it cannot be read.
pub(crate) async fn list_dir(path: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    match tokio::fs::read_dir(path).await {
        Ok(mut entries) => {
            while let Ok(Some(entry)) = entries.next_entry().await {
                paths.push(entry.path());
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Source directory not present");
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to list source directory");
        }
    }
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_text_missing_file() {
        let result = read_text(Path::new("/nonexistent/source.md")).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_text_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.md");
        tokio::fs::write(&path, "hello").await.unwrap();

        let result = read_text(&path).await;
        assert_eq!(result.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_read_json_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        tokio::fs::write(&path, "not json {").await.unwrap();

        let result = read_json(&path).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_json_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.json");
        tokio::fs::write(&path, r#"[1, 2, 3]"#).await.unwrap();

        let result = read_json(&path).await.unwrap();
        assert_eq!(result.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_dir_missing() {
        let paths = list_dir(Path::new("/nonexistent/dir")).await;
        assert!(paths.is_empty());
    }

    #[tokio::test]
    async fn test_list_dir_sorted() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("b.md"), "").await.unwrap();
        tokio::fs::write(dir.path().join("a.md"), "").await.unwrap();

        let paths = list_dir(dir.path()).await;
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.md"));
        assert!(paths[1].ends_with("b.md"));
    }
}
