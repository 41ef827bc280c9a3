//! Local upload store using the filesystem

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::upload_store::{sanitize_filename, UploadStore};

/// Upload store keeping each file under its own name in one directory
pub struct LocalUploadStore {
    /// Directory to store uploads
    upload_dir: PathBuf,
}

impl LocalUploadStore {
    /// Create a new local upload store, creating the directory if absent
    pub fn new(upload_dir: impl Into<PathBuf>) -> Result<Self> {
        let upload_dir = upload_dir.into();
        std::fs::create_dir_all(&upload_dir)?;
        Ok(Self { upload_dir })
    }

    /// Directory backing this store
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String> {
        let name = sanitize_filename(filename)?;

        // The directory may have been removed while running
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::write(self.upload_dir.join(&name), data).await?;

        tracing::info!("Stored upload {} ({} bytes)", name, data.len());
        Ok(name)
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.upload_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            files.push(entry.file_name().to_string_lossy().to_string());
        }

        Ok(files)
    }

    async fn path(&self, filename: &str) -> Result<Option<PathBuf>> {
        // Lookups must name a stored file exactly; "dir/x.pdf" is not "x.pdf"
        let name = sanitize_filename(filename)?;
        if name != filename {
            return Ok(None);
        }
        let path = self.upload_dir.join(name);

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(path)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "local-filesystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("nested").join("uploads");

        let store = LocalUploadStore::new(&upload_dir).unwrap();
        assert!(upload_dir.is_dir());
        assert_eq!(store.upload_dir(), upload_dir.as_path());
    }

    #[tokio::test]
    async fn test_store_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads")).unwrap();

        assert!(store.list().await.unwrap().is_empty());

        let name = store.store("x.pdf", b"%PDF-1.4").await.unwrap();
        assert_eq!(name, "x.pdf");
        store.store("y.pdf", b"%PDF-1.4").await.unwrap();

        let mut files = store.list().await.unwrap();
        files.sort();
        assert_eq!(files, vec!["x.pdf", "y.pdf"]);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path()).unwrap();

        store.store("paper.pdf", b"first").await.unwrap();
        store.store("paper.pdf", b"second").await.unwrap();

        let path = store.path("paper.pdf").await.unwrap().unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"second");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_recreates_removed_directory() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");
        let store = LocalUploadStore::new(&upload_dir).unwrap();

        std::fs::remove_dir_all(&upload_dir).unwrap();
        assert!(store.list().await.unwrap().is_empty());

        store.store("late.pdf", b"data").await.unwrap();
        assert!(upload_dir.join("late.pdf").is_file());
    }

    #[tokio::test]
    async fn test_traversal_stays_inside_directory() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");
        let store = LocalUploadStore::new(&upload_dir).unwrap();

        let name = store.store("../escape.pdf", b"data").await.unwrap();
        assert_eq!(name, "escape.pdf");
        assert!(upload_dir.join("escape.pdf").is_file());
        assert!(!dir.path().join("escape.pdf").exists());
    }

    #[tokio::test]
    async fn test_path_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        assert!(store.path("missing.pdf").await.unwrap().is_none());
        assert!(store.path("subdir").await.unwrap().is_none());
        assert!(matches!(store.path("..").await, Err(Error::InvalidInput(_))));

        store.store("here.pdf", b"data").await.unwrap();
        assert_eq!(
            store.path("here.pdf").await.unwrap(),
            Some(dir.path().join("here.pdf"))
        );
    }

    #[tokio::test]
    async fn test_path_does_not_alias_by_basename() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path()).unwrap();
        store.store("x.pdf", b"data").await.unwrap();

        assert!(store.path("x.pdf").await.unwrap().is_some());
        assert!(store.path("other/dir/x.pdf").await.unwrap().is_none());
        assert!(store.path("../x.pdf").await.unwrap().is_none());
        assert!(store.path("sub\\x.pdf").await.unwrap().is_none());
        assert!(store.path(" x.pdf ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        store.store("a.pdf", b"a").await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["a.pdf"]);
    }
}
