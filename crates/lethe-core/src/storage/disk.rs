//! Directory-rooted object store.
//!
//! Maps object keys onto files under a root directory: the key
//! `doc-1/output.docx` lives at `{root}/doc-1/output.docx`. Empty parent
//! directories are pruned on delete so that a fully deleted docId no longer
//! appears in listings.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::storage::ObjectStore;

pub struct DiskObjectStore {
    root: PathBuf,
}

impl DiskObjectStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.starts_with('/')
            || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return Err(Error::Validation(format!("invalid object key: {key:?}")));
        }
        Ok(self.root.join(key))
    }

    /// Remove now-empty directories between a deleted file and the root.
    async fn prune_empty_parents(&self, mut dir: PathBuf) {
        while dir.starts_with(&self.root) && dir != self.root {
            // remove_dir fails on non-empty directories, which ends the walk.
            if tokio::fs::remove_dir(&dir).await.is_err() {
                break;
            }
            match dir.parent() {
                Some(parent) => dir = parent.to_path_buf(),
                None => break,
            }
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for DiskObjectStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data).await?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut pending: Vec<PathBuf> = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                // The namespace root may not have been written to yet.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                } else if let Some(key) = relative_key(&self.root, &path) {
                    if key.starts_with(prefix) {
                        keys.push(key);
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!("object {key} not found")));
            }
            Err(e) => return Err(e.into()),
        }
        if let Some(parent) = path.parent() {
            self.prune_empty_parents(parent.to_path_buf()).await;
        }
        Ok(())
    }
}

/// Render a file path as an object key relative to `root`, with `/`
/// separators regardless of platform. Non-UTF-8 paths are skipped.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let segments: Option<Vec<&str>> = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect();
    Some(segments?.join("/"))
}
