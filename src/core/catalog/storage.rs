use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;

/// Where the serialized catalog lives: one string-keyed slot, read whole and
/// overwritten whole. Kept behind a trait so tests can swap the slot out.
pub trait SlotStorage {
    /// Current slot contents, `None` if the slot has never been written.
    fn get(&self) -> impl Future<Output = anyhow::Result<Option<String>>>;
    /// Overwrite the slot wholesale.
    fn set(&self, value: &str) -> impl Future<Output = anyhow::Result<()>>;
}

/// Durable slot backed by a single file on disk.
///
/// Writes replace the file contents in one call; there is no partial-write
/// protocol and no coordination between processes (last writer wins).
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SlotStorage for FileSlot {
    async fn get(&self) -> anyhow::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read catalog file {:?}", self.path))
            }
        }
    }

    async fn set(&self, value: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            // A bare file name has an empty parent; nothing to create then.
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }
        tokio::fs::write(&self.path, value)
            .await
            .with_context(|| format!("Failed to write catalog file {:?}", self.path))?;
        Ok(())
    }
}

/// In-process slot. Clones share the same cell, so a test can keep a handle
/// and inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlot {
    async fn get(&self) -> anyhow::Result<Option<String>> {
        Ok(self.value.lock().await.clone())
    }

    async fn set(&self, value: &str) -> anyhow::Result<()> {
        *self.value.lock().await = Some(value.to_string());
        Ok(())
    }
}
