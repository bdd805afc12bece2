//! Session token storage.
//!
//! The token is an opaque credential issued by the auth backend. The file
//! store keeps it in `<home>/token` with restricted permissions (0600).
//! Tokens are never logged or displayed in full. No expiry is enforced here.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::config::paths;

/// Persists, retrieves and removes the session token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self) -> Result<()>;
}

/// Token store backed by a file in the newsdesk home directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location (`<home>/token`).
    pub fn default_location() -> Self {
        Self::new(paths::token_path())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token from {}", self.path.display()))?;
        let token = contents.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(token.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(token.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to remove token at {}", self.path.display())),
        }
    }
}

/// In-memory token store, used by tests and by front-ends that must not
/// touch the user's home directory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            writes: Mutex::new(0),
        }
    }

    /// Number of `set`/`remove` calls observed so far.
    pub fn writes(&self) -> usize {
        self.writes.lock().map_or(0, |writes| *writes)
    }

    fn record_write(&self) {
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        let token = self
            .token
            .lock()
            .map_err(|_poisoned| anyhow::anyhow!("token store lock poisoned"))?;
        Ok(token.clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_poisoned| anyhow::anyhow!("token store lock poisoned"))?;
        *slot = Some(token.to_string());
        drop(slot);
        self.record_write();
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_poisoned| anyhow::anyhow!("token store lock poisoned"))?;
        *slot = None;
        drop(slot);
        self.record_write();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert_eq!(store.get().unwrap(), None);
        store.set("tok-1").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("tok-1"));
        store.set("tok-2").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("tok-2"));
    }

    #[test]
    fn test_file_store_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.set("tok").unwrap();

        store.remove().unwrap();
        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(FileTokenStore::new(path).get().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.set("secret").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let store = MemoryTokenStore::with_token("a");
        assert_eq!(store.get().unwrap().as_deref(), Some("a"));
        store.remove().unwrap();
        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(store.writes(), 2);
    }
}
