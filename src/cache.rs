use crate::error::Result;
use crate::types::TermRecord;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Memoized short-circuit around a whole discovery run, keyed by namespace
/// and source URL. Consulted only in development mode.
pub trait DevCache: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Option<Vec<TermRecord>>;
    fn set(&self, namespace: &str, key: &str, value: &[TermRecord]) -> Result<()>;
}

/// In-memory cache for tests and short-lived runs.
#[derive(Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<(String, String), Vec<TermRecord>>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DevCache for MemoryCache {
    fn get(&self, namespace: &str, key: &str) -> Option<Vec<TermRecord>> {
        let entries = self.entries.lock().unwrap();
        entries.get(&(namespace.to_string(), key.to_string())).cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: &[TermRecord]) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert((namespace.to_string(), key.to_string()), value.to_vec());
        Ok(())
    }
}

/// File-backed cache for development runs: one JSON file per entry under
/// `<root>/<namespace>/`, named by the sha256 of the key.
pub struct FsCache {
    root: PathBuf,
}

impl FsCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_path(&self, namespace: &str, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let digest = hex::encode(hasher.finalize());
        self.root.join(namespace).join(format!("{digest}.json"))
    }
}

impl DevCache for FsCache {
    fn get(&self, namespace: &str, key: &str) -> Option<Vec<TermRecord>> {
        let path = self.entry_path(namespace, key);
        let bytes = fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(records) => {
                debug!(path = %path.display(), "dev cache hit");
                Some(records)
            }
            Err(_) => None,
        }
    }

    fn set(&self, namespace: &str, key: &str, value: &[TermRecord]) -> Result<()> {
        let path = self.entry_path(namespace, key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, serde_json::to_vec_pretty(value)?)?;
        Ok(())
    }
}
