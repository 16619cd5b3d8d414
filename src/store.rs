//! Key→string storage abstraction.
//!
//! The repository and settings store serialize their state as independent
//! JSON blobs under fixed keys. `FileStore` keeps one file per key in a
//! data directory; `MemStore` holds everything in a map and is handy for
//! tests and ephemeral sessions.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::error::Result;

/// Storage key for the serialized task sequence.
pub const TASKS_KEY: &str = "tasks";

/// Storage key for the serialized settings record.
pub const SETTINGS_KEY: &str = "settings";

/// A minimal persistent key→string store.
pub trait Store {
    /// Fetch the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: each key maps to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let mut buf = String::new();
        File::open(&path)?.read_to_string(&mut buf)?;
        Ok(Some(buf))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Atomic-ish write via temp + rename.
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// In-memory store with no durability.
#[derive(Debug, Default, Clone)]
pub struct MemStore {
    map: HashMap<String, String>,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore::default()
    }
}

impl Store for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
