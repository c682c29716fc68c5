use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use crate::error::CacheError;
use crate::types::CacheEntry;

pub const CACHE_VERSION: u32 = 2;
pub const FRESHNESS_WINDOW_MS: i64 = 3_600_000;

pub trait CacheBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>>;
    fn write(&self, bytes: &[u8]) -> io::Result<()>;
    fn remove(&self) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheBackend for FileBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, bytes)
    }

    fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Mutex::new(Some(bytes.into())),
        }
    }
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "memory cache lock poisoned")
}

impl CacheBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        let guard = self.data.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut guard = self.data.lock().map_err(|_| poisoned())?;
        *guard = Some(bytes.to_vec());
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        let mut guard = self.data.lock().map_err(|_| poisoned())?;
        *guard = None;
        Ok(())
    }
}

#[derive(Debug)]
pub struct CacheStore<B> {
    backend: B,
}

impl<B: CacheBackend> CacheStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn get(&self, expected_version: u32, max_age_ms: i64) -> Option<CacheEntry> {
        self.get_at(expected_version, max_age_ms, Utc::now().timestamp_millis())
    }

    pub fn get_at(
        &self,
        expected_version: u32,
        max_age_ms: i64,
        now_ms: i64,
    ) -> Option<CacheEntry> {
        match self.load(expected_version, max_age_ms, now_ms) {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("cache miss: {}", err);
                None
            }
        }
    }

    fn load(
        &self,
        expected_version: u32,
        max_age_ms: i64,
        now_ms: i64,
    ) -> Result<CacheEntry, CacheError> {
        let bytes = self.backend.read()?.ok_or(CacheError::Missing)?;
        let entry: CacheEntry = serde_json::from_slice(&bytes).map_err(CacheError::Decode)?;
        if entry.version != expected_version {
            return Err(CacheError::VersionMismatch {
                found: entry.version,
                expected: expected_version,
            });
        }
        let age_ms = now_ms - entry.timestamp;
        if age_ms >= max_age_ms {
            return Err(CacheError::Expired { age_ms });
        }
        Ok(entry)
    }

    pub fn put(&self, entry: &CacheEntry) {
        if let Err(err) = self.store(entry) {
            log::warn!("failed to write prayer cache: {}", err);
        }
    }

    fn store(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(entry).map_err(CacheError::Encode)?;
        self.backend.write(&bytes)?;
        Ok(())
    }

    pub fn clear(&self) {
        if let Err(err) = self.backend.remove() {
            log::warn!("failed to remove prayer cache: {}", err);
        }
    }
}
