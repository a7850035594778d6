use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::reading::Reading;

/// Storage key for readings that could not be synced.
const PENDING_KEY: &str = "pending_bearings";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Encoding(serde_json::Error),
}

impl std::error::Error for StoreError {}
impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "pending store I/O error: {}", e),
            StoreError::Encoding(e) => write!(f, "pending store encoding error: {}", e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Encoding(e)
    }
}

/// Durable queue of readings waiting for a sync that failed.
///
/// One JSON array under the `pending_bearings` key, appended to with a
/// whole-file read-modify-write. Nothing drains it yet; a flush path is a
/// deliberate gap in the current deployment.
pub struct PendingStore {
    path: PathBuf,
}

impl PendingStore {
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(format!("{}.json", PENDING_KEY)),
        })
    }

    pub fn load(&self) -> Result<Vec<Reading>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Append one reading; returns the queue length after the write.
    pub fn append(&self, reading: Reading) -> Result<usize, StoreError> {
        let mut pending = self.load()?;
        pending.push(reading);
        fs::write(&self.path, serde_json::to_string(&pending)?)?;
        info!("reading queued offline, {} pending", pending.len());
        Ok(pending.len())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }
}
