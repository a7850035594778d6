use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Cache generation; bumping it starts a fresh cache directory.
pub const CACHE_NAME: &str = "vhf-tri-v2";

/// Assets pre-populated at install time, same-origin paths plus the
/// externally hosted map library files.
pub const ASSETS: [&str; 5] = [
    "/",
    "/static/app.js",
    "/manifest.json",
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css",
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
];

#[derive(Debug)]
pub enum CacheError {
    Io(std::io::Error),
    Transport(reqwest::Error),
    Status(u16),
}

impl std::error::Error for CacheError {}
impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CacheError::Io(e) => write!(f, "asset cache I/O error: {}", e),
            CacheError::Transport(e) => write!(f, "asset fetch failed: {}", e),
            CacheError::Status(code) => write!(f, "asset fetch rejected: HTTP {}", code),
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e)
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(e: reqwest::Error) -> Self {
        CacheError::Transport(e)
    }
}

/// Offline asset cache: a directory named after the cache generation.
///
/// `install` pre-populates the fixed asset list; `fetch` serves the cached
/// copy when one exists and otherwise passes straight through to the
/// network without storing the body, mirroring the install-then-match
/// lifecycle of the original worker.
pub struct AssetCache {
    dir: PathBuf,
    client: reqwest::blocking::Client,
}

impl AssetCache {
    pub fn open(cache_root: &Path) -> Result<Self, CacheError> {
        let dir = cache_root.join(CACHE_NAME);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            client: reqwest::blocking::Client::new(),
        })
    }

    /// Download every listed asset into the cache. Same-origin paths are
    /// resolved against `origin`. Returns the number of entries written.
    pub fn install(&self, origin: &str) -> Result<usize, CacheError> {
        for asset in ASSETS {
            let body = self.download(&resolve(origin, asset))?;
            fs::write(self.entry_path(asset), body)?;
        }
        info!("asset cache {} installed, {} entries", CACHE_NAME, ASSETS.len());
        Ok(ASSETS.len())
    }

    /// Cached copy if present, network otherwise.
    pub fn fetch(&self, origin: &str, asset: &str) -> Result<Vec<u8>, CacheError> {
        let path = self.entry_path(asset);
        if path.exists() {
            return Ok(fs::read(path)?);
        }
        warn!("cache miss for {}, falling through to network", asset);
        self.download(&resolve(origin, asset))
    }

    pub fn is_cached(&self, asset: &str) -> bool {
        self.entry_path(asset).exists()
    }

    fn entry_path(&self, asset: &str) -> PathBuf {
        self.dir.join(entry_name(asset))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, CacheError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Status(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

fn resolve(origin: &str, asset: &str) -> String {
    if asset.starts_with("http://") || asset.starts_with("https://") {
        asset.to_string()
    } else {
        format!("{}{}", origin.trim_end_matches('/'), asset)
    }
}

/// Flatten an asset URL into a single safe file name.
fn entry_name(asset: &str) -> String {
    let name: String = asset
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect();
    if name.chars().all(|c| c == '_') {
        "root".to_string()
    } else {
        name
    }
}
