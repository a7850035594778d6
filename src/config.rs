use std::env;
use std::path::PathBuf;

use crate::reading::GroupBucket;

/// Runtime settings, environment-driven with safe local defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the server's sync endpoint.
    pub sync_url: String,
    /// Fixed participant identifier attached to every reading.
    pub pango_id: String,
    /// Directory holding the pending queue and the asset cache.
    pub data_dir: PathBuf,
    /// Group-id bucketing policy.
    pub bucket: GroupBucket,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            sync_url: get("VHF_SYNC_URL")
                .unwrap_or_else(|| "http://localhost:5000/sync".to_string()),
            pango_id: get("VHF_PANGO_ID").unwrap_or_else(|| "P01".to_string()),
            data_dir: get("VHF_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            bucket: get("VHF_GROUP_BUCKET")
                .and_then(|v| v.parse().ok())
                .unwrap_or(GroupBucket::SessionStart),
        }
    }

    /// Server origin, for resolving same-origin asset paths.
    pub fn origin(&self) -> String {
        self.sync_url.trim_end_matches('/').trim_end_matches("/sync").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.sync_url, "http://localhost:5000/sync");
        assert_eq!(config.pango_id, "P01");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.bucket, GroupBucket::SessionStart);
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_lookup(|key| match key {
            "VHF_SYNC_URL" => Some("https://tracker.example/sync".to_string()),
            "VHF_PANGO_ID" => Some("P07".to_string()),
            "VHF_GROUP_BUCKET" => Some("minute".to_string()),
            _ => None,
        });
        assert_eq!(config.sync_url, "https://tracker.example/sync");
        assert_eq!(config.pango_id, "P07");
        assert_eq!(config.bucket, GroupBucket::Minute);
    }

    #[test]
    fn test_unknown_bucket_falls_back_to_session() {
        let config = Config::from_lookup(|key| match key {
            "VHF_GROUP_BUCKET" => Some("fortnight".to_string()),
            _ => None,
        });
        assert_eq!(config.bucket, GroupBucket::SessionStart);
    }

    #[test]
    fn test_origin_strips_sync_path() {
        let config = Config::from_lookup(|key| match key {
            "VHF_SYNC_URL" => Some("https://tracker.example/sync".to_string()),
            _ => None,
        });
        assert_eq!(config.origin(), "https://tracker.example");
    }
}
