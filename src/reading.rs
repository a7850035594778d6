use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One locked bearing observation, the unit the server ingests.
///
/// Built fresh from the trackers' latest cached values at submission time and
/// not retained after a successful sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub group_id: String,
    pub pango_id: String,
    pub lat: f64,
    pub lon: f64,
    pub bearing: f64, // degrees clockwise from north
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>, // ISO-8601
}

/// Coarse time bucketing for the group id, used server-side to cluster
/// readings from one sweep. All three deployed variants are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupBucket {
    /// One group per wall-clock minute.
    Minute,
    /// One group per wall-clock hour.
    Hour,
    /// One group for the whole session, stamped at session start.
    SessionStart,
}

impl GroupBucket {
    /// Group id for a reading taken at `now` in a session opened at
    /// `session_start`. The server accepts `SESSION_` followed by digits,
    /// dashes, `T` and colons only.
    pub fn group_id(&self, session_start: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let stamp = match self {
            GroupBucket::Minute => now.format("%Y-%m-%dT%H:%M").to_string(),
            GroupBucket::Hour => now.format("%Y-%m-%dT%H").to_string(),
            GroupBucket::SessionStart => session_start.format("%Y-%m-%dT%H:%M:%S").to_string(),
        };
        format!("SESSION_{}", stamp)
    }
}

#[derive(Debug, PartialEq)]
pub struct UnknownBucket(String);

impl std::error::Error for UnknownBucket {}
impl fmt::Display for UnknownBucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown group bucket: {}", self.0)
    }
}

impl FromStr for GroupBucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(GroupBucket::Minute),
            "hour" => Ok(GroupBucket::Hour),
            "session" => Ok(GroupBucket::SessionStart),
            other => Err(UnknownBucket(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, h, m, s).unwrap()
    }

    #[test]
    fn test_minute_bucket_truncates_seconds() {
        let id = GroupBucket::Minute.group_id(at(9, 0, 0), at(14, 32, 59));
        assert_eq!(id, "SESSION_2024-03-07T14:32");
    }

    #[test]
    fn test_hour_bucket_groups_whole_hour() {
        let a = GroupBucket::Hour.group_id(at(9, 0, 0), at(14, 5, 0));
        let b = GroupBucket::Hour.group_id(at(9, 0, 0), at(14, 55, 0));
        assert_eq!(a, b);
        assert_eq!(a, "SESSION_2024-03-07T14");
    }

    #[test]
    fn test_session_bucket_ignores_now() {
        let id = GroupBucket::SessionStart.group_id(at(9, 15, 30), at(14, 32, 59));
        assert_eq!(id, "SESSION_2024-03-07T09:15:30");
    }

    #[test]
    fn test_group_id_uses_server_safe_charset() {
        let id = GroupBucket::SessionStart.group_id(at(9, 15, 30), at(9, 15, 30));
        let stamp = id.strip_prefix("SESSION_").unwrap();
        assert!(
            stamp
                .chars()
                .all(|c| c.is_ascii_digit() || c == '-' || c == 'T' || c == ':')
        );
    }

    #[test]
    fn test_reading_omits_missing_time() {
        let reading = Reading {
            group_id: "SESSION_2024-03-07T09:15:30".to_string(),
            pango_id: "P01".to_string(),
            lat: 27.7,
            lon: 85.3,
            bearing: 270.0,
            time: None,
        };
        let json = serde_json::to_string(&reading).unwrap();
        assert!(!json.contains("time"));
    }

    #[test]
    fn test_bucket_parsing() {
        assert_eq!("minute".parse(), Ok(GroupBucket::Minute));
        assert_eq!("hour".parse(), Ok(GroupBucket::Hour));
        assert_eq!("session".parse(), Ok(GroupBucket::SessionStart));
        assert!("daily".parse::<GroupBucket>().is_err());
    }
}
