use std::fmt;

use serde::Deserialize;
use tracing::info;

use crate::reading::Reading;

#[derive(Debug)]
pub enum SyncError {
    Transport(reqwest::Error),
    Status(u16),
    MalformedResponse(String),
}

impl std::error::Error for SyncError {}
impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyncError::Transport(e) => write!(f, "transport error: {}", e),
            SyncError::Status(code) => write!(f, "server rejected sync: HTTP {}", code),
            SyncError::MalformedResponse(reason) => {
                write!(f, "malformed sync response: {}", reason)
            }
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Transport(e)
    }
}

#[derive(Debug, Deserialize)]
struct SyncResponse {
    messages: Vec<String>,
}

/// Submission seam between the session controller and the network. The
/// session only sees this trait; tests substitute canned outcomes.
pub trait Submit {
    /// Submit one reading; `Ok` carries the server's first status message.
    fn submit(&self, reading: &Reading) -> Result<String, SyncError>;
}

/// Posts readings to the remote `/sync` endpoint.
pub struct SyncClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl SyncClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Submit for SyncClient {
    fn submit(&self, reading: &Reading) -> Result<String, SyncError> {
        info!("posting reading {} to {}", reading.group_id, self.endpoint);
        // The server ingests a list even for a single reading.
        let response = self.client.post(&self.endpoint).json(&[reading]).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        let body: SyncResponse = response
            .json()
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))?;
        body.messages
            .into_iter()
            .next()
            .ok_or_else(|| SyncError::MalformedResponse("empty messages array".to_string()))
    }
}
