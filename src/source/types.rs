//! Type definitions for the data source module.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shown to the user with every load failure.
pub const REMEDIATION: &str = "Make sure the data generation step has been run.";

/// Why a dataset could not be loaded. None of these alter the loaded dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to data endpoint failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("request to data endpoint timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),
    #[error("data endpoint returned HTTP {status}: {detail}")]
    Status { status: StatusCode, detail: String },
    #[error("data endpoint returned a malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }

    /// Blocking notification text for the user.
    pub fn user_message(&self) -> String {
        format!("Error loading data ({}). {}", self, REMEDIATION)
    }
}

/// Error payload served by the data server on failure.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
