use thiserror::Error;

/// Transient failure talking to the now-playing collaborator.
///
/// Displayed as "Connection error" and recovered by the next scheduled poll.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("token exchange failed: {0}")]
    Auth(String),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A favorite track came back without a usable album image.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("track {id} has no album art")]
pub struct MissingArt {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
