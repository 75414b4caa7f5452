use super::error::ConfigError;
use serde::Deserialize;

pub const DEFAULT_NOW_PLAYING_URL: &str = "/api/now-playing";
pub const DEFAULT_TRACKS_URL: &str = "/api/tracks";
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 5_000;
pub const MIN_POLL_INTERVAL_MS: u32 = 250;
// Browser timers take an i32 delay.
pub const MAX_POLL_INTERVAL_MS: u32 = i32::MAX as u32;

/// Where now-playing data comes from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SourceConfig {
    /// An intermediary endpoint that handles authentication itself.
    Proxy {
        #[serde(default = "default_now_playing_url")]
        now_playing_url: String,
        #[serde(default = "default_tracks_url")]
        tracks_url: String,
    },
    /// The music service's Web API with a refresh-token grant.
    Direct {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
}

fn default_now_playing_url() -> String {
    DEFAULT_NOW_PLAYING_URL.to_string()
}

fn default_tracks_url() -> String {
    DEFAULT_TRACKS_URL.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Proxy {
            now_playing_url: default_now_playing_url(),
            tracks_url: default_tracks_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub poll_interval_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS}, got {}",
                self.poll_interval_ms
            )));
        }
        if self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "poll_interval_ms must be at most {MAX_POLL_INTERVAL_MS}, got {}",
                self.poll_interval_ms
            )));
        }
        if let SourceConfig::Direct {
            client_id,
            client_secret,
            refresh_token,
        } = &self.source
        {
            if client_id.is_empty() || client_secret.is_empty() || refresh_token.is_empty() {
                return Err(ConfigError::Invalid(
                    "direct mode needs client_id, client_secret and refresh_token".into(),
                ));
            }
        }
        Ok(())
    }
}
