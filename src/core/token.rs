use instant::Instant;
use serde::Deserialize;
use std::time::Duration;

// Refresh a little early so a token never expires mid-request.
pub const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
// Upper bound on how long a token is trusted, whatever `expires_in` says.
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Clone, Debug, Default)]
pub struct TokenCache {
    token: Option<(String, Instant)>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid(&self, now: Instant) -> Option<&str> {
        match &self.token {
            Some((token, expires_at)) if now < *expires_at => Some(token.as_str()),
            _ => None,
        }
    }

    pub fn store(&mut self, resp: TokenResponse, now: Instant) -> String {
        let ttl = Duration::from_secs(resp.expires_in)
            .saturating_sub(TOKEN_EXPIRY_MARGIN)
            .min(MAX_TOKEN_TTL);
        self.token = now
            .checked_add(ttl)
            .map(|expires_at| (resp.access_token.clone(), expires_at));
        resp.access_token
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

/// Form body for the refresh-token grant. `encode` percent-encodes a value.
pub fn refresh_grant_body(refresh_token: &str, encode: impl Fn(&str) -> String) -> String {
    format!(
        "grant_type=refresh_token&refresh_token={}",
        encode(refresh_token)
    )
}
