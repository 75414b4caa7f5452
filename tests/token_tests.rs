// Host-side tests for the access-token cache used in direct mode.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod token {
    include!("../src/core/token.rs");
}

use instant::Instant;
use std::time::Duration;
use token::*;

fn response(token: &str, expires_in: u64) -> TokenResponse {
    TokenResponse {
        access_token: token.to_string(),
        expires_in,
    }
}

#[test]
fn empty_cache_has_no_token() {
    assert_eq!(TokenCache::new().valid(Instant::now()), None);
}

#[test]
fn token_is_refreshed_a_minute_early() {
    let t0 = Instant::now();
    let mut cache = TokenCache::new();
    assert_eq!(cache.store(response("abc", 3600), t0), "abc");

    assert_eq!(cache.valid(t0), Some("abc"));
    assert_eq!(cache.valid(t0 + Duration::from_secs(3539)), Some("abc"));
    assert_eq!(cache.valid(t0 + Duration::from_secs(3540)), None);
}

#[test]
fn short_lived_token_is_never_cached() {
    let t0 = Instant::now();
    let mut cache = TokenCache::new();
    cache.store(response("tiny", 30), t0);
    assert_eq!(cache.valid(t0), None);
}

#[test]
fn huge_expiry_is_capped() {
    let t0 = Instant::now();
    let mut cache = TokenCache::new();
    assert_eq!(cache.store(response("forever", u64::MAX), t0), "forever");
    assert_eq!(cache.valid(t0), Some("forever"));
    assert_eq!(cache.valid(t0 + MAX_TOKEN_TTL), None);
}

#[test]
fn store_replaces_and_clear_drops() {
    let t0 = Instant::now();
    let mut cache = TokenCache::new();
    cache.store(response("one", 3600), t0);
    cache.store(response("two", 3600), t0);
    assert_eq!(cache.valid(t0), Some("two"));
    cache.clear();
    assert_eq!(cache.valid(t0), None);
}

#[test]
fn token_response_parses_without_expiry() {
    let r: TokenResponse = serde_json::from_str(r#"{"access_token":"x","token_type":"Bearer"}"#)
        .unwrap();
    assert_eq!(r.access_token, "x");
    assert_eq!(r.expires_in, 0);
}

#[test]
fn refresh_body_encodes_token() {
    let body = refresh_grant_body("a b/c", |v| v.replace(' ', "%20").replace('/', "%2F"));
    assert_eq!(body, "grant_type=refresh_token&refresh_token=a%20b%2Fc");
}
