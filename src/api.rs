use crate::constants::{NOW_PLAYING_URL, TOKEN_URL, TRACKS_URL};
use crate::core::token::refresh_grant_body;
use crate::core::wire::{self, NowPlaying, TracksResponse};
use crate::core::{FetchError, SourceConfig, TokenCache, TokenResponse};
use instant::Instant;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

/// Fetch collaborator for now-playing data. Either talks to a proxy that owns
/// authentication or to the music service directly with a cached token.
pub struct MusicClient {
    source: SourceConfig,
    tokens: RefCell<TokenCache>,
}

fn js_err(e: JsValue) -> FetchError {
    FetchError::Network(format!("{e:?}"))
}

impl MusicClient {
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            tokens: RefCell::new(TokenCache::new()),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self.source {
            SourceConfig::Proxy { .. } => "proxy",
            SourceConfig::Direct { .. } => "direct",
        }
    }

    /// `Ok(None)` when nothing is playing.
    pub async fn fetch_now_playing(&self) -> Result<Option<NowPlaying>, FetchError> {
        let url = match &self.source {
            SourceConfig::Proxy {
                now_playing_url, ..
            } => now_playing_url.clone(),
            SourceConfig::Direct { .. } => NOW_PLAYING_URL.to_string(),
        };
        let resp = self.get(&url).await?;
        let status = resp.status();
        if wire::is_nothing_playing_status(status) {
            return Ok(None);
        }
        let text = text(resp).await?;
        wire::parse_now_playing(status, &text)
    }

    pub async fn fetch_tracks(&self, ids: &str) -> Result<TracksResponse, FetchError> {
        let base = match &self.source {
            SourceConfig::Proxy { tracks_url, .. } => tracks_url.as_str(),
            SourceConfig::Direct { .. } => TRACKS_URL,
        };
        let url = format!("{base}?ids={}", js_sys::encode_uri_component(ids));
        let resp = self.get(&url).await?;
        if !resp.ok() {
            return Err(FetchError::Network(format!("HTTP {}", resp.status())));
        }
        let text = text(resp).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let headers = Headers::new().map_err(js_err)?;
        if let Some(token) = self.access_token().await? {
            headers
                .set("Authorization", &format!("Bearer {token}"))
                .map_err(js_err)?;
        }
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_headers(&headers.into());
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
        do_fetch(request).await
    }

    /// Proxy mode never carries a token.
    async fn access_token(&self) -> Result<Option<String>, FetchError> {
        let SourceConfig::Direct {
            client_id,
            client_secret,
            refresh_token,
        } = &self.source
        else {
            return Ok(None);
        };
        if let Some(token) = self.tokens.borrow().valid(Instant::now()) {
            return Ok(Some(token.to_string()));
        }

        let window = web_sys::window().ok_or_else(|| FetchError::Auth("no window".into()))?;
        let basic = window
            .btoa(&format!("{client_id}:{client_secret}"))
            .map_err(|e| FetchError::Auth(format!("{e:?}")))?;
        let headers = Headers::new().map_err(js_err)?;
        headers
            .set("Content-Type", "application/x-www-form-urlencoded")
            .map_err(js_err)?;
        headers
            .set("Authorization", &format!("Basic {basic}"))
            .map_err(js_err)?;

        let body = refresh_grant_body(refresh_token, |v| {
            js_sys::encode_uri_component(v).into()
        });
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_headers(&headers.into());
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(TOKEN_URL, &opts).map_err(js_err)?;
        let resp = do_fetch(request).await?;
        if !resp.ok() {
            return Err(FetchError::Auth(format!("HTTP {}", resp.status())));
        }
        let parsed: TokenResponse = serde_json::from_str(&text(resp).await?)?;
        log::debug!("[api] refreshed access token, expires in {}s", parsed.expires_in);
        let token = self.tokens.borrow_mut().store(parsed, Instant::now());
        Ok(Some(token))
    }
}

async fn do_fetch(request: Request) -> Result<Response, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;
    let resp_val = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    resp_val
        .dyn_into::<Response>()
        .map_err(|_| FetchError::Network("not a Response".into()))
}

async fn text(resp: Response) -> Result<String, FetchError> {
    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| FetchError::Network("body is not a string".into()))
}
