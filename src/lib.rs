#![cfg(target_arch = "wasm32")]
use crate::core::{AppConfig, PlaybackClock};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod api;
mod constants;
mod core;
mod dom;
mod events;
mod favorites;
mod frame;
mod now_playing;

/// Reads the optional JSON config island, falling back to defaults.
fn load_config(document: &web::Document) -> AppConfig {
    let Some(text) = document
        .get_element_by_id(constants::CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return AppConfig::default();
    };
    match AppConfig::from_json(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            AppConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("now-playing-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = load_config(&document);
    let driver = frame::FrameDriver::new();

    events::wire_default_guards(&document);
    let cards = events::wire_card_tilt(&document, &driver);
    log::info!("[tilt] wired {} cards", cards);

    let client = Rc::new(api::MusicClient::new(config.source.clone()));
    log::info!(
        "[now-playing] polling via {} every {}ms",
        client.mode(),
        config.poll_interval_ms
    );

    let slots = now_playing::NowPlayingSlots::query(&document);
    if slots.is_present() {
        now_playing::start_polling(
            now_playing::PlaybackWiring {
                clock: Rc::new(RefCell::new(PlaybackClock::new())),
                slots: Rc::new(slots),
                client: client.clone(),
                driver: driver.clone(),
            },
            config.poll_interval_ms,
        );
    } else {
        log::info!("[now-playing] no display slots on this page");
    }

    favorites::load_favorite_art(document, client);
    Ok(())
}
