use crate::api::MusicClient;
use crate::constants::{
    PROGRESS_FILL_SELECTOR, TIME_CURRENT_SELECTOR, TIME_TOTAL_SELECTOR, TRACK_ARTIST_SELECTOR,
    TRACK_ART_SELECTOR, TRACK_NAME_SELECTOR,
};
use crate::core::{
    ArtUpdate, FrameControl, FrameOwner, LoopCommand, PlaybackClock, PlaybackView, ProgressFrame,
    Tick,
};
use crate::dom;
use crate::frame::FrameDriver;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Display targets for the widget. Missing slots are skipped.
pub struct NowPlayingSlots {
    title: Option<web::HtmlElement>,
    artist: Option<web::HtmlElement>,
    art: Option<web::HtmlElement>,
    progress_fill: Option<web::HtmlElement>,
    time_current: Option<web::HtmlElement>,
    time_total: Option<web::HtmlElement>,
}

impl NowPlayingSlots {
    pub fn query(document: &web::Document) -> Self {
        Self {
            title: dom::query_html(document, TRACK_NAME_SELECTOR),
            artist: dom::query_html(document, TRACK_ARTIST_SELECTOR),
            art: dom::query_html(document, TRACK_ART_SELECTOR),
            progress_fill: dom::query_html(document, PROGRESS_FILL_SELECTOR),
            time_current: dom::query_html(document, TIME_CURRENT_SELECTOR),
            time_total: dom::query_html(document, TIME_TOTAL_SELECTOR),
        }
    }

    pub fn is_present(&self) -> bool {
        self.title.is_some() || self.progress_fill.is_some()
    }

    pub fn render_view(&self, view: &PlaybackView) {
        if let Some(el) = &self.title {
            dom::set_text(el, &view.title);
        }
        if let Some(el) = &self.artist {
            dom::set_text(el, &view.artist);
        }
        if let Some(el) = &self.art {
            match &view.art {
                ArtUpdate::Keep => {}
                ArtUpdate::Clear => dom::set_style(el, "background-image", ""),
                ArtUpdate::Set(url) => {
                    dom::set_style(el, "background-image", &format!("url({url})"));
                    dom::set_style(el, "background-size", "cover");
                    dom::set_style(el, "background-position", "center");
                }
            }
        }
        if let Some(frame) = &view.progress {
            if let Some(el) = &self.progress_fill {
                dom::set_style(el, "width", &frame.width_css());
            }
            if let Some(el) = &self.time_current {
                dom::set_text(el, &frame.current_label);
            }
        }
        if let (Some(el), Some(total)) = (&self.time_total, &view.total_label) {
            dom::set_text(el, total);
        }
    }

    /// Extrapolated frame. Transitions are switched off so the bar is not
    /// smoothed twice.
    pub fn render_progress(&self, frame: &ProgressFrame) {
        if let Some(el) = &self.progress_fill {
            dom::set_style(el, "transition", "none");
            dom::set_style(el, "width", &frame.width_css());
        }
        if let Some(el) = &self.time_current {
            dom::set_text(el, &frame.current_label);
        }
    }
}

#[derive(Clone)]
pub struct PlaybackWiring {
    pub clock: Rc<RefCell<PlaybackClock>>,
    pub slots: Rc<NowPlayingSlots>,
    pub client: Rc<MusicClient>,
    pub driver: FrameDriver,
}

/// One poll right away, then one every `interval_ms` regardless of whether
/// the previous fetch finished.
pub fn start_polling(w: PlaybackWiring, interval_ms: u32) {
    spawn_poll(&w);
    let delay = i32::try_from(interval_ms).unwrap_or(i32::MAX);
    let timer = dom::set_interval(delay, move || spawn_poll(&w));
    if timer.is_none() {
        log::error!("[now-playing] could not start poll timer");
    }
}

fn spawn_poll(w: &PlaybackWiring) {
    let w = w.clone();
    spawn_local(async move { poll_once(&w).await });
}

async fn poll_once(w: &PlaybackWiring) {
    let outcome = w.client.fetch_now_playing().await;
    match &outcome {
        Ok(Some(np)) => log::debug!(
            "[now-playing] {} - {} playing={}",
            np.artist,
            np.title,
            np.is_playing
        ),
        Ok(None) => log::debug!("[now-playing] nothing playing"),
        Err(e) => log::warn!("[now-playing] {}", e),
    }
    let effect = w.clock.borrow_mut().apply_poll(outcome, Instant::now());
    w.slots.render_view(&effect.view);
    match effect.command {
        LoopCommand::Ensure => ensure_extrapolation(w),
        LoopCommand::Cancel => w.driver.cancel(FrameOwner::Playback),
        LoopCommand::None => {}
    }
}

fn ensure_extrapolation(w: &PlaybackWiring) {
    let clock = w.clock.clone();
    let slots = w.slots.clone();
    w.driver.ensure(FrameOwner::Playback, move |now| {
        match clock.borrow_mut().tick(now) {
            Tick::Render(frame) => {
                slots.render_progress(&frame);
                FrameControl::Continue
            }
            Tick::Finished(frame) => {
                slots.render_progress(&frame);
                FrameControl::Stop
            }
            Tick::Stop => FrameControl::Stop,
        }
    });
}
