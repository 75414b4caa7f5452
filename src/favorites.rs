use crate::api::MusicClient;
use crate::constants::{FAV_ART_SELECTOR, FAV_ITEM_SELECTOR, TRACK_ID_ATTR};
use crate::core::wire::{favorite_art, join_track_ids, match_art};
use crate::dom;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Looks up album art for every `.fav-item` in one batch request. Failures
/// are logged and otherwise ignored.
pub fn load_favorite_art(document: web::Document, client: Rc<MusicClient>) {
    let items: Vec<(String, web::HtmlElement)> =
        dom::query_all_html(&document, FAV_ITEM_SELECTOR)
            .into_iter()
            .filter_map(|el| Some((el.get_attribute(TRACK_ID_ATTR)?, el)))
            .collect();
    let Some(joined) = join_track_ids(items.iter().map(|(id, _)| id.as_str())) else {
        return;
    };

    spawn_local(async move {
        let resp = match client.fetch_tracks(&joined).await {
            Ok(r) => r,
            Err(e) => {
                log::debug!("[favorites] lookup failed: {}", e);
                return;
            }
        };
        let arts = favorite_art(&resp);
        log::debug!(
            "[favorites] art for {} of {} tracks",
            arts.len(),
            resp.tracks.len()
        );
        for (item, url) in match_art(&items, &arts) {
            if let Some(el) = dom::query_child_html(item, FAV_ART_SELECTOR) {
                dom::set_style(&el, "background-image", &format!("url({url})"));
            }
        }
    });
}
