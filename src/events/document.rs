use crate::dom;
use web_sys as web;

// Cards and art are images the browser would otherwise let users drag out or
// open a context menu on.
const SUPPRESSED_EVENTS: [&str; 2] = ["dragstart", "contextmenu"];

pub fn wire_default_guards(document: &web::Document) {
    for event in SUPPRESSED_EVENTS {
        dom::add_listener(document, event, |ev: web::Event| ev.prevent_default());
    }
}
