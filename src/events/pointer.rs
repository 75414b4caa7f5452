use crate::constants::{CARD_SELECTOR, SHINE_CLASS};
use crate::core::tilt::{
    highlight_css, transform_css, NEUTRAL_TRANSFORM_CSS, RETURN_TRANSITION_CSS,
    RETURN_TRANSITION_MS,
};
use crate::core::{FrameControl, FrameOwner, TiltState, TiltStep};
use crate::dom;
use crate::frame::FrameDriver;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
struct CardWiring {
    index: usize,
    card: web::HtmlElement,
    shine: web::HtmlElement,
    state: Rc<RefCell<TiltState>>,
    driver: FrameDriver,
}

/// Attaches a tilt controller to every card in the document. Returns how
/// many cards were wired.
pub fn wire_card_tilt(document: &web::Document, driver: &FrameDriver) -> usize {
    let cards = dom::query_all_html(document, CARD_SELECTOR);
    for (index, card) in cards.iter().enumerate() {
        let Some(shine) = create_shine(document, card) else {
            log::warn!("[tilt] could not create highlight for card {}", index);
            continue;
        };
        let w = CardWiring {
            index,
            card: card.clone(),
            shine,
            state: Rc::new(RefCell::new(TiltState::new())),
            driver: driver.clone(),
        };
        wire_pointermove(&w);
        wire_pointerleave(&w);
    }
    cards.len()
}

fn create_shine(document: &web::Document, card: &web::HtmlElement) -> Option<web::HtmlElement> {
    let shine = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    _ = shine.class_list().add_1(SHINE_CLASS);
    dom::set_style(card, "position", "relative");
    card.append_child(&shine).ok()?;
    Some(shine)
}

#[inline]
fn pointer_local(ev: &web::PointerEvent, card: &web::HtmlElement) -> (Vec2, Vec2) {
    let rect = card.get_bounding_client_rect();
    let local = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    let size = Vec2::new(rect.width() as f32, rect.height() as f32);
    (local, size)
}

fn wire_pointermove(w: &CardWiring) {
    let w = w.clone();
    let card = w.card.clone();
    dom::add_listener(&card, "pointermove", move |ev: web::PointerEvent| {
        let (local, size) = pointer_local(&ev, &w.card);
        let effect = w
            .state
            .borrow_mut()
            .pointer_move(local, size, Instant::now());

        if effect.reclaim_transform {
            dom::set_style(&w.card, "transition", "none");
        }
        if effect.start_loop {
            start_tilt_loop(&w);
        }
        dom::set_style(&w.shine, "background", &highlight_css(local));
    });
}

fn start_tilt_loop(w: &CardWiring) {
    let state = w.state.clone();
    let card = w.card.clone();
    w.driver
        .ensure(FrameOwner::Card(w.index), move |_now| {
            match state.borrow_mut().step() {
                TiltStep::Render(angle) => {
                    dom::set_style(&card, "transform", &transform_css(angle));
                    FrameControl::Continue
                }
                TiltStep::Hold => FrameControl::Continue,
                TiltStep::Stop => FrameControl::Stop,
            }
        });
}

fn wire_pointerleave(w: &CardWiring) {
    let w = w.clone();
    let card = w.card.clone();
    dom::add_listener(&card, "pointerleave", move |_ev: web::PointerEvent| {
        let token = w.state.borrow_mut().pointer_leave(Instant::now());

        dom::set_style(&w.card, "transition", RETURN_TRANSITION_CSS);
        dom::set_style(&w.card, "transform", NEUTRAL_TRANSFORM_CSS);
        dom::set_style(&w.shine, "background", "none");

        let state = w.state.clone();
        dom::set_timeout(RETURN_TRANSITION_MS as i32, move || {
            state.borrow_mut().release(token);
        });
    });
}
