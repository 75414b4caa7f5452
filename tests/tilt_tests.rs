// Host-side tests for the card tilt controller.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tilt {
    include!("../src/core/tilt.rs");
}

use glam::Vec2;
use instant::Instant;
use std::time::Duration;
use tilt::*;

const CARD: Vec2 = Vec2::new(300.0, 200.0);

#[test]
fn normalized_offset_stays_inside_edge_buffer() {
    // Sweep well past the element bounds on both axes
    for xi in -10..=40 {
        for yi in -10..=30 {
            let local = Vec2::new(xi as f32 * 10.0, yi as f32 * 10.0);
            let n = normalized_offset(local, CARD);
            assert!(
                n.x.abs() <= EDGE_BUFFER && n.y.abs() <= EDGE_BUFFER,
                "offset {n:?} escaped buffer at {local:?}"
            );
        }
    }
}

#[test]
fn normalized_offset_centre_and_corners() {
    assert_eq!(normalized_offset(CARD * 0.5, CARD), Vec2::ZERO);
    assert_eq!(
        normalized_offset(Vec2::ZERO, CARD),
        Vec2::splat(-EDGE_BUFFER)
    );
    assert_eq!(normalized_offset(CARD, CARD), Vec2::splat(EDGE_BUFFER));
    let half_way = normalized_offset(Vec2::new(225.0, 100.0), CARD);
    assert!((half_way.x - 0.5).abs() < 1e-6);
    assert_eq!(half_way.y, 0.0);
}

#[test]
fn zero_sized_element_gives_neutral_target() {
    assert_eq!(tilt_target(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
    assert_eq!(
        tilt_target(Vec2::new(f32::NAN, 1.0), CARD),
        Vec2::ZERO
    );
}

#[test]
fn target_inverts_vertical_axis() {
    // Pointer in the top-right corner
    let t = tilt_target(Vec2::new(CARD.x, 0.0), CARD);
    assert!((t.x - EDGE_BUFFER * MAX_TILT_DEG).abs() < 1e-5);
    assert!((t.y - EDGE_BUFFER * MAX_TILT_DEG).abs() < 1e-5);
    // Bottom-left tips the other way
    let t = tilt_target(Vec2::new(0.0, CARD.y), CARD);
    assert!(t.x < 0.0 && t.y < 0.0);
}

#[test]
fn easing_is_monotonic_and_settles() {
    let limit = EDGE_BUFFER * MAX_TILT_DEG;
    let samples = [-limit, -3.3, -0.5, 0.0, 0.02, 1.7, limit];
    for &cx in &samples {
        for &tx in &samples {
            for &ty in &samples {
                let target = Vec2::new(tx, ty);
                let mut current = Vec2::new(cx, -cx);
                let mut prev = (current - target).length();
                let mut steps = 0;
                while current != target {
                    current = ease_toward(current, target);
                    let d = (current - target).length();
                    assert!(d < prev, "distance did not shrink: {prev} -> {d}");
                    prev = d;
                    steps += 1;
                    assert!(steps <= 100, "did not settle from {cx} to {target:?}");
                }
            }
        }
    }
}

#[test]
fn easing_moves_eight_percent_per_frame() {
    let next = ease_toward(Vec2::ZERO, Vec2::new(5.0, -5.0));
    assert!((next.x - 0.4).abs() < 1e-6);
    assert!((next.y + 0.4).abs() < 1e-6);
}

#[test]
fn first_move_starts_loop_once() {
    let now = Instant::now();
    let mut s = TiltState::new();
    assert!(!s.is_animating());

    let first = s.pointer_move(Vec2::new(280.0, 20.0), CARD, now);
    assert!(first.start_loop);
    assert!(!first.reclaim_transform);
    assert!(s.is_animating());

    let second = s.pointer_move(Vec2::new(200.0, 50.0), CARD, now);
    assert!(!second.start_loop);
}

#[test]
fn loop_keeps_rendering_after_settling() {
    let mut s = TiltState::new();
    s.pointer_move(CARD * 0.5, CARD, Instant::now());
    // Target is neutral, so the first step already snaps
    for _ in 0..5 {
        assert_eq!(s.step(), TiltStep::Render(Vec2::ZERO));
    }
}

#[test]
fn leave_hands_motion_to_transition_then_stops() {
    let now = Instant::now();
    let mut s = TiltState::new();
    s.pointer_move(Vec2::new(300.0, 0.0), CARD, now);
    for _ in 0..10 {
        s.step();
    }
    let token = s.pointer_leave(now);
    assert_eq!(s.target(), Vec2::ZERO);
    assert_eq!(s.step(), TiltStep::Hold);
    assert!(s.is_animating());

    assert!(s.release(token));
    assert!(!s.is_animating());
    assert_eq!(s.current(), Vec2::ZERO);
    assert_eq!(s.step(), TiltStep::Stop);
}

#[test]
fn stale_release_does_not_stop_reentered_card() {
    let t0 = Instant::now();
    let mut s = TiltState::new();
    s.pointer_move(Vec2::new(300.0, 0.0), CARD, t0);
    for _ in 0..30 {
        s.step();
    }
    let token = s.pointer_leave(t0);

    // Re-enter before the 600ms return finishes
    let back = s.pointer_move(Vec2::new(0.0, 200.0), CARD, t0 + Duration::from_millis(200));
    assert!(!back.start_loop, "loop is still scheduled");
    assert!(back.reclaim_transform);

    assert!(!s.release(token));
    assert!(s.is_animating());
    assert!(matches!(s.step(), TiltStep::Render(_)));
}

#[test]
fn reentry_resumes_from_estimated_transition_angle() {
    let t0 = Instant::now();
    let mut s = TiltState::new();
    s.pointer_move(Vec2::new(300.0, 0.0), CARD, t0);
    for _ in 0..200 {
        s.step();
    }
    let from = s.current();
    s.pointer_leave(t0);
    s.pointer_move(CARD * 0.5, CARD, t0 + Duration::from_millis(150));
    let resumed = s.current();
    assert!(resumed.x > 0.0 && resumed.x < from.x);
    assert!(resumed.y > 0.0 && resumed.y < from.y);
}

#[test]
fn returning_angle_reaches_neutral() {
    let from = Vec2::new(6.0, -4.0);
    assert_eq!(returning_angle(from, Duration::ZERO), from);
    assert_eq!(returning_angle(from, return_transition()), Vec2::ZERO);
    assert_eq!(
        returning_angle(from, return_transition() * 2),
        Vec2::ZERO
    );
}

#[test]
fn move_after_full_release_restarts_loop() {
    let now = Instant::now();
    let mut s = TiltState::new();
    s.pointer_move(Vec2::new(10.0, 10.0), CARD, now);
    let token = s.pointer_leave(now);
    assert!(s.release(token));

    let again = s.pointer_move(Vec2::new(10.0, 10.0), CARD, now);
    assert!(again.start_loop);
    assert!(again.reclaim_transform);
    assert_eq!(s.current(), Vec2::ZERO);
}

#[test]
fn css_strings() {
    assert_eq!(
        transform_css(Vec2::new(2.5, -1.0)),
        "perspective(800px) rotateX(-1deg) rotateY(2.5deg) scale3d(1.02, 1.02, 1.02)"
    );
    assert_eq!(
        highlight_css(Vec2::new(12.0, 40.5)),
        "radial-gradient(circle at 12px 40.5px, rgba(255,255,255,0.12) 0%, transparent 60%)"
    );
}
