use glam::Vec2;
use instant::Instant;
use std::time::Duration;

// Card tilt tuning
pub const MAX_TILT_DEG: f32 = 8.0;
pub const EDGE_BUFFER: f32 = 0.85; // keeps corners from reaching full tilt
pub const LERP_FACTOR: f32 = 0.08; // fraction of remaining distance per frame
pub const SNAP_EPSILON_DEG: f32 = 0.01;
pub const HOVER_SCALE: f32 = 1.02;
pub const PERSPECTIVE_PX: u32 = 800;
pub const RETURN_TRANSITION_MS: u64 = 600;

pub const RETURN_TRANSITION_CSS: &str = "transform 0.6s cubic-bezier(0.22, 1, 0.36, 1)";
pub const NEUTRAL_TRANSFORM_CSS: &str =
    "perspective(800px) rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)";

#[inline]
pub fn return_transition() -> Duration {
    Duration::from_millis(RETURN_TRANSITION_MS)
}

/// Pointer offset from the element centre, scaled so the edges sit at ±1 and
/// then clamped to the edge buffer.
#[inline]
pub fn normalized_offset(local: Vec2, size: Vec2) -> Vec2 {
    let half = size * 0.5;
    if half.x <= 0.0 || half.y <= 0.0 || !local.is_finite() {
        return Vec2::ZERO;
    }
    ((local - half) / half).clamp(Vec2::splat(-EDGE_BUFFER), Vec2::splat(EDGE_BUFFER))
}

/// Target rotation for a pointer position. The y axis is inverted so the
/// card tips toward the pointer.
#[inline]
pub fn tilt_target(local: Vec2, size: Vec2) -> Vec2 {
    let n = normalized_offset(local, size);
    Vec2::new(n.x * MAX_TILT_DEG, -n.y * MAX_TILT_DEG)
}

/// One easing step toward `target`, snapping once both axes are within
/// `SNAP_EPSILON_DEG`.
#[inline]
pub fn ease_toward(current: Vec2, target: Vec2) -> Vec2 {
    let next = current.lerp(target, LERP_FACTOR);
    let d = (next - target).abs();
    if d.x < SNAP_EPSILON_DEG && d.y < SNAP_EPSILON_DEG {
        target
    } else {
        next
    }
}

#[inline]
fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Approximate angle the CSS return transition has reached `elapsed` after it
/// started from `from`.
pub fn returning_angle(from: Vec2, elapsed: Duration) -> Vec2 {
    let t = elapsed.as_secs_f32() / return_transition().as_secs_f32();
    from * (1.0 - ease_out_cubic(t))
}

pub fn transform_css(angle: Vec2) -> String {
    format!(
        "perspective({PERSPECTIVE_PX}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
        angle.y,
        angle.x,
        s = HOVER_SCALE
    )
}

pub fn highlight_css(local: Vec2) -> String {
    format!(
        "radial-gradient(circle at {}px {}px, rgba(255,255,255,0.12) 0%, transparent 60%)",
        local.x, local.y
    )
}

/// Identifies the pointer-leave a delayed release belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseToken(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerMove {
    /// No frame loop is scheduled for this card yet.
    pub start_loop: bool,
    /// The CSS return transition was engaged and must be switched off.
    pub reclaim_transform: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TiltStep {
    Render(Vec2),
    /// The CSS transition owns the transform for now.
    Hold,
    Stop,
}

#[derive(Clone, Copy, Debug)]
struct Returning {
    from: Vec2,
    since: Instant,
}

#[derive(Clone, Debug, Default)]
pub struct TiltState {
    current: Vec2,
    target: Vec2,
    animating: bool,
    returning: Option<Returning>,
    transition_engaged: bool,
    generation: u64,
}

impl TiltState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn is_returning(&self) -> bool {
        self.returning.is_some()
    }

    pub fn pointer_move(&mut self, local: Vec2, size: Vec2, now: Instant) -> PointerMove {
        self.target = tilt_target(local, size);
        self.generation += 1;

        if let Some(r) = self.returning.take() {
            self.current = returning_angle(r.from, now.saturating_duration_since(r.since));
        }
        let reclaim_transform = std::mem::take(&mut self.transition_engaged);

        let start_loop = !self.animating;
        self.animating = true;
        PointerMove {
            start_loop,
            reclaim_transform,
        }
    }

    pub fn step(&mut self) -> TiltStep {
        if !self.animating {
            return TiltStep::Stop;
        }
        if self.returning.is_some() {
            return TiltStep::Hold;
        }
        self.current = ease_toward(self.current, self.target);
        TiltStep::Render(self.current)
    }

    pub fn pointer_leave(&mut self, now: Instant) -> ReleaseToken {
        self.target = Vec2::ZERO;
        self.returning = Some(Returning {
            from: self.current,
            since: now,
        });
        self.transition_engaged = true;
        self.generation += 1;
        ReleaseToken(self.generation)
    }

    /// Ends the frame loop once the return transition has finished. A token
    /// from a leave that was followed by another move is ignored.
    pub fn release(&mut self, token: ReleaseToken) -> bool {
        if token.0 != self.generation || !self.animating {
            return false;
        }
        self.animating = false;
        self.returning = None;
        self.current = Vec2::ZERO;
        true
    }
}
