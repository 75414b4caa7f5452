use crate::core::{FrameControl, FrameOwner, FrameScheduler, LoopHandle};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type FrameTask = Box<dyn FnMut(Instant) -> FrameControl>;

struct DriverInner {
    scheduler: RefCell<FrameScheduler<FrameTask>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
    frame_pending: Cell<bool>,
}

/// Shared requestAnimationFrame loop. Owners register per-frame tasks; the
/// loop only requests frames while at least one task is registered.
#[derive(Clone)]
pub struct FrameDriver {
    inner: Rc<DriverInner>,
}

impl FrameDriver {
    pub fn new() -> Self {
        let inner = Rc::new(DriverInner {
            scheduler: RefCell::new(FrameScheduler::new()),
            tick: RefCell::new(None),
            frame_pending: Cell::new(false),
        });
        let weak: Weak<DriverInner> = Rc::downgrade(&inner);
        *inner.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                FrameDriver { inner }.on_frame();
            }
        }) as Box<dyn FnMut()>));
        Self { inner }
    }

    /// Starts a per-frame task for `owner` unless one is already running.
    pub fn ensure(
        &self,
        owner: FrameOwner,
        task: impl FnMut(Instant) -> FrameControl + 'static,
    ) -> LoopHandle {
        let handle = self
            .inner
            .scheduler
            .borrow_mut()
            .ensure(owner, Box::new(task));
        self.request_frame();
        handle
    }

    pub fn cancel(&self, owner: FrameOwner) {
        self.inner.scheduler.borrow_mut().cancel(owner);
    }

    fn request_frame(&self) {
        if self.inner.frame_pending.get() || self.inner.scheduler.borrow().is_empty() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        if let Some(tick) = self.inner.tick.borrow().as_ref() {
            if window
                .request_animation_frame(tick.as_ref().unchecked_ref())
                .is_ok()
            {
                self.inner.frame_pending.set(true);
            }
        }
    }

    fn on_frame(&self) {
        self.inner.frame_pending.set(false);
        let now = Instant::now();
        self.inner
            .scheduler
            .borrow_mut()
            .run_frame(now, |task, now| task(now));
        self.request_frame();
    }
}
