use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Who a per-frame task belongs to. At most one live task per owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameOwner {
    Card(usize),
    Playback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Cooperative stop signal for a repeating task. Cancelling takes effect at
/// the start of the next frame.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle(Rc<Cell<bool>>);

impl LoopHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

struct Scheduled<T> {
    owner: FrameOwner,
    handle: LoopHandle,
    task: T,
}

pub struct FrameScheduler<T> {
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_running(&self, owner: FrameOwner) -> bool {
        self.tasks
            .iter()
            .any(|t| t.owner == owner && !t.handle.is_cancelled())
    }

    /// Registers `task` for `owner` unless a live task is already registered,
    /// in which case `task` is dropped and the existing handle returned.
    pub fn ensure(&mut self, owner: FrameOwner, task: T) -> LoopHandle {
        if let Some(live) = self
            .tasks
            .iter()
            .find(|t| t.owner == owner && !t.handle.is_cancelled())
        {
            return live.handle.clone();
        }
        self.tasks.retain(|t| t.owner != owner);
        let handle = LoopHandle::default();
        self.tasks.push(Scheduled {
            owner,
            handle: handle.clone(),
            task,
        });
        handle
    }

    pub fn cancel(&mut self, owner: FrameOwner) {
        for t in self.tasks.iter().filter(|t| t.owner == owner) {
            t.handle.cancel();
        }
    }

    /// Runs every live task once. Returns how many ran.
    pub fn run_frame(
        &mut self,
        now: Instant,
        mut run: impl FnMut(&mut T, Instant) -> FrameControl,
    ) -> usize {
        self.tasks.retain(|t| !t.handle.is_cancelled());
        let mut ran = 0;
        self.tasks.retain_mut(|t| {
            ran += 1;
            match run(&mut t.task, now) {
                FrameControl::Continue => true,
                FrameControl::Stop => {
                    t.handle.cancel();
                    false
                }
            }
        });
        ran
    }
}
