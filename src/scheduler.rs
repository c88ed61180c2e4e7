//! Frame scheduling: a self-rescheduling render loop over a pluggable scheduler.
//!
//! [`RenderLoop`] runs a paint step once per tick of a [`FrameScheduler`] and
//! re-arms itself after every step until [`RenderLoop::stop`] is called or the
//! loop is dropped. In the browser the scheduler is
//! [`crate::dom::AnimationFrameScheduler`]; elsewhere [`TickScheduler`]
//! drives the loop from an explicit fixed-tick call.
//!
//! A scheduler may hold a step for arbitrarily long (a hidden tab pauses
//! animation frames). Each `start` opens a new generation, and a callback
//! from an older generation does nothing when it finally fires, so
//! stop/start cycles never leave two loops running.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use log::{debug, warn};

/// A one-shot callback run on a future tick.
pub type FrameCallback = Box<dyn FnOnce()>;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("no window available to schedule frames on")]
    NoWindow,
    #[error("frame request rejected: {0}")]
    Rejected(String),
}

/// Something that can run a callback once, on its next tick.
pub trait FrameScheduler {
    /// Queue `callback` for the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the platform refuses the request.
    fn request_frame(&self, callback: FrameCallback) -> Result<(), ScheduleError>;
}

struct LoopInner<S> {
    scheduler: S,
    step: RefCell<Box<dyn FnMut()>>,
    running: Cell<bool>,
    generation: Cell<u64>,
}

/// A continuously rescheduled paint step.
pub struct RenderLoop<S: FrameScheduler + 'static> {
    inner: Rc<LoopInner<S>>,
}

impl<S: FrameScheduler + 'static> RenderLoop<S> {
    /// A stopped loop that will run `step` on every tick of `scheduler` once started.
    pub fn new(scheduler: S, step: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(LoopInner {
                scheduler,
                step: RefCell::new(Box::new(step)),
                running: Cell::new(false),
                generation: Cell::new(0),
            }),
        }
    }

    /// Start ticking. A no-op if already running.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        let generation = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(generation);
        self.inner.running.set(true);
        debug!("render loop started (generation {generation})");
        arm(&self.inner, generation);
    }

    /// Stop ticking. Any step already queued with the scheduler becomes a no-op.
    pub fn stop(&self) {
        if self.inner.running.replace(false) {
            debug!("render loop stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl<S: FrameScheduler + 'static> Drop for RenderLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn arm<S: FrameScheduler + 'static>(inner: &Rc<LoopInner<S>>, generation: u64) {
    let weak: Weak<LoopInner<S>> = Rc::downgrade(inner);
    let callback: FrameCallback = Box::new(move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if !inner.running.get() || inner.generation.get() != generation {
            return;
        }
        {
            let mut step = inner.step.borrow_mut();
            (*step)();
        }
        if inner.running.get() && inner.generation.get() == generation {
            arm(&inner, generation);
        }
    });
    if let Err(err) = inner.scheduler.request_frame(callback) {
        warn!("render loop halted: {err}");
        inner.running.set(false);
    }
}

/// A scheduler advanced by hand, for non-browser targets and tests.
///
/// Clones share one queue, so a clone can be handed to a [`RenderLoop`] while
/// the owner keeps calling [`TickScheduler::tick`].
#[derive(Clone, Default)]
pub struct TickScheduler {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback queued before this tick; returns how many ran.
    ///
    /// Callbacks queued while the tick runs wait for the next one.
    pub fn tick(&self) -> usize {
        let due: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        let count = due.len();
        for callback in due {
            callback();
        }
        count
    }

    /// Callbacks waiting for the next tick.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for TickScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), ScheduleError> {
        self.queue.borrow_mut().push_back(callback);
        Ok(())
    }
}
