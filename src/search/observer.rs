//! Step notifications, pacing and cancellation.
//!
//! The search notifies an observer after every assignment and every unassignment of a vertex.
//! The observer decides how long the search waits (pacing) and whether it goes on.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::color::{ColorId, VertexId};

/** a vertex received a color (`Some`), or lost it (`None`) */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    /// vertex modified
    pub vertex: VertexId,
    /// its new color
    pub color: Option<ColorId>,
}

/** receives every step of a search. Returning `ControlFlow::Break` cancels the search. */
pub trait StepObserver {
    /// called after each modification of the coloring
    fn on_step(&mut self, step:&Step) -> ControlFlow<()>;
}

impl<F> StepObserver for F where F: FnMut(&Step) -> ControlFlow<()> {
    fn on_step(&mut self, step:&Step) -> ControlFlow<()> { self(step) }
}

/** ignores every step */
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl StepObserver for SilentObserver {
    fn on_step(&mut self, _step:&Step) -> ControlFlow<()> { ControlFlow::Continue(()) }
}

/** keeps every step (used to replay or compare runs) */
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    /// steps received so far
    pub steps: Vec<Step>,
}

impl StepObserver for StepRecorder {
    fn on_step(&mut self, step:&Step) -> ControlFlow<()> {
        self.steps.push(*step);
        ControlFlow::Continue(())
    }
}

/** forwards each step, then waits for a fixed delay chosen by the caller */
#[derive(Debug)]
pub struct PacedObserver<O> {
    inner: O,
    delay: Duration,
}

impl<O:StepObserver> PacedObserver<O> {
    /// creates a paced observer
    pub fn new(inner:O, delay:Duration) -> Self { Self { inner, delay } }

    /// delay between two steps
    pub fn delay(&self) -> Duration { self.delay }
}

impl<O:StepObserver> StepObserver for PacedObserver<O> {
    fn on_step(&mut self, step:&Step) -> ControlFlow<()> {
        self.inner.on_step(step)?;
        thread::sleep(self.delay);
        ControlFlow::Continue(())
    }
}

/**
shared cancellation flag. Cloning it shares the flag, so it can be raised from a signal
handler or another thread while a search is running.
*/
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// creates a token (not cancelled)
    pub fn new() -> Self { Self::default() }

    /// requests the cancellation
    pub fn cancel(&self) { self.cancelled.store(true, Ordering::Relaxed) }

    /// true once the cancellation has been requested
    pub fn is_cancelled(&self) -> bool { self.cancelled.load(Ordering::Relaxed) }

    /// underlying flag (to register it as a signal handler)
    pub fn flag(&self) -> Arc<AtomicBool> { Arc::clone(&self.cancelled) }
}

/** stops the search at the first step following the cancellation of its token */
#[derive(Debug)]
pub struct Cancellable<O> {
    inner: O,
    token: CancellationToken,
}

impl<O:StepObserver> Cancellable<O> {
    /// creates a cancellable observer
    pub fn new(inner:O, token:CancellationToken) -> Self { Self { inner, token } }
}

impl<O:StepObserver> StepObserver for Cancellable<O> {
    fn on_step(&mut self, step:&Step) -> ControlFlow<()> {
        if self.token.is_cancelled() { return ControlFlow::Break(()); }
        self.inner.on_step(step)?;
        if self.token.is_cancelled() { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    }
}
