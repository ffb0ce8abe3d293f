//! Frame scheduling abstraction.
//!
//! The engine never talks to a display loop directly; it pulls frame
//! timestamps from a [`FrameScheduler`]. Production code uses the wall-clock
//! paced [`FixedStepScheduler`]; tests substitute a [`ManualScheduler`] with
//! scripted timestamps.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative frame source.
///
/// `next_frame` yields the wall-clock timestamp (seconds since the loop
/// started) for the frame that is now due, blocking until then, or `None`
/// once the scheduler has been cancelled. A frame already handed out is
/// allowed to finish; cancellation only stops future frames.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<f64>;
    fn cancel(&mut self);
}

/// Shared cancellation flag for a [`FixedStepScheduler`].
#[derive(Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Wall-clock paced scheduler producing frames at a fixed rate.
pub struct FixedStepScheduler {
    fps: f64,
    frame: u64,
    started: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl FixedStepScheduler {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1) as f64,
            frame: 0,
            started: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle that can cancel the scheduler from outside the frame loop.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if self.cancelled.load(Ordering::Relaxed) {
            return None;
        }

        let started = *self.started.get_or_insert_with(Instant::now);
        let target = self.frame as f64 / self.fps;
        let elapsed = started.elapsed().as_secs_f64();
        if target > elapsed {
            std::thread::sleep(Duration::from_secs_f64(target - elapsed));
        }

        self.frame += 1;
        Some(target)
    }

    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Test scheduler yielding a pre-scripted timestamp sequence without sleeping.
pub struct ManualScheduler {
    frames: VecDeque<f64>,
    cancelled: bool,
}

impl ManualScheduler {
    pub fn from_timestamps<I: IntoIterator<Item = f64>>(timestamps: I) -> Self {
        Self {
            frames: timestamps.into_iter().collect(),
            cancelled: false,
        }
    }

    /// `count` frames at a fixed step, starting at zero.
    pub fn with_frame_count(count: usize, step_secs: f64) -> Self {
        Self::from_timestamps((0..count).map(|i| i as f64 * step_secs))
    }
}

impl FrameScheduler for ManualScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if self.cancelled {
            return None;
        }
        self.frames.pop_front()
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}
