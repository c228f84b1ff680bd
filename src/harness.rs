//! Scheduling harness
//!
//! Two periodic cadences on a virtual millisecond clock: the frame cadence
//! (one physics tick per display frame) and the spawn cadence (one obstacle
//! per profile interval). The host feeds elapsed real time into
//! `Engine::advance`, which fires whatever came due in chronological order.

use crate::consts::{FRAME_MS, MAX_CATCHUP_FRAMES};
use crate::engine::Engine;

/// Which cadence fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceKind {
    Frame,
    Spawn,
}

/// A cancelable periodic schedule
#[derive(Debug, Clone, Default)]
pub struct Cadence {
    period_ms: f64,
    next_due: Option<f64>,
}

impl Cadence {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due: None,
        }
    }

    /// (Re)arm so the first firing is one period after `now`
    pub fn start(&mut self, now: f64) {
        self.next_due = Some(now + self.period_ms);
    }

    /// Stop firing. Safe to call any number of times.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn set_period(&mut self, period_ms: f64) {
        self.period_ms = period_ms;
    }

    /// Due time of the next firing, if armed
    pub fn next_due(&self) -> Option<f64> {
        self.next_due
    }

    /// Next due time if it falls at or before `until`
    fn due_by(&self, until: f64) -> Option<f64> {
        self.next_due.filter(|&due| due <= until)
    }

    fn advance(&mut self) {
        if let Some(due) = self.next_due.as_mut() {
            *due += self.period_ms;
        }
    }
}

/// Clock plus the frame and spawn cadences
#[derive(Debug, Clone)]
pub struct Scheduler {
    now_ms: f64,
    frame: Cadence,
    spawn: Cadence,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            frame: Cadence::new(FRAME_MS),
            spawn: Cadence::new(0.0),
        }
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    pub fn frame(&self) -> &Cadence {
        &self.frame
    }

    pub fn spawn(&self) -> &Cadence {
        &self.spawn
    }

    /// Cancel and rearm both cadences from the current time
    pub fn restart(&mut self, spawn_interval_ms: f64) {
        self.cancel_all();
        self.spawn.set_period(spawn_interval_ms);
        self.frame.start(self.now_ms);
        self.spawn.start(self.now_ms);
    }

    pub fn cancel_all(&mut self) {
        self.frame.cancel();
        self.spawn.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_active() || self.spawn.is_active()
    }

    /// Pop the earliest firing due at or before `until`, moving the clock to it
    ///
    /// Frames win ties.
    pub fn pop_due(&mut self, until: f64) -> Option<CadenceKind> {
        let frame = self.frame.due_by(until);
        let spawn = self.spawn.due_by(until);

        let (kind, due) = match (frame, spawn) {
            (Some(f), Some(s)) if s < f => (CadenceKind::Spawn, s),
            (Some(f), _) => (CadenceKind::Frame, f),
            (None, Some(s)) => (CadenceKind::Spawn, s),
            (None, None) => return None,
        };

        self.now_ms = due;
        match kind {
            CadenceKind::Frame => self.frame.advance(),
            CadenceKind::Spawn => self.spawn.advance(),
        }
        Some(kind)
    }

    /// Drop the frame and spawn backlog up to `until`, rearming both from it
    fn skip_backlog(&mut self, until: f64) {
        for cadence in [&mut self.frame, &mut self.spawn] {
            if cadence.is_active() {
                cadence.start(until);
            }
        }
    }

    /// Move the clock to `until` once nothing else is due
    fn settle(&mut self, until: f64) {
        self.now_ms = self.now_ms.max(until);
    }
}

impl Engine {
    /// Feed elapsed real time; fires due ticks and spawns in time order
    ///
    /// Returns the number of frames ticked. At most `MAX_CATCHUP_FRAMES`
    /// frames run per call; the rest of a long stall is skipped, spawns
    /// included. Non-finite `elapsed_ms` is ignored.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !elapsed_ms.is_finite() {
            log::warn!("Ignoring non-finite elapsed time {}", elapsed_ms);
            return 0;
        }
        let until = self.scheduler.now() + elapsed_ms.max(0.0);
        let mut frames = 0;

        while let Some(kind) = self.scheduler.pop_due(until) {
            match kind {
                CadenceKind::Frame if frames >= MAX_CATCHUP_FRAMES => {
                    log::debug!("Frame backlog past {} frames, skipping to {:.1} ms", frames, until);
                    self.scheduler.skip_backlog(until);
                    break;
                }
                CadenceKind::Frame => {
                    self.tick();
                    frames += 1;
                }
                CadenceKind::Spawn => self.spawn_tick(),
            }
        }

        self.scheduler.settle(until);
        frames
    }

    /// Scheduler state, for hosts that want to inspect the cadences
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
