//! High score holder
//!
//! Owned by the host and shared with the engine. In-memory only; the host
//! decides whether to persist it.

use std::cell::Cell;
use std::rc::Rc;

/// Shared, increase-only best score
///
/// Clones share the same cell, so the host keeps one handle and passes
/// another to the engine.
#[derive(Debug, Clone, Default)]
pub struct HighScore {
    best: Rc<Cell<u64>>,
}

impl HighScore {
    /// Create a holder seeded with a previously known best
    pub fn new(initial: u64) -> Self {
        Self {
            best: Rc::new(Cell::new(initial)),
        }
    }

    /// Current best
    pub fn get(&self) -> u64 {
        self.best.get()
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best.get()
    }

    /// Record a final score. Returns true if it became the new best.
    pub fn submit(&self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best.set(score);
        log::info!("New high score: {}", score);
        true
    }
}
