//! Delayed commands - the session's one-shot timers.

use serde::{Deserialize, Serialize};
use terrarium_logic::movement::Position;

use crate::components::Arrival;

/// Something the session should do later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveTo { target: Position, arrival: Arrival },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub due_ms: u64,
    pub command: Command,
}

/// Pending timers. Timers due at the same instant fire in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, command: Command) {
        // Insert after every timer due at or before `due_ms` to keep FIFO order.
        let index = self.timers.partition_point(|t| t.due_ms <= due_ms);
        self.timers.insert(index, Timer { due_ms, command });
    }

    pub fn next_due(&self) -> Option<u64> {
        self.timers.first().map(|t| t.due_ms)
    }

    /// Remove and return every timer due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Vec<Timer> {
        let count = self.timers.partition_point(|t| t.due_ms <= now_ms);
        self.timers.drain(..count).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
