//! Simulation clock. Owns the tick counter.

use crate::types::Tick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SimClock {
    /// The tick the next step will process. Starts at 0.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self { current_tick: 0 }
    }

    /// Close out the current tick. Returns the new tick number.
    pub fn advance(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    /// Real-world seconds elapsed at the current tick.
    pub fn elapsed_seconds(&self, tick_seconds: f64) -> f64 {
        self.current_tick as f64 * tick_seconds
    }
}
