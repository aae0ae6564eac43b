//! Per-agent hazard bookkeeping.
//!
//! A human carries two experienced-exposure channels (animal, human) that
//! decay geometrically every tick before new exposure is added, plus an
//! output hazard it emits onto its own contacts. An animal presence uses the
//! same struct as a pure emitter: its channels stay at zero forever.

use serde::{Deserialize, Serialize};

/// `Copy` so that onset snapshots are always values, never aliases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct HazardModel {
    pub output_hazard:             f64,
    pub experienced_animal_hazard: f64,
    pub experienced_human_hazard:  f64,
}

impl HazardModel {
    /// A fresh accumulator with nothing experienced and nothing emitted.
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that only emits `rate`.
    pub fn emitter(rate: f64) -> Self {
        Self {
            output_hazard: rate,
            ..Self::default()
        }
    }

    /// Exponential forgetting of both exposure channels.
    pub fn decay(&mut self, factor: f64) {
        self.experienced_animal_hazard *= factor;
        self.experienced_human_hazard *= factor;
    }

    pub fn add_animal_exposure(&mut self, hazard: f64) {
        self.experienced_animal_hazard += hazard;
    }

    pub fn add_human_exposure(&mut self, hazard: f64) {
        self.experienced_human_hazard += hazard;
    }

    pub fn total_experienced_hazard(&self) -> f64 {
        self.experienced_animal_hazard + self.experienced_human_hazard
    }

    /// Per-tick probability that total exposure produces an infection.
    pub fn infection_probability(&self) -> f64 {
        1.0 - (-self.total_experienced_hazard()).exp()
    }
}
