//! Per-tick event stream.
//!
//! `Simulation::step` returns the events produced during the tick in the
//! order they happened. The stream is the observable record that the
//! determinism tests compare byte-for-byte.

use crate::{
    sickness::OnsetSource,
    types::{AgentId, HealthStatus, Tick},
};
use serde::{Deserialize, Serialize};

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    TickCompleted {
        tick: Tick,
    },

    // ── Contact events (one per side) ──────────────
    ContactOpened {
        tick:         Tick,
        human:        AgentId,
        other:        AgentId,
        other_status: HealthStatus,
        distance:     f64,
    },
    ContactClosed {
        tick:              Tick,
        human:             AgentId,
        other:             AgentId,
        start_tick:        Tick,
        duration:          Tick,
        average_proximity: f64,
    },

    // ── Sickness events ────────────────────────────
    IllnessOnset {
        tick:          Tick,
        human:         AgentId,
        source:        OnsetSource,
        animal_hazard: f64,
        human_hazard:  f64,
    },
    Recovered {
        tick:            Tick,
        human:           AgentId,
        start_tick:      Tick,
        secondary_cases: u32,
        p_zoonotic:      f64,
    },
}

impl SimEvent {
    /// Stable snake_case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            SimEvent::TickCompleted { .. } => "tick_completed",
            SimEvent::ContactOpened { .. } => "contact_opened",
            SimEvent::ContactClosed { .. } => "contact_closed",
            SimEvent::IllnessOnset { .. }  => "illness_onset",
            SimEvent::Recovered { .. }     => "recovered",
        }
    }
}
