//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A simulation tick. Real time = tick × `SimConfig::tick_seconds`.
pub type Tick = u64;

/// A stable, unique identifier for an agent. Humans and animal presences
/// have separate id spaces.
pub type AgentId = u32;

/// Ground-truth positions keyed by tick. Ordered so "next known waypoint"
/// lookups are a range query.
pub type Trajectory = BTreeMap<Tick, Location>;

/// Self-reported health status keyed by the tick it takes effect.
pub type ReportSchedule = BTreeMap<Tick, HealthStatus>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Location {
        Location::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    #[default]
    Healthy,
    Sick,
}

impl HealthStatus {
    pub fn is_sick(&self) -> bool {
        matches!(self, HealthStatus::Sick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean_and_symmetric() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }
}
