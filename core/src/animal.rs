//! Animal presences: moving circular hazard sources.

use crate::{
    error::{SimError, SimResult},
    hazard::HazardModel,
    motion::MotionModel,
    rng::SimRng,
    types::{AgentId, Location, Tick, Trajectory},
};

#[derive(Debug, Clone)]
pub struct AnimalPresence {
    id:                AgentId,
    migration_pattern: Trajectory,
    location:          Location,
    radius:            f64,
    /// Pure emitter; experienced channels stay at zero.
    hazard:            HazardModel,
}

impl AnimalPresence {
    pub fn new(id: AgentId, migration_pattern: Trajectory, radius: f64, hazard_rate: f64) -> SimResult<Self> {
        let location = *migration_pattern
            .values()
            .next()
            .ok_or(SimError::EmptyTrajectory { id })?;
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(SimError::InvalidAgent { id, reason: format!("radius {radius}") });
        }
        if !(hazard_rate.is_finite() && hazard_rate >= 0.0) {
            return Err(SimError::InvalidAgent { id, reason: format!("hazard rate {hazard_rate}") });
        }
        Ok(Self {
            id,
            migration_pattern,
            location,
            radius,
            hazard: HazardModel::emitter(hazard_rate),
        })
    }

    pub fn id(&self) -> AgentId { self.id }
    pub fn location(&self) -> Location { self.location }
    pub fn radius(&self) -> f64 { self.radius }
    pub fn hazard(&self) -> &HazardModel { &self.hazard }
    pub fn migration_pattern(&self) -> &Trajectory { &self.migration_pattern }

    pub fn emission_rate(&self) -> f64 {
        self.hazard.output_hazard
    }

    pub fn covers(&self, point: &Location) -> bool {
        self.location.distance_to(point) <= self.radius
    }

    pub(crate) fn apply_movement(&mut self, tick: Tick, motion: &dyn MotionModel, rng: &mut SimRng) {
        self.location = match self.migration_pattern.get(&tick) {
            Some(known) => *known,
            None => motion.next_location(&self.migration_pattern, self.location, tick, rng),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_earliest_waypoint() {
        let pattern: Trajectory = [(5, Location::new(9.0, 9.0)), (2, Location::new(1.0, 2.0))]
            .into_iter()
            .collect();
        let animal = AnimalPresence::new(0, pattern, 50.0, 0.2).unwrap();
        assert_eq!(animal.location(), Location::new(1.0, 2.0));
        assert_eq!(animal.emission_rate(), 0.2);
        assert_eq!(animal.hazard().total_experienced_hazard(), 0.0);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let pattern: Trajectory = [(0, Location::new(0.0, 0.0))].into_iter().collect();
        let animal = AnimalPresence::new(0, pattern, 5.0, 0.2).unwrap();
        assert!(animal.covers(&Location::new(3.0, 4.0)));
        assert!(!animal.covers(&Location::new(3.0, 4.1)));
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(matches!(
            AnimalPresence::new(3, Trajectory::new(), 5.0, 0.2),
            Err(SimError::EmptyTrajectory { id: 3 })
        ));
        let pattern: Trajectory = [(0, Location::new(0.0, 0.0))].into_iter().collect();
        let err = AnimalPresence::new(3, pattern, -1.0, 0.2).unwrap_err();
        assert!(err.is_data_error());
    }
}
