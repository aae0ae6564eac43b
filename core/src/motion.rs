//! Motion extrapolation for ticks with no known position.
//!
//! The stepper only consults a `MotionModel` when an agent's trajectory has
//! no entry for the current tick. All randomness comes from the motion
//! stream handed in by the stepper.

use crate::{
    rng::SimRng,
    types::{Location, Tick, Trajectory},
};

pub trait MotionModel: Send {
    fn name(&self) -> &'static str;

    /// Position for `tick`, given the agent's known trajectory and where it
    /// stood after the previous tick.
    fn next_location(
        &self,
        trajectory: &Trajectory,
        current:    Location,
        tick:       Tick,
        rng:        &mut SimRng,
    ) -> Location;
}

/// Stay put.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stationary;

impl MotionModel for Stationary {
    fn name(&self) -> &'static str { "stationary" }

    fn next_location(&self, _: &Trajectory, current: Location, _: Tick, _: &mut SimRng) -> Location {
        current
    }
}

/// Independent uniform step in [-max_step, max_step) on each axis.
#[derive(Debug, Clone, Copy)]
pub struct RandomWalk {
    pub max_step: f64,
}

impl MotionModel for RandomWalk {
    fn name(&self) -> &'static str { "random_walk" }

    fn next_location(&self, _: &Trajectory, current: Location, _: Tick, rng: &mut SimRng) -> Location {
        let dx = rng.symmetric(self.max_step);
        let dy = rng.symmetric(self.max_step);
        current.offset(dx, dy)
    }
}

/// Head for the next known waypoint at constant velocity, jittered.
/// With no waypoint ahead the agent stays put and draws nothing.
#[derive(Debug, Clone, Copy)]
pub struct NoisyInterpolation {
    pub max_noise: f64,
}

impl MotionModel for NoisyInterpolation {
    fn name(&self) -> &'static str { "noisy_interpolation" }

    fn next_location(&self, trajectory: &Trajectory, current: Location, tick: Tick, rng: &mut SimRng) -> Location {
        let Some((&waypoint_tick, waypoint)) = trajectory.range(tick + 1..).next() else {
            return current;
        };
        // Steps left including this one: landing exactly on the waypoint
        // at waypoint_tick absent noise.
        let dt = (waypoint_tick - tick + 1) as f64;
        let vx = (waypoint.x - current.x) / dt;
        let vy = (waypoint.y - current.y) / dt;
        let dx = vx + rng.symmetric(self.max_noise);
        let dy = vy + rng.symmetric(self.max_noise);
        current.offset(dx, dy)
    }
}
