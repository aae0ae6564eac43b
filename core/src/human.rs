//! Human agents: the state machine at the heart of the simulation.
//!
//! UPDATE ORDER (per human, per tick, fixed):
//!   1. Find animal presences whose radius covers the human.
//!   2. Open / extend / close contacts with every other human.
//!   3. Decay both exposure channels, then add this tick's exposure.
//!   4. Optional stochastic spread (Healthy → Sick).
//!   5. Open or close the sickness episode on a status edge.
//!   6. While sick, refresh secondary cases and the zoonotic posterior.

use crate::{
    agent::Population,
    animal::AnimalPresence,
    config::SimConfig,
    contact::{ContactNetwork, ContactRecord, ContactTracker, ContactUpdate},
    error::{SimError, SimResult},
    estimator::ZoonoticOriginEstimator,
    event::SimEvent,
    hazard::HazardModel,
    motion::MotionModel,
    rng::SimRng,
    secondary::{SecondaryCaseCounter, SicknessLookup},
    sickness::{OnsetSource, SicknessRecord, SicknessRecordManager, SicknessTransition},
    types::{AgentId, HealthStatus, Location, ReportSchedule, Tick, Trajectory},
};
use std::collections::BTreeMap;

/// Everything a human reads during its update, besides itself.
pub(crate) struct UpdateContext<'a> {
    pub tick:      Tick,
    pub config:    &'a SimConfig,
    pub others:    &'a Population<'a>,
    pub animals:   &'a [AnimalPresence],
    pub counter:   &'a SecondaryCaseCounter,
    pub estimator: &'a ZoonoticOriginEstimator,
}

#[derive(Debug, Clone)]
pub struct Human {
    id:               AgentId,
    location_history: Trajectory,
    self_reports:     ReportSchedule,
    location:         Location,
    status:           HealthStatus,
    prev_status:      HealthStatus,
    hazard:           HazardModel,
    contacts:         ContactTracker,
    sickness:         SicknessRecordManager,
}

impl Human {
    /// Starts Healthy at the earliest known location.
    pub fn new(id: AgentId, location_history: Trajectory, self_reports: ReportSchedule) -> SimResult<Self> {
        let location = *location_history
            .values()
            .next()
            .ok_or(SimError::EmptyTrajectory { id })?;
        Ok(Self {
            id,
            location_history,
            self_reports,
            location,
            status: HealthStatus::Healthy,
            prev_status: HealthStatus::Healthy,
            hazard: HazardModel::new(),
            contacts: ContactTracker::new(),
            sickness: SicknessRecordManager::new(id),
        })
    }

    pub fn id(&self) -> AgentId { self.id }
    pub fn location(&self) -> Location { self.location }
    pub fn status(&self) -> HealthStatus { self.status }
    pub fn previous_status(&self) -> HealthStatus { self.prev_status }
    pub fn hazard(&self) -> &HazardModel { &self.hazard }
    pub fn location_history(&self) -> &Trajectory { &self.location_history }
    pub fn self_reports(&self) -> &ReportSchedule { &self.self_reports }

    /// Closed contacts keyed by (start tick, partner).
    pub fn contact_network(&self) -> &ContactNetwork {
        self.contacts.network()
    }

    /// Contacts not yet closed, keyed by partner.
    pub fn active_contacts(&self) -> &BTreeMap<AgentId, ContactRecord> {
        self.contacts.active_contacts()
    }

    pub fn sickness_records(&self) -> &[SicknessRecord] {
        self.sickness.records()
    }

    pub fn current_sickness(&self) -> Option<&SicknessRecord> {
        self.sickness.current()
    }

    pub fn latest_sickness(&self) -> Option<&SicknessRecord> {
        self.sickness.latest()
    }

    /// Secondary cases attributable to the ongoing episode.
    pub fn secondary_cases(
        &self,
        others:  &impl SicknessLookup,
        counter: &SecondaryCaseCounter,
    ) -> SimResult<u32> {
        if !self.status.is_sick() {
            return Err(SimError::NotSick { human: self.id });
        }
        let onset = self
            .sickness
            .current()
            .ok_or(SimError::NoOpenSickness { human: self.id })?
            .start_tick;
        counter.count(onset, &self.contacts, others)
    }

    /// Move phase: ground truth if known, else extrapolate; then apply any
    /// self-report scheduled for this tick.
    pub(crate) fn apply_movement(
        &mut self,
        tick:   Tick,
        motion: &dyn MotionModel,
        rng:    &mut SimRng,
        config: &SimConfig,
    ) {
        self.location = match self.location_history.get(&tick) {
            Some(known) => *known,
            None => motion.next_location(&self.location_history, self.location, tick, rng),
        };

        if let Some(report) = self.self_reports.get(&tick) {
            if *report != self.status {
                log::debug!("tick={tick} human={} self-reported {:?}", self.id, report);
            }
            self.status = *report;
        }
        self.hazard.output_hazard = config.output_hazard(self.status);
    }

    /// Update phase. Reads other humans only through the frozen roster in
    /// `ctx`, never their live state.
    pub(crate) fn update(&mut self, ctx: &UpdateContext<'_>, spread_rng: &mut SimRng) -> SimResult<Vec<SimEvent>> {
        let tick = ctx.tick;
        let mut events = Vec::new();

        let animal_emissions: Vec<f64> = ctx
            .animals
            .iter()
            .filter(|animal| animal.covers(&self.location))
            .map(AnimalPresence::emission_rate)
            .collect();

        for other in ctx.others.excluding(self.id) {
            let distance = self.location.distance_to(&other.location);
            let change = self.contacts.observe(
                tick,
                other.id,
                other.status,
                distance,
                ctx.config.proximity_threshold,
            );
            match change {
                ContactUpdate::Opened => {
                    log::debug!("tick={tick} human={} contact opened with {} at {distance:.2}", self.id, other.id);
                    events.push(SimEvent::ContactOpened {
                        tick,
                        human: self.id,
                        other: other.id,
                        other_status: other.status,
                        distance,
                    });
                }
                ContactUpdate::Closed(record) => {
                    log::debug!(
                        "tick={tick} human={} contact closed with {} (started {})",
                        self.id, other.id, record.start_tick
                    );
                    events.push(SimEvent::ContactClosed {
                        tick,
                        human: self.id,
                        other: other.id,
                        start_tick: record.start_tick,
                        duration: record.duration()?,
                        average_proximity: record.average_proximity()?,
                    });
                }
                ContactUpdate::Extended | ContactUpdate::Unchanged => {}
            }
        }

        self.hazard.decay(ctx.config.hazard_decay);
        for emission in animal_emissions {
            self.hazard.add_animal_exposure(emission);
        }
        for other_id in self.contacts.active_contacts().keys() {
            let other = ctx.others.get(*other_id).ok_or(SimError::UnknownAgent { id: *other_id })?;
            self.hazard.add_human_exposure(other.output_hazard);
        }

        let mut source = OnsetSource::SelfReport;
        if ctx.config.simulate_spread && !self.status.is_sick() {
            let p = self.hazard.infection_probability();
            if spread_rng.chance(p) {
                log::debug!("tick={tick} human={} infected by simulated spread (p={p:.4})", self.id);
                self.status = HealthStatus::Sick;
                self.hazard.output_hazard = ctx.config.output_hazard(self.status);
                source = OnsetSource::SimulatedSpread;
            }
        }

        match self.sickness.observe(tick, self.prev_status, self.status, &self.hazard, source) {
            Some(SicknessTransition::Onset { .. }) => {
                log::info!(
                    "tick={tick} human={} fell sick ({source:?}); animal hazard {:.4}, human hazard {:.4}",
                    self.id, self.hazard.experienced_animal_hazard, self.hazard.experienced_human_hazard
                );
                events.push(SimEvent::IllnessOnset {
                    tick,
                    human: self.id,
                    source,
                    animal_hazard: self.hazard.experienced_animal_hazard,
                    human_hazard: self.hazard.experienced_human_hazard,
                });
            }
            Some(SicknessTransition::Recovery { start_tick, .. }) => {
                let closed = self.sickness.latest().ok_or(SimError::NoOpenSickness { human: self.id })?;
                log::info!(
                    "tick={tick} human={} recovered; secondary cases {}, p_zoonotic {:.4}",
                    self.id, closed.secondary_cases, closed.p_zoonotic
                );
                events.push(SimEvent::Recovered {
                    tick,
                    human: self.id,
                    start_tick,
                    secondary_cases: closed.secondary_cases,
                    p_zoonotic: closed.p_zoonotic,
                });
            }
            None => {}
        }

        if self.status.is_sick() {
            let secondary_cases = self.secondary_cases(ctx.others, ctx.counter)?;
            let onset = self
                .sickness
                .current()
                .ok_or(SimError::NoOpenSickness { human: self.id })?
                .onset_hazard;
            let p_zoonotic = ctx.estimator.posterior(&onset, secondary_cases);
            self.sickness.refresh_current(secondary_cases, p_zoonotic)?;
        }

        self.prev_status = self.status;
        Ok(events)
    }
}
