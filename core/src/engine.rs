//! The simulation stepper.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Move phase:   every human, then every animal, in insertion order.
//!   2. Update phase: every human in insertion order (animals are inert).
//!   3. Tick increment.
//!
//! RULES:
//!   - No agent's update sees another agent's pre-move position.
//!   - Every update reads the roster as frozen after the move phase. A
//!     status flip or sickness record written during the update phase
//!     becomes visible to other humans on the next tick.
//!   - All randomness flows through the RngBank.

use crate::{
    agent::{Agent, Population},
    animal::AnimalPresence,
    clock::SimClock,
    config::SimConfig,
    error::{SimError, SimResult},
    estimator::ZoonoticOriginEstimator,
    event::SimEvent,
    human::{Human, UpdateContext},
    motion::{MotionModel, RandomWalk, Stationary},
    rng::RngBank,
    secondary::{SecondaryCaseCounter, SicknessLookup},
    sickness::SicknessRecord,
    types::{AgentId, Tick},
};
use std::collections::BTreeMap;

pub struct Simulation {
    clock:         SimClock,
    config:        SimConfig,
    rng_bank:      RngBank,
    humans:        Vec<Human>,
    human_index:   BTreeMap<AgentId, usize>,
    animals:       Vec<AnimalPresence>,
    human_motion:  Box<dyn MotionModel>,
    animal_motion: Box<dyn MotionModel>,
    counter:       SecondaryCaseCounter,
    estimator:     ZoonoticOriginEstimator,
}

impl Simulation {
    /// Humans random-walk and animals hold still when off-trajectory,
    /// unless replaced with `with_human_motion` / `with_animal_motion`.
    pub fn new(config: SimConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            clock:         SimClock::new(),
            rng_bank:      RngBank::new(seed),
            humans:        Vec::new(),
            human_index:   BTreeMap::new(),
            animals:       Vec::new(),
            human_motion:  Box::new(RandomWalk { max_step: 5.0 }),
            animal_motion: Box::new(Stationary),
            counter:       SecondaryCaseCounter::new(config.incubation_ticks, config.secondary_case_mode),
            estimator:     ZoonoticOriginEstimator::from_config(&config),
            config,
        })
    }

    pub fn with_human_motion(mut self, motion: impl MotionModel + 'static) -> Self {
        self.human_motion = Box::new(motion);
        self
    }

    pub fn with_animal_motion(mut self, motion: impl MotionModel + 'static) -> Self {
        self.animal_motion = Box::new(motion);
        self
    }

    pub fn add_agent(&mut self, agent: impl Into<Agent>) -> SimResult<()> {
        let agent = agent.into();
        let (id, kind) = (agent.id(), agent.kind());
        let taken = match &agent {
            Agent::Human(_) => self.human_index.contains_key(&id),
            Agent::Animal(_) => self.animals.iter().any(|a| a.id() == id),
        };
        if taken {
            return Err(SimError::DuplicateAgent { id, kind });
        }
        log::debug!("registered {kind} {id} at {:?}", agent.location());
        match agent {
            Agent::Human(human) => {
                self.human_index.insert(id, self.humans.len());
                self.humans.push(human);
            }
            Agent::Animal(animal) => self.animals.push(animal),
        }
        Ok(())
    }

    /// The tick the next `step` will process.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Advance one tick. This is the core simulation step.
    pub fn step(&mut self) -> SimResult<Vec<SimEvent>> {
        let tick = self.clock.current_tick;

        // ── Move phase ─────────────────────────────────────────
        for human in &mut self.humans {
            human.apply_movement(tick, self.human_motion.as_ref(), &mut self.rng_bank.motion, &self.config);
        }
        for animal in &mut self.animals {
            animal.apply_movement(tick, self.animal_motion.as_ref(), &mut self.rng_bank.motion);
        }

        // ── Update phase ───────────────────────────────────────
        let roster = Population::capture(&self.humans, &self.human_index);
        let ctx = UpdateContext {
            tick,
            config:    &self.config,
            others:    &roster,
            animals:   &self.animals,
            counter:   &self.counter,
            estimator: &self.estimator,
        };
        let mut events = Vec::new();
        for human in &mut self.humans {
            events.extend(human.update(&ctx, &mut self.rng_bank.spread)?);
        }

        for event in &events {
            log::trace!("tick={tick} event {}: {event:?}", event.kind());
        }
        events.push(SimEvent::TickCompleted { tick });

        self.clock.advance();
        Ok(events)
    }

    /// Run n ticks in a loop, returning every event in order.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.step()?);
        }
        Ok(events)
    }

    /// Step until the clock has processed tick `last_tick`.
    pub fn run_until(&mut self, last_tick: Tick) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        while self.clock.current_tick <= last_tick {
            events.extend(self.step()?);
        }
        Ok(events)
    }

    pub fn config(&self) -> &SimConfig { &self.config }
    pub fn seed(&self) -> u64 { self.rng_bank.master_seed() }
    pub fn secondary_case_counter(&self) -> &SecondaryCaseCounter { &self.counter }
    pub fn estimator(&self) -> &ZoonoticOriginEstimator { &self.estimator }

    pub fn human(&self, id: AgentId) -> Option<&Human> {
        self.human_index.get(&id).map(|&i| &self.humans[i])
    }

    /// Humans in insertion order.
    pub fn humans(&self) -> &[Human] {
        &self.humans
    }

    pub fn animals(&self) -> &[AnimalPresence] {
        &self.animals
    }

    /// End-of-run report through the `log` facade.
    pub fn log_summary(&self) {
        log::info!(
            "run summary: seed={} ticks={} ({:.0}s simulated), {} humans ({}), {} animals ({})",
            self.seed(),
            self.clock.current_tick,
            self.clock.elapsed_seconds(self.config.tick_seconds),
            self.humans.len(),
            self.human_motion.name(),
            self.animals.len(),
            self.animal_motion.name(),
        );
        for human in &self.humans {
            log::info!(
                "human={} status={:?} hazard={:?} contacts={} closed / {} open",
                human.id(),
                human.status(),
                human.hazard(),
                human.contact_network().len(),
                human.active_contacts().len(),
            );
            for record in human.sickness_records() {
                log::info!(
                    "human={} sickness start={} end={:?} animal_hazard={:.4} human_hazard={:.4} secondary_cases={} p_zoonotic={:.4}",
                    human.id(),
                    record.start_tick,
                    record.end_tick,
                    record.onset_hazard.experienced_animal_hazard,
                    record.onset_hazard.experienced_human_hazard,
                    record.secondary_cases,
                    record.p_zoonotic,
                );
            }
        }
    }
}

impl SicknessLookup for Simulation {
    fn sickness_records(&self, id: AgentId) -> Option<&[SicknessRecord]> {
        self.human(id).map(Human::sickness_records)
    }
}
