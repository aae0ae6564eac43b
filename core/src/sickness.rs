//! Illness episodes.
//!
//! RULE: records are append-only. Only the record referenced by
//! `current_open` may be mutated, and only until it is closed.

use crate::{
    error::{SimError, SimResult},
    hazard::HazardModel,
    types::{AgentId, HealthStatus, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnsetSource {
    SelfReport,
    SimulatedSpread,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SicknessRecord {
    pub start_tick:      Tick,
    pub end_tick:        Option<Tick>,
    pub source:          OnsetSource,
    /// Hazard state at onset. Frozen for the life of the record.
    pub onset_hazard:    HazardModel,
    pub secondary_cases: u32,
    pub p_zoonotic:      f64,
}

impl SicknessRecord {
    pub fn is_open(&self) -> bool {
        self.end_tick.is_none()
    }
}

/// A status change that opened or closed an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SicknessTransition {
    Onset { start_tick: Tick },
    Recovery { start_tick: Tick, end_tick: Tick },
}

#[derive(Debug, Clone)]
pub struct SicknessRecordManager {
    human:        AgentId,
    records:      Vec<SicknessRecord>,
    current_open: Option<usize>,
}

impl SicknessRecordManager {
    pub fn new(human: AgentId) -> Self {
        Self {
            human,
            records: Vec::new(),
            current_open: None,
        }
    }

    /// Apply this tick's status edge. `hazard` is copied into a new record
    /// on Healthy→Sick.
    pub fn observe(
        &mut self,
        tick:     Tick,
        previous: HealthStatus,
        current:  HealthStatus,
        hazard:   &HazardModel,
        source:   OnsetSource,
    ) -> Option<SicknessTransition> {
        match (previous, current) {
            (HealthStatus::Healthy, HealthStatus::Sick) => {
                self.open(tick, *hazard, source);
                Some(SicknessTransition::Onset { start_tick: tick })
            }
            (HealthStatus::Sick, HealthStatus::Healthy) => self.close(tick),
            _ => None,
        }
    }

    fn open(&mut self, tick: Tick, onset_hazard: HazardModel, source: OnsetSource) {
        if let Some(stale) = self.current_open.take() {
            // Unreachable while every status edge passes through observe().
            log::warn!("tick={tick} human={} closing stale sickness record", self.human);
            self.records[stale].end_tick = Some(tick);
        }
        self.records.push(SicknessRecord {
            start_tick: tick,
            end_tick: None,
            source,
            onset_hazard,
            secondary_cases: 0,
            p_zoonotic: 0.0,
        });
        self.current_open = Some(self.records.len() - 1);
    }

    fn close(&mut self, tick: Tick) -> Option<SicknessTransition> {
        let index = self.current_open.take()?;
        let record = &mut self.records[index];
        record.end_tick = Some(tick);
        Some(SicknessTransition::Recovery {
            start_tick: record.start_tick,
            end_tick: tick,
        })
    }

    /// Overwrite the open record's running estimates.
    pub fn refresh_current(&mut self, secondary_cases: u32, p_zoonotic: f64) -> SimResult<()> {
        let index = self
            .current_open
            .ok_or(SimError::NoOpenSickness { human: self.human })?;
        let record = &mut self.records[index];
        record.secondary_cases = secondary_cases;
        record.p_zoonotic = p_zoonotic;
        Ok(())
    }

    pub fn current(&self) -> Option<&SicknessRecord> {
        self.current_open.map(|i| &self.records[i])
    }

    pub fn records(&self) -> &[SicknessRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&SicknessRecord> {
        self.records.last()
    }
}
