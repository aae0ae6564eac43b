//! Secondary-case counting.
//!
//! A partner counts as a secondary case of the subject when the subject's
//! closed network holds a contact with them that started inside the
//! infectious window, the partner was healthy when that contact started,
//! and the partner has an illness onset inside the same window.

use crate::{
    config::SecondaryCaseMode,
    contact::ContactTracker,
    error::{SimError, SimResult},
    sickness::SicknessRecord,
    types::{AgentId, HealthStatus, Tick},
};
use std::collections::BTreeSet;

/// Read access to other humans' illness history.
pub trait SicknessLookup {
    fn sickness_records(&self, id: AgentId) -> Option<&[SicknessRecord]>;
}

#[derive(Debug, Clone, Copy)]
pub struct SecondaryCaseCounter {
    pub incubation_ticks: Tick,
    pub mode:             SecondaryCaseMode,
}

impl SecondaryCaseCounter {
    pub fn new(incubation_ticks: Tick, mode: SecondaryCaseMode) -> Self {
        Self { incubation_ticks, mode }
    }

    /// First tick of the infectious window for an onset at `onset_tick`.
    pub fn infectious_at(&self, onset_tick: Tick) -> Tick {
        onset_tick.saturating_sub(self.incubation_ticks)
    }

    pub fn count(
        &self,
        onset_tick: Tick,
        contacts:   &ContactTracker,
        others:     &impl SicknessLookup,
    ) -> SimResult<u32> {
        let infectious_at = self.infectious_at(onset_tick);
        let mut counted: BTreeSet<AgentId> = BTreeSet::new();

        for contact in contacts.closed_since(infectious_at) {
            if counted.contains(&contact.other_id) || contact.other_status != HealthStatus::Healthy {
                continue;
            }
            let records = others
                .sickness_records(contact.other_id)
                .ok_or(SimError::UnknownAgent { id: contact.other_id })?;

            if records.iter().any(|s| s.start_tick >= infectious_at) {
                counted.insert(contact.other_id);
                if self.mode == SecondaryCaseMode::FirstPartnerOnly {
                    break;
                }
            }
        }

        Ok(counted.len() as u32)
    }
}
