//! Interval-based contact network built from per-tick proximity.
//!
//! A contact opens on the first tick two humans are within the proximity
//! threshold and closes on the first tick they are not. While open it lives
//! in the active map keyed by partner; once closed it moves to the network
//! keyed by (start tick, partner). Contacts still open when the run stops
//! stay in the active map.

use crate::{
    error::{SimError, SimResult},
    types::{AgentId, HealthStatus, Tick},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactRecord {
    pub other_id:        AgentId,
    /// Partner's status on the tick the contact opened.
    pub other_status:    HealthStatus,
    pub start_tick:      Tick,
    pub end_tick:        Option<Tick>,
    /// Sum of per-tick distances while in contact.
    pub total_proximity: f64,
}

impl ContactRecord {
    pub fn open(other_id: AgentId, other_status: HealthStatus, start_tick: Tick, distance: f64) -> Self {
        Self {
            other_id,
            other_status,
            start_tick,
            end_tick: None,
            total_proximity: distance,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_tick.is_none()
    }

    pub fn duration(&self) -> SimResult<Tick> {
        match self.end_tick {
            Some(end) => Ok(end - self.start_tick),
            None => Err(SimError::OpenContact {
                other: self.other_id,
                start: self.start_tick,
            }),
        }
    }

    pub fn average_proximity(&self) -> SimResult<f64> {
        let duration = self.duration()?;
        Ok(self.total_proximity / duration as f64)
    }
}

/// Closed-network key. Two partners may share a start tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContactKey {
    pub start_tick: Tick,
    pub other_id:   AgentId,
}

pub type ContactNetwork = BTreeMap<ContactKey, ContactRecord>;

/// What a single proximity observation did to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactUpdate {
    Opened,
    Extended,
    Closed(ContactRecord),
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active:  BTreeMap<AgentId, ContactRecord>,
    network: ContactNetwork,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick's distance to `other_id`.
    pub fn observe(
        &mut self,
        tick:         Tick,
        other_id:     AgentId,
        other_status: HealthStatus,
        distance:     f64,
        threshold:    f64,
    ) -> ContactUpdate {
        if distance <= threshold {
            if let Some(record) = self.active.get_mut(&other_id) {
                record.total_proximity += distance;
                ContactUpdate::Extended
            } else {
                self.active
                    .insert(other_id, ContactRecord::open(other_id, other_status, tick, distance));
                ContactUpdate::Opened
            }
        } else if let Some(mut record) = self.active.remove(&other_id) {
            record.end_tick = Some(tick);
            let key = ContactKey { start_tick: record.start_tick, other_id };
            self.network.insert(key, record.clone());
            ContactUpdate::Closed(record)
        } else {
            ContactUpdate::Unchanged
        }
    }

    pub fn active_contacts(&self) -> &BTreeMap<AgentId, ContactRecord> {
        &self.active
    }

    pub fn network(&self) -> &ContactNetwork {
        &self.network
    }

    /// Closed contacts that started at or after `tick`, in key order.
    pub fn closed_since(&self, tick: Tick) -> impl Iterator<Item = &ContactRecord> {
        self.network
            .range(ContactKey { start_tick: tick, other_id: AgentId::MIN }..)
            .map(|(_, record)| record)
    }
}
