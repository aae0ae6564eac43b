//! Consolidated simulation tunables.
//!
//! Every constant the agent state machine reads lives here and is handed to
//! the `Simulation` at construction. `Default` carries the reference values;
//! `load()` reads overrides from a JSON file where any missing field keeps
//! its default.

use crate::{
    error::{SimError, SimResult},
    types::{HealthStatus, Tick},
};
use serde::{Deserialize, Serialize};

/// How the secondary-case scan treats multiple qualifying partners.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryCaseMode {
    /// Every distinct qualifying partner counts once.
    #[default]
    AllPartners,
    /// Stop scanning after the first qualifying partner (count is 0 or 1).
    FirstPartnerOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Max distance at which two humans are in contact.
    pub proximity_threshold: f64,
    /// Per-tick multiplier applied to both experienced-hazard channels.
    pub hazard_decay: f64,
    /// Look-back before onset during which contacts count.
    pub incubation_ticks: Tick,
    /// Expected secondary cases if the illness is zoonotic.
    pub lambda_zoonotic: f64,
    /// Expected secondary cases if the illness spread human-to-human.
    pub lambda_human: f64,
    pub prior_zoonotic: f64,
    /// Let experienced hazard flip Healthy humans to Sick stochastically.
    pub simulate_spread: bool,
    /// Output hazard of a sick human. Healthy humans emit nothing.
    pub sick_output_hazard: f64,
    pub secondary_case_mode: SecondaryCaseMode,
    /// Real-world seconds per tick.
    pub tick_seconds: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        const TICK_SECONDS: f64 = 10.0;
        const INCUBATION_SECONDS: f64 = 300.0;
        Self {
            proximity_threshold: 20.0,
            hazard_decay:        0.99,
            incubation_ticks:    (INCUBATION_SECONDS / TICK_SECONDS) as Tick,
            lambda_zoonotic:     0.1,
            lambda_human:        2.0,
            prior_zoonotic:      0.01,
            simulate_spread:     false,
            sick_output_hazard:  0.03,
            secondary_case_mode: SecondaryCaseMode::AllPartners,
            tick_seconds:        TICK_SECONDS,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file and validate.
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)?;
        log::debug!("config loaded from {path}: {config:?}");
        Ok(config)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SimError {
            SimError::InvalidConfig { field, reason: reason.into() }
        }

        if !(self.proximity_threshold.is_finite() && self.proximity_threshold >= 0.0) {
            return Err(invalid("proximity_threshold", "must be finite and >= 0"));
        }
        if !(self.hazard_decay > 0.0 && self.hazard_decay < 1.0) {
            return Err(invalid("hazard_decay", format!("must be in (0, 1), got {}", self.hazard_decay)));
        }
        if !(self.lambda_zoonotic.is_finite() && self.lambda_zoonotic > 0.0) {
            return Err(invalid("lambda_zoonotic", "must be finite and > 0"));
        }
        if !(self.lambda_human.is_finite() && self.lambda_human > 0.0) {
            return Err(invalid("lambda_human", "must be finite and > 0"));
        }
        if !(self.prior_zoonotic > 0.0 && self.prior_zoonotic < 1.0) {
            return Err(invalid("prior_zoonotic", format!("must be in (0, 1), got {}", self.prior_zoonotic)));
        }
        if !(self.sick_output_hazard.is_finite() && self.sick_output_hazard > 0.0) {
            return Err(invalid("sick_output_hazard", "must be finite and > 0"));
        }
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(invalid("tick_seconds", "must be finite and > 0"));
        }
        Ok(())
    }

    /// Whole ticks covering `seconds` of real time, truncated.
    pub fn seconds_to_ticks(&self, seconds: f64) -> Tick {
        (seconds / self.tick_seconds).max(0.0) as Tick
    }

    /// Two-level output hazard: zero while healthy, constant while sick.
    pub fn output_hazard(&self, status: HealthStatus) -> f64 {
        match status {
            HealthStatus::Healthy => 0.0,
            HealthStatus::Sick    => self.sick_output_hazard,
        }
    }
}
