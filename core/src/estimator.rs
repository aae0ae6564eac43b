//! Two-hypothesis Bayesian estimate of zoonotic origin.
//!
//! Evidence channels, assumed conditionally independent:
//!   - E: experienced animal hazard at onset. f(E) = 1 − exp(−E).
//!   - k: secondary-case count. Poisson(λ_zoonotic) under Z,
//!     Poisson(λ_human) under ¬Z.
//!
//! posterior = f·g·π / (f·g·π + (1−f)·h·(1−π))
//!
//! Evaluated as a logistic of the log-odds so that large k or E cannot
//! produce 0/0.

use crate::{config::SimConfig, hazard::HazardModel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoonoticOriginEstimator {
    pub lambda_zoonotic: f64,
    pub lambda_human:    f64,
    pub prior_zoonotic:  f64,
}

impl ZoonoticOriginEstimator {
    pub fn new(lambda_zoonotic: f64, lambda_human: f64, prior_zoonotic: f64) -> Self {
        Self { lambda_zoonotic, lambda_human, prior_zoonotic }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.lambda_zoonotic, config.lambda_human, config.prior_zoonotic)
    }

    /// P(exposure evidence | Z).
    pub fn p_hazard_given_zoonotic(hazard_experienced: f64) -> f64 {
        1.0 - (-hazard_experienced).exp()
    }

    /// P(posterior = Z | onset snapshot, k).
    pub fn posterior(&self, onset: &HazardModel, secondary_cases: u32) -> f64 {
        let e = onset.experienced_animal_hazard.max(0.0);

        // ln f(E) = ln(1 − e^−E); ln(1 − f(E)) = −E.
        let ln_f = (-(-e).exp_m1()).ln();
        let ln_not_f = -e;

        let ln_zoonotic = ln_f
            + ln_poisson_pmf(secondary_cases, self.lambda_zoonotic)
            + self.prior_zoonotic.ln();
        let ln_human = ln_not_f
            + ln_poisson_pmf(secondary_cases, self.lambda_human)
            + (1.0 - self.prior_zoonotic).ln();

        let log_odds_against = ln_human - ln_zoonotic;
        if log_odds_against.is_nan() {
            // Both hypotheses impossible; only a degenerate prior gets here.
            return self.prior_zoonotic;
        }
        1.0 / (1.0 + log_odds_against.exp())
    }
}

/// ln P(K = k) for K ~ Poisson(lambda), lambda > 0.
pub fn ln_poisson_pmf(k: u32, lambda: f64) -> f64 {
    let ln_k_factorial: f64 = (2..=k).map(|i| (i as f64).ln()).sum();
    k as f64 * lambda.ln() - lambda - ln_k_factorial
}

pub fn poisson_pmf(k: u32, lambda: f64) -> f64 {
    ln_poisson_pmf(k, lambda).exp()
}
