//! Discrete-time contact simulation for estimating whether a human's
//! illness was zoonotic or passed on by another human.
//!
//! Build a [`engine::Simulation`] from a [`config::SimConfig`] and a seed,
//! add [`human::Human`] and [`animal::AnimalPresence`] agents, then `step`.
//! Each sick human's latest [`sickness::SicknessRecord`] carries the onset
//! hazard snapshot, secondary-case count and zoonotic posterior.

pub mod agent;
pub mod animal;
pub mod clock;
pub mod config;
pub mod contact;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod event;
pub mod hazard;
pub mod human;
pub mod motion;
pub mod rng;
pub mod secondary;
pub mod sickness;
pub mod types;
