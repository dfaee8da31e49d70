//! Consumption analytics for household food management: coverage and
//! per-category rates, benchmark comparison, waste estimation, a composite
//! sustainability score, and insight generation with a deterministic
//! fallback when no language model is available.

pub mod analytics;
pub mod config;
pub mod error;
pub mod insights;
pub mod telemetry;
