//! Deterministic consumption-analytics engine.
//!
//! Every function here is a pure transformation of an already-fetched
//! snapshot: no I/O, no shared state, and "now" always passed in explicitly.
//! Fetching the snapshot (and any concurrency around it) belongs to the
//! caller.

pub mod config;
pub mod coverage;
pub mod import;
pub mod patterns;
pub mod records;
pub mod report;
pub mod sustainability;
pub mod waste;

pub use config::{AnalyticsConfig, ServingRange};
pub use coverage::{aggregate_by_category, days_covered, CategoryStats};
pub use import::{CsvLogImporter, LogImportError};
pub use patterns::{analyze_consumption_patterns, AnalysisResult};
pub use records::{
    HouseholdProfile, InventoryItem, LogRecord, RawInventoryItem, RawLogRecord,
};
pub use report::AnalysisReport;
pub use sustainability::{calculate_sdg_score, Improvement, SustainabilityScore};
pub use waste::{
    calculate_waste_risk, estimate_waste, RiskLevel, WasteEstimate, WasteRiskEntry, WastedItem,
};
