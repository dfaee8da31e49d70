use super::config::AnalyticsConfig;
use super::coverage::days_covered;
use super::patterns::{analyze_consumption_patterns, AnalysisResult};
use super::records::{HouseholdProfile, InventoryItem, LogRecord};
use super::sustainability::{calculate_sdg_score, SustainabilityScore};
use super::waste::{estimate_waste, WasteEstimate};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Full analysis over one snapshot of logs, inventory, and profile data.
///
/// The SDG sub-scores are exposed under the dashboard names as well:
/// `sdg2_progress` (Zero Hunger) mirrors the nutrition score and
/// `sdg12_progress` (Responsible Consumption) mirrors the consumption score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub days_covered: i64,
    pub patterns: AnalysisResult,
    pub waste: WasteEstimate,
    pub sustainability: SustainabilityScore,
    pub sdg2_progress: u8,
    pub sdg12_progress: u8,
}

impl AnalysisReport {
    /// Run the whole pipeline. Pure: identical input and `now` yield an
    /// identical report.
    pub fn build(
        profile: &HouseholdProfile,
        logs: &[LogRecord],
        inventory: &[InventoryItem],
        config: &AnalyticsConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let patterns = analyze_consumption_patterns(logs, config, now);
        let waste = estimate_waste(logs, inventory, config, now);
        let sustainability = calculate_sdg_score(profile, logs, inventory, config, now);

        Self {
            generated_at: now,
            days_covered: days_covered(logs),
            sdg2_progress: sustainability.nutrition_score,
            sdg12_progress: sustainability.consumption_score,
            patterns,
            waste,
            sustainability,
        }
    }
}
