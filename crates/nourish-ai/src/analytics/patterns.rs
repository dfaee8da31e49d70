use super::config::AnalyticsConfig;
use super::coverage::{aggregate_by_category, days_covered, CategoryStats};
use super::records::LogRecord;
use super::waste::{calculate_waste_risk, WasteRiskEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Outcome of one consumption-pattern analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub over_consumption: Vec<String>,
    pub under_consumption: Vec<String>,
    pub waste_risk_items: Vec<WasteRiskEntry>,
    pub category_stats: HashMap<String, CategoryStats>,
}

/// Compare aggregated consumption rates against the category benchmarks.
///
/// A category is flagged over-consumed above `max * over_consumption_factor`
/// and under-consumed below `min * under_consumption_factor`; since min < max
/// the two flags are mutually exclusive. Unbenchmarked categories are
/// aggregated but never flagged. Empty input short-circuits to the all-empty
/// result.
pub fn analyze_consumption_patterns(
    logs: &[LogRecord],
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> AnalysisResult {
    if logs.is_empty() {
        return AnalysisResult::default();
    }

    let days = days_covered(logs);
    let category_stats = aggregate_by_category(logs, days);

    let mut over_consumption = Vec::new();
    let mut under_consumption = Vec::new();
    for (category, stats) in &category_stats {
        let Some(range) = config.benchmark(category) else {
            continue;
        };

        if stats.per_day > range.max_per_day * config.over_consumption_factor {
            let percent_over = ((stats.per_day / range.max_per_day - 1.0) * 100.0).round();
            over_consumption.push(format!(
                "{category}: {:.1} servings/day, {percent_over:.0}% above the recommended maximum",
                stats.per_day
            ));
        } else if stats.per_day < range.min_per_day * config.under_consumption_factor {
            let percent_under = ((1.0 - stats.per_day / range.min_per_day) * 100.0).round();
            under_consumption.push(format!(
                "{category}: {:.1} servings/day, {percent_under:.0}% below the recommended minimum",
                stats.per_day
            ));
        }
    }

    // Map iteration order is arbitrary; sort so identical input yields
    // identical output.
    over_consumption.sort();
    under_consumption.sort();

    AnalysisResult {
        over_consumption,
        under_consumption,
        waste_risk_items: calculate_waste_risk(logs, config, now),
        category_stats,
    }
}
