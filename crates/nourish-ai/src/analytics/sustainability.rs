use super::config::AnalyticsConfig;
use super::coverage::{aggregate_by_category, days_covered};
use super::records::{HouseholdProfile, InventoryItem, LogRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Slope applied per day the average expiry horizon falls short of the band.
const BELOW_BAND_SLOPE: f64 = 10.0;
/// Slope applied per day the average expiry horizon overshoots the band.
const ABOVE_BAND_SLOPE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Improvement {
    pub area: String,
    pub action: String,
    pub potential_gain: u8,
}

/// Composite 0-100 sustainability metric with its two sub-scores.
///
/// The rubric is heuristic, not a certified methodology: weights and
/// placeholder constants live on [`AnalyticsConfig`] and define the
/// reproducible output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SustainabilityScore {
    pub total: u8,
    pub nutrition_score: u8,
    pub consumption_score: u8,
    pub improvements: Vec<Improvement>,
}

pub fn calculate_sdg_score(
    profile: &HouseholdProfile,
    logs: &[LogRecord],
    inventory: &[InventoryItem],
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> SustainabilityScore {
    let today = now.date_naive();

    let nutrition = config.meal_regularity_weight * meal_regularity(logs, config)
        + config.diversity_weight * nutrition_diversity(logs, config)
        + config.calorie_weight * config.calorie_adequacy_placeholder;

    let consumption = config.waste_rate_weight * waste_rate_score(inventory, config, today)
        + config.turnover_weight * turnover_score(inventory, config, today)
        + config.budget_weight * budget_efficiency_score(profile, config);

    let improvements = build_improvements(logs, config, nutrition, consumption);

    SustainabilityScore {
        total: clamp_score((nutrition + consumption) / 2.0),
        nutrition_score: clamp_score(nutrition),
        consumption_score: clamp_score(consumption),
        improvements,
    }
}

/// How close the household comes to logging three meals a day.
fn meal_regularity(logs: &[LogRecord], config: &AnalyticsConfig) -> f64 {
    let unique_days: HashSet<NaiveDate> = logs
        .iter()
        .filter_map(|log| log.timestamp.map(|ts| ts.date_naive()))
        .collect();
    if logs.is_empty() || unique_days.is_empty() {
        return config.default_meal_regularity;
    }

    let logs_per_day = logs.len() as f64 / unique_days.len() as f64;
    ((logs_per_day / config.meals_per_day_target) * 100.0)
        .round()
        .min(100.0)
}

/// Share of the benchmarked categories that appear in the logs at all.
fn nutrition_diversity(logs: &[LogRecord], config: &AnalyticsConfig) -> f64 {
    if logs.is_empty() {
        return config.default_diversity;
    }

    let distinct: HashSet<&str> = logs.iter().map(|log| log.category.as_str()).collect();
    ((distinct.len() as f64 / config.benchmarks.len() as f64) * 100.0)
        .round()
        .min(100.0)
}

/// Penalizes the share of inventory that has already expired, twice over.
fn waste_rate_score(inventory: &[InventoryItem], config: &AnalyticsConfig, today: NaiveDate) -> f64 {
    if inventory.is_empty() {
        return config.default_waste_rate;
    }

    let expired = inventory
        .iter()
        .filter(|item| item.expiry_date.is_some_and(|expiry| expiry < today))
        .count();
    let expired_percent = expired as f64 / inventory.len() as f64 * 100.0;
    (100.0 - expired_percent * 2.0).round().clamp(0.0, 100.0)
}

/// Scores how quickly stock turns over: an average expiry horizon inside the
/// target band earns full marks, degrading linearly outside it.
fn turnover_score(inventory: &[InventoryItem], config: &AnalyticsConfig, today: NaiveDate) -> f64 {
    let horizons: Vec<i64> = inventory
        .iter()
        .filter_map(|item| item.expiry_date)
        .filter(|expiry| *expiry >= today)
        .map(|expiry| (expiry - today).num_days())
        .collect();
    if horizons.is_empty() {
        return config.default_turnover;
    }

    let avg = horizons.iter().sum::<i64>() as f64 / horizons.len() as f64;
    let score = if avg < config.turnover_target_min_days {
        100.0 - BELOW_BAND_SLOPE * (config.turnover_target_min_days - avg)
    } else if avg > config.turnover_target_max_days {
        100.0 - ABOVE_BAND_SLOPE * (avg - config.turnover_target_max_days)
    } else {
        100.0
    };
    score.max(config.turnover_floor)
}

/// Stubbed until spend tracking exists: returns the placeholder regardless of
/// the profile's budget fields.
fn budget_efficiency_score(_profile: &HouseholdProfile, config: &AnalyticsConfig) -> f64 {
    config.budget_efficiency_placeholder
}

fn build_improvements(
    logs: &[LogRecord],
    config: &AnalyticsConfig,
    nutrition: f64,
    consumption: f64,
) -> Vec<Improvement> {
    let days = days_covered(logs);
    let stats = aggregate_by_category(logs, days);

    let mut intake: HashMap<String, f64> = config
        .benchmarks
        .keys()
        .map(|key| (key.clone(), 0.0))
        .collect();
    for (category, stat) in &stats {
        if let Some((key, _)) = config.benchmark_entry(category) {
            *intake.entry(key.to_string()).or_default() += stat.per_day;
        }
    }

    let mut improvements = Vec::new();
    let mut categories: Vec<&String> = config.benchmarks.keys().collect();
    categories.sort();
    for category in categories {
        let range = config.benchmarks[category];
        let per_day = intake.get(category).copied().unwrap_or(0.0);
        if per_day < range.min_per_day * config.improvement_intake_factor {
            improvements.push(Improvement {
                area: category.clone(),
                action: format!("Add more {category} to daily meals"),
                potential_gain: config.category_improvement_gain,
            });
        }
    }

    if consumption < config.improvement_score_threshold {
        improvements.push(Improvement {
            area: "waste reduction".to_string(),
            action: "Use expiring stock first and log leftovers before they spoil".to_string(),
            potential_gain: config.waste_improvement_gain,
        });
    }
    if nutrition < config.improvement_score_threshold {
        improvements.push(Improvement {
            area: "meal consistency".to_string(),
            action: "Log three meals a day to keep intake steady".to_string(),
            potential_gain: config.consistency_improvement_gain,
        });
    }

    improvements.sort_by(|a, b| {
        b.potential_gain
            .cmp(&a.potential_gain)
            .then_with(|| a.area.cmp(&b.area))
    });
    improvements.truncate(config.max_improvements);
    improvements
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
