use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recommended daily serving range for a benchmarked food category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServingRange {
    pub min_per_day: f64,
    pub max_per_day: f64,
}

/// Rubric configuration for the consumption-analytics engine.
///
/// Every threshold, weight, and placeholder the heuristics use lives here so
/// the published numbers can be audited and tuned without touching the
/// algorithms. The defaults in [`AnalyticsConfig::standard`] reproduce the
/// dashboard's output exactly; changing them changes what users see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Min/max recommended servings per day, keyed by category.
    pub benchmarks: HashMap<String, ServingRange>,
    /// Assumed shelf life in days, keyed by category.
    pub perishability_days: HashMap<String, i64>,
    pub default_perishability_days: i64,
    /// Estimated cost per gram of waste, keyed by category.
    pub waste_cost_per_gram: HashMap<String, f64>,
    pub default_waste_cost_per_gram: f64,

    /// A category is over-consumed above `max * over_consumption_factor`.
    pub over_consumption_factor: f64,
    /// A category is under-consumed below `min * under_consumption_factor`.
    pub under_consumption_factor: f64,

    /// Items enter the risk list once idle for this share of their window.
    pub risk_attention_factor: f64,
    /// Medium risk begins at this share of the perishability window.
    pub risk_medium_factor: f64,
    /// Items logged fewer times than this never enter the risk list.
    pub min_observations: usize,
    pub max_risk_entries: usize,

    /// Grams assumed per inventory quantity unit.
    pub grams_per_unit: f64,
    /// Grams assumed per benchmark serving.
    pub grams_per_serving: f64,
    /// Share of excess consumption assumed to end up as waste.
    pub excess_waste_share: f64,
    pub weeks_per_month: f64,
    /// Comparison baseline only; no population data backs it.
    pub community_average_grams: u32,
    pub max_wasted_items: usize,

    /// Stub until calorie tracking exists; not a measurement.
    pub calorie_adequacy_placeholder: f64,
    /// Stub until spend tracking exists; not a measurement.
    pub budget_efficiency_placeholder: f64,
    pub meals_per_day_target: f64,
    pub default_meal_regularity: f64,
    pub default_diversity: f64,
    pub default_waste_rate: f64,
    pub default_turnover: f64,

    pub meal_regularity_weight: f64,
    pub diversity_weight: f64,
    pub calorie_weight: f64,
    pub waste_rate_weight: f64,
    pub turnover_weight: f64,
    pub budget_weight: f64,

    /// Average days-until-expiry band that scores a full turnover mark.
    pub turnover_target_min_days: f64,
    pub turnover_target_max_days: f64,
    pub turnover_floor: f64,

    /// Categories below `min * improvement_intake_factor` earn an improvement.
    pub improvement_intake_factor: f64,
    /// Sub-scores below this trigger their dedicated improvement entry.
    pub improvement_score_threshold: f64,
    pub category_improvement_gain: u8,
    pub waste_improvement_gain: u8,
    pub consistency_improvement_gain: u8,
    pub max_improvements: usize,
}

impl AnalyticsConfig {
    pub fn standard() -> Self {
        let benchmarks = HashMap::from([
            (
                "fruits".to_string(),
                ServingRange {
                    min_per_day: 2.0,
                    max_per_day: 4.0,
                },
            ),
            (
                "vegetables".to_string(),
                ServingRange {
                    min_per_day: 3.0,
                    max_per_day: 5.0,
                },
            ),
            (
                "grains".to_string(),
                ServingRange {
                    min_per_day: 6.0,
                    max_per_day: 11.0,
                },
            ),
            (
                "protein".to_string(),
                ServingRange {
                    min_per_day: 2.0,
                    max_per_day: 3.0,
                },
            ),
            (
                "dairy".to_string(),
                ServingRange {
                    min_per_day: 2.0,
                    max_per_day: 3.0,
                },
            ),
        ]);

        let perishability_days = HashMap::from([
            ("seafood".to_string(), 2),
            ("meat".to_string(), 3),
            ("vegetables".to_string(), 4),
            ("bakery".to_string(), 4),
            ("fruits".to_string(), 5),
            ("dairy".to_string(), 5),
            ("grains".to_string(), 30),
        ]);

        let waste_cost_per_gram = HashMap::from([
            ("grains".to_string(), 0.05),
            ("vegetables".to_string(), 0.08),
            ("fruits".to_string(), 0.10),
            ("dairy".to_string(), 0.20),
            ("meat".to_string(), 0.45),
            ("seafood".to_string(), 0.55),
        ]);

        Self {
            benchmarks,
            perishability_days,
            default_perishability_days: 7,
            waste_cost_per_gram,
            default_waste_cost_per_gram: 0.15,
            over_consumption_factor: 1.2,
            under_consumption_factor: 0.7,
            risk_attention_factor: 0.6,
            risk_medium_factor: 0.8,
            min_observations: 3,
            max_risk_entries: 6,
            grams_per_unit: 100.0,
            grams_per_serving: 150.0,
            excess_waste_share: 0.25,
            weeks_per_month: 4.3,
            community_average_grams: 800,
            max_wasted_items: 5,
            calorie_adequacy_placeholder: 75.0,
            budget_efficiency_placeholder: 70.0,
            meals_per_day_target: 3.0,
            default_meal_regularity: 50.0,
            default_diversity: 40.0,
            default_waste_rate: 75.0,
            default_turnover: 70.0,
            meal_regularity_weight: 0.4,
            diversity_weight: 0.4,
            calorie_weight: 0.2,
            waste_rate_weight: 0.4,
            turnover_weight: 0.35,
            budget_weight: 0.25,
            turnover_target_min_days: 5.0,
            turnover_target_max_days: 10.0,
            turnover_floor: 50.0,
            improvement_intake_factor: 0.8,
            improvement_score_threshold: 70.0,
            category_improvement_gain: 10,
            waste_improvement_gain: 15,
            consistency_improvement_gain: 12,
            max_improvements: 3,
        }
    }

    /// Benchmark lookup tolerating singular/plural category spellings, which
    /// both occur in stored logs ("vegetable" and "vegetables").
    pub fn benchmark_entry(&self, category: &str) -> Option<(&str, ServingRange)> {
        if let Some((key, range)) = self.benchmarks.get_key_value(category) {
            return Some((key.as_str(), *range));
        }
        if let Some(singular) = category.strip_suffix('s') {
            if let Some((key, range)) = self.benchmarks.get_key_value(singular) {
                return Some((key.as_str(), *range));
            }
        }
        self.benchmarks
            .get_key_value(&format!("{category}s"))
            .map(|(key, range)| (key.as_str(), *range))
    }

    pub fn benchmark(&self, category: &str) -> Option<ServingRange> {
        self.benchmark_entry(category).map(|(_, range)| range)
    }

    pub fn perishability_window(&self, category: &str) -> i64 {
        lookup(&self.perishability_days, category)
            .unwrap_or(self.default_perishability_days)
    }

    pub fn waste_cost(&self, category: &str) -> f64 {
        lookup(&self.waste_cost_per_gram, category).unwrap_or(self.default_waste_cost_per_gram)
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn lookup<V: Copy>(table: &HashMap<String, V>, category: &str) -> Option<V> {
    if let Some(value) = table.get(category) {
        return Some(*value);
    }
    if let Some(singular) = category.strip_suffix('s') {
        if let Some(value) = table.get(singular) {
            return Some(*value);
        }
    }
    table.get(&format!("{category}s")).copied()
}
