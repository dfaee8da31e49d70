use super::config::AnalyticsConfig;
use super::coverage::{aggregate_by_category, days_covered};
use super::records::{InventoryItem, LogRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Qualitative judgment that a repeatedly-logged item is spoiling unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteRiskEntry {
    pub item: String,
    pub risk: RiskLevel,
    pub days_remaining: i64,
    pub category: String,
}

/// Rank repeatedly-logged items by how close they are to spoiling.
///
/// Only items observed at least `min_observations` times qualify; one-off
/// purchases rarely represent a standing risk. An item enters the list once
/// it has been idle for `risk_attention_factor` of its perishability window.
/// The result is sorted most-urgent-first (ascending days remaining) and
/// truncated to `max_risk_entries`.
pub fn calculate_waste_risk(
    logs: &[LogRecord],
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> Vec<WasteRiskEntry> {
    struct ItemTrack {
        display_name: String,
        category: String,
        count: usize,
        last_seen: DateTime<Utc>,
    }

    let mut tracked: HashMap<String, ItemTrack> = HashMap::new();
    for log in logs {
        let Some(timestamp) = log.timestamp else {
            continue;
        };
        match tracked.entry(log.item_name.to_lowercase()) {
            Entry::Occupied(mut entry) => {
                let track = entry.get_mut();
                track.count += 1;
                if timestamp > track.last_seen {
                    track.last_seen = timestamp;
                    track.category = log.category.clone();
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(ItemTrack {
                    display_name: log.item_name.clone(),
                    category: log.category.clone(),
                    count: 1,
                    last_seen: timestamp,
                });
            }
        }
    }

    let mut entries = Vec::new();
    for track in tracked.into_values() {
        if track.count < config.min_observations {
            continue;
        }

        let days_idle = (now - track.last_seen).num_days();
        let window = config.perishability_window(&track.category);
        if (days_idle as f64) < window as f64 * config.risk_attention_factor {
            continue;
        }

        let risk = if days_idle >= window {
            RiskLevel::High
        } else if days_idle as f64 >= window as f64 * config.risk_medium_factor {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        entries.push(WasteRiskEntry {
            item: track.display_name,
            risk,
            days_remaining: (window - days_idle).max(0),
            category: track.category,
        });
    }

    entries.sort_by(|a, b| {
        a.days_remaining
            .cmp(&b.days_remaining)
            .then_with(|| a.item.cmp(&b.item))
    });
    entries.truncate(config.max_risk_entries);
    entries
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WastedItem {
    pub item: String,
    pub waste_percent: u32,
}

/// Weekly waste projection. This is an estimate, not a measurement: it
/// combines stock that has already expired with consumption projected to
/// exceed the recommended maxima, and should be presented to users as such.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteEstimate {
    pub weekly_grams: f64,
    pub weekly_cost: f64,
    pub monthly_projection: f64,
    pub community_average: u32,
    pub top_wasted_items: Vec<WastedItem>,
}

pub fn estimate_waste(
    logs: &[LogRecord],
    inventory: &[InventoryItem],
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> WasteEstimate {
    let today = now.date_naive();
    let mut weekly_grams = 0.0;
    let mut weekly_cost = 0.0;
    let mut wasted_by_item: HashMap<String, f64> = HashMap::new();

    for item in inventory {
        let Some(expiry) = item.expiry_date else {
            continue;
        };
        if expiry >= today {
            continue;
        }
        let grams = item.quantity.max(0.0) * config.grams_per_unit;
        weekly_grams += grams;
        weekly_cost += grams * config.waste_cost(&item.category);
        *wasted_by_item.entry(item.item_name.clone()).or_default() += grams;
    }

    let days = days_covered(logs);
    let stats = aggregate_by_category(logs, days);
    for (category, stat) in &stats {
        let Some(range) = config.benchmark(category) else {
            continue;
        };
        if stat.per_day > range.max_per_day * config.over_consumption_factor {
            let excess_grams = (stat.per_day - range.max_per_day)
                * config.grams_per_serving
                * 7.0
                * config.excess_waste_share;
            weekly_grams += excess_grams;
            weekly_cost += excess_grams * config.waste_cost(category);
        }
    }

    let mut top_wasted_items: Vec<WastedItem> = wasted_by_item
        .into_iter()
        .map(|(item, grams)| WastedItem {
            item,
            waste_percent: if weekly_grams > 0.0 {
                (grams / weekly_grams * 100.0).round() as u32
            } else {
                0
            },
        })
        .collect();
    top_wasted_items.sort_by(|a, b| {
        b.waste_percent
            .cmp(&a.waste_percent)
            .then_with(|| a.item.cmp(&b.item))
    });
    top_wasted_items.truncate(config.max_wasted_items);

    WasteEstimate {
        weekly_grams,
        weekly_cost,
        monthly_projection: (weekly_grams * config.weeks_per_month).round(),
        community_average: config.community_average_grams,
        top_wasted_items,
    }
}
