use super::records::LogRecord;
use serde::Serialize;
use std::collections::HashMap;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of calendar days a batch of logs spans, floored at 1 so downstream
/// rate math never divides by zero. Records without a parseable timestamp are
/// skipped; a batch with none at all also reports 1.
pub fn days_covered(logs: &[LogRecord]) -> i64 {
    let mut timestamps = logs.iter().filter_map(|log| log.timestamp);
    let Some(first) = timestamps.next() else {
        return 1;
    };
    let (earliest, latest) = timestamps.fold((first, first), |(lo, hi), ts| {
        (lo.min(ts), hi.max(ts))
    });

    let span_seconds = (latest - earliest).num_seconds().max(0) as f64;
    ((span_seconds / SECONDS_PER_DAY).ceil() as i64).max(1)
}

/// Per-category aggregate over one batch of logs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStats {
    pub count: usize,
    pub total: f64,
    pub per_day: f64,
    pub avg_quantity: f64,
}

/// Group logs by lower-cased category and compute rates against `days`.
/// Iteration order of the returned map is arbitrary; callers that need a
/// stable order must sort.
pub fn aggregate_by_category(logs: &[LogRecord], days: i64) -> HashMap<String, CategoryStats> {
    let days = days.max(1) as f64;
    let mut grouped: HashMap<String, (usize, f64)> = HashMap::new();
    for log in logs {
        let entry = grouped.entry(log.category.to_lowercase()).or_default();
        entry.0 += 1;
        entry.1 += log.quantity;
    }

    grouped
        .into_iter()
        .map(|(category, (count, total))| {
            (
                category,
                CategoryStats {
                    count,
                    total,
                    per_day: count as f64 / days,
                    avg_quantity: total / count as f64,
                },
            )
        })
        .collect()
}
