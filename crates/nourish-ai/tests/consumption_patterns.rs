use chrono::{DateTime, Duration, TimeZone, Utc};
use nourish_ai::analytics::{analyze_consumption_patterns, AnalyticsConfig, LogRecord};

fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()
}

fn logs_spread(category: &str, count: usize, span_days: i64) -> Vec<LogRecord> {
    let now = evaluation_time();
    (0..count)
        .map(|i| {
            let offset = if count > 1 {
                span_days * i as i64 / (count as i64 - 1)
            } else {
                0
            };
            LogRecord::new(
                format!("item-{i}"),
                category,
                1.0,
                now - Duration::days(span_days) + Duration::days(offset),
            )
        })
        .collect()
}

#[test]
fn empty_logs_short_circuit() {
    let result =
        analyze_consumption_patterns(&[], &AnalyticsConfig::standard(), evaluation_time());
    assert!(result.over_consumption.is_empty());
    assert!(result.under_consumption.is_empty());
    assert!(result.waste_risk_items.is_empty());
    assert!(result.category_stats.is_empty());
}

#[test]
fn vegetables_at_benchmark_maximum_are_not_flagged() {
    // 10 records over 2 days: 5/day sits inside [3 * 0.7, 5 * 1.2].
    let logs = logs_spread("vegetable", 10, 2);
    let result =
        analyze_consumption_patterns(&logs, &AnalyticsConfig::standard(), evaluation_time());

    let stats = result
        .category_stats
        .get("vegetable")
        .expect("vegetable stats aggregated");
    assert_eq!(stats.per_day, 5.0);
    assert!(result.over_consumption.is_empty());
    assert!(result.under_consumption.is_empty());
}

#[test]
fn heavy_dairy_intake_is_flagged_over() {
    // 20 records over 2 days: 10/day against a maximum of 3.
    let logs = logs_spread("dairy", 20, 2);
    let result =
        analyze_consumption_patterns(&logs, &AnalyticsConfig::standard(), evaluation_time());

    assert_eq!(result.over_consumption.len(), 1);
    let flag = &result.over_consumption[0];
    assert!(flag.contains("dairy"), "flag names the category: {flag}");
    assert!(flag.contains("10.0"), "flag carries the rate: {flag}");
    assert!(flag.contains("233%"), "round((10/3 - 1) * 100) = 233: {flag}");
    assert!(result.under_consumption.is_empty());
}

#[test]
fn sparse_fruit_intake_is_flagged_under() {
    // One record: 1/day against a minimum of 2 -> 50% under.
    let logs = logs_spread("fruits", 1, 0);
    let result =
        analyze_consumption_patterns(&logs, &AnalyticsConfig::standard(), evaluation_time());

    assert_eq!(result.under_consumption.len(), 1);
    assert!(result.under_consumption[0].contains("50%"));
    assert!(result.over_consumption.is_empty());
}

#[test]
fn no_category_appears_in_both_lists() {
    let mut logs = logs_spread("dairy", 20, 2);
    logs.extend(logs_spread("fruits", 1, 0));
    logs.extend(logs_spread("snacks", 12, 2));
    let result =
        analyze_consumption_patterns(&logs, &AnalyticsConfig::standard(), evaluation_time());

    for over in &result.over_consumption {
        let category = over.split(':').next().unwrap();
        assert!(
            !result
                .under_consumption
                .iter()
                .any(|under| under.starts_with(category)),
            "{category} flagged both ways"
        );
    }
}

#[test]
fn unbenchmarked_categories_are_aggregated_but_never_flagged() {
    let logs = logs_spread("snacks", 30, 2);
    let result =
        analyze_consumption_patterns(&logs, &AnalyticsConfig::standard(), evaluation_time());

    assert!(result.category_stats.contains_key("snacks"));
    assert!(result.over_consumption.is_empty());
    assert!(result.under_consumption.is_empty());
}

#[test]
fn analysis_is_idempotent() {
    let mut logs = logs_spread("dairy", 20, 2);
    logs.extend(logs_spread("vegetables", 4, 3));
    let config = AnalyticsConfig::standard();
    let now = evaluation_time();

    let first = analyze_consumption_patterns(&logs, &config, now);
    let second = analyze_consumption_patterns(&logs, &config, now);
    assert_eq!(first, second);
}
