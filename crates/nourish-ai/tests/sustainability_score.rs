use chrono::{DateTime, Duration, TimeZone, Utc};
use nourish_ai::analytics::{
    calculate_sdg_score, AnalyticsConfig, HouseholdProfile, InventoryItem, LogRecord,
};

fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()
}

fn score_for(
    logs: &[LogRecord],
    inventory: &[InventoryItem],
) -> nourish_ai::analytics::SustainabilityScore {
    calculate_sdg_score(
        &HouseholdProfile::default(),
        logs,
        inventory,
        &AnalyticsConfig::standard(),
        evaluation_time(),
    )
}

#[test]
fn empty_input_scores_from_documented_defaults() {
    // nutrition = 50 * 0.4 + 40 * 0.4 + 75 * 0.2 = 51
    // consumption = 75 * 0.4 + 70 * 0.35 + 70 * 0.25 = 72
    let score = score_for(&[], &[]);

    assert_eq!(score.nutrition_score, 51);
    assert_eq!(score.consumption_score, 72);
    assert_eq!(score.total, 62);
}

#[test]
fn empty_input_suggests_meal_consistency_first() {
    let score = score_for(&[], &[]);

    assert_eq!(score.improvements.len(), 3);
    assert_eq!(score.improvements[0].area, "meal consistency");
    assert_eq!(score.improvements[0].potential_gain, 12);
    assert!(score.improvements[1..]
        .iter()
        .all(|imp| imp.potential_gain == 10));
}

#[test]
fn scores_stay_in_bounds_for_dense_input() {
    let now = evaluation_time();
    let mut logs = Vec::new();
    for day in 0..7 {
        for (i, category) in ["fruits", "vegetables", "grains", "protein", "dairy"]
            .iter()
            .enumerate()
        {
            logs.push(LogRecord::new(
                format!("item-{day}-{i}"),
                *category,
                2.0,
                now - Duration::days(day),
            ));
        }
    }
    let inventory: Vec<InventoryItem> = (0..5)
        .map(|i| {
            InventoryItem::new(
                format!("stock-{i}"),
                "vegetables",
                1.0,
                Some(now.date_naive() + Duration::days(5 + i)),
            )
        })
        .collect();

    let score = score_for(&logs, &inventory);

    assert!(score.total <= 100);
    assert!(score.nutrition_score <= 100);
    assert!(score.consumption_score <= 100);
    assert!(score.improvements.len() <= 3);
}

#[test]
fn regular_diverse_logging_maxes_the_nutrition_inputs() {
    // Five logs per day across all five benchmarked categories:
    // regularity 100, diversity 100, calorie placeholder 75 -> 95.
    let now = evaluation_time();
    let mut logs = Vec::new();
    for day in 0..5 {
        for category in ["fruits", "vegetables", "grains", "protein", "dairy"] {
            logs.push(LogRecord::new("meal", category, 1.0, now - Duration::days(day)));
        }
    }
    // 5 logs/day over 5 distinct days against a target of 3 -> capped at 100.
    let score = score_for(&logs, &[]);
    assert_eq!(score.nutrition_score, 95);
}

#[test]
fn expired_stock_halves_the_waste_rate_score() {
    // 1 of 4 items expired: 100 - 25 * 2 = 50.
    // Remaining horizons average 7 days -> turnover 100.
    // consumption = 50 * 0.4 + 100 * 0.35 + 70 * 0.25 = 72.5 -> 73 rounded.
    let today = evaluation_time().date_naive();
    let inventory = vec![
        InventoryItem::new("Old milk", "dairy", 1.0, Some(today - Duration::days(2))),
        InventoryItem::new("Carrots", "vegetables", 1.0, Some(today + Duration::days(6))),
        InventoryItem::new("Apples", "fruits", 1.0, Some(today + Duration::days(7))),
        InventoryItem::new("Yogurt", "dairy", 1.0, Some(today + Duration::days(8))),
    ];

    let score = score_for(&[], &inventory);
    assert_eq!(score.consumption_score, 73);
}

#[test]
fn distant_expiries_degrade_turnover_linearly() {
    // Single horizon of 30 days: 100 - 2 * 20 = 60. Nothing expired, so the
    // waste-rate score is 100.
    // consumption = 100 * 0.4 + 60 * 0.35 + 70 * 0.25 = 78.5 -> 79.
    let today = evaluation_time().date_naive();
    let inventory = vec![InventoryItem::new(
        "Canned beans",
        "protein",
        2.0,
        Some(today + Duration::days(30)),
    )];

    let score = score_for(&[], &inventory);
    assert_eq!(score.consumption_score, 79);
}

#[test]
fn low_consumption_score_earns_a_waste_improvement() {
    // Every item expired: waste rate 0, no unexpired horizons -> turnover 70.
    let today = evaluation_time().date_naive();
    let inventory: Vec<InventoryItem> = (0..3)
        .map(|i| {
            InventoryItem::new(
                format!("spoiled-{i}"),
                "dairy",
                1.0,
                Some(today - Duration::days(1 + i)),
            )
        })
        .collect();

    let score = score_for(&[], &inventory);
    assert!(score.consumption_score < 70);
    assert!(score
        .improvements
        .iter()
        .any(|imp| imp.area == "waste reduction" && imp.potential_gain == 15));
}
