use chrono::{DateTime, TimeZone, Utc};
use nourish_ai::analytics::{
    AnalysisReport, AnalyticsConfig, CsvLogImporter, HouseholdProfile, InventoryItem,
    RawInventoryItem,
};
use nourish_ai::insights::{InsightService, InsightSource, NullLanguageModel};

fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()
}

const EXPORT: &str = "item_name,category,quantity,created_at\n\
                      Milk,dairy,1,2026-08-18T08:00:00Z\n\
                      Milk,dairy,1,2026-08-16T08:00:00Z\n\
                      Milk,dairy,1,2026-08-15T08:00:00Z\n\
                      Spinach,vegetables,2,2026-08-19T19:00:00Z\n\
                      Rice,grains,1,2026-08-20T12:00:00Z\n";

#[test]
fn csv_export_feeds_the_full_pipeline() {
    let logs = CsvLogImporter::from_reader(EXPORT.as_bytes()).expect("export parses");
    assert_eq!(logs.len(), 5);

    let inventory = vec![InventoryItem::new(
        "Old yogurt",
        "dairy",
        1.0,
        Some(evaluation_time().date_naive() - chrono::Duration::days(1)),
    )];

    let report = AnalysisReport::build(
        &HouseholdProfile::default(),
        &logs,
        &inventory,
        &AnalyticsConfig::standard(),
        evaluation_time(),
    );

    assert_eq!(report.days_covered, 6, "Aug 15 08:00 through Aug 20 12:00");
    assert_eq!(report.waste.weekly_grams, 100.0);
    assert_eq!(report.sdg2_progress, report.sustainability.nutrition_score);
    assert_eq!(report.sdg12_progress, report.sustainability.consumption_score);
}

#[test]
fn report_building_is_idempotent() {
    let logs = CsvLogImporter::from_reader(EXPORT.as_bytes()).expect("export parses");
    let config = AnalyticsConfig::standard();
    let now = evaluation_time();

    let first = AnalysisReport::build(&HouseholdProfile::default(), &logs, &[], &config, now);
    let second = AnalysisReport::build(&HouseholdProfile::default(), &logs, &[], &config, now);
    assert_eq!(first, second);
}

#[test]
fn modelless_insight_generation_completes_with_fallback() {
    let logs = CsvLogImporter::from_reader(EXPORT.as_bytes()).expect("export parses");
    let report = AnalysisReport::build(
        &HouseholdProfile::default(),
        &logs,
        &[],
        &AnalyticsConfig::standard(),
        evaluation_time(),
    );

    let service = InsightService::new(NullLanguageModel);
    let insights = service.generate(&HouseholdProfile::default(), &report);

    assert_eq!(insights.source, InsightSource::Fallback);
    assert!(!insights.bundle.weekly_insights.is_empty());
    assert!(!insights.bundle.recommendations.is_empty());
}

#[test]
fn raw_inventory_shapes_normalize_before_analysis() {
    let raw: Vec<RawInventoryItem> = serde_json::from_str(
        r#"[{"name": "Paneer", "category": "Dairy", "quantity": "2", "expiry_date": "2026-08-10", "cost": 120}]"#,
    )
    .expect("raw inventory parses");
    let inventory: Vec<InventoryItem> = raw.into_iter().map(RawInventoryItem::normalize).collect();

    assert_eq!(inventory[0].category, "dairy");
    assert_eq!(inventory[0].quantity, 2.0);
    assert_eq!(inventory[0].cost, Some(120.0));

    let report = AnalysisReport::build(
        &HouseholdProfile::default(),
        &[],
        &inventory,
        &AnalyticsConfig::standard(),
        evaluation_time(),
    );
    assert_eq!(report.waste.weekly_grams, 200.0, "expired on Aug 10");
}
