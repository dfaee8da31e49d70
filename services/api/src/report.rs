use crate::infra::{evaluation_instant, parse_date};
use chrono::NaiveDate;
use clap::Args;
use nourish_ai::analytics::{
    AnalysisReport, AnalyticsConfig, CsvLogImporter, HouseholdProfile, InventoryItem,
    RawInventoryItem,
};
use nourish_ai::error::AppError;
use nourish_ai::insights::rule_based_insights;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Consumption log export (CSV) to analyze
    #[arg(long)]
    pub(crate) logs_csv: PathBuf,
    /// Optional inventory snapshot (JSON array)
    #[arg(long)]
    pub(crate) inventory_json: Option<PathBuf>,
    /// Evaluation date, YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_analysis_report(args: AnalyzeArgs) -> Result<(), AppError> {
    let logs = CsvLogImporter::from_path(&args.logs_csv)?;
    let inventory = match &args.inventory_json {
        Some(path) => load_inventory(path)?,
        None => Vec::new(),
    };

    let now = evaluation_instant(args.today);
    let report = AnalysisReport::build(
        &HouseholdProfile::default(),
        &logs,
        &inventory,
        &AnalyticsConfig::standard(),
        now,
    );
    let insights = rule_based_insights(&report);

    println!("Consumption Analysis for {}", now.date_naive());
    println!(
        "  {} log entries over {} day(s)",
        logs.len(),
        report.days_covered
    );
    println!();

    let mut categories: Vec<_> = report.patterns.category_stats.iter().collect();
    categories.sort_by(|a, b| a.0.cmp(b.0));
    println!("Categories:");
    for (category, stats) in categories {
        println!(
            "  {:<12} {:>5.1} servings/day ({} entries)",
            category, stats.per_day, stats.count
        );
    }
    println!();

    if !report.patterns.over_consumption.is_empty() {
        println!("Over consumption:");
        for flag in &report.patterns.over_consumption {
            println!("  - {flag}");
        }
    }
    if !report.patterns.under_consumption.is_empty() {
        println!("Under consumption:");
        for flag in &report.patterns.under_consumption {
            println!("  - {flag}");
        }
    }

    if !report.patterns.waste_risk_items.is_empty() {
        println!("Waste risk:");
        for entry in &report.patterns.waste_risk_items {
            println!(
                "  {:<20} {} ({} day(s) remaining)",
                entry.item,
                entry.risk.label(),
                entry.days_remaining
            );
        }
    }
    println!();

    println!(
        "Estimated waste: {:.0} g/week (BDT {:.2}), {:.0} g/month projected (community avg {} g)",
        report.waste.weekly_grams,
        report.waste.weekly_cost,
        report.waste.monthly_projection,
        report.waste.community_average
    );
    for wasted in &report.waste.top_wasted_items {
        println!("  {:<20} {}% of waste", wasted.item, wasted.waste_percent);
    }
    println!();

    println!(
        "Sustainability: {} (nutrition {}, consumption {})",
        report.sustainability.total,
        report.sustainability.nutrition_score,
        report.sustainability.consumption_score
    );
    for improvement in &report.sustainability.improvements {
        println!(
            "  +{:<3} {}: {}",
            improvement.potential_gain, improvement.area, improvement.action
        );
    }
    println!();

    println!("Insights:");
    for line in &insights.weekly_insights {
        println!("  - {line}");
    }
    println!("Recommendations:");
    for line in &insights.recommendations {
        println!("  - {line}");
    }

    Ok(())
}

fn load_inventory(path: &PathBuf) -> Result<Vec<InventoryItem>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let rows: Vec<RawInventoryItem> = serde_json::from_str(&raw)
        .map_err(|err| io::Error::new(ErrorKind::InvalidData, err))?;
    Ok(rows.into_iter().map(RawInventoryItem::normalize).collect())
}
