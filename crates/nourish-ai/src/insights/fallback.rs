use super::InsightBundle;
use crate::analytics::{AnalysisReport, RiskLevel};

/// Deterministic summary of a finished report, used whenever the language
/// model cannot answer. The output is a final answer in its own right, not an
/// error state.
pub fn rule_based_insights(report: &AnalysisReport) -> InsightBundle {
    let mut weekly_insights = Vec::new();
    let mut recommendations = Vec::new();

    if report.patterns.category_stats.is_empty() {
        weekly_insights.push("No consumption logged yet; scores reflect defaults".to_string());
    } else {
        weekly_insights.push(format!(
            "{} categor{} logged across {} day(s)",
            report.patterns.category_stats.len(),
            if report.patterns.category_stats.len() == 1 {
                "y"
            } else {
                "ies"
            },
            report.days_covered
        ));
    }

    for flag in &report.patterns.over_consumption {
        weekly_insights.push(format!("Over-consumption: {flag}"));
    }
    for flag in &report.patterns.under_consumption {
        weekly_insights.push(format!("Under-consumption: {flag}"));
    }

    if report.waste.weekly_grams > 0.0 {
        weekly_insights.push(format!(
            "Estimated {:.0} g of waste this week (community average {} g)",
            report.waste.weekly_grams, report.waste.community_average
        ));
    }
    weekly_insights.push(format!(
        "Sustainability score {} (nutrition {}, responsible consumption {})",
        report.sustainability.total,
        report.sustainability.nutrition_score,
        report.sustainability.consumption_score
    ));

    for entry in &report.patterns.waste_risk_items {
        let urgency = match entry.risk {
            RiskLevel::High => "today".to_string(),
            _ => format!("within {} day(s)", entry.days_remaining),
        };
        recommendations.push(format!("Use {} {}; it is likely spoiling", entry.item, urgency));
    }

    if report.waste.weekly_grams > f64::from(report.waste.community_average) {
        recommendations.push(
            "Weekly waste is above the community average; plan smaller purchases".to_string(),
        );
    }

    for improvement in &report.sustainability.improvements {
        recommendations.push(improvement.action.clone());
    }

    if recommendations.is_empty() {
        recommendations.push("Keep logging meals to sharpen future analysis".to_string());
    }

    InsightBundle {
        weekly_insights,
        recommendations,
    }
}
