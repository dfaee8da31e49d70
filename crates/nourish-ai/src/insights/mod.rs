//! Natural-language insight generation with a deterministic fallback.
//!
//! The hosted language model is an optional collaborator behind the
//! [`LanguageModel`] seam. Whenever it is unavailable or returns something
//! unparseable, [`InsightService`] answers with the rule-based summary
//! instead; callers always receive a complete result, never an error.

mod fallback;

pub use fallback::rule_based_insights;

use crate::analytics::{AnalysisReport, HouseholdProfile};
use serde::{Deserialize, Serialize};

/// Seam for the hosted language-model collaborator.
pub trait LanguageModel: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String, LanguageModelError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum LanguageModelError {
    #[error("language model not configured")]
    Unavailable,
    #[error("language model request failed: {0}")]
    Transport(String),
}

#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error(transparent)]
    Model(#[from] LanguageModelError),
    #[error("model reply was not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Model that is never available. Deployments without an API key use it and
/// always receive the fallback summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLanguageModel;

impl LanguageModel for NullLanguageModel {
    fn complete(&self, _request: &CompletionRequest) -> Result<String, LanguageModelError> {
        Err(LanguageModelError::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    Model,
    Fallback,
}

/// The JSON contract the model is asked to fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightBundle {
    #[serde(default)]
    pub weekly_insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedInsights {
    pub source: InsightSource,
    #[serde(flatten)]
    pub bundle: InsightBundle,
}

pub struct InsightService<L> {
    model: L,
}

impl<L: LanguageModel> InsightService<L> {
    pub fn new(model: L) -> Self {
        Self { model }
    }

    /// Generate insights for a finished report. Never fails: any model error
    /// or malformed reply falls back to [`rule_based_insights`].
    pub fn generate(&self, profile: &HouseholdProfile, report: &AnalysisReport) -> GeneratedInsights {
        match self.try_model(profile, report) {
            Ok(bundle) => GeneratedInsights {
                source: InsightSource::Model,
                bundle,
            },
            Err(_) => GeneratedInsights {
                source: InsightSource::Fallback,
                bundle: rule_based_insights(report),
            },
        }
    }

    fn try_model(
        &self,
        profile: &HouseholdProfile,
        report: &AnalysisReport,
    ) -> Result<InsightBundle, InsightError> {
        let request = build_request(profile, report);
        let reply = self.model.complete(&request)?;
        let bundle = serde_json::from_str(strip_code_fences(&reply).trim())?;
        Ok(bundle)
    }
}

fn build_request(profile: &HouseholdProfile, report: &AnalysisReport) -> CompletionRequest {
    let profile_json = serde_json::to_string(profile).unwrap_or_else(|_| "{}".to_string());
    let report_json = serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string());

    CompletionRequest {
        system: "You are a food consumption analyst. Return only valid JSON.".to_string(),
        prompt: format!(
            "Household profile: {profile_json}\n\
             Analysis report: {report_json}\n\n\
             Return ONLY valid JSON with this structure:\n\
             {{\"weekly_insights\": [\"insight\"], \"recommendations\": [\"action\"]}}"
        ),
        temperature: 0.7,
    }
}

/// Models tend to wrap JSON replies in markdown code fences.
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest)
}
