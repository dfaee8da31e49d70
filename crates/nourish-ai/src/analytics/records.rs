use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Display name assigned when a record arrives without one.
pub const UNKNOWN_ITEM: &str = "Unknown";
/// Category assigned when a record arrives without one.
pub const DEFAULT_CATEGORY: &str = "other";

/// One consumption event, already normalized: category lower-cased, quantity
/// defaulted, timestamp parsed. `timestamp == None` marks a record whose
/// creation time could not be parsed; such records still count toward
/// aggregation but are excluded from day-span and risk math.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl LogRecord {
    pub fn new(
        item_name: impl Into<String>,
        category: impl Into<String>,
        quantity: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            category: normalize_category(Some(&category.into())),
            quantity,
            timestamp: Some(timestamp),
        }
    }
}

/// One tracked stock unit. `expiry_date == None` means non-expiring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryItem {
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub expiry_date: Option<NaiveDate>,
    pub cost: Option<f64>,
}

impl InventoryItem {
    pub fn new(
        item_name: impl Into<String>,
        category: impl Into<String>,
        quantity: f64,
        expiry_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            category: normalize_category(Some(&category.into())),
            quantity: quantity.max(0.0),
            expiry_date,
            cost: None,
        }
    }
}

/// Household profile fields the analytics and prompt layers read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    #[serde(default)]
    pub household_size: Option<u32>,
    #[serde(default)]
    pub budget_amount: Option<f64>,
    #[serde(default)]
    pub budget_type: Option<String>,
    #[serde(default)]
    pub dietary_preference: Option<String>,
}

/// Wire shape of a consumption log as the hosted store returns it. Field
/// names drifted across schema revisions, so every alias is accepted here and
/// coalesced into [`LogRecord`] before any analytics run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLogRecord {
    #[serde(default, alias = "food_name", alias = "name")]
    pub item_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub quantity: Option<f64>,
    #[serde(default, alias = "date")]
    pub created_at: Option<String>,
}

impl RawLogRecord {
    pub fn normalize(self) -> LogRecord {
        let item_name = self
            .item_name
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| UNKNOWN_ITEM.to_string());
        let quantity = match self.quantity {
            Some(value) if value.is_finite() && value > 0.0 => value,
            _ => 1.0,
        };
        let timestamp = self.created_at.as_deref().and_then(parse_timestamp);

        LogRecord {
            item_name,
            category: normalize_category(self.category.as_deref()),
            quantity,
            timestamp,
        }
    }

    pub fn is_blank(&self) -> bool {
        fn missing(value: &Option<String>) -> bool {
            value.as_deref().map_or(true, |raw| raw.trim().is_empty())
        }

        missing(&self.item_name)
            && missing(&self.category)
            && self.quantity.is_none()
            && missing(&self.created_at)
    }
}

/// Wire shape of an inventory row from the hosted store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInventoryItem {
    #[serde(default, alias = "name")]
    pub item_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub cost: Option<f64>,
}

impl RawInventoryItem {
    pub fn normalize(self) -> InventoryItem {
        let item_name = self
            .item_name
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| UNKNOWN_ITEM.to_string());
        let quantity = match self.quantity {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            _ => 0.0,
        };
        let expiry_date = self.expiry_date.as_deref().and_then(parse_date);
        let cost = self.cost.filter(|value| value.is_finite() && *value >= 0.0);

        InventoryItem {
            item_name,
            category: normalize_category(self.category.as_deref()),
            quantity,
            expiry_date,
            cost,
        }
    }
}

fn normalize_category(raw: Option<&str>) -> String {
    match raw {
        Some(category) if !category.trim().is_empty() => category.trim().to_lowercase(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

/// Timestamps arrive as RFC 3339, `YYYY-MM-DD HH:MM:SS`, or bare dates.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|parsed| parsed.date_naive())
}

/// Accepts numbers or numeric strings; anything else becomes `None` so the
/// documented defaults apply instead of failing the whole record.
fn deserialize_loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Loose>::deserialize(deserializer).ok().flatten() {
        Some(Loose::Number(value)) => Some(value),
        Some(Loose::Text(raw)) => raw.trim().parse::<f64>().ok(),
        None => None,
    })
}
