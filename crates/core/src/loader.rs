//! Document loader with per-record validation.
//!
//! Parses the marketing document in two stages: the outer `campaigns` array
//! first, then each campaign and each breakdown element individually, so one
//! malformed record is skipped and reported instead of failing the load.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{LensError, LensResult};
use crate::types::{
    Campaign, DemographicBreakdown, DeviceBreakdown, Performance, RegionBreakdown, WeekBreakdown,
};

/// A record dropped during loading and the reason it was rejected.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    pub context: String,
    pub reason: String,
}

/// Outcome of a document load: surviving campaigns plus the skip list.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub campaigns: Vec<Campaign>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse a raw JSON document into campaigns, skipping malformed records.
///
/// A document without a `campaigns` array is an error; everything below
/// that level degrades to per-record skips.
pub fn load_document(raw: &str) -> LensResult<LoadedData> {
    let document: Value = serde_json::from_str(raw)?;
    let elements = document
        .get("campaigns")
        .and_then(Value::as_array)
        .ok_or_else(|| LensError::Document("missing `campaigns` array".to_string()))?;

    let mut campaigns = Vec::with_capacity(elements.len());
    let mut skipped = Vec::new();

    for (index, element) in elements.iter().enumerate() {
        match parse_campaign(element, &mut skipped) {
            Ok(campaign) => campaigns.push(campaign),
            Err(reason) => skip(&mut skipped, campaign_context(index, element), reason),
        }
    }

    info!(
        campaigns = campaigns.len(),
        skipped = skipped.len(),
        "marketing document loaded"
    );

    Ok(LoadedData { campaigns, skipped })
}

/// Parse one campaign element. The breakdown lists are detached and parsed
/// element by element so a bad breakdown record never drops its campaign.
fn parse_campaign(element: &Value, skipped: &mut Vec<SkippedRecord>) -> Result<Campaign, String> {
    let mut fields = element
        .as_object()
        .cloned()
        .ok_or_else(|| "not a JSON object".to_string())?;

    let demographics = fields.remove("demographic_breakdown");
    let devices = fields.remove("device_performance");
    let regions = fields.remove("regional_performance");
    let weeks = fields.remove("weekly_performance");

    let mut campaign: Campaign =
        serde_json::from_value(Value::Object(fields)).map_err(|e| e.to_string())?;
    check_money("spend", campaign.spend)?;
    check_money("revenue", campaign.revenue)?;

    let name = campaign.name.clone();
    campaign.demographic_breakdown = parse_list(
        demographics,
        &name,
        "demographic_breakdown",
        skipped,
        |record: &DemographicBreakdown| check_performance(&record.performance),
    );
    campaign.device_performance = parse_list(
        devices,
        &name,
        "device_performance",
        skipped,
        |record: &DeviceBreakdown| check_performance(&record.performance),
    );
    campaign.regional_performance = parse_list(
        regions,
        &name,
        "regional_performance",
        skipped,
        |record: &RegionBreakdown| check_performance(&record.performance),
    );
    campaign.weekly_performance = parse_list(
        weeks,
        &name,
        "weekly_performance",
        skipped,
        |record: &WeekBreakdown| check_performance(&record.performance),
    );

    Ok(campaign)
}

/// Parse a breakdown list element by element, skipping bad records.
/// An absent list is empty; a present non-array is itself a skipped record.
fn parse_list<T: DeserializeOwned>(
    list: Option<Value>,
    campaign: &str,
    field: &str,
    skipped: &mut Vec<SkippedRecord>,
    validate: impl Fn(&T) -> Result<(), String>,
) -> Vec<T> {
    let elements = match list {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(elements)) => elements,
        Some(_) => {
            skip(
                skipped,
                format!("campaign '{campaign}': {field}"),
                "expected an array".to_string(),
            );
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let parsed = serde_json::from_value::<T>(element)
            .map_err(|e| e.to_string())
            .and_then(|record| validate(&record).map(|_| record));
        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => skip(
                skipped,
                format!("campaign '{campaign}': {field}[{index}]"),
                reason,
            ),
        }
    }
    records
}

fn check_performance(performance: &Performance) -> Result<(), String> {
    check_money("spend", performance.spend)?;
    check_money("revenue", performance.revenue)
}

fn check_money(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be a non-negative finite number"))
    }
}

fn campaign_context(index: usize, element: &Value) -> String {
    element
        .get("name")
        .and_then(Value::as_str)
        .map(|name| format!("campaign '{name}'"))
        .unwrap_or_else(|| format!("campaigns[{index}]"))
}

fn skip(skipped: &mut Vec<SkippedRecord>, context: String, reason: String) {
    warn!(%context, %reason, "record skipped");
    skipped.push(SkippedRecord { context, reason });
}

// ─── Tests ──────────────────────────────────────────────────────────────────
