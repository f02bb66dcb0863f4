//! Serde model of the marketing data document.
//! Field names follow the dashboard API payload; unknown fields are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level document returned by the data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingData {
    pub campaigns: Vec<Campaign>,
}

/// A single campaign with aggregate counters and optional breakdown lists.
/// Read-only to the engine; aggregation never mutates campaigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub objective: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub demographic_breakdown: Vec<DemographicBreakdown>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_performance: Vec<DeviceBreakdown>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regional_performance: Vec<RegionBreakdown>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekly_performance: Vec<WeekBreakdown>,
}

/// Counters shared by every breakdown record. The counter triple is
/// required; money and ratio fields are optional and default to zero.
/// Input ratios are never trusted downstream, ratios are recomputed
/// from summed counters after every merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Performance {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub conversion_rate: f64,
}

/// Per age-group and gender slice. Carries no native spend/revenue;
/// those are redistributed from the parent campaign by weighted share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicBreakdown {
    pub age_group: String,
    pub gender: String,
    pub performance: Performance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceBreakdown {
    pub device: String,
    #[serde(flatten)]
    pub performance: Performance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionBreakdown {
    pub region: String,
    #[serde(flatten)]
    pub performance: Performance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekBreakdown {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    #[serde(flatten)]
    pub performance: Performance,
}
