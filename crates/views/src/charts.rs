//! Chart-shaped projections of merged buckets. Pure reshaping; ranking and
//! arithmetic stay in the engine.

use chrono::NaiveDate;
use serde::Serialize;

use lens_engine::{metric_value, BucketKey, MergedBucket, Metric};

use crate::format::week_label;

/// Bar palette carried over from the dashboard: spend green, revenue blue.
pub const SPEND_BAR_COLOR: &str = "#10B981";
pub const REVENUE_BAR_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// One bar per bucket, in the order given. Rank first when presentation
/// order matters.
pub fn bars_by(buckets: &[MergedBucket], metric: Metric, color: &str) -> Vec<BarDatum> {
    buckets
        .iter()
        .map(|bucket| BarDatum {
            label: bucket.key.label(),
            value: metric_value(&bucket.stats, metric),
            color: color.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub region: String,
    pub x: f64,
    pub y: f64,
    /// Merged impressions; drives the dot size.
    pub value: u64,
    pub conversions: u64,
    pub revenue: f64,
}

fn city_coordinates(region: &str) -> Option<(f64, f64)> {
    let (x, y) = match region {
        "Abu Dhabi" => (80.0, 70.0),
        "Dubai" => (100.0, 80.0),
        "Sharjah" => (90.0, 85.0),
        "Riyadh" => (120.0, 60.0),
        "Doha" => (130.0, 90.0),
        "Kuwait City" => (140.0, 75.0),
        "Manama" => (150.0, 95.0),
        _ => return None,
    };
    Some((x, y))
}

/// FNV-1a over the region name, folded into the 0-200 coordinate space.
/// Unknown regions land on a stable spot instead of a random one.
fn fallback_coordinates(region: &str) -> (f64, f64) {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in region.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    ((hash % 200) as f64, ((hash >> 32) % 200) as f64)
}

/// Map-style points for region buckets. Keys of any other dimension are
/// skipped.
pub fn region_scatter(buckets: &[MergedBucket]) -> Vec<ScatterPoint> {
    buckets
        .iter()
        .filter_map(|bucket| {
            let BucketKey::Region(region) = &bucket.key else {
                return None;
            };
            let (x, y) =
                city_coordinates(region).unwrap_or_else(|| fallback_coordinates(region));
            Some(ScatterPoint {
                region: region.clone(),
                x,
                y,
                value: bucket.stats.impressions,
                conversions: bucket.stats.conversions,
                revenue: bucket.stats.revenue,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub week: String,
    pub revenue: f64,
    pub spend: f64,
}

/// Revenue/spend series from week buckets, in chronological order
/// regardless of input order. Keys of any other dimension are skipped.
pub fn weekly_series(buckets: &[MergedBucket]) -> Vec<SeriesPoint> {
    let mut weeks: Vec<(NaiveDate, NaiveDate, f64, f64)> = buckets
        .iter()
        .filter_map(|bucket| {
            let BucketKey::Week { start, end } = &bucket.key else {
                return None;
            };
            Some((*start, *end, bucket.stats.revenue, bucket.stats.spend))
        })
        .collect();
    weeks.sort_by_key(|&(start, end, ..)| (start, end));

    weeks
        .into_iter()
        .map(|(start, end, revenue, spend)| SeriesPoint {
            week: week_label(start, end),
            revenue,
            spend,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatPoint {
    pub label: String,
    pub value: f64,
    /// value / max(value) across the buckets, in [0, 1]; 0 when the max is 0.
    pub intensity: f64,
}

pub fn heat_points(buckets: &[MergedBucket], metric: Metric) -> Vec<HeatPoint> {
    let max = buckets
        .iter()
        .map(|b| metric_value(&b.stats, metric))
        .fold(0.0f64, f64::max);

    buckets
        .iter()
        .map(|bucket| {
            let value = metric_value(&bucket.stats, metric);
            HeatPoint {
                label: bucket.key.label(),
                value,
                intensity: if max > 0.0 { value / max } else { 0.0 },
            }
        })
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
