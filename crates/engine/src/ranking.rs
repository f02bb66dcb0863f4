//! Ranking, truncation, and campaign selection.
//!
//! Sorting happens on raw numeric values, never on formatted strings, and
//! uses the standard library's stable sort so ties keep their canonical
//! bucket order.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use lens_core::types::Campaign;

use crate::reducer::{BucketStats, MergedBucket};

/// Numeric facet of a bucket that views and sorts can address by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Impressions,
    Clicks,
    Conversions,
    Spend,
    Revenue,
    Ctr,
    ConversionRate,
    Cpc,
    Cpa,
    Roas,
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "impressions" => Ok(Metric::Impressions),
            "clicks" => Ok(Metric::Clicks),
            "conversions" => Ok(Metric::Conversions),
            "spend" => Ok(Metric::Spend),
            "revenue" => Ok(Metric::Revenue),
            "ctr" => Ok(Metric::Ctr),
            "conversion_rate" | "conversion-rate" => Ok(Metric::ConversionRate),
            "cpc" => Ok(Metric::Cpc),
            "cpa" => Ok(Metric::Cpa),
            "roas" => Ok(Metric::Roas),
            other => Err(format!("unknown metric '{other}'")),
        }
    }
}

/// Read one metric off a bucket as a plain number. Count metrics widen to
/// f64 so every metric sorts through the same comparator.
pub fn metric_value(stats: &BucketStats, metric: Metric) -> f64 {
    match metric {
        Metric::Impressions => stats.impressions as f64,
        Metric::Clicks => stats.clicks as f64,
        Metric::Conversions => stats.conversions as f64,
        Metric::Spend => stats.spend,
        Metric::Revenue => stats.revenue,
        Metric::Ctr => stats.ctr,
        Metric::ConversionRate => stats.conversion_rate,
        Metric::Cpc => stats.cpc,
        Metric::Cpa => stats.cpa,
        Metric::Roas => stats.roas,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Metric(Metric),
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// How to order buckets for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    /// Descending sort on a metric, the common leaderboard case.
    pub fn by(metric: Metric) -> SortSpec {
        SortSpec {
            key: SortKey::Metric(metric),
            order: SortOrder::Descending,
        }
    }
}

fn compare(a: &MergedBucket, b: &MergedBucket, spec: &SortSpec) -> Ordering {
    let ord = match spec.key {
        SortKey::Label => a.key.label().cmp(&b.key.label()),
        SortKey::Metric(metric) => {
            let left = metric_value(&a.stats, metric);
            let right = metric_value(&b.stats, metric);
            // Metric values are always finite, so None never fires; Equal
            // keeps the comparator total either way.
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        }
    };
    match spec.order {
        SortOrder::Ascending => ord,
        // Reversing after comparison keeps Equal as Equal, so the stable
        // sort preserves input order for ties in both directions.
        SortOrder::Descending => ord.reverse(),
    }
}

/// Stable in-place sort by the given spec.
pub fn rank(buckets: &mut [MergedBucket], spec: &SortSpec) {
    buckets.sort_by(|a, b| compare(a, b, spec));
}

/// Rank, then keep the first `limit` buckets. A limit beyond the bucket
/// count returns everything.
pub fn top_n(mut buckets: Vec<MergedBucket>, spec: &SortSpec, limit: usize) -> Vec<MergedBucket> {
    rank(&mut buckets, spec);
    buckets.truncate(limit);
    buckets
}

/// Predicate over campaigns, applied before any record is folded.
/// An empty filter selects everything.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    /// Case-insensitive substring match on the campaign name.
    pub name_contains: Option<String>,
    /// Case-insensitive objective whitelist; empty means any objective.
    pub objectives: Vec<String>,
}

impl CampaignFilter {
    pub fn matches(&self, campaign: &Campaign) -> bool {
        if let Some(needle) = &self.name_contains {
            if !campaign
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if !self.objectives.is_empty()
            && !self
                .objectives
                .iter()
                .any(|objective| campaign.objective.eq_ignore_ascii_case(objective))
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, campaigns: &'a [Campaign]) -> Vec<&'a Campaign> {
        campaigns.iter().filter(|c| self.matches(c)).collect()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
