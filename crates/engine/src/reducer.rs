//! Grouping/merge reducer keyed by dimension identity.
//!
//! `aggregate` folds the breakdown records of every campaign into a keyed
//! table, summing the five base counters and re-deriving every ratio from
//! the new sums after each contribution. Ratios are never accumulated
//! across records; they are not additive. Each run computes into a local
//! accumulator and returns a complete value, so results are pure functions
//! of the input snapshot and safe to discard or recompute at any time.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use lens_core::types::{Campaign, Performance};

use crate::allocation::weight;
use crate::metrics;
use crate::ranking::CampaignFilter;

/// Slicing dimension of an aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    AgeGroup,
    Gender,
    Device,
    Region,
    Week,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::AgeGroup,
        Dimension::Gender,
        Dimension::Device,
        Dimension::Region,
        Dimension::Week,
    ];
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "age_group" | "age-group" | "age" => Ok(Dimension::AgeGroup),
            "gender" => Ok(Dimension::Gender),
            "device" => Ok(Dimension::Device),
            "region" => Ok(Dimension::Region),
            "week" | "weekly" => Ok(Dimension::Week),
            other => Err(format!("unknown dimension '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Match a breakdown record's gender label, case-insensitively.
    /// Unrecognized labels belong to no gender bucket.
    pub fn parse(label: &str) -> Option<Gender> {
        if label.eq_ignore_ascii_case("male") {
            Some(Gender::Male)
        } else if label.eq_ignore_ascii_case("female") {
            Some(Gender::Female)
        } else {
            None
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Identity of a merged bucket. Canonical ordering of extracted buckets
/// comes from the derived `Ord`; presentation order is a ranking concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKey {
    AgeGroup(String),
    Gender(Gender),
    Device(String),
    Region(String),
    Week { start: NaiveDate, end: NaiveDate },
}

impl BucketKey {
    /// Display label for the bucket. Week labels are ISO bounds; pretty
    /// week ranges are a view-layer concern.
    pub fn label(&self) -> String {
        match self {
            BucketKey::AgeGroup(age_group) => age_group.clone(),
            BucketKey::Gender(gender) => gender.to_string(),
            BucketKey::Device(device) => device.clone(),
            BucketKey::Region(region) => region.clone(),
            BucketKey::Week { start, end } => format!("{start}/{end}"),
        }
    }
}

/// Summed counters and the ratios derived from them. Counters only grow as
/// records fold in, saturating at `u64::MAX`; ratio fields always reflect
/// the current sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketStats {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub cpc: f64,
    pub cpa: f64,
    pub roas: f64,
}

impl BucketStats {
    fn absorb(
        &mut self,
        impressions: u64,
        clicks: u64,
        conversions: u64,
        spend: f64,
        revenue: f64,
    ) {
        self.impressions = self.impressions.saturating_add(impressions);
        self.clicks = self.clicks.saturating_add(clicks);
        self.conversions = self.conversions.saturating_add(conversions);
        self.spend += spend;
        self.revenue += revenue;
        self.refresh_ratios();
    }

    fn refresh_ratios(&mut self) {
        self.ctr = metrics::ctr(self.clicks, self.impressions);
        self.conversion_rate = metrics::conversion_rate(self.conversions, self.clicks);
        self.cpc = metrics::cpc(self.spend, self.clicks);
        self.cpa = metrics::cpa(self.spend, self.conversions);
        self.roas = metrics::roas(self.revenue, self.spend);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedBucket {
    pub key: BucketKey,
    pub stats: BucketStats,
}

/// Options for one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    /// Campaign predicate applied before any record is folded.
    pub filter: Option<CampaignFilter>,
}

/// Result of one aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    pub dimension: Dimension,
    pub buckets: Vec<MergedBucket>,
    pub computed_at: DateTime<Utc>,
}

/// Fold all breakdown records of the requested dimension into merged
/// buckets, in canonical key order.
///
/// A campaign with an empty breakdown list for the dimension contributes
/// nothing: absent data never becomes a zero-valued bucket. The first
/// record seen for a key seeds a fresh bucket; source campaigns are never
/// mutated or aliased.
pub fn aggregate(
    campaigns: &[Campaign],
    dimension: Dimension,
    options: &AggregateOptions,
) -> Aggregation {
    let selected: Vec<&Campaign> = match &options.filter {
        Some(filter) => filter.apply(campaigns),
        None => campaigns.iter().collect(),
    };

    let mut table: HashMap<BucketKey, BucketStats> = HashMap::new();
    for campaign in &selected {
        match dimension {
            Dimension::AgeGroup => fold_age_groups(campaign, &mut table),
            Dimension::Gender => fold_genders(campaign, &mut table),
            Dimension::Device => {
                for record in &campaign.device_performance {
                    fold_native(
                        BucketKey::Device(record.device.clone()),
                        &record.performance,
                        &mut table,
                    );
                }
            }
            Dimension::Region => {
                for record in &campaign.regional_performance {
                    fold_native(
                        BucketKey::Region(record.region.clone()),
                        &record.performance,
                        &mut table,
                    );
                }
            }
            Dimension::Week => {
                for record in &campaign.weekly_performance {
                    fold_native(
                        BucketKey::Week {
                            start: record.week_start,
                            end: record.week_end,
                        },
                        &record.performance,
                        &mut table,
                    );
                }
            }
        }
    }

    let mut buckets: Vec<MergedBucket> = table
        .into_iter()
        .map(|(key, stats)| MergedBucket { key, stats })
        .collect();
    // The table's native order carries no meaning; canonical key order
    // keeps extraction reproducible.
    buckets.sort_by(|a, b| a.key.cmp(&b.key));

    debug!(
        dimension = ?dimension,
        campaigns = selected.len(),
        buckets = buckets.len(),
        "aggregation complete"
    );

    Aggregation {
        dimension,
        buckets,
        computed_at: Utc::now(),
    }
}

/// Age-group buckets sum the demographic counters; money has no native
/// source there and is redistributed from the campaign by impression share.
fn fold_age_groups(campaign: &Campaign, table: &mut HashMap<BucketKey, BucketStats>) {
    for demo in &campaign.demographic_breakdown {
        let share = weight(demo.performance.impressions, campaign.impressions);
        table
            .entry(BucketKey::AgeGroup(demo.age_group.clone()))
            .or_default()
            .absorb(
                demo.performance.impressions,
                demo.performance.clicks,
                demo.performance.conversions,
                campaign.spend * share,
                campaign.revenue * share,
            );
    }
}

/// Gender buckets sum counters per gender within the campaign first, then
/// split the campaign's money by click share against the male plus female
/// clicks of that same campaign.
fn fold_genders(campaign: &Campaign, table: &mut HashMap<BucketKey, BucketStats>) {
    let mut totals: HashMap<Gender, (u64, u64, u64)> = HashMap::new();
    for demo in &campaign.demographic_breakdown {
        let Some(gender) = Gender::parse(&demo.gender) else {
            continue;
        };
        let entry = totals.entry(gender).or_default();
        entry.0 = entry.0.saturating_add(demo.performance.impressions);
        entry.1 = entry.1.saturating_add(demo.performance.clicks);
        entry.2 = entry.2.saturating_add(demo.performance.conversions);
    }

    let reference: u64 = totals
        .values()
        .fold(0, |sum: u64, &(_, clicks, _)| sum.saturating_add(clicks));
    for (gender, (impressions, clicks, conversions)) in totals {
        let share = weight(clicks, reference);
        table.entry(BucketKey::Gender(gender)).or_default().absorb(
            impressions,
            clicks,
            conversions,
            campaign.spend * share,
            campaign.revenue * share,
        );
    }
}

/// Device, region, and week records carry all five counters natively.
fn fold_native(
    key: BucketKey,
    performance: &Performance,
    table: &mut HashMap<BucketKey, BucketStats>,
) {
    table.entry(key).or_default().absorb(
        performance.impressions,
        performance.clicks,
        performance.conversions,
        performance.spend,
        performance.revenue,
    );
}

// ─── Tests ──────────────────────────────────────────────────────────────────
