//! Demographic table rows, split by gender.

use serde::Serialize;

use lens_core::types::Campaign;
use lens_engine::metrics;
use lens_engine::Gender;

use crate::format::{percent, thousands};

/// One formatted table row. Ratios are recomputed from the record's own
/// counters before formatting; stored ratio fields are not trusted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicRow {
    pub campaign: String,
    pub age_group: String,
    pub impressions: String,
    pub clicks: String,
    pub conversions: String,
    pub ctr: String,
    pub conversion_rate: String,
}

/// Rows for every demographic record of the given gender across all
/// campaigns, sorted by raw impressions descending before any formatting.
pub fn gender_rows(campaigns: &[Campaign], gender: Gender) -> Vec<DemographicRow> {
    let mut raw: Vec<(&str, &str, u64, u64, u64)> = Vec::new();
    for campaign in campaigns {
        for demo in &campaign.demographic_breakdown {
            if Gender::parse(&demo.gender) != Some(gender) {
                continue;
            }
            raw.push((
                campaign.name.as_str(),
                demo.age_group.as_str(),
                demo.performance.impressions,
                demo.performance.clicks,
                demo.performance.conversions,
            ));
        }
    }
    // Sort the numbers, not the strings; "9,000" would otherwise order
    // ahead of "10,000".
    raw.sort_by(|a, b| b.2.cmp(&a.2));

    raw.into_iter()
        .map(
            |(campaign, age_group, impressions, clicks, conversions)| DemographicRow {
                campaign: campaign.to_string(),
                age_group: age_group.to_string(),
                impressions: thousands(impressions),
                clicks: thousands(clicks),
                conversions: thousands(conversions),
                ctr: percent(metrics::ctr(clicks, impressions)),
                conversion_rate: percent(metrics::conversion_rate(conversions, clicks)),
            },
        )
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
