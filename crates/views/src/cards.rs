//! Summary cards for the gender totals and the per-device overview.

use serde::Serialize;

use lens_engine::metrics::share;
use lens_engine::{BucketKey, Gender, MergedBucket};

use crate::format::{currency, percent, thousands};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
}

/// The six gender total cards, in dashboard order: clicks, spend, revenue
/// for males, then the same for females. A gender with no merged bucket
/// still gets its cards, valued at zero.
pub fn gender_cards(buckets: &[MergedBucket]) -> Vec<MetricCard> {
    let mut cards = Vec::with_capacity(6);
    for (gender, noun) in [(Gender::Male, "Males"), (Gender::Female, "Females")] {
        let stats = buckets
            .iter()
            .find(|b| b.key == BucketKey::Gender(gender))
            .map(|b| b.stats.clone())
            .unwrap_or_default();

        cards.push(MetricCard {
            title: format!("Total Clicks by {noun}"),
            value: thousands(stats.clicks),
        });
        cards.push(MetricCard {
            title: format!("Total Spend by {noun}"),
            value: currency(stats.spend),
        });
        cards.push(MetricCard {
            title: format!("Total Revenue by {noun}"),
            value: currency(stats.revenue),
        });
    }
    cards
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCard {
    pub device: String,
    pub impressions: String,
    pub clicks: String,
    pub conversions: String,
    pub spend: String,
    pub revenue: String,
    pub ctr: String,
    pub conversion_rate: String,
    /// Device impressions over the total across all merged devices.
    pub traffic_share: String,
}

/// One card per device bucket, in the order given. Keys of any other
/// dimension are skipped.
pub fn device_cards(buckets: &[MergedBucket]) -> Vec<DeviceCard> {
    let total: u64 = buckets
        .iter()
        .filter(|b| matches!(b.key, BucketKey::Device(_)))
        .fold(0, |sum, b| sum.saturating_add(b.stats.impressions));

    buckets
        .iter()
        .filter_map(|bucket| {
            let BucketKey::Device(device) = &bucket.key else {
                return None;
            };
            Some(DeviceCard {
                device: device.clone(),
                impressions: thousands(bucket.stats.impressions),
                clicks: thousands(bucket.stats.clicks),
                conversions: thousands(bucket.stats.conversions),
                spend: currency(bucket.stats.spend),
                revenue: currency(bucket.stats.revenue),
                ctr: percent(bucket.stats.ctr),
                conversion_rate: percent(bucket.stats.conversion_rate),
                traffic_share: percent(share(bucket.stats.impressions, total)),
            })
        })
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lens_engine::BucketStats;

    fn gender_bucket(gender: Gender, clicks: u64, spend: f64, revenue: f64) -> MergedBucket {
        MergedBucket {
            key: BucketKey::Gender(gender),
            stats: BucketStats {
                clicks,
                spend,
                revenue,
                ..BucketStats::default()
            },
        }
    }

    fn device_bucket(device: &str, impressions: u64, ctr: f64) -> MergedBucket {
        MergedBucket {
            key: BucketKey::Device(device.to_string()),
            stats: BucketStats {
                impressions,
                ctr,
                ..BucketStats::default()
            },
        }
    }

    #[test]
    fn test_gender_cards_cover_both_genders_in_order() {
        let buckets = vec![
            gender_bucket(Gender::Male, 12_345, 1_500.5, 4_000.0),
            gender_bucket(Gender::Female, 8_000, 900.0, 2_500.0),
        ];
        let cards = gender_cards(&buckets);

        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0].title, "Total Clicks by Males");
        assert_eq!(cards[0].value, "12,345");
        assert_eq!(cards[1].title, "Total Spend by Males");
        assert_eq!(cards[1].value, "$1,500.50");
        assert_eq!(cards[2].title, "Total Revenue by Males");
        assert_eq!(cards[5].title, "Total Revenue by Females");
        assert_eq!(cards[5].value, "$2,500.00");
    }

    #[test]
    fn test_missing_gender_bucket_yields_zero_cards() {
        let buckets = vec![gender_bucket(Gender::Male, 10, 5.0, 20.0)];
        let cards = gender_cards(&buckets);

        assert_eq!(cards.len(), 6);
        assert_eq!(cards[3].title, "Total Clicks by Females");
        assert_eq!(cards[3].value, "0");
        assert_eq!(cards[4].value, "$0.00");
    }

    #[test]
    fn test_device_traffic_shares_split_the_merged_total() {
        let buckets = vec![
            device_bucket("Mobile", 750, 0.034),
            device_bucket("Desktop", 250, 0.021),
        ];
        let cards = device_cards(&buckets);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].traffic_share, "75.00%");
        assert_eq!(cards[1].traffic_share, "25.00%");
        assert_eq!(cards[0].ctr, "3.40%");
        assert_eq!(cards[0].impressions, "750");
    }

    #[test]
    fn test_zero_impression_devices_share_nothing() {
        let buckets = vec![
            device_bucket("Mobile", 0, 0.0),
            device_bucket("Desktop", 0, 0.0),
        ];
        let cards = device_cards(&buckets);

        assert_eq!(cards[0].traffic_share, "0.00%");
        assert_eq!(cards[1].traffic_share, "0.00%");
    }

    #[test]
    fn test_traffic_total_saturates_for_extreme_buckets() {
        let buckets = vec![
            device_bucket("Mobile", u64::MAX, 0.0),
            device_bucket("Desktop", u64::MAX, 0.0),
        ];
        let cards = device_cards(&buckets);

        // The saturated total equals each bucket, so both shares cap at 1.
        assert_eq!(cards[0].traffic_share, "100.00%");
        assert_eq!(cards[1].traffic_share, "100.00%");
    }

    #[test]
    fn test_device_cards_skip_other_dimensions() {
        let buckets = vec![
            device_bucket("Mobile", 100, 0.0),
            gender_bucket(Gender::Male, 1, 0.0, 0.0),
        ];
        let cards = device_cards(&buckets);

        assert_eq!(cards.len(), 1);
        // The gender bucket must not dilute the traffic total either.
        assert_eq!(cards[0].traffic_share, "100.00%");
    }
}
