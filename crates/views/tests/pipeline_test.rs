//! Integration test for the full document-to-views flow: raw JSON in,
//! merged buckets and formatted view data out.

#[cfg(test)]
mod tests {
    use lens_core::load_document;
    use lens_engine::{
        aggregate, rank, AggregateOptions, BucketKey, CampaignFilter, Dimension, Gender, Metric,
        SortSpec,
    };
    use lens_views::{
        bars_by, device_cards, gender_cards, region_scatter, weekly_series, SPEND_BAR_COLOR,
    };

    /// Two healthy campaigns, one breakdown record missing a required
    /// counter, and one campaign missing its name.
    fn sample_document() -> &'static str {
        r#"{
          "campaigns": [
            {
              "name": "Summer Sale",
              "objective": "conversions",
              "impressions": 1000,
              "clicks": 100,
              "conversions": 10,
              "spend": 500.0,
              "revenue": 1500.0,
              "demographic_breakdown": [
                {
                  "age_group": "25-34",
                  "gender": "Male",
                  "performance": { "impressions": 600, "clicks": 60, "conversions": 6 }
                },
                {
                  "age_group": "18-24",
                  "gender": "Female",
                  "performance": { "impressions": 400, "clicks": 40, "conversions": 4 }
                }
              ],
              "device_performance": [
                { "device": "Mobile", "impressions": 700, "clicks": 70, "conversions": 7, "spend": 350.0, "revenue": 1050.0 },
                { "device": "Desktop", "impressions": 300, "clicks": 30, "conversions": 3, "spend": 150.0, "revenue": 450.0 }
              ],
              "regional_performance": [
                { "region": "Dubai", "impressions": 1000, "clicks": 100, "conversions": 10, "spend": 500.0, "revenue": 1500.0 }
              ],
              "weekly_performance": [
                { "week_start": "2025-08-04", "week_end": "2025-08-10", "impressions": 1000, "clicks": 100, "conversions": 10, "spend": 500.0, "revenue": 1500.0 }
              ]
            },
            {
              "name": "Winter Promo",
              "objective": "awareness",
              "impressions": 500,
              "clicks": 50,
              "conversions": 5,
              "spend": 200.0,
              "revenue": 600.0,
              "demographic_breakdown": [
                {
                  "age_group": "25-34",
                  "gender": "Female",
                  "performance": { "impressions": 500, "clicks": 50, "conversions": 5 }
                }
              ],
              "device_performance": [
                { "device": "Mobile", "impressions": 500, "clicks": 50, "conversions": 5, "spend": 200.0, "revenue": 600.0 },
                { "device": "Tablet", "impressions": 120 }
              ],
              "regional_performance": [
                { "region": "Dubai", "impressions": 500, "clicks": 50, "conversions": 5, "spend": 200.0, "revenue": 600.0 },
                { "region": "Muscat", "impressions": 80, "clicks": 8, "conversions": 1, "spend": 30.0, "revenue": 90.0 }
              ],
              "weekly_performance": [
                { "week_start": "2025-08-11", "week_end": "2025-08-17", "impressions": 500, "clicks": 50, "conversions": 5, "spend": 200.0, "revenue": 600.0 }
              ]
            },
            {
              "objective": "traffic",
              "impressions": 10,
              "clicks": 1,
              "conversions": 0,
              "spend": 1.0,
              "revenue": 0.0
            }
          ]
        }"#
    }

    #[test]
    fn test_load_keeps_healthy_records_and_reports_skips() {
        let loaded = load_document(sample_document()).unwrap();

        assert_eq!(loaded.campaigns.len(), 2);
        assert_eq!(loaded.skipped.len(), 2);

        let contexts: Vec<&str> = loaded.skipped.iter().map(|s| s.context.as_str()).collect();
        assert!(contexts.iter().any(|c| c.contains("device_performance[1]")));
        assert!(contexts.iter().any(|c| c.contains("campaigns[2]")));
    }

    #[test]
    fn test_age_groups_merge_with_weighted_money() {
        let loaded = load_document(sample_document()).unwrap();
        let ages = aggregate(
            &loaded.campaigns,
            Dimension::AgeGroup,
            &AggregateOptions::default(),
        );

        let shared = ages
            .buckets
            .iter()
            .find(|b| b.key == BucketKey::AgeGroup("25-34".to_string()))
            .unwrap();
        // Summer contributes at weight 0.6, Winter at weight 1.0.
        assert_eq!(shared.stats.impressions, 1100);
        assert_eq!(shared.stats.clicks, 110);
        assert!((shared.stats.spend - 500.0).abs() < 1e-6);
        assert!((shared.stats.revenue - 1500.0).abs() < 1e-6);
        assert!((shared.stats.ctr - 0.1).abs() < 1e-9);

        let mut ranked = ages.buckets.clone();
        rank(&mut ranked, &SortSpec::by(Metric::Spend));
        let bars = bars_by(&ranked, Metric::Spend, SPEND_BAR_COLOR);
        assert_eq!(bars[0].label, "25-34");
        assert_eq!(bars[0].color, "#10B981");
        assert_eq!(bars[1].label, "18-24");
    }

    #[test]
    fn test_gender_cards_carry_click_share_totals() {
        let loaded = load_document(sample_document()).unwrap();
        let genders = aggregate(
            &loaded.campaigns,
            Dimension::Gender,
            &AggregateOptions::default(),
        );
        let cards = gender_cards(&genders.buckets);

        assert_eq!(cards[0].title, "Total Clicks by Males");
        assert_eq!(cards[0].value, "60");
        assert_eq!(cards[1].title, "Total Spend by Males");
        assert_eq!(cards[1].value, "$300.00");
        assert_eq!(cards[3].title, "Total Clicks by Females");
        assert_eq!(cards[3].value, "90");
        assert_eq!(cards[4].value, "$400.00");
        assert_eq!(cards[5].value, "$1,200.00");
    }

    #[test]
    fn test_device_cards_survive_a_skipped_sibling_record() {
        let loaded = load_document(sample_document()).unwrap();
        let devices = aggregate(
            &loaded.campaigns,
            Dimension::Device,
            &AggregateOptions::default(),
        );
        let cards = device_cards(&devices.buckets);

        // The malformed Tablet record is gone; the healthy Mobile record
        // from the same campaign still merged.
        assert_eq!(cards.len(), 2);
        let mobile = cards.iter().find(|c| c.device == "Mobile").unwrap();
        assert_eq!(mobile.impressions, "1,200");
        assert_eq!(mobile.traffic_share, "80.00%");
        assert_eq!(mobile.ctr, "10.00%");
        let desktop = cards.iter().find(|c| c.device == "Desktop").unwrap();
        assert_eq!(desktop.traffic_share, "20.00%");
    }

    #[test]
    fn test_region_scatter_uses_fixed_city_coordinates() {
        let loaded = load_document(sample_document()).unwrap();
        let regions = aggregate(
            &loaded.campaigns,
            Dimension::Region,
            &AggregateOptions::default(),
        );
        let points = region_scatter(&regions.buckets);

        let dubai = points.iter().find(|p| p.region == "Dubai").unwrap();
        assert_eq!(dubai.x, 100.0);
        assert_eq!(dubai.y, 80.0);
        assert_eq!(dubai.value, 1500);
        assert_eq!(dubai.conversions, 15);
        assert!((dubai.revenue - 2100.0).abs() < 1e-9);

        // Muscat is not in the city table but still lands somewhere stable.
        let muscat = points.iter().find(|p| p.region == "Muscat").unwrap();
        assert!(muscat.x >= 0.0 && muscat.x < 200.0);
    }

    #[test]
    fn test_weekly_series_is_chronological() {
        let loaded = load_document(sample_document()).unwrap();
        let weeks = aggregate(
            &loaded.campaigns,
            Dimension::Week,
            &AggregateOptions::default(),
        );
        let series = weekly_series(&weeks.buckets);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].week, "Aug 4 - Aug 10");
        assert_eq!(series[0].revenue, 1500.0);
        assert_eq!(series[1].week, "Aug 11 - Aug 17");
        assert_eq!(series[1].spend, 200.0);
    }

    #[test]
    fn test_view_structs_serialize_to_chart_ready_json() {
        let loaded = load_document(sample_document()).unwrap();
        let regions = aggregate(
            &loaded.campaigns,
            Dimension::Region,
            &AggregateOptions::default(),
        );
        let points = region_scatter(&regions.buckets);
        let json = serde_json::to_value(&points).unwrap();

        let dubai = json
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["region"] == "Dubai")
            .unwrap()
            .clone();
        assert_eq!(dubai["x"], 100.0);
        assert_eq!(dubai["value"], 1500);

        let buckets = serde_json::to_value(&regions.buckets).unwrap();
        assert_eq!(buckets[0]["key"]["region"], "Dubai");
        assert_eq!(buckets[0]["stats"]["clicks"], 150);
    }

    #[test]
    fn test_objective_filter_narrows_the_fold() {
        let loaded = load_document(sample_document()).unwrap();
        let options = AggregateOptions {
            filter: Some(CampaignFilter {
                name_contains: None,
                objectives: vec!["conversions".to_string()],
            }),
        };
        let genders = aggregate(&loaded.campaigns, Dimension::Gender, &options);

        // Only Summer Sale folds, so the female side is its 40-click record.
        let female = genders
            .buckets
            .iter()
            .find(|b| b.key == BucketKey::Gender(Gender::Female))
            .unwrap();
        assert_eq!(female.stats.clicks, 40);
        assert!((female.stats.spend - 200.0).abs() < 1e-9);
    }
}
