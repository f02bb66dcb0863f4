//! Campaign Lens — marketing analytics aggregation over campaign breakdowns.
//!
//! Main entry point: load the document, fold the requested dimensions into
//! merged buckets, and print the assembled views as JSON on stdout.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use lens_core::config::AppConfig;
use lens_core::load_document;
use lens_core::loader::SkippedRecord;
use lens_core::types::Campaign;
use lens_engine::{
    aggregate, top_n, AggregateOptions, CampaignFilter, Dimension, Gender, MergedBucket, Metric,
    SortKey, SortOrder, SortSpec,
};
use lens_views::{
    bars_by, device_cards, gender_cards, gender_rows, heat_points, region_scatter, weekly_series,
    BarDatum, DemographicRow, DeviceCard, HeatPoint, MetricCard, ScatterPoint, SeriesPoint,
    REVENUE_BAR_COLOR, SPEND_BAR_COLOR,
};

#[derive(Parser, Debug)]
#[command(name = "campaign-lens")]
#[command(about = "Aggregates campaign breakdown documents into chart-ready views")]
#[command(version)]
struct Cli {
    /// Input document path (overrides config)
    #[arg(long, env = "CAMPAIGN_LENS__DATA__PATH")]
    data: Option<String>,

    /// Dimensions to aggregate, comma separated (default: all five)
    #[arg(long, value_delimiter = ',')]
    dimensions: Vec<String>,

    /// Metric to rank buckets by
    #[arg(long, default_value = "revenue")]
    sort_by: String,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "desc")]
    order: String,

    /// Keep only the top N ranked buckets per dimension (overrides config)
    #[arg(long, env = "CAMPAIGN_LENS__ENGINE__TOP_BUCKETS")]
    top: Option<usize>,

    /// Keep campaigns whose name contains this substring
    #[arg(long)]
    name: Option<String>,

    /// Keep campaigns with one of these objectives, comma separated
    #[arg(long, value_delimiter = ',')]
    objectives: Vec<String>,

    /// Pretty-print the JSON output (overrides config)
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

/// Everything the run produced, in one JSON document. Dimensions that were
/// not requested stay out of the output entirely.
#[derive(Debug, Serialize)]
struct Report {
    generated_at: DateTime<Utc>,
    campaigns_loaded: usize,
    campaigns_matched: usize,
    skipped_records: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<SkippedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age_groups: Option<AgeGroupView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    genders: Option<GenderView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    devices: Option<DeviceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    regions: Option<RegionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weeks: Option<WeekView>,
}

#[derive(Debug, Serialize)]
struct AgeGroupView {
    buckets: Vec<MergedBucket>,
    spend_bars: Vec<BarDatum>,
    revenue_bars: Vec<BarDatum>,
}

#[derive(Debug, Serialize)]
struct GenderView {
    buckets: Vec<MergedBucket>,
    cards: Vec<MetricCard>,
    male_rows: Vec<DemographicRow>,
    female_rows: Vec<DemographicRow>,
}

#[derive(Debug, Serialize)]
struct DeviceView {
    buckets: Vec<MergedBucket>,
    cards: Vec<DeviceCard>,
}

#[derive(Debug, Serialize)]
struct RegionView {
    buckets: Vec<MergedBucket>,
    scatter: Vec<ScatterPoint>,
    heat: Vec<HeatPoint>,
}

#[derive(Debug, Serialize)]
struct WeekView {
    buckets: Vec<MergedBucket>,
    series: Vec<SeriesPoint>,
}

fn parse_dimensions(raw: &[String]) -> anyhow::Result<Vec<Dimension>> {
    if raw.is_empty() {
        return Ok(Dimension::ALL.to_vec());
    }
    raw.iter()
        .map(|s| s.parse::<Dimension>().map_err(anyhow::Error::msg))
        .collect()
}

fn build_filter(cli: &Cli) -> Option<CampaignFilter> {
    if cli.name.is_none() && cli.objectives.is_empty() {
        return None;
    }
    Some(CampaignFilter {
        name_contains: cli.name.clone(),
        objectives: cli.objectives.clone(),
    })
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the JSON report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_lens=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Campaign Lens starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(data) = cli.data.clone() {
        config.data.path = data;
    }
    if let Some(top) = cli.top {
        config.engine.top_buckets = top;
    }
    if cli.pretty {
        config.output.pretty = true;
    }

    info!(
        data = %config.data.path,
        top_buckets = config.engine.top_buckets,
        "Configuration loaded"
    );

    let metric: Metric = cli.sort_by.parse().map_err(anyhow::Error::msg)?;
    let order = match cli.order.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => SortOrder::Ascending,
        "desc" | "descending" => SortOrder::Descending,
        other => anyhow::bail!("unknown sort order '{other}'"),
    };
    let spec = SortSpec {
        key: SortKey::Metric(metric),
        order,
    };
    let dimensions = parse_dimensions(&cli.dimensions)?;

    let raw = std::fs::read_to_string(&config.data.path)
        .with_context(|| format!("failed to read {}", config.data.path))?;
    let loaded = load_document(&raw)?;

    if !loaded.skipped.is_empty() {
        warn!(
            skipped = loaded.skipped.len(),
            "Some records were malformed and skipped"
        );
    }

    // Filter once up front; tables and every aggregation see the same
    // campaign set.
    let selected: Vec<Campaign> = match build_filter(&cli) {
        Some(filter) => filter.apply(&loaded.campaigns).into_iter().cloned().collect(),
        None => loaded.campaigns.clone(),
    };
    info!(
        loaded = loaded.campaigns.len(),
        matched = selected.len(),
        "Campaigns selected"
    );

    let mut report = Report {
        generated_at: Utc::now(),
        campaigns_loaded: loaded.campaigns.len(),
        campaigns_matched: selected.len(),
        skipped_records: loaded.skipped.len(),
        skipped: loaded.skipped,
        age_groups: None,
        genders: None,
        devices: None,
        regions: None,
        weeks: None,
    };

    let options = AggregateOptions::default();
    let limit = config.engine.top_buckets;
    for dimension in dimensions {
        let aggregation = aggregate(&selected, dimension, &options);
        match dimension {
            Dimension::AgeGroup => {
                let buckets = top_n(aggregation.buckets, &spec, limit);
                report.age_groups = Some(AgeGroupView {
                    spend_bars: bars_by(&buckets, Metric::Spend, SPEND_BAR_COLOR),
                    revenue_bars: bars_by(&buckets, Metric::Revenue, REVENUE_BAR_COLOR),
                    buckets,
                });
            }
            Dimension::Gender => {
                // Cards total over the full gender set, not the ranked cut.
                let cards = gender_cards(&aggregation.buckets);
                let buckets = top_n(aggregation.buckets, &spec, limit);
                report.genders = Some(GenderView {
                    buckets,
                    cards,
                    male_rows: gender_rows(&selected, Gender::Male),
                    female_rows: gender_rows(&selected, Gender::Female),
                });
            }
            Dimension::Device => {
                // Traffic shares need every merged device in the total.
                let cards = device_cards(&aggregation.buckets);
                let buckets = top_n(aggregation.buckets, &spec, limit);
                report.devices = Some(DeviceView { buckets, cards });
            }
            Dimension::Region => {
                let scatter = region_scatter(&aggregation.buckets);
                let heat = heat_points(&aggregation.buckets, metric);
                let buckets = top_n(aggregation.buckets, &spec, limit);
                report.regions = Some(RegionView {
                    buckets,
                    scatter,
                    heat,
                });
            }
            Dimension::Week => {
                let series = weekly_series(&aggregation.buckets);
                let buckets = top_n(aggregation.buckets, &spec, limit);
                report.weeks = Some(WeekView { buckets, series });
            }
        }
    }

    let output = if config.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    info!("Report written");
    Ok(())
}
