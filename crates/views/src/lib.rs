//! View assembly — chart data, demographic tables, summary cards, and all
//! display formatting over merged buckets.

pub mod cards;
pub mod charts;
pub mod format;
pub mod tables;

pub use cards::{device_cards, gender_cards, DeviceCard, MetricCard};
pub use charts::{
    bars_by, heat_points, region_scatter, weekly_series, BarDatum, HeatPoint, ScatterPoint,
    SeriesPoint, REVENUE_BAR_COLOR, SPEND_BAR_COLOR,
};
pub use tables::{gender_rows, DemographicRow};
