//! Aggregation engine — dimension reducers, spend/revenue allocation,
//! derived-metric arithmetic, and ranking over merged buckets.

pub mod allocation;
pub mod metrics;
pub mod ranking;
pub mod reducer;

pub use ranking::{metric_value, rank, top_n, CampaignFilter, Metric, SortKey, SortOrder, SortSpec};
pub use reducer::{
    aggregate, AggregateOptions, Aggregation, BucketKey, BucketStats, Dimension, Gender,
    MergedBucket,
};
