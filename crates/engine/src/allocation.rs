//! Weighted redistribution of campaign-level money across sub-buckets.
//!
//! Demographic breakdown records carry counters but no spend or revenue of
//! their own, so a campaign's totals are apportioned to them proportionally
//! to a reference counter (impression share for age groups, click share for
//! gender totals). When the sub-bucket references exhaust the reference
//! total, the allocated amounts sum back to the original within
//! floating-point tolerance. Stateless and deterministic; inputs are never
//! mutated.

use crate::metrics::share;

/// Weight of one sub-bucket against the reference total, 0 when the
/// reference total is 0.
pub fn weight(sub_reference: u64, reference_total: u64) -> f64 {
    share(sub_reference, reference_total)
}

/// Apportion an amount across sub-buckets by their reference counters.
pub fn distribute(amount: f64, reference_total: u64, sub_references: &[u64]) -> Vec<f64> {
    sub_references
        .iter()
        .map(|&sub| amount * weight(sub, reference_total))
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
