//! Derived ratio metrics computed from base counters.
//!
//! Every function is total over non-negative inputs: a zero denominator or
//! an overflowing quotient yields 0, never NaN or infinity, so callers can
//! treat every output as format-ready. Ratios are raw fractions (a CTR of
//! 0.10 is 10%); percent formatting belongs to the view layer.

/// Zero-guarded division of two amounts. Quotients outside the finite
/// f64 range collapse to 0 as well.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        0.0
    }
}

/// Fraction of a counter total, 0 when the total is 0.
pub fn share(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64
    } else {
        0.0
    }
}

/// Click-through rate: clicks per impression.
pub fn ctr(clicks: u64, impressions: u64) -> f64 {
    share(clicks, impressions)
}

/// Conversion rate: conversions per click.
pub fn conversion_rate(conversions: u64, clicks: u64) -> f64 {
    share(conversions, clicks)
}

/// Cost per click.
pub fn cpc(spend: f64, clicks: u64) -> f64 {
    ratio(spend, clicks as f64)
}

/// Cost per acquisition.
pub fn cpa(spend: f64, conversions: u64) -> f64 {
    ratio(spend, conversions as f64)
}

/// Return on ad spend: revenue per unit of spend.
pub fn roas(revenue: f64, spend: f64) -> f64 {
    ratio(revenue, spend)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
