//! Display formatting. Everything upstream of this module works on raw
//! numbers; strings are produced here and nowhere else.

use chrono::NaiveDate;

/// Group an integer count with thousands separators: `1234567` -> `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Dollar amount with grouping and cents: `1234.5` -> `$1,234.50`.
/// Amounts are non-negative by the loader's validation.
pub fn currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as u64;
    format!("${}.{:02}", thousands(cents / 100), cents % 100)
}

/// Percent display of a raw fraction: `0.1234` -> `12.34%`.
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Week range label in the dashboard style: `Aug 4 - Aug 10`.
pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
