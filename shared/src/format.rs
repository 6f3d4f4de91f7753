//! Display formatting
//!
//! The only place where money is rounded: the venue currency (kyat) has no
//! subunit, so amounts are shown as whole units with thousands separators.

use crate::types::Language;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as `12,345 Ks` (en) or `12,345 ကျပ်` (mm)
pub fn format_currency(amount: Decimal, lang: Language) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    match lang {
        Language::En => format!("{sign}{grouped} Ks"),
        Language::Mm => format!("{sign}{grouped} ကျပ်"),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format elapsed milliseconds as `HH:MM:SS`, or `MM:SS` under one hour.
/// Negative input shows as `00:00`.
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
