//! Deterministic text formatting for alert messages.
//!
//! Numbers are rendered the way an `en-US` locale would, independent of the
//! host environment, so alert text is stable across machines.

use num_format::{Locale, ToFormattedString};

/// Price with eight decimal places, or `N/A` when the source had no usable price.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => format!("{:.8}", p),
        _ => "N/A".to_string(),
    }
}

/// Thousands-separated amount with at most three fraction digits.
pub fn format_usd_amount(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let scaled = (value.abs() * 1000.0).round() as u64;
    let whole = scaled / 1000;
    let frac = scaled % 1000;

    let mut out = String::new();
    if value < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(&whole.to_formatted_string(&Locale::en));
    if frac != 0 {
        let frac = format!("{:03}", frac);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

/// Human-readable pair age: `Just now` under one minute, otherwise `<n>m ago`.
pub fn format_age(created_at_ms: Option<i64>, now_ms: i64) -> String {
    let Some(created) = created_at_ms else {
        return "Unknown".to_string();
    };

    let minutes = (now_ms - created).div_euclid(60_000);
    if minutes < 1 {
        "Just now".to_string()
    } else {
        format!("{}m ago", minutes)
    }
}
