//! Report formatting utilities for terminal output
//!
//! Text charts for the spending trend and the category split.

use crate::models::Money;
use crate::reports::{CategoryShare, TrendPoint};

const BAR_WIDTH: usize = 40;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to at most `max_len` characters, ending with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Bar chart of trend buckets, one line per bucket in the given order
pub fn format_trend_chart(points: &[TrendPoint], currency: &str) -> String {
    if points.is_empty() {
        return "  No spending recorded.\n".to_string();
    }

    let label_width = points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);
    let max_total = points
        .iter()
        .map(|p| p.total.as_major())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    for point in points {
        output.push_str(&format!(
            "{:<label_width$}  {}  {:>14}\n",
            point.label,
            format_bar(point.total.as_major(), max_total, BAR_WIDTH),
            point.total.format_with_symbol(currency),
            label_width = label_width,
        ));
    }
    output
}

/// Category split with share of the total and a proportional bar
pub fn format_category_chart(shares: &[CategoryShare], currency: &str) -> String {
    if shares.is_empty() {
        return "  No spending recorded.\n".to_string();
    }

    let max_value = shares
        .iter()
        .map(|s| s.value)
        .max()
        .unwrap_or_else(Money::zero)
        .as_major();

    let mut output = String::new();
    for share in shares {
        output.push_str(&format!(
            "{:<13}  {}  {:>14}  {:>6}\n",
            share.name.name(),
            format_bar(share.value.as_major(), max_value, BAR_WIDTH),
            share.value.format_with_symbol(currency),
            format_percentage(share.percentage),
        ));
    }
    output
}
