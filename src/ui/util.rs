use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`, `-42.5` → `"-$42.50"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val.round_dp(2) < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Short money label for chart bars: `$950`, `$12.3k`, `-$1.5M`.
pub(crate) fn format_compact(val: Decimal) -> String {
    let sign = if val < Decimal::ZERO { "-" } else { "" };
    let abs = val.abs();
    let thousand = Decimal::from(1_000);
    let million = Decimal::from(1_000_000);
    if abs >= million {
        format!("{sign}${:.1}M", (abs / million).round_dp(1))
    } else if abs >= thousand {
        format!("{sign}${:.1}k", (abs / thousand).round_dp(1))
    } else {
        format!("{sign}${:.0}", abs.round_dp(0))
    }
}

/// Chart coordinate for an amount. Values outside `f64` range collapse to 0.
pub(crate) fn chart_value(val: Decimal) -> f64 {
    val.to_f64().unwrap_or(0.0)
}

/// Y-axis bounds covering every value and zero, padded by 10%.
pub(crate) fn axis_bounds(values: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo == hi {
        return [lo - 1.0, hi + 1.0];
    }
    let pad = (hi - lo) * 0.1;
    [
        if lo < 0.0 { lo - pad } else { lo },
        if hi > 0.0 { hi + pad } else { hi },
    ]
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Move down a full page, clamped to the last row.
pub(crate) fn page_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len == 0 {
        return;
    }
    *index = (*index + page).min(len - 1);
    if *index >= *scroll + page {
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

pub(crate) fn page_up(index: &mut usize, scroll: &mut usize, page: usize) {
    *index = index.saturating_sub(page);
    if *index < *scroll {
        *scroll = *index;
    }
}
