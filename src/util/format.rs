//! Display formatting helpers
//!
//! Provides the human-readable forms of hour counts and device shares used
//! by the table and the stats panel.

/// Format an hour count the way the weekly table shows it
///
/// # Examples
/// ```
/// use screentime::util::format::format_hours;
///
/// assert_eq!(format_hours(Some(15.0)), "15 h");
/// assert_eq!(format_hours(Some(7.5)), "7.5 h");
/// assert_eq!(format_hours(None), "- h");
/// ```
pub fn format_hours(hours: Option<f64>) -> String {
    match hours {
        Some(h) if h.is_finite() => {
            // -0.0 prints as "-0"
            let h = if h == 0.0 { 0.0 } else { h };
            format!("{} h", h)
        }
        _ => "- h".to_string(),
    }
}

/// Share of `part` in `total` as a whole percentage
///
/// # Examples
/// ```
/// use screentime::util::format::format_share;
///
/// assert_eq!(format_share(5.0, 20.0), "25%");
/// assert_eq!(format_share(1.0, 0.0), "0%");
/// ```
pub fn format_share(part: f64, total: f64) -> String {
    format!("{:.0}%", share(part, total) * 100.0)
}

/// Fraction of `part` in `total`, clamped to 0.0..=1.0
pub fn share(part: f64, total: f64) -> f64 {
    if !part.is_finite() || !total.is_finite() || total <= 0.0 {
        return 0.0;
    }
    (part / total).clamp(0.0, 1.0)
}

/// Text bar of `width` cells filled proportionally to `fraction`
pub fn share_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (fraction * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}
