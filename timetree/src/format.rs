//! Text produced for bars, the axis and the scrubber, and how wide it is.

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use unicode_width::UnicodeWidthStr;

/// Maps a bar's or section's `[start, end]` to its label.
#[derive(Clone)]
pub struct DurationFormatter(Arc<dyn Fn(f64, f64) -> String + Send + Sync>);

impl DurationFormatter {
    pub fn new(f: impl Fn(f64, f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn format(&self, start: f64, end: f64) -> String {
        (self.0)(start, end)
    }
}

impl Default for DurationFormatter {
    /// Milliseconds shown as seconds: `(end - start) / 1000` followed by `s`.
    fn default() -> Self {
        Self::new(|start, end| format!("{}s", (end - start) / 1000.0))
    }
}

impl fmt::Debug for DurationFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DurationFormatter(..)")
    }
}

/// Maps a time value to the text used for axis ticks and the scrubber.
#[derive(Clone)]
pub struct TimeFormatter(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl TimeFormatter {
    pub fn new(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn format(&self, time: f64) -> String {
        (self.0)(time)
    }
}

impl Default for TimeFormatter {
    /// Milliseconds since the epoch as UTC `HH:MM:SS.mmm`.
    fn default() -> Self {
        Self::new(format_utc_millis)
    }
}

impl fmt::Debug for TimeFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeFormatter(..)")
    }
}

/// Format milliseconds since the epoch as UTC `HH:MM:SS.mmm`.
///
/// Fractional milliseconds are truncated. Values outside chrono's range
/// format as an empty string.
pub fn format_utc_millis(ms: f64) -> String {
    if !ms.is_finite() {
        return String::new();
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
        .map(|t| t.format("%H:%M:%S%.3f").to_string())
        .unwrap_or_default()
}

/// Measures rendered text, so the scrubber can keep its readout on screen.
pub trait TextMeasure: Send + Sync {
    fn width(&self, text: &str) -> f64;
}

/// Fixed advance per terminal column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monospace {
    pub advance: f64,
}

impl Monospace {
    pub const fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for Monospace {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl TextMeasure for Monospace {
    fn width(&self, text: &str) -> f64 {
        text.width() as f64 * self.advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_duration_formatter() {
        let f = DurationFormatter::default();
        assert_eq!(f.format(1000.0, 3000.0), "2s");
        assert_eq!(f.format(0.0, 1500.0), "1.5s");
    }

    #[test]
    fn test_utc_millis() {
        assert_eq!(format_utc_millis(0.0), "00:00:00.000");
        assert_eq!(format_utc_millis(3_723_004.9), "01:02:03.004");
        assert_eq!(format_utc_millis(f64::NAN), "");
    }

    #[test]
    fn test_monospace_counts_columns() {
        assert_eq!(Monospace::new(1.0).width("abc"), 3.0);
        assert_eq!(Monospace::new(2.0).width("日本"), 8.0);
    }
}
