// Visible time window shared by timeseries panels
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Epoch-millisecond window, as reported by the chart widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Build a range from two finite values. NaN and infinities are rejected.
    pub fn from_finite(start: f64, end: f64) -> Option<Self> {
        if start.is_finite() && end.is_finite() {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn approx_eq(&self, other: &TimeRange, tolerance: f64) -> bool {
        (self.start - other.start).abs() <= tolerance && (self.end - other.end).abs() <= tolerance
    }

    /// Human readable form for logs, e.g. `2024-01-01T00:00:00Z..2024-01-01T01:00:00Z`
    pub fn describe(&self) -> String {
        format!("{}..{}", format_millis(self.start), format_millis(self.end))
    }
}

fn format_millis(millis: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

impl fmt::Display for TimeRange {
    // Shortest round-tripping decimal form: 1000.0 prints as "1000"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}
