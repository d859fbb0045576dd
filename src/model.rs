/// Core data types for the storm overflow swim-site report.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no network code, only types and the small helpers
/// that belong to them.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Distance bands
// ---------------------------------------------------------------------------

/// Inclusive upper edges of the distance bands, in miles, ascending.
pub const BAND_EDGES_MILES: [f64; 5] = [1.0, 5.0, 10.0, 20.0, 50.0];

/// Number of distance bands.
pub const BAND_COUNT: usize = BAND_EDGES_MILES.len();

// ---------------------------------------------------------------------------
// Discharge records
// ---------------------------------------------------------------------------

/// A single storm overflow as returned by the overflow activity service.
///
/// Every field except the identifier may be absent. Timestamps are epoch
/// milliseconds; `event_end` is `None` while a discharge is ongoing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DischargeRecord {
    pub id: String,
    pub company: Option<String>,
    pub receiving_watercourse: Option<String>,
    pub status: Option<i64>,
    pub event_start: Option<i64>,
    pub event_end: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub last_updated: Option<i64>,
}

impl DischargeRecord {
    /// Returns `(start_ms, end_ms, lat, lon)` when every field needed for
    /// aggregation is present.
    pub fn usable_fields(&self) -> Option<(i64, i64, f64, f64)> {
        Some((
            self.event_start?,
            self.event_end?,
            self.latitude?,
            self.longitude?,
        ))
    }
}

// ---------------------------------------------------------------------------
// Aggregation results
// ---------------------------------------------------------------------------

/// Accumulated discharge duration in seconds for each distance band,
/// in the same order as `BAND_EDGES_MILES`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandTotals(pub [f64; BAND_COUNT]);

impl BandTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seconds(&self, band: usize) -> f64 {
        self.0[band]
    }

    pub fn add(&mut self, band: usize, seconds: f64) {
        self.0[band] += seconds;
    }

    /// Sum of all five bands.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Iterates `(upper_edge_miles, seconds)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        BAND_EDGES_MILES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Coarse risk classification for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Lowercase name used for the CSS class suffix (`risk-high` etc).
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "risk-low",
            RiskLevel::Medium => "risk-medium",
            RiskLevel::High => "risk-high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// A forecast day whose rainfall exceeds the warning threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationWarning {
    pub date: chrono::NaiveDate,
    pub rainfall_mm: f64,
    pub message: String,
}

/// One site's results, collected after the site has been processed.
/// Feeds both the index page and the map data file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportIndexEntry {
    pub name: String,
    pub slug: String,
    pub risk: RiskLevel,
    pub latitude: f64,
    pub longitude: f64,
    pub warnings: Vec<PrecipitationWarning>,
}

impl ReportIndexEntry {
    /// Relative link to the per-site page.
    pub fn link(&self) -> String {
        format!("{}.html", self.slug)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while fetching data or producing the report.
#[derive(Debug, PartialEq)]
pub enum OverflowError {
    /// Non-2xx HTTP response from an upstream API.
    HttpError(u16),
    /// The request could not be sent or the connection failed.
    RequestFailed(String),
    /// The response body could not be deserialized.
    ParseError(String),
    /// The site registry is missing, malformed or inconsistent.
    ConfigError(String),
    /// A report file could not be written.
    OutputError(String),
}

impl fmt::Display for OverflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowError::HttpError(code) => write!(f, "HTTP error: {}", code),
            OverflowError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            OverflowError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            OverflowError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            OverflowError::OutputError(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for OverflowError {}

impl From<reqwest::Error> for OverflowError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => OverflowError::HttpError(status.as_u16()),
            None => OverflowError::RequestFailed(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_are_strictly_ascending() {
        for pair in BAND_EDGES_MILES.windows(2) {
            assert!(pair[0] < pair[1], "band edges must ascend: {:?}", pair);
        }
        assert_eq!(BAND_EDGES_MILES[BAND_COUNT - 1], 50.0);
    }

    #[test]
    fn test_usable_fields_requires_all_four() {
        let complete = DischargeRecord {
            id: "1".to_string(),
            event_start: Some(0),
            event_end: Some(60_000),
            latitude: Some(51.4),
            longitude: Some(-2.5),
            ..Default::default()
        };
        assert_eq!(complete.usable_fields(), Some((0, 60_000, 51.4, -2.5)));

        let ongoing = DischargeRecord { event_end: None, ..complete.clone() };
        assert!(ongoing.usable_fields().is_none(), "ongoing discharge has no end");

        let unplaced = DischargeRecord { longitude: None, ..complete };
        assert!(unplaced.usable_fields().is_none());
    }

    #[test]
    fn test_band_totals_total_and_iter() {
        let mut totals = BandTotals::new();
        totals.add(0, 100.0);
        totals.add(2, 50.0);
        totals.add(2, 25.0);
        assert_eq!(totals.total(), 175.0);
        assert_eq!(totals.seconds(2), 75.0);

        let pairs: Vec<_> = totals.iter().collect();
        assert_eq!(pairs[0], (1.0, 100.0));
        assert_eq!(pairs[4], (50.0, 0.0));
    }

    #[test]
    fn test_risk_level_display_and_class() {
        assert_eq!(RiskLevel::High.to_string(), "High");
        assert_eq!(RiskLevel::Medium.css_class(), "risk-medium");
        assert_eq!(RiskLevel::Low.css_class(), "risk-low");
    }

    #[test]
    fn test_index_entry_link_uses_slug() {
        let entry = ReportIndexEntry {
            name: "Avon at Conham River".to_string(),
            slug: "conham".to_string(),
            risk: RiskLevel::Low,
            latitude: 51.444858,
            longitude: -2.534812,
            warnings: Vec::new(),
        };
        assert_eq!(entry.link(), "conham.html");
    }

    #[test]
    fn test_error_display_messages() {
        assert_eq!(OverflowError::HttpError(503).to_string(), "HTTP error: 503");
        assert!(OverflowError::ConfigError("no sites".into())
            .to_string()
            .contains("no sites"));
    }
}
