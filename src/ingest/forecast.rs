/// Open-Meteo daily precipitation forecast client.
///
/// Fetches a short daily outlook for a site's coordinates and turns wet
/// days into human-readable warnings. Rain washes more overflow into the
/// river, so a wet forecast means conditions are likely to get worse.
///
/// API Documentation: https://open-meteo.com/en/docs
///
/// Every failure on this path is non-fatal: `fetch_warnings` logs and
/// returns an empty list so the site report is still produced.

use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::config::RunConfig;
use crate::model::{OverflowError, PrecipitationWarning};
use crate::sites::Site;

/// Appended to every warning message.
pub const ADVISORY: &str = "water quality likely to get worse after this day";

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    precipitation_sum: Vec<Option<f64>>,
}

/// One forecast day. `rainfall_mm` is `None` when the model has no value.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPrecipitation {
    pub date: NaiveDate,
    pub rainfall_mm: Option<f64>,
}

// ============================================================================
// URL construction and parsing
// ============================================================================

pub fn build_forecast_url(base_url: &str, latitude: f64, longitude: f64, days: u32) -> String {
    format!(
        "{}?latitude={}&longitude={}&daily=precipitation_sum&forecast_days={}&timezone=UTC",
        base_url, latitude, longitude, days
    )
}

/// Parses the `daily` block into one entry per forecast day.
///
/// # Errors
/// - `OverflowError::ParseError`: malformed JSON, an `error` response, a
///   missing `daily` block, or an unparseable date.
pub fn parse_forecast_response(json: &str) -> Result<Vec<DailyPrecipitation>, OverflowError> {
    let response: ForecastResponse = serde_json::from_str(json)
        .map_err(|e| OverflowError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if response.error {
        return Err(OverflowError::ParseError(format!(
            "forecast service error: {}",
            response.reason.unwrap_or_default()
        )));
    }

    let daily = response
        .daily
        .ok_or_else(|| OverflowError::ParseError("Missing daily block".to_string()))?;

    daily
        .time
        .iter()
        .zip(daily.precipitation_sum)
        .map(|(day, rainfall_mm)| -> Result<DailyPrecipitation, OverflowError> {
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map_err(|e| OverflowError::ParseError(format!("bad date '{}': {}", day, e)))?;
            Ok(DailyPrecipitation { date, rainfall_mm })
        })
        .collect()
}

/// Builds a warning for every day with rainfall strictly above `threshold_mm`.
pub fn rain_warnings(days: &[DailyPrecipitation], threshold_mm: f64) -> Vec<PrecipitationWarning> {
    days.iter()
        .filter_map(|day| {
            let mm = day.rainfall_mm?;
            if mm <= threshold_mm {
                return None;
            }
            Some(PrecipitationWarning {
                date: day.date,
                rainfall_mm: mm,
                message: format!(
                    "{}: {:.1} mm of rain forecast, {}",
                    day.date.format("%Y-%m-%d"),
                    mm,
                    ADVISORY
                ),
            })
        })
        .collect()
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Fetch the daily precipitation outlook for a coordinate.
pub fn fetch_daily_precipitation(
    client: &reqwest::blocking::Client,
    base_url: &str,
    latitude: f64,
    longitude: f64,
    days: u32,
    timeout: Duration,
) -> Result<Vec<DailyPrecipitation>, OverflowError> {
    let url = build_forecast_url(base_url, latitude, longitude, days);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .timeout(timeout)
        .send()?;

    if !response.status().is_success() {
        return Err(OverflowError::HttpError(response.status().as_u16()));
    }

    parse_forecast_response(&response.text()?)
}

/// Fetch and evaluate the outlook for a site, swallowing any failure.
pub fn fetch_warnings(
    client: &reqwest::blocking::Client,
    config: &RunConfig,
    site: &Site,
) -> Vec<PrecipitationWarning> {
    let outlook = fetch_daily_precipitation(
        client,
        &config.forecast_api_url,
        site.latitude,
        site.longitude,
        config.forecast_days,
        config.forecast_timeout,
    );

    match outlook {
        Ok(days) => rain_warnings(&days, config.rain_threshold_mm),
        Err(e) => {
            warn!(site = %site.slug, error = %e, "precipitation forecast unavailable");
            Vec::new()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
