/// Storm overflow activity client (ArcGIS FeatureServer query endpoint).
///
/// Handles `where` clause construction, URL construction and JSON response
/// parsing for the water company's overflow activity layer:
///   https://services.arcgis.com/.../Wessex_Water_Storm_Overflow_Activity/FeatureServer/0/query
///
/// The layer returns `{ "features": [ { "attributes": { ... } } ] }`. See
/// `fixtures.rs` for annotated examples of the response structure.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::model::{DischargeRecord, OverflowError};

/// Fields requested from the layer, in the order the service documents them.
pub const OUT_FIELDS: &[&str] = &[
    "Id",
    "Company",
    "Status",
    "StatusStart",
    "LatestEventStart",
    "LatestEventEnd",
    "Latitude",
    "Longitude",
    "ReceivingWaterCourse",
    "LastUpdated",
];

pub const ORDER_BY: &str = "LatestEventStart DESC";

// ---------------------------------------------------------------------------
// Serde structures for the FeatureServer JSON response
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Vec<Feature>,
    error: Option<ArcGisError>,
}

#[derive(Deserialize)]
struct ArcGisError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Attributes {
    #[serde(rename = "Id")]
    id: Option<Value>,
    #[serde(rename = "Company")]
    company: Option<Value>,
    #[serde(rename = "Status")]
    status: Option<Value>,
    #[serde(rename = "LatestEventStart")]
    latest_event_start: Option<Value>,
    #[serde(rename = "LatestEventEnd")]
    latest_event_end: Option<Value>,
    #[serde(rename = "Latitude")]
    latitude: Option<Value>,
    #[serde(rename = "Longitude")]
    longitude: Option<Value>,
    #[serde(rename = "ReceivingWaterCourse")]
    receiving_water_course: Option<Value>,
    #[serde(rename = "LastUpdated")]
    last_updated: Option<Value>,
}

/// Integer fields (epoch milliseconds, status codes) occasionally arrive as floats.
fn as_integer(value: &Option<Value>) -> Option<i64> {
    match value.as_ref()? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Any attribute of the wrong type reads as absent.
fn as_float(value: &Option<Value>) -> Option<f64> {
    value.as_ref()?.as_f64()
}

fn as_text(value: &Option<Value>) -> Option<String> {
    value.as_ref()?.as_str().map(str::to_string)
}

impl From<Attributes> for DischargeRecord {
    fn from(attrs: Attributes) -> Self {
        let id = match &attrs.id {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        DischargeRecord {
            id,
            company: as_text(&attrs.company),
            receiving_watercourse: as_text(&attrs.receiving_water_course),
            status: as_integer(&attrs.status),
            event_start: as_integer(&attrs.latest_event_start),
            event_end: as_integer(&attrs.latest_event_end),
            latitude: as_float(&attrs.latitude),
            longitude: as_float(&attrs.longitude),
            last_updated: as_integer(&attrs.last_updated),
        }
    }
}

// ---------------------------------------------------------------------------
// Query construction
// ---------------------------------------------------------------------------

/// Start of the recency window: `now - hours`, truncated to whole seconds.
pub fn window_start(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    let start = now - Duration::hours(hours);
    DateTime::from_timestamp(start.timestamp(), 0).unwrap_or(start)
}

/// Quotes a string literal for the ArcGIS SQL dialect.
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Builds the `where` expression selecting events on any of `watercourses`
/// that started at or after `since`.
///
/// ```text
/// (ReceivingWaterCourse = 'RIVER AVON' OR ReceivingWaterCourse = 'RIVER CHEW')
///     AND LatestEventStart >= DATE '2024-05-01 12:00:00'
/// ```
pub fn build_where_clause(watercourses: &[&str], since: DateTime<Utc>) -> String {
    let names = watercourses
        .iter()
        .map(|name| format!("ReceivingWaterCourse = {}", sql_literal(name)))
        .collect::<Vec<_>>()
        .join(" OR ");

    format!(
        "({}) AND LatestEventStart >= DATE '{}'",
        names,
        since.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Builds the full query URL with every parameter percent-encoded.
pub fn build_query_url(base_url: &str, where_clause: &str, max_records: u32) -> String {
    format!(
        "{}?where={}&outFields={}&orderByFields={}&f=json&resultRecordCount={}",
        base_url,
        urlencoding::encode(where_clause),
        urlencoding::encode(&OUT_FIELDS.join(",")),
        urlencoding::encode(ORDER_BY),
        max_records
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a FeatureServer query response into discharge records.
///
/// Attributes that are absent, null or of the wrong type become `None`;
/// nothing is filtered here. A body without a `features` key yields an empty list.
///
/// # Errors
/// - `OverflowError::ParseError`: malformed JSON, or the service answered
///   with an `error` object instead of features.
pub fn parse_query_response(json: &str) -> Result<Vec<DischargeRecord>, OverflowError> {
    let response: QueryResponse = serde_json::from_str(json)
        .map_err(|e| OverflowError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if let Some(err) = response.error {
        return Err(OverflowError::ParseError(format!(
            "service returned error {}: {}",
            err.code.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string()),
            err.message.unwrap_or_default()
        )));
    }

    Ok(response
        .features
        .into_iter()
        .map(|f| DischargeRecord::from(f.attributes))
        .collect())
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Fetches overflow events on `watercourses` from the last `window_hours`.
///
/// No retry: any transport failure or non-2xx status is returned to the
/// caller, which treats it as fatal for the run.
pub fn fetch_discharges(
    client: &reqwest::blocking::Client,
    base_url: &str,
    watercourses: &[&str],
    now: DateTime<Utc>,
    window_hours: i64,
    max_records: u32,
) -> Result<Vec<DischargeRecord>, OverflowError> {
    let since = window_start(now, window_hours);
    let where_clause = build_where_clause(watercourses, since);
    let url = build_query_url(base_url, &where_clause, max_records);

    debug!(%where_clause, "querying overflow activity");

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()?;

    if !response.status().is_success() {
        return Err(OverflowError::HttpError(response.status().as_u16()));
    }

    let body = response.text()?;
    let records = parse_query_response(&body)?;
    info!(count = records.len(), "overflow records received");
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
