/// Test fixtures: representative JSON payloads from the two upstream APIs.
///
/// Overflow activity (ArcGIS FeatureServer `query`, `f=json`) shape:
///   response.features[]
///     .attributes.Id                    - string identifier
///     .attributes.Status                - 1 discharging, 0 stopped, -1 offline
///     .attributes.LatestEventStart      - epoch milliseconds
///     .attributes.LatestEventEnd        - epoch milliseconds, null while ongoing
///     .attributes.Latitude / Longitude  - WGS84 decimal degrees
///     .attributes.ReceivingWaterCourse  - exact watercourse name
///
/// A failed query still returns HTTP 200, with an `error` object in place
/// of `features`.
///
/// Open-Meteo forecast (`daily=precipitation_sum`) shape:
///   response.daily.time[]               - "YYYY-MM-DD" (UTC days)
///   response.daily.precipitation_sum[]  - millimetres, may contain null

/// Four overflows near Conham (ref 51.444858, -2.534812):
///   SO-1021  0.4 mi, upstream, 100 s
///   SO-1187  0.6 mi, east of the -2.527091 threshold (not upstream), 3600 s
///   SO-3300  4.6 mi, upstream, 1800 s
///   SO-2044  ongoing (LatestEventEnd null)
#[cfg(test)]
pub(crate) fn fixture_overflow_conham_json() -> &'static str {
    r#"{
      "objectIdFieldName": "OBJECTID",
      "fields": [],
      "features": [
        {
          "attributes": {
            "Id": "SO-1021",
            "Company": "Wessex Water",
            "Status": 1,
            "StatusStart": 1714560000000,
            "LatestEventStart": 1714560000000,
            "LatestEventEnd": 1714560100000,
            "Latitude": 51.4465,
            "Longitude": -2.5440,
            "ReceivingWaterCourse": "RIVER AVON",
            "LastUpdated": 1714560200000
          }
        },
        {
          "attributes": {
            "Id": "SO-1187",
            "Company": "Wessex Water",
            "Status": 0,
            "StatusStart": 1714550000000,
            "LatestEventStart": 1714546400000,
            "LatestEventEnd": 1714550000000,
            "Latitude": 51.4460,
            "Longitude": -2.5200,
            "ReceivingWaterCourse": "RIVER AVON",
            "LastUpdated": 1714560200000
          }
        },
        {
          "attributes": {
            "Id": "SO-3300",
            "Company": "Wessex Water",
            "Status": 0,
            "StatusStart": 1714565400000,
            "LatestEventStart": 1714563600000,
            "LatestEventEnd": 1714565400000,
            "Latitude": 51.4600,
            "Longitude": -2.6400,
            "ReceivingWaterCourse": "RIVER CHEW",
            "LastUpdated": 1714565500000
          }
        },
        {
          "attributes": {
            "Id": "SO-2044",
            "Company": "Wessex Water",
            "Status": 1,
            "StatusStart": 1714570000000,
            "LatestEventStart": 1714570000000,
            "LatestEventEnd": null,
            "Latitude": 51.4450,
            "Longitude": -2.5400,
            "ReceivingWaterCourse": "horsecombe brook",
            "LastUpdated": 1714570100000
          }
        }
      ]
    }"#
}

/// A successful query that matched nothing.
#[cfg(test)]
pub(crate) fn fixture_overflow_empty_json() -> &'static str {
    r#"{ "objectIdFieldName": "OBJECTID", "fields": [], "features": [] }"#
}

/// ArcGIS reports query failures in-band with HTTP 200.
#[cfg(test)]
pub(crate) fn fixture_overflow_error_json() -> &'static str {
    r#"{
      "error": {
        "code": 400,
        "message": "Unable to complete operation.",
        "details": ["'where' parameter is invalid"]
      }
    }"#
}

/// Three-day outlook for Conham: one wet day (12.3 mm) and one day sitting
/// exactly on the 5 mm threshold, which must not warn.
#[cfg(test)]
pub(crate) fn fixture_forecast_conham_json() -> &'static str {
    r#"{
      "latitude": 51.44,
      "longitude": -2.54,
      "generationtime_ms": 0.05,
      "utc_offset_seconds": 0,
      "timezone": "UTC",
      "timezone_abbreviation": "UTC",
      "elevation": 12.0,
      "daily_units": { "time": "iso8601", "precipitation_sum": "mm" },
      "daily": {
        "time": ["2024-05-03", "2024-05-04", "2024-05-05"],
        "precipitation_sum": [0.4, 12.3, 5.0]
      }
    }"#
}

/// Forecast with a null day (model gap) followed by a wet day.
#[cfg(test)]
pub(crate) fn fixture_forecast_with_null_json() -> &'static str {
    r#"{
      "latitude": 51.33,
      "longitude": -2.29,
      "daily_units": { "time": "iso8601", "precipitation_sum": "mm" },
      "daily": {
        "time": ["2024-05-03", "2024-05-04", "2024-05-05"],
        "precipitation_sum": [null, 6.2, 0.0]
      }
    }"#
}

/// Open-Meteo rejects bad parameters with `{"error": true, "reason": ...}`.
#[cfg(test)]
pub(crate) fn fixture_forecast_error_json() -> &'static str {
    r#"{ "error": true, "reason": "Latitude must be in range of -90 to 90°. Given: 200.0." }"#
}
