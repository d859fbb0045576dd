/// Clients for the two external data sources.
///
/// - `overflow` - storm overflow activity (ArcGIS FeatureServer query)
/// - `forecast` - Open-Meteo daily precipitation outlook
/// - `fixtures` (test only) - representative API response payloads

pub mod fixtures;
pub mod forecast;
pub mod overflow;
