/// overflow_watch: storm overflow risk reports for river swim sites.
///
/// # Module structure
///
/// ```text
/// overflow_watch
/// ├── model       - shared data types (DischargeRecord, BandTotals, RiskLevel, OverflowError, …)
/// ├── config      - site registry loader (sites.toml) and run settings
/// ├── sites       - swim site definition and the per-site upstream predicate
/// ├── geo         - haversine distance in miles
/// ├── logging     - tracing subscriber setup
/// ├── ingest
/// │   ├── overflow - ArcGIS overflow activity: where clause, URL, JSON parsing
/// │   ├── forecast - Open-Meteo daily precipitation and rain warnings
/// │   └── fixtures (test only) - representative API response payloads
/// ├── analysis
/// │   ├── bands   - upstream filter + distance-band duration totals
/// │   └── risk    - Low / Medium / High classification
/// ├── report
/// │   ├── html    - per-site pages and index page
/// │   └── map     - index.js site list and centroid for the map
/// └── pipeline    - sequential per-site run, render and write
/// ```

pub mod analysis;
pub mod config;
pub mod geo;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod sites;
