/// Site registry loader (sites.toml) and run settings.
///
/// Separates site metadata from code, making it easy to add a swim site,
/// adjust its watercourse list or recalibrate its upstream threshold
/// without recompiling.

use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::OverflowError;
use crate::sites::Site;

/// Default location of the site registry, relative to the working directory.
pub const DEFAULT_SITES_PATH: &str = "sites.toml";

/// Wessex Water storm overflow activity feature layer.
pub const DEFAULT_OVERFLOW_API_URL: &str = "https://services.arcgis.com/3SZ6e0uCvPROr4mS/ArcGIS/rest/services/Wessex_Water_Storm_Overflow_Activity/FeatureServer/0/query";

/// Open-Meteo daily forecast endpoint.
pub const DEFAULT_FORECAST_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

// ---------------------------------------------------------------------------
// Site registry
// ---------------------------------------------------------------------------

/// Root structure for TOML parsing
#[derive(Debug, Deserialize)]
struct SiteRegistry {
    #[serde(default)]
    site: Vec<Site>,
}

/// Parses and validates a site registry from TOML text.
pub fn parse_sites(contents: &str) -> Result<Vec<Site>, OverflowError> {
    let registry: SiteRegistry = toml::from_str(contents)
        .map_err(|e| OverflowError::ConfigError(format!("invalid site registry: {}", e)))?;

    validate_sites(&registry.site)?;
    Ok(registry.site)
}

/// Loads the site registry from `path`.
///
/// # Errors
/// `OverflowError::ConfigError` if the file is unreadable, malformed, or
/// fails validation. The report cannot run without a valid registry.
pub fn load_sites(path: &Path) -> Result<Vec<Site>, OverflowError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        OverflowError::ConfigError(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_sites(&contents)
}

fn validate_sites(sites: &[Site]) -> Result<(), OverflowError> {
    if sites.is_empty() {
        return Err(OverflowError::ConfigError("no sites configured".to_string()));
    }

    let mut seen = HashSet::new();
    for site in sites {
        if site.name.trim().is_empty() {
            return Err(OverflowError::ConfigError(format!(
                "site '{}' has an empty name",
                site.slug
            )));
        }
        if !site.has_valid_slug() {
            return Err(OverflowError::ConfigError(format!(
                "site '{}' has invalid slug '{}' (use letters, digits, '-' or '_')",
                site.name, site.slug
            )));
        }
        if site.watercourses.is_empty() {
            return Err(OverflowError::ConfigError(format!(
                "site '{}' lists no watercourses",
                site.slug
            )));
        }
        if !seen.insert(site.slug.as_str()) {
            return Err(OverflowError::ConfigError(format!(
                "duplicate site slug '{}'",
                site.slug
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Run settings
// ---------------------------------------------------------------------------

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub overflow_api_url: String,
    pub forecast_api_url: String,
    /// Directory the HTML and map data are written to.
    pub output_dir: PathBuf,
    /// How far back to look for overflow events.
    pub window_hours: i64,
    /// Cap on records requested per site.
    pub max_records: u32,
    /// Daily rainfall above this many millimetres produces a warning.
    pub rain_threshold_mm: f64,
    pub forecast_days: u32,
    pub forecast_timeout: Duration,
    /// Skip precipitation lookups entirely.
    pub skip_forecast: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            overflow_api_url: DEFAULT_OVERFLOW_API_URL.to_string(),
            forecast_api_url: DEFAULT_FORECAST_API_URL.to_string(),
            output_dir: PathBuf::from("docs"),
            window_hours: 48,
            max_records: 1000,
            rain_threshold_mm: 5.0,
            forecast_days: 3,
            forecast_timeout: Duration::from_secs(10),
            skip_forecast: false,
        }
    }
}

impl RunConfig {
    /// Defaults overridden by `OVERFLOW_API_URL`, `FORECAST_API_URL` and
    /// `OUTPUT_DIR`, after loading `.env` if one exists.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = env::var("OVERFLOW_API_URL") {
            config.overflow_api_url = url;
        }
        if let Ok(url) = env::var("FORECAST_API_URL") {
            config.forecast_api_url = url;
        }
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::{Axis, Comparison};

    const ONE_SITE: &str = r#"
        [[site]]
        slug = "chew"
        name = "River Chew at Publow"
        latitude = 51.375278
        longitude = -2.543306
        watercourses = ["RIVER CHEW"]

        [site.upstream]
        axis = "longitude"
        comparison = "less_than"
        threshold = -2.543306
    "#;

    #[test]
    fn test_load_shipped_registry_succeeds() {
        let sites = load_sites(Path::new(DEFAULT_SITES_PATH)).expect("sites.toml should load");
        assert_eq!(sites.len(), 5, "should ship five swim sites");
    }

    #[test]
    fn test_shipped_registry_order_and_slugs() {
        let sites = load_sites(Path::new(DEFAULT_SITES_PATH)).expect("sites.toml should load");
        let slugs: Vec<_> = sites.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, ["conham", "salford", "warleigh", "chew", "farleigh"]);
    }

    #[test]
    fn test_conham_keeps_calibrated_threshold() {
        let sites = load_sites(Path::new(DEFAULT_SITES_PATH)).expect("sites.toml should load");
        let conham = sites.iter().find(|s| s.slug == "conham").expect("conham configured");
        assert_eq!(conham.upstream.axis, Axis::Longitude);
        assert_eq!(conham.upstream.comparison, Comparison::LessThan);
        assert_eq!(conham.upstream.threshold, -2.527091);
        assert!(conham.watercourses.contains(&"RIVER AVON".to_string()));
        assert!(!conham.watercourses.contains(&"bathford brook (s)".to_string()));
    }

    #[test]
    fn test_all_sites_have_plausible_coordinates() {
        for site in load_sites(Path::new(DEFAULT_SITES_PATH)).expect("sites.toml should load") {
            assert!(site.latitude > 51.0 && site.latitude < 52.0, "{}", site.name);
            assert!(site.longitude > -3.0 && site.longitude < -2.0, "{}", site.name);
        }
    }

    #[test]
    fn test_parse_single_site() {
        let sites = parse_sites(ONE_SITE).expect("should parse");
        assert_eq!(sites[0].name, "River Chew at Publow");
        assert_eq!(sites[0].watercourse_refs(), ["RIVER CHEW"]);
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        let result = parse_sites("");
        assert!(matches!(result, Err(OverflowError::ConfigError(_))));
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let doubled = format!("{}\n{}", ONE_SITE, ONE_SITE);
        match parse_sites(&doubled) {
            Err(OverflowError::ConfigError(msg)) => assert!(msg.contains("duplicate")),
            other => panic!("expected duplicate slug error, got {:?}", other),
        }
    }

    #[test]
    fn test_site_without_watercourses_is_rejected() {
        let empty = ONE_SITE.replace(r#"["RIVER CHEW"]"#, "[]");
        assert!(matches!(parse_sites(&empty), Err(OverflowError::ConfigError(_))));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let blank = ONE_SITE.replace(r#""River Chew at Publow""#, r#""   ""#);
        match parse_sites(&blank) {
            Err(OverflowError::ConfigError(msg)) => assert!(msg.contains("empty name"), "got {}", msg),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unsafe_slug_is_rejected() {
        let unsafe_slug = ONE_SITE.replace(r#"slug = "chew""#, r#"slug = "../chew""#);
        assert!(matches!(parse_sites(&unsafe_slug), Err(OverflowError::ConfigError(_))));
    }

    #[test]
    fn test_unknown_axis_is_rejected() {
        let bad = ONE_SITE.replace(r#"axis = "longitude""#, r#"axis = "altitude""#);
        assert!(matches!(parse_sites(&bad), Err(OverflowError::ConfigError(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_sites(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(OverflowError::ConfigError(_))));
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.window_hours, 48);
        assert_eq!(config.max_records, 1000);
        assert_eq!(config.rain_threshold_mm, 5.0);
        assert_eq!(config.forecast_days, 3);
        assert_eq!(config.output_dir, PathBuf::from("docs"));
        assert!(!config.skip_forecast);
    }
}
