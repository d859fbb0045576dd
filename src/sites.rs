/// Swim site definitions and the per-site upstream predicate.
///
/// A site is a reference point on a river plus the list of receiving
/// watercourses whose overflows can reach it. Whether a given overflow is
/// "upstream" is approximated by a single threshold on latitude or
/// longitude, chosen per site by looking at the river on a map. This is not
/// a watershed computation and the thresholds are kept exactly as
/// calibrated.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Upstream predicate
// ---------------------------------------------------------------------------

/// Which coordinate the upstream threshold applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Direction of the threshold comparison (strict in both cases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    LessThan,
    GreaterThan,
}

/// A single-axis linear threshold deciding whether a discharge point is
/// upstream of a site.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UpstreamRule {
    pub axis: Axis,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl UpstreamRule {
    pub fn is_upstream(&self, latitude: f64, longitude: f64) -> bool {
        let value = match self.axis {
            Axis::Latitude => latitude,
            Axis::Longitude => longitude,
        };
        match self.comparison {
            Comparison::LessThan => value < self.threshold,
            Comparison::GreaterThan => value > self.threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

/// A monitored swim site, as loaded from `sites.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Site {
    /// File stem for the per-site page (`<slug>.html`).
    pub slug: String,
    /// Human-readable label, e.g. "Avon at Conham River".
    pub name: String,
    /// WGS84 latitude of the swim spot.
    pub latitude: f64,
    /// WGS84 longitude of the swim spot.
    pub longitude: f64,
    /// Exact `ReceivingWaterCourse` values relevant to this site.
    pub watercourses: Vec<String>,
    pub upstream: UpstreamRule,
}

impl Site {
    pub fn is_upstream(&self, latitude: f64, longitude: f64) -> bool {
        self.upstream.is_upstream(latitude, longitude)
    }

    /// Watercourse names as `&str`, for passing to the query builder.
    pub fn watercourse_refs(&self) -> Vec<&str> {
        self.watercourses.iter().map(|s| s.as_str()).collect()
    }

    /// True if the slug is usable as a file stem.
    pub fn has_valid_slug(&self) -> bool {
        !self.slug.is_empty()
            && self
                .slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) fn test_site(rule: UpstreamRule) -> Site {
    Site {
        slug: "conham".to_string(),
        name: "Avon at Conham River".to_string(),
        latitude: 51.444858,
        longitude: -2.534812,
        watercourses: vec!["RIVER AVON".to_string(), "RIVER CHEW".to_string()],
        upstream: rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONHAM_RULE: UpstreamRule = UpstreamRule {
        axis: Axis::Longitude,
        comparison: Comparison::LessThan,
        threshold: -2.527091,
    };

    #[test]
    fn test_longitude_less_than_rule() {
        assert!(CONHAM_RULE.is_upstream(51.44, -2.60));
        assert!(!CONHAM_RULE.is_upstream(51.44, -2.40));
    }

    #[test]
    fn test_threshold_itself_is_not_upstream() {
        assert!(!CONHAM_RULE.is_upstream(51.44, -2.527091));

        let north = UpstreamRule {
            axis: Axis::Latitude,
            comparison: Comparison::GreaterThan,
            threshold: 51.3,
        };
        assert!(!north.is_upstream(51.3, 0.0));
        assert!(north.is_upstream(51.31, 0.0));
    }

    #[test]
    fn test_latitude_rule_ignores_longitude() {
        let south = UpstreamRule {
            axis: Axis::Latitude,
            comparison: Comparison::LessThan,
            threshold: 51.375278,
        };
        assert!(south.is_upstream(51.30, -180.0));
        assert!(south.is_upstream(51.30, 180.0));
        assert!(!south.is_upstream(51.40, -2.54));
    }

    #[test]
    fn test_site_delegates_to_rule() {
        let site = test_site(CONHAM_RULE);
        assert!(site.is_upstream(51.45, -2.58));
        assert!(!site.is_upstream(51.45, -2.50));
    }

    #[test]
    fn test_rule_deserializes_from_toml() {
        let rule: UpstreamRule = toml::from_str(
            r#"
            axis = "latitude"
            comparison = "greater_than"
            threshold = 51.2
            "#,
        )
        .expect("rule should parse");
        assert_eq!(rule.axis, Axis::Latitude);
        assert_eq!(rule.comparison, Comparison::GreaterThan);
        assert_eq!(rule.threshold, 51.2);
    }

    #[test]
    fn test_slug_validation() {
        let mut site = test_site(CONHAM_RULE);
        assert!(site.has_valid_slug());
        site.slug = "farleigh-hungerford_2".to_string();
        assert!(site.has_valid_slug());
        site.slug = "../escape".to_string();
        assert!(!site.has_valid_slug());
        site.slug = String::new();
        assert!(!site.has_valid_slug());
    }
}
