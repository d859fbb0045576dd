/// Static report generation.
///
/// Aggregation and classification produce plain data (`SiteReport`,
/// `ReportIndexEntry`); this module turns that data into files:
///
/// - `html` - one page per site plus the `index.html` overview
/// - `map`  - `index.js`, the site list and centroid for the Leaflet map
///
/// Rendering never touches the network. Everything is built in memory as a
/// `RenderedReport` and written in one step by `write_outputs`, so a run
/// that fails while fetching leaves the previous output untouched. A failure
/// inside `write_outputs` itself can leave some files already replaced.

pub mod html;
pub mod map;

use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use crate::analysis::bands::AggregationSummary;
use crate::model::{BandTotals, OverflowError, PrecipitationWarning, ReportIndexEntry, RiskLevel};
use crate::sites::Site;

/// Fixed name of the overview page.
pub const INDEX_FILE: &str = "index.html";

/// Fixed name of the map data script.
pub const MAP_DATA_FILE: &str = "index.js";

// ---------------------------------------------------------------------------
// Report data
// ---------------------------------------------------------------------------

/// Everything known about one site after it has been processed.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteReport {
    pub site: Site,
    pub totals: BandTotals,
    pub summary: AggregationSummary,
    pub risk: RiskLevel,
    pub warnings: Vec<PrecipitationWarning>,
}

impl SiteReport {
    pub fn file_name(&self) -> String {
        format!("{}.html", self.site.slug)
    }

    pub fn index_entry(&self) -> ReportIndexEntry {
        ReportIndexEntry {
            name: self.site.name.clone(),
            slug: self.site.slug.clone(),
            risk: self.risk,
            latitude: self.site.latitude,
            longitude: self.site.longitude,
            warnings: self.warnings.clone(),
        }
    }
}

/// Output files keyed by file name, in write order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedReport {
    pub files: Vec<(String, String)>,
}

impl RenderedReport {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(file, _)| file == name)
            .map(|(_, body)| body.as_str())
    }
}

/// Renders every per-site page, the index page and the map data.
pub fn render_all(reports: &[SiteReport], generated_at: DateTime<Utc>) -> RenderedReport {
    let mut files = Vec::with_capacity(reports.len() + 2);

    for report in reports {
        files.push((report.file_name(), html::render_site_page(report, generated_at)));
    }

    let entries: Vec<ReportIndexEntry> = reports.iter().map(SiteReport::index_entry).collect();
    files.push((INDEX_FILE.to_string(), html::render_index_page(&entries, generated_at)));
    files.push((MAP_DATA_FILE.to_string(), map::render_map_script(&entries)));

    RenderedReport { files }
}

/// Writes every rendered file into `dir`, creating it if needed.
pub fn write_outputs(dir: &Path, rendered: &RenderedReport) -> Result<(), OverflowError> {
    fs::create_dir_all(dir).map_err(|e| {
        OverflowError::OutputError(format!("cannot create {}: {}", dir.display(), e))
    })?;

    for (name, body) in &rendered.files {
        let path = dir.join(name);
        fs::write(&path, body).map_err(|e| {
            OverflowError::OutputError(format!("cannot write {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Whole hours and whole minutes in `seconds`, truncating leftover seconds.
///
/// Uses floor division, so a negative total (bad upstream timestamps)
/// still yields a non-negative minutes component.
pub fn hours_minutes(seconds: f64) -> (i64, i64) {
    let hours = (seconds / 3600.0).floor() as i64;
    let minutes = (seconds.rem_euclid(3600.0) / 60.0).floor() as i64;
    (hours, minutes)
}

/// e.g. `3661.0` → `"1 hour 1 minute"`, `59.0` → `"0 hours 0 minutes"`.
pub fn format_duration(seconds: f64) -> String {
    let (hours, minutes) = hours_minutes(seconds);
    format!(
        "{} {} {} {}",
        hours,
        if hours == 1 { "hour" } else { "hours" },
        minutes,
        if minutes == 1 { "minute" } else { "minutes" }
    )
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn sample_report(slug: &str, name: &str, risk: RiskLevel) -> SiteReport {
    use crate::sites::{Axis, Comparison, UpstreamRule};

    SiteReport {
        site: Site {
            slug: slug.to_string(),
            name: name.to_string(),
            latitude: 51.4,
            longitude: -2.5,
            watercourses: vec!["RIVER AVON".to_string()],
            upstream: UpstreamRule {
                axis: Axis::Longitude,
                comparison: Comparison::GreaterThan,
                threshold: -2.5,
            },
        },
        totals: BandTotals([100.0, 1800.0, 0.0, 0.0, 3661.0]),
        summary: AggregationSummary::default(),
        risk,
        warnings: Vec::new(),
    }
}
