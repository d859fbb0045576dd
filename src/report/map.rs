/// Map data script (`index.js`) for the index page's Leaflet map.
///
/// The script embeds the site list as a JSON array and centres the map on
/// the mean of all site coordinates. Marker colour follows risk.

use serde::Serialize;

use crate::model::{ReportIndexEntry, RiskLevel};

const MAP_TEMPLATE: &str = include_str!("../../templates/map.js");

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSite {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub risk: RiskLevel,
    pub link: String,
}

impl From<&ReportIndexEntry> for MapSite {
    fn from(entry: &ReportIndexEntry) -> Self {
        MapSite {
            name: entry.name.clone(),
            lat: entry.latitude,
            lon: entry.longitude,
            risk: entry.risk,
            link: entry.link(),
        }
    }
}

/// Mean latitude and longitude of all entries, or `None` if there are none.
pub fn centroid(entries: &[ReportIndexEntry]) -> Option<(f64, f64)> {
    if entries.is_empty() {
        return None;
    }
    let n = entries.len() as f64;
    let lat = entries.iter().map(|e| e.latitude).sum::<f64>() / n;
    let lon = entries.iter().map(|e| e.longitude).sum::<f64>() / n;
    Some((lat, lon))
}

/// Serialises the marker list as a JSON array.
pub fn sites_json(entries: &[ReportIndexEntry]) -> Result<String, serde_json::Error> {
    let sites: Vec<MapSite> = entries.iter().map(MapSite::from).collect();
    serde_json::to_string(&sites)
}

/// Fills the map template with the site list and centroid.
pub fn render_map_script(entries: &[ReportIndexEntry]) -> String {
    let (lat, lon) = centroid(entries).unwrap_or((0.0, 0.0));
    let json = sites_json(entries).unwrap_or_else(|_| "[]".to_string());

    MAP_TEMPLATE
        .replace("$sites_json", &json)
        .replace("$center_lat", &lat.to_string())
        .replace("$center_lon", &lon.to_string())
}
