/// Distance-band aggregation of discharge durations.
///
/// `aggregate` takes the flat list of `DischargeRecord`s for a site and
/// reduces it to five duration totals, one per distance band from the swim
/// spot:
///
/// ```text
///   (0,1]  (1,5]  (5,10]  (10,20]  (20,50]   miles
/// ```
///
/// Band edges are inclusive upper bounds, so a discharge exactly 5 miles
/// away lands in `(1,5]`. Anything beyond 50 miles is dropped.
///
/// Durations are passed through as reported: an event whose end precedes
/// its start contributes a negative amount. That is an upstream data
/// quality problem and is deliberately not corrected here.

use tracing::debug;

use crate::geo::distance_miles;
use crate::model::{BAND_EDGES_MILES, BandTotals, DischargeRecord};
use crate::sites::Site;

/// What happened to each record during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregationSummary {
    /// Records that contributed to a band.
    pub counted: usize,
    /// Records missing a timestamp or coordinate.
    pub incomplete: usize,
    /// Records that failed the site's upstream predicate.
    pub not_upstream: usize,
    /// Upstream records more than 50 miles away.
    pub out_of_range: usize,
}

/// Index of the band a distance falls into, or `None` beyond the last edge.
pub fn band_index(distance_miles: f64) -> Option<usize> {
    BAND_EDGES_MILES.iter().position(|&edge| distance_miles <= edge)
}

/// Duration of a discharge in seconds from epoch-millisecond timestamps.
///
/// Computed in floating point so that nonsense timestamps at the ends of
/// the `i64` range yield a large number rather than an overflow.
pub fn duration_seconds(start_ms: i64, end_ms: i64) -> f64 {
    (end_ms as f64 - start_ms as f64) / 1000.0
}

/// Sums discharge durations per distance band for `site`.
pub fn aggregate(records: &[DischargeRecord], site: &Site) -> BandTotals {
    aggregate_with_summary(records, site).0
}

/// As `aggregate`, also reporting how many records were used or skipped.
pub fn aggregate_with_summary(
    records: &[DischargeRecord],
    site: &Site,
) -> (BandTotals, AggregationSummary) {
    let mut totals = BandTotals::new();
    let mut summary = AggregationSummary::default();

    for record in records {
        let Some((start, end, lat, lon)) = record.usable_fields() else {
            summary.incomplete += 1;
            continue;
        };

        if !site.is_upstream(lat, lon) {
            summary.not_upstream += 1;
            continue;
        }

        let distance = distance_miles(site.latitude, site.longitude, lat, lon);
        match band_index(distance) {
            Some(band) => {
                totals.add(band, duration_seconds(start, end));
                summary.counted += 1;
            }
            None => summary.out_of_range += 1,
        }
    }

    debug!(
        site = %site.slug,
        counted = summary.counted,
        incomplete = summary.incomplete,
        not_upstream = summary.not_upstream,
        out_of_range = summary.out_of_range,
        "aggregated discharge records"
    );

    (totals, summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
