/// Great-circle distance between two WGS84 points.
///
/// Distances are straight-line ("as the crow flies"), not measured along
/// the watercourse. Inputs are not validated.

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance in miles between two points given in decimal degrees.
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONHAM: (f64, f64) = (51.444858, -2.534812);
    const WARLEIGH: (f64, f64) = (51.376556, -2.301611);

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_miles(CONHAM.0, CONHAM.1, CONHAM.0, CONHAM.1), 0.0);
        assert_eq!(distance_miles(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = distance_miles(CONHAM.0, CONHAM.1, WARLEIGH.0, WARLEIGH.1);
        let ba = distance_miles(WARLEIGH.0, WARLEIGH.1, CONHAM.0, CONHAM.1);
        assert!((ab - ba).abs() < 1e-9, "expected symmetry, got {} vs {}", ab, ba);
    }

    #[test]
    fn test_conham_to_warleigh_is_about_eleven_miles() {
        let d = distance_miles(CONHAM.0, CONHAM.1, WARLEIGH.0, WARLEIGH.1);
        assert!(d > 10.5 && d < 11.5, "Conham to Warleigh should be ~11 miles, got {}", d);
    }

    #[test]
    fn test_one_degree_of_latitude_is_about_69_miles() {
        let d = distance_miles(51.0, -2.5, 52.0, -2.5);
        assert!((d - 69.09).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn test_longitude_delta_increases_distance_monotonically() {
        let mut previous = 0.0;
        for step in 1..=20 {
            let delta = step as f64 * 0.05;
            let d = distance_miles(51.4, -2.5, 51.4, -2.5 + delta);
            assert!(d > previous, "distance must grow with longitude delta {}", delta);
            previous = d;
        }
    }

    #[test]
    fn test_out_of_range_input_does_not_panic() {
        let d = distance_miles(200.0, 500.0, -300.0, 0.0);
        assert!(d.is_finite());
    }
}
