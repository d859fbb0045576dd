/// Risk classification from banded discharge durations.
///
/// Rules, evaluated in order:
///
/// 1. **High**: any discharge within 1 mile, or more than 30 minutes in
///    total within 5 miles.
/// 2. **Low**: no discharge at all in any band.
/// 3. **Medium**: everything else.
///
/// The High test runs before the zero test, so even a single second within
/// a mile is High regardless of the overall total.

use crate::model::{BandTotals, RiskLevel};

/// Combined seconds within 5 miles above which risk is High.
pub const WITHIN_FIVE_MILES_HIGH_SECONDS: f64 = 1800.0;

pub fn classify(bands: &BandTotals) -> RiskLevel {
    let within_one = bands.seconds(0);
    let within_five = within_one + bands.seconds(1);

    if within_one > 0.0 || within_five > WITHIN_FIVE_MILES_HIGH_SECONDS {
        RiskLevel::High
    } else if bands.total() == 0.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    }
}
