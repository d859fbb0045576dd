/// Reduction of raw discharge records to a risk assessment.
///
/// Submodules:
/// - `bands` - upstream filtering and per-distance-band duration totals.
/// - `risk`  - Low / Medium / High classification of the band totals.

pub mod bands;
pub mod risk;
