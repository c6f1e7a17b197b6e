//! Helpers for the "unknown numeric value" sentinel.
//!
//! Feeds omit diameters, distances and velocities regularly. Those values are
//! stored as IEEE-754 NaN so a known `0.0` stays distinguishable from unknown.

/// Sentinel stored for a legitimately unknown measurement.
pub const UNKNOWN: f64 = f64::NAN;

/// Returns whether `value` is the unknown sentinel.
pub fn is_unknown(value: f64) -> bool {
    value.is_nan()
}
