/// Instantaneous speed from velocity components.
/// Speed unit follows the velocity unit (km/s for the ephemeris feed).
/// NaN components propagate to a NaN speed: callers are expected to check.
pub fn speed(vx: f64, vy: f64, vz: f64) -> f64 {
    (vx * vx + vy * vy + vz * vz).sqrt()
}
