//! Earth centered inertial to geodetic coordinates.
//!
//! The J2000 inertial position is first precessed to the mean equator and
//! equinox of date (IAU 1976), then rotated about the polar axis by the
//! Greenwich mean sidereal angle at the sampling instant (Earth fixed frame),
//! and finally converted to latitude, longitude and altitude on the WGS84 ellipsoid.
//! Nutation, UT1-UTC and polar motion are neglected: the sub-satellite
//! point is accurate to about one kilometer for low Earth orbits.
use crate::{
    constants::{DAYS_PER_JULIAN_CENTURY, J2000_JDE, MIN_POSITION_NORM_KM, SECONDS_PER_DAY},
    error::Error,
    geodetic::GeodeticPosition,
    prelude::{Epoch, Vector3},
};

use nalgebra::Rotation3;
use std::f64::consts::TAU;

/// Ratio of the sidereal rotation rate to the solar day rate
const SIDEREAL_RATE: f64 = 1.00273790934;

/// Greenwich mean sidereal angle [rad] at [Epoch] (IAU 1982 model),
/// within [0, 2π). UT1 is approximated by UTC.
pub fn gmst(epoch: Epoch) -> f64 {
    let jd = epoch.to_jde_utc_days();

    // fraction of day since previous 0h UT
    let ut = (jd + 0.5).fract();
    let jd0 = jd - ut;

    let tu = (jd0 - J2000_JDE) / DAYS_PER_JULIAN_CENTURY;
    let gmst_s = 24110.54841 + tu * (8640184.812866 + tu * (0.093104 - tu * 6.2E-6));
    let gmst_s = (gmst_s + SECONDS_PER_DAY * SIDEREAL_RATE * ut).rem_euclid(SECONDS_PER_DAY);

    TAU * gmst_s / SECONDS_PER_DAY
}

fn arcsec_to_rad(arcsec: f64) -> f64 {
    (arcsec / 3600.0).to_radians()
}

/// Precession from the J2000 mean equator and equinox
/// to the mean equator and equinox of [Epoch] (IAU 1976).
pub fn precession(epoch: Epoch) -> Rotation3<f64> {
    let t = (epoch.to_jde_tt_days() - J2000_JDE) / DAYS_PER_JULIAN_CENTURY;

    let zeta = arcsec_to_rad(t * (2306.2181 + t * (0.30188 + t * 0.017998)));
    let z = arcsec_to_rad(t * (2306.2181 + t * (1.09468 + t * 0.018203)));
    let theta = arcsec_to_rad(t * (2004.3109 - t * (0.42665 + t * 0.041833)));

    Rotation3::from_axis_angle(&Vector3::z_axis(), z)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), -theta)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), zeta)
}

/// Rotates J2000 inertial position into the Earth fixed frame at [Epoch].
pub fn eci_to_ecef(position_km: Vector3<f64>, epoch: Epoch) -> Vector3<f64> {
    let theta = gmst(epoch);
    Rotation3::from_axis_angle(&Vector3::z_axis(), -theta) * (precession(epoch) * position_km)
}

/// Converts an inertial position [km] sampled at [Epoch] into [GeodeticPosition].
/// Fails with [Error::DegenerateGeometry] when the position has no direction.
pub fn to_geodetic(position_km: Vector3<f64>, epoch: Epoch) -> Result<GeodeticPosition, Error> {
    let norm = position_km.norm();

    // also rejects NaN
    if !(norm.is_finite() && norm > MIN_POSITION_NORM_KM) {
        return Err(Error::DegenerateGeometry);
    }

    let ecef = eci_to_ecef(position_km, epoch);
    Ok(GeodeticPosition::from_ecef_km(ecef))
}
