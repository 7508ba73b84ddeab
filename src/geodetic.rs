use crate::prelude::Vector3;
use map_3d::{ecef2geodetic, Ellipsoid};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Geodetic coordinates on the WGS84 ellipsoid.
/// Latitude lies within [-90, 90], longitude within [-180, 180].
/// Altitude is negative below the ellipsoid surface.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GeodeticPosition {
    /// Latitude [ddeg]
    pub latitude_ddeg: f64,
    /// Longitude [ddeg]
    pub longitude_ddeg: f64,
    /// Altitude above the ellipsoid [km]
    pub altitude_km: f64,
}

impl GeodeticPosition {
    /// Builds Self from ECEF position [km]
    pub fn from_ecef_km(ecef: Vector3<f64>) -> Self {
        let (x, y, z) = (ecef[0] * 1.0E3, ecef[1] * 1.0E3, ecef[2] * 1.0E3);
        let (lat, lon, h) = ecef2geodetic(x, y, z, Ellipsoid::WGS84);
        Self {
            latitude_ddeg: lat.to_degrees(),
            longitude_ddeg: lon.to_degrees(),
            altitude_km: h * 1.0E-3,
        }
    }
}
