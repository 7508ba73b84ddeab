use crate::{
    epoch::parse_epoch,
    error::{Error, ParsingError},
    frame::to_geodetic,
    geodetic::GeodeticPosition,
    kinematic::speed,
    prelude::{Epoch, Vector3},
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// [RawRecord] is one state vector as delivered by the ingestion layer:
/// untouched text fields, stripped of their markup (units attributes..).
/// Interpretation is entirely up to this crate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawRecord {
    /// Day-of-year epoch, like "2025-073T12:00:00.000Z"
    pub epoch: String,
    /// X, Y, Z coordinates [km]
    pub position: (String, String, String),
    /// X, Y, Z velocity [km/s]
    pub velocity: (String, String, String),
}

impl RawRecord {
    pub fn new(
        epoch: &str,
        position: (&str, &str, &str),
        velocity: (&str, &str, &str),
    ) -> Self {
        Self {
            epoch: epoch.to_string(),
            position: (
                position.0.to_string(),
                position.1.to_string(),
                position.2.to_string(),
            ),
            velocity: (
                velocity.0.to_string(),
                velocity.1.to_string(),
                velocity.2.to_string(),
            ),
        }
    }
}

/// One ephemeris sample: position and velocity at [Epoch],
/// expressed in an Earth centered inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StateVector {
    /// Sampling instant, in UTC
    pub epoch: Epoch,
    /// Position [km]
    pub position_km: Vector3<f64>,
    /// Velocity [km/s]
    pub velocity_km_s: Vector3<f64>,
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, ParsingError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ParsingError::Number(field, raw.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParsingError::NonFinite(field))
    }
}

impl StateVector {
    pub fn new(epoch: Epoch, position_km: Vector3<f64>, velocity_km_s: Vector3<f64>) -> Self {
        Self {
            epoch,
            position_km,
            velocity_km_s,
        }
    }

    /// Interprets a [RawRecord]. Fails on malformed epoch, or
    /// any coordinate that is not a finite number.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ParsingError> {
        let epoch = parse_epoch(&raw.epoch)?;
        let position_km = Vector3::new(
            parse_coordinate("x", &raw.position.0)?,
            parse_coordinate("y", &raw.position.1)?,
            parse_coordinate("z", &raw.position.2)?,
        );
        let velocity_km_s = Vector3::new(
            parse_coordinate("x_dot", &raw.velocity.0)?,
            parse_coordinate("y_dot", &raw.velocity.1)?,
            parse_coordinate("z_dot", &raw.velocity.2)?,
        );
        Ok(Self::new(epoch, position_km, velocity_km_s))
    }

    /// Instantaneous speed [km/s]
    pub fn speed_km_s(&self) -> f64 {
        let v = self.velocity_km_s;
        speed(v[0], v[1], v[2])
    }

    /// Sub-satellite [GeodeticPosition] at this sampling instant
    pub fn geodetic(&self) -> Result<GeodeticPosition, Error> {
        to_geodetic(self.position_km, self.epoch)
    }
}
