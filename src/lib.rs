#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod cache;
mod cfg;
mod constants;
mod error;
mod geodetic;
mod series;
mod state;
mod tracker;

// public modules
pub mod epoch;
pub mod frame;
pub mod kinematic;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cache::{CacheState, Clock, Fetcher, RefreshCache, WallClock};
    pub use crate::cfg::Config;
    pub use crate::constants::{
        EARTH_ANGULAR_VEL_RAD, EARTH_SEMI_MAJOR_AXIS_WGS84_KM, EARTH_SEMI_MINOR_AXIS_WGS84_KM,
    };
    pub use crate::epoch::{format_epoch, parse_epoch};
    pub use crate::error::{Error, FetchError, ParsingError};
    pub use crate::frame::to_geodetic;
    pub use crate::geodetic::GeodeticPosition;
    pub use crate::kinematic::speed;
    pub use crate::series::{SeriesSummary, StateVectorSeries};
    pub use crate::state::{RawRecord, StateVector};
    pub use crate::tracker::{Location, NoPlaceResolver, PlaceResolver, Tracker};
    // re-export
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
