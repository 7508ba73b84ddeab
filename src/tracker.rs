use log::debug;

use crate::{
    cache::{CacheState, Clock, Fetcher, RefreshCache, WallClock},
    cfg::Config,
    epoch::parse_epoch,
    error::Error,
    geodetic::GeodeticPosition,
    prelude::{Epoch, SeriesSummary, StateVector},
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Any reverse geocoder should implement [PlaceResolver]:
/// it names the place under given geodetic coordinates, when there is one.
pub trait PlaceResolver {
    fn resolve(&self, latitude_ddeg: f64, longitude_ddeg: f64) -> Option<String>;
}

/// [NoPlaceResolver] never names any place.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlaceResolver;

impl PlaceResolver for NoPlaceResolver {
    fn resolve(&self, _: f64, _: f64) -> Option<String> {
        None
    }
}

/// Sub-satellite point at one [Epoch]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Location {
    /// Sampling [Epoch]
    pub epoch: Epoch,
    /// [GeodeticPosition]
    pub geodetic: GeodeticPosition,
    /// Place name, if any (none over oceans)
    pub place: Option<String>,
}

/// [Tracker] answers all state vector queries. It owns the
/// [RefreshCache], every query is run against a consistent snapshot of it.
/// Queries that do not match any sample return None: that is not an error.
pub struct Tracker<F: Fetcher, R: PlaceResolver, C: Clock = WallClock> {
    cache: RefreshCache<F, C>,
    resolver: R,
}

impl<F: Fetcher, R: PlaceResolver> Tracker<F, R, WallClock> {
    /// Builds a new [Tracker] that uses the system clock.
    pub fn new(cfg: Config, fetcher: F, resolver: R) -> Self {
        Self::with_clock(cfg, fetcher, resolver, WallClock)
    }
}

impl<F: Fetcher, R: PlaceResolver, C: Clock> Tracker<F, R, C> {
    /// Builds a new [Tracker] with a custom [Clock].
    pub fn with_clock(cfg: Config, fetcher: F, resolver: R, clock: C) -> Self {
        Self {
            resolver,
            cache: RefreshCache::with_clock(cfg, fetcher, clock),
        }
    }

    /// [CacheState] of the underlying cache
    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    /// Forces the next query to refresh the state vectors
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Returns [StateVector] sampled at this day-of-year epoch.
    pub fn lookup_exact(&self, epoch: &str) -> Result<Option<StateVector>, Error> {
        let epoch = parse_epoch(epoch)?;
        let series = self.cache.get()?;
        Ok(series.exact(epoch).copied())
    }

    /// Returns up to `limit` [StateVector]s starting at `offset`.
    /// Out of range requests return an empty list.
    pub fn lookup_range(&self, offset: usize, limit: usize) -> Result<Vec<StateVector>, Error> {
        let series = self.cache.get()?;
        Ok(series.range(offset, limit).to_vec())
    }

    /// Returns [StateVector] closest in time to [Epoch].
    pub fn lookup_nearest(&self, epoch: Epoch) -> Result<Option<StateVector>, Error> {
        let series = self.cache.get()?;
        Ok(series.nearest(epoch).copied())
    }

    /// [GeodeticPosition] of this [StateVector]
    pub fn geodetic_for(&self, sv: &StateVector) -> Result<GeodeticPosition, Error> {
        sv.geodetic()
    }

    /// Speed of this [StateVector] [km/s]
    pub fn speed_for(&self, sv: &StateVector) -> f64 {
        sv.speed_km_s()
    }

    /// Speed [km/s] at this day-of-year epoch
    pub fn speed(&self, epoch: &str) -> Result<Option<f64>, Error> {
        Ok(self.lookup_exact(epoch)?.map(|sv| sv.speed_km_s()))
    }

    fn locate(&self, sv: &StateVector) -> Result<Location, Error> {
        let geodetic = sv.geodetic()?;
        let place = self
            .resolver
            .resolve(geodetic.latitude_ddeg, geodetic.longitude_ddeg);
        Ok(Location {
            epoch: sv.epoch,
            geodetic,
            place,
        })
    }

    /// [Location] at this day-of-year epoch
    pub fn location(&self, epoch: &str) -> Result<Option<Location>, Error> {
        match self.lookup_exact(epoch)? {
            Some(sv) => Ok(Some(self.locate(&sv)?)),
            None => Ok(None),
        }
    }

    /// [Location] of the sample closest to current time.
    /// Current time is read when the query is processed.
    pub fn now(&self) -> Result<Option<Location>, Error> {
        let now = self.cache.now();
        match self.lookup_nearest(now)? {
            Some(sv) => {
                debug!("{:?} - closest sample {:?}", now, sv.epoch);
                Ok(Some(self.locate(&sv)?))
            },
            None => Ok(None),
        }
    }

    /// [SeriesSummary] of the current series, None if it is empty.
    pub fn summary(&self) -> Result<Option<SeriesSummary>, Error> {
        let series = self.cache.get()?;
        Ok(series.summary())
    }
}
