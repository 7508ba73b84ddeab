//! Time to live cache of the [StateVectorSeries].
//!
//! State machine: `Empty -> Fetching -> Ready -> (Stale -> Fetching -> Ready)*`.
//! Staleness is evaluated lazily on each [RefreshCache::get]; there is no
//! background timer. Only one upstream fetch may be pending at any time:
//! callers arriving while a fetch is pending wait for its outcome instead
//! of issuing their own.
use log::{debug, error, info, warn};

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    cfg::Config,
    error::{Error, FetchError},
    prelude::{Duration, Epoch, RawRecord, StateVectorSeries},
};

/// Any upstream ephemeris source should implement [Fetcher].
/// One call is one complete download of the feed, in the feed's order.
/// Retry policy, if any, is up to the implementation.
pub trait Fetcher {
    fn fetch(&self) -> Result<Vec<RawRecord>, FetchError>;
}

impl<F: Fn() -> Result<Vec<RawRecord>, FetchError>> Fetcher for F {
    fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        self()
    }
}

/// [Clock] provides the current instant, used both to
/// evaluate staleness and to resolve "closest to now" queries.
pub trait Clock {
    /// Current [Epoch], expressed in UTC
    fn now(&self) -> Epoch;
}

/// [WallClock] is the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> Epoch {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Epoch::from_unix_duration(Duration::from(elapsed))
    }
}

impl<C: Clock> Clock for Arc<C> {
    fn now(&self) -> Epoch {
        self.as_ref().now()
    }
}

/// [CacheState] as observed at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Never refreshed successfully
    Empty,
    /// Upstream fetch pending
    Fetching,
    /// Holding a valid series
    Ready,
    /// Holding an outdated series, next query will refresh it
    Stale,
}

impl std::fmt::Display for CacheState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Fetching => write!(f, "fetching"),
            Self::Ready => write!(f, "ready"),
            Self::Stale => write!(f, "stale"),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    series: Arc<StateVectorSeries>,
    fetched_at: Epoch,
}

#[derive(Debug, Default)]
struct Inner {
    entry: Option<CacheEntry>,
    /// Upstream fetch pending
    fetching: bool,
    /// Forces next query to refresh
    invalidated: bool,
    /// Completed refresh cycles
    cycles: u64,
    /// Failure of the latest refresh cycle
    last_error: Option<FetchError>,
}

impl Inner {
    /// Series to hand out once a refresh cycle has completed:
    /// the current entry (possibly stale) or the refresh failure.
    fn outcome(&self) -> Result<Arc<StateVectorSeries>, Error> {
        match &self.entry {
            Some(entry) => Ok(entry.series.clone()),
            None => Err(Error::CacheUnavailable(
                self.last_error.clone().unwrap_or(FetchError::Aborted),
            )),
        }
    }
}

/// [RefreshCache] serves the latest [StateVectorSeries],
/// refreshing it from the [Fetcher] once its time to live has expired.
/// A failed refresh keeps serving the previous series, if any.
pub struct RefreshCache<F: Fetcher, C: Clock = WallClock> {
    ttl: Duration,
    fetcher: F,
    clock: C,
    inner: Mutex<Inner>,
    cycle_completed: Condvar,
}

/// Completes the refresh cycle even if the [Fetcher] panicked,
/// so waiting callers are always released.
struct PendingRefresh<'a, F: Fetcher, C: Clock> {
    cache: &'a RefreshCache<F, C>,
    armed: bool,
}

impl<F: Fetcher, C: Clock> Drop for PendingRefresh<'_, F, C> {
    fn drop(&mut self) {
        if self.armed {
            error!("refresh aborted");
            let mut inner = self.cache.lock();
            inner.last_error = Some(FetchError::Aborted);
            self.cache.complete_cycle(&mut inner);
        }
    }
}

impl<F: Fetcher> RefreshCache<F, WallClock> {
    /// Creates a new [RefreshCache] using the system clock.
    pub fn new(cfg: Config, fetcher: F) -> Self {
        Self::with_clock(cfg, fetcher, WallClock)
    }
}

impl<F: Fetcher, C: Clock> RefreshCache<F, C> {
    /// Creates a new [RefreshCache] with a custom [Clock].
    pub fn with_clock(cfg: Config, fetcher: F, clock: C) -> Self {
        Self {
            clock,
            fetcher,
            ttl: cfg.ttl,
            inner: Mutex::new(Inner::default()),
            cycle_completed: Condvar::new(),
        }
    }

    /// Current instant, from our [Clock]
    pub fn now(&self) -> Epoch {
        self.clock.now()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // entry is replaced in one go: a poisoned lock still guards a consistent state
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_stale(&self, inner: &Inner, now: Epoch) -> bool {
        match &inner.entry {
            Some(entry) => inner.invalidated || now - entry.fetched_at > self.ttl,
            None => true,
        }
    }

    fn complete_cycle(&self, inner: &mut Inner) {
        inner.fetching = false;
        inner.cycles += 1;
        self.cycle_completed.notify_all();
    }

    /// Returns the current [StateVectorSeries], refreshing it first if it is
    /// missing or stale. Concurrent callers share one single upstream fetch.
    /// Fails with [Error::CacheUnavailable] only when no series was ever obtained.
    pub fn get(&self) -> Result<Arc<StateVectorSeries>, Error> {
        let now = self.clock.now();
        let mut inner = self.lock();

        if inner.fetching {
            let cycle = inner.cycles;
            debug!("waiting on pending refresh");
            let inner = self
                .cycle_completed
                .wait_while(inner, |inner| inner.cycles == cycle)
                .unwrap_or_else(PoisonError::into_inner);
            return inner.outcome();
        }

        if !self.is_stale(&inner, now) {
            return inner.outcome();
        }

        inner.fetching = true;
        drop(inner);

        self.refresh()
    }

    /// Runs one refresh cycle. Caller has marked the cache as fetching.
    fn refresh(&self) -> Result<Arc<StateVectorSeries>, Error> {
        let mut pending = PendingRefresh {
            cache: self,
            armed: true,
        };

        debug!("refreshing state vectors");

        // series is fully built prior publication
        let outcome = self
            .fetcher
            .fetch()
            .map(|records| (StateVectorSeries::from_raw(&records), records.len()));

        let fetched_at = self.clock.now();

        let mut inner = self.lock();
        pending.armed = false;

        match outcome {
            Ok((series, total)) => {
                info!(
                    "{:?} - refreshed: {}/{} state vectors",
                    fetched_at,
                    series.len(),
                    total
                );
                inner.entry = Some(CacheEntry {
                    series: Arc::new(series),
                    fetched_at,
                });
                inner.invalidated = false;
                inner.last_error = None;
            },
            Err(e) => {
                if inner.entry.is_some() {
                    warn!("refresh failed ({}): serving previous series", e);
                } else {
                    error!("refresh failed: {}", e);
                }
                inner.last_error = Some(e);
            },
        }

        self.complete_cycle(&mut inner);
        inner.outcome()
    }

    /// Returns the current [StateVectorSeries] (possibly stale),
    /// without ever triggering a refresh.
    pub fn peek(&self) -> Option<Arc<StateVectorSeries>> {
        self.lock().entry.as_ref().map(|entry| entry.series.clone())
    }

    /// [Epoch] of the latest successful refresh
    pub fn fetched_at(&self) -> Option<Epoch> {
        self.lock().entry.as_ref().map(|entry| entry.fetched_at)
    }

    /// Returns current [CacheState]
    pub fn state(&self) -> CacheState {
        let now = self.clock.now();
        let inner = self.lock();
        if inner.fetching {
            CacheState::Fetching
        } else if inner.entry.is_none() {
            CacheState::Empty
        } else if self.is_stale(&inner, now) {
            CacheState::Stale
        } else {
            CacheState::Ready
        }
    }

    /// Marks current series as stale: next query will refresh it.
    /// The series is still served if that refresh fails.
    pub fn invalidate(&self) {
        self.lock().invalidated = true;
    }
}
