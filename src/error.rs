use thiserror::Error;

/// Errors raised while interpreting one record of the ephemeris feed.
/// The offending record is skipped, the rest of the series remains usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParsingError {
    /// Epoch does not follow the `YYYY-DDDTHH:MM:SS[.f]Z` layout
    #[error("invalid epoch format: \"{0}\"")]
    EpochFormat(String),

    #[error("invalid year field")]
    Year,

    #[error("invalid day of year field")]
    DayOfYear,

    /// Day of year is not a valid day of that calendar year
    #[error("day of year {0} out of range")]
    DayOfYearRange(u16),

    #[error("invalid time of day")]
    TimeOfDay,

    /// Fractional seconds are limited to nanosecond resolution
    #[error("invalid fractional seconds")]
    FractionalSeconds,

    /// Epochs are expressed in UTC and must terminate with 'Z'
    #[error("missing trailing UTC designator")]
    TrailingLiteral,

    #[error("invalid {0} field: \"{1}\"")]
    Number(&'static str, String),

    /// NaN and Infinity are not valid coordinates
    #[error("non finite {0} field")]
    NonFinite(&'static str),
}

/// Upstream ephemeris feed errors, as reported by the [crate::prelude::Fetcher].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// Upstream answered with a non success status
    #[error("upstream status {0}")]
    Status(u16),

    #[error("invalid upstream content: {0}")]
    Content(String),

    /// Refresh did not run to completion
    #[error("refresh aborted")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),

    /// Position vector is too close to Earth center (or not finite)
    /// to define a direction: no geodetic coordinates exist.
    #[error("degenerate geometry: undefined position direction")]
    DegenerateGeometry,

    /// The cache never held a series and the refresh attempt failed.
    /// When a previous series exists, it is served instead.
    #[error("state vectors unavailable: {0}")]
    CacheUnavailable(FetchError),
}
