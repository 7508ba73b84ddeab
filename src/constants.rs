/// Earth angular velocity, in WGS84 frame rad/s
pub const EARTH_ANGULAR_VEL_RAD: f64 = 7.2921151467E-5;

/// WGS84 Earth Frame Ellipsoid semi-major axis (kilometers)
pub const EARTH_SEMI_MAJOR_AXIS_WGS84_KM: f64 = 6378.137;

/// WGS84 Earth Frame Ellipsoid flattening
pub const EARTH_FLATTENING_WGS84: f64 = 1.0 / 298.257223563;

/// WGS84 Earth Frame Ellipsoid semi-minor axis (kilometers)
pub const EARTH_SEMI_MINOR_AXIS_WGS84_KM: f64 =
    EARTH_SEMI_MAJOR_AXIS_WGS84_KM * (1.0 - EARTH_FLATTENING_WGS84);

/// Julian day of the J2000 reference epoch
pub const J2000_JDE: f64 = 2451545.0;

/// Number of days in one Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Number of seconds in one day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Below this norm (in km), a position vector has no usable direction
pub const MIN_POSITION_NORM_KM: f64 = 1.0E-9;
