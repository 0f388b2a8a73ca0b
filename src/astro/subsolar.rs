//! Sub-solar point from a UTC instant.
//!
//! Low precision: declination uses the cosine approximation and the equation
//! of time a two-term harmonic fit. Good for placing the terminator on a
//! globe, not for ephemeris work.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::domain::SubsolarPoint;

/// Maximum solar declination used by the approximation, degrees.
pub const AXIAL_TILT: f64 = 23.44;

/// Solar declination in degrees for a 1-based day of the year.
pub fn declination(day_of_year: u32) -> f64 {
    -AXIAL_TILT * ((360.0 / 365.0) * (day_of_year as f64 + 10.0)).to_radians().cos()
}

/// Equation of time in minutes.
///
/// `decimal_day` is the day of year plus the elapsed fraction of that day.
pub fn equation_of_time(decimal_day: f64, year: i32) -> f64 {
    let factor = 6.24004077 + 0.01720197 * (365.25 * (year - 2000) as f64 + decimal_day);
    -7.659 * factor.sin() + 9.863 * (2.0 * factor + 3.5932).sin()
}

pub fn subsolar_point(instant: DateTime<Utc>) -> SubsolarPoint {
    let n = instant.ordinal();
    let latitude = declination(n);

    let decimal_hours = instant.hour() as f64
        + instant.minute() as f64 / 60.0
        + instant.second() as f64 / 3600.0;
    let decimal_day = n as f64 + decimal_hours / 24.0;
    let eot_minutes = equation_of_time(decimal_day, instant.year());

    SubsolarPoint {
        longitude: -15.0 * (decimal_hours - 12.0 + eot_minutes / 60.0),
        latitude,
    }
}

/// How far round the day/night cycle an observer sits, in [0, 1).
///
/// 0 when the observer is under the sun, 0.5 at local midnight.
pub fn terminator_phase(subsolar_longitude: f64, observer_longitude: f64) -> f64 {
    let delta = subsolar_longitude.rem_euclid(360.0) - observer_longitude.rem_euclid(360.0);
    (delta / 360.0).rem_euclid(1.0)
}
