//! Orientation of the solar disk: position angle P, disk-centre latitude B0
//! and Carrington longitude L0.
//!
//! Low-precision solar coordinates after Meeus, *Astronomical Algorithms*,
//! chapters 22, 25 and 29. Every coefficient below moves rendered sunspot
//! positions, so they are kept exactly as published.

use chrono::{DateTime, Utc};

use super::julian::{centuries_since_j2000, julian_date, JULIAN_CENTURY};
use crate::domain::HeliographicParameters;

/// Julian date of the start of Carrington rotation 1.
pub const CARRINGTON_EPOCH: f64 = 2398220.0;
/// Sidereal rotation period used for Carrington longitudes, days.
pub const CARRINGTON_PERIOD: f64 = 25.38;
/// Inclination of the solar equator to the ecliptic, degrees.
pub const SOLAR_INCLINATION: f64 = 7.25;

fn from_arcseconds(arcseconds: f64) -> f64 {
    arcseconds / 3600.0
}

fn from_dms(degrees: f64, minutes: f64, arcseconds: f64) -> f64 {
    degrees + minutes / 60.0 + arcseconds / 3600.0
}

/// Longitude of the Moon's ascending node and the mean longitudes of the Sun
/// and Moon, the arguments of the short nutation series.
fn nutation_arguments(t: f64) -> (f64, f64, f64) {
    let omega = 125.04452 - 1934.136261 * t + 0.0020708 * (t * t) + (t * t * t) / 450_000.0;
    let mean_longitude_sun = 280.4665 + 36000.76983 * t;
    let mean_longitude_moon = 218.3165 + 481267.881286 * t;
    (omega, mean_longitude_sun, mean_longitude_moon)
}

/// Apparent geocentric longitude of the Sun, degrees, not reduced to [0, 360).
pub fn apparent_longitude(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let geometric_mean_longitude = 280.46646 + 36000.76983 * t + 0.0003032 * (t * t);
    let mean_anomaly = 357.52911 + 35999.05030 * t - 0.0001559 * (t * t);

    let equation_of_center = (1.914600 - 0.004817 * t - 0.000014 * (t * t))
        * mean_anomaly.to_radians().sin()
        + (0.019993 - 0.000101 * t) * (2.0 * mean_anomaly).to_radians().sin()
        + 0.000289 * (3.0 * mean_anomaly).to_radians().sin();

    let true_longitude = geometric_mean_longitude + equation_of_center;

    let omega = 125.04 - 1934.136 * t;
    true_longitude - 0.00569 - 0.00478 * omega.to_radians().sin()
        + 0.00256 * omega.to_radians().cos()
}

/// Obliquity of the ecliptic including nutation in obliquity, degrees.
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let (omega, sun, moon) = nutation_arguments(t);

    let delta_epsilon = from_arcseconds(9.20) * omega.to_radians().cos()
        + from_arcseconds(0.57) * (2.0 * sun).to_radians().cos()
        + from_arcseconds(0.10) * (2.0 * moon).to_radians().cos()
        - from_arcseconds(0.09) * (2.0 * omega).to_radians().cos();

    let epsilon_naught = from_dms(23.0, 26.0, 21.448)
        - from_arcseconds(46.8150 * t)
        - from_arcseconds(0.00059 * (t * t))
        + from_arcseconds(0.001813 * (t * t * t));

    epsilon_naught + delta_epsilon
}

/// Nutation in longitude, degrees.
pub fn nutation_in_longitude(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let (omega, sun, moon) = nutation_arguments(t);

    from_arcseconds(-17.20) * omega.to_radians().sin()
        + from_arcseconds(1.32) * (2.0 * sun).to_radians().sin()
        - from_arcseconds(0.23) * (2.0 * moon).to_radians().sin()
        + from_arcseconds(0.21) * (2.0 * omega).to_radians().sin()
}

/// Rotation of the Carrington frame since its epoch, degrees, unreduced.
pub fn carrington_rotation_angle(jd: f64) -> f64 {
    (jd - CARRINGTON_EPOCH) * (360.0 / CARRINGTON_PERIOD)
}

/// Longitude of the ascending node of the solar equator on the ecliptic.
pub fn ascending_node_longitude(jd: f64) -> f64 {
    73.6667 + 1.3958333 * (jd - 2396758.0) / JULIAN_CENTURY
}

pub fn heliographic_parameters(jd: f64) -> HeliographicParameters {
    let theta = carrington_rotation_angle(jd);
    let i = SOLAR_INCLINATION.to_radians();
    let k = ascending_node_longitude(jd);

    let lambda = apparent_longitude(jd);
    let corrected_lambda = lambda + nutation_in_longitude(jd);
    let epsilon = mean_obliquity(jd).to_radians();
    let lambda_k = (lambda - k).to_radians();

    let x = (-corrected_lambda.to_radians().cos() * epsilon.tan()).atan();
    let y = (-lambda_k.cos() * i.tan()).atan();

    let eta = (lambda_k.tan() * i.cos()).atan().to_degrees();
    let b0 = (lambda_k.sin() * i.sin()).asin().to_degrees();

    HeliographicParameters {
        l0: (eta - theta).rem_euclid(360.0),
        p: (x + y).to_degrees(),
        b0,
    }
}

/// [`heliographic_parameters`] for a UTC instant.
pub fn heliographic_parameters_at(instant: DateTime<Utc>) -> HeliographicParameters {
    heliographic_parameters(julian_date(instant))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Meeus, example 29.a: 1992 October 13.0
    const EXAMPLE_JD: f64 = 2448908.5;

    #[test]
    fn test_meeus_example() {
        let params = heliographic_parameters(EXAMPLE_JD);
        assert!((params.p - 26.27).abs() < 0.01, "p = {}", params.p);
        assert!((params.b0 - 5.99).abs() < 0.01, "b0 = {}", params.b0);
        assert!((params.l0 - 238.63).abs() < 0.05, "l0 = {}", params.l0);
    }

    #[test]
    fn test_apparent_longitude_example() {
        // 199.909 degrees after reduction
        let lambda = apparent_longitude(EXAMPLE_JD).rem_euclid(360.0);
        assert!((lambda - 199.909).abs() < 0.01, "lambda = {}", lambda);
    }

    #[test]
    fn test_obliquity_near_j2000() {
        let epsilon = mean_obliquity(2451545.0);
        assert!((epsilon - 23.4393).abs() < 0.005);
    }

    #[test]
    fn test_nutation_is_small() {
        let mut jd = 2451545.0;
        while jd < 2451545.0 + 6800.0 {
            assert!(nutation_in_longitude(jd).abs() < 20.0 / 3600.0);
            jd += 17.0;
        }
    }

    #[test]
    fn test_l0_normalized() {
        let mut jd = 2460000.0;
        while jd < 2460030.0 {
            let params = heliographic_parameters(jd);
            assert!((0.0..360.0).contains(&params.l0));
            assert!(params.b0.abs() <= SOLAR_INCLINATION);
            assert!(params.p.abs() <= 26.4);
            jd += 0.25;
        }
    }

    #[test]
    fn test_l0_decreases_with_rotation() {
        // the Carrington frame turns about 13.2 degrees per day
        let a = heliographic_parameters(2460000.0).l0;
        let b = heliographic_parameters(2460001.0).l0;
        let delta = (a - b).rem_euclid(360.0);
        assert!((delta - 13.2).abs() < 0.3, "delta = {}", delta);
    }
}
