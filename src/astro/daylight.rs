//! Solar altitude over a day and the horizon crossings it implies.
//!
//! Declination comes from the same apparent longitude and obliquity as the
//! heliographic parameters; the equation of time uses the NOAA series.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};

use super::heliographic::{apparent_longitude, mean_obliquity};
use super::julian::{centuries_since_j2000, julian_date};
use crate::domain::{AltitudeSample, DaylightEvent, DaylightEventKind, DaylightReport};
use crate::utils::stepped_by;

/// Default spacing of an altitude scan.
pub const SCAN_STEP_MINUTES: i64 = 10;

/// Equation of time in minutes (NOAA / Meeus ch. 28 series).
fn equation_of_time(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let mean_longitude = (280.46646 + t * (36000.76983 + t * 0.0003032)).to_radians();
    let mean_anomaly = (357.52911 + t * (35999.05029 - t * 0.0001537)).to_radians();
    let eccentricity = 0.016708634 - t * (0.000042037 + t * 0.0000001267);
    let y = (mean_obliquity(jd).to_radians() / 2.0).tan().powi(2);

    let eq = y * (2.0 * mean_longitude).sin() - 2.0 * eccentricity * mean_anomaly.sin()
        + 4.0 * eccentricity * y * mean_anomaly.sin() * (2.0 * mean_longitude).cos()
        - 0.5 * y * y * (4.0 * mean_longitude).sin()
        - 1.25 * eccentricity * eccentricity * (2.0 * mean_anomaly).sin();

    4.0 * eq.to_degrees()
}

/// Apparent declination of the Sun, degrees.
pub fn solar_declination(jd: f64) -> f64 {
    let epsilon = mean_obliquity(jd).to_radians();
    let lambda = apparent_longitude(jd).to_radians();
    (epsilon.sin() * lambda.sin()).asin().to_degrees()
}

/// Geometric altitude of the Sun above the horizon, degrees.
pub fn solar_altitude(instant: DateTime<Utc>, latitude: f64, longitude: f64) -> f64 {
    let jd = julian_date(instant);
    let declination = solar_declination(jd).to_radians();

    let minutes = instant.hour() as f64 * 60.0
        + instant.minute() as f64
        + instant.second() as f64 / 60.0;
    let solar_time = minutes + equation_of_time(jd) + 4.0 * longitude;
    let hour_angle = (solar_time / 4.0 - 180.0).to_radians();

    let lat = latitude.to_radians();
    let sin_alt = lat.sin() * declination.sin() + lat.cos() * declination.cos() * hour_angle.cos();
    sin_alt.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Samples the altitude from 00:00 UTC of `day` through the following 00:00.
pub fn altitude_scan(
    day: NaiveDate,
    latitude: f64,
    longitude: f64,
    step: Duration,
) -> Vec<AltitudeSample> {
    let start = day.and_time(NaiveTime::default()).and_utc();
    stepped_by(start, start + Duration::days(1), step)
        .map(|time| AltitudeSample {
            time,
            altitude: solar_altitude(time, latitude, longitude),
        })
        .collect()
}

/// Horizon crossings during the UTC `day` at a location, in time order.
///
/// Scans at the default step, see [`crossings`]. Polar day or night produce
/// no crossings at all.
pub fn solar_event_sequence(
    day: NaiveDate,
    latitude: f64,
    longitude: f64,
    requested: &[DaylightEventKind],
) -> Vec<DaylightEvent> {
    let samples = altitude_scan(
        day,
        latitude,
        longitude,
        Duration::minutes(SCAN_STEP_MINUTES),
    );
    crossings(&samples, requested)
}

/// Crossings found in an existing scan, interpolated linearly between
/// neighbouring samples.
pub fn crossings(
    samples: &[AltitudeSample],
    requested: &[DaylightEventKind],
) -> Vec<DaylightEvent> {
    let mut events: Vec<DaylightEvent> = requested
        .iter()
        .flat_map(|&kind| {
            let target = kind.altitude();
            samples.windows(2).filter_map(move |pair| {
                let (a, b) = (pair[0], pair[1]);
                let crosses = if kind.rising() {
                    a.altitude <= target && b.altitude > target
                } else {
                    a.altitude >= target && b.altitude < target
                };
                if !crosses {
                    return None;
                }
                let fraction = (target - a.altitude) / (b.altitude - a.altitude);
                let span = (b.time - a.time).num_milliseconds() as f64;
                let offset = Duration::milliseconds((fraction * span).round() as i64);
                Some(DaylightEvent {
                    kind,
                    time: a.time + offset,
                })
            })
        })
        .collect();

    events.sort_by_key(|e| e.time);
    events
}

/// Scan of the UTC day containing `instant`, its crossings and the current altitude.
pub fn daylight_report(instant: DateTime<Utc>, latitude: f64, longitude: f64) -> DaylightReport {
    let samples = altitude_scan(
        instant.date_naive(),
        latitude,
        longitude,
        Duration::minutes(SCAN_STEP_MINUTES),
    );
    let events = crossings(&samples, &DaylightEventKind::ALL);

    DaylightReport {
        samples,
        events,
        current_altitude: solar_altitude(instant, latitude, longitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_equinox_noon_at_equator() {
        let t = Utc.with_ymd_and_hms(2024, 3, 20, 12, 7, 0).unwrap();
        let alt = solar_altitude(t, 0.0, 0.0);
        assert!(alt > 88.0, "alt = {}", alt);
    }

    #[test]
    fn test_midnight_is_dark() {
        let t = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(solar_altitude(t, 51.5, 0.0) < 0.0);
    }

    #[test]
    fn test_scan_covers_whole_day() {
        let samples = altitude_scan(date(2024, 5, 13), 51.5, 0.0, Duration::minutes(10));
        assert_eq!(samples.len(), 145);
        assert_eq!(
            samples.last().unwrap().time - samples.first().unwrap().time,
            Duration::days(1)
        );
    }

    #[test]
    fn test_london_sunrise_sunset() {
        // 2024-05-13, sunrise ~04:12 UTC, sunset ~19:40 UTC
        let events = solar_event_sequence(
            date(2024, 5, 13),
            51.5074,
            -0.1278,
            &[DaylightEventKind::Sunrise, DaylightEventKind::Sunset],
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, DaylightEventKind::Sunrise);
        assert_eq!(events[1].kind, DaylightEventKind::Sunset);

        let sunrise = Utc.with_ymd_and_hms(2024, 5, 13, 4, 12, 0).unwrap();
        let sunset = Utc.with_ymd_and_hms(2024, 5, 13, 19, 40, 0).unwrap();
        assert!((events[0].time - sunrise).num_minutes().abs() <= 5);
        assert!((events[1].time - sunset).num_minutes().abs() <= 5);
    }

    #[test]
    fn test_polar_day_has_no_sunset() {
        let samples = altitude_scan(date(2024, 6, 21), 78.2, 15.6, Duration::minutes(10));
        assert!(crossings(&samples, &DaylightEventKind::ALL).is_empty());
        let events = solar_event_sequence(date(2024, 6, 21), 78.2, 15.6, &DaylightEventKind::ALL);
        assert!(events.is_empty());
        assert!(samples.iter().all(|s| s.altitude > 0.0));
    }

    #[test]
    fn test_events_are_ordered() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let report = daylight_report(t, -41.3, 174.8);
        assert!(report.events.windows(2).all(|w| w[0].time <= w[1].time));
        assert!(!report.events.is_empty());
        assert_eq!(
            report.events,
            solar_event_sequence(t.date_naive(), -41.3, 174.8, &DaylightEventKind::ALL)
        );
    }
}
