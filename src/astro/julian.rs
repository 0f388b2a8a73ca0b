use chrono::{DateTime, TimeZone, Utc};

/// Julian date of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2440587.5;
/// Julian date of J2000.0.
pub const J2000_EPOCH: f64 = 2451545.0;
pub const JULIAN_CENTURY: f64 = 36525.0;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Julian date of a UTC instant.
pub fn julian_date(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// UTC instant of a Julian date, if it is representable.
pub fn from_julian_date(jd: f64) -> Option<DateTime<Utc>> {
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_EPOCH) / JULIAN_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(julian_date(t), J2000_EPOCH);
        assert_eq!(centuries_since_j2000(julian_date(t)), 0.0);
    }

    #[test]
    fn test_unix_epoch() {
        let t = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(julian_date(t), UNIX_EPOCH_JD);
    }

    #[test]
    fn test_from_julian_date() {
        let t = Utc.with_ymd_and_hms(2024, 5, 13, 6, 30, 0).unwrap();
        assert_eq!(from_julian_date(julian_date(t)), Some(t));
        assert_eq!(from_julian_date(f64::NAN), None);
    }
}
