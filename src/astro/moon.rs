//! Mean lunar phase. Accurate to within about a day, enough to shade the
//! moon glyph.

use chrono::{DateTime, Utc};
use std::f64::consts::TAU;

use super::julian::julian_date;
use crate::domain::MoonPhase;

/// Mean length of the synodic month, days.
pub const SYNODIC_MONTH: f64 = 29.530588853;
/// A reference new moon, 2000-01-06 14:24 TT.
pub const REFERENCE_NEW_MOON: f64 = 2451550.1;

pub fn moon_phase(instant: DateTime<Utc>) -> MoonPhase {
    let age_days = (julian_date(instant) - REFERENCE_NEW_MOON).rem_euclid(SYNODIC_MONTH);
    let phase = age_days / SYNODIC_MONTH;

    MoonPhase {
        phase,
        age_days,
        illuminated: (1.0 - (TAU * phase).cos()) / 2.0,
    }
}
