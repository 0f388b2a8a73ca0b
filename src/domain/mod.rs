/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod events;
mod regions;

pub use events::*;
pub use regions::*;

/// A position on a sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// A point on the projected disk, in display units relative to its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Where the sun is directly overhead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubsolarPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// Orientation of the solar disk as seen from Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeliographicParameters {
    /// Carrington longitude of the disk centre, degrees in [0, 360)
    pub l0: f64,
    /// Position angle of the rotation axis, degrees
    pub p: f64,
    /// Heliographic latitude of the disk centre, degrees
    pub b0: f64,
}

/// One half-hourly geomagnetic sample from the GFZ nowcast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HpEntry {
    pub time: DateTime<Utc>,
    pub hp30: f64,
    pub ap30: f64,
}

/// One hourly weather forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub time: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub rain: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub cloud_cover_high: Option<f64>,
    pub cloud_cover_mid: Option<f64>,
    pub cloud_cover_low: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WeatherForecast {
    pub measurements: Vec<Measurement>,
}

/// Solar altitude at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AltitudeSample {
    pub time: DateTime<Utc>,
    pub altitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DaylightEventKind {
    Sunrise,
    Sunset,
    AstronomicalDawn,
    AstronomicalDusk,
}

impl DaylightEventKind {
    pub const ALL: [DaylightEventKind; 4] = [
        DaylightEventKind::Sunrise,
        DaylightEventKind::Sunset,
        DaylightEventKind::AstronomicalDawn,
        DaylightEventKind::AstronomicalDusk,
    ];

    /// Solar altitude, in degrees, at which the event happens.
    pub fn altitude(&self) -> f64 {
        match self {
            DaylightEventKind::Sunrise | DaylightEventKind::Sunset => -0.833,
            DaylightEventKind::AstronomicalDawn | DaylightEventKind::AstronomicalDusk => -18.0,
        }
    }

    /// Whether the sun is climbing through the event altitude.
    pub fn rising(&self) -> bool {
        matches!(
            self,
            DaylightEventKind::Sunrise | DaylightEventKind::AstronomicalDawn
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaylightEvent {
    pub kind: DaylightEventKind,
    pub time: DateTime<Utc>,
}

/// Altitude curve and horizon crossings for one UTC day.
#[derive(Debug, Clone, Serialize)]
pub struct DaylightReport {
    pub samples: Vec<AltitudeSample>,
    pub events: Vec<DaylightEvent>,
    pub current_altitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonPhase {
    /// Fraction of the synodic month elapsed, 0 = new, 0.5 = full
    pub phase: f64,
    pub age_days: f64,
    /// Illuminated fraction of the disk, 0..=1
    pub illuminated: f64,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
