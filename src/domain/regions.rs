use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A raw row of the SWPC `solar_regions.json` feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SolarRegionObservationDto {
    pub region: i32,
    pub latitude: Option<i32>,
    pub longitude: Option<i32>,
    pub location: Option<String>,
    /// ISO 8601 calendar date
    pub observed_date: String,
    pub carrington_longitude: Option<i32>,
    pub area: i32,
    pub spot_class: Option<String>,
    pub extent: i32,
    pub number_spots: i32,
    pub mag_class: Option<String>,
    pub mag_string: Option<String>,
    pub status: Option<String>,
    pub c_xray_events: i32,
    pub m_xray_events: i32,
    pub x_xray_events: i32,
    pub proton_events: Option<i32>,
    pub c_flare_probability: i32,
    pub m_flare_probability: i32,
    pub x_flare_probability: i32,
    pub proton_probability: Option<i32>,
    /// ISO 8601 local datetime
    pub first_date: String,
}

/// Everything known about a region on a given day besides its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarRegionMetadata {
    pub location: String,
    pub carrington_longitude: Option<i32>,
    /// millionths of the solar hemisphere
    pub area: i32,
    pub spot_class: Option<String>,
    pub extent: i32,
    pub number_spots: i32,
    pub mag_class: Option<String>,
    pub mag_string: Option<String>,
    pub status: Option<String>,
    pub c_xray_events: i32,
    pub m_xray_events: i32,
    pub x_xray_events: i32,
    pub proton_events: Option<i32>,
    pub c_flare_probability: i32,
    pub m_flare_probability: i32,
    pub x_flare_probability: i32,
    pub proton_probability: Option<i32>,
}

/// One daily observation of a numbered active region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarRegionObservation {
    pub region: i32,
    pub observed_date: NaiveDate,
    pub first_date: NaiveDateTime,
    pub latitude: i32,
    pub longitude: i32,
    pub metadata: SolarRegionMetadata,
}
