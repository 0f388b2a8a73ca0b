//! Open-Meteo hourly forecast payload.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::domain::{Measurement, WeatherForecast};

/// Hourly variables requested from Open-Meteo.
pub const HOURLY_VARIABLES: &str = "temperature_2m,rain,wind_speed_10m,wind_gusts_10m,\
cloud_cover,cloud_cover_low,cloud_cover_mid,cloud_cover_high";

#[derive(Debug, Default, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub hourly: Option<HourlyValues>,
}

/// Column-oriented hourly arrays; `time` is in Unix seconds.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HourlyValues {
    pub time: Vec<i64>,
    pub temperature_2m: Vec<Option<f64>>,
    pub rain: Vec<Option<f64>>,
    #[serde(alias = "windspeed_10m")]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(alias = "windgusts_10m")]
    pub wind_gusts_10m: Vec<Option<f64>>,
    #[serde(alias = "cloudcover")]
    pub cloud_cover: Vec<Option<f64>>,
    #[serde(alias = "cloudcover_low")]
    pub cloud_cover_low: Vec<Option<f64>>,
    #[serde(alias = "cloudcover_mid")]
    pub cloud_cover_mid: Vec<Option<f64>>,
    #[serde(alias = "cloudcover_high")]
    pub cloud_cover_high: Vec<Option<f64>>,
}

fn at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

/// Zips the hourly columns into samples, dropping those before `now`.
pub fn parse_forecast(response: &OpenMeteoResponse, now: DateTime<Utc>) -> WeatherForecast {
    let Some(hourly) = &response.hourly else {
        return WeatherForecast::default();
    };

    let measurements = hourly
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, &seconds)| {
            let time = Utc.timestamp_opt(seconds, 0).single()?;
            (time >= now).then(|| Measurement {
                time,
                temperature: at(&hourly.temperature_2m, i),
                rain: at(&hourly.rain, i),
                wind_speed: at(&hourly.wind_speed_10m, i),
                wind_gust: at(&hourly.wind_gusts_10m, i),
                cloud_cover: at(&hourly.cloud_cover, i),
                cloud_cover_high: at(&hourly.cloud_cover_high, i),
                cloud_cover_mid: at(&hourly.cloud_cover_mid, i),
                cloud_cover_low: at(&hourly.cloud_cover_low, i),
            })
        })
        .collect();

    WeatherForecast { measurements }
}
