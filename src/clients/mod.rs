/// External API clients module
use crate::domain::{SolarEventObservationDto, SolarRegionObservationDto};
use crate::errors::ApiResult;
use crate::parsers::decode_rows;
use crate::parsers::forecast::{OpenMeteoResponse, HOURLY_VARIABLES};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_seconds: u64) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent("prescient/0.1")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

fn join(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// GFZ Potsdam geomagnetic index client
pub struct PotsdamClient {
    http_client: HttpClient,
    base_url: String,
}

impl PotsdamClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout_seconds)?,
            base_url,
        })
    }

    /// Fetch the raw Hp30/ap30 nowcast file
    pub async fn fetch_hp30_file(&self) -> ApiResult<String> {
        let url = join(&self.base_url, "kp_index/Hp30_ap30_nowcast.txt");
        debug!("GET {}", url);

        let text = self
            .http_client
            .get_client()
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

/// NOAA Space Weather Prediction Center client
pub struct SwpcClient {
    http_client: HttpClient,
    base_url: String,
}

impl SwpcClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout_seconds)?,
            base_url,
        })
    }

    /// Fetch daily active region reports, skipping rows that do not decode
    pub async fn fetch_solar_regions(&self) -> ApiResult<Vec<SolarRegionObservationDto>> {
        let rows: Vec<Value> = self.fetch_json("json/solar_regions.json").await?;
        Ok(decode_rows(rows, "solar region"))
    }

    /// Fetch the edited solar events list, skipping rows that do not decode
    pub async fn fetch_solar_events(&self) -> ApiResult<Vec<SolarEventObservationDto>> {
        let rows: Vec<Value> = self.fetch_json("json/solar_events.json").await?;
        Ok(decode_rows(rows, "solar event"))
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = join(&self.base_url, path);
        debug!("GET {}", url);

        let json = self
            .http_client
            .get_client()
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(json)
    }
}

/// Open-Meteo forecast client
pub struct OpenMeteoClient {
    http_client: HttpClient,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout_seconds)?,
            base_url,
        })
    }

    /// Fetch the hourly forecast for a location
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> ApiResult<OpenMeteoResponse> {
        let url = join(&self.base_url, "v1/forecast");
        debug!("GET {} ({}, {})", url, latitude, longitude);

        let json = self
            .http_client
            .get_client()
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("temperature_unit", "celsius".to_string()),
                ("timeformat", "unixtime".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(json)
    }
}
