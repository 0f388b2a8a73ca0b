/// Business logic services layer
use crate::clients::{OpenMeteoClient, PotsdamClient, SwpcClient};
use crate::domain::{HpEntry, SolarEventObservation, SolarRegionObservation, WeatherForecast};
use crate::errors::ApiResult;
use crate::parsers::{
    active_regions, group_by_event_id, group_by_region, latest_snapshot, normalize_all,
    parse_events, parse_forecast, parse_hp30, recent_events,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use tracing::info;

/// Solar activity service: geomagnetic indices, regions and events
pub struct SunService {
    potsdam_client: PotsdamClient,
    swpc_client: SwpcClient,
    event_window: Duration,
}

impl SunService {
    pub fn new(potsdam_client: PotsdamClient, swpc_client: SwpcClient, event_window: Duration) -> Self {
        Self {
            potsdam_client,
            swpc_client,
            event_window,
        }
    }

    /// Fetch and parse the Hp30/ap30 nowcast
    pub async fn fetch_hp30(&self) -> ApiResult<Vec<HpEntry>> {
        let text = self.potsdam_client.fetch_hp30_file().await?;
        let entries = parse_hp30(text.as_bytes())?;
        info!("Hp30: {} entries", entries.len());
        Ok(entries)
    }

    async fn fetch_regions(&self) -> ApiResult<Vec<SolarRegionObservation>> {
        let dtos = self.swpc_client.fetch_solar_regions().await?;
        let observations = normalize_all(&dtos)?;
        info!(
            "Regions: {} of {} rows usable",
            observations.len(),
            dtos.len()
        );
        Ok(observations)
    }

    /// Regions reported on the newest day of the feed
    pub async fn region_snapshot(&self) -> ApiResult<BTreeMap<i32, Vec<SolarRegionObservation>>> {
        Ok(latest_snapshot(self.fetch_regions().await?))
    }

    /// Latest observation of every region that still has spots
    pub async fn active_regions(&self) -> ApiResult<Vec<SolarRegionObservation>> {
        let grouped = group_by_region(self.fetch_regions().await?);
        Ok(active_regions(&grouped).into_iter().cloned().collect())
    }

    /// Events that began within the configured window before `now`
    pub async fn recent_events(
        &self,
        now: DateTime<Utc>,
    ) -> ApiResult<BTreeMap<i32, Vec<SolarEventObservation>>> {
        let dtos = self.swpc_client.fetch_solar_events().await?;
        let events = recent_events(parse_events(&dtos), now, self.event_window);
        info!("Events: {} of {} rows recent and valid", events.len(), dtos.len());
        Ok(group_by_event_id(events))
    }
}

/// Weather service
pub struct EarthService {
    open_meteo_client: OpenMeteoClient,
}

impl EarthService {
    pub fn new(open_meteo_client: OpenMeteoClient) -> Self {
        Self { open_meteo_client }
    }

    /// Hourly forecast from `now` onwards
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        now: DateTime<Utc>,
    ) -> ApiResult<WeatherForecast> {
        let response = self
            .open_meteo_client
            .fetch_forecast(latitude, longitude)
            .await?;
        Ok(parse_forecast(&response, now))
    }
}
