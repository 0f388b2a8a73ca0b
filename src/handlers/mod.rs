/// HTTP request handlers
use crate::astro::{
    daylight_report, heliographic_parameters_at, moon_phase, project, project_clamped,
    subsolar_point, terminator_phase,
};
use crate::domain::{
    DaylightReport, Health, HeliographicParameters, MoonPhase, ProjectedPoint, SubsolarPoint,
};
use crate::errors::ApiError;
use crate::services::{EarthService, SunService};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sun_service: Arc<SunService>,
    pub earth_service: Arc<EarthService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

type Params = Query<HashMap<String, String>>;

/// `at` as RFC 3339, defaulting to the current time
fn instant_param(params: &HashMap<String, String>) -> Result<DateTime<Utc>, ApiError> {
    match params.get("at") {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ApiError::InvalidInput(format!("at: {}", e))),
    }
}

fn number_param(
    params: &HashMap<String, String>,
    key: &str,
    range: std::ops::RangeInclusive<f64>,
) -> Result<f64, ApiError> {
    let raw = params
        .get(key)
        .ok_or_else(|| ApiError::InvalidInput(format!("{} is required", key)))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| ApiError::InvalidInput(format!("{}: not a number", key)))?;
    if !range.contains(&value) {
        return Err(ApiError::InvalidInput(format!(
            "{} must be within {}..={}",
            key,
            range.start(),
            range.end()
        )));
    }
    Ok(value)
}

fn latitude_param(params: &HashMap<String, String>, key: &str) -> Result<f64, ApiError> {
    number_param(params, key, -90.0..=90.0)
}

fn longitude_param(params: &HashMap<String, String>, key: &str) -> Result<f64, ApiError> {
    number_param(params, key, -180.0..=180.0)
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Hp30/ap30 geomagnetic indices
pub async fn get_hp30(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let entries = state.sun_service.fetch_hp30().await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({ "entries": entries })
    ))))
}

/// Latest daily region snapshot, keyed by region number
pub async fn get_regions(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let regions = state.sun_service.region_snapshot().await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({ "regions": regions })
    ))))
}

/// Regions with spots, one observation each
pub async fn get_active_regions(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let regions = state.sun_service.active_regions().await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({ "regions": regions })
    ))))
}

/// Recent solar events, keyed by event id
pub async fn get_events(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let events = state.sun_service.recent_events(Utc::now()).await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({ "events": events })
    ))))
}

pub async fn get_heliographic(
    Query(params): Params,
) -> Result<Json<SuccessResponse<HeliographicParameters>>, ApiError> {
    let at = instant_param(&params)?;
    Ok(Json(SuccessResponse::new(heliographic_parameters_at(at))))
}

#[derive(Serialize)]
pub struct SubsolarResponse {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub point: SubsolarPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<f64>,
}

/// Subsolar point, plus the day/night phase when an observer longitude is given
pub async fn get_subsolar(
    Query(params): Params,
) -> Result<Json<SuccessResponse<SubsolarResponse>>, ApiError> {
    let at = instant_param(&params)?;
    let point = subsolar_point(at);
    let phase = if params.contains_key("lon") {
        let observer = longitude_param(&params, "lon")?;
        Some(terminator_phase(point.longitude, observer))
    } else {
        None
    };
    Ok(Json(SuccessResponse::new(SubsolarResponse { at, point, phase })))
}

/// Solar altitude curve and rise/set times for a UTC day
pub async fn get_daylight(
    Query(params): Params,
) -> Result<Json<SuccessResponse<DaylightReport>>, ApiError> {
    let latitude = latitude_param(&params, "lat")?;
    let longitude = longitude_param(&params, "lon")?;
    let at = match params.get("date") {
        None => Utc::now(),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|d| d.and_time(NaiveTime::default()).and_utc())
            .map_err(|e| ApiError::InvalidInput(format!("date: {}", e)))?,
    };
    Ok(Json(SuccessResponse::new(daylight_report(
        at, latitude, longitude,
    ))))
}

/// Hourly weather forecast
pub async fn get_forecast(
    Query(params): Params,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let latitude = latitude_param(&params, "lat")?;
    let longitude = longitude_param(&params, "lon")?;
    let forecast = state
        .earth_service
        .forecast(latitude, longitude, Utc::now())
        .await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(forecast))))
}

pub async fn get_moon_phase(
    Query(params): Params,
) -> Result<Json<SuccessResponse<MoonPhase>>, ApiError> {
    let at = instant_param(&params)?;
    Ok(Json(SuccessResponse::new(moon_phase(at))))
}

/// Orthographic projection of a single point
pub async fn get_projection(
    Query(params): Params,
) -> Result<Json<SuccessResponse<ProjectedPoint>>, ApiError> {
    let longitude = longitude_param(&params, "lon")?;
    let latitude = latitude_param(&params, "lat")?;
    let radius = number_param(&params, "radius", 0.0..=f64::MAX)?;
    let clamp = params.get("clamp").is_some_and(|v| v == "true");

    let point = if clamp {
        project_clamped(longitude, latitude, radius)
    } else {
        project(longitude, latitude, radius)
    };
    Ok(Json(SuccessResponse::new(point)))
}
