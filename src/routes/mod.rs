/// Application routes configuration
use crate::handlers::{
    get_active_regions, get_daylight, get_events, get_forecast, get_heliographic, get_hp30,
    get_moon_phase, get_projection, get_regions, get_subsolar, health, AppState,
};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Sun endpoints
        .route("/sun/hp30", get(get_hp30))
        .route("/sun/regions", get(get_regions))
        .route("/sun/regions/active", get(get_active_regions))
        .route("/sun/events", get(get_events))
        .route("/sun/heliographic", get(get_heliographic))
        // Earth endpoints
        .route("/earth/subsolar", get(get_subsolar))
        .route("/earth/daylight", get(get_daylight))
        .route("/earth/forecast", get(get_forecast))
        // Moon
        .route("/moon/phase", get(get_moon_phase))
        .route("/project", get(get_projection))
        .with_state(state)
}
