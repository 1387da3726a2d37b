//! Route definitions for the AgriDash platform

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Farm management
        .nest("/farms", farm_routes())
        // Field-scoped provider data
        .nest("/fields", field_routes())
        // AI assistant
        .nest("/assistant", assistant_routes())
}

/// Farm routes: the farm list, map viewport, activity log and reports
fn farm_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farms))
        .route("/:farm_id", get(handlers::get_farm))
        .route("/:farm_id/map", get(handlers::get_farm_map))
        .route(
            "/:farm_id/activities",
            get(handlers::list_activities).post(handlers::create_activity),
        )
        .route(
            "/:farm_id/activities/:activity_id/status",
            put(handlers::update_activity_status),
        )
        .route("/:farm_id/reports/:report_type", get(handlers::get_report))
}

/// Field routes: weather, crop health, snapshot and advisories
fn field_routes() -> Router<AppState> {
    Router::new()
        .route("/:field_id/weather", get(handlers::get_field_weather))
        .route("/:field_id/crop-health", get(handlers::get_field_crop_health))
        .route("/:field_id/snapshot", get(handlers::get_field_snapshot))
        .route("/:field_id/advisory", get(handlers::get_field_advisory))
        .route(
            "/:field_id/advisory/irrigation",
            get(handlers::get_irrigation_calendar),
        )
}

/// Assistant routes
fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/insights", post(handlers::generate_insights))
        .route("/chat", post(handlers::chat))
}
