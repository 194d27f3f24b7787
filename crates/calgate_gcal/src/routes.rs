// --- File: crates/calgate_gcal/src/routes.rs ---

use crate::auth::https_connector;
use crate::handlers::{
    create_calendar_handler, create_event_handler, delete_event_handler, find_event_handler,
    find_events_handler, move_event_handler, root_handler, GcalState,
};
use crate::service::GoogleProviderFactory;
use axum::{
    routing::{get, post},
    Router,
};
use calgate_config::{AppConfig, SettingsError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RoutesError {
    #[error("Invalid calendar settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("Failed to load TLS root certificates: {0}")]
    Tls(#[from] std::io::Error),
}

/// Creates the calendar router backed by Google Calendar.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, RoutesError> {
    let providers = Arc::new(GoogleProviderFactory::new(https_connector()?));
    let state = GcalState::new(&config, providers)?;
    info!(
        "Calendar routes ready (time zone {}, default calendar {})",
        state.settings.time_zone, state.settings.default_calendar_id
    );

    Ok(router(Arc::new(state)))
}

/// Mounts every handler over an already-built state.
pub fn router(state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/calendar/create", post(create_calendar_handler))
        .route("/event/create", post(create_event_handler))
        .route("/event/find", post(find_event_handler))
        .route("/event/move", post(move_event_handler))
        .route("/event/delete", post(delete_event_handler))
        .route("/events/find", post(find_events_handler))
        .with_state(state)
}
