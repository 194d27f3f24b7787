// File: crates/calgate_gcal/src/handlers.rs
use crate::logic::{
    create_calendar, create_event, delete_event_by_title, find_event_by_title_and_time,
    find_events_by_date, move_event_by_title, CreateCalendarRequest, CreateCalendarResponse,
    CreateEventRequest, CreateEventResponse, DeleteEventRequest, DeleteEventResponse,
    FindEventRequest, FindEventResponse, FindEventsRequest, FindEventsResponse, GcalError,
    MoveEventRequest, MoveEventResponse,
};
use crate::service::ProviderFactory;
use crate::session::{CalendarSession, TokenValidationCache};
use axum::{extract::State, response::Json};
use calgate_common::{bad_request, internal_error, map_json_error, GatewayError};
use calgate_config::{AppConfig, CalendarSettings, SettingsError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

// Define shared state needed by GCal handlers
#[derive(Clone)]
pub struct GcalState {
    pub settings: Arc<CalendarSettings>,
    pub providers: Arc<dyn ProviderFactory>,
    pub validations: Arc<TokenValidationCache>,
}

impl GcalState {
    pub fn new(
        config: &AppConfig,
        providers: Arc<dyn ProviderFactory>,
    ) -> Result<Self, SettingsError> {
        let settings = config.gcal.settings()?;
        let validations =
            TokenValidationCache::new(Duration::from_secs(settings.token_cache_ttl_secs));

        Ok(Self {
            settings: Arc::new(settings),
            providers,
            validations: Arc::new(validations),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusResponse {
    pub message: String,
}

/// Liveness message; needs no credentials.
pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Google Calendar API Server is running".to_string(),
    })
}

#[axum::debug_handler]
pub async fn create_calendar_handler(
    State(state): State<Arc<GcalState>>,
    session: CalendarSession,
    Json(request): Json<CreateCalendarRequest>,
) -> Json<CreateCalendarResponse> {
    Json(create_calendar(session.provider(), &state.settings, &request).await)
}

#[axum::debug_handler]
pub async fn create_event_handler(
    State(state): State<Arc<GcalState>>,
    session: CalendarSession,
    Json(request): Json<CreateEventRequest>,
) -> Json<CreateEventResponse> {
    Json(create_event(session.provider(), &state.settings, &request).await)
}

#[axum::debug_handler]
pub async fn find_event_handler(
    State(state): State<Arc<GcalState>>,
    session: CalendarSession,
    Json(request): Json<FindEventRequest>,
) -> Json<FindEventResponse> {
    Json(find_event_by_title_and_time(session.provider(), &state.settings, &request).await)
}

#[axum::debug_handler]
pub async fn move_event_handler(
    State(state): State<Arc<GcalState>>,
    session: CalendarSession,
    Json(request): Json<MoveEventRequest>,
) -> Json<MoveEventResponse> {
    Json(move_event_by_title(session.provider(), &state.settings, &request).await)
}

#[axum::debug_handler]
pub async fn delete_event_handler(
    State(state): State<Arc<GcalState>>,
    session: CalendarSession,
    Json(request): Json<DeleteEventRequest>,
) -> Json<DeleteEventResponse> {
    Json(delete_event_by_title(session.provider(), &state.settings, &request).await)
}

/// Day listing; the only operation that reports failures as HTTP errors.
#[axum::debug_handler]
pub async fn find_events_handler(
    State(state): State<Arc<GcalState>>,
    session: CalendarSession,
    Json(request): Json<FindEventsRequest>,
) -> Result<Json<FindEventsResponse>, GatewayError> {
    let result = find_events_by_date(session.provider(), &state.settings, &request.date).await;
    map_json_error(result, find_events_error)
}

fn find_events_error(err: GcalError) -> GatewayError {
    match err {
        GcalError::InvalidDate(_) => bad_request(err),
        other => internal_error(format!("Error finding events: {}", other)),
    }
}
