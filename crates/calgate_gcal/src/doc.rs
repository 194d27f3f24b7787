// File: crates/calgate_gcal/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::StatusResponse;
use crate::logic::{
    CalendarQueryStatus, CreateCalendarRequest, CreateCalendarResponse, CreateEventRequest,
    CreateEventResponse, DayEvent, DeleteEventRequest, DeleteEventResponse, FindEventRequest,
    FindEventResponse, FindEventsRequest, FindEventsResponse, MoveEventRequest, MoveEventResponse,
    SearchParams,
};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = StatusResponse)
    ),
    tag = "calendar"
)]
fn doc_root_handler() {}

#[utoipa::path(
    post,
    path = "/calendar/create",
    request_body(content = CreateCalendarRequest, example = json!({
        "calendar_name": "Team Offsite",
        "description": "Planning for the spring offsite"
    })),
    responses(
        (status = 200, description = "Calendar created, or the provider error", body = CreateCalendarResponse,
         example = json!({
             "success": true,
             "calendar_id": "c_1a2b3c@group.calendar.google.com",
             "calendar_name": "Team Offsite",
             "message": "Calendar \"Team Offsite\" created successfully"
         })
        ),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "calendar"
)]
fn doc_create_calendar_handler() {}

#[utoipa::path(
    post,
    path = "/event/create",
    request_body(content = CreateEventRequest, example = json!({
        "title": "Dentist",
        "start_datetime": "2024-01-15T09:00:00",
        "end_datetime": "2024-01-15T10:00:00",
        "description": "Cleaning"
    })),
    responses(
        (status = 200, description = "Event created, or the provider error", body = CreateEventResponse),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "event"
)]
fn doc_create_event_handler() {}

#[utoipa::path(
    post,
    path = "/event/find",
    request_body(content = FindEventRequest, example = json!({
        "title": "Dentist",
        "start_datetime": "2024-01-15T09:00:00"
    })),
    responses(
        (status = 200, description = "Matching event, not-found or provider error", body = FindEventResponse,
         example = json!({
             "success": true,
             "event_id": "abc123",
             "event_title": "Dentist",
             "current_start": "2024-01-15T09:00:00-05:00",
             "current_end": "2024-01-15T10:00:00-05:00",
             "message": "Found event \"Dentist\""
         })
        ),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "event"
)]
fn doc_find_event_handler() {}

#[utoipa::path(
    post,
    path = "/event/move",
    request_body(content = MoveEventRequest, example = json!({
        "title": "Dentist",
        "current_start_datetime": "2024-01-15T09:00:00",
        "new_start_datetime": "2024-01-16T14:00:00",
        "new_end_datetime": "2024-01-16T15:00:00"
    })),
    responses(
        (status = 200, description = "Moved event, not-found or provider error", body = MoveEventResponse),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "event"
)]
fn doc_move_event_handler() {}

#[utoipa::path(
    post,
    path = "/event/delete",
    request_body(content = DeleteEventRequest, example = json!({
        "title": "Dentist",
        "start_datetime": "2024-01-15T09:00:00"
    })),
    responses(
        (status = 200, description = "Deleted event, not-found or provider error", body = DeleteEventResponse),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "event"
)]
fn doc_delete_event_handler() {}

#[utoipa::path(
    post,
    path = "/events/find",
    request_body(content = FindEventsRequest, example = json!({ "date": "2024-01-15" })),
    responses(
        (status = 200, description = "Events across all calendars on the date", body = FindEventsResponse),
        (status = 400, description = "Date is not YYYY-MM-DD"),
        (status = 401, description = "Missing or rejected bearer token"),
        (status = 500, description = "Calendar list could not be fetched")
    ),
    security(("bearer_auth" = [])),
    tag = "event"
)]
fn doc_find_events_handler() {}

pub struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_root_handler,
        doc_create_calendar_handler,
        doc_create_event_handler,
        doc_find_event_handler,
        doc_move_event_handler,
        doc_delete_event_handler,
        doc_find_events_handler
    ),
    components(
        schemas(
            StatusResponse,
            CreateCalendarRequest,
            CreateCalendarResponse,
            CreateEventRequest,
            CreateEventResponse,
            FindEventRequest,
            FindEventResponse,
            MoveEventRequest,
            MoveEventResponse,
            DeleteEventRequest,
            DeleteEventResponse,
            FindEventsRequest,
            FindEventsResponse,
            DayEvent,
            SearchParams,
            CalendarQueryStatus
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "calendar", description = "Calendar management"),
        (name = "event", description = "Event lookup and scheduling")
    )
)]
pub struct GcalApiDoc;
