// --- File: crates/calgate_gcal/src/logic.rs ---
use crate::service::{CalendarProvider, GcalServiceError};
use crate::time::{
    date_part, day_window, display_times, localize, parse_date, parse_local_datetime,
    rfc3339_at, start_matches, title_matches, title_search_window, StartKey,
};
use calgate_config::{CalendarSettings, EventOrder};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use futures::stream::{self, StreamExt};
use google_calendar3::api::{Calendar, Event, EventDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GcalError {
    #[error(transparent)]
    Service(#[from] GcalServiceError),
    #[error("Invalid date format: {0}. Use YYYY-MM-DD format.")]
    InvalidDate(String),
    #[error("Invalid date-time: {0}")]
    InvalidDateTime(String),
    #[error("{0}")]
    Validation(String),
}

const NO_TITLE: &str = "No Title";
const UNKNOWN_CALENDAR: &str = "Unknown Calendar";

// --- Data Structures ---
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateCalendarRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Team Offsite"))]
    pub calendar_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateCalendarResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_name: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Dentist"))]
    pub title: String,
    /// Local time in the configured zone, YYYY-MM-DDTHH:MM:SS
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-15T09:00:00"))]
    pub start_datetime: String,
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-15T10:00:00"))]
    pub end_datetime: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub calendar_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FindEventRequest {
    pub title: String,
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-15T09:00:00"))]
    pub start_datetime: String,
    #[serde(default)]
    pub calendar_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FindEventResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_end: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MoveEventRequest {
    pub title: String,
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-15T09:00:00"))]
    pub current_start_datetime: String,
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-16T14:00:00"))]
    pub new_start_datetime: String,
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-16T15:00:00"))]
    pub new_end_datetime: String,
    #[serde(default)]
    pub calendar_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MoveEventResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeleteEventRequest {
    pub title: String,
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-15T09:00:00"))]
    pub start_datetime: String,
    #[serde(default)]
    pub calendar_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeleteEventResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_event_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_event_id: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FindEventsRequest {
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2024-01-15"))]
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DayEvent {
    pub title: String,
    #[cfg_attr(feature = "openapi", schema(example = "9:00 AM"))]
    pub start_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00 AM"))]
    pub end_time: String,
    pub calendar: String,
    pub calendar_id: String,
    pub event_id: Option<String>,
    pub description: String,
    pub location: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SearchParams {
    pub time_min: String,
    pub time_max: String,
    pub window_zone: String,
    pub display_zone: String,
}

/// Outcome of the event query against one calendar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CalendarQueryStatus {
    pub calendar_id: String,
    pub calendar_name: String,
    pub success: bool,
    pub event_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FindEventsResponse {
    pub message: String,
    pub date: String,
    pub total_events: usize,
    pub events: Vec<DayEvent>,
    pub search_params: SearchParams,
    pub calendars: Vec<CalendarQueryStatus>,
}

/// An event found by title and start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedEvent {
    pub event_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl From<FindEventResponse> for MoveEventResponse {
    fn from(located: FindEventResponse) -> Self {
        Self {
            success: located.success,
            message: located.message,
            error: located.error,
            ..Default::default()
        }
    }
}

impl From<FindEventResponse> for DeleteEventResponse {
    fn from(located: FindEventResponse) -> Self {
        Self {
            success: located.success,
            message: located.message,
            error: located.error,
            ..Default::default()
        }
    }
}

fn calendar_or_default<'a>(calendar_id: Option<&'a str>, settings: &'a CalendarSettings) -> &'a str {
    calendar_id.unwrap_or(&settings.default_calendar_id)
}

/// Parses a naive local date-time and resolves it in `zone`.
fn local_instant<Z: TimeZone>(value: &str, zone: &Z, zone_name: &str) -> Result<DateTime<Utc>, GcalError> {
    let naive = parse_local_datetime(value).ok_or_else(|| {
        GcalError::InvalidDateTime(format!("{} (expected YYYY-MM-DDTHH:MM:SS)", value))
    })?;
    localize(&naive, zone).ok_or_else(|| {
        GcalError::InvalidDateTime(format!("{} does not exist in {}", value, zone_name))
    })
}

fn labelled(instant: DateTime<Utc>, zone: Tz) -> EventDateTime {
    EventDateTime {
        date_time: Some(instant),
        time_zone: Some(zone.name().to_string()),
        ..Default::default()
    }
}

// --- Create Calendar ---

pub async fn create_calendar(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    request: &CreateCalendarRequest,
) -> CreateCalendarResponse {
    match try_create_calendar(provider, settings, request).await {
        Ok(created) => {
            info!("Created calendar {:?} ({:?})", created.summary, created.id);
            CreateCalendarResponse {
                success: true,
                calendar_id: created.id,
                message: format!("Calendar \"{}\" created successfully", request.calendar_name),
                calendar_name: created.summary.or_else(|| Some(request.calendar_name.clone())),
                error: None,
            }
        }
        Err(e) => {
            error!("Failed to create calendar: {}", e);
            CreateCalendarResponse {
                success: false,
                calendar_id: None,
                calendar_name: None,
                message: "Failed to create calendar".to_string(),
                error: Some(e.to_string()),
            }
        }
    }
}

async fn try_create_calendar(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    request: &CreateCalendarRequest,
) -> Result<Calendar, GcalError> {
    if request.calendar_name.trim().is_empty() {
        return Err(GcalError::Validation(
            "calendar_name must not be empty".to_string(),
        ));
    }

    let calendar = Calendar {
        summary: Some(request.calendar_name.clone()),
        description: Some(request.description.clone().unwrap_or_default()),
        time_zone: Some(settings.time_zone.name().to_string()),
        ..Default::default()
    };
    Ok(provider.insert_calendar(calendar).await?)
}

// --- Create Event ---

pub async fn create_event(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    request: &CreateEventRequest,
) -> CreateEventResponse {
    let calendar_id = calendar_or_default(request.calendar_id.as_deref(), settings);

    match try_create_event(provider, settings, calendar_id, request).await {
        Ok(created) => {
            info!("Created event \"{}\" with ID {:?}", request.title, created.id);
            CreateEventResponse {
                success: true,
                event_id: created.id,
                event_link: created.html_link,
                calendar_id: Some(calendar_id.to_string()),
                message: format!("Event \"{}\" created successfully", request.title),
                error: None,
            }
        }
        Err(e) => {
            error!("Failed to create event \"{}\": {}", request.title, e);
            CreateEventResponse {
                success: false,
                event_id: None,
                event_link: None,
                calendar_id: None,
                message: "Failed to create event".to_string(),
                error: Some(e.to_string()),
            }
        }
    }
}

async fn try_create_event(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    calendar_id: &str,
    request: &CreateEventRequest,
) -> Result<Event, GcalError> {
    let zone = settings.time_zone;
    let start = local_instant(&request.start_datetime, &zone, zone.name())?;
    let end = local_instant(&request.end_datetime, &zone, zone.name())?;

    let event = Event {
        summary: Some(request.title.clone()),
        description: Some(request.description.clone().unwrap_or_default()),
        start: Some(labelled(start, zone)),
        end: Some(labelled(end, zone)),
        ..Default::default()
    };
    Ok(provider.insert_event(calendar_id, event).await?)
}

// --- Locate by title and start ---

/// Scans the day of `start_datetime` for the first event whose title and
/// start both match. `Ok(None)` when nothing matches.
pub async fn locate_event(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    calendar_id: &str,
    title: &str,
    start_datetime: &str,
) -> Result<Option<LocatedEvent>, GcalError> {
    let (time_min, time_max) =
        title_search_window(start_datetime, settings.search_offset, settings.time_zone)
            .ok_or_else(|| GcalError::InvalidDate(date_part(start_datetime).to_string()))?;

    let events = provider.list_events(calendar_id, time_min, time_max).await?;
    debug!(
        "Scanning {} events on {} for \"{}\" at {}",
        events.len(),
        calendar_id,
        title,
        start_datetime
    );

    Ok(events.into_iter().find_map(|event| {
        if !title_matches(event.summary.as_deref(), title) {
            return None;
        }
        let start = event.start.as_ref()?;
        if !start_matches(settings.start_match, start_datetime, start, settings.time_zone) {
            debug!("Title matched but start {:?} did not", start.date_time);
            return None;
        }
        Some(LocatedEvent {
            start: start.date_time?,
            end: event.end.as_ref().and_then(|end| end.date_time),
            event_id: event.id?,
            title: event.summary.unwrap_or_default(),
        })
    }))
}

pub async fn find_event_by_title_and_time(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    request: &FindEventRequest,
) -> FindEventResponse {
    let calendar_id = calendar_or_default(request.calendar_id.as_deref(), settings);
    let outcome = locate_event(
        provider,
        settings,
        calendar_id,
        &request.title,
        &request.start_datetime,
    )
    .await;

    locate_response(outcome, &request.title, &request.start_datetime, settings)
}

/// Envelope for a locate outcome, shared by find, move and delete.
fn locate_response(
    outcome: Result<Option<LocatedEvent>, GcalError>,
    title: &str,
    start_datetime: &str,
    settings: &CalendarSettings,
) -> FindEventResponse {
    match outcome {
        Ok(Some(found)) => {
            info!("Found event \"{}\" ({})", found.title, found.event_id);
            let offset = settings.search_offset;
            FindEventResponse {
                success: true,
                current_start: Some(rfc3339_at(found.start, offset)),
                current_end: found.end.map(|end| rfc3339_at(end, offset)),
                message: format!("Found event \"{}\"", found.title),
                event_id: Some(found.event_id),
                event_title: Some(found.title),
                error: None,
            }
        }
        Ok(None) => {
            info!("No event titled \"{}\" at {}", title, start_datetime);
            FindEventResponse {
                success: false,
                message: format!(
                    "No event found with title \"{}\" at time {}",
                    title, start_datetime
                ),
                ..Default::default()
            }
        }
        Err(e) => {
            error!("Failed to search for event \"{}\": {}", title, e);
            FindEventResponse {
                success: false,
                message: "Failed to search for event".to_string(),
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    }
}

// --- Move ---

/// Reschedules an event by id, keeping every other field as stored.
pub async fn move_event(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    calendar_id: &str,
    event_id: &str,
    new_start_datetime: &str,
    new_end_datetime: &str,
) -> MoveEventResponse {
    match reschedule(
        provider,
        settings,
        calendar_id,
        event_id,
        new_start_datetime,
        new_end_datetime,
    )
    .await
    {
        Ok(updated) => {
            info!("Moved event {} to {}", event_id, new_start_datetime);
            MoveEventResponse {
                success: true,
                event_id: updated.id.or_else(|| Some(event_id.to_string())),
                event_title: updated.summary,
                new_start: Some(new_start_datetime.to_string()),
                new_end: Some(new_end_datetime.to_string()),
                event_link: updated.html_link,
                message: "Event moved successfully".to_string(),
                error: None,
            }
        }
        Err(e) => {
            error!("Failed to move event {}: {}", event_id, e);
            MoveEventResponse {
                success: false,
                message: "Failed to move event".to_string(),
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    }
}

async fn reschedule(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    calendar_id: &str,
    event_id: &str,
    new_start_datetime: &str,
    new_end_datetime: &str,
) -> Result<Event, GcalError> {
    let mut event = provider.get_event(calendar_id, event_id).await?;

    let start = event.start.get_or_insert_with(Default::default);
    retime(start, new_start_datetime, settings.time_zone)?;
    let end = event.end.get_or_insert_with(Default::default);
    retime(end, new_end_datetime, settings.time_zone)?;

    Ok(provider.update_event(calendar_id, event_id, event).await?)
}

/// Replaces the instant of one event boundary. The new wall-clock time is
/// read in the boundary's own zone label, else in `fallback`, and the label
/// always names the zone the instant was computed in.
fn retime(boundary: &mut EventDateTime, value: &str, fallback: Tz) -> Result<(), GcalError> {
    let zone = boundary
        .time_zone
        .as_deref()
        .and_then(|label| label.parse::<Tz>().ok())
        .unwrap_or(fallback);

    boundary.date_time = Some(local_instant(value, &zone, zone.name())?);
    boundary.date = None;
    boundary.time_zone = Some(zone.name().to_string());
    Ok(())
}

pub async fn move_event_by_title(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    request: &MoveEventRequest,
) -> MoveEventResponse {
    let calendar_id = calendar_or_default(request.calendar_id.as_deref(), settings);

    let located = match locate_event(
        provider,
        settings,
        calendar_id,
        &request.title,
        &request.current_start_datetime,
    )
    .await
    {
        Ok(Some(found)) => found,
        outcome => {
            return locate_response(
                outcome,
                &request.title,
                &request.current_start_datetime,
                settings,
            )
            .into()
        }
    };

    let mut moved = move_event(
        provider,
        settings,
        calendar_id,
        &located.event_id,
        &request.new_start_datetime,
        &request.new_end_datetime,
    )
    .await;
    if moved.success {
        moved.message = format!("Found and moved event \"{}\" successfully", located.title);
        moved.event_title = Some(located.title);
    }
    moved
}

// --- Delete ---

pub async fn delete_event(
    provider: &dyn CalendarProvider,
    calendar_id: &str,
    event_id: &str,
) -> DeleteEventResponse {
    match provider.delete_event(calendar_id, event_id).await {
        Ok(()) => {
            info!("Deleted event {} from {}", event_id, calendar_id);
            DeleteEventResponse {
                success: true,
                event_id: Some(event_id.to_string()),
                calendar_id: Some(calendar_id.to_string()),
                message: "Event deleted successfully".to_string(),
                ..Default::default()
            }
        }
        Err(e) => {
            error!("Failed to delete event {}: {}", event_id, e);
            DeleteEventResponse {
                success: false,
                message: "Failed to delete event".to_string(),
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    }
}

pub async fn delete_event_by_title(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    request: &DeleteEventRequest,
) -> DeleteEventResponse {
    let calendar_id = calendar_or_default(request.calendar_id.as_deref(), settings);
    let located = match locate_event(
        provider,
        settings,
        calendar_id,
        &request.title,
        &request.start_datetime,
    )
    .await
    {
        Ok(Some(found)) => found,
        outcome => {
            return locate_response(outcome, &request.title, &request.start_datetime, settings)
                .into()
        }
    };

    let mut deleted = delete_event(provider, calendar_id, &located.event_id).await;
    if deleted.success {
        deleted.message = format!("Successfully deleted event \"{}\"", located.title);
        deleted.deleted_event_title = Some(located.title);
        deleted.deleted_event_id = Some(located.event_id);
    }
    deleted
}

// --- Day listing across calendars ---

/// Lists every event on `date` across all calendars visible to the caller.
///
/// Fails only for a malformed date or when the calendar list cannot be
/// fetched; a failing calendar is skipped and reported in `calendars`.
pub async fn find_events_by_date(
    provider: &dyn CalendarProvider,
    settings: &CalendarSettings,
    date: &str,
) -> Result<FindEventsResponse, GcalError> {
    let day = parse_date(date).ok_or_else(|| GcalError::InvalidDate(date.to_string()))?;
    let (window_start, window_end) = day_window(day, settings.day_window_zone)
        .ok_or_else(|| GcalError::InvalidDate(date.to_string()))?;
    let time_min = window_start.with_timezone(&Utc);
    let time_max = window_end.with_timezone(&Utc);

    let calendars: Vec<(String, String)> = provider
        .list_calendars()
        .await?
        .into_iter()
        .filter_map(|entry| {
            let name = entry
                .summary
                .unwrap_or_else(|| UNKNOWN_CALENDAR.to_string());
            Some((entry.id?, name))
        })
        .collect();
    debug!("Searching {} calendars for events on {}", calendars.len(), date);

    let outcomes: Vec<(String, String, Result<Vec<Event>, GcalServiceError>)> =
        stream::iter(calendars)
            .map(move |(calendar_id, calendar_name)| async move {
                let result = provider.list_events(&calendar_id, time_min, time_max).await;
                (calendar_id, calendar_name, result)
            })
            .buffered(settings.max_concurrent_calendar_queries.max(1))
            .collect()
            .await;

    let mut listed: Vec<(StartKey, DayEvent)> = Vec::new();
    let mut statuses = Vec::with_capacity(outcomes.len());
    for (calendar_id, calendar_name, result) in outcomes {
        match result {
            Ok(events) => {
                statuses.push(CalendarQueryStatus {
                    calendar_id: calendar_id.clone(),
                    calendar_name: calendar_name.clone(),
                    success: true,
                    event_count: events.len(),
                    error: None,
                });
                listed.extend(events.into_iter().map(|event| {
                    day_event(event, &calendar_id, &calendar_name, settings.display_zone)
                }));
            }
            Err(e) => {
                warn!("Error getting events from calendar {}: {}", calendar_name, e);
                statuses.push(CalendarQueryStatus {
                    calendar_id,
                    calendar_name,
                    success: false,
                    event_count: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    sort_day_events(&mut listed, settings.event_order);
    let events: Vec<DayEvent> = listed.into_iter().map(|(_, event)| event).collect();
    info!("Found {} events on {}", events.len(), date);

    Ok(FindEventsResponse {
        message: format!("Found {} events on {}", events.len(), date),
        date: date.to_string(),
        total_events: events.len(),
        events,
        search_params: SearchParams {
            time_min: window_start.to_rfc3339(),
            time_max: window_end.to_rfc3339(),
            window_zone: settings.day_window_zone.name().to_string(),
            display_zone: settings.display_zone.name().to_string(),
        },
        calendars: statuses,
    })
}

fn day_event(event: Event, calendar_id: &str, calendar_name: &str, zone: Tz) -> (StartKey, DayEvent) {
    let shown = display_times(event.start.as_ref(), event.end.as_ref(), zone);
    (
        shown.key,
        DayEvent {
            title: event.summary.unwrap_or_else(|| NO_TITLE.to_string()),
            start_time: shown.start,
            end_time: shown.end,
            calendar: calendar_name.to_string(),
            calendar_id: calendar_id.to_string(),
            event_id: event.id,
            description: event.description.unwrap_or_default(),
            location: event.location.unwrap_or_default(),
        },
    )
}

/// Stable sort of the day listing.
///
/// `Display` compares the rendered start text, so "10:00 AM" sorts before
/// "9:00 AM"; `Start` is chronological with all-day events first.
pub fn sort_day_events(events: &mut [(StartKey, DayEvent)], order: EventOrder) {
    match order {
        EventOrder::Display => events.sort_by(|a, b| a.1.start_time.cmp(&b.1.start_time)),
        EventOrder::Start => events.sort_by(|a, b| a.0.cmp(&b.0)),
    }
}
