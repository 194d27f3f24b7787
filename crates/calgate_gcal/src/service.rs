// --- File: crates/calgate_gcal/src/service.rs ---
//! Google Calendar provider seam.
//!
//! [`CalendarProvider`] is the narrow set of Calendar v3 calls the gateway
//! needs; [`GoogleCalendarService`] issues them through a [`HubType`] bound
//! to one caller's access token, and [`mock::InMemoryCalendar`] stands in for
//! Google in tests.

use std::sync::Arc;

use calgate_common::BoxFuture;
use chrono::{DateTime, Utc};
use google_calendar3::api::{Calendar, CalendarListEntry, Event};
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::{create_calendar_hub, Connector, HubType};

/// Errors reported by a calendar provider.
///
/// The display text is the provider's own error text, which ends up verbatim
/// in the `error` field of response envelopes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GcalServiceError {
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },
    /// The access token was rejected (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),
    /// Calendar or event does not exist (HTTP 404 / 410).
    #[error("{0}")]
    NotFound(String),
}

impl GcalServiceError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GcalServiceError::Unauthorized(_))
    }
}

impl From<google_calendar3::Error> for GcalServiceError {
    fn from(err: google_calendar3::Error) -> Self {
        let status = match &err {
            google_calendar3::Error::BadRequest(body) => body
                .get("error")
                .and_then(|error| error.get("code"))
                .and_then(|code| code.as_u64())
                .and_then(|code| u16::try_from(code).ok()),
            google_calendar3::Error::Failure(response) => Some(response.status().as_u16()),
            google_calendar3::Error::MissingToken(_) => Some(401),
            _ => None,
        };
        let message = err.to_string();

        match status {
            Some(401) => GcalServiceError::Unauthorized(message),
            Some(404) | Some(410) => GcalServiceError::NotFound(message),
            _ => GcalServiceError::Api { status, message },
        }
    }
}

/// The Calendar v3 calls used by the gateway operations.
pub trait CalendarProvider: Send + Sync {
    /// Cheapest authenticated call: lists at most one calendar.
    fn verify_access(&self) -> BoxFuture<'_, (), GcalServiceError>;

    /// Every calendar on the caller's calendar list, all pages.
    fn list_calendars(&self) -> BoxFuture<'_, Vec<CalendarListEntry>, GcalServiceError>;

    fn insert_calendar(&self, calendar: Calendar) -> BoxFuture<'_, Calendar, GcalServiceError>;

    fn insert_event(
        &self,
        calendar_id: &str,
        event: Event,
    ) -> BoxFuture<'_, Event, GcalServiceError>;

    /// Single-instance events overlapping `[time_min, time_max]`, ordered by start.
    fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<Event>, GcalServiceError>;

    fn get_event(&self, calendar_id: &str, event_id: &str)
        -> BoxFuture<'_, Event, GcalServiceError>;

    /// Full replacement of an existing event.
    fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: Event,
    ) -> BoxFuture<'_, Event, GcalServiceError>;

    fn delete_event(&self, calendar_id: &str, event_id: &str) -> BoxFuture<'_, (), GcalServiceError>;
}

/// Produces a provider bound to one caller's access token.
pub trait ProviderFactory: Send + Sync {
    fn provider_for_token(&self, access_token: &str) -> Arc<dyn CalendarProvider>;
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

impl CalendarProvider for GoogleCalendarService {
    fn verify_access(&self) -> BoxFuture<'_, (), GcalServiceError> {
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            calendar_hub.calendar_list().list().max_results(1).doit().await?;
            Ok(())
        })
    }

    fn list_calendars(&self) -> BoxFuture<'_, Vec<CalendarListEntry>, GcalServiceError> {
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let mut calendars = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut request = calendar_hub.calendar_list().list();
                if let Some(token) = page_token.as_deref() {
                    request = request.page_token(token);
                }
                let (_response, page) = request.doit().await?;
                calendars.extend(page.items.unwrap_or_default());

                match page.next_page_token {
                    Some(next) => page_token = Some(next),
                    None => break,
                }
            }

            debug!("Calendar list returned {} calendars", calendars.len());
            Ok(calendars)
        })
    }

    fn insert_calendar(&self, calendar: Calendar) -> BoxFuture<'_, Calendar, GcalServiceError> {
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let (_response, created) = calendar_hub.calendars().insert(calendar).doit().await?;
            info!("Calendar created with ID: {:?}", created.id);
            Ok(created)
        })
    }

    fn insert_event(
        &self,
        calendar_id: &str,
        event: Event,
    ) -> BoxFuture<'_, Event, GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let (_response, created) = calendar_hub
                .events()
                .insert(event, &calendar_id)
                .doit()
                .await?;
            info!("Event created with ID: {:?}", created.id);
            Ok(created)
        })
    }

    fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<Event>, GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let mut events = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut request = calendar_hub
                    .events()
                    .list(&calendar_id)
                    .time_min(time_min)
                    .time_max(time_max)
                    .single_events(true)
                    .order_by("startTime");
                if let Some(token) = page_token.as_deref() {
                    request = request.page_token(token);
                }
                let (_response, page) = request.doit().await?;
                events.extend(page.items.unwrap_or_default());

                match page.next_page_token {
                    Some(next) => page_token = Some(next),
                    None => break,
                }
            }

            debug!(
                "Calendar {} has {} events between {} and {}",
                calendar_id,
                events.len(),
                time_min,
                time_max
            );
            Ok(events)
        })
    }

    fn get_event(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, Event, GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let (_response, event) = calendar_hub
                .events()
                .get(&calendar_id, &event_id)
                .doit()
                .await?;
            Ok(event)
        })
    }

    fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: Event,
    ) -> BoxFuture<'_, Event, GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let (_response, updated) = calendar_hub
                .events()
                .update(event, &calendar_id, &event_id)
                .doit()
                .await?;
            info!("Event {} updated", event_id);
            Ok(updated)
        })
    }

    fn delete_event(&self, calendar_id: &str, event_id: &str) -> BoxFuture<'_, (), GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            calendar_hub
                .events()
                .delete(&calendar_id, &event_id)
                .doit()
                .await?;
            info!("Event {} deleted from calendar {}", event_id, calendar_id);
            Ok(())
        })
    }
}

/// Builds a Google-backed provider per access token over one shared connector.
pub struct GoogleProviderFactory {
    connector: Connector,
}

impl GoogleProviderFactory {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }
}

impl ProviderFactory for GoogleProviderFactory {
    fn provider_for_token(&self, access_token: &str) -> Arc<dyn CalendarProvider> {
        let hub = create_calendar_hub(&self.connector, access_token);
        Arc::new(GoogleCalendarService::new(Arc::new(hub)))
    }
}
