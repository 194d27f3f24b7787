// --- File: crates/calgate_config/src/models.rs ---

use chrono::{FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// How a located event's start is compared with the caller's start string.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartMatch {
    /// Caller input is read in `time_zone` and compared as an instant.
    #[default]
    Instant,
    /// Provider start is rendered as local wall-clock text and compared byte-for-byte.
    WallClock,
}

/// Ordering of the aggregated day listing.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventOrder {
    /// Lexicographic on the rendered start string ("10:00 AM" < "9:00 AM").
    #[default]
    Display,
    /// Chronological on the start instant.
    Start,
}

// --- Google Calendar Config ---
// The bearer token arrives per request; nothing secret lives here.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GcalConfig {
    /// IANA zone attached to created calendars and events; caller start
    /// strings are read in it when locating events.
    pub time_zone: String,
    pub default_calendar_id: String,
    /// Fixed offset (e.g. "-05:00") bounding the find-by-title day window.
    pub search_utc_offset: String,
    /// Zone whose midnight bounds the find-by-date window.
    pub day_window_zone: String,
    /// Zone used to render human-readable times in the day listing.
    pub display_zone: String,
    pub start_match: StartMatch,
    pub event_order: EventOrder,
    /// Seconds a successful token validation is reused; 0 validates every request.
    pub token_cache_ttl_secs: u64,
    pub max_concurrent_calendar_queries: usize,
}

impl Default for GcalConfig {
    fn default() -> Self {
        Self {
            time_zone: "America/New_York".to_string(),
            default_calendar_id: "primary".to_string(),
            search_utc_offset: "-05:00".to_string(),
            day_window_zone: "UTC".to_string(),
            display_zone: "America/New_York".to_string(),
            start_match: StartMatch::default(),
            event_order: EventOrder::default(),
            token_cache_ttl_secs: 60,
            max_concurrent_calendar_queries: 4,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown time zone for {field}: {value}")]
    UnknownTimeZone { field: &'static str, value: String },
    #[error("Invalid UTC offset (expected +HH:MM or -HH:MM): {0}")]
    InvalidOffset(String),
}

/// Parsed form of [`GcalConfig`], ready for date arithmetic.
#[derive(Debug, Clone)]
pub struct CalendarSettings {
    pub time_zone: Tz,
    pub default_calendar_id: String,
    pub search_offset: FixedOffset,
    pub day_window_zone: Tz,
    pub display_zone: Tz,
    pub start_match: StartMatch,
    pub event_order: EventOrder,
    pub token_cache_ttl_secs: u64,
    pub max_concurrent_calendar_queries: usize,
}

impl GcalConfig {
    pub fn settings(&self) -> Result<CalendarSettings, SettingsError> {
        Ok(CalendarSettings {
            time_zone: parse_zone("time_zone", &self.time_zone)?,
            default_calendar_id: self.default_calendar_id.clone(),
            search_offset: parse_utc_offset(&self.search_utc_offset)?,
            day_window_zone: parse_zone("day_window_zone", &self.day_window_zone)?,
            display_zone: parse_zone("display_zone", &self.display_zone)?,
            start_match: self.start_match,
            event_order: self.event_order,
            token_cache_ttl_secs: self.token_cache_ttl_secs,
            max_concurrent_calendar_queries: self.max_concurrent_calendar_queries.max(1),
        })
    }
}

fn parse_zone(field: &'static str, value: &str) -> Result<Tz, SettingsError> {
    value
        .parse::<Tz>()
        .map_err(|_| SettingsError::UnknownTimeZone {
            field,
            value: value.to_string(),
        })
}

/// Parses "+HH:MM" / "-HH:MM" (also "Z").
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, SettingsError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("z") {
        return Ok(Utc.fix());
    }
    trimmed
        .parse::<FixedOffset>()
        .map_err(|_| SettingsError::InvalidOffset(value.to_string()))
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gcal: GcalConfig,
}
