// --- File: crates/calgate_gcal/src/time.rs ---
//! Local date-time parsing, search windows and human-readable rendering.

use calgate_config::StartMatch;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use google_calendar3::api::EventDateTime;

/// Naive local date-time accepted from callers, e.g. `2024-01-15T09:00:00`.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// 12-hour clock without zero padding, e.g. `9:05 AM`.
pub const CLOCK_FORMAT: &str = "%-I:%M %p";

pub const ALL_DAY: &str = "All Day";
pub const UNKNOWN_TIME: &str = "Unknown Time";

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parses exactly `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, LOCAL_DATETIME_FORMAT).ok()
}

/// Resolves a wall-clock time in `zone`. Ambiguous times take the earlier
/// instant; times skipped by a DST gap yield `None`.
pub fn localize<Z: TimeZone>(naive: &NaiveDateTime, zone: &Z) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// The text before the first `T`, i.e. the date part of a local date-time.
pub fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

/// Window used to locate an event by title: `00:00:00` to `23:59:59` of the
/// input's date at `offset`, widened to cover the same day in `zone`.
/// `None` when the date part does not parse.
pub fn title_search_window(
    start_datetime: &str,
    offset: FixedOffset,
    zone: Tz,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let date = parse_date(date_part(start_datetime))?;
    let first = date.and_hms_opt(0, 0, 0)?;
    let last = date.and_hms_opt(23, 59, 59)?;

    let mut start = localize(&first, &offset)?;
    let mut end = localize(&last, &offset)?;
    if let Some((zone_start, zone_end)) = day_window(date, zone) {
        start = start.min(zone_start.with_timezone(&Utc));
        end = end.max(zone_end.with_timezone(&Utc));
    }
    Some((start, end))
}

/// Whole-day window in `zone`: midnight to `23:59:59.999999`.
///
/// A midnight skipped by a DST transition starts the window an hour later.
pub fn day_window(date: NaiveDate, zone: Tz) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let last = date.and_hms_micro_opt(23, 59, 59, 999_999)?;

    let start = zone
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| zone.from_local_datetime(&(midnight + Duration::hours(1))).earliest())?;
    let end = zone
        .from_local_datetime(&last)
        .latest()
        .or_else(|| zone.from_local_datetime(&(last - Duration::hours(1))).latest())?;
    Some((start, end))
}

/// Case-insensitive title equality (Unicode lowercase).
pub fn title_matches(candidate: Option<&str>, wanted: &str) -> bool {
    candidate.is_some_and(|title| title.to_lowercase() == wanted.to_lowercase())
}

/// The provider start rendered as local wall-clock text in the event's own
/// zone label, or in `fallback` when the label is missing or unknown.
pub fn wall_clock_text(candidate: &EventDateTime, fallback: Tz) -> Option<String> {
    let instant = candidate.date_time?;
    let zone = candidate
        .time_zone
        .as_deref()
        .and_then(|label| label.parse::<Tz>().ok())
        .unwrap_or(fallback);

    Some(instant.with_timezone(&zone).format(LOCAL_DATETIME_FORMAT).to_string())
}

/// Whether a candidate's start satisfies the caller's start string.
///
/// `zone` is the zone events are created in; in instant mode the input is
/// read there. All-day candidates (no `date_time`) never match.
pub fn start_matches(mode: StartMatch, wanted: &str, candidate: &EventDateTime, zone: Tz) -> bool {
    let Some(actual) = candidate.date_time else {
        return false;
    };

    match mode {
        StartMatch::Instant => parse_local_datetime(wanted)
            .and_then(|naive| localize(&naive, &zone))
            .is_some_and(|expected| expected == actual),
        StartMatch::WallClock => wall_clock_text(candidate, zone).as_deref() == Some(wanted),
    }
}

pub fn rfc3339_at(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).to_rfc3339()
}

pub fn render_clock(instant: DateTime<Utc>, zone: Tz) -> String {
    instant.with_timezone(&zone).format(CLOCK_FORMAT).to_string()
}

/// Chronological sort key for the day listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StartKey {
    AllDay,
    Timed(DateTime<Utc>),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTimes {
    pub start: String,
    pub end: String,
    pub key: StartKey,
}

/// Renders an event's start/end for the day listing.
///
/// Timed events are shown in `zone` (a missing end falls back to the start),
/// date-only events as "All Day", anything else as "Unknown Time".
pub fn display_times(
    start: Option<&EventDateTime>,
    end: Option<&EventDateTime>,
    zone: Tz,
) -> DisplayTimes {
    if let Some(start_instant) = start.and_then(|s| s.date_time) {
        let end_instant = end.and_then(|e| e.date_time).unwrap_or(start_instant);
        return DisplayTimes {
            start: render_clock(start_instant, zone),
            end: render_clock(end_instant, zone),
            key: StartKey::Timed(start_instant),
        };
    }

    if start.and_then(|s| s.date).is_some() {
        DisplayTimes {
            start: ALL_DAY.to_string(),
            end: ALL_DAY.to_string(),
            key: StartKey::AllDay,
        }
    } else {
        DisplayTimes {
            start: UNKNOWN_TIME.to_string(),
            end: UNKNOWN_TIME.to_string(),
            key: StartKey::Unknown,
        }
    }
}
