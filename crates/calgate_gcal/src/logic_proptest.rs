#[cfg(test)]
mod tests {
    use crate::logic::{sort_day_events, DayEvent};
    use crate::time::{
        day_window, display_times, start_matches, title_matches, title_search_window,
        LOCAL_DATETIME_FORMAT,
    };
    use calgate_config::{EventOrder, StartMatch};
    use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
    use chrono_tz::America::New_York;
    use google_calendar3::api::EventDateTime;
    use proptest::prelude::*;

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (2000i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn zone_strategy() -> impl Strategy<Value = chrono_tz::Tz> {
        prop_oneof![
            Just(New_York),
            Just(chrono_tz::Europe::London),
            Just(chrono_tz::Australia::Sydney),
            Just(chrono_tz::UTC),
        ]
    }

    fn offset_strategy() -> impl Strategy<Value = FixedOffset> {
        (-12i32..=14, prop_oneof![Just(0i32), Just(30)]).prop_map(|(hours, minutes)| {
            let seconds = hours * 3600 + hours.signum() * minutes * 60;
            FixedOffset::east_opt(seconds).unwrap()
        })
    }

    fn timed(instant: DateTime<Utc>) -> EventDateTime {
        EventDateTime {
            date_time: Some(instant),
            ..Default::default()
        }
    }

    fn listed(instant: Option<DateTime<Utc>>, all_day: bool) -> (crate::time::StartKey, DayEvent) {
        let start = match (instant, all_day) {
            (Some(at), _) => Some(timed(at)),
            (None, true) => Some(EventDateTime {
                date: NaiveDate::from_ymd_opt(2024, 1, 15),
                ..Default::default()
            }),
            (None, false) => None,
        };
        let shown = display_times(start.as_ref(), None, chrono_tz::America::New_York);
        (
            shown.key,
            DayEvent {
                title: String::new(),
                start_time: shown.start,
                end_time: shown.end,
                calendar: String::new(),
                calendar_id: String::new(),
                event_id: None,
                description: String::new(),
                location: String::new(),
            },
        )
    }

    proptest! {
        // The title search window covers the local day both at the offset and in the zone
        #[test]
        fn test_title_window_covers_the_day(
            date in date_strategy(),
            offset in offset_strategy(),
            zone in zone_strategy(),
            hour in 0u32..24,
        ) {
            let input = format!("{}T{:02}:00:00", date.format("%Y-%m-%d"), hour);
            let (start, end) = title_search_window(&input, offset, zone).unwrap();

            let first = date.and_hms_opt(0, 0, 0).unwrap();
            let last = date.and_hms_opt(23, 59, 59).unwrap();
            let at_offset = offset.from_local_datetime(&first).single().unwrap();
            prop_assert!(start <= at_offset.with_timezone(&Utc));
            prop_assert!(end >= offset.from_local_datetime(&last).single().unwrap().with_timezone(&Utc));
            if let Some(local) = zone.from_local_datetime(&first).earliest() {
                prop_assert!(start <= local.with_timezone(&Utc));
            }
            if let Some(local) = zone.from_local_datetime(&last).latest() {
                prop_assert!(end >= local.with_timezone(&Utc));
            }
        }

        // Any start created in New York, in any season, is found again by its local string
        #[test]
        fn test_created_start_matches_its_input(
            year in 2000i32..2100,
            day_of_year in 0i64..365,
            minute_of_day in 0i64..1440,
        ) {
            let naive = NaiveDate::from_ymd_opt(year, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
                + Duration::days(day_of_year)
                + Duration::minutes(minute_of_day);
            // skipped by a DST gap, so it cannot be created
            prop_assume!(New_York.from_local_datetime(&naive).earliest().is_some());
            let input = naive.format(LOCAL_DATETIME_FORMAT).to_string();
            let created = New_York
                .from_local_datetime(&naive)
                .earliest()
                .unwrap()
                .with_timezone(&Utc);
            let start = EventDateTime {
                date_time: Some(created),
                time_zone: Some("America/New_York".to_string()),
                ..Default::default()
            };

            let (window_start, window_end) =
                title_search_window(&input, FixedOffset::west_opt(5 * 3600).unwrap(), New_York).unwrap();
            prop_assert!(window_start <= created && created <= window_end);
            prop_assert!(start_matches(StartMatch::Instant, &input, &start, New_York));
            prop_assert!(start_matches(StartMatch::WallClock, &input, &start, New_York));
        }

        // The UTC day window starts at midnight and ends a microsecond before the next
        #[test]
        fn test_utc_day_window(date in date_strategy()) {
            let (start, end) = day_window(date, chrono_tz::UTC).unwrap();
            prop_assert_eq!(start.date_naive(), date);
            prop_assert_eq!(end - start, Duration::days(1) - Duration::microseconds(1));
        }

        // Title comparison ignores case
        #[test]
        fn test_title_match_ignores_case(title in "[a-zA-Z ]{1,20}") {
            prop_assert!(title_matches(Some(&title.to_uppercase()), &title.to_lowercase()));
            prop_assert!(!title_matches(None, &title));
        }

        // The input read in the zone matches exactly that instant and nothing else
        #[test]
        fn test_instant_match_is_exact(
            date in date_strategy(),
            zone in zone_strategy(),
            minute_of_day in 0i64..1440,
            shift in prop_oneof![-120i64..0, 1i64..120],
        ) {
            let naive = date.and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(minute_of_day);
            prop_assume!(zone.from_local_datetime(&naive).single().is_some());
            let input = naive.format(LOCAL_DATETIME_FORMAT).to_string();
            let instant = zone
                .from_local_datetime(&naive)
                .single()
                .unwrap()
                .with_timezone(&Utc);

            prop_assert!(start_matches(StartMatch::Instant, &input, &timed(instant), zone));
            prop_assert!(!start_matches(
                StartMatch::Instant,
                &input,
                &timed(instant + Duration::minutes(shift)),
                zone
            ));
            // Without a zone label the wall clock is rendered in the zone too
            prop_assert!(start_matches(StartMatch::WallClock, &input, &timed(instant), zone));
        }

        // Both orderings are sorted by their own key
        #[test]
        fn test_day_listing_orderings(
            minutes in prop::collection::vec(prop::option::of(0i64..1440), 0..12),
            all_day_flags in prop::collection::vec(any::<bool>(), 12),
        ) {
            let base = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
            let events: Vec<_> = minutes
                .iter()
                .zip(all_day_flags.iter())
                .map(|(minute, all_day)| listed(minute.map(|m| base + Duration::minutes(m)), *all_day))
                .collect();

            let mut by_display = events.clone();
            sort_day_events(&mut by_display, EventOrder::Display);
            prop_assert_eq!(by_display.len(), events.len());
            for pair in by_display.windows(2) {
                prop_assert!(pair[0].1.start_time <= pair[1].1.start_time);
            }

            let mut by_start = events.clone();
            sort_day_events(&mut by_start, EventOrder::Start);
            for pair in by_start.windows(2) {
                prop_assert!(pair[0].0 <= pair[1].0);
            }
        }
    }
}
