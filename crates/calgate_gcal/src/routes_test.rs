#[cfg(test)]
mod tests {
    use crate::handlers::GcalState;
    use crate::routes::router;
    use crate::service::mock::{timed_event, utc, InMemoryCalendar, InMemoryProviderFactory};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use calgate_config::AppConfig;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(calendar: &Arc<InMemoryCalendar>) -> Router {
        let providers = Arc::new(InMemoryProviderFactory {
            calendar: calendar.clone(),
        });
        let state = GcalState::new(&AppConfig::default(), providers).unwrap();
        router(Arc::new(state))
    }

    fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn dentist(calendar: &InMemoryCalendar) -> String {
        calendar.add_event(
            "primary",
            timed_event(
                "Dentist",
                utc("2024-01-15T14:00:00Z"),
                utc("2024-01-15T15:00:00Z"),
                Some("America/New_York"),
            ),
        )
    }

    #[tokio::test]
    async fn test_root_needs_no_token() {
        let calendar = Arc::new(InMemoryCalendar::new());
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let (status, body) = send(app(&calendar), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Google Calendar API Server is running"}));
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected_without_provider_call() {
        let calendar = Arc::new(InMemoryCalendar::new());
        let request = post(
            "/event/create",
            None,
            json!({
                "title": "Dentist",
                "start_datetime": "2024-01-15T09:00:00",
                "end_datetime": "2024-01-15T10:00:00"
            }),
        );

        let (status, body) = send(app(&calendar), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"detail": "Not authenticated"}));
        assert_eq!(calendar.verify_calls(), 0);
        assert!(calendar.events("primary").is_empty());
    }

    #[tokio::test]
    async fn test_rejected_token_is_401() {
        let calendar = Arc::new(InMemoryCalendar::new());
        calendar.accept_only(&["good-token"]);
        let request = post("/events/find", Some("expired"), json!({"date": "2024-01-15"}));

        let (status, body) = send(app(&calendar), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Invalid or expired token: "), "{}", detail);
    }

    #[tokio::test]
    async fn test_create_calendar_route() {
        let calendar = Arc::new(InMemoryCalendar::new());
        let request = post(
            "/calendar/create",
            Some("good-token"),
            json!({"calendar_name": "Team Offsite"}),
        );

        let (status, body) = send(app(&calendar), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["calendar_name"], json!("Team Offsite"));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_structured_failure_is_200() {
        let calendar = Arc::new(InMemoryCalendar::new());
        calendar.fail_writes("Forbidden");
        let request = post(
            "/event/create",
            Some("good-token"),
            json!({
                "title": "Dentist",
                "start_datetime": "2024-01-15T09:00:00",
                "end_datetime": "2024-01-15T10:00:00"
            }),
        );

        let (status, body) = send(app(&calendar), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Failed to create event",
                "error": "Forbidden"
            })
        );
    }

    #[tokio::test]
    async fn test_find_move_delete_flow() {
        let calendar = Arc::new(InMemoryCalendar::new());
        let id = dentist(&calendar);
        let app = app(&calendar);

        let (status, found) = send(
            app.clone(),
            post(
                "/event/find",
                Some("good-token"),
                json!({"title": "dentist", "start_datetime": "2024-01-15T09:00:00"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["event_id"], json!(id));
        assert_eq!(found["current_start"], json!("2024-01-15T09:00:00-05:00"));

        let (_, moved) = send(
            app.clone(),
            post(
                "/event/move",
                Some("good-token"),
                json!({
                    "title": "Dentist",
                    "current_start_datetime": "2024-01-15T09:00:00",
                    "new_start_datetime": "2024-01-16T14:00:00",
                    "new_end_datetime": "2024-01-16T15:00:00"
                }),
            ),
        )
        .await;
        assert_eq!(moved["success"], json!(true));
        assert_eq!(moved["new_start"], json!("2024-01-16T14:00:00"));
        assert_eq!(
            moved["message"],
            json!("Found and moved event \"Dentist\" successfully")
        );

        let (_, deleted) = send(
            app.clone(),
            post(
                "/event/delete",
                Some("good-token"),
                json!({"title": "Dentist", "start_datetime": "2024-01-16T14:00:00"}),
            ),
        )
        .await;
        assert_eq!(deleted["success"], json!(true));
        assert_eq!(deleted["deleted_event_id"], json!(id));

        let (status, gone) = send(
            app,
            post(
                "/event/delete",
                Some("good-token"),
                json!({"title": "Dentist", "start_datetime": "2024-01-16T14:00:00"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(gone["success"], json!(false));
        assert!(gone.get("error").is_none());
        // one validation for the whole flow
        assert_eq!(calendar.verify_calls(), 1);
    }

    #[tokio::test]
    async fn test_created_summer_event_is_found_and_deleted() {
        let calendar = Arc::new(InMemoryCalendar::new());
        let app = app(&calendar);

        let (_, created) = send(
            app.clone(),
            post(
                "/event/create",
                Some("good-token"),
                json!({
                    "title": "Dentist",
                    "start_datetime": "2024-07-01T09:00:00",
                    "end_datetime": "2024-07-01T10:00:00"
                }),
            ),
        )
        .await;
        assert_eq!(created["success"], json!(true));

        let (_, found) = send(
            app.clone(),
            post(
                "/event/find",
                Some("good-token"),
                json!({"title": "Dentist", "start_datetime": "2024-07-01T09:00:00"}),
            ),
        )
        .await;
        assert_eq!(found["success"], json!(true));
        assert_eq!(found["event_id"], created["event_id"]);
        assert_eq!(found["current_start"], json!("2024-07-01T08:00:00-05:00"));

        let (_, deleted) = send(
            app,
            post(
                "/event/delete",
                Some("good-token"),
                json!({"title": "Dentist", "start_datetime": "2024-07-01T09:00:00"}),
            ),
        )
        .await;
        assert_eq!(deleted["success"], json!(true));
        assert!(calendar.events("primary").is_empty());
    }

    #[tokio::test]
    async fn test_find_events_by_date_route() {
        let calendar = Arc::new(InMemoryCalendar::new());
        dentist(&calendar);
        let app = app(&calendar);

        let (status, body) = send(
            app.clone(),
            post("/events/find", Some("good-token"), json!({"date": "2024-01-15"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_events"], json!(1));
        assert_eq!(body["events"][0]["start_time"], json!("9:00 AM"));
        assert_eq!(body["message"], json!("Found 1 events on 2024-01-15"));

        let (status, body) = send(
            app,
            post("/events/find", Some("good-token"), json!({"date": "01/15/2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"detail": "Invalid date format: 01/15/2024. Use YYYY-MM-DD format."})
        );
    }

    #[tokio::test]
    async fn test_find_events_listing_failure_is_500() {
        let calendar = Arc::new(InMemoryCalendar::new());
        calendar.fail_calendar_list("Backend Error");

        let (status, body) = send(
            app(&calendar),
            post("/events/find", Some("good-token"), json!({"date": "2024-01-15"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Error finding events: Backend Error"}));
    }
}
