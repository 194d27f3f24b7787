// --- File: crates/calgate_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{GatewayError, HttpStatusCode};

/// Extension trait for GatewayError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for GatewayError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({ "detail": self.detail() }));

        let mut response = (status_code, body).into_response();
        if status_code == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Maps a domain result into a JSON response, converting the error with `f`.
pub fn map_json_error<T, E, F>(result: Result<T, E>, f: F) -> Result<Json<T>, GatewayError>
where
    T: serde::Serialize,
    F: FnOnce(E) -> GatewayError,
{
    result.map(Json).map_err(f)
}
