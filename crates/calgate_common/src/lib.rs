// --- File: crates/calgate_common/src/lib.rs ---

pub mod error; // Transport-level errors
pub mod http; // Axum response conversion
pub mod logging; // Tracing subscriber set-up
pub mod services; // Service abstractions

pub use error::{bad_request, internal_error, unauthorized, GatewayError, HttpStatusCode};
pub use http::{map_json_error, IntoHttpResponse};
pub use services::BoxFuture;
