// File: crates/calgate_gcal/src/auth.rs
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    CalendarHub,
};

// Type aliases for clarity
pub type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Builds the TLS connector shared by every per-request hub.
///
/// Loading the native root store touches the filesystem, so this runs once at
/// start-up rather than per request.
pub fn https_connector() -> Result<Connector, std::io::Error> {
    Ok(HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_only()
        .enable_http1()
        .build())
}

/// Creates a hub that authenticates every call with the caller's access token.
///
/// The token is used as-is: no refresh, no scope negotiation. A `String`
/// implements the hub's token source by returning itself for any scope.
pub fn create_calendar_hub(connector: &Connector, access_token: &str) -> HubType {
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector.clone());

    CalendarHub::new(client, access_token.to_string())
}
