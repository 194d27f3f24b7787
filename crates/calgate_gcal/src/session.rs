// --- File: crates/calgate_gcal/src/session.rs ---
//! Bearer-token sessions.
//!
//! Every request builds a fresh provider from its own token. Whether the token
//! was recently accepted by Google is remembered in a [`TokenValidationCache`]
//! keyed by a SHA-256 digest of the token.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};
use calgate_common::{unauthorized, BoxFuture, GatewayError};
use chrono::{DateTime, Utc};
use google_calendar3::api::{Calendar, CalendarListEntry, Event};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::handlers::GcalState;
use crate::service::{CalendarProvider, GcalServiceError};

/// Remembers successful token validations for a fixed time.
///
/// A zero TTL disables the cache: nothing is stored and every request
/// validates again.
pub struct TokenValidationCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Instant>>,
}

impl TokenValidationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn digest(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    /// True when `token` was validated less than one TTL ago.
    pub fn is_fresh(&self, token: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let key = Self::digest(token);
        let mut entries = self.entries.lock();
        match entries.get(&key) {
            Some(validated_at) if validated_at.elapsed() < self.ttl => true,
            Some(_) => {
                entries.remove(&key);
                false
            }
            None => false,
        }
    }

    pub fn remember(&self, token: &str) {
        if !self.is_enabled() {
            return;
        }
        let now = Instant::now();
        let ttl = self.ttl;
        let mut entries = self.entries.lock();
        entries.retain(|_, validated_at| now.duration_since(*validated_at) < ttl);
        entries.insert(Self::digest(token), now);
    }

    pub fn invalidate(&self, token: &str) {
        self.entries.lock().remove(&Self::digest(token));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extracts the credential from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn token_preview(token: &str) -> String {
    token.chars().take(6).collect()
}

/// A validated provider for the duration of one request.
pub struct CalendarSession {
    provider: Arc<dyn CalendarProvider>,
}

impl CalendarSession {
    pub fn provider(&self) -> &dyn CalendarProvider {
        self.provider.as_ref()
    }
}

/// Builds the caller's provider and checks the token, unless a recent
/// validation is cached. A rejected token becomes a 401.
pub async fn establish_session(
    state: &GcalState,
    token: &str,
) -> Result<CalendarSession, GatewayError> {
    let provider = state.providers.provider_for_token(token);

    if state.validations.is_fresh(token) {
        debug!("Reusing cached validation for token {}...", token_preview(token));
    } else {
        debug!("Validating token {}...", token_preview(token));
        if let Err(e) = provider.verify_access().await {
            warn!("Token validation failed: {}", e);
            state.validations.invalidate(token);
            return Err(unauthorized(format!("Invalid or expired token: {}", e)));
        }
        state.validations.remember(token);
        info!("Authentication successful");
    }

    Ok(CalendarSession {
        provider: Arc::new(SessionProvider {
            inner: provider,
            token: token.to_string(),
            validations: state.validations.clone(),
        }),
    })
}

impl FromRequestParts<Arc<GcalState>> for CalendarSession {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<GcalState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .map(str::to_string)
            .ok_or_else(|| unauthorized("Not authenticated"))?;

        establish_session(state, &token).await
    }
}

/// Forwards to the caller's provider and drops the cached validation as soon
/// as Google rejects the token mid-operation.
struct SessionProvider {
    inner: Arc<dyn CalendarProvider>,
    token: String,
    validations: Arc<TokenValidationCache>,
}

impl SessionProvider {
    fn observe<T>(&self, result: Result<T, GcalServiceError>) -> Result<T, GcalServiceError> {
        if let Err(e) = &result {
            if e.is_unauthorized() {
                debug!("Dropping cached validation for token {}...", token_preview(&self.token));
                warn!("Provider rejected the session token: {}", e);
                self.validations.invalidate(&self.token);
            }
        }
        result
    }
}

impl CalendarProvider for SessionProvider {
    fn verify_access(&self) -> BoxFuture<'_, (), GcalServiceError> {
        Box::pin(async move { self.observe(self.inner.verify_access().await) })
    }

    fn list_calendars(&self) -> BoxFuture<'_, Vec<CalendarListEntry>, GcalServiceError> {
        Box::pin(async move { self.observe(self.inner.list_calendars().await) })
    }

    fn insert_calendar(&self, calendar: Calendar) -> BoxFuture<'_, Calendar, GcalServiceError> {
        Box::pin(async move { self.observe(self.inner.insert_calendar(calendar).await) })
    }

    fn insert_event(
        &self,
        calendar_id: &str,
        event: Event,
    ) -> BoxFuture<'_, Event, GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        Box::pin(async move { self.observe(self.inner.insert_event(&calendar_id, event).await) })
    }

    fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<Event>, GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        Box::pin(async move {
            self.observe(self.inner.list_events(&calendar_id, time_min, time_max).await)
        })
    }

    fn get_event(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, Event, GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        Box::pin(async move { self.observe(self.inner.get_event(&calendar_id, &event_id).await) })
    }

    fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: Event,
    ) -> BoxFuture<'_, Event, GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        Box::pin(async move {
            self.observe(self.inner.update_event(&calendar_id, &event_id, event).await)
        })
    }

    fn delete_event(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, (), GcalServiceError> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        Box::pin(async move {
            self.observe(self.inner.delete_event(&calendar_id, &event_id).await)
        })
    }
}
