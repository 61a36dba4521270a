//! Session middleware configuration.
//!
//! Admin sessions live server-side in a tower-sessions `MemoryStore`; the
//! browser only holds the opaque session id in the `admin_session` cookie.
//! Sessions do not survive a restart.

use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::services::auth::ADMIN_SESSION_TTL_SECONDS;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "admin_session";

/// Cookie and record expiry for a session created now.
#[must_use]
pub fn session_expiry() -> Expiry {
    Expiry::AtDateTime(OffsetDateTime::now_utc() + Duration::seconds(ADMIN_SESSION_TTL_SECONDS))
}

/// Create the session layer with an in-memory store.
///
/// The cookie is `HttpOnly`, scoped to `/`, and `Secure` only in production.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            ADMIN_SESSION_TTL_SECONDS,
        )))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
