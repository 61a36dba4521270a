//! Authentication service.
//!
//! The back office has a single account whose username and password come
//! from configuration. A successful login yields a [`CurrentAdmin`] valid for
//! one day; a failed one yields nothing, with no reason given and no lockout.

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::ExposeSecret;

use foodexpress_core::AdminUserId;

use crate::config::AdminCredentials;
use crate::models::CurrentAdmin;

/// How long an admin login stays valid (1 day).
pub const ADMIN_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Authentication service.
pub struct AuthService<'a> {
    credentials: &'a AdminCredentials,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(credentials: &'a AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Check a username/password pair against the configured account.
    ///
    /// Both must match exactly. Returns the identity to store in the
    /// session, expiring one day after `now`.
    #[must_use]
    pub fn login(&self, username: &str, password: &str, now: DateTime<Utc>) -> Option<CurrentAdmin> {
        let username_ok = username == self.credentials.username;
        let password_ok = password == self.credentials.password.expose_secret();
        if !(username_ok && password_ok) {
            tracing::info!("Admin login rejected");
            return None;
        }

        tracing::info!(username = %username, "Admin logged in");
        Some(CurrentAdmin {
            user_id: AdminUserId::new(format!("admin:{username}")),
            username: username.to_string(),
            expires_at: now + TimeDelta::seconds(ADMIN_SESSION_TTL_SECONDS),
        })
    }
}
