//! Session-related types.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodexpress_core::AdminUserId;

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Stable id of the back office account.
    pub user_id: AdminUserId,
    /// Login name.
    pub username: String,
    /// When the login stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl CurrentAdmin {
    /// Whether the login is still valid at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
