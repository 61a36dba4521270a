//! Admin authentication middleware and extractors.
//!
//! Everything under `/admin` except the login page requires a valid
//! [`CurrentAdmin`] in the session. Anonymous or expired sessions are
//! redirected to `/admin/login?redirect=<original path>`.

use axum::{
    extract::{FromRequestParts, OriginalUri, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Path of the back office login page.
pub const LOGIN_PATH: &str = "/admin/login";

/// Where a successful login lands when no usable redirect was given.
pub const DEFAULT_ADMIN_PATH: &str = "/admin/dashboard";

/// Extractor that requires a logged-in admin.
///
/// ```rust,ignore
/// async fn handler(RequireAdminAuth(admin): RequireAdminAuth) -> String {
///     format!("Olá, {}!", admin.username)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Rejection for [`RequireAdminAuth`].
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Send the browser to the login page, remembering where it was going.
    RedirectToLogin { redirect: String },
    /// No session layer is installed.
    MissingSession,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { redirect } => Redirect::to(&login_url(&redirect)).into_response(),
            Self::MissingSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::MissingSession)?;

        // Nested routers see a stripped URI; the original one is what the
        // browser asked for.
        let requested = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(&parts.uri, |original| &original.0)
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);

        let admin: Option<CurrentAdmin> = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten();

        match admin {
            Some(admin) if admin.is_valid_at(Utc::now()) => Ok(Self(admin)),
            Some(admin) => {
                tracing::info!(username = %admin.username, "Admin session expired");
                if let Err(e) = session.flush().await {
                    tracing::warn!(error = %e, "Failed to drop expired admin session");
                }
                Err(AdminAuthRejection::RedirectToLogin { redirect: requested })
            }
            None => Err(AdminAuthRejection::RedirectToLogin { redirect: requested }),
        }
    }
}

/// Layer guarding every admin page behind [`RequireAdminAuth`].
pub async fn require_admin(_admin: RequireAdminAuth, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// Store the logged-in admin in the session.
///
/// The session id is cycled first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.set_expiry(Some(super::session::session_expiry()));
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Drop the session entirely (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

/// Login page URL carrying the page to return to.
#[must_use]
pub fn login_url(redirect: &str) -> String {
    format!("{LOGIN_PATH}?redirect={}", urlencoding::encode(redirect))
}

/// Where to send the admin after logging in.
///
/// Only local back office paths are honoured; anything else (absolute
/// URLs, protocol-relative `//host` paths, the login page itself) falls
/// back to the dashboard.
#[must_use]
pub fn safe_redirect_target(redirect: Option<&str>) -> &str {
    match redirect.map(str::trim) {
        Some(target)
            if target.starts_with("/admin")
                && !target.starts_with("//")
                && !target.contains('\\')
                && target.split('?').next() != Some(LOGIN_PATH) =>
        {
            target
        }
        _ => DEFAULT_ADMIN_PATH,
    }
}
