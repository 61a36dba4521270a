//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. Server errors are captured to
//! Sentry before responding; clients get a JSON `{"error": ...}` body that
//! never includes internal details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::{CatalogError, RepositoryError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
                RepositoryError::Catalog(CatalogError::CategoryHasProducts { .. }) => {
                    StatusCode::CONFLICT
                }
                RepositoryError::Catalog(_) | RepositoryError::Validation(_) => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Session(_) => "Internal server error".to_string(),
            Self::Repository(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Associate subsequent Sentry events with the logged-in admin.
pub fn set_sentry_user(user_id: &impl ToString, username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a customer or admin action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", &[("product_id", "1")]);
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };
    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }
    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use foodexpress_core::{CategoryId, ProductId};

    use super::*;

    fn session_error(msg: &str) -> AppError {
        AppError::Session(tower_sessions::session::Error::Store(
            tower_sessions::session_store::Error::Backend(msg.to_string()),
        ))
    }

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::BadRequest("quantity must be at least 1".to_string());
        assert_eq!(err.to_string(), "Bad request: quantity must be at least 1");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(status_of(AppError::NotFound("x".to_string())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::BadRequest("x".to_string())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(session_error("x")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_repository_error_status_codes() {
        assert_eq!(
            status_of(RepositoryError::NotFound("order 9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RepositoryError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RepositoryError::Catalog(CatalogError::ProductNotFound(
                ProductId::new("9")
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RepositoryError::Catalog(CatalogError::CategoryHasProducts {
                id: CategoryId::new("1"),
                count: 2,
            })),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = session_error("disk on fire");
        assert_eq!(err.public_message(), "Internal server error");
    }
}
