//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions); added in `main`
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID
//! 4. Session layer (tower-sessions, in-memory store)
//! 5. Admin guard (`/admin/*` except the login page)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    RequireAdminAuth, clear_current_admin, login_url, require_admin, safe_redirect_target,
    set_current_admin,
};
pub use request_id::request_id_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
