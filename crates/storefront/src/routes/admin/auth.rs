//! Back office login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    auth::LOGIN_PATH, clear_current_admin, safe_redirect_target, set_current_admin,
};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("redirect", &self.redirect)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub redirect: Option<String>,
}

/// Display the login page.
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        redirect: query.redirect.filter(|r| !r.is_empty()),
    }
}

/// Check the submitted credentials and open a session.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(&state.config().admin);
    let Some(admin) = auth.login(&form.username, &form.password, Utc::now()) else {
        return Ok((StatusCode::UNAUTHORIZED, Json(json!({ "success": false }))).into_response());
    };

    set_current_admin(&session, &admin).await?;
    set_sentry_user(&admin.user_id, &admin.username);

    let target = safe_redirect_target(form.redirect.as_deref());
    Ok(Redirect::to(target).into_response())
}

/// End the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    tracing::info!("Admin logged out");
    Ok(Redirect::to(LOGIN_PATH))
}
