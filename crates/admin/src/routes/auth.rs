//! Sign-in, sign-out and profile handlers.
//!
//! No credential check is performed: any non-blank email signs in with the
//! chosen role.

use axum::{
    Form, Json, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pathway_core::{Email, Role};

use crate::error::{AppError, clear_sentry_user};
use crate::middleware::View;
use crate::models::{Identity, ProfilePatch, ValidationError};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/profile", post(update_profile))
}

/// Role choice offered on the login form.
#[derive(Debug, Clone, Serialize)]
pub struct RoleOption {
    pub value: Role,
    pub label: &'static str,
}

/// Login view-model.
#[derive(Debug, Clone, Serialize)]
pub struct LoginView {
    pub roles: Vec<RoleOption>,
    pub default_role: Role,
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Profile form body.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub email: String,
}

/// Render the login view, or skip it when already signed in.
///
/// GET /login
#[instrument(skip(state))]
async fn login_page(State(state): State<AppState>) -> Response {
    if state.session().read().await.current_user().is_some() {
        return Redirect::to(View::DEFAULT.path()).into_response();
    }
    Json(LoginView {
        roles: Role::ALL
            .into_iter()
            .map(|role| RoleOption {
                value: role,
                label: role.label(),
            })
            .collect(),
        default_role: Role::default(),
    })
    .into_response()
}

/// Where a freshly signed-in role lands.
const fn landing_view(role: Role) -> View {
    match role {
        Role::Support => View::Support,
        Role::SuperAdmin => View::Dashboard,
    }
}

/// Sign in.
///
/// POST /login
#[instrument(skip(state, form), fields(role = %form.role))]
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let email = Email::parse(&form.email).map_err(|e| ValidationError::new(e.to_string()))?;
    let identity = state
        .session()
        .write()
        .await
        .login(email, form.role, form.password.as_deref())
        .await;
    Ok(Redirect::to(landing_view(identity.role).path()))
}

/// Sign out and forget the stored identity.
///
/// POST /logout
#[instrument(skip(state))]
async fn logout(State(state): State<AppState>) -> Redirect {
    state.session().write().await.logout();
    clear_sentry_user();
    Redirect::to(View::LOGIN.path())
}

/// Change the signed-in operator's email.
///
/// POST /profile
#[instrument(skip(state, form))]
async fn update_profile(
    State(state): State<AppState>,
    Form(form): Form<ProfileForm>,
) -> Result<Json<Identity>, AppError> {
    let email = Email::parse(&form.email).map_err(|e| ValidationError::new(e.to_string()))?;
    state
        .session()
        .write()
        .await
        .update_profile(ProfilePatch { email: Some(email) })
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("Not signed in".to_string()))
}
