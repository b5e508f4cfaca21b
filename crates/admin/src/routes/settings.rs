//! Settings routes: profile summary, theme and the static preference panels.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use pathway_core::Theme;

use crate::error::AppError;
use crate::middleware::CurrentIdentity;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(index))
        .route("/settings/theme", get(current_theme).post(change_theme))
}

/// Notification toggle.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSetting {
    pub id: &'static str,
    pub label: &'static str,
    pub enabled: bool,
}

const NOTIFICATIONS: &[NotificationSetting] = &[
    NotificationSetting {
        id: "systemFailure",
        label: "System failure alerts",
        enabled: true,
    },
    NotificationSetting {
        id: "newUser",
        label: "New user sign-ups",
        enabled: true,
    },
    NotificationSetting {
        id: "apiError",
        label: "API error reports",
        enabled: false,
    },
];

/// Integration key, shown masked.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ApiKey {
    pub id: &'static str,
    pub label: &'static str,
    pub masked: &'static str,
}

const API_KEYS: &[ApiKey] = &[
    ApiKey {
        id: "credit",
        label: "Credit Bureau API",
        masked: "sk_live_••••••••••••4f2a",
    },
    ApiKey {
        id: "mail",
        label: "Mail Service API",
        masked: "ml_live_••••••••••••9c1d",
    },
    ApiKey {
        id: "analytics",
        label: "Analytics API",
        masked: "an_live_••••••••••••7b3e",
    },
];

/// Settings view-model.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub email: String,
    pub role: &'static str,
    pub theme: Theme,
    pub notifications: &'static [NotificationSetting],
    pub api_keys: &'static [ApiKey],
}

/// Settings view.
///
/// GET /settings
#[instrument(skip(identity, state))]
async fn index(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
) -> Json<SettingsView> {
    let theme = state.theme().read().await.theme();
    Json(SettingsView {
        email: identity.email.to_string(),
        role: identity.role.label(),
        theme,
        notifications: NOTIFICATIONS,
        api_keys: API_KEYS,
    })
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

/// Current theme.
///
/// GET /settings/theme
#[instrument(skip(state))]
async fn current_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        theme: state.theme().read().await.theme(),
    })
}

/// Theme change request: `light`, `dark` or `toggle`.
#[derive(Debug, Default, Deserialize)]
pub struct ThemeChange {
    pub theme: Option<String>,
}

/// Set or toggle the theme.
///
/// POST /settings/theme?theme=light|dark|toggle
#[instrument(skip(state))]
async fn change_theme(
    State(state): State<AppState>,
    Query(change): Query<ThemeChange>,
) -> Result<Json<ThemeResponse>, AppError> {
    let mut preference = state.theme().write().await;
    let theme = match change.theme.as_deref() {
        None | Some("toggle") => preference.toggle(),
        Some(raw) => {
            let theme = raw
                .parse::<Theme>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            preference.set(theme)
        }
    };
    info!(theme = %theme, "Theme changed");
    Ok(Json(ThemeResponse { theme }))
}
