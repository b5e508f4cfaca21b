//! Role-based access control for dashboard views.
//!
//! One policy table ([`View::allowed_roles`]) drives both the route guard
//! and the navigation menu, so a view is listed in the menu exactly when the
//! guard would let the role in.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tracing::debug;

use pathway_core::Role;

use crate::error::set_sentry_user;
use crate::models::Identity;
use crate::state::AppState;

const ANY_ROLE: &[Role] = &[Role::SuperAdmin, Role::Support];
const SUPERADMIN_ONLY: &[Role] = &[Role::SuperAdmin];

/// A navigable dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Login,
    Dashboard,
    Users,
    Analytics,
    Reports,
    ContentControl,
    Settings,
    Help,
    Support,
}

impl View {
    /// Views in navigation-menu order.
    pub const MENU: [Self; 8] = [
        Self::Dashboard,
        Self::Users,
        Self::Analytics,
        Self::Reports,
        Self::ContentControl,
        Self::Support,
        Self::Settings,
        Self::Help,
    ];

    /// View signed-out visitors are sent to.
    pub const LOGIN: Self = Self::Login;

    /// View signed-in visitors land on when denied.
    pub const DEFAULT: Self = Self::Dashboard;

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Users => "/users",
            Self::Analytics => "/analytics",
            Self::Reports => "/reports",
            Self::ContentControl => "/content-control",
            Self::Settings => "/settings",
            Self::Help => "/help",
            Self::Support => "/support",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Analytics => "Analytics",
            Self::Reports => "Reports",
            Self::ContentControl => "Content Control",
            Self::Settings => "Settings",
            Self::Help => "Help",
            Self::Support => "Support",
        }
    }

    /// The view that owns `path`, including nested paths such as
    /// `/users/42/delete`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let first = path.trim_start_matches('/').split('/').next()?;
        let view = match first {
            "login" => Self::Login,
            "dashboard" => Self::Dashboard,
            "users" => Self::Users,
            "analytics" => Self::Analytics,
            "reports" => Self::Reports,
            "content-control" => Self::ContentControl,
            "settings" => Self::Settings,
            "help" => Self::Help,
            "support" => Self::Support,
            _ => return None,
        };
        Some(view)
    }

    /// Whether the view is reachable without signing in.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Login)
    }

    /// Roles allowed to open the view.
    ///
    /// The dashboard accepts every role because it is where denied
    /// visitors are sent.
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Login | Self::Dashboard | Self::Support => ANY_ROLE,
            Self::Users
            | Self::Analytics
            | Self::Reports
            | Self::ContentControl
            | Self::Settings
            | Self::Help => SUPERADMIN_ONLY,
        }
    }

    /// Apply [`authorize`] with this view's policy.
    #[must_use]
    pub fn authorize(self, identity: Option<&Identity>) -> AccessDecision {
        if self.is_public() {
            return AccessDecision::Allow;
        }
        authorize(self.allowed_roles(), identity)
    }
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    RedirectToLogin,
    RedirectToDefault,
}

impl AccessDecision {
    /// Where the visitor is sent, if anywhere.
    #[must_use]
    pub const fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(View::LOGIN.path()),
            Self::RedirectToDefault => Some(View::DEFAULT.path()),
        }
    }
}

/// Decide whether `identity` may enter a view open to `allowed`.
///
/// No identity always means [`AccessDecision::RedirectToLogin`], whatever
/// `allowed` holds.
#[must_use]
pub fn authorize(allowed: &[Role], identity: Option<&Identity>) -> AccessDecision {
    match identity {
        None => AccessDecision::RedirectToLogin,
        Some(identity) if allowed.contains(&identity.role) => AccessDecision::Allow,
        Some(_) => AccessDecision::RedirectToDefault,
    }
}

/// Whether `role` can see and open `view`.
#[must_use]
pub fn visible_for(role: Role, view: View) -> bool {
    view.allowed_roles().contains(&role)
}

/// One navigation-menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub view: View,
    pub label: &'static str,
    pub path: &'static str,
}

impl From<View> for MenuItem {
    fn from(view: View) -> Self {
        Self {
            view,
            label: view.label(),
            path: view.path(),
        }
    }
}

/// The full navigation menu.
#[must_use]
pub fn menu_items() -> Vec<MenuItem> {
    View::MENU.into_iter().map(MenuItem::from).collect()
}

/// Entries of `items` that `role` may see.
#[must_use]
pub fn visible_menu_items(role: Role, items: &[MenuItem]) -> Vec<MenuItem> {
    items
        .iter()
        .filter(|item| visible_for(role, item.view))
        .copied()
        .collect()
}

/// Guard every request against the view policy.
///
/// Page requests are answered with `303 See Other` to `/login` or
/// `/dashboard`. Requests under `/api/` get `401` or `403` instead. Paths
/// that belong to no view (health checks, unknown paths) pass through; the
/// router's fallback sends unknown paths to the dashboard, which is guarded
/// in turn.
///
/// On success the identity is stored in request extensions for
/// [`CurrentIdentity`].
pub async fn require_view_access(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let identity = state.session().read().await.current_user().cloned();

    let decision = if path.starts_with("/api/") {
        authorize(ANY_ROLE, identity.as_ref())
    } else {
        match View::from_path(&path) {
            Some(view) => view.authorize(identity.as_ref()),
            None => AccessDecision::Allow,
        }
    };

    if let Some(identity) = &identity {
        set_sentry_user(identity);
    }

    match decision {
        AccessDecision::Allow => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        denied => {
            debug!(path = %path, decision = ?denied, "Navigation denied");
            AccessRejection::for_path(&path, denied).into_response()
        }
    }
}

/// Response for a denied request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRejection {
    /// Send the browser elsewhere.
    Redirect(&'static str),
    /// API caller is not signed in.
    Unauthorized,
    /// API caller lacks the role.
    Forbidden,
}

impl AccessRejection {
    fn for_path(path: &str, decision: AccessDecision) -> Self {
        let is_api = path.starts_with("/api/");
        match (decision, is_api) {
            (AccessDecision::RedirectToLogin, true) => Self::Unauthorized,
            (AccessDecision::RedirectToDefault, true) => Self::Forbidden,
            (decision, false) => Self::Redirect(
                decision
                    .redirect_path()
                    .unwrap_or_else(|| View::DEFAULT.path()),
            ),
            (AccessDecision::Allow, true) => Self::Forbidden,
        }
    }
}

impl IntoResponse for AccessRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(to) => Redirect::to(to).into_response(),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Not signed in").into_response(),
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, "Your role cannot access this resource").into_response()
            }
        }
    }
}

/// Extractor for the identity admitted by [`require_view_access`].
///
/// Rejects with `401` when the guard stored no identity, which only happens
/// on routes outside the guard's views.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AccessRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Self)
            .ok_or(AccessRejection::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pathway_core::Email;

    use super::*;

    fn identity(role: Role) -> Identity {
        Identity::new(Email::parse("alice@x.com").unwrap(), role)
    }

    #[test]
    fn test_authorize_is_role_membership() {
        let all_sets: [&[Role]; 4] = [&[], SUPERADMIN_ONLY, &[Role::Support], ANY_ROLE];
        for allowed in all_sets {
            assert_eq!(authorize(allowed, None), AccessDecision::RedirectToLogin);
            for role in Role::ALL {
                let expected = if allowed.contains(&role) {
                    AccessDecision::Allow
                } else {
                    AccessDecision::RedirectToDefault
                };
                assert_eq!(authorize(allowed, Some(&identity(role))), expected);
            }
        }
    }

    #[test]
    fn test_support_user_views() {
        let support = identity(Role::Support);
        assert_eq!(View::Users.authorize(Some(&support)), AccessDecision::RedirectToDefault);
        assert_eq!(View::Support.authorize(Some(&support)), AccessDecision::Allow);
        assert_eq!(View::Dashboard.authorize(Some(&support)), AccessDecision::Allow);
        assert_eq!(View::Help.authorize(Some(&support)), AccessDecision::RedirectToDefault);
    }

    #[test]
    fn test_signed_out_redirects_except_login() {
        for view in View::MENU {
            assert_eq!(view.authorize(None), AccessDecision::RedirectToLogin, "{view:?}");
        }
        assert_eq!(View::Login.authorize(None), AccessDecision::Allow);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(View::from_path("/users"), Some(View::Users));
        assert_eq!(View::from_path("/users/42/delete"), Some(View::Users));
        assert_eq!(View::from_path("/content-control"), Some(View::ContentControl));
        assert_eq!(View::from_path("/health"), None);
        assert_eq!(View::from_path("/"), None);
        for view in View::MENU {
            assert_eq!(View::from_path(view.path()), Some(view));
        }
    }

    #[test]
    fn test_menu_matches_guard() {
        let items = menu_items();
        let support: Vec<View> = visible_menu_items(Role::Support, &items)
            .into_iter()
            .map(|item| item.view)
            .collect();
        assert_eq!(support, vec![View::Dashboard, View::Support]);
        assert_eq!(visible_menu_items(Role::SuperAdmin, &items).len(), items.len());

        for role in Role::ALL {
            for item in visible_menu_items(role, &items) {
                assert_eq!(item.view.authorize(Some(&identity(role))), AccessDecision::Allow);
            }
        }
    }

    #[test]
    fn test_rejection_for_api_paths() {
        assert_eq!(
            AccessRejection::for_path("/api/menu", AccessDecision::RedirectToLogin),
            AccessRejection::Unauthorized
        );
        assert_eq!(
            AccessRejection::for_path("/users", AccessDecision::RedirectToDefault),
            AccessRejection::Redirect("/dashboard")
        );
        assert_eq!(
            AccessRejection::for_path("/users", AccessDecision::RedirectToLogin),
            AccessRejection::Redirect("/login")
        );
    }
}
