//! Sign-in, profile and theme commands.
//!
//! # Usage
//!
//! ```bash
//! pathway-cli login -e ops@pathway.test -r support
//! pathway-cli whoami
//! pathway-cli profile -e new@pathway.test
//! pathway-cli theme toggle
//! pathway-cli logout
//! ```

use std::sync::Arc;

use tracing::info;

use pathway_admin::models::{Identity, ProfilePatch};
use pathway_admin::services::{AuthSession, ThemePreference};
use pathway_admin::storage::KeyValueStore;
use pathway_core::{Email, Role, Theme};

use super::CliError;

/// Sign in as `email` with `role`.
///
/// # Errors
///
/// Returns `CliError::InvalidEmail` for a blank or malformed address.
pub async fn login(store: Arc<dyn KeyValueStore>, email: &str, role: Role) -> Result<Identity, CliError> {
    let email = Email::parse(email)?;
    let mut session = AuthSession::restore(store);
    let identity = session.login(email, role, None).await;
    info!("Signed in as {} ({})", identity.email, identity.role.label());
    Ok(identity)
}

/// Forget the stored identity.
pub fn logout(store: Arc<dyn KeyValueStore>) {
    AuthSession::restore(store).logout();
    info!("Signed out");
}

/// The stored identity, if any.
#[must_use]
pub fn whoami(store: Arc<dyn KeyValueStore>) -> Option<Identity> {
    AuthSession::restore(store).current_user().cloned()
}

/// Change the signed-in email.
///
/// # Errors
///
/// Returns `CliError::InvalidEmail` or `CliError::NotSignedIn`.
pub fn profile(store: Arc<dyn KeyValueStore>, email: &str) -> Result<Identity, CliError> {
    let patch = ProfilePatch {
        email: Some(Email::parse(email)?),
    };
    AuthSession::restore(store)
        .update_profile(patch)
        .ok_or(CliError::NotSignedIn)
}

/// Show, set or toggle the theme.
///
/// `None` leaves the theme unchanged; `"toggle"` flips it.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for anything other than `light`,
/// `dark` or `toggle`.
pub fn theme(store: Arc<dyn KeyValueStore>, change: Option<&str>) -> Result<Theme, CliError> {
    let mut preference = ThemePreference::load(store, false);
    let theme = match change {
        None => preference.theme(),
        Some("toggle") => preference.toggle(),
        Some(raw) => {
            let theme = raw
                .parse::<Theme>()
                .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
            preference.set(theme)
        }
    };
    Ok(theme)
}
