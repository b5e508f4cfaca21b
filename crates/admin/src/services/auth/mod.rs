//! Operator session.
//!
//! Holds at most one signed-in [`Identity`] and mirrors it to the durable
//! store under [`keys::USER`]. Persistence is best-effort: read failures and
//! corrupt stored JSON mean "signed out", and write failures are logged
//! while the in-memory identity stays authoritative.
//!
//! No credential check is performed. The password accepted by
//! [`AuthSession::login`] is ignored.

use std::sync::Arc;

use tracing::{debug, info, warn};

use pathway_core::{Email, Role};

use crate::models::{Identity, ProfilePatch};
use crate::storage::{KeyValueStore, keys};

/// The signed-in operator, if any.
pub struct AuthSession {
    store: Arc<dyn KeyValueStore>,
    current: Option<Identity>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    /// A signed-out session backed by `store`. Nothing is read.
    #[must_use]
    pub fn anonymous(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Restore the last identity from `store`.
    ///
    /// Missing, unreadable or corrupt state yields a signed-out session.
    #[must_use]
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let current = match store.get(keys::USER) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => {
                    debug!(email = %identity.email, role = %identity.role, "Restored session");
                    Some(identity)
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring corrupt stored session");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read stored session");
                None
            }
        };
        Self { store, current }
    }

    /// The signed-in identity.
    #[must_use]
    pub const fn current_user(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Role of the signed-in identity.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|identity| identity.role)
    }

    /// Sign in, replacing any current identity.
    ///
    /// The email is already validated by its type. `password` is accepted
    /// for call-site symmetry with a real backend and ignored. Always
    /// resolves.
    #[allow(clippy::unused_async)]
    pub async fn login(&mut self, email: Email, role: Role, password: Option<&str>) -> Identity {
        let _ = password;
        let identity = Identity::new(email, role);
        info!(email = %identity.email, role = %identity.role, "Operator signed in");
        self.current = Some(identity.clone());
        self.persist();
        identity
    }

    /// Merge `patch` into the current identity.
    ///
    /// Returns `None` without side effects when signed out.
    pub fn update_profile(&mut self, patch: ProfilePatch) -> Option<Identity> {
        let identity = self.current.as_mut()?;
        patch.apply(identity);
        let updated = identity.clone();
        info!(email = %updated.email, "Profile updated");
        self.persist();
        Some(updated)
    }

    /// Sign out and forget the stored identity. Idempotent.
    pub fn logout(&mut self) {
        if let Some(identity) = self.current.take() {
            info!(email = %identity.email, "Operator signed out");
        }
        if let Err(e) = self.store.remove(keys::USER) {
            warn!(error = %e, "Failed to clear stored session");
        }
    }

    fn persist(&self) {
        let Some(identity) = &self.current else {
            return;
        };
        let result = serde_json::to_string(identity)
            .map_err(Into::into)
            .and_then(|raw| self.store.set(keys::USER, &raw));
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist session");
        }
    }
}
