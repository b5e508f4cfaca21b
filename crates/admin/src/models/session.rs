//! Signed-in identity.

use serde::{Deserialize, Serialize};

use pathway_core::{Email, Role};

/// The operator currently signed in to the dashboard.
///
/// Persisted as `{"email": ..., "role": ...}`. A missing `role` reads as
/// `superadmin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: Email,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub const fn new(email: Email, role: Role) -> Self {
        Self { email, role }
    }
}

/// Fields a profile update may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfilePatch {
    pub email: Option<Email>,
}

impl ProfilePatch {
    /// Merge the patch into `identity`.
    pub fn apply(self, identity: &mut Identity) {
        if let Some(email) = self.email {
            identity.email = email;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_when_missing() {
        let identity: Identity = serde_json::from_str(r#"{"email":"ops@pathway.test"}"#).unwrap();
        assert_eq!(identity.role, Role::SuperAdmin);
    }

    #[test]
    fn test_blank_email_is_rejected() {
        assert!(serde_json::from_str::<Identity>(r#"{"email":"  "}"#).is_err());
    }

    #[test]
    fn test_persisted_shape() {
        let identity = Identity::new(Email::parse("ops@pathway.test").unwrap(), Role::Support);
        assert_eq!(
            serde_json::to_string(&identity).unwrap(),
            r#"{"email":"ops@pathway.test","role":"support"}"#
        );
    }

    #[test]
    fn test_empty_patch_keeps_email() {
        let mut identity = Identity::new(Email::parse("a@pathway.test").unwrap(), Role::SuperAdmin);
        ProfilePatch::default().apply(&mut identity);
        assert_eq!(identity.email.as_str(), "a@pathway.test");
    }
}
