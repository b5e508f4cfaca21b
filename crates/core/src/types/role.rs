//! Access roles and UI preferences.

use serde::{Deserialize, Serialize};

use super::status::ParseEnumError;

/// Dashboard role with different access levels.
///
/// Serialized in lowercase (`"superadmin"`, `"support"`), which is also the
/// format persisted alongside the signed-in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to every view.
    #[default]
    SuperAdmin,
    /// Access to the support desk only.
    Support,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Self; 2] = [Self::SuperAdmin, Self::Support];

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "superadmin",
            Self::Support => "support",
        }
    }

    /// Human-readable label (as shown in the login role picker).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Support => "Support Team",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Self::SuperAdmin),
            "support" => Ok(Self::Support),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Wire name of the theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The opposite theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseEnumError::new("theme", s)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_superadmin() {
        assert_eq!(Role::default(), Role::SuperAdmin);
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("super_admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"superadmin\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"support\"").unwrap(),
            Role::Support
        );
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_theme_parse_is_strict() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("Dark".parse::<Theme>().is_err());
    }
}
