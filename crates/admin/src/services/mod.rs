//! Session-level services.
//!
//! # Services
//!
//! - `auth` - signed-in operator identity, persisted best-effort
//! - `theme` - light/dark preference, persisted best-effort

pub mod auth;
pub mod theme;

pub use auth::AuthSession;
pub use theme::ThemePreference;
