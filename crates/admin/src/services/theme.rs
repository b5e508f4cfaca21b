//! Colour theme preference.
//!
//! The stored value wins over the system preference. Every change is
//! written back under [`keys::THEME`]; write failures are logged and the
//! in-memory theme stays authoritative.

use std::sync::Arc;

use tracing::{debug, warn};

use pathway_core::Theme;

use crate::storage::{KeyValueStore, keys};

/// Current theme plus the store it is mirrored to.
pub struct ThemePreference {
    store: Arc<dyn KeyValueStore>,
    theme: Theme,
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemePreference {
    /// Resolve the starting theme and persist it.
    ///
    /// A stored `"light"` or `"dark"` wins. Anything else falls back to
    /// dark when `system_prefers_dark`, light otherwise.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>, system_prefers_dark: bool) -> Self {
        let stored = match store.get(keys::THEME) {
            Ok(value) => value.and_then(|raw| raw.parse::<Theme>().ok()),
            Err(e) => {
                warn!(error = %e, "Failed to read stored theme");
                None
            }
        };
        let theme = stored.unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        debug!(theme = %theme, from_store = stored.is_some(), "Theme resolved");

        let preference = Self { store, theme };
        preference.persist();
        preference
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch to `theme`.
    pub fn set(&mut self, theme: Theme) -> Theme {
        self.theme = theme;
        self.persist();
        theme
    }

    /// Flip between light and dark.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled())
    }

    fn persist(&self) {
        if let Err(e) = self.store.set(keys::THEME, self.theme.as_str()) {
            warn!(error = %e, theme = %self.theme, "Failed to persist theme");
        }
    }
}
