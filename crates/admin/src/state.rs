//! Application state shared across handlers.
//!
//! One instance per process. It owns the operator session, the theme
//! preference, the record collections and the query state of each table.
//! Handlers take short-lived locks and never hold two collection locks at
//! once.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::components::TableQuery;
use crate::config::{AdminConfig, DEFAULT_WIDE_PAGE_SIZE};
use crate::db::{RecordStore, RepositoryError, seed};
use crate::models::{
    ContentItem, ContentSortField, Journey, JourneySortField, Ticket, TicketSortField, User,
    UserSortField,
};
use crate::services::{AuthSession, ThemePreference};
use crate::storage::{FileStore, KeyValueStore};

/// Query state of every table.
#[derive(Debug)]
pub struct TableQueries {
    pub users: RwLock<TableQuery<UserSortField>>,
    pub journeys: RwLock<TableQuery<JourneySortField>>,
    pub tickets: RwLock<TableQuery<TicketSortField>>,
    pub content: RwLock<TableQuery<ContentSortField>>,
}

impl TableQueries {
    fn new(config: &AdminConfig) -> Self {
        let sizes = config.page_sizes;
        Self {
            users: RwLock::new(TableQuery::new(sizes.users)),
            journeys: RwLock::new(TableQuery::new(sizes.journeys)),
            tickets: RwLock::new(TableQuery::new(sizes.tickets)),
            content: RwLock::new(TableQuery::new(DEFAULT_WIDE_PAGE_SIZE)),
        }
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    clock: Arc<dyn Clock>,
    session: RwLock<AuthSession>,
    theme: RwLock<ThemePreference>,
    users: RwLock<RecordStore<User>>,
    journeys: RwLock<RecordStore<Journey>>,
    tickets: RwLock<RecordStore<Ticket>>,
    content: RwLock<RecordStore<ContentItem>>,
    queries: TableQueries,
}

impl AppState {
    /// Build state over `store`, restoring the session and theme from it
    /// and loading the demo collections.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the seed data has duplicate ids.
    pub fn new(
        config: AdminConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RepositoryError> {
        let session = AuthSession::restore(Arc::clone(&store));
        let theme = ThemePreference::load(store, false);
        let queries = TableQueries::new(&config);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                clock,
                session: RwLock::new(session),
                theme: RwLock::new(theme),
                users: RwLock::new(RecordStore::with_records(seed::users())?),
                journeys: RwLock::new(RecordStore::with_records(seed::journeys())?),
                tickets: RwLock::new(RecordStore::with_records(seed::tickets())?),
                content: RwLock::new(RecordStore::with_records(seed::content())?),
                queries,
            }),
        })
    }

    /// State backed by `state.json` in the configured data directory and
    /// the wall clock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the seed data has duplicate ids.
    pub fn from_config(config: AdminConfig) -> Result<Self, RepositoryError> {
        let store = Arc::new(FileStore::in_dir(&config.data_dir));
        Self::new(config, store, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Today's date as record date fields store it.
    #[must_use]
    pub fn today(&self) -> String {
        crate::clock::format_date(self.inner.clock.today())
    }

    #[must_use]
    pub fn session(&self) -> &RwLock<AuthSession> {
        &self.inner.session
    }

    #[must_use]
    pub fn theme(&self) -> &RwLock<ThemePreference> {
        &self.inner.theme
    }

    #[must_use]
    pub fn users(&self) -> &RwLock<RecordStore<User>> {
        &self.inner.users
    }

    #[must_use]
    pub fn journeys(&self) -> &RwLock<RecordStore<Journey>> {
        &self.inner.journeys
    }

    #[must_use]
    pub fn tickets(&self) -> &RwLock<RecordStore<Ticket>> {
        &self.inner.tickets
    }

    #[must_use]
    pub fn content(&self) -> &RwLock<RecordStore<ContentItem>> {
        &self.inner.content
    }

    #[must_use]
    pub fn queries(&self) -> &TableQueries {
        &self.inner.queries
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::{MemoryStore, keys};

    fn state(store: Arc<MemoryStore>) -> AppState {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
        AppState::new(AdminConfig::default(), store, Arc::new(clock)).unwrap()
    }

    #[tokio::test]
    async fn test_new_loads_seed_and_restores_session() {
        let store = Arc::new(MemoryStore::with_entries([
            (keys::USER, r#"{"email":"ops@x.com","role":"support"}"#),
            (keys::THEME, "dark"),
        ]));
        let state = state(store);

        assert_eq!(state.users().read().await.len(), 5);
        assert_eq!(state.tickets().read().await.len(), 3);
        assert_eq!(state.today(), "2024-06-01");
        assert!(state.session().read().await.current_user().is_some());
        assert_eq!(state.theme().read().await.theme(), pathway_core::Theme::Dark);
    }

    #[tokio::test]
    async fn test_page_sizes_follow_config() {
        let state = state(Arc::new(MemoryStore::new()));
        assert_eq!(state.queries().users.read().await.page_size(), 5);
        assert_eq!(state.queries().tickets.read().await.page_size(), 10);
    }
}
