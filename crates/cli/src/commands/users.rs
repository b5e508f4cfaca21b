//! User table listing.
//!
//! Runs the same search, filter, sort and pagination as `GET /users` over the
//! seeded user records. Query state is not persisted between runs.

use pathway_admin::components::{TablePage, TableQuery};
use pathway_admin::db::{RecordStore, seed};
use pathway_admin::middleware::View;
use pathway_admin::models::{User, UserSortField};
use pathway_admin::routes::QueryUpdate;
use pathway_admin::services::AuthSession;

use super::{CliError, require_view};

/// Table options from the command line.
#[derive(Debug, Default, Clone)]
pub struct UserQuery {
    pub search: Option<String>,
    pub tier: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

/// One page of the user table.
///
/// # Errors
///
/// Returns `CliError::NotSignedIn` or `CliError::Forbidden` unless a
/// superadmin is signed in, and `CliError::InvalidArgument` for an unknown
/// sort field.
pub fn list(
    session: &AuthSession,
    options: &UserQuery,
    page_size: usize,
) -> Result<TablePage<User>, CliError> {
    require_view(session, View::Users)?;

    let users = RecordStore::with_records(seed::users())?;
    let mut query = TableQuery::<UserSortField>::new(page_size);
    QueryUpdate {
        search: options.search.as_deref(),
        filters: vec![
            ("tier", options.tier.as_deref()),
            ("status", options.status.as_deref()),
        ],
        sort: options.sort.as_deref(),
        page: None,
    }
    .apply(&mut query)?;
    if let Some(page) = options.page {
        query.set_page(page);
    }

    Ok(query.apply(users.list()).cloned())
}

/// Render a page as aligned text rows.
#[must_use]
pub fn render(page: &TablePage<User>) -> String {
    let mut out = String::new();
    for user in &page.rows {
        out.push_str(&format!(
            "{:<6} {:<22} {:<28} {:<10} {:<8} {}\n",
            user.id.as_str(),
            user.name,
            user.email,
            user.tier,
            user.status,
            user.date_joined
        ));
    }
    out.push_str(&format!(
        "Showing {}-{} of {} (page {}/{})\n",
        page.range_start, page.range_end, page.total, page.page, page.total_pages
    ));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pathway_admin::storage::MemoryStore;
    use pathway_core::{Email, Role};

    use super::*;

    async fn signed_in(role: Role) -> AuthSession {
        let mut session = AuthSession::anonymous(Arc::new(MemoryStore::new()));
        session
            .login(Email::parse("ops@pathway.test").unwrap(), role, None)
            .await;
        session
    }

    #[tokio::test]
    async fn test_support_cannot_list_users() {
        let session = signed_in(Role::Support).await;
        assert!(matches!(
            list(&session, &UserQuery::default(), 5),
            Err(CliError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let session = signed_in(Role::SuperAdmin).await;
        let page = list(&session, &UserQuery::default(), 5).unwrap();
        assert_eq!(page.rows.len(), page.range_end - page.range_start + 1);
        assert_eq!(page.total, seed::users().len());
        assert!(render(&page).contains("of"));
    }

    #[tokio::test]
    async fn test_unknown_sort_is_rejected() {
        let session = signed_in(Role::SuperAdmin).await;
        let options = UserQuery {
            sort: Some("name".to_owned()),
            ..UserQuery::default()
        };
        assert!(matches!(
            list(&session, &options, 5),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
