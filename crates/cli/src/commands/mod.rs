//! CLI command implementations.
//!
//! Every command opens the same `state.json` the server uses, so a sign-in
//! from the CLI is visible to the dashboard and the other way round.

pub mod export;
pub mod session;
pub mod users;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use pathway_admin::config::{AdminConfig, ConfigError};
use pathway_admin::db::RepositoryError;
use pathway_admin::error::AppError;
use pathway_admin::components::ExportError;
use pathway_admin::middleware::{AccessDecision, View};
use pathway_admin::services::AuthSession;
use pathway_admin::storage::{FileStore, KeyValueStore};
use pathway_core::EmailError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not signed in. Run `pathway-cli login -e <email>` first.")]
    NotSignedIn,

    #[error("The {role} role cannot open {view}")]
    Forbidden { role: &'static str, view: &'static str },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<AppError> for CliError {
    fn from(err: AppError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Resolve the data directory: the flag wins, then `PATHWAY_DATA_DIR`.
///
/// # Errors
///
/// Returns `CliError::Config` if the environment holds an invalid value.
pub fn data_dir(flag: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match flag {
        Some(dir) => Ok(dir),
        None => Ok(AdminConfig::from_env()?.data_dir),
    }
}

/// Store backed by `state.json` in `dir`.
#[must_use]
pub fn open_store(dir: &Path) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::in_dir(dir))
}

/// Require a signed-in identity whose role may open `view`.
///
/// # Errors
///
/// Returns `CliError::NotSignedIn` or `CliError::Forbidden`.
pub fn require_view(session: &AuthSession, view: View) -> Result<(), CliError> {
    match view.authorize(session.current_user()) {
        AccessDecision::Allow => Ok(()),
        AccessDecision::RedirectToLogin => Err(CliError::NotSignedIn),
        AccessDecision::RedirectToDefault => Err(CliError::Forbidden {
            role: session.role().map_or("anonymous", |role| role.label()),
            view: view.label(),
        }),
    }
}
