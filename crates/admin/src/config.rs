//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `PATHWAY_HOST` - Bind address (default: 127.0.0.1)
//! - `PATHWAY_PORT` - Listen port (default: 3002)
//! - `PATHWAY_BASE_URL` - Public URL for the dashboard (default: `http://<host>:<port>`)
//! - `PATHWAY_DATA_DIR` - Directory holding `state.json` (default: `.pathway`)
//! - `PATHWAY_PAGE_SIZE` - Rows per page in the user table (default: 5)
//! - `PATHWAY_LOG_JSON` - Emit JSON logs when set (read by the binary)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3002";
const DEFAULT_DATA_DIR: &str = ".pathway";

/// Rows per page in the user table unless overridden.
pub const DEFAULT_USER_PAGE_SIZE: usize = 5;

/// Rows per page in the journey and ticket tables.
pub const DEFAULT_WIDE_PAGE_SIZE: usize = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Page sizes for each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    pub users: usize,
    pub journeys: usize,
    pub tickets: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            users: DEFAULT_USER_PAGE_SIZE,
            journeys: DEFAULT_WIDE_PAGE_SIZE,
            tickets: DEFAULT_WIDE_PAGE_SIZE,
        }
    }
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// Directory for the durable key-value file
    pub data_dir: PathBuf,
    /// Rows per page for each table
    pub page_sizes: PageSizes,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        let host = IpAddr::from([127, 0, 0, 1]);
        Self {
            host,
            port: 3002,
            base_url: format!("http://{host}:3002"),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_sizes: PageSizes::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = env_or("PATHWAY_HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PATHWAY_HOST".to_string(), e.to_string()))?;
        let port = env_or("PATHWAY_PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PATHWAY_PORT".to_string(), e.to_string()))?;
        let base_url = lookup("PATHWAY_BASE_URL").unwrap_or_else(|| format!("http://{host}:{port}"));
        let data_dir = PathBuf::from(env_or("PATHWAY_DATA_DIR", DEFAULT_DATA_DIR));

        let users_page_size = match lookup("PATHWAY_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_USER_PAGE_SIZE,
        };

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = lookup("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = lookup("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            page_sizes: PageSizes {
                users: users_page_size,
                ..PageSizes::default()
            },
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_page_size(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("PATHWAY_PAGE_SIZE".to_string(), reason);
    let size = raw.parse::<usize>().map_err(|e| invalid(e.to_string()))?;
    if size == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(size)
}
