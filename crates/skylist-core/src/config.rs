//! Store Configuration
//!
//! Explicit configuration passed to the session initializer at startup.
//! Nothing below the entry point reads ambient environment state.

use std::path::PathBuf;
use std::time::Duration;

/// Collection namespace used when no app id is configured
pub const DEFAULT_APP_ID: &str = "default-app-id";

/// Configuration for the backend store
///
/// Selects which database to talk to (local file, or a hosted Turso database
/// through an embedded replica), which collection namespace to use, and the
/// credential for the remote database if any.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the local database file (`:memory:` in tests)
    pub db_path: PathBuf,
    /// Application identifier scoping the collection namespace
    pub app_id: String,
    /// Remote database URL; `None` keeps the store local-only
    pub sync_url: Option<String>,
    /// Pre-provisioned auth token for the remote database
    pub auth_token: Option<String>,
    /// How often the embedded replica pulls remote changes
    pub sync_interval: Duration,
}

impl StoreConfig {
    /// Local-only configuration with the default app id
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            app_id: DEFAULT_APP_ID.to_string(),
            sync_url: None,
            auth_token: None,
            sync_interval: Duration::from_secs(30),
        }
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Point the store at a hosted database
    pub fn with_remote(mut self, url: impl Into<String>, token: impl Into<String>) -> Self {
        self.sync_url = Some(url.into());
        self.auth_token = Some(token.into());
        self
    }

    /// Whether a remote database is configured
    pub fn is_remote(&self) -> bool {
        self.sync_url.is_some() && self.auth_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new(PathBuf::from(":memory:"));
        assert_eq!(config.app_id, DEFAULT_APP_ID);
        assert!(!config.is_remote());
    }

    #[test]
    fn test_remote_configuration() {
        let config = StoreConfig::new(PathBuf::from(":memory:"))
            .with_app_id("skylist")
            .with_remote("libsql://example.turso.io", "token");
        assert_eq!(config.app_id, "skylist");
        assert!(config.is_remote());
    }
}
