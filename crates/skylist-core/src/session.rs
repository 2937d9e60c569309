//! Backend Session Initializer
//!
//! Builds the database handle pair and performs anonymous sign-in.
//! Runs once per app load; a failure here is fatal and never retried.

use libsql::{Builder, Connection, Database};
use tracing::info;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::domain::{StoreError, StoreResult};
use crate::repository::run_migrations;

/// Initialized backend handles
///
/// Created once at startup and shared read-only for the session's lifetime.
pub struct Backend {
    db: Database,
    conn: Connection,
    remote: bool,
}

impl Backend {
    /// Open the configured database, connect, and run migrations
    pub async fn initialize(config: &StoreConfig) -> StoreResult<Self> {
        let db = match (&config.sync_url, &config.auth_token) {
            (Some(url), Some(token)) => {
                info!(url = %url, "opening remote replica");
                Builder::new_remote_replica(&config.db_path, url.clone(), token.clone())
                    .sync_interval(config.sync_interval)
                    .build()
                    .await
            }
            _ => Builder::new_local(&config.db_path).build().await,
        }
        .map_err(|e| StoreError::Initialization(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        run_migrations(&conn).await?;

        Ok(Self {
            db,
            conn,
            remote: config.is_remote(),
        })
    }

    /// Shared connection handle (cheap clone)
    pub fn connection(&self) -> Connection {
        self.conn.clone()
    }

    pub fn is_remote(&self) -> bool {
        self.remote
    }

    /// Pull remote changes into the embedded replica
    ///
    /// Callers check `is_remote` before syncing.
    pub async fn sync(&self) -> StoreResult<()> {
        self.db
            .sync()
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Listen(e.to_string()))
    }
}

/// Authenticated user identity for this session
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub anonymous: bool,
}

/// Reuse the persisted session if one exists, otherwise sign in anonymously
///
/// Anonymous sign-in mints a uuid identity and persists it so the same
/// collection is reachable across app loads. A configured auth token marks
/// the session non-anonymous but is not validated or exchanged.
pub async fn sign_in(conn: &Connection, config: &StoreConfig) -> StoreResult<UserIdentity> {
    let mut rows = conn
        .query("SELECT user_id, anonymous FROM sessions LIMIT 1", ())
        .await
        .map_err(|e| StoreError::Initialization(e.to_string()))?;

    if let Ok(Some(row)) = rows.next().await {
        let identity = UserIdentity {
            user_id: row
                .get::<String>(0)
                .map_err(|e| StoreError::Initialization(e.to_string()))?,
            anonymous: row.get::<i32>(1).unwrap_or(1) != 0,
        };
        info!(user_id = %identity.user_id, "reusing persisted session");
        return Ok(identity);
    }

    let identity = UserIdentity {
        user_id: Uuid::new_v4().to_string(),
        anonymous: config.auth_token.is_none(),
    };

    conn.execute(
        "INSERT INTO sessions (user_id, anonymous, created_at) VALUES (?, ?, ?)",
        libsql::params![
            identity.user_id.clone(),
            if identity.anonymous { 1 } else { 0 },
            chrono::Utc::now().timestamp_millis()
        ],
    )
    .await
    .map_err(|e| StoreError::Initialization(e.to_string()))?;

    info!(user_id = %identity.user_id, anonymous = identity.anonymous, "signed in");
    Ok(identity)
}
