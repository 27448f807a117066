use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// Server state - shared handles for every request handler
///
/// Cloning is cheap: the pool is internally reference-counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub db: SqlitePool,
}

impl ServerState {
    /// Open the database (running migrations) and assemble the state
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            config: config.clone(),
            db: db.pool,
        })
    }

    /// State backed by an in-memory database; used by tests
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db = DbService::open_in_memory().await?;
        Ok(Self {
            config,
            db: db.pool,
        })
    }
}
