/// Server configuration
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | <WORK_DIR>/store.db | SQLite database file |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | SHIPPING_FLAT_FEE | 30000 | Flat shipping fee (currency units) |
/// | FREE_SHIPPING_THRESHOLD | 500000 | Subtotal at which shipping is free |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Flat shipping fee applied below the free-shipping threshold
    pub shipping_flat_fee: i64,
    /// Subtotal at or above which shipping is free
    pub free_shipping_threshold: i64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| format!("{work_dir}/store.db"));
        Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            shipping_flat_fee: std::env::var("SHIPPING_FLAT_FEE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
            free_shipping_threshold: std::env::var("FREE_SHIPPING_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500_000),
        }
    }

    /// Fixed configuration for tests: no env lookups, known shipping knobs
    pub fn for_tests() -> Self {
        Self {
            work_dir: ".".into(),
            http_port: 0,
            database_path: ":memory:".into(),
            environment: "test".into(),
            shipping_flat_fee: 30_000,
            free_shipping_threshold: 500_000,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
