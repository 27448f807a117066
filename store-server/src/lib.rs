//! Marketplace store server
//!
//! Backend for a handmade-goods storefront and its admin console. The heart
//! of the crate is the order placement path: a checkout request is validated,
//! stock is reserved against the product ledger and the order is persisted,
//! all inside one database transaction so inventory can never be oversold.
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/        # Config, server, state
//! ├── api/         # HTTP routes and handlers
//! ├── db/          # SQLite pool, migrations, repositories
//! ├── inventory/   # Stock reservation engine (two-phase validate/apply)
//! ├── orders/      # Checkout validation and order lifecycle
//! └── utils/       # Logging, validation helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod inventory;
pub mod orders;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use orders::OrdersManager;
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResult};

pub fn print_banner() {
    println!(
        r#"
   _____ __
  / ___// /_____  ________
  \__ \/ __/ __ \/ ___/ _ \
 ___/ / /_/ /_/ / /  /  __/
/____/\__/\____/_/   \___/
    "#
    );
}

/// Load `.env`, create the working directory and initialize logging.
/// Called once from `main` before anything else.
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
    std::fs::create_dir_all(&work_dir)?;

    init_logger();
    Ok(())
}
