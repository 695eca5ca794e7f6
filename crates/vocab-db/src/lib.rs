//! # vocab-db
//!
//! PostgreSQL storage layer for the vocab backend.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for words, settings, page visits and cheatsheets
//! - An in-memory store with the same semantics, for tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use vocab_db::{Database, WordRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/vocab").await?;
//!     let word = db.words.find_by_text("hello").await?;
//!     println!("{:?}", word);
//!     Ok(())
//! }
//! ```
use std::sync::Arc;

pub mod cheatsheets;
pub mod memory;
pub mod pool;
pub mod settings;
pub mod words;

// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use vocab_core::*;

pub use cheatsheets::PgCheatsheetRepository;
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use settings::{PgPageVisitRepository, PgSettingsRepository};
pub use words::PgWordRepository;

/// Trait-object handles to every repository, as consumed by services.
#[derive(Clone)]
pub struct Repositories {
    pub words: Arc<dyn WordRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub page_visits: Arc<dyn PageVisitRepository>,
    pub cheatsheets: Arc<dyn CheatsheetRepository>,
}

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    pub words: Arc<PgWordRepository>,
    pub settings: Arc<PgSettingsRepository>,
    pub page_visits: Arc<PgPageVisitRepository>,
    pub cheatsheets: Arc<PgCheatsheetRepository>,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            words: Arc::new(PgWordRepository::new(pool.clone())),
            settings: Arc::new(PgSettingsRepository::new(pool.clone())),
            page_visits: Arc::new(PgPageVisitRepository::new(pool.clone())),
            cheatsheets: Arc::new(PgCheatsheetRepository::new(pool.clone())),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }

    /// Trait-object view of the repositories for the service layer.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            words: self.words.clone(),
            settings: self.settings.clone(),
            page_visits: self.page_visits.clone(),
            cheatsheets: self.cheatsheets.clone(),
        }
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
