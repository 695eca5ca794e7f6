//! Settings and page-visit repository implementations.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use vocab_core::{
    defaults, Error, PageVisitRepository, Result, Settings, SettingsRepository,
    UpdateSettingsRequest,
};

/// PostgreSQL implementation of SettingsRepository.
///
/// The table holds at most one row (`id = 1`). Reads never write: a missing
/// row reads as the defaults, and `update` upserts it.
pub struct PgSettingsRepository {
    pool: Pool<Postgres>,
}

impl PgSettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert the default row if it is missing. Called once at startup.
    pub async fn ensure_row(&self) -> Result<()> {
        sqlx::query(
            "INSERT INTO user_settings (id, target_language, min_word_length) VALUES (1, $1, $2) ON CONFLICT (id) DO NOTHING",
        )
        .bind(defaults::TARGET_LANGUAGE)
        .bind(defaults::MIN_WORD_LENGTH)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn get(&self) -> Result<Settings> {
        let row = sqlx::query("SELECT target_language, min_word_length FROM user_settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row
            .map(|row| Settings {
                target_language: row.get("target_language"),
                min_word_length: row.get("min_word_length"),
            })
            .unwrap_or_default())
    }

    async fn update(&self, req: UpdateSettingsRequest) -> Result<Settings> {
        let req = req.normalized()?;

        let row = sqlx::query(
            r#"
            INSERT INTO user_settings (id, target_language, min_word_length)
            VALUES (1, COALESCE($1, $3), COALESCE($2, $4))
            ON CONFLICT (id) DO UPDATE SET
                target_language = COALESCE($1, user_settings.target_language),
                min_word_length = COALESCE($2, user_settings.min_word_length)
            RETURNING target_language, min_word_length
            "#,
        )
        .bind(&req.target_language)
        .bind(req.min_word_length)
        .bind(defaults::TARGET_LANGUAGE)
        .bind(defaults::MIN_WORD_LENGTH)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(Settings {
            target_language: row.get("target_language"),
            min_word_length: row.get("min_word_length"),
        })
    }
}

/// PostgreSQL implementation of PageVisitRepository.
pub struct PgPageVisitRepository {
    pool: Pool<Postgres>,
}

impl PgPageVisitRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageVisitRepository for PgPageVisitRepository {
    async fn record(&self, url: &str, title: Option<&str>) -> Result<()> {
        sqlx::query("INSERT INTO page_visit (url, title) VALUES ($1, $2)")
            .bind(url)
            .bind(title)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM page_visit")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.get("count"))
    }
}
