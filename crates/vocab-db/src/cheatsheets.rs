//! Cheatsheet repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::info;

use vocab_core::{
    Cheatsheet, CheatsheetRepository, CheatsheetSummary, CreateCheatsheetRequest, Error, Result,
};

use crate::words::word_from_row;

/// PostgreSQL implementation of CheatsheetRepository.
pub struct PgCheatsheetRepository {
    pool: Pool<Postgres>,
}

impl PgCheatsheetRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheatsheetRepository for PgCheatsheetRepository {
    async fn create(&self, req: CreateCheatsheetRequest) -> Result<CheatsheetSummary> {
        let req = req.normalized()?;

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let row = sqlx::query(
            "INSERT INTO cheatsheet (title) VALUES ($1) RETURNING id, title, date_created",
        )
        .bind(&req.title)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;
        let id: i64 = row.get("id");

        for (position, word_id) in req.word_ids.iter().enumerate() {
            // Inserting through a SELECT turns a dangling id into zero rows
            // instead of a foreign-key violation.
            let result = sqlx::query(
                r#"
                INSERT INTO cheatsheet_word (cheatsheet_id, word_id, position)
                SELECT $1, id, $3 FROM word WHERE id = $2
                "#,
            )
            .bind(id)
            .bind(*word_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

            if result.rows_affected() == 0 {
                // Dropping `tx` rolls back the cheatsheet row and prior memberships.
                return Err(Error::InvalidInput(format!(
                    "Word {} does not exist",
                    word_id
                )));
            }
        }

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "cheatsheets",
            op = "create",
            cheatsheet_id = id,
            word_count = req.word_ids.len(),
            "Cheatsheet created"
        );

        Ok(CheatsheetSummary {
            id,
            title: row.get("title"),
            date_created: row.get("date_created"),
            word_count: req.word_ids.len() as i64,
        })
    }

    async fn list(&self) -> Result<Vec<CheatsheetSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.title, c.date_created, COUNT(cw.word_id) AS word_count
            FROM cheatsheet c
            LEFT JOIN cheatsheet_word cw ON cw.cheatsheet_id = c.id
            GROUP BY c.id
            ORDER BY c.date_created DESC, c.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| CheatsheetSummary {
                id: r.get("id"),
                title: r.get("title"),
                date_created: r.get("date_created"),
                word_count: r.get("word_count"),
            })
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Cheatsheet>> {
        let Some(sheet) = sqlx::query("SELECT id, title, date_created FROM cheatsheet WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
        else {
            return Ok(None);
        };

        let rows = sqlx::query(
            r#"
            SELECT w.id, w.text, w.translation, w.language, w.part_of_speech,
                   w.category, w.context, w.date_added
            FROM word w
            JOIN cheatsheet_word cw ON cw.word_id = w.id
            WHERE cw.cheatsheet_id = $1
            ORDER BY w.part_of_speech ASC NULLS LAST, w.text_key ASC, w.id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let words = rows.iter().map(word_from_row).collect::<Result<Vec<_>>>()?;

        Ok(Some(Cheatsheet {
            id: sheet.get("id"),
            title: sheet.get("title"),
            date_created: sheet.get("date_created"),
            words,
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cheatsheet WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
