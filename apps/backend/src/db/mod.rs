//! Card record store

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Storage operations over the `cards` collection.
///
/// Mutations return the number of affected rows; handlers treat zero as a
/// persistence failure.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn insert_card(&self, row: &NewCardRow) -> Result<u64>;

    /// Insert all rows or none.
    async fn insert_cards(&self, rows: &[NewCardRow]) -> Result<u64>;

    async fn update_card(&self, card_id: i64, term: &str, definition: &str) -> Result<u64>;

    async fn delete_card(&self, card_id: i64) -> Result<u64>;
}

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get card by ID
    pub async fn get_card(&self, card_id: i64) -> Result<Option<CardRow>> {
        let card = sqlx::query_as::<_, CardRow>(
            r#"
            SELECT card_id, deck_id, term, definition, ease_factor, "interval",
                   graduated, next_review
            FROM cards
            WHERE card_id = $1
            "#,
        )
        .bind(card_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }
}

const INSERT_CARD: &str = r#"
    INSERT INTO cards (deck_id, term, definition, ease_factor, "interval", graduated, next_review)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
"#;

#[async_trait]
impl CardStore for Database {
    async fn insert_card(&self, row: &NewCardRow) -> Result<u64> {
        let result = sqlx::query(INSERT_CARD)
            .bind(row.deck_id)
            .bind(&row.term)
            .bind(&row.definition)
            .bind(row.ease_factor)
            .bind(row.interval)
            .bind(row.graduated)
            .bind(row.next_review)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_cards(&self, rows: &[NewCardRow]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for row in rows {
            let result = sqlx::query(INSERT_CARD)
                .bind(row.deck_id)
                .bind(&row.term)
                .bind(&row.definition)
                .bind(row.ease_factor)
                .bind(row.interval)
                .bind(row.graduated)
                .bind(row.next_review)
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn update_card(&self, card_id: i64, term: &str, definition: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET term = $2, definition = $3
            WHERE card_id = $1
            "#,
        )
        .bind(card_id)
        .bind(term)
        .bind(definition)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_card(&self, card_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cards WHERE card_id = $1")
            .bind(card_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
