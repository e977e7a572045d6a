//! Repository for the `heroes` table.

use heroes_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::hero::{Hero, HeroInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, slug, powerstats, appearance, biography, work, connections, images";

/// Writable columns, in bind order.
const INSERT_COLUMNS: &str =
    "name, slug, powerstats, appearance, biography, work, connections, images";

/// Bind parameters per inserted row.
const BINDS_PER_ROW: usize = 8;

/// Largest array a single bulk insert can carry. PostgreSQL caps a statement
/// at 65535 bind parameters.
pub const MAX_BULK_ROWS: usize = u16::MAX as usize / BINDS_PER_ROW;

/// Provides CRUD operations for heroes.
pub struct HeroRepo;

impl HeroRepo {
    /// Insert a hero, returning its generated id.
    pub async fn create(pool: &PgPool, input: &HeroInput) -> Result<DbId, sqlx::Error> {
        let query = format!(
            "INSERT INTO heroes ({INSERT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id"
        );
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(Json(&input.powerstats))
            .bind(Json(&input.appearance))
            .bind(Json(&input.biography))
            .bind(Json(&input.work))
            .bind(Json(&input.connections))
            .bind(Json(&input.images))
            .fetch_one(pool)
            .await
    }

    /// Insert many heroes with one multi-row statement.
    ///
    /// The statement succeeds or fails as a unit. Returns the number of rows
    /// inserted. An empty slice is a no-op. Callers must keep `inputs` within
    /// [`MAX_BULK_ROWS`].
    pub async fn bulk_create(pool: &PgPool, inputs: &[HeroInput]) -> Result<u64, sqlx::Error> {
        if inputs.is_empty() {
            return Ok(0);
        }
        tracing::debug!(rows = inputs.len(), "Bulk inserting heroes");

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("INSERT INTO heroes ({INSERT_COLUMNS}) "));
        builder.push_values(inputs, |mut row, hero| {
            row.push_bind(&hero.name)
                .push_bind(&hero.slug)
                .push_bind(Json(&hero.powerstats))
                .push_bind(Json(&hero.appearance))
                .push_bind(Json(&hero.biography))
                .push_bind(Json(&hero.work))
                .push_bind(Json(&hero.connections))
                .push_bind(Json(&hero.images));
        });

        let result = builder.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Find a hero by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes WHERE id = $1");
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of heroes ordered by id.
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Hero>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of heroes.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM heroes")
            .fetch_one(pool)
            .await
    }

    /// All heroes whose name matches `pattern` case-insensitively.
    ///
    /// `pattern` is an `ILIKE` pattern, see
    /// [`heroes_core::search::contains_pattern`].
    pub async fn search_by_name(pool: &PgPool, pattern: &str) -> Result<Vec<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes WHERE name ILIKE $1 ORDER BY id");
        sqlx::query_as::<_, Hero>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column of a hero.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn replace(pool: &PgPool, id: DbId, input: &HeroInput) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE heroes SET
                name = $2,
                slug = $3,
                powerstats = $4,
                appearance = $5,
                biography = $6,
                work = $7,
                connections = $8,
                images = $9
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(Json(&input.powerstats))
        .bind(Json(&input.appearance))
        .bind(Json(&input.biography))
        .bind(Json(&input.work))
        .bind(Json(&input.connections))
        .bind(Json(&input.images))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a hero by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
