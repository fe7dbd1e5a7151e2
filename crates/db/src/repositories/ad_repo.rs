//! Repository for the `ads` table.
//!
//! The derived-active / derived-scheduled listings implement the bucket
//! split the scheduling engine works on: both cover status `active` rows,
//! partitioned by whether the start date has been reached.

use chrono::NaiveDate;
use sqlx::PgPool;

use presswire_core::types::DbId;

use crate::models::ad::{Ad, NewAd};

/// Column list for `ads` queries.
const COLUMNS: &str = "\
    id, title, description, image_url, target_url, \
    placement, status, start_date, end_date, clicks, \
    created_at, updated_at";

/// Provides CRUD operations for ads.
pub struct AdRepo;

impl AdRepo {
    /// Insert a new ad with engine-approved dates.
    pub async fn insert(pool: &PgPool, input: &NewAd) -> Result<Ad, sqlx::Error> {
        let query = format!(
            "INSERT INTO ads \
                 (title, description, image_url, target_url, placement, status, \
                  start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.target_url)
            .bind(&input.placement)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Replace an existing ad's fields. Returns `None` if the id is unknown.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewAd,
    ) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!(
            "UPDATE ads SET \
                 title = $2, description = $3, image_url = $4, target_url = $5, \
                 placement = $6, status = $7, start_date = $8, end_date = $9, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.target_url)
            .bind(&input.placement)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Find an ad by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ads WHERE id = $1");
        sqlx::query_as::<_, Ad>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every ad, newest first. Used by the expiry sweep.
    pub async fn list_all(pool: &PgPool, limit: i64) -> Result<Vec<Ad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ads ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, Ad>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List derived-active ads: status `active` with a start date on or
    /// before `today`.
    pub async fn list_derived_active(
        pool: &PgPool,
        today: NaiveDate,
        limit: i64,
    ) -> Result<Vec<Ad>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ads \
             WHERE status = 'active' AND start_date <= $1 \
             ORDER BY start_date ASC LIMIT $2"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(today)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List derived-scheduled ads: status `active` with a future start date.
    pub async fn list_derived_scheduled(
        pool: &PgPool,
        today: NaiveDate,
        limit: i64,
    ) -> Result<Vec<Ad>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ads \
             WHERE status = 'active' AND start_date > $1 \
             ORDER BY start_date ASC LIMIT $2"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(today)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List inactive ads, newest first.
    pub async fn list_inactive(pool: &PgPool, limit: i64) -> Result<Vec<Ad>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ads \
             WHERE status = 'inactive' \
             ORDER BY created_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Flip an ad's status to inactive.
    ///
    /// Returns `true` if a row was updated, `false` if the id is unknown.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ads SET status = 'inactive', updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete an ad row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically add one click to an ad's counter.
    ///
    /// Returns the new total, or `None` if the id is unknown.
    pub async fn increment_clicks(pool: &PgPool, id: DbId) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE ads SET clicks = clicks + 1 WHERE id = $1 RETURNING clicks",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
