//! Repository for the `daily_analytics` table.
//!
//! Rows are created lazily: the first counter write of a day inserts the
//! row, then retries the write once. The primary key on `analytics_date`
//! makes concurrent first writes safe -- the losing insert is a no-op and
//! its retry lands on the row the winner created.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::analytics::{DailyAnalytics, DailyCounter};

/// Column list for `daily_analytics` queries.
const COLUMNS: &str = "\
    analytics_date, total_views, total_likes, total_dislikes, \
    total_comments, total_ad_clicks, created_at";

/// Provides counter operations and range queries for daily analytics.
pub struct DailyAnalyticsRepo;

impl DailyAnalyticsRepo {
    /// Apply a +1/-1 delta to one counter on the row for `date`, creating
    /// the row on first touch.
    ///
    /// The adjustment is a single atomic UPDATE; when no row exists yet the
    /// row is inserted and the adjustment retried exactly once. An error on
    /// the retry propagates.
    pub async fn bump(
        pool: &PgPool,
        date: NaiveDate,
        counter: DailyCounter,
        delta: i64,
    ) -> Result<(), sqlx::Error> {
        match Self::adjust(pool, date, counter, delta).await {
            Err(sqlx::Error::RowNotFound) => {
                Self::create(pool, date).await?;
                Self::adjust(pool, date, counter, delta).await
            }
            other => other,
        }
    }

    /// Atomic counter adjustment; `RowNotFound` when no row exists for
    /// `date`. Counters never go below zero.
    async fn adjust(
        pool: &PgPool,
        date: NaiveDate,
        counter: DailyCounter,
        delta: i64,
    ) -> Result<(), sqlx::Error> {
        let column = counter.column();
        let query = format!(
            "UPDATE daily_analytics \
             SET {column} = GREATEST({column} + $2, 0) \
             WHERE analytics_date = $1 \
             RETURNING analytics_date"
        );
        sqlx::query_scalar::<_, NaiveDate>(&query)
            .bind(date)
            .bind(delta)
            .fetch_optional(pool)
            .await?
            .map(|_| ())
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Insert a zero-initialized row for `date`.
    ///
    /// Losing a creation race is not an error; the caller's retry proceeds
    /// against the row that won.
    pub async fn create(pool: &PgPool, date: NaiveDate) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO daily_analytics (analytics_date) VALUES ($1) \
             ON CONFLICT (analytics_date) DO NOTHING",
        )
        .bind(date)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find the row for a single date.
    pub async fn find_by_date(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Option<DailyAnalytics>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM daily_analytics WHERE analytics_date = $1");
        sqlx::query_as::<_, DailyAnalytics>(&query)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Rows for an inclusive date range, oldest first.
    pub async fn list_range(
        pool: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> Result<Vec<DailyAnalytics>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_analytics \
             WHERE analytics_date >= $1 AND analytics_date <= $2 \
             ORDER BY analytics_date ASC LIMIT $3"
        );
        sqlx::query_as::<_, DailyAnalytics>(&query)
            .bind(start)
            .bind(end)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
