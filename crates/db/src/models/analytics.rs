//! Daily analytics row model and the counter vocabulary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use presswire_core::types::Timestamp;

/// A row from the `daily_analytics` table: one per calendar date, five
/// independent non-negative counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyAnalytics {
    pub analytics_date: NaiveDate,
    pub total_views: i64,
    pub total_likes: i64,
    pub total_dislikes: i64,
    pub total_comments: i64,
    pub total_ad_clicks: i64,
    pub created_at: Timestamp,
}

/// The five counters a daily row tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyCounter {
    Views,
    Likes,
    Dislikes,
    Comments,
    AdClicks,
}

impl DailyCounter {
    /// Column holding this counter's total.
    pub fn column(&self) -> &'static str {
        match self {
            DailyCounter::Views => "total_views",
            DailyCounter::Likes => "total_likes",
            DailyCounter::Dislikes => "total_dislikes",
            DailyCounter::Comments => "total_comments",
            DailyCounter::AdClicks => "total_ad_clicks",
        }
    }
}

/// Query parameters for the analytics range endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalyticsRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Maximum number of rows. Defaults to 31, capped at 366.
    pub limit: Option<i64>,
}
