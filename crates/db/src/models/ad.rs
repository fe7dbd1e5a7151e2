//! Ad entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use presswire_core::types::{DbId, Timestamp};

/// A row from the `ads` table.
///
/// `placement` and `status` are stored as text; parse them with
/// `presswire_core::schedule::{Placement, AdStatus}` when the scheduling
/// engine needs typed values.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ad {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub target_url: String,
    pub placement: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub clicks: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert parameters for a new ad. Dates are the final, engine-approved ones.
#[derive(Debug, Clone)]
pub struct NewAd {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub target_url: String,
    pub placement: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Query parameters for the ad listings.
#[derive(Debug, Deserialize)]
pub struct AdListQuery {
    /// Maximum number of results. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
}
