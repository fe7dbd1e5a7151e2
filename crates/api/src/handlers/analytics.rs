//! Handlers for daily analytics: the admin range view and the public view
//! beacon.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use presswire_core::error::CoreError;
use presswire_db::models::analytics::{AnalyticsRangeQuery, DailyCounter};
use presswire_db::repositories::DailyAnalyticsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum rows for a range query (a leap year plus one day).
const MAX_RANGE_LIMIT: i64 = 366;

/// Default rows for a range query (roughly a month).
const DEFAULT_RANGE_LIMIT: i64 = 31;

/// GET /api/v1/admin/analytics/daily
///
/// Rows for an inclusive date range, oldest first. Dates with no activity
/// have no row; the UI treats a missing date as zeros.
pub async fn get_daily(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<AnalyticsRangeQuery>,
) -> AppResult<impl IntoResponse> {
    if query.start_date > query.end_date {
        return Err(AppError::Core(CoreError::Validation(
            "The start date must not be after the end date.".into(),
        )));
    }

    let limit = query.limit.unwrap_or(DEFAULT_RANGE_LIMIT).min(MAX_RANGE_LIMIT);
    let rows =
        DailyAnalyticsRepo::list_range(&state.pool, query.start_date, query.end_date, limit)
            .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/analytics/views
///
/// Public beacon fired once per article view.
pub async fn record_view(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    DailyAnalyticsRepo::bump(&state.pool, state.clock.today(), DailyCounter::Views, 1).await?;
    Ok(StatusCode::NO_CONTENT)
}
