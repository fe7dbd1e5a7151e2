//! Handlers for the `/admin/ads` resource and the public click endpoint.
//!
//! Create and update run the scheduling engine against a fresh snapshot of
//! the derived-active and derived-scheduled buckets, then persist whatever
//! window the engine approved (possibly shifted).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use presswire_core::error::CoreError;
use presswire_core::schedule::{
    place_ad, AdCandidate, AdStatus, AdWindow, Placement, PriorAd,
};
use presswire_core::types::DbId;
use presswire_db::models::ad::{Ad, AdListQuery, NewAd};
use presswire_db::models::analytics::DailyCounter;
use presswire_db::repositories::{AdRepo, DailyAnalyticsRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::{DataResponse, PlacedAdResponse};
use crate::state::AppState;

/// Maximum page size for ad listings.
const MAX_LIMIT: i64 = 100;

/// Default page size for ad listings.
const DEFAULT_LIMIT: i64 = 20;

/// Snapshot size for conflict checks; far above the bucket capacity.
const SNAPSHOT_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/ads` and `PUT /admin/ads/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdRequest {
    #[validate(length(min = 3, max = 50, message = "Title must be 3 to 50 characters."))]
    pub title: String,
    #[validate(length(min = 3, max = 100, message = "Description must be 3 to 100 characters."))]
    pub description: String,
    #[validate(length(min = 1, message = "A target URL is required."))]
    pub target_url: String,
    #[validate(length(min = 1, message = "An image is required."))]
    pub image_url: String,
    pub placement: String,
    pub status: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

impl AdRequest {
    /// Validate the descriptive fields and parse the enums, returning the
    /// typed candidate. The first failing field yields its message.
    fn into_candidate(mut self) -> Result<(AdCandidate, NewAd), AppError> {
        if let Err(errors) = Validate::validate(&self) {
            let message = errors
                .field_errors()
                .into_values()
                .flatten()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| "Invalid ad fields.".to_string());
            return Err(AppError::Core(CoreError::Validation(message)));
        }

        let placement: Placement = self
            .placement
            .parse()
            .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;
        let status: AdStatus = self
            .status
            .parse()
            .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;

        // Bare domains are promoted to https.
        let lower = self.target_url.to_lowercase();
        if !lower.starts_with("http://") && !lower.starts_with("https://") {
            self.target_url = format!("https://{}", self.target_url);
        }

        let candidate = AdCandidate {
            placement,
            status,
            start_date: self.start_date,
            end_date: self.end_date,
        };
        let record = NewAd {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            target_url: self.target_url,
            placement: placement.as_str().to_string(),
            status: status.as_str().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
        };
        Ok((candidate, record))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn clamp_limit(query: &AdListQuery) -> i64 {
    query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
}

/// Reduce snapshot rows to the windows the engine compares against.
///
/// Rows whose placement no longer parses (e.g. a retired slot name) cannot
/// conflict with any candidate and are skipped.
fn to_windows(ads: &[Ad]) -> Vec<AdWindow> {
    ads.iter()
        .filter_map(|ad| {
            let placement: Placement = ad.placement.parse().ok()?;
            Some(AdWindow {
                id: ad.id,
                placement,
                start_date: ad.start_date,
                end_date: ad.end_date,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/ads/active
pub async fn list_active(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<AdListQuery>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();
    let ads = AdRepo::list_derived_active(&state.pool, today, clamp_limit(&query)).await?;
    Ok(Json(DataResponse { data: ads }))
}

/// GET /api/v1/admin/ads/scheduled
pub async fn list_scheduled(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<AdListQuery>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();
    let ads = AdRepo::list_derived_scheduled(&state.pool, today, clamp_limit(&query)).await?;
    Ok(Json(DataResponse { data: ads }))
}

/// GET /api/v1/admin/ads/inactive
pub async fn list_inactive(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<AdListQuery>,
) -> AppResult<impl IntoResponse> {
    let ads = AdRepo::list_inactive(&state.pool, clamp_limit(&query)).await?;
    Ok(Json(DataResponse { data: ads }))
}

/// GET /api/v1/admin/ads/{id}
pub async fn get_ad(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(ad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ad = AdRepo::find_by_id(&state.pool, ad_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ad",
            id: ad_id,
        }))?;
    Ok(Json(DataResponse { data: ad }))
}

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/ads
///
/// Returns 201 with the stored ad, the bucket it landed in, and whether the
/// engine shifted its window.
pub async fn create_ad(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<AdRequest>,
) -> AppResult<impl IntoResponse> {
    let (candidate, mut record) = input.into_candidate()?;
    let today = state.clock.today();

    let active = AdRepo::list_derived_active(&state.pool, today, SNAPSHOT_LIMIT).await?;
    let scheduled = AdRepo::list_derived_scheduled(&state.pool, today, SNAPSHOT_LIMIT).await?;

    let placed = place_ad(
        &candidate,
        &to_windows(&active),
        &to_windows(&scheduled),
        today,
        None,
    )?;

    record.start_date = placed.start_date;
    record.end_date = placed.end_date;
    let ad = AdRepo::insert(&state.pool, &record).await?;

    tracing::info!(
        ad_id = %ad.id,
        placement = %ad.placement,
        bucket = ?placed.bucket,
        dates_adjusted = placed.dates_adjusted,
        "Ad created",
    );

    Ok((
        StatusCode::CREATED,
        Json(PlacedAdResponse {
            data: ad,
            bucket: placed.bucket,
            dates_adjusted: placed.dates_adjusted,
        }),
    ))
}

/// PUT /api/v1/admin/ads/{id}
///
/// Re-runs every scheduling check against the current snapshot, with the
/// ad's own record excluded from conflict and capacity counting.
pub async fn update_ad(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(ad_id): Path<DbId>,
    Json(input): Json<AdRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = AdRepo::find_by_id(&state.pool, ad_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ad",
            id: ad_id,
        }))?;

    let (candidate, mut record) = input.into_candidate()?;
    let today = state.clock.today();

    let active = AdRepo::list_derived_active(&state.pool, today, SNAPSHOT_LIMIT).await?;
    let scheduled = AdRepo::list_derived_scheduled(&state.pool, today, SNAPSHOT_LIMIT).await?;

    let prior = PriorAd {
        id: existing.id,
        start_date: existing.start_date,
    };
    let placed = place_ad(
        &candidate,
        &to_windows(&active),
        &to_windows(&scheduled),
        today,
        Some(&prior),
    )?;

    record.start_date = placed.start_date;
    record.end_date = placed.end_date;
    let ad = AdRepo::update(&state.pool, ad_id, &record)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ad",
            id: ad_id,
        }))?;

    tracing::info!(
        ad_id = %ad.id,
        bucket = ?placed.bucket,
        dates_adjusted = placed.dates_adjusted,
        "Ad updated",
    );

    Ok(Json(PlacedAdResponse {
        data: ad,
        bucket: placed.bucket,
        dates_adjusted: placed.dates_adjusted,
    }))
}

// ---------------------------------------------------------------------------
// Deactivate / delete / click
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/ads/{id}/deactivate
pub async fn deactivate_ad(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(ad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AdRepo::deactivate(&state.pool, ad_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Ad",
            id: ad_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/ads/{id}
///
/// Removes the row and best-effort removes the stored image file; a file
/// that is already gone does not fail the request.
pub async fn delete_ad(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(ad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ad = AdRepo::find_by_id(&state.pool, ad_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ad",
            id: ad_id,
        }))?;

    let image_path = ad.image_url.trim_start_matches('/').to_string();
    if !image_path.is_empty() {
        if let Err(err) = tokio::fs::remove_file(&image_path).await {
            tracing::warn!(path = %image_path, error = %err, "could not remove ad image");
        }
    }

    AdRepo::delete(&state.pool, ad_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/ads/{id}/click
///
/// Public: registers a click on the ad and on today's analytics row.
pub async fn click_ad(
    State(state): State<AppState>,
    Path(ad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let clicks = AdRepo::increment_clicks(&state.pool, ad_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ad",
            id: ad_id,
        }))?;

    DailyAnalyticsRepo::bump(&state.pool, state.clock.today(), DailyCounter::AdClicks, 1).await?;

    Ok(Json(DataResponse { data: clicks }))
}
