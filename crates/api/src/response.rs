//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project
//! conventions. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })` to get compile-time type safety and
//! consistent serialization.

use serde::Serialize;

use presswire_core::schedule::AdBucket;
use presswire_db::models::ad::Ad;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Response for ad create/update.
///
/// `dates_adjusted` is the side channel telling the UI that the committed
/// window differs from the requested one; `bucket` tells it which listing
/// to refresh.
#[derive(Debug, Serialize)]
pub struct PlacedAdResponse {
    pub data: Ad,
    pub bucket: AdBucket,
    pub dates_adjusted: bool,
}
