//! Integration tests for the cached profile endpoint.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use presswire_db::models::user::UpdateProfile;
use presswire_db::repositories::UserRepo;

use common::{body_json, seed_user, send};

#[sqlx::test(migrations = "../db/migrations")]
async fn me_requires_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(&app, Method::GET, "/api/v1/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_is_served_from_the_cache_until_invalidated(pool: PgPool) {
    let (user, token) = seed_user(&pool, "reader").await;
    let app = common::build_test_app(pool.clone());

    // First read loads from the database and caches the snapshot.
    let json = body_json(send(&app, Method::GET, "/api/v1/me", Some(&token), None).await).await;
    assert_eq!(json["data"]["username"], "reader");
    assert_eq!(json["data"]["display_name"], "reader");

    // A write that bypasses the API is invisible: the cache still serves
    // the old snapshot. The store stays authoritative; this entry would
    // age out at its TTL.
    UserRepo::update_profile(
        &pool,
        user.id,
        &UpdateProfile {
            display_name: Some("Changed Offline".into()),
            avatar_url: None,
        },
    )
    .await
    .unwrap();

    let json = body_json(send(&app, Method::GET, "/api/v1/me", Some(&token), None).await).await;
    assert_eq!(json["data"]["display_name"], "reader");

    // Updating through the API invalidates `user*`, so the next read is
    // fresh.
    let response = send(
        &app,
        Method::PUT,
        "/api/v1/me",
        Some(&token),
        Some(json!({ "display_name": "Front Page" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(send(&app, Method::GET, "/api/v1/me", Some(&token), None).await).await;
    assert_eq!(json["data"]["display_name"], "Front Page");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_validation_rejects_oversized_fields(pool: PgPool) {
    let (_, token) = seed_user(&pool, "reader").await;
    let app = common::build_test_app(pool);

    let response = send(
        &app,
        Method::PUT,
        "/api/v1/me",
        Some(&token),
        Some(json!({ "display_name": "x".repeat(61) })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
