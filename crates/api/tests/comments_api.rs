//! Integration tests for comments, replies, reactions and their cache
//! invalidation.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use presswire_core::clock::{Clock, SystemClock};
use presswire_db::models::user::UpdateProfile;
use presswire_db::repositories::{DailyAnalyticsRepo, UserRepo};

use common::{body_json, get, seed_admin, seed_content, seed_user, send};

fn comment_body(text: &str) -> serde_json::Value {
    json!({ "body": text })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_listing(pool: PgPool) {
    let content_id = seed_content(&pool, "Quiet story").await;
    let app = common::build_test_app(pool);

    let response = get(&app, &format!("/api/v1/content/{content_id}/comments")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["comments"], json!([]));
    assert_eq!(json["total"], 0);
    assert_eq!(json["user_reactions"], json!({}));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn posting_invalidates_the_cached_listing(pool: PgPool) {
    let (_, token) = seed_user(&pool, "reader").await;
    let content_id = seed_content(&pool, "Breaking story").await;
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/content/{content_id}/comments");

    // Prime the cache with the empty listing.
    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["total"], 0);

    let response = send(
        &app,
        Method::POST,
        &uri,
        Some(&token),
        Some(comment_body("First!")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The write cleared the cached listing, so the fresh comment shows up
    // immediately instead of after the TTL.
    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["comments"][0]["body"], "First!");
    assert_eq!(json["comments"][0]["username"], "reader");

    let row = DailyAnalyticsRepo::find_by_date(&pool, SystemClock.today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_comments, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn posting_requires_a_token_and_a_body(pool: PgPool) {
    let (_, token) = seed_user(&pool, "reader").await;
    let content_id = seed_content(&pool, "Story").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/content/{content_id}/comments");

    let response = send(&app, Method::POST, &uri, None, Some(comment_body("hi"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, Method::POST, &uri, Some(&token), Some(comment_body(""))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn replies_and_the_admin_marker(pool: PgPool) {
    let (_, user_token) = seed_user(&pool, "reader").await;
    let (admin, admin_token) = seed_admin(&pool).await;
    UserRepo::update_profile(
        &pool,
        admin.id,
        &UpdateProfile {
            display_name: None,
            avatar_url: Some("/static/avatars/admin.webp".into()),
        },
    )
    .await
    .unwrap();
    let content_id = seed_content(&pool, "Story").await;
    let app = common::build_test_app(pool);
    let comments_uri = format!("/api/v1/content/{content_id}/comments");

    let response = send(
        &app,
        Method::POST,
        &comments_uri,
        Some(&user_token),
        Some(comment_body("What happened?")),
    )
    .await;
    let comment_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // No replies yet.
    let json = body_json(get(&app, &comments_uri).await).await;
    assert_eq!(json["comments"][0]["reply_count"], 0);
    assert_eq!(json["comments"][0]["has_admin_reply"], false);

    let response = send(
        &app,
        Method::POST,
        &format!("/api/v1/comments/{comment_id}/replies"),
        Some(&admin_token),
        Some(comment_body("We are looking into it.")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let reply_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // The write invalidated the reply metadata; the marker appears at once.
    let json = body_json(get(&app, &comments_uri).await).await;
    assert_eq!(json["comments"][0]["reply_count"], 1);
    assert_eq!(json["comments"][0]["has_admin_reply"], true);
    assert_eq!(
        json["comments"][0]["admin_avatar"],
        "/static/avatars/admin.webp"
    );

    let json = body_json(get(&app, &format!("/api/v1/comments/{comment_id}/replies")).await).await;
    assert_eq!(json["data"][0]["body"], "We are looking into it.");

    // Replies to replies are refused.
    let response = send(
        &app,
        Method::POST,
        &format!("/api/v1/comments/{reply_id}/replies"),
        Some(&user_token),
        Some(comment_body("nested")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deletion_is_owner_or_admin(pool: PgPool) {
    let (_, author_token) = seed_user(&pool, "author").await;
    let (_, other_token) = seed_user(&pool, "other").await;
    let (_, admin_token) = seed_admin(&pool).await;
    let content_id = seed_content(&pool, "Story").await;
    let app = common::build_test_app(pool.clone());
    let comments_uri = format!("/api/v1/content/{content_id}/comments");

    let mut ids = Vec::new();
    for text in ["one", "two"] {
        let response = send(
            &app,
            Method::POST,
            &comments_uri,
            Some(&author_token),
            Some(comment_body(text)),
        )
        .await;
        ids.push(
            body_json(response).await["data"]["id"]
                .as_str()
                .unwrap()
                .to_string(),
        );
    }

    // A stranger cannot delete it.
    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/comments/{}", ids[0]),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The author can.
    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/comments/{}", ids[0]),
        Some(&author_token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // An admin can delete anyone's.
    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/comments/{}", ids[1]),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(&app, &comments_uri).await).await;
    assert_eq!(json["total"], 0);

    // Two posts, two deletions: the daily counter is back to zero.
    let row = DailyAnalyticsRepo::find_by_date(&pool, SystemClock.today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_comments, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reactions_update_the_map_and_the_counters(pool: PgPool) {
    let (_, author_token) = seed_user(&pool, "author").await;
    let (_, voter_token) = seed_user(&pool, "voter").await;
    let content_id = seed_content(&pool, "Story").await;
    let app = common::build_test_app(pool.clone());
    let comments_uri = format!("/api/v1/content/{content_id}/comments");

    let response = send(
        &app,
        Method::POST,
        &comments_uri,
        Some(&author_token),
        Some(comment_body("Hot take")),
    )
    .await;
    let comment_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let reaction_uri = format!("/api/v1/comments/{comment_id}/reaction");

    // Like it.
    let response = send(
        &app,
        Method::PUT,
        &reaction_uri,
        Some(&voter_token),
        Some(json!({ "reaction": "like" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(
        send(&app, Method::GET, &comments_uri, Some(&voter_token), None).await,
    )
    .await;
    assert_eq!(json["user_reactions"][&comment_id], "like");
    assert_eq!(json["comments"][0]["score"], 1);

    // Switch to dislike: both counters move, the score swings by two.
    let response = send(
        &app,
        Method::PUT,
        &reaction_uri,
        Some(&voter_token),
        Some(json!({ "reaction": "dislike" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(
        send(&app, Method::GET, &comments_uri, Some(&voter_token), None).await,
    )
    .await;
    assert_eq!(json["user_reactions"][&comment_id], "dislike");
    assert_eq!(json["comments"][0]["score"], -1);

    let row = DailyAnalyticsRepo::find_by_date(&pool, SystemClock.today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_likes, 0);
    assert_eq!(row.total_dislikes, 1);

    // Clear it.
    let response = send(&app, Method::DELETE, &reaction_uri, Some(&voter_token), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(
        send(&app, Method::GET, &comments_uri, Some(&voter_token), None).await,
    )
    .await;
    assert_eq!(json["user_reactions"], json!({}));
    assert_eq!(json["comments"][0]["score"], 0);

    let row = DailyAnalyticsRepo::find_by_date(&pool, SystemClock.today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_dislikes, 0);

    // An unknown reaction is refused.
    let response = send(
        &app,
        Method::PUT,
        &reaction_uri,
        Some(&voter_token),
        Some(json!({ "reaction": "love" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
