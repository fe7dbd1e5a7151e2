//! Integration tests for the daily analytics counter aggregator.

use chrono::NaiveDate;
use sqlx::PgPool;

use presswire_db::models::analytics::DailyCounter;
use presswire_db::repositories::DailyAnalyticsRepo;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn first_bump_creates_the_row_lazily(pool: PgPool) {
    let day = date(2025, 6, 1);
    assert!(DailyAnalyticsRepo::find_by_date(&pool, day)
        .await
        .unwrap()
        .is_none());

    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Views, 1)
        .await
        .unwrap();

    let row = DailyAnalyticsRepo::find_by_date(&pool, day)
        .await
        .unwrap()
        .expect("row must exist after first bump");
    assert_eq!(row.total_views, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn two_bumps_yield_one_row_with_total_two(pool: PgPool) {
    let day = date(2025, 6, 1);
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Views, 1)
        .await
        .unwrap();
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Views, 1)
        .await
        .unwrap();

    let rows = DailyAnalyticsRepo::list_range(&pool, day, day, 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_views, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn counters_are_independent(pool: PgPool) {
    let day = date(2025, 6, 2);
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Likes, 1)
        .await
        .unwrap();
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Comments, 1)
        .await
        .unwrap();
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::AdClicks, 1)
        .await
        .unwrap();

    let row = DailyAnalyticsRepo::find_by_date(&pool, day)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_views, 0);
    assert_eq!(row.total_likes, 1);
    assert_eq!(row.total_dislikes, 0);
    assert_eq!(row.total_comments, 1);
    assert_eq!(row.total_ad_clicks, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn decrement_clamps_at_zero(pool: PgPool) {
    let day = date(2025, 6, 3);
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Likes, -1)
        .await
        .unwrap();

    let row = DailyAnalyticsRepo::find_by_date(&pool, day)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_likes, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn increment_then_decrement_round_trips(pool: PgPool) {
    let day = date(2025, 6, 4);
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Dislikes, 1)
        .await
        .unwrap();
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Dislikes, 1)
        .await
        .unwrap();
    DailyAnalyticsRepo::bump(&pool, day, DailyCounter::Dislikes, -1)
        .await
        .unwrap();

    let row = DailyAnalyticsRepo::find_by_date(&pool, day)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_dislikes, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn create_is_idempotent(pool: PgPool) {
    let day = date(2025, 6, 5);
    DailyAnalyticsRepo::create(&pool, day).await.unwrap();
    DailyAnalyticsRepo::create(&pool, day).await.unwrap();

    let rows = DailyAnalyticsRepo::list_range(&pool, day, day, 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn range_query_orders_by_date(pool: PgPool) {
    for d in [date(2025, 6, 3), date(2025, 6, 1), date(2025, 6, 2)] {
        DailyAnalyticsRepo::bump(&pool, d, DailyCounter::Views, 1)
            .await
            .unwrap();
    }

    let rows = DailyAnalyticsRepo::list_range(&pool, date(2025, 6, 1), date(2025, 6, 2), 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].analytics_date, date(2025, 6, 1));
    assert_eq!(rows[1].analytics_date, date(2025, 6, 2));
}
