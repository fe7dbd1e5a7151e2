//! Integration tests for the ad repository's bucket listings and counters.

use chrono::NaiveDate;
use sqlx::PgPool;

use presswire_db::models::ad::NewAd;
use presswire_db::repositories::AdRepo;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_ad(placement: &str, status: &str, start: NaiveDate, end: NaiveDate) -> NewAd {
    NewAd {
        title: format!("{placement} campaign"),
        description: "Spring campaign".into(),
        image_url: "/static/ads/spring.webp".into(),
        target_url: "https://example.com".into(),
        placement: placement.into(),
        status: status.into(),
        start_date: start,
        end_date: end,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_and_find_round_trip(pool: PgPool) {
    let ad = AdRepo::insert(
        &pool,
        &new_ad("header", "active", date(2025, 6, 10), date(2025, 6, 20)),
    )
    .await
    .unwrap();

    let found = AdRepo::find_by_id(&pool, ad.id).await.unwrap().unwrap();
    assert_eq!(found.placement, "header");
    assert_eq!(found.status, "active");
    assert_eq!(found.start_date, date(2025, 6, 10));
    assert_eq!(found.clicks, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn bucket_listings_split_on_start_date(pool: PgPool) {
    let today = date(2025, 6, 10);
    AdRepo::insert(&pool, &new_ad("header", "active", today, date(2025, 6, 20)))
        .await
        .unwrap();
    AdRepo::insert(
        &pool,
        &new_ad("sidebar", "active", date(2025, 6, 15), date(2025, 6, 25)),
    )
    .await
    .unwrap();
    AdRepo::insert(
        &pool,
        &new_ad("footer", "inactive", today, date(2025, 6, 20)),
    )
    .await
    .unwrap();

    let active = AdRepo::list_derived_active(&pool, today, 100).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].placement, "header");

    let scheduled = AdRepo::list_derived_scheduled(&pool, today, 100)
        .await
        .unwrap();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].placement, "sidebar");

    let inactive = AdRepo::list_inactive(&pool, 100).await.unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].placement, "footer");
}

#[sqlx::test(migrations = "./migrations")]
async fn update_replaces_fields(pool: PgPool) {
    let ad = AdRepo::insert(
        &pool,
        &new_ad("header", "active", date(2025, 6, 10), date(2025, 6, 20)),
    )
    .await
    .unwrap();

    let mut changed = new_ad("footer", "inactive", date(2025, 7, 1), date(2025, 7, 10));
    changed.title = "Renamed".into();
    let updated = AdRepo::update(&pool, ad.id, &changed).await.unwrap().unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.placement, "footer");
    assert_eq!(updated.status, "inactive");
    assert_eq!(updated.start_date, date(2025, 7, 1));
}

#[sqlx::test(migrations = "./migrations")]
async fn deactivate_flips_status_once(pool: PgPool) {
    let ad = AdRepo::insert(
        &pool,
        &new_ad("header", "active", date(2025, 6, 10), date(2025, 6, 20)),
    )
    .await
    .unwrap();

    assert!(AdRepo::deactivate(&pool, ad.id).await.unwrap());
    let found = AdRepo::find_by_id(&pool, ad.id).await.unwrap().unwrap();
    assert_eq!(found.status, "inactive");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_the_row(pool: PgPool) {
    let ad = AdRepo::insert(
        &pool,
        &new_ad("header", "active", date(2025, 6, 10), date(2025, 6, 20)),
    )
    .await
    .unwrap();

    assert!(AdRepo::delete(&pool, ad.id).await.unwrap());
    assert!(AdRepo::find_by_id(&pool, ad.id).await.unwrap().is_none());
    assert!(!AdRepo::delete(&pool, ad.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn clicks_increment_monotonically(pool: PgPool) {
    let ad = AdRepo::insert(
        &pool,
        &new_ad("article", "active", date(2025, 6, 10), date(2025, 6, 20)),
    )
    .await
    .unwrap();

    assert_eq!(AdRepo::increment_clicks(&pool, ad.id).await.unwrap(), Some(1));
    assert_eq!(AdRepo::increment_clicks(&pool, ad.id).await.unwrap(), Some(2));

    let missing = uuid::Uuid::new_v4();
    assert_eq!(AdRepo::increment_clicks(&pool, missing).await.unwrap(), None);
}
