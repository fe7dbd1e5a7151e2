//! Daily deactivation of ads whose end date has passed.
//!
//! Runs shortly after local midnight. The comparison is between calendar
//! dates, not instants: an ad ending today is deactivated by tonight's run.
//! Failures on individual ads are logged and do not stop the batch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, Utc};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use presswire_core::clock::Clock;
use presswire_core::schedule::AdStatus;
use presswire_db::repositories::AdRepo;

/// Local hour and minute the sweep fires at (00:01).
const SWEEP_HOUR: u32 = 0;
const SWEEP_MINUTE: u32 = 1;

/// Batch size for the sweep's full listing.
const SWEEP_LIMIT: i64 = 1000;

fn sweep_time() -> NaiveTime {
    NaiveTime::from_hms_opt(SWEEP_HOUR, SWEEP_MINUTE, 0).expect("valid sweep time")
}

/// Upper bound on one sweep's store calls.
const SWEEP_TIMEOUT: Duration = Duration::from_secs(30);

/// Run the ad expiry loop until `cancel` is triggered.
pub async fn run(pool: PgPool, clock: Arc<dyn Clock>, cancel: CancellationToken) {
    tracing::info!(at = %sweep_time(), "Ad expiry job started");

    loop {
        let wait = until_next_sweep(clock.now());
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Ad expiry job stopping");
                break;
            }
            _ = tokio::time::sleep(wait) => {
                sweep_once(&pool, clock.as_ref()).await;
            }
        }
    }
}

/// One bounded sweep. Separate from [`run`] so tests can invoke it without
/// waiting for midnight.
pub async fn sweep_once(pool: &PgPool, clock: &dyn Clock) {
    let today = clock.today();
    match tokio::time::timeout(SWEEP_TIMEOUT, deactivate_expired(pool, today)).await {
        Ok(Ok(deactivated)) => {
            if deactivated > 0 {
                tracing::info!(deactivated, "Ad expiry sweep finished");
            } else {
                tracing::debug!("Ad expiry sweep: nothing to deactivate");
            }
        }
        Ok(Err(err)) => {
            tracing::error!(error = %err, "Ad expiry sweep failed");
        }
        Err(_) => {
            tracing::error!(timeout_secs = SWEEP_TIMEOUT.as_secs(), "Ad expiry sweep timed out");
        }
    }
}

/// Deactivate every ad whose end date has passed, comparing calendar dates.
///
/// A failure deactivating one ad is logged and does not stop the rest of
/// the batch. Returns how many ads were deactivated.
pub async fn deactivate_expired(
    pool: &PgPool,
    today: chrono::NaiveDate,
) -> Result<u64, sqlx::Error> {
    let ads = AdRepo::list_all(pool, SWEEP_LIMIT).await?;

    let mut deactivated = 0;
    for ad in ads {
        if ad.status != AdStatus::Active.as_str() || ad.end_date > today {
            continue;
        }
        match AdRepo::deactivate(pool, ad.id).await {
            Ok(true) => {
                deactivated += 1;
                tracing::info!(ad_id = %ad.id, end_date = %ad.end_date, "Deactivated expired ad");
            }
            Ok(false) => {}
            Err(err) => {
                tracing::error!(ad_id = %ad.id, error = %err, "Failed to deactivate expired ad");
            }
        }
    }
    Ok(deactivated)
}

/// Time until the next local 00:01.
fn until_next_sweep(now: DateTime<Utc>) -> Duration {
    let local = now.with_timezone(&Local);
    let today_run = local.date_naive().and_time(sweep_time());
    let next = if local.naive_local() < today_run {
        today_run
    } else {
        (local.date_naive() + chrono::Days::new(1)).and_time(sweep_time())
    };

    match next.and_local_timezone(Local).earliest() {
        Some(next_local) => (next_local - local)
            .to_std()
            .unwrap_or(Duration::from_secs(60)),
        // A DST gap swallowed 00:01; try again in an hour.
        None => Duration::from_secs(3600),
    }
}
