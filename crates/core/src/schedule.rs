//! Ad scheduling: window validation, slot occupancy, overlap shifting and
//! capacity limits.
//!
//! [`place_ad`] is a pure function over an in-memory snapshot of the current
//! ad windows. Callers load the snapshot, run the engine, and persist the
//! returned dates; the engine itself never touches the store.
//!
//! An ad's persisted status is only `active` or `inactive`. Among the
//! active ads, the engine distinguishes two derived buckets by start date:
//! ads already running (start on or before today) and ads scheduled for a
//! future start (tomorrow onward). Both buckets are capacity-limited and
//! hold at most one ad per placement slot.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Maximum number of ads that may be running at once, across all placements.
pub const MAX_ACTIVE_ADS: usize = 4;

/// Maximum number of ads that may be scheduled for a future start.
pub const MAX_SCHEDULED_ADS: usize = 4;

/// Minimum length of an ad window, in days.
pub const MIN_WINDOW_DAYS: i64 = 3;

/// Furthest a start date may lie in the future.
pub const MAX_START_AHEAD_MONTHS: u32 = 12;

/// Furthest an end date may lie in the future.
pub const MAX_END_AHEAD_MONTHS: u32 = 60;

// ---------------------------------------------------------------------------
// Vocabulary types
// ---------------------------------------------------------------------------

/// Page slot an ad is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Header,
    Sidebar,
    Footer,
    Article,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Header => "header",
            Placement::Sidebar => "sidebar",
            Placement::Footer => "footer",
            Placement::Article => "article",
        }
    }
}

impl std::str::FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(Placement::Header),
            "sidebar" => Ok(Placement::Sidebar),
            "footer" => Ok(Placement::Footer),
            "article" => Ok(Placement::Article),
            other => Err(format!("unknown placement: {other}")),
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted ad status as chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Active,
    Inactive,
}

impl AdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdStatus::Active => "active",
            AdStatus::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for AdStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AdStatus::Active),
            "inactive" => Ok(AdStatus::Inactive),
            other => Err(format!("unknown ad status: {other}")),
        }
    }
}

impl std::fmt::Display for AdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket an ad lands in once placed, derived from status and start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdBucket {
    /// Running now: status active, start date on or before today.
    Active,
    /// Waiting for a future start: status active, start date tomorrow onward.
    Scheduled,
    /// Status inactive.
    Inactive,
}

/// Derive the bucket for a status/start pair.
pub fn derive_bucket(status: AdStatus, start_date: NaiveDate, today: NaiveDate) -> AdBucket {
    match status {
        AdStatus::Inactive => AdBucket::Inactive,
        AdStatus::Active if start_date > today => AdBucket::Scheduled,
        AdStatus::Active => AdBucket::Active,
    }
}

// ---------------------------------------------------------------------------
// Engine inputs / outputs
// ---------------------------------------------------------------------------

/// The ad being created or updated, reduced to its scheduling fields.
#[derive(Debug, Clone)]
pub struct AdCandidate {
    pub placement: Placement,
    pub status: AdStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// An existing ad's slot occupancy, one entry per snapshot row.
#[derive(Debug, Clone)]
pub struct AdWindow {
    pub id: DbId,
    pub placement: Placement,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The candidate's own stored record, present when updating.
///
/// Its id is excluded from both snapshots before any check runs, and its
/// stored start date enables the unchanged-start exception for ads whose
/// window has already begun.
#[derive(Debug, Clone, Copy)]
pub struct PriorAd {
    pub id: DbId,
    pub start_date: NaiveDate,
}

/// A successfully placed schedule, possibly shifted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedSchedule {
    /// Final start date (equal to the requested one unless shifted).
    pub start_date: NaiveDate,
    /// Final end date; the requested duration is preserved across a shift.
    pub end_date: NaiveDate,
    /// Bucket the ad lands in, for the caller's view refresh.
    pub bucket: AdBucket,
    /// True when the window was moved to resolve an overlap. Callers must
    /// surface this to the user: the dates they asked for are not the dates
    /// that were committed.
    pub dates_adjusted: bool,
}

/// Why a candidate was rejected. One variant per rule so the HTTP layer can
/// translate each into its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("The start date must be before the end date.")]
    StartAfterEnd,
    #[error("The start date must not be in the past.")]
    StartInPast,
    #[error("The end date must not be in the past.")]
    EndInPast,
    #[error("The start date cannot be more than a year ahead.")]
    StartTooFarAhead,
    #[error("An ad must run for at least {MIN_WINDOW_DAYS} days.")]
    WindowTooShort,
    #[error("The end date cannot be more than 5 years ahead.")]
    EndTooFarAhead,
    #[error("A scheduled ad already occupies this placement.")]
    ScheduledSlotTaken,
    #[error("An active ad already occupies this placement today.")]
    ActiveSlotTaken,
    #[error("No more than {MAX_ACTIVE_ADS} ads can be active at once.")]
    ActiveCapacityReached,
    #[error("No more than {MAX_SCHEDULED_ADS} ads can be scheduled at once.")]
    ScheduledCapacityReached,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Validate and place a candidate ad against the current snapshot.
///
/// `active` and `scheduled` are the derived-active and derived-scheduled
/// windows currently in the store. `today` is the local calendar date as
/// seen by the caller's clock. `prior` is the candidate's own stored record
/// when this is an update.
///
/// Checks run in a fixed order and short-circuit on the first failure:
/// date ordering, past/future limits, minimum window length, slot occupancy
/// (same-day active conflicts and scheduled-slot conflicts are rejected),
/// overlap resolution (a conflict with an already-running ad shifts the
/// candidate's window past the latest-ending conflict, preserving the
/// requested duration), then bucket capacity. Capacity counts the snapshot
/// as loaded; a shift does not re-read it.
pub fn place_ad(
    candidate: &AdCandidate,
    active: &[AdWindow],
    scheduled: &[AdWindow],
    today: NaiveDate,
    prior: Option<&PriorAd>,
) -> Result<PlacedSchedule, ScheduleError> {
    let tomorrow = today + Days::new(1);

    // On update the ad must not conflict with itself.
    let own_id = prior.map(|p| p.id);
    let active: Vec<&AdWindow> = active.iter().filter(|w| Some(w.id) != own_id).collect();
    let scheduled: Vec<&AdWindow> = scheduled.iter().filter(|w| Some(w.id) != own_id).collect();

    let mut start = candidate.start_date;
    let mut end = candidate.end_date;

    if start > end {
        return Err(ScheduleError::StartAfterEnd);
    }

    if start < today {
        // An ad whose window has naturally begun may keep its stored start
        // date on update; any other past start is rejected.
        let unchanged = prior.is_some_and(|p| p.start_date == start);
        if !unchanged {
            return Err(ScheduleError::StartInPast);
        }
    }

    if end < today {
        return Err(ScheduleError::EndInPast);
    }

    if start > today + Months::new(MAX_START_AHEAD_MONTHS) {
        return Err(ScheduleError::StartTooFarAhead);
    }

    if (end - start).num_days() < MIN_WINDOW_DAYS {
        return Err(ScheduleError::WindowTooShort);
    }

    if end > today + Months::new(MAX_END_AHEAD_MONTHS) {
        return Err(ScheduleError::EndTooFarAhead);
    }

    let mut dates_adjusted = false;

    if candidate.status == AdStatus::Active {
        if start >= tomorrow {
            // Scheduled candidate: one scheduled ad per placement.
            if scheduled.iter().any(|w| w.placement == candidate.placement) {
                return Err(ScheduleError::ScheduledSlotTaken);
            }
        } else if active
            .iter()
            .any(|w| w.placement == candidate.placement && w.start_date == today)
        {
            // Two ads starting today in the same slot cannot be reordered by
            // shifting; the second one is rejected outright.
            return Err(ScheduleError::ActiveSlotTaken);
        }

        // Overlap with an already-running ad in the same slot is resolved by
        // moving the candidate past the latest-ending conflict. Shifting past
        // the latest (not merely the first) conflict guarantees the shifted
        // window overlaps none of them.
        let latest_conflict_end = active
            .iter()
            .filter(|w| w.placement == candidate.placement && w.end_date > start)
            .map(|w| w.end_date)
            .max();

        if let Some(conflict_end) = latest_conflict_end {
            let duration = end - start;
            start = conflict_end + Days::new(1);
            end = start + duration;
            dates_adjusted = true;
        }
    }

    let bucket = derive_bucket(candidate.status, start, today);
    match bucket {
        AdBucket::Active if active.len() >= MAX_ACTIVE_ADS => {
            return Err(ScheduleError::ActiveCapacityReached);
        }
        AdBucket::Scheduled if scheduled.len() >= MAX_SCHEDULED_ADS => {
            return Err(ScheduleError::ScheduledCapacityReached);
        }
        _ => {}
    }

    Ok(PlacedSchedule {
        start_date: start,
        end_date: end,
        bucket,
        dates_adjusted,
    })
}
