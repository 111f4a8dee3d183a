use crate::error::AnalyticsError;
use core_types::{Quarter, QuarterData, WeekLog};
use std::collections::BTreeMap;

/// Reads the `(quarter, year)` bucket of a `weekStart` string.
///
/// Year and month are taken from the first two `-`separated components of the
/// string itself. Going through a parsed, zoned date could shift a week that
/// starts on the first of a month into the previous quarter.
pub fn quarter_key(week_start: &str) -> Option<(Quarter, i32)> {
    let mut parts = week_start.split('-');
    let year_part = parts.next()?;
    let month_part = parts.next()?;

    if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if month_part.is_empty() || month_part.len() > 2 || !month_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = year_part.parse().ok()?;
    let month: u32 = month_part.parse().ok()?;
    Some((Quarter::from_month(month)?, year))
}

/// Groups weeks into quarter rollups, newest quarter first.
///
/// Weeks keep their input order inside a bucket and the quarter headline is
/// accumulated in that same order. Weeks whose `weekStart` cannot be read, or
/// whose figures would overflow the quarter totals, are left out with a
/// warning; use `try_group_weeks_by_quarter` to reject them instead.
pub fn group_weeks_by_quarter(weeks: &[WeekLog]) -> Vec<QuarterData> {
    bucket_weeks(weeks, |e| {
        tracing::warn!(error = %e, "Skipping week.");
        Ok(())
    })
    .unwrap_or_default()
}

/// Strict form of `group_weeks_by_quarter`: fails on the first malformed
/// `weekStart` or on the first week that overflows its quarter totals.
pub fn try_group_weeks_by_quarter(weeks: &[WeekLog]) -> Result<Vec<QuarterData>, AnalyticsError> {
    bucket_weeks(weeks, Err)
}

/// `on_reject` decides whether a rejected week aborts the grouping.
fn bucket_weeks<F>(weeks: &[WeekLog], mut on_reject: F) -> Result<Vec<QuarterData>, AnalyticsError>
where
    F: FnMut(AnalyticsError) -> Result<(), AnalyticsError>,
{
    let mut buckets: BTreeMap<(i32, Quarter), QuarterData> = BTreeMap::new();

    for week in weeks {
        let Some((quarter, year)) = quarter_key(&week.week_start) else {
            on_reject(AnalyticsError::MalformedWeek {
                week_start: week.week_start.clone(),
            })?;
            continue;
        };
        let bucket = buckets
            .entry((year, quarter))
            .or_insert_with(|| QuarterData::new(quarter, year));
        if let Err(rejected) = bucket.push_week(week.clone()) {
            on_reject(AnalyticsError::Overflow {
                week_start: rejected.week_start,
            })?;
        }
    }

    // Keys sort by year, then quarter; reversing gives newest first.
    Ok(buckets.into_values().rev().collect())
}
