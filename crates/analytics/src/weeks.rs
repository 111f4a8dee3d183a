use chrono::{Datelike, Duration, NaiveDate};
use core_types::{DayRecord, Headline, WeekLog};
use std::collections::BTreeMap;

/// Returns the Monday on or before `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Rolls day records up into Monday-based weeks, newest week first.
///
/// The store makes no ordering promise, so days are sorted here. Within a
/// week they are ordered by date and the headline is summed in that order.
/// A day whose figures would overflow its week totals is left out with a warning.
pub fn build_week_logs(days: &[DayRecord]) -> Vec<WeekLog> {
    let mut by_week: BTreeMap<NaiveDate, Vec<&DayRecord>> = BTreeMap::new();
    for day in days {
        by_week.entry(week_start_of(day.date)).or_default().push(day);
    }

    by_week
        .into_iter()
        .rev()
        .map(|(start, mut week_days)| {
            week_days.sort_by_key(|d| d.date);
            let mut headline = Headline::default();
            let mut kept = Vec::with_capacity(week_days.len());
            for day in week_days {
                match headline.checked_add(&day.analysis.headline()) {
                    Some(total) => {
                        headline = total;
                        kept.push(day.clone());
                    }
                    None => tracing::warn!(date = %day.date, "Skipping day that overflows its week totals."),
                }
            }
            WeekLog {
                week_start: start.format("%Y-%m-%d").to_string(),
                days: kept,
                week_headline: headline,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AnalysisRecord;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32, pnl: Decimal, wins: u32, losses: u32) -> DayRecord {
        let analysis = AnalysisRecord {
            total_pnl: pnl,
            total_trades: wins + losses,
            wins,
            losses,
            ..AnalysisRecord::default()
        };
        DayRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), analysis)
    }

    #[test]
    fn monday_anchors_the_week() {
        let sunday = NaiveDate::from_ymd_opt(2024, 2, 18).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
        assert_eq!(week_start_of(sunday), monday);
        assert_eq!(week_start_of(monday), monday);
    }

    #[test]
    fn days_roll_up_into_weeks_newest_first() {
        let days = vec![
            day(2024, 2, 14, dec!(-20), 1, 2),
            day(2024, 2, 20, dec!(75), 3, 0),
            day(2024, 2, 12, dec!(100), 4, 1),
            day(2024, 2, 18, dec!(5), 1, 0),
        ];
        let weeks = build_week_logs(&days);
        assert_eq!(weeks.len(), 2);

        assert_eq!(weeks[0].week_start, "2024-02-19");
        assert_eq!(weeks[0].days.len(), 1);

        let earlier = &weeks[1];
        assert_eq!(earlier.week_start, "2024-02-12");
        let dates: Vec<u32> = earlier.days.iter().map(|d| d.date.day()).collect();
        assert_eq!(dates, vec![12, 14, 18]);
        assert_eq!(
            earlier.week_headline,
            Headline { total_pnl: dec!(85), total_trades: 9, wins: 6, losses: 3 }
        );
    }

    #[test]
    fn week_spanning_a_year_end_keeps_its_monday() {
        let weeks = build_week_logs(&[day(2025, 1, 2, dec!(1), 1, 0)]);
        assert_eq!(weeks[0].week_start, "2024-12-30");
    }

    #[test]
    fn no_days_means_no_weeks() {
        assert!(build_week_logs(&[]).is_empty());
    }

    #[test]
    fn day_overflowing_its_week_is_left_out() {
        let mut heavy = day(2024, 3, 5, dec!(1), 0, 0);
        heavy.analysis.total_trades = 4_000_000_000;
        let mut heavier = day(2024, 3, 6, dec!(2), 0, 0);
        heavier.analysis.total_trades = 4_000_000_000;

        let weeks = build_week_logs(&[heavy, heavier]);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].days.len(), 1);
        assert_eq!(weeks[0].days[0].date.day(), 5);
        assert_eq!(weeks[0].week_headline.total_trades, 4_000_000_000);
    }
}
