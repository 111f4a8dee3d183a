use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("date pattern is valid"));

/// Scans the text for the first `YYYY-MM-DD` occurrence that names a real
/// calendar day. Impossible dates such as `2024-13-40` are skipped.
pub fn extract_log_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERN.captures_iter(text).find_map(|caps| {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Like `extract_log_date`, falling back to the current UTC date.
pub fn log_date_or_today(text: &str) -> NaiveDate {
    extract_log_date(text).unwrap_or_else(|| {
        let today = Utc::now().date_naive();
        tracing::debug!(%today, "No date found in trading log; using today's UTC date.");
        today
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_date_anywhere_in_text() {
        let text = "Session recap\nexport_2024-02-12.csv generated 2024-02-13";
        assert_eq!(extract_log_date(text), NaiveDate::from_ymd_opt(2024, 2, 12));
    }

    #[test]
    fn skips_impossible_dates() {
        let text = "ref 2024-13-40 then 2024-03-01";
        assert_eq!(extract_log_date(text), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn falls_back_to_today_without_a_date() {
        let before = Utc::now().date_naive();
        let date = log_date_or_today("AAPL pnl=10");
        let after = Utc::now().date_naive();
        assert!(date == before || date == after);
        assert_eq!(extract_log_date("no dates here"), None);
    }
}
