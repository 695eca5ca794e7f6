//! Calendar-day helpers for the "added today" and progress statistics.
//!
//! Days are learner-local: boundaries are computed in a caller-supplied time
//! zone (the server uses `chrono::Local`) and converted to UTC instants for
//! comparison against `date_added`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// UTC instant at which `day` begins in `tz`.
///
/// When local midnight does not exist (a DST gap), the first valid instant
/// within the following hour is used.
pub fn day_start<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Exclusive upper bound of `day` in `tz`: entries strictly before this
/// instant were added on or before that day.
pub fn day_end_exclusive<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    day_start(tz, day + Duration::days(1))
}

/// The trailing `days` calendar days ending with `today`, oldest first.
pub fn trailing_days(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..i64::from(days))
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}

/// Wire label for a calendar day.
pub fn day_label(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_start_in_utc() {
        let start = day_start(&Utc, date(2026, 3, 10));
        assert_eq!(start.to_rfc3339(), "2026-03-10T00:00:00+00:00");
    }

    #[test]
    fn test_day_start_shifts_with_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = day_start(&plus_two, date(2026, 3, 10));
        assert_eq!(start.to_rfc3339(), "2026-03-09T22:00:00+00:00");
    }

    #[test]
    fn test_day_end_is_next_midnight() {
        let end = day_end_exclusive(&Utc, date(2026, 12, 31));
        assert_eq!(end.to_rfc3339(), "2027-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_trailing_days_oldest_first_including_today() {
        let days = trailing_days(date(2026, 3, 2), 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2026, 2, 24));
        assert_eq!(days[6], date(2026, 3, 2));
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_trailing_days_zero() {
        assert!(trailing_days(date(2026, 3, 2), 0).is_empty());
    }

    #[test]
    fn test_day_label_format() {
        assert_eq!(day_label(date(2026, 1, 5)), "2026-01-05");
    }
}
