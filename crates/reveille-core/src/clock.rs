//! Local-calendar arithmetic for alarm scheduling.
//!
//! Thin wrapper over chrono using the device-local timezone at call time.
//! Impossible component combinations abort: they indicate a bug upstream,
//! never a runtime condition worth recovering from.

use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Timelike};

/// Current instant in the local timezone.
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// (year, month, day) in the local calendar.
pub fn ymd(t: DateTime<Local>) -> (i32, u32, u32) {
    (t.year(), t.month(), t.day())
}

/// (hour, minute, second).
pub fn hms(t: DateTime<Local>) -> (u32, u32, u32) {
    (t.hour(), t.minute(), t.second())
}

/// Weekday index with 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(t: DateTime<Local>) -> usize {
    t.weekday().num_days_from_sunday() as usize
}

/// Build a local timestamp from components.
///
/// # Panics
/// Panics when the components do not name a representable local instant
/// (e.g. minute 70, or a wall time skipped by a DST transition).
pub fn create(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .earliest()
        .expect("invalid calendar components")
}

/// `t` shifted by `days` whole days.
pub fn add_days(t: DateTime<Local>, days: i64) -> DateTime<Local> {
    t + Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_extract_roundtrip() {
        let t = create(2021, 6, 7, 8, 0);
        assert_eq!(ymd(t), (2021, 6, 7));
        assert_eq!(hms(t), (8, 0, 0));
    }

    #[test]
    fn weekday_index_is_sunday_based() {
        // 2021-06-06 was a Sunday, 2021-06-12 a Saturday.
        assert_eq!(weekday_index(create(2021, 6, 6, 12, 0)), 0);
        assert_eq!(weekday_index(create(2021, 6, 7, 12, 0)), 1);
        assert_eq!(weekday_index(create(2021, 6, 12, 12, 0)), 6);
    }

    #[test]
    fn add_days_crosses_month_boundary() {
        let t = add_days(create(2021, 6, 30, 7, 30), 1);
        assert_eq!(ymd(t), (2021, 7, 1));
        assert_eq!(hms(t), (7, 30, 0));
    }

    #[test]
    #[should_panic(expected = "invalid calendar components")]
    fn impossible_components_panic() {
        create(2021, 6, 7, 8, 70);
    }
}
