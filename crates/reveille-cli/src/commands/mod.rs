pub mod alarm;
pub mod config;
pub mod ring;
pub mod stopwatch;

use chrono::{DateTime, Duration, Local};
use reveille_core::scheduler::Notifier;

/// Notification sink for a headless host: registrations are recorded in
/// the log so the pending set can be reconstructed from it.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn schedule(&mut self, id: &str, fire_at: DateTime<Local>, summary: &str) {
        log::info!("notification scheduled: {id} at {fire_at} ({summary})");
    }

    fn cancel(&mut self, id: &str) {
        log::info!("notification cancelled: {id}");
    }
}

/// Parse `HH:MM` (24-hour) into an `(hour, minute)` pair.
pub fn parse_time(s: &str) -> Result<(u32, u32), String> {
    let (h, m) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid time '{s}', expected HH:MM"))?;
    let hour: u32 = h.parse().map_err(|_| format!("invalid hour '{h}'"))?;
    let minute: u32 = m.parse().map_err(|_| format!("invalid minute '{m}'"))?;
    if hour > 23 || minute > 59 {
        return Err(format!("time '{s}' out of range"));
    }
    Ok((hour, minute))
}

/// Render a duration as `1d 2h 3m 4s`, dropping leading zero units.
pub fn format_interval(interval: Duration) -> String {
    let total = interval.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{seconds}s"));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_accepts_valid_clock_times() {
        assert_eq!(parse_time("07:30"), Ok((7, 30)));
        assert_eq!(parse_time("0:00"), Ok((0, 0)));
        assert_eq!(parse_time("23:59"), Ok((23, 59)));
    }

    #[test]
    fn parse_time_rejects_garbage() {
        assert!(parse_time("730").is_err());
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("ab:cd").is_err());
    }

    #[test]
    fn format_interval_drops_leading_zero_units() {
        assert_eq!(format_interval(Duration::seconds(42)), "42s");
        assert_eq!(format_interval(Duration::seconds(3 * 60 + 4)), "3m 4s");
        assert_eq!(
            format_interval(Duration::seconds(2 * 3600 + 4)),
            "2h 0m 4s"
        );
        assert_eq!(
            format_interval(Duration::seconds(86_400 + 3_600 + 60 + 1)),
            "1d 1h 1m 1s"
        );
    }

    #[test]
    fn format_interval_clamps_negative_to_zero() {
        assert_eq!(format_interval(Duration::seconds(-5)), "0s");
    }
}
