//! Desktop clock widget
//!
//! Formats wall-clock time for the top bar as `"Mon Jan 5 3:07 PM"`, or just
//! the time or the date part. Hours are 12-hour without padding; midnight
//! hour shows as `0`.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Weekday, month and unpadded date, e.g. `Mon Jan 5`
const DATE_FORMAT: &str = "%a %b %-d";

/// How often the clock text is recomputed
pub const TICK_INTERVAL: Duration = Duration::from_secs(10);

/// Which parts of the timestamp the clock shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockFormat {
    /// Day, month, date and time
    #[default]
    Full,
    /// Time only
    #[serde(rename = "time")]
    TimeOnly,
    /// Day, month and date only
    #[serde(rename = "day")]
    DayOnly,
}

/// Formats `time` in the given mode
#[must_use]
pub fn format_clock(time: &NaiveDateTime, format: ClockFormat) -> String {
    let date = time.format(DATE_FORMAT);

    // Not %-I: the midnight hour stays 0
    let mut hour = time.hour();
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    if hour > 12 {
        hour -= 12;
    }
    let minute = time.minute();

    match format {
        ClockFormat::TimeOnly => format!("{hour}:{minute:02} {meridiem}"),
        ClockFormat::DayOnly => date.to_string(),
        ClockFormat::Full => format!("{date} {hour}:{minute:02} {meridiem}"),
    }
}

/// Source of the current local time
pub trait TimeSource {
    /// Current wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// The system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A frozen time, for tests and reproducible output
#[derive(Debug, Clone, Copy)]
pub struct FixedTime(pub NaiveDateTime);

impl TimeSource for FixedTime {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Clock text that refreshes on a fixed interval
#[derive(Debug, Clone)]
pub struct ClockWidget<T: TimeSource = LocalTime> {
    source: T,
    format: ClockFormat,
    text: String,
}

impl ClockWidget {
    /// How often the text is recomputed
    pub const TICK_INTERVAL: Duration = TICK_INTERVAL;

    /// Creates a clock reading the local time
    #[must_use]
    pub fn new(format: ClockFormat) -> Self {
        Self::with_source(LocalTime, format)
    }
}

impl<T: TimeSource> ClockWidget<T> {
    /// Creates a clock reading from `source`, formatted immediately
    #[must_use]
    pub fn with_source(source: T, format: ClockFormat) -> Self {
        let text = format_clock(&source.now(), format);
        Self {
            source,
            format,
            text,
        }
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Active format
    #[must_use]
    pub fn format(&self) -> ClockFormat {
        self.format
    }

    /// Switches format and recomputes the text
    pub fn set_format(&mut self, format: ClockFormat) {
        self.format = format;
        self.refresh();
    }

    /// Recomputes the text from the time source
    pub fn refresh(&mut self) -> &str {
        self.text = format_clock(&self.source.now(), self.format);
        &self.text
    }

    /// Whether a refresh is due after `elapsed` since the last one
    #[must_use]
    pub fn due(&self, elapsed: Duration) -> bool {
        elapsed >= TICK_INTERVAL
    }

    /// Time left until the next refresh
    #[must_use]
    pub fn until_next_tick(&self, elapsed: Duration) -> Duration {
        TICK_INTERVAL.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .unwrap()
    }

    #[test]
    fn test_full_format() {
        // 2026-01-05 is a Monday
        let t = at(2026, 1, 5, 15, 7);
        assert_eq!(format_clock(&t, ClockFormat::Full), "Mon Jan 5 3:07 PM");
    }

    #[test]
    fn test_time_only() {
        let t = at(2026, 1, 5, 9, 30);
        assert_eq!(format_clock(&t, ClockFormat::TimeOnly), "9:30 AM");
    }

    #[test]
    fn test_day_only() {
        let t = at(2026, 10, 18, 23, 59);
        assert_eq!(format_clock(&t, ClockFormat::DayOnly), "Sun Oct 18");
    }

    #[test]
    fn test_two_digit_date_and_year_end() {
        let t = at(2026, 12, 31, 18, 45);
        assert_eq!(format_clock(&t, ClockFormat::Full), "Thu Dec 31 6:45 PM");
    }

    #[test]
    fn test_noon_is_pm() {
        let t = at(2026, 1, 5, 12, 0);
        assert_eq!(format_clock(&t, ClockFormat::TimeOnly), "12:00 PM");
    }

    #[test]
    fn test_midnight_hour_is_zero() {
        let t = at(2026, 1, 5, 0, 5);
        assert_eq!(format_clock(&t, ClockFormat::TimeOnly), "0:05 AM");
    }

    #[test]
    fn test_format_serde_names() {
        let json = serde_json::to_string(&ClockFormat::TimeOnly).unwrap();
        assert_eq!(json, "\"time\"");
        let parsed: ClockFormat = serde_json::from_str("\"day\"").unwrap();
        assert_eq!(parsed, ClockFormat::DayOnly);
        let parsed: ClockFormat = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(parsed, ClockFormat::Full);
    }

    #[test]
    fn test_widget_formats_on_creation() {
        let clock = ClockWidget::with_source(FixedTime(at(2026, 1, 5, 15, 7)), ClockFormat::Full);
        assert_eq!(clock.text(), "Mon Jan 5 3:07 PM");
    }

    #[test]
    fn test_widget_set_format() {
        let mut clock =
            ClockWidget::with_source(FixedTime(at(2026, 1, 5, 15, 7)), ClockFormat::Full);
        clock.set_format(ClockFormat::TimeOnly);
        assert_eq!(clock.text(), "3:07 PM");
        assert_eq!(clock.format(), ClockFormat::TimeOnly);
    }

    #[test]
    fn test_tick_schedule() {
        let clock = ClockWidget::with_source(FixedTime(at(2026, 1, 5, 0, 0)), ClockFormat::Full);
        assert!(!clock.due(Duration::from_secs(9)));
        assert!(clock.due(Duration::from_secs(10)));
        assert_eq!(clock.until_next_tick(Duration::from_secs(4)), Duration::from_secs(6));
        assert_eq!(clock.until_next_tick(Duration::from_secs(30)), Duration::ZERO);
    }

    #[test]
    fn test_local_clock_is_not_empty() {
        let mut clock = ClockWidget::new(ClockFormat::DayOnly);
        assert!(!clock.refresh().is_empty());
        assert_eq!(ClockWidget::TICK_INTERVAL, Duration::from_secs(10));
    }
}
