//! Countdown arithmetic shared by the Clock compiler and the live widget.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use slidebar_model::{ClockSetting, TimerType};
use std::fmt;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Parse the admin panel's deadline strings.
///
/// Accepts RFC 3339 and the offset-less forms `YYYY-MM-DDTHH:MM[:SS]`,
/// `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DD`; offset-less values are UTC.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Remaining time broken into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Negative input clamps to zero
    pub fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            days: ms / DAY_MS,
            hours: (ms % DAY_MS) / HOUR_MS,
            minutes: (ms % HOUR_MS) / MINUTE_MS,
            seconds: (ms % MINUTE_MS) / SECOND_MS,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Countdown::default()
    }

    /// Zero-padded `[days, hours, minutes, seconds]`
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// A countdown's schedule, independent of where it is displayed
#[derive(Debug, Clone, PartialEq)]
pub enum TimerSpec {
    /// Fixed deadline
    Normal { deadline: Option<DateTime<Utc>> },
    /// Recurring interval anchored to a creation timestamp
    Repeated {
        created: Option<DateTime<Utc>>,
        interval_ms: i64,
        ends: Option<DateTime<Utc>>,
    },
}

impl TimerSpec {
    pub fn from_setting(setting: &ClockSetting) -> Self {
        match setting.timer_type {
            TimerType::Repeated => TimerSpec::Repeated {
                created: setting
                    .repeated_timer
                    .repeat_timer_create_date
                    .as_deref()
                    .and_then(parse_deadline),
                interval_ms: (setting.repeated_timer.repeated_hours * HOUR_MS as f64) as i64,
                ends: setting
                    .repeated_timer
                    .repeated_time_end
                    .as_deref()
                    .and_then(parse_deadline),
            },
            _ => TimerSpec::Normal {
                deadline: setting.timer.as_deref().and_then(parse_deadline),
            },
        }
    }

    /// Milliseconds left at `now`, never negative
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        match self {
            TimerSpec::Normal { deadline } => deadline
                .map(|deadline| remaining_normal(deadline, now))
                .unwrap_or(0),
            TimerSpec::Repeated {
                created,
                interval_ms,
                ..
            } => created
                .map(|created| remaining_repeated(created, *interval_ms, now))
                .unwrap_or(0),
        }
    }

    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        Countdown::from_millis(self.remaining_ms(now))
    }

    /// Whether the compiler should omit the clock entirely
    pub fn is_retired(&self, remove_timer: bool, now: DateTime<Utc>) -> bool {
        match self {
            TimerSpec::Normal { deadline } => {
                remove_timer && deadline.map(|deadline| deadline < now).unwrap_or(false)
            }
            TimerSpec::Repeated { ends, .. } => ends.map(|ends| ends < now).unwrap_or(false),
        }
    }
}

pub fn remaining_normal(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_milliseconds().max(0)
}

/// `interval - (elapsed mod interval)`
pub fn remaining_repeated(created: DateTime<Utc>, interval_ms: i64, now: DateTime<Utc>) -> i64 {
    if interval_ms <= 0 {
        return 0;
    }
    let elapsed = (now - created).num_milliseconds();
    interval_ms - elapsed.rem_euclid(interval_ms)
}
