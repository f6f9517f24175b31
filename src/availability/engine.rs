//! Open/closed computation for the availability badge.

use crate::availability::schedule::{format_minutes, WeeklySchedule, MINUTES_PER_DAY};
use crate::i18n::Translator;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use std::sync::Arc;

/// How far ahead to look for the next opening, in days (today included).
const NEXT_OPEN_LOOKUP_LIMIT: u8 = 7;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Wall-clock position in the business timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSnapshot {
    /// 0 = Sunday .. 6 = Saturday
    pub day_index: u8,
    /// 0..=1439
    pub minutes: u16,
}

impl TimeSnapshot {
    /// Out-of-range input wraps: days modulo a week, minutes modulo a day.
    pub fn new(day_index: u8, minutes: u16) -> Self {
        Self {
            day_index: day_index % 7,
            minutes: minutes % MINUTES_PER_DAY,
        }
    }

    /// Snapshot of `now` as seen in `tz`, regardless of the host timezone.
    pub fn at<T: TimeZone>(now: DateTime<Utc>, tz: &T) -> Self {
        let local = now.with_timezone(tz);
        Self {
            day_index: local.weekday().num_days_from_sunday() as u8,
            minutes: (local.hour() * 60 + local.minute()) as u16,
        }
    }
}

/// Language-free availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Open {
        closes_at: u16,
    },
    Closed {
        /// Days from today until the next opening (0 = later today)
        offset: u8,
        day_index: u8,
        opens_at: u16,
    },
    /// No opening within a week.
    Unknown,
}

/// What the badge shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityStatus {
    pub is_open: bool,
    pub label: String,
    pub detail: String,
}

/// Decide whether the shop is open and, if not, when it opens next.
pub fn calculate_availability(schedule: &WeeklySchedule, snapshot: TimeSnapshot) -> Availability {
    let TimeSnapshot { day_index, minutes } = snapshot;

    if let Some(today) = schedule.window(day_index as usize) {
        if today.contains(minutes) {
            return Availability::Open {
                closes_at: today.end(),
            };
        }
    }

    for offset in 0..NEXT_OPEN_LOOKUP_LIMIT {
        let next_day = ((day_index as usize + offset as usize) % 7) as u8;
        let Some(window) = schedule.window(next_day as usize) else {
            continue;
        };

        if offset == 0 {
            if minutes >= window.end() {
                continue;
            }
            if minutes >= window.start() {
                // Inside today's window, handled above.
                continue;
            }
        }

        return Availability::Closed {
            offset,
            day_index: next_day,
            opens_at: window.start(),
        };
    }

    Availability::Unknown
}

impl Availability {
    pub fn is_open(&self) -> bool {
        matches!(self, Availability::Open { .. })
    }

    /// Render the badge text with the locale's templates.
    pub fn describe(&self, t: &Translator) -> AvailabilityStatus {
        match *self {
            Availability::Open { closes_at } => AvailabilityStatus {
                is_open: true,
                label: t.translate("home.availability.openNow.label"),
                detail: t.format(
                    "home.availability.openNow.detail",
                    &[("time", &format_minutes(closes_at))],
                ),
            },
            Availability::Closed {
                offset,
                day_index,
                opens_at,
            } => {
                let time = format_minutes(opens_at);
                let detail = match offset {
                    0 => t.format("home.availability.closed.detailToday", &[("time", &time)]),
                    1 => t.format("home.availability.closed.detailTomorrow", &[("time", &time)]),
                    _ => t.format(
                        "home.availability.closed.detailWeekday",
                        &[
                            ("weekday", &t.weekday_phrase(weekday_from_index(day_index))),
                            ("time", &time),
                        ],
                    ),
                };
                AvailabilityStatus {
                    is_open: false,
                    label: t.translate("home.availability.closed.label"),
                    detail,
                }
            }
            Availability::Unknown => AvailabilityStatus {
                is_open: false,
                label: t.translate("home.availability.unknown.label"),
                detail: t.translate("home.availability.unknown.detail"),
            },
        }
    }
}

fn weekday_from_index(day_index: u8) -> Weekday {
    match day_index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Schedule, timezone and clock bundled for repeated evaluation.
#[derive(Clone)]
pub struct AvailabilityEngine {
    schedule: WeeklySchedule,
    timezone: Tz,
    clock: Arc<dyn Clock>,
}

impl AvailabilityEngine {
    pub fn new(schedule: WeeklySchedule, timezone: Tz, clock: Arc<dyn Clock>) -> Self {
        Self {
            schedule,
            timezone,
            clock,
        }
    }

    pub fn snapshot(&self) -> TimeSnapshot {
        TimeSnapshot::at(self.clock.now(), &self.timezone)
    }

    pub fn availability(&self) -> Availability {
        calculate_availability(&self.schedule, self.snapshot())
    }

    pub fn status(&self, t: &Translator) -> AvailabilityStatus {
        self.availability().describe(t)
    }
}
