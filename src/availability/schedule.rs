//! Weekly opening hours.

use serde::Serialize;
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid working window {start}..{end}: expected 0 <= start < end <= 1440")]
    InvalidWindow { start: u16, end: u16 },
}

/// Opening time range of one day, in minutes since midnight.
///
/// `start` is inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkingWindow {
    start: u16,
    end: u16,
}

impl WorkingWindow {
    pub fn new(start: u16, end: u16) -> Result<Self, ScheduleError> {
        if start >= end || end > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn contains(&self, minutes: u16) -> bool {
        self.start <= minutes && minutes < self.end
    }
}

/// Mon–Fri 09:00–19:00.
const WEEKDAY_HOURS: WorkingWindow = WorkingWindow {
    start: 9 * 60,
    end: 19 * 60,
};

/// Opening windows indexed by weekday, 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Option<WorkingWindow>; 7],
}

impl WeeklySchedule {
    pub fn new(days: [Option<WorkingWindow>; 7]) -> Self {
        Self { days }
    }

    /// The shop's published hours: weekdays 09:00–19:00, closed on weekends.
    pub fn shop_hours() -> Self {
        Self::new([
            None,
            Some(WEEKDAY_HOURS),
            Some(WEEKDAY_HOURS),
            Some(WEEKDAY_HOURS),
            Some(WEEKDAY_HOURS),
            Some(WEEKDAY_HOURS),
            None,
        ])
    }

    /// The window for a weekday index (taken modulo 7).
    pub fn window(&self, day_index: usize) -> Option<WorkingWindow> {
        self.days[day_index % self.days.len()]
    }

    pub fn is_always_closed(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::shop_hours()
    }
}

/// Minutes since midnight as zero-padded 24-hour `HH:MM`.
pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
