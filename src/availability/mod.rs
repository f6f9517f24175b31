//! Opening hours and the live "open now" status.
//!
//! - `schedule`: weekly working windows and `HH:MM` formatting
//! - `engine`: timezone-aware open/closed computation and its localized text
//! - `ticker`: cancellable repeating task driving the refresh
//!
//! [`AvailabilityBoard`] ties them together: it recomputes the status for
//! every locale on a fixed period and publishes the result through a `watch`
//! channel, so readers always see one complete set of statuses.

mod engine;
mod schedule;
mod ticker;

pub use engine::{
    calculate_availability, Availability, AvailabilityEngine, AvailabilityStatus, Clock,
    FixedClock, SystemClock, TimeSnapshot,
};
pub use schedule::{format_minutes, ScheduleError, WeeklySchedule, WorkingWindow, MINUTES_PER_DAY};
pub use ticker::RefreshTicker;

use crate::i18n::{DictionaryStore, Locale};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

type StatusMap = Arc<HashMap<Locale, AvailabilityStatus>>;

/// Latest availability status per locale, refreshed in the background.
pub struct AvailabilityBoard {
    engine: AvailabilityEngine,
    dictionaries: Arc<DictionaryStore>,
    statuses: watch::Receiver<StatusMap>,
    _ticker: RefreshTicker,
}

impl AvailabilityBoard {
    /// Compute the statuses now and keep them fresh every `period`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(
        engine: AvailabilityEngine,
        dictionaries: Arc<DictionaryStore>,
        period: Duration,
    ) -> Self {
        let (tx, statuses) = watch::channel(compute_all(&engine, &dictionaries));

        let ticker_engine = engine.clone();
        let ticker_dictionaries = Arc::clone(&dictionaries);
        let ticker = RefreshTicker::spawn(period, move || {
            let next = compute_all(&ticker_engine, &ticker_dictionaries);
            debug!("Availability refreshed ({} locales)", next.len());
            tx.send_replace(next);
        });

        Self {
            engine,
            dictionaries,
            statuses,
            _ticker: ticker,
        }
    }

    /// The most recently published status for a locale.
    pub fn status(&self, locale: Locale) -> AvailabilityStatus {
        let published = self.statuses.borrow().get(&locale).cloned();
        published.unwrap_or_else(|| {
            self.engine
                .status(&self.dictionaries.translator(locale))
        })
    }

    /// A receiver that observes every refresh.
    pub fn subscribe(&self) -> watch::Receiver<StatusMap> {
        self.statuses.clone()
    }
}

fn compute_all(engine: &AvailabilityEngine, dictionaries: &DictionaryStore) -> StatusMap {
    let availability = engine.availability();
    Arc::new(
        Locale::all()
            .into_iter()
            .map(|locale| (locale, availability.describe(&dictionaries.translator(locale))))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn board_at(hour: u32) -> AvailabilityBoard {
        // 2024-07-03 is a Wednesday.
        let now = Utc.with_ymd_and_hms(2024, 7, 3, hour, 0, 0).unwrap();
        let engine = AvailabilityEngine::new(
            WeeklySchedule::shop_hours(),
            chrono_tz::Europe::Prague,
            Arc::new(FixedClock(now)),
        );
        AvailabilityBoard::start(
            engine,
            Arc::new(DictionaryStore::embedded()),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_board_publishes_every_locale() {
        let board = board_at(8);
        let statuses = board.subscribe().borrow().clone();
        assert_eq!(statuses.len(), 5);
        for locale in Locale::all() {
            assert!(board.status(locale).is_open);
        }
    }

    #[tokio::test]
    async fn test_board_status_is_localized() {
        let board = board_at(18);
        let en = board.status(Locale::EN);
        let de = board.status(Locale::DE);
        assert!(!en.is_open);
        assert_eq!(en.detail, "opens tomorrow at 09:00");
        assert_ne!(en.label, de.label);
    }
}
