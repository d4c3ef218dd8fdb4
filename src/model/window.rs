// File: src/model/window.rs
use crate::model::event::Event;
use crate::zone::ScheduleZone;
use chrono::{DateTime, Days, FixedOffset};
use serde::Serialize;

/// The time range a calendar sync clears before inserting a fresh batch:
/// from midnight of the earliest start to midnight after the latest end,
/// both in the schedule zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl SyncWindow {
    pub fn covering(events: &[Event], zone: &ScheduleZone) -> Option<Self> {
        let first = events.iter().map(|e| e.start).min()?;
        let last = events.iter().map(|e| e.end).max()?;

        let first_day = zone.convert(&first).date_naive();
        let after_last_day = zone
            .convert(&last)
            .date_naive()
            .checked_add_days(Days::new(1))?;

        Some(Self {
            start: zone.midnight(first_day)?,
            end: zone.midnight(after_last_day)?,
        })
    }

    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}
