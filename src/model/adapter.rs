// File: src/model/adapter.rs
use crate::model::event::Event;
use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component};
use uuid::Uuid;

pub const DEFAULT_EVENT_TAG: &str = "#postwmt";
pub const DEFAULT_CALENDAR_NAME: &str = "Work Schedule";

#[derive(Debug, Clone)]
pub struct IcsOptions {
    pub calendar_name: String,
    /// Marker written into every DESCRIPTION so later imports can find and
    /// replace events created by an earlier run.
    pub tag: String,
}

impl Default for IcsOptions {
    fn default() -> Self {
        Self {
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            tag: DEFAULT_EVENT_TAG.to_string(),
        }
    }
}

fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

impl Event {
    /// Builds the VEVENT for this event, or `None` if its interval is empty
    /// or inverted.
    pub fn to_ical_event(&self, tag: &str) -> Option<icalendar::Event> {
        if self.start >= self.end {
            return None;
        }

        let mut ev = icalendar::Event::new();
        ev.uid(&Uuid::new_v4().to_string());
        ev.summary(&self.summary);
        ev.timestamp(Utc::now());
        ev.add_property("DTSTART", format_utc(self.start.with_timezone(&Utc)));
        ev.add_property("DTEND", format_utc(self.end.with_timezone(&Utc)));
        ev.description(&format!("{} {}", tag, self.date));
        if self.is_overtime {
            ev.add_property("CATEGORIES", "OVERTIME");
        }
        Some(ev.done())
    }
}

/// Serializes events into a complete VCALENDAR document.
///
/// Events whose end does not come after their start are skipped with a
/// warning instead of producing an invalid calendar.
pub fn to_ics_string(events: &[Event], options: &IcsOptions) -> String {
    let mut calendar = Calendar::new();
    calendar.name(&options.calendar_name);

    let mut skipped = 0;
    for event in events {
        match event.to_ical_event(&options.tag) {
            Some(ev) => {
                calendar.push(ev);
            }
            None => {
                skipped += 1;
                log::warn!(
                    "Event '{}' on {} has an empty time range. Skipping.",
                    event.summary,
                    event.date
                );
            }
        }
    }
    if skipped > 0 {
        log::warn!("Skipped {} of {} events during ICS export", skipped, events.len());
    }

    calendar.to_string()
}
