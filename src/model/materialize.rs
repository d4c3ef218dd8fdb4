// File: ./src/model/materialize.rs
use crate::model::event::{Event, EventKind, IndicatorToken};
use crate::zone::ScheduleZone;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

pub const DATE_FORMAT: &str = "%m/%d/%Y";

const MAIN_SHIFT_HOURS: i64 = 8;
const LEAVE_HOURS: i64 = 8;
const OT_BLOCK_HOURS: i64 = 2;

/// Why a paired indicator produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    InvalidHour(u32),
    /// Shaped like a date but not a real one (e.g. `02/30/2024`).
    InvalidDate(String),
    /// The zone could not place the wall-clock time.
    Unplaceable(NaiveDateTime),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidHour(h) => write!(f, "hour {} is outside 0-23", h),
            Rejection::InvalidDate(d) => write!(f, "'{}' is not a calendar date", d),
            Rejection::Unplaceable(n) => write!(f, "{} cannot be placed in the schedule zone", n),
        }
    }
}

/// Turns a paired (date, indicator) into zero, one or two events.
///
/// Times are computed on the wall clock and each endpoint is localized on
/// its own, so an 8 hour shift always ends 8 clock-hours after it starts.
pub fn materialize(
    date: &str,
    indicator: &IndicatorToken,
    zone: &ScheduleZone,
) -> Result<Vec<Event>, Rejection> {
    let Some(hour) = indicator.hour() else {
        // RDO
        return Ok(Vec::new());
    };
    if hour > 23 {
        return Err(Rejection::InvalidHour(hour));
    }
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| Rejection::InvalidDate(date.to_string()))?;
    let base = day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default());

    let block = |start: NaiveDateTime,
                 hours: i64,
                 kind: EventKind,
                 summary: String|
     -> Result<Event, Rejection> {
        let end = start + Duration::hours(hours);
        Ok(Event {
            date: date.to_string(),
            start: zone.localize(start).ok_or(Rejection::Unplaceable(start))?,
            end: zone.localize(end).ok_or(Rejection::Unplaceable(end))?,
            is_overtime: kind == EventKind::Overtime,
            summary,
            kind,
        })
    };

    match *indicator {
        IndicatorToken::WorkShift {
            duration, overtime, ..
        } => {
            let summary = format!(
                "Work Shift ({}hr){}",
                duration,
                if overtime { " (OT)" } else { "" }
            );
            let kind = if overtime {
                EventKind::Overtime
            } else {
                EventKind::Shift
            };
            Ok(vec![block(base, duration.into(), kind, summary)?])
        }
        IndicatorToken::AnnualLeave { .. } => Ok(vec![block(
            base,
            LEAVE_HOURS,
            EventKind::Leave,
            "Annual Leave".to_string(),
        )?]),
        IndicatorToken::AtOrAfterOvertime { .. } => {
            let main_end = base + Duration::hours(MAIN_SHIFT_HOURS);
            Ok(vec![
                block(
                    base,
                    MAIN_SHIFT_HOURS,
                    EventKind::Shift,
                    "Work Shift (8hr) (AOA)".to_string(),
                )?,
                block(
                    main_end,
                    OT_BLOCK_HOURS,
                    EventKind::Overtime,
                    "Overtime (AOA)".to_string(),
                )?,
            ])
        }
        IndicatorToken::AtOrBeforeOvertime { .. } => {
            let ot_start = base - Duration::hours(OT_BLOCK_HOURS);
            Ok(vec![
                block(
                    ot_start,
                    OT_BLOCK_HOURS,
                    EventKind::Overtime,
                    "Overtime (AOB)".to_string(),
                )?,
                block(
                    base,
                    MAIN_SHIFT_HOURS,
                    EventKind::Shift,
                    "Work Shift (8hr) (AOB)".to_string(),
                )?,
            ])
        }
        IndicatorToken::RestDayOff => Ok(Vec::new()),
    }
}
