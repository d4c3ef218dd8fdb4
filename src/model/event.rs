// File: ./src/model/event.rs
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// A document line as seen by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Zero-indexed position in the input.
    pub number: usize,
    pub raw: &'a str,
    pub trimmed: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, raw: &'a str) -> Self {
        Self {
            number,
            raw,
            trimmed: raw.trim(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }
}

/// A `MM/DD/YYYY` substring lifted out of a date line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken(pub String);

impl DateToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DateToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hours are kept as written; range checking happens when the token is
/// materialized so an out-of-range hour still counts as "indicator found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorToken {
    WorkShift {
        start_hour: u32,
        duration: u32,
        overtime: bool,
    },
    RestDayOff,
    AnnualLeave {
        start_hour: u32,
    },
    AtOrAfterOvertime {
        main_start_hour: u32,
    },
    AtOrBeforeOvertime {
        main_start_hour: u32,
    },
}

impl IndicatorToken {
    /// The hour this indicator anchors on, if any.
    pub fn hour(&self) -> Option<u32> {
        match self {
            Self::WorkShift { start_hour, .. } => Some(*start_hour),
            Self::RestDayOff => None,
            Self::AnnualLeave { start_hour } => Some(*start_hour),
            Self::AtOrAfterOvertime { main_start_hour }
            | Self::AtOrBeforeOvertime { main_start_hour } => Some(*main_start_hour),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WorkShift { .. } => "Work shift",
            Self::RestDayOff => "RDO",
            Self::AnnualLeave { .. } => "Annual Leave",
            Self::AtOrAfterOvertime { .. } => "AOA",
            Self::AtOrBeforeOvertime { .. } => "AOB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum EventKind {
    Shift,
    Overtime,
    Leave,
}

/// A materialized calendar block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The date string this event was paired from, as written in the input.
    pub date: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub is_overtime: bool,
    pub summary: String,
    pub kind: EventKind,
}

impl Event {
    pub fn duration_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }
}
