// File: src/model/parser.rs
//! Pairs date lines with the indicator line that follows them.
//!
//! The scan is a two-state machine over a single cursor:
//!
//! - `SeekingDate`: skip until a line carries a date, which becomes pending.
//! - `SeekingIndicator`: skip blanks and free text until an indicator line
//!   completes the pair. If another date line shows up first, the pending
//!   date is dropped and the machine switches back *without* advancing, so
//!   that line gets its own chance to pair.
use crate::diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, DiagnosticSink};
use crate::model::classifier::{find_date, match_indicator};
use crate::model::event::{DateToken, Event, IndicatorToken, Line};
use crate::model::materialize::{Rejection, materialize};
use crate::zone::ScheduleZone;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    SeekingDate,
    SeekingIndicator { date: DateToken, since: usize },
}

/// Whether the cursor moves past the current line after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Advance,
    Stay,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub events: Vec<Event>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Parses a pasted schedule into events, in input order.
///
/// Never fails: anything that cannot be used is reported to `sink` and
/// skipped.
pub fn parse_schedule(
    text: &str,
    zone: &ScheduleZone,
    sink: &mut dyn DiagnosticSink,
) -> Vec<Event> {
    log::debug!("Starting schedule parsing (zone: {})", zone);

    let lines: Vec<Line> = text
        .lines()
        .enumerate()
        .map(|(n, raw)| Line::new(n, raw))
        .collect();

    let mut events = Vec::new();
    let mut state = ScanState::SeekingDate;
    let mut cursor = 0;

    while let Some(line) = lines.get(cursor) {
        let (next, step) = transition(state, line, zone, sink, &mut events);
        state = next;
        if step == Cursor::Advance {
            cursor += 1;
        }
    }

    if let ScanState::SeekingIndicator { date, since } = state {
        sink.report(
            Diagnostic::new(
                DiagnosticKind::DateWithoutIndicator,
                "Date found but no indicator followed before end of input",
            )
            .at_line(since)
            .for_date(date.as_str()),
        );
    }

    log::info!("Finished parsing, found {} events", events.len());
    events
}

/// Same as [`parse_schedule`], returning the diagnostics alongside.
pub fn parse_schedule_collect(text: &str, zone: &ScheduleZone) -> ParseOutcome {
    let mut collector = DiagnosticCollector::new();
    let events = parse_schedule(text, zone, &mut collector);
    ParseOutcome {
        events,
        diagnostics: collector.into_inner(),
    }
}

fn transition(
    state: ScanState,
    line: &Line,
    zone: &ScheduleZone,
    sink: &mut dyn DiagnosticSink,
    events: &mut Vec<Event>,
) -> (ScanState, Cursor) {
    if line.is_blank() {
        return (state, Cursor::Advance);
    }

    match state {
        ScanState::SeekingDate => {
            if let Some(date) = find_date(line.trimmed) {
                log::debug!("Parser found date: {} (line {})", date, line.number + 1);
                let since = line.number;
                return (ScanState::SeekingIndicator { date, since }, Cursor::Advance);
            }
            let message = if match_indicator(line.trimmed).is_some() {
                format!("Indicator '{}' has no date before it", line.trimmed)
            } else {
                format!("Skipping '{}'", line.trimmed)
            };
            sink.report(
                Diagnostic::new(DiagnosticKind::UnrecognizedLine, message).at_line(line.number),
            );
            (ScanState::SeekingDate, Cursor::Advance)
        }
        ScanState::SeekingIndicator { date, since } => {
            if let Some(indicator) = match_indicator(line.trimmed) {
                log::debug!(
                    "Parser found indicator line: '{}' for date {}",
                    line.trimmed,
                    date
                );
                pair(&date, &indicator, line, zone, sink, events);
                return (ScanState::SeekingDate, Cursor::Advance);
            }
            if find_date(line.trimmed).is_some() {
                sink.report(
                    Diagnostic::new(
                        DiagnosticKind::DateWithoutIndicator,
                        format!(
                            "Date found but the next date (line {}) came before any indicator",
                            line.number + 1
                        ),
                    )
                    .at_line(since)
                    .for_date(date.as_str()),
                );
                return (ScanState::SeekingDate, Cursor::Stay);
            }
            sink.report(
                Diagnostic::new(
                    DiagnosticKind::UnrecognizedLine,
                    format!("Skipping '{}' while looking for an indicator", line.trimmed),
                )
                .at_line(line.number)
                .for_date(date.as_str()),
            );
            (ScanState::SeekingIndicator { date, since }, Cursor::Advance)
        }
    }
}

fn pair(
    date: &DateToken,
    indicator: &IndicatorToken,
    line: &Line,
    zone: &ScheduleZone,
    sink: &mut dyn DiagnosticSink,
    events: &mut Vec<Event>,
) {
    match materialize(date.as_str(), indicator, zone) {
        Ok(produced) if produced.is_empty() => {
            log::info!("RDO (X) detected for {}. Skipping event.", date);
        }
        Ok(produced) => {
            log::info!(
                "Added {} event(s) for {} from '{}'",
                produced.len(),
                date,
                line.trimmed
            );
            events.extend(produced);
        }
        Err(rejection) => {
            let kind = match rejection {
                Rejection::InvalidHour(_) => DiagnosticKind::InvalidHour,
                Rejection::InvalidDate(_) | Rejection::Unplaceable(_) => {
                    DiagnosticKind::InvalidDate
                }
            };
            sink.report(
                Diagnostic::new(
                    kind,
                    format!(
                        "Error processing {} indicator '{}': {}",
                        indicator.label(),
                        line.trimmed,
                        rejection
                    ),
                )
                .at_line(line.number)
                .for_date(date.as_str()),
            );
        }
    }
}
