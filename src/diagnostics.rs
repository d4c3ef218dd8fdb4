// File: ./src/diagnostics.rs
/*! Non-fatal parse diagnostics.

The parser never fails on bad content. Every line it gives up on is reported
to a `DiagnosticSink` passed in by the caller, so the engine does not depend
on a global logger or hosting framework. Two sinks are provided:

- `DiagnosticCollector`: keeps everything in memory (tests, `check` command).
- `LogSink`: forwards to the `log` facade at a matching level.
*/

use serde::Serialize;
use std::fmt;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display, AsRefStr)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_log_level(&self) -> log::Level {
        match self {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
pub enum DiagnosticKind {
    /// Neither a date nor an indicator; skipped while looking for an indicator.
    UnrecognizedLine,
    /// A date that never acquired an indicator.
    DateWithoutIndicator,
    /// Indicator matched but its hour is outside 0..=23.
    InvalidHour,
    /// Date-shaped text that is not a real calendar day, e.g. `02/30/2024`.
    InvalidDate,
    /// The configured zone could not be resolved; local time is used instead.
    ZoneResolutionFailure,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnrecognizedLine => Severity::Debug,
            DiagnosticKind::DateWithoutIndicator
            | DiagnosticKind::InvalidHour
            | DiagnosticKind::InvalidDate => Severity::Warning,
            DiagnosticKind::ZoneResolutionFailure => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    /// Zero-indexed input line, when the diagnostic is tied to one.
    pub line: Option<usize>,
    /// Date the parser was trying to pair at the time.
    pub date: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            line: None,
            date: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn for_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.kind)?;
        if let Some(line) = self.line {
            // Humans count lines from 1.
            write!(f, " (line {})", line + 1)?;
        }
        if let Some(date) = &self.date {
            write!(f, " [{}]", date)?;
        }
        write!(f, ": {}", self.message)
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

#[derive(Debug, Default, Clone)]
pub struct DiagnosticCollector {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Diagnostics at or above `min`.
    pub fn at_least(&self, min: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity >= min)
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::log!(diagnostic.severity.as_log_level(), "{}", diagnostic);
    }
}

/// Reports to both sinks in order.
pub struct Tee<'a, A: ?Sized, B: ?Sized>(pub &'a mut A, pub &'a mut B);

impl<A: DiagnosticSink + ?Sized, B: DiagnosticSink + ?Sized> DiagnosticSink for Tee<'_, A, B> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.report(diagnostic.clone());
        self.1.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_one_based_lines() {
        let d = Diagnostic::new(DiagnosticKind::InvalidHour, "hour 99 is out of range")
            .at_line(3)
            .for_date("04/24/2024");
        assert_eq!(
            d.to_string(),
            "[Warning] InvalidHour (line 4) [04/24/2024]: hour 99 is out of range"
        );
    }

    #[test]
    fn collector_filters_by_severity() {
        let mut c = DiagnosticCollector::new();
        c.report(Diagnostic::new(DiagnosticKind::UnrecognizedLine, "Monday"));
        c.report(Diagnostic::new(DiagnosticKind::DateWithoutIndicator, "dropped"));
        assert_eq!(c.at_least(Severity::Warning).count(), 1);
        assert_eq!(c.of_kind(DiagnosticKind::UnrecognizedLine).count(), 1);
    }

    #[test]
    fn tee_reports_to_both() {
        let mut a = DiagnosticCollector::new();
        let mut b = DiagnosticCollector::new();
        Tee(&mut a, &mut b).report(Diagnostic::new(DiagnosticKind::InvalidHour, "x"));
        assert_eq!(a.diagnostics.len(), 1);
        assert_eq!(b.diagnostics, a.diagnostics);
    }
}
