// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod model;
pub mod storage;
pub mod zone;

pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, DiagnosticSink, Severity};
pub use model::{Event, EventKind, ParseOutcome, parse_schedule, parse_schedule_collect};
pub use zone::ScheduleZone;
