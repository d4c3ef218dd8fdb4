// File: ./src/model/mod.rs
pub mod adapter;
pub mod classifier;
pub mod event;
pub mod materialize;
pub mod parser;
pub mod window;

pub use adapter::{IcsOptions, to_ics_string};
pub use classifier::{find_date, match_indicator};
pub use event::{DateToken, Event, EventKind, IndicatorToken, Line};
pub use materialize::{Rejection, materialize};
pub use parser::{ParseOutcome, parse_schedule, parse_schedule_collect};
pub use window::SyncWindow;
