// File: ./src/model/classifier.rs
//! Line classification: "does this line carry a date?" and "does this line
//! start with a shift indicator?".
//!
//! Both checks are hand-written scanners over ASCII bytes. The indicator
//! grammar is tried as an ordered list of sub-grammars, each returning a
//! fully typed `IndicatorToken`, instead of one pattern with positional
//! optional groups.
use crate::model::event::{DateToken, IndicatorToken};

const DATE_LEN: usize = 10; // MM/DD/YYYY

const TEN_MARKER: &str = "TEN";
const OVERTIME_MARKER: char = '$';
const RDO_MARKER: &str = "X";
const ANNUAL_PREFIX: &str = "A<";
const AOA_PREFIX: &str = "AOA<";
const AOB_PREFIX: &str = "AOB<";

/// Finds the first `\d{2}/\d{2}/\d{4}` substring anywhere in `line`.
pub fn find_date(line: &str) -> Option<DateToken> {
    let bytes = line.as_bytes();
    if bytes.len() < DATE_LEN {
        return None;
    }
    (0..=bytes.len() - DATE_LEN)
        .find(|&i| is_date_at(&bytes[i..i + DATE_LEN]))
        // All ten bytes are ASCII, so both ends sit on char boundaries.
        .map(|i| DateToken(line[i..i + DATE_LEN].to_string()))
}

fn starts_with_date(s: &str) -> bool {
    s.as_bytes().get(..DATE_LEN).is_some_and(is_date_at)
}

fn is_date_at(window: &[u8]) -> bool {
    window.iter().enumerate().all(|(i, b)| match i {
        2 | 5 => *b == b'/',
        _ => b.is_ascii_digit(),
    })
}

/// Matches the indicator grammar from the first non-whitespace character.
/// Anything after the matched token is ignored.
///
/// A line that opens with a date is a date line, never an indicator, even
/// though `04/29/2024` would otherwise read as a shift starting at 04:00.
/// Dates in the trailing text are ignored like any other trailing text.
pub fn match_indicator(line: &str) -> Option<IndicatorToken> {
    let s = line.trim_start();
    if starts_with_date(s) {
        return None;
    }
    parse_work_shift(s)
        .or_else(|| parse_rdo(s))
        .or_else(|| parse_annual_leave(s))
        .or_else(|| {
            parse_bracketed_hour(s, AOA_PREFIX)
                .map(|main_start_hour| IndicatorToken::AtOrAfterOvertime { main_start_hour })
        })
        .or_else(|| {
            parse_bracketed_hour(s, AOB_PREFIX)
                .map(|main_start_hour| IndicatorToken::AtOrBeforeOvertime { main_start_hour })
        })
}

/// Reads one or two leading ASCII digits. Returns the value and the rest.
fn take_hour(s: &str) -> Option<(u32, &str)> {
    let digits = s
        .bytes()
        .take(2)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let value = s[..digits].parse::<u32>().ok()?;
    Some((value, &s[digits..]))
}

fn parse_work_shift(s: &str) -> Option<IndicatorToken> {
    let (start_hour, rest) = take_hour(s)?;
    let (duration, rest) = match rest.strip_prefix(TEN_MARKER) {
        Some(after) => (10, after),
        None => (8, rest),
    };
    let overtime = rest.starts_with(OVERTIME_MARKER);
    Some(IndicatorToken::WorkShift {
        start_hour,
        duration,
        overtime,
    })
}

fn parse_rdo(s: &str) -> Option<IndicatorToken> {
    s.starts_with(RDO_MARKER).then_some(IndicatorToken::RestDayOff)
}

fn parse_annual_leave(s: &str) -> Option<IndicatorToken> {
    parse_bracketed_hour(s, ANNUAL_PREFIX)
        .map(|start_hour| IndicatorToken::AnnualLeave { start_hour })
}

/// `<prefix><HOUR>>`, e.g. `AOA<07>`.
fn parse_bracketed_hour(s: &str, prefix: &str) -> Option<u32> {
    let rest = s.strip_prefix(prefix)?;
    let (hour, rest) = take_hour(rest)?;
    rest.starts_with('>').then_some(hour)
}
