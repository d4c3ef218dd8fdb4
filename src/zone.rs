// File: ./src/zone.rs
// Resolution of the schedule time zone, with local-time fallback.
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use anyhow::Result;
use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone,
};
use chrono_tz::Tz;
use std::fmt;

pub const DEFAULT_SCHEDULE_TZ: &str = "America/New_York";

/// The zone in which every indicator hour is read.
///
/// `Local` only appears when a named zone failed to resolve, so callers can
/// tell an environment-dependent result apart from a configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleZone {
    Named(Tz),
    Local,
}

impl ScheduleZone {
    /// Strict lookup. Fails on an unknown IANA name.
    pub fn named(name: &str) -> Result<Self> {
        name.trim()
            .parse::<Tz>()
            .map(ScheduleZone::Named)
            .map_err(|e| anyhow::anyhow!("Unknown time zone '{}': {}", name, e))
    }

    /// Lookup with fallback to the host's local zone. The diagnostic is
    /// returned (not logged) so the caller reports it once at startup.
    pub fn resolve(name: &str) -> (Self, Option<Diagnostic>) {
        match Self::named(name) {
            Ok(zone) => (zone, None),
            Err(e) => {
                let diag = Diagnostic::new(
                    DiagnosticKind::ZoneResolutionFailure,
                    format!("{}. Falling back to local time.", e),
                );
                (ScheduleZone::Local, Some(diag))
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ScheduleZone::Local)
    }

    pub fn name(&self) -> String {
        match self {
            ScheduleZone::Named(tz) => tz.name().to_string(),
            ScheduleZone::Local => "local".to_string(),
        }
    }

    /// Attaches this zone to a wall-clock time.
    ///
    /// Ambiguous times (clocks going back) take the earlier instant. Times in
    /// a spring-forward gap are read with the offset in force before the gap.
    pub fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self.from_local(naive) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
            LocalResult::None => {
                let before = naive.checked_sub_signed(Duration::hours(1))?;
                self.from_local(before)
                    .earliest()
                    .map(|dt| self.convert(&(dt + Duration::hours(1))))
            }
        }
    }

    /// Local midnight of `date` in this zone.
    pub fn midnight(&self, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
        self.localize(date.and_hms_opt(0, 0, 0)?)
    }

    /// Re-expresses an instant in this zone (used to read back calendar dates).
    pub fn convert(&self, dt: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            ScheduleZone::Named(tz) => dt.with_timezone(tz).fixed_offset(),
            ScheduleZone::Local => dt.with_timezone(&Local).fixed_offset(),
        }
    }

    fn from_local(&self, naive: NaiveDateTime) -> LocalResult<DateTime<FixedOffset>> {
        match self {
            ScheduleZone::Named(tz) => tz
                .from_local_datetime(&naive)
                .map(|dt| dt.fixed_offset()),
            ScheduleZone::Local => Local
                .from_local_datetime(&naive)
                .map(|dt| dt.fixed_offset()),
        }
    }
}

impl Default for ScheduleZone {
    fn default() -> Self {
        ScheduleZone::Named(chrono_tz::America::New_York)
    }
}

impl fmt::Display for ScheduleZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn naive(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn resolves_iana_names() {
        let (zone, diag) = ScheduleZone::resolve("America/New_York");
        assert_eq!(zone, ScheduleZone::Named(chrono_tz::America::New_York));
        assert!(diag.is_none());
        assert!(!zone.is_fallback());
    }

    #[test]
    fn unknown_name_falls_back_with_diagnostic() {
        let (zone, diag) = ScheduleZone::resolve("Mars/Olympus_Mons");
        assert!(zone.is_fallback());
        let diag = diag.expect("fallback must be reported");
        assert_eq!(diag.kind, DiagnosticKind::ZoneResolutionFailure);
        assert!(diag.message.contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn strict_lookup_errors() {
        assert!(ScheduleZone::named("Not/AZone").is_err());
    }

    #[test]
    fn localize_uses_zone_offset() {
        let zone = ScheduleZone::default();
        let summer = zone.localize(naive(2024, 7, 1, 9)).unwrap();
        assert_eq!(summer.offset().local_minus_utc(), -4 * 3600);
        let winter = zone.localize(naive(2024, 1, 15, 9)).unwrap();
        assert_eq!(winter.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn ambiguous_time_takes_earlier_instant() {
        // 2024-11-03 01:00 happens twice in New York.
        let zone = ScheduleZone::default();
        let dt = zone.localize(naive(2024, 11, 3, 1)).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn gap_time_uses_offset_before_transition() {
        // 2024-03-10 02:00 does not exist in New York; read as 02:00 EST = 03:00 EDT.
        let zone = ScheduleZone::default();
        let dt = zone.localize(naive(2024, 3, 10, 2)).unwrap();
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.offset().local_minus_utc(), -4 * 3600);
    }
}
