// Tests for the date range a calendar sync clears before inserting events.
use chrono::TimeZone;
use chrono_tz::America::New_York;
use shiftcal::model::SyncWindow;
use shiftcal::{ScheduleZone, parse_schedule_collect};

#[test]
fn test_no_events_no_window() {
    assert!(SyncWindow::covering(&[], &ScheduleZone::default()).is_none());
}

#[test]
fn test_window_spans_whole_days() {
    let zone = ScheduleZone::default();
    let events = parse_schedule_collect("04/15/2024\n09\n04/17/2024\n13", &zone).events;
    let window = SyncWindow::covering(&events, &zone).unwrap();
    assert_eq!(
        window.start,
        New_York.with_ymd_and_hms(2024, 4, 15, 0, 0, 0).unwrap()
    );
    assert_eq!(
        window.end,
        New_York.with_ymd_and_hms(2024, 4, 18, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_overnight_shift_extends_window_by_end_date() {
    let zone = ScheduleZone::default();
    // AOB at 01:00 starts the evening before; the night shift ends on 04/21.
    let events = parse_schedule_collect("04/19/2024\nAOB<01>\n04/20/2024\n22TEN", &zone).events;
    let window = SyncWindow::covering(&events, &zone).unwrap();
    assert_eq!(
        window.start,
        New_York.with_ymd_and_hms(2024, 4, 18, 0, 0, 0).unwrap()
    );
    assert_eq!(
        window.end,
        New_York.with_ymd_and_hms(2024, 4, 22, 0, 0, 0).unwrap()
    );
    assert!(events.iter().all(|e| window.contains(&e.start)));
}

#[test]
fn test_window_is_independent_of_input_order() {
    let zone = ScheduleZone::default();
    let events = parse_schedule_collect("04/30/2024\n08\n04/01/2024\n08", &zone).events;
    let window = SyncWindow::covering(&events, &zone).unwrap();
    assert_eq!(
        window.start,
        New_York.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        window.end,
        New_York.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    );
}
