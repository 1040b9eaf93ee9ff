use chrono::NaiveDate;

use salon_booking::domain::models::booking::BookingStatus;
use salon_booking::domain::models::schedule_exception::{ExceptionKind, ScheduleException};
use salon_booking::domain::models::settings::BookingSettings;
use salon_booking::domain::services::availability::{
    available_slots, slot_is_free, OccupiedInterval,
};
use salon_booking::domain::services::exceptions::effective_exceptions;
use salon_booking::domain::services::time::{intervals_overlap, minutes_to_time, time_to_minutes};
use salon_booking::error::AppError;

fn monday() -> NaiveDate {
    // 2026-08-31 is a Monday.
    NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
}

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
}

fn settings() -> BookingSettings {
    BookingSettings::default()
}

#[test]
fn parses_and_formats_times() {
    assert_eq!(time_to_minutes("09:30").unwrap(), 570);
    assert_eq!(time_to_minutes("00:00").unwrap(), 0);
    assert_eq!(time_to_minutes("23:59").unwrap(), 1439);

    assert_eq!(minutes_to_time(75).unwrap(), "01:15");
    assert_eq!(minutes_to_time(0).unwrap(), "00:00");
    assert_eq!(minutes_to_time(675).unwrap(), "11:15");
}

#[test]
fn rejects_malformed_times() {
    for bad in ["0930", "24:00", "09:60", "-1:00", "9:ab", ""] {
        assert!(
            matches!(time_to_minutes(bad), Err(AppError::InvalidFormat(_))),
            "expected rejection for {:?}",
            bad
        );
    }
    assert!(matches!(minutes_to_time(1440), Err(AppError::InvalidFormat(_))));
    assert!(matches!(minutes_to_time(-1), Err(AppError::InvalidFormat(_))));
}

#[test]
fn touching_intervals_do_not_overlap() {
    assert!(!intervals_overlap(60, 120, 120, 180));
    assert!(!intervals_overlap(120, 180, 60, 120));
    assert!(intervals_overlap(60, 121, 120, 180));
    assert!(intervals_overlap(100, 200, 150, 160));
}

#[test]
fn status_transitions_follow_the_lifecycle() {
    use BookingStatus::*;
    assert!(Pending.can_transition_to(Confirmed));
    assert!(Pending.can_transition_to(Cancelled));
    assert!(Confirmed.can_transition_to(Completed));
    assert!(Confirmed.can_transition_to(NoShow));
    assert!(Confirmed.can_transition_to(Cancelled));

    assert!(!Pending.can_transition_to(Completed));
    assert!(!Pending.can_transition_to(NoShow));
    assert!(!Cancelled.can_transition_to(Confirmed));
    assert!(!Completed.can_transition_to(Cancelled));
    assert!(!NoShow.can_transition_to(Confirmed));

    assert!(Cancelled.is_terminal() && Completed.is_terminal() && NoShow.is_terminal());
    assert!(!Pending.is_terminal() && !Confirmed.is_terminal());
    assert!(Pending.occupies_slot() && Confirmed.occupies_slot());
    assert!(!Cancelled.occupies_slot());
}

#[test]
fn resolver_picks_exceptions_effective_on_a_date() {
    let one_off =
        ScheduleException::one_off(monday(), ExceptionKind::Block, 600, 660, None).unwrap();
    let other_day = ScheduleException::one_off(
        monday().succ_opt().unwrap(),
        ExceptionKind::Block,
        600,
        660,
        None,
    )
    .unwrap();
    // 0 = Sunday.
    let recurring_sun =
        ScheduleException::recurring(0, ExceptionKind::Allow, 600, 840, None).unwrap();
    let range = ScheduleException::range(
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
        ExceptionKind::Block,
        540,
        600,
        None,
    )
    .unwrap();

    let all = vec![one_off, other_day, recurring_sun, range];

    let on_monday = effective_exceptions(monday(), &all);
    assert_eq!(on_monday.len(), 2);
    // Sorted by start.
    assert_eq!(on_monday[0].start_min, 540);
    assert_eq!(on_monday[1].start_min, 600);

    let on_sunday = effective_exceptions(sunday(), &all);
    assert_eq!(on_sunday.len(), 2);
    assert!(on_sunday.iter().any(|e| e.kind == ExceptionKind::Allow));

    // Range is inclusive on both ends.
    let past_range = effective_exceptions(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(), &all);
    assert!(past_range.is_empty());
}

#[test]
fn exception_constructors_validate_their_shape() {
    assert!(ScheduleException::recurring(7, ExceptionKind::Block, 0, 60, None).is_err());
    assert!(ScheduleException::one_off(monday(), ExceptionKind::Block, 660, 600, None).is_err());
    assert!(ScheduleException::one_off(monday(), ExceptionKind::Block, 600, 1500, None).is_err());
    assert!(ScheduleException::range(
        monday(),
        monday().pred_opt().unwrap(),
        ExceptionKind::Block,
        0,
        60,
        None
    )
    .is_err());
    assert!(ScheduleException::range(monday(), monday(), ExceptionKind::Block, 0, 60, None).is_ok());
}

fn starts(slots: &[salon_booking::domain::services::availability::Slot]) -> Vec<i32> {
    slots.iter().map(|s| s.start_min).collect()
}

#[test]
fn empty_day_offers_the_full_grid() {
    let slots = available_slots(&settings(), 60, 30, monday(), &[], &[]).unwrap();
    let got = starts(&slots);
    // 09:00 through 17:00 on the half hour.
    assert_eq!(got.len(), 17);
    assert_eq!(got[0], 540);
    assert_eq!(*got.last().unwrap(), 1020);
    assert!(got.windows(2).all(|w| w[1] - w[0] == 30));
}

#[test]
fn break_padding_shifts_the_cursor_off_grid() {
    // Existing booking 10:00-11:00, break 15: the slot before it survives,
    // the next offered start is 11:15.
    let occupied = [OccupiedInterval { start_min: 600, end_min: 660 }];
    let slots = available_slots(&settings(), 60, 30, monday(), &occupied, &[]).unwrap();
    let got = starts(&slots);

    assert!(got.contains(&540), "09:00 should survive: {:?}", got);
    assert!(!got.contains(&570), "09:30 would run into the booking");
    assert!(!got.contains(&600));
    assert!(!got.contains(&630));
    assert!(got.contains(&675), "11:15 expected after padded booking: {:?}", got);
    assert!(!got.contains(&660), "11:00 violates the break");

    // Grid continues on the shifted phase.
    assert!(got.contains(&705) && got.contains(&1005));
    assert!(!got.contains(&1035));
}

#[test]
fn sunday_is_closed_unless_allowed() {
    let closed = available_slots(&settings(), 60, 30, sunday(), &[], &[]).unwrap();
    assert!(closed.is_empty());

    let allow =
        ScheduleException::recurring(0, ExceptionKind::Allow, 600, 840, None).unwrap();
    let effective = effective_exceptions(sunday(), &[allow]);
    let open = available_slots(&settings(), 60, 30, sunday(), &[], &effective).unwrap();
    assert_eq!(starts(&open), vec![600, 630, 660, 690, 720, 750, 780]);
}

#[test]
fn allow_supersedes_working_hours() {
    // Allow 12:00-15:00 on a weekday: the global 09:00-18:00 window is
    // replaced, not merged.
    let allow = ScheduleException::one_off(monday(), ExceptionKind::Allow, 720, 900, None).unwrap();
    let effective = effective_exceptions(monday(), &[allow]);
    let slots = available_slots(&settings(), 60, 30, monday(), &[], &effective).unwrap();
    let got = starts(&slots);
    assert_eq!(got, vec![720, 750, 780, 810, 840]);
}

#[test]
fn block_boundaries_are_exact() {
    // Block 12:00-13:00. A slot ending exactly at 12:00 and one starting
    // exactly at 13:00 both survive; blocks carry no break padding.
    let block = ScheduleException::one_off(monday(), ExceptionKind::Block, 720, 780, None).unwrap();
    let effective = effective_exceptions(monday(), &[block]);
    let slots = available_slots(&settings(), 60, 30, monday(), &[], &effective).unwrap();
    let got = starts(&slots);
    assert!(got.contains(&660), "11:00-12:00 touches the block but fits");
    assert!(!got.contains(&690));
    assert!(!got.contains(&720));
    assert!(!got.contains(&750));
    assert!(got.contains(&780), "13:00 starts exactly at the block end");
}

#[test]
fn full_day_block_empties_the_day() {
    let block = ScheduleException::one_off(monday(), ExceptionKind::Block, 0, 1439, None).unwrap();
    let effective = effective_exceptions(monday(), &[block]);
    let slots = available_slots(&settings(), 60, 30, monday(), &[], &effective).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn non_positive_duration_is_rejected() {
    assert!(matches!(
        available_slots(&settings(), 0, 30, monday(), &[], &[]),
        Err(AppError::InvalidServiceDuration)
    ));
    assert!(matches!(
        available_slots(&settings(), -15, 30, monday(), &[], &[]),
        Err(AppError::InvalidServiceDuration)
    ));
    assert!(matches!(
        slot_is_free(&settings(), 0, monday(), 600, &[], &[]),
        Err(AppError::InvalidServiceDuration)
    ));
}

#[test]
fn finer_grid_offers_quarter_hour_starts() {
    let slots = available_slots(&settings(), 60, 15, monday(), &[], &[]).unwrap();
    let got = starts(&slots);
    assert!(got.contains(&555) && got.contains(&585));
    assert_eq!(got.len(), 33);
}

#[test]
fn commit_check_accepts_off_grid_starts() {
    let occupied = [OccupiedInterval { start_min: 600, end_min: 660 }];
    let s = settings();

    // 11:15 is off the 30-minute grid but valid.
    assert!(slot_is_free(&s, 60, monday(), 675, &occupied, &[]).unwrap());
    // 11:05 collides with the break tail of the 10:00 booking.
    assert!(!slot_is_free(&s, 60, monday(), 665, &occupied, &[]).unwrap());
    // Ends past closing.
    assert!(!slot_is_free(&s, 60, monday(), 1021, &occupied, &[]).unwrap());
    // Before opening.
    assert!(!slot_is_free(&s, 60, monday(), 480, &occupied, &[]).unwrap());
    // Sunday without an allow window.
    assert!(!slot_is_free(&s, 60, sunday(), 600, &[], &[]).unwrap());
}

#[test]
fn settings_materialize_from_the_kv_map() {
    use std::collections::HashMap;

    let empty = HashMap::new();
    let defaults = BookingSettings::from_map(&empty).unwrap();
    assert_eq!(defaults.work_start_min, 540);
    assert_eq!(defaults.work_end_min, 1080);
    assert_eq!(defaults.break_between_min, 15);

    let mut map = HashMap::new();
    map.insert("work_start".to_string(), "08:00".to_string());
    map.insert("break_between".to_string(), "10".to_string());
    let custom = BookingSettings::from_map(&map).unwrap();
    assert_eq!(custom.work_start_min, 480);
    assert_eq!(custom.break_between_min, 10);

    map.insert("work_start".to_string(), "19:00".to_string());
    assert!(matches!(BookingSettings::from_map(&map), Err(AppError::Validation(_))));

    let mut bad_step = HashMap::new();
    bad_step.insert("slot_step".to_string(), "0".to_string());
    assert!(BookingSettings::from_map(&bad_step).is_err());
}
