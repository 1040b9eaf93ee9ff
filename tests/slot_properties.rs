use chrono::NaiveDate;
use proptest::prelude::*;

use salon_booking::domain::models::settings::BookingSettings;
use salon_booking::domain::services::availability::{
    available_slots, slot_is_free, OccupiedInterval,
};
use salon_booking::domain::services::time::intervals_overlap;

fn weekday_date() -> NaiveDate {
    // A Monday, so the default working hours apply.
    NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
}

fn occupied_strategy() -> impl Strategy<Value = Vec<OccupiedInterval>> {
    prop::collection::vec((480..1020i32, 15..=90i32), 0..6).prop_map(|raw| {
        raw.into_iter()
            .map(|(start, len)| OccupiedInterval { start_min: start, end_min: start + len })
            .collect()
    })
}

proptest! {
    /// No offered slot may overlap an occupied interval once the break is
    /// added, whatever the existing bookings look like.
    #[test]
    fn offered_slots_never_collide(
        occupied in occupied_strategy(),
        duration in 15..=120i32,
        step in prop_oneof![Just(15i32), Just(30i32)],
    ) {
        let settings = BookingSettings::default();
        let slots = available_slots(&settings, duration, step, weekday_date(), &occupied, &[])
            .unwrap();

        for slot in &slots {
            prop_assert_eq!(slot.end_min - slot.start_min, duration);
            prop_assert!(slot.start_min >= settings.work_start_min);
            prop_assert!(slot.end_min <= settings.work_end_min);
            for o in &occupied {
                prop_assert!(
                    !intervals_overlap(
                        slot.start_min,
                        slot.end_min,
                        o.start_min,
                        o.end_min + settings.break_between_min,
                    ),
                    "slot {}..{} collides with occupied {}..{}",
                    slot.start_min, slot.end_min, o.start_min, o.end_min
                );
            }
        }
    }

    /// Every slot the enumeration offers must also pass the commit-time
    /// check; a customer can never pick a slot that then gets refused on
    /// the validation path alone.
    #[test]
    fn enumeration_agrees_with_commit_check(
        occupied in occupied_strategy(),
        duration in 15..=120i32,
    ) {
        let settings = BookingSettings::default();
        let slots = available_slots(&settings, duration, 30, weekday_date(), &occupied, &[])
            .unwrap();

        for slot in &slots {
            prop_assert!(
                slot_is_free(&settings, duration, weekday_date(), slot.start_min, &occupied, &[])
                    .unwrap(),
                "offered slot at {} rejected by the commit check",
                slot.start_min
            );
        }
    }

    /// Slots come back strictly sorted with no duplicates.
    #[test]
    fn slots_are_sorted_and_unique(occupied in occupied_strategy(), duration in 15..=120i32) {
        let settings = BookingSettings::default();
        let slots = available_slots(&settings, duration, 30, weekday_date(), &occupied, &[])
            .unwrap();
        for pair in slots.windows(2) {
            prop_assert!(pair[0].start_min < pair[1].start_min);
        }
    }
}
