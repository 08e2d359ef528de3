use types::{Availability, Day, TimeSlot};

/// Whether an entity is free at `slot` on `day`.
///
/// A closed day is never free. A blocked interval takes the slot when
/// `blocked.start <= slot.start < blocked.end`; only the slot start is
/// compared, so a block that begins mid-slot does not take it.
pub fn is_free(availability: &Availability, day: Day, slot: &TimeSlot) -> bool {
    let Some(d) = availability.get(day) else {
        return true;
    };
    d.is_available
        && !d
            .blocked_intervals()
            .any(|b| b.start_time <= slot.start_time && slot.start_time < b.end_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use types::{DayAvailability, MarkedInterval, TimeOfDay};

    fn hour(h: u16) -> TimeSlot {
        TimeSlot::new(TimeOfDay::from_hm(h, 0), TimeOfDay::from_hm(h + 1, 0))
    }

    #[test]
    fn missing_day_is_open() {
        assert!(is_free(&Availability::default(), Day::Wednesday, &hour(9)));
    }

    #[test]
    fn closed_day_is_never_free() {
        let a = Availability::default().close(Day::Monday);
        assert!(!is_free(&a, Day::Monday, &hour(9)));
        assert!(is_free(&a, Day::Tuesday, &hour(9)));
    }

    #[test]
    fn blocked_interval_is_half_open_on_slot_start() {
        let a = Availability::default().block(
            Day::Friday,
            TimeOfDay::from_hm(10, 0),
            TimeOfDay::from_hm(12, 0),
        );
        assert!(is_free(&a, Day::Friday, &hour(9)));
        assert!(!is_free(&a, Day::Friday, &hour(10)));
        assert!(!is_free(&a, Day::Friday, &hour(11)));
        assert!(is_free(&a, Day::Friday, &hour(12)));

        let late = TimeSlot::new(TimeOfDay::from_hm(9, 30), TimeOfDay::from_hm(10, 30));
        assert!(is_free(&a, Day::Friday, &late));
    }

    #[test]
    fn flagged_time_slots_take_effect() {
        let mut a = Availability::default();
        a.0.insert(
            Day::Thursday,
            DayAvailability {
                time_slots: vec![
                    MarkedInterval {
                        start_time: TimeOfDay::from_hm(9, 0),
                        end_time: TimeOfDay::from_hm(10, 0),
                        is_blocked: true,
                        reason: None,
                    },
                    MarkedInterval {
                        start_time: TimeOfDay::from_hm(11, 0),
                        end_time: TimeOfDay::from_hm(12, 0),
                        is_blocked: false,
                        reason: None,
                    },
                ],
                ..DayAvailability::default()
            },
        );
        assert!(!is_free(&a, Day::Thursday, &hour(9)));
        assert!(is_free(&a, Day::Thursday, &hour(11)));
    }

    proptest! {
        #[test]
        fn repeated_calls_agree(
            day_idx in 0usize..6,
            start in 0u16..23,
            block_start in 0u16..23,
            block_len in 0u16..5,
            open in any::<bool>(),
        ) {
            let day = Day::ALL[day_idx];
            let mut a = Availability::default().block(
                day,
                TimeOfDay::from_hm(block_start, 0),
                TimeOfDay::from_hm((block_start + block_len).min(24), 0),
            );
            if !open {
                a = a.close(day);
            }
            let slot = hour(start);
            let first = is_free(&a, day, &slot);
            prop_assert_eq!(first, is_free(&a, day, &slot));
            let expected = open && !(block_start <= start && start < block_start + block_len);
            prop_assert_eq!(first, expected);
        }
    }
}
