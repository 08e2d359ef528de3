use types::{Constraints, Day, TimeOfDay, TimeSlot};

/// The fixed-granularity slots every session is drawn from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotCatalog {
    slots: Vec<TimeSlot>,
}

impl SlotCatalog {
    pub fn from_constraints(c: &Constraints) -> Self {
        let dur = c.class_duration;
        let day_end = c.end_time.minutes();
        let lunch_start = c.lunch_break.start_time.minutes();
        let lunch_end = lunch_start.saturating_add(c.lunch_break.duration);

        let mut slots = Vec::new();
        if dur == 0 {
            return Self { slots };
        }
        let mut cursor = c.start_time.minutes();
        while let Some(end) = cursor.checked_add(dur).filter(|&e| e <= day_end) {
            if c.lunch_break.duration > 0 && cursor < lunch_end && end > lunch_start {
                cursor = lunch_end;
                continue;
            }
            if let (Some(s), Some(e)) = (TimeOfDay::from_minutes(cursor), TimeOfDay::from_minutes(end)) {
                slots.push(TimeSlot::new(s, e));
            }
            cursor = end;
        }
        Self { slots }
    }

    pub fn from_slots(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Day-slot cells in one week.
    pub fn weekly_cells(&self) -> usize {
        self.slots.len() * Day::ALL.len()
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::from_constraints(&Constraints::default())
    }
}
