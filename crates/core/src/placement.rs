use tracing::warn;
use types::{
    Classroom, Conflict, ConflictKind, Day, Faculty, FacultyId, ScheduledClass, Severity, Subject,
    TimeSlot, WeeklySchedule,
};

use crate::availability::is_free;

/// First authorized faculty member free at `day`/`slot`, in input order.
pub fn find_faculty<'a>(
    subject: &Subject,
    faculty: &'a [Faculty],
    day: Day,
    slot: &TimeSlot,
) -> Option<&'a Faculty> {
    faculty
        .iter()
        .find(|f| f.can_teach(&subject.id) && is_free(&f.availability, day, slot))
}

/// First classroom of the preferred type and capacity free at `day`/`slot`.
pub fn find_classroom<'a>(
    subject: &Subject,
    classrooms: &'a [Classroom],
    day: Day,
    slot: &TimeSlot,
) -> Option<&'a Classroom> {
    classrooms
        .iter()
        .find(|c| c.suits(&subject.class_requirements) && is_free(&c.availability, day, slot))
}

/// Seeds `schedule` with every fixed slot, in input order. A fixed slot whose
/// day, slot and classroom are already taken is skipped and reported. Each
/// placed session gets the first authorized faculty member who is available
/// and not already teaching at that slot, or none.
pub fn place_fixed_slots(
    schedule: &mut WeeklySchedule,
    subjects: &[Subject],
    faculty: &[Faculty],
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for subject in subjects.iter().filter(|s| s.has_fixed_slots()) {
        for fixed in &subject.fixed_time_slots {
            let slot = fixed.time_slot();
            let taken = schedule
                .day(fixed.day)
                .iter()
                .any(|c| c.time_slot == slot && c.classroom == fixed.classroom);
            if taken {
                warn!(subject = %subject.id, day = %fixed.day, %slot, "fixed slot dropped");
                conflicts.push(
                    Conflict::new(
                        ConflictKind::ClassroomClash,
                        Severity::High,
                        format!(
                            "Fixed time slot conflict for {} on {} at {}",
                            subject.label(),
                            fixed.day,
                            slot
                        ),
                    )
                    .with_suggestions(&["Consider changing fixed time slot", "Use different classroom"]),
                );
                continue;
            }
            let busy = |f: &Faculty| {
                schedule
                    .day(fixed.day)
                    .iter()
                    .any(|c| c.time_slot == slot && c.faculty.as_ref() == Some(&f.id))
            };
            let teacher: Option<FacultyId> = faculty
                .iter()
                .find(|f| {
                    f.can_teach(&subject.id)
                        && is_free(&f.availability, fixed.day, &slot)
                        && !busy(f)
                })
                .map(|f| f.id.clone());
            schedule.push(ScheduledClass {
                day: fixed.day,
                time_slot: slot,
                subject: subject.id.clone(),
                faculty: teacher,
                classroom: fixed.classroom.clone(),
                class_type: subject.class_type,
                is_fixed: true,
            });
        }
    }
    conflicts
}
