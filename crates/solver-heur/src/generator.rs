use rand::Rng;
use sched_core::placement::{find_classroom, find_faculty};
use tracing::trace;
use types::{Day, ScheduledClass, Subject, WeeklySchedule};

use crate::problem::Problem;

/// One random candidate: a clone of the fixed base plus up to
/// `classesPerWeek` sessions for every other subject.
///
/// Each attempt samples a day and a catalog slot uniformly. A subject gets at
/// most `classesPerWeek * weekly_cells` attempts and is abandoned once a full
/// pass of `weekly_cells` attempts places nothing new, so generation always
/// terminates.
pub fn generate_candidate<R: Rng>(problem: &Problem<'_>, rng: &mut R) -> WeeklySchedule {
    let mut schedule = problem.base.clone();
    if problem.catalog.is_empty() {
        return schedule;
    }
    for subject in problem.searchable() {
        place_subject(problem, subject, &mut schedule, rng);
    }
    schedule
}

fn place_subject<R: Rng>(
    problem: &Problem<'_>,
    subject: &Subject,
    schedule: &mut WeeklySchedule,
    rng: &mut R,
) -> u32 {
    let required = subject.class_requirements.classes_per_week;
    let pass = problem.catalog.weekly_cells();
    let budget = (required as usize).saturating_mul(pass);
    let slots = problem.catalog.slots();

    let mut placed = 0u32;
    let mut attempts = 0usize;
    let mut stalled = 0usize;
    while placed < required && attempts < budget {
        attempts += 1;
        stalled += 1;
        let day = Day::ALL[rng.gen_range(0..Day::ALL.len())];
        let slot = slots[rng.gen_range(0..slots.len())];

        let teacher = find_faculty(subject, &problem.request.faculty, day, &slot);
        let room = find_classroom(subject, &problem.request.classrooms, day, &slot);
        if let (Some(teacher), Some(room)) = (teacher, room) {
            let session = ScheduledClass {
                day,
                time_slot: slot,
                subject: subject.id.clone(),
                faculty: Some(teacher.id.clone()),
                classroom: room.id.clone(),
                class_type: subject.class_type,
                is_fixed: false,
            };
            if !schedule.collides(&session) {
                schedule.push(session);
                placed += 1;
                stalled = 0;
            }
        }

        if stalled >= pass {
            break;
        }
    }
    if placed < required {
        trace!(subject = %subject.id, placed, required, attempts, "subject under-placed");
    }
    placed
}
