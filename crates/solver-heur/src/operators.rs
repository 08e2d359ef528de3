use std::collections::HashMap;

use rand::Rng;
use sched_core::catalog::SlotCatalog;
use types::{Day, ScheduledClass, SubjectId, WeeklySchedule};

#[derive(Clone, Debug)]
pub struct Individual {
    pub schedule: WeeklySchedule,
    pub fitness: f64,
}

impl Individual {
    pub fn unscored(schedule: WeeklySchedule) -> Self {
        Self {
            schedule,
            fitness: 0.0,
        }
    }
}

/// Fittest of `k` uniform draws (with replacement). `pop` must be non-empty.
pub fn tournament<'a, R: Rng>(pop: &'a [Individual], k: usize, rng: &mut R) -> &'a Individual {
    let mut best = &pop[rng.gen_range(0..pop.len())];
    for _ in 1..k {
        let c = &pop[rng.gen_range(0..pop.len())];
        if c.fitness > best.fitness {
            best = c;
        }
    }
    best
}

/// Day-by-day uniform crossover.
///
/// Fixed sessions are inherited from `a` as-is. Every movable session of `a`,
/// then of `b`, is offered with probability `inclusion` and kept only if it
/// collides with nothing already in the offspring's day and its subject is
/// still under its weekly quota. Offspring are therefore collision-free
/// whenever `a`'s fixed sessions are, but may lose sessions.
pub fn crossover<R: Rng>(
    a: &WeeklySchedule,
    b: &WeeklySchedule,
    quotas: &HashMap<SubjectId, u32>,
    inclusion: f64,
    rng: &mut R,
) -> WeeklySchedule {
    let mut child = WeeklySchedule::new();
    let mut taken: HashMap<&SubjectId, u32> = HashMap::new();

    for day in Day::ALL {
        let out = child.day_mut(day);
        out.extend(a.day(day).iter().filter(|c| c.is_fixed).cloned());

        let pool = a.day(day).iter().chain(b.day(day)).filter(|c| !c.is_fixed);
        for class in pool {
            if !rng.gen_bool(inclusion) {
                continue;
            }
            if out.iter().any(|c| c.collides_with(class)) {
                continue;
            }
            let n = taken.entry(&class.subject).or_default();
            if quotas.get(&class.subject).is_some_and(|&q| *n >= q) {
                continue;
            }
            *n += 1;
            out.push(class.clone());
        }
    }
    child
}

/// Moves one random movable session to a random catalog slot on the same day.
/// Teacher and room stay put, so the move may introduce a clash.
/// Returns false when there was nothing to move.
pub fn mutate<R: Rng>(schedule: &mut WeeklySchedule, catalog: &SlotCatalog, rng: &mut R) -> bool {
    if catalog.is_empty() {
        return false;
    }
    let days: Vec<Day> = schedule
        .days()
        .filter(|(_, s)| s.iter().any(|c| !c.is_fixed))
        .map(|(d, _)| d)
        .collect();
    if days.is_empty() {
        return false;
    }
    let day = days[rng.gen_range(0..days.len())];
    let sessions = schedule.day_mut(day);
    let movable: Vec<usize> = (0..sessions.len()).filter(|&i| !sessions[i].is_fixed).collect();
    let pick = movable[rng.gen_range(0..movable.len())];
    let slots = catalog.slots();
    let target: &mut ScheduledClass = &mut sessions[pick];
    target.time_slot = slots[rng.gen_range(0..slots.len())];
    true
}
