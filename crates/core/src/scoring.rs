use std::collections::{HashMap, HashSet};
use types::{Classroom, Day, Faculty, Metrics, WeeklySchedule};

use crate::conflicts::count_clashes;

/// Stand-in until preference data exists.
pub const STUDENT_SATISFACTION_BASELINE: f64 = 0.85;
/// Stand-in until gap analysis exists.
pub const TIME_SLOT_EFFICIENCY_BASELINE: f64 = 0.90;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreWeights {
    pub utilization: f64,
    pub balance: f64,
    pub satisfaction: f64,
    pub efficiency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            utilization: 0.25,
            balance: 0.30,
            satisfaction: 0.25,
            efficiency: 0.20,
        }
    }
}

/// Everything the fitness function reads besides the schedule itself.
#[derive(Clone, Copy, Debug)]
pub struct ScoringContext<'a> {
    pub faculty: &'a [Faculty],
    pub classrooms: &'a [Classroom],
    pub slots_per_day: usize,
    pub max_classes_per_day: u32,
}

/// Share of classroom-slot cells in use, counting only sessions held in a
/// known classroom. Zero when there are no rooms or no slots.
pub fn room_utilization(schedule: &WeeklySchedule, classrooms: &[Classroom], slots_per_day: usize) -> f64 {
    let cells = classrooms.len() * slots_per_day * Day::ALL.len();
    if cells == 0 {
        return 0.0;
    }
    let known: HashSet<_> = classrooms.iter().map(|c| &c.id).collect();
    let used = schedule.sessions().filter(|c| known.contains(&c.classroom)).count();
    (used as f64 / cells as f64).min(1.0)
}

/// `1 - variance / mean^2` over per-faculty session counts, floored at 0.
/// Zero when there is no faculty or nobody teaches.
pub fn workload_balance(schedule: &WeeklySchedule, faculty: &[Faculty]) -> f64 {
    if faculty.is_empty() {
        return 0.0;
    }
    let mut per: HashMap<_, u32> = faculty.iter().map(|f| (&f.id, 0)).collect();
    for c in schedule.sessions() {
        if let Some(n) = c.faculty.as_ref().and_then(|f| per.get_mut(f)) {
            *n += 1;
        }
    }
    let loads: Vec<f64> = faculty.iter().map(|f| per[&f.id] as f64).collect();
    let n = loads.len() as f64;
    let mean = loads.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = loads.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (1.0 - variance / (mean * mean)).max(0.0)
}

/// Sessions above `max_per_day`, summed over the week.
pub fn daily_overload(schedule: &WeeklySchedule, max_per_day: u32) -> u32 {
    schedule
        .days()
        .map(|(_, s)| (s.len() as u32).saturating_sub(max_per_day))
        .sum()
}

/// Search fitness; higher is better, never negative.
pub fn fitness(schedule: &WeeklySchedule, ctx: &ScoringContext<'_>) -> f64 {
    let mut score = 100.0;
    score -= count_clashes(schedule) as f64 * 10.0;
    score += workload_balance(schedule, ctx.faculty) * 20.0;
    score += room_utilization(schedule, ctx.classrooms, ctx.slots_per_day) * 15.0;
    score -= daily_overload(schedule, ctx.max_classes_per_day) as f64 * 5.0;
    score.max(0.0)
}

pub fn compute_metrics(schedule: &WeeklySchedule, ctx: &ScoringContext<'_>) -> Metrics {
    Metrics {
        classroom_utilization: room_utilization(schedule, ctx.classrooms, ctx.slots_per_day),
        faculty_workload_balance: workload_balance(schedule, ctx.faculty),
        student_satisfaction: STUDENT_SATISFACTION_BASELINE,
        time_slot_efficiency: TIME_SLOT_EFFICIENCY_BASELINE,
    }
}

/// Weighted sum of the metrics on a 0..=100 scale.
pub fn overall_score(m: &Metrics, w: &ScoreWeights) -> f64 {
    let raw = w.utilization * m.classroom_utilization
        + w.balance * m.faculty_workload_balance
        + w.satisfaction * m.student_satisfaction
        + w.efficiency * m.time_slot_efficiency;
    (raw * 100.0).clamp(0.0, 100.0)
}
