use std::collections::HashMap;

use sched_core::catalog::SlotCatalog;
use sched_core::scoring::ScoringContext;
use types::{OptimizeRequest, Subject, SubjectId, WeeklySchedule};

/// One run's read-only inputs plus what is derived from them up front.
#[derive(Clone, Debug)]
pub struct Problem<'a> {
    pub request: &'a OptimizeRequest,
    pub catalog: SlotCatalog,
    /// Fixed placements every candidate starts from.
    pub base: WeeklySchedule,
    /// Weekly session cap for each search-placed subject.
    pub quotas: HashMap<SubjectId, u32>,
}

impl<'a> Problem<'a> {
    pub fn new(request: &'a OptimizeRequest, base: WeeklySchedule) -> Self {
        let mut quotas: HashMap<SubjectId, u32> = HashMap::new();
        for s in request.subjects.iter().filter(|s| !s.has_fixed_slots()) {
            let q = quotas.entry(s.id.clone()).or_default();
            *q = q.saturating_add(s.class_requirements.classes_per_week);
        }
        Self {
            request,
            catalog: SlotCatalog::from_constraints(&request.constraints),
            base,
            quotas,
        }
    }

    pub fn searchable(&self) -> impl Iterator<Item = &'a Subject> + 'a {
        self.request.subjects.iter().filter(|s| !s.has_fixed_slots())
    }

    pub fn sessions_required(&self) -> u32 {
        self.quotas.values().fold(0u32, |acc, &q| acc.saturating_add(q))
    }

    pub fn scoring(&self) -> ScoringContext<'a> {
        ScoringContext {
            faculty: &self.request.faculty,
            classrooms: &self.request.classrooms,
            slots_per_day: self.catalog.len(),
            max_classes_per_day: self.request.constraints.max_classes_per_day,
        }
    }
}
