use std::collections::HashSet;

use thiserror::Error;
use types::{Conflict, ConflictKind, OptimizeRequest, Severity};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid request: {}", .0.join("; "))]
    Msg(Vec<String>),
}

impl ValidationError {
    pub fn errors(&self) -> &[String] {
        match self {
            ValidationError::Msg(v) => v,
        }
    }
}

/// Structural checks a caller may run before optimizing. The optimizer
/// itself never calls this and degrades on bad input instead.
pub fn validate(req: &OptimizeRequest) -> Result<(), ValidationError> {
    let mut errors: Vec<String> = Vec::new();

    fn chk_unique<'a>(name: &str, ids: impl Iterator<Item = &'a str>, errors: &mut Vec<String>) {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                errors.push(format!("duplicate {name} id: {id}"));
            }
        }
    }
    chk_unique("subject", req.subjects.iter().map(|x| x.id.0.as_str()), &mut errors);
    chk_unique("faculty", req.faculty.iter().map(|x| x.id.0.as_str()), &mut errors);
    chk_unique("classroom", req.classrooms.iter().map(|x| x.id.0.as_str()), &mut errors);

    let c = &req.constraints;
    if c.start_time >= c.end_time {
        errors.push(format!("day window is inverted: {}-{}", c.start_time, c.end_time));
    }
    let lunch_end = c.lunch_break.start_time.saturating_add(c.lunch_break.duration);
    if c.lunch_break.duration > 0 && (c.lunch_break.start_time < c.start_time || lunch_end > c.end_time) {
        errors.push(format!(
            "lunch break {}-{} lies outside the day window",
            c.lunch_break.start_time, lunch_end
        ));
    }
    if c.class_duration == 0 {
        errors.push("classDuration must be positive".into());
    }
    if c.max_classes_per_day == 0 {
        errors.push("maxClassesPerDay must be positive".into());
    }

    let rooms: HashSet<_> = req.classrooms.iter().map(|r| &r.id).collect();
    for s in &req.subjects {
        if s.class_requirements.classes_per_week == 0 {
            errors.push(format!("subject {} has classesPerWeek=0", s.id));
        }
        for f in &s.fixed_time_slots {
            if f.end_time <= f.start_time {
                errors.push(format!(
                    "subject {} has an empty fixed slot on {} at {}",
                    s.id,
                    f.day,
                    f.time_slot()
                ));
            }
            if !rooms.contains(&f.classroom) {
                errors.push(format!(
                    "subject {} fixes a slot in unknown classroom {}",
                    s.id, f.classroom
                ));
            }
        }
    }

    let subjects: HashSet<_> = req.subjects.iter().map(|s| &s.id).collect();
    for f in &req.faculty {
        for sid in &f.subjects {
            if !subjects.contains(sid) {
                errors.push(format!("faculty {} lists unknown subject {}", f.id, sid));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Msg(errors))
    }
}

/// Subjects the search can never place, reported as constraint violations.
pub fn diagnose(req: &OptimizeRequest) -> Vec<Conflict> {
    let mut out = Vec::new();
    for s in req.subjects.iter().filter(|s| !s.has_fixed_slots()) {
        if !req.faculty.iter().any(|f| f.can_teach(&s.id)) {
            out.push(
                Conflict::new(
                    ConflictKind::ConstraintViolation,
                    Severity::Medium,
                    format!("No faculty is authorized to teach {}", s.label()),
                )
                .with_suggestions(&["Assign a qualified faculty member to the subject"]),
            );
        }
        if !req.classrooms.iter().any(|r| r.suits(&s.class_requirements)) {
            let need = &s.class_requirements;
            out.push(
                Conflict::new(
                    ConflictKind::ConstraintViolation,
                    Severity::Medium,
                    format!(
                        "No {:?} classroom seats {} students for {}",
                        need.preferred_classroom_type,
                        need.min_classroom_capacity,
                        s.label()
                    ),
                )
                .with_suggestions(&[
                    "Change the preferred classroom type",
                    "Lower the minimum classroom capacity",
                ]),
            );
        }
    }
    out
}
