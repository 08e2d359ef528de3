use std::collections::HashMap;

use types::{Conflict, ConflictKind, OptimizeRequest, ScheduledClass, Severity, WeeklySchedule};

const FACULTY_CLASH_HINTS: &[&str] = &[
    "Assign another qualified faculty member",
    "Move one session to a free time slot",
];
const CLASSROOM_CLASH_HINTS: &[&str] = &["Use different classroom", "Move one session to a free time slot"];

fn same_slot(a: &ScheduledClass, b: &ScheduledClass) -> bool {
    a.time_slot == b.time_slot
}

/// Visits every unordered pair of distinct sessions sharing a day and slot.
fn for_each_slot_pair(schedule: &WeeklySchedule, mut f: impl FnMut(&ScheduledClass, &ScheduledClass)) {
    for (_, sessions) in schedule.days() {
        for (i, a) in sessions.iter().enumerate() {
            for b in &sessions[i + 1..] {
                if same_slot(a, b) {
                    f(a, b);
                }
            }
        }
    }
}

/// Number of clashes `detect_conflicts` would report, without building them.
pub fn count_clashes(schedule: &WeeklySchedule) -> usize {
    let mut n = 0;
    for_each_slot_pair(schedule, |a, b| {
        n += a.shares_faculty(b) as usize + (a.classroom == b.classroom) as usize;
    });
    n
}

/// Faculty and classroom double-bookings. A pair sharing both a teacher
/// and a room yields one conflict of each kind.
pub fn detect_conflicts(schedule: &WeeklySchedule) -> Vec<Conflict> {
    let mut out = Vec::new();
    for_each_slot_pair(schedule, |a, b| {
        if a.shares_faculty(b) {
            let fid = a.faculty.as_ref().map(|f| f.0.as_str()).unwrap_or_default();
            out.push(
                Conflict::new(
                    ConflictKind::FacultyClash,
                    Severity::High,
                    format!(
                        "Faculty {fid} is double-booked on {} at {} ({} and {})",
                        a.day, a.time_slot, a.subject, b.subject
                    ),
                )
                .with_suggestions(FACULTY_CLASH_HINTS),
            );
        }
        if a.classroom == b.classroom {
            out.push(
                Conflict::new(
                    ConflictKind::ClassroomClash,
                    Severity::High,
                    format!(
                        "Classroom {} is double-booked on {} at {} ({} and {})",
                        a.classroom, a.day, a.time_slot, a.subject, b.subject
                    ),
                )
                .with_suggestions(CLASSROOM_CLASH_HINTS),
            );
        }
    });
    out
}

/// Soft-limit and coverage checks reported alongside clashes. None of these
/// feed the search fitness.
pub fn audit(schedule: &WeeklySchedule, req: &OptimizeRequest) -> Vec<Conflict> {
    let mut out = Vec::new();
    let day_cap = req.constraints.max_classes_per_day as usize;

    for (day, sessions) in schedule.days() {
        if sessions.len() > day_cap {
            out.push(
                Conflict::new(
                    ConflictKind::ConstraintViolation,
                    Severity::Low,
                    format!(
                        "{day} has {} classes, above the daily limit of {day_cap}",
                        sessions.len()
                    ),
                )
                .with_suggestions(&["Spread sessions across other days"]),
            );
        }
    }

    for f in &req.faculty {
        let mut week_minutes = 0u32;
        for (day, sessions) in schedule.days() {
            let mine: Vec<_> = sessions
                .iter()
                .filter(|c| c.faculty.as_ref() == Some(&f.id))
                .collect();
            let today: u32 = mine.iter().map(|c| c.time_slot.duration_minutes()).sum();
            week_minutes = week_minutes.saturating_add(today);
            if mine.len() > f.workload.max_classes_per_day as usize {
                out.push(
                    Conflict::new(
                        ConflictKind::ConstraintViolation,
                        Severity::Medium,
                        format!(
                            "Faculty {} teaches {} classes on {day}, above their limit of {}",
                            f.id,
                            mine.len(),
                            f.workload.max_classes_per_day
                        ),
                    )
                    .with_suggestions(&["Reassign a session to another faculty member"]),
                );
            }
        }
        if week_minutes > f.workload.max_hours_per_week.saturating_mul(60) {
            out.push(
                Conflict::new(
                    ConflictKind::ConstraintViolation,
                    Severity::Medium,
                    format!(
                        "Faculty {} is scheduled for {:.1} hours, above their weekly limit of {}",
                        f.id,
                        week_minutes as f64 / 60.0,
                        f.workload.max_hours_per_week
                    ),
                )
                .with_suggestions(&["Reassign a session to another faculty member"]),
            );
        }
    }

    let mut placed: HashMap<&types::SubjectId, usize> = HashMap::new();
    for c in schedule.sessions() {
        *placed.entry(&c.subject).or_default() += 1;
    }
    for s in req.subjects.iter().filter(|s| !s.has_fixed_slots()) {
        let need = s.class_requirements.classes_per_week as usize;
        let have = placed.get(&s.id).copied().unwrap_or(0);
        if have < need {
            out.push(
                Conflict::new(
                    ConflictKind::ConstraintViolation,
                    Severity::Medium,
                    format!("{} has {have} of {need} weekly sessions scheduled", s.label()),
                )
                .with_suggestions(&[
                    "Add qualified faculty or suitable classrooms",
                    "Relax availability on busy days",
                ]),
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{ClassType, Day, Faculty, RoomType, Subject, TimeOfDay, TimeSlot};

    fn session(day: Day, h: u16, subject: &str, faculty: &str, room: &str) -> ScheduledClass {
        ScheduledClass {
            day,
            time_slot: TimeSlot::new(TimeOfDay::from_hm(h, 0), TimeOfDay::from_hm(h + 1, 0)),
            subject: subject.into(),
            faculty: Some(faculty.into()),
            classroom: room.into(),
            class_type: ClassType::Theory,
            is_fixed: false,
        }
    }

    #[test]
    fn clean_schedule_has_no_conflicts() {
        let mut s = WeeklySchedule::new();
        s.push(session(Day::Monday, 9, "S1", "F1", "R1"));
        s.push(session(Day::Monday, 10, "S1", "F1", "R1"));
        s.push(session(Day::Tuesday, 9, "S1", "F1", "R1"));
        assert!(detect_conflicts(&s).is_empty());
        assert_eq!(count_clashes(&s), 0);
    }

    #[test]
    fn reports_each_clash_kind() {
        let mut s = WeeklySchedule::new();
        s.push(session(Day::Monday, 9, "S1", "F1", "R1"));
        s.push(session(Day::Monday, 9, "S2", "F1", "R2"));
        s.push(session(Day::Monday, 9, "S3", "F3", "R2"));
        let found = detect_conflicts(&s);
        let kinds: Vec<_> = found.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ConflictKind::FacultyClash, ConflictKind::ClassroomClash]);
        assert!(found[0].description.contains("F1"));
        assert!(found[1].suggestions.iter().any(|h| h == "Use different classroom"));
        assert_eq!(count_clashes(&s), found.len());
    }

    #[test]
    fn identical_twins_clash_on_both_resources() {
        let mut s = WeeklySchedule::new();
        s.push(session(Day::Friday, 14, "S1", "F1", "R1"));
        s.push(session(Day::Friday, 14, "S1", "F1", "R1"));
        assert_eq!(count_clashes(&s), 2);
        assert_eq!(detect_conflicts(&s).len(), 2);
    }

    #[test]
    fn audit_flags_limits_and_shortfalls() {
        let mut req = OptimizeRequest::default();
        req.constraints.max_classes_per_day = 2;
        let mut f = Faculty::new("F1", &["S1"]);
        f.workload.max_classes_per_day = 2;
        f.workload.max_hours_per_week = 2;
        req.faculty.push(f);
        req.subjects.push(Subject::new("S1", 5, RoomType::LectureHall));

        let mut s = WeeklySchedule::new();
        for h in [9, 10, 11] {
            s.push(session(Day::Monday, h, "S1", "F1", "R1"));
        }
        let found = audit(&s, &req);
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|c| c.kind == ConflictKind::ConstraintViolation));
        assert_eq!(found[0].severity, Severity::Low);
        assert!(found[3].description.contains("3 of 5"));
    }

    #[test]
    fn audit_is_quiet_within_limits() {
        let mut req = OptimizeRequest::default();
        req.faculty.push(Faculty::new("F1", &["S1"]));
        req.subjects.push(Subject::new("S1", 1, RoomType::LectureHall));
        let mut s = WeeklySchedule::new();
        s.push(session(Day::Monday, 9, "S1", "F1", "R1"));
        assert!(audit(&s, &req).is_empty());
    }

    #[test]
    fn unbounded_weekly_hours_never_trip() {
        let mut req = OptimizeRequest::default();
        let mut f = Faculty::new("F1", &["S1"]);
        f.workload.max_hours_per_week = u32::MAX;
        f.workload.max_classes_per_day = u32::MAX;
        req.faculty.push(f);
        req.subjects.push(Subject::new("S1", 2, RoomType::LectureHall));
        let mut s = WeeklySchedule::new();
        s.push(session(Day::Monday, 9, "S1", "F1", "R1"));
        s.push(session(Day::Tuesday, 9, "S1", "F1", "R1"));
        assert!(audit(&s, &req).is_empty());
    }
}
