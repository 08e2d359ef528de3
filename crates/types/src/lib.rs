mod time;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use time::{TimeOfDay, TimeParseError, TimeSlot, MINUTES_PER_DAY};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}
id_newtype!(SubjectId);
id_newtype!(FacultyId);
id_newtype!(ClassroomId);

#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    #[default]
    Theory,
    Practical,
    Tutorial,
    Project,
    Seminar,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    LectureHall,
    Laboratory,
    SeminarRoom,
    Auditorium,
    TutorialRoom,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockedInterval {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub reason: Option<String>,
}

/// An entry of the flagged `timeSlots` list; only `isBlocked` entries block.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarkedInterval {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A day's availability. Blocks come from `blocked` and from the flagged
/// entries of `timeSlots`; either list may be used.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub blocked: Vec<BlockedInterval>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_slots: Vec<MarkedInterval>,
}

impl Default for DayAvailability {
    fn default() -> Self {
        Self {
            is_available: true,
            blocked: Vec::new(),
            time_slots: Vec::new(),
        }
    }
}

impl DayAvailability {
    pub fn blocked_intervals(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        let plain = self
            .blocked
            .iter()
            .map(|b| TimeSlot::new(b.start_time, b.end_time));
        let flagged = self
            .time_slots
            .iter()
            .filter(|m| m.is_blocked)
            .map(|m| TimeSlot::new(m.start_time, m.end_time));
        plain.chain(flagged)
    }
}

/// Per-day availability. A day with no entry is open all day.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Availability(pub BTreeMap<Day, DayAvailability>);

impl Availability {
    pub fn get(&self, day: Day) -> Option<&DayAvailability> {
        self.0.get(&day)
    }

    pub fn close(mut self, day: Day) -> Self {
        self.0.entry(day).or_default().is_available = false;
        self
    }

    pub fn block(mut self, day: Day, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        self.0.entry(day).or_default().blocked.push(BlockedInterval {
            start_time,
            end_time,
            reason: None,
        });
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FixedSlot {
    pub day: Day,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub classroom: ClassroomId,
    #[serde(default)]
    pub reason: Option<String>,
}

impl FixedSlot {
    pub fn time_slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassRequirements {
    pub classes_per_week: u32,
    #[serde(default = "default_hours_per_class")]
    pub hours_per_class: u32,
    pub preferred_classroom_type: RoomType,
    #[serde(default = "default_min_capacity")]
    pub min_classroom_capacity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub class_type: ClassType,
    pub class_requirements: ClassRequirements,
    #[serde(default)]
    pub fixed_time_slots: Vec<FixedSlot>,
    /// Carried as data only; sequencing is not scheduled.
    #[serde(default)]
    pub prerequisites: Vec<SubjectId>,
}

impl Subject {
    pub fn new(id: &str, classes_per_week: u32, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            code: String::new(),
            name: String::new(),
            class_type: ClassType::default(),
            class_requirements: ClassRequirements {
                classes_per_week,
                hours_per_class: default_hours_per_class(),
                preferred_classroom_type: room_type,
                min_classroom_capacity: default_min_capacity(),
            },
            fixed_time_slots: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    pub fn has_fixed_slots(&self) -> bool {
        !self.fixed_time_slots.is_empty()
    }

    /// Human-facing name used in conflict descriptions.
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.code.is_empty() {
            &self.code
        } else {
            &self.id.0
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workload {
    #[serde(default = "default_max_hours_per_week")]
    pub max_hours_per_week: u32,
    #[serde(default = "default_faculty_classes_per_day")]
    pub max_classes_per_day: u32,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            max_hours_per_week: default_max_hours_per_week(),
            max_classes_per_day: default_faculty_classes_per_day(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: FacultyId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<SubjectId>,
    #[serde(default)]
    pub workload: Workload,
    #[serde(default)]
    pub availability: Availability,
}

impl Faculty {
    pub fn new(id: &str, subjects: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: subjects.iter().map(|s| SubjectId::from(*s)).collect(),
            workload: Workload::default(),
            availability: Availability::default(),
        }
    }

    pub fn can_teach(&self, subject: &SubjectId) -> bool {
        self.subjects.contains(subject)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: ClassroomId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
    #[serde(default)]
    pub availability: Availability,
}

impl Classroom {
    pub fn new(id: &str, room_type: RoomType, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            room_type,
            capacity,
            availability: Availability::default(),
        }
    }

    pub fn suits(&self, req: &ClassRequirements) -> bool {
        self.room_type == req.preferred_classroom_type && self.capacity >= req.min_classroom_capacity
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledClass {
    pub day: Day,
    pub time_slot: TimeSlot,
    pub subject: SubjectId,
    /// Fixed placements whose subject has no free authorized teacher carry no faculty.
    #[serde(default)]
    pub faculty: Option<FacultyId>,
    pub classroom: ClassroomId,
    pub class_type: ClassType,
    #[serde(default)]
    pub is_fixed: bool,
}

impl ScheduledClass {
    pub fn shares_faculty(&self, other: &ScheduledClass) -> bool {
        matches!((&self.faculty, &other.faculty), (Some(a), Some(b)) if a == b)
    }

    /// Same day, identical slot, and a shared teacher or room.
    pub fn collides_with(&self, other: &ScheduledClass) -> bool {
        self.day == other.day
            && self.time_slot == other.time_slot
            && (self.shares_faculty(other) || self.classroom == other.classroom)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<Day, Vec<ScheduledClass>>);

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self(Day::ALL.iter().map(|&d| (d, Vec::new())).collect())
    }

    pub fn day(&self, day: Day) -> &[ScheduledClass] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn day_mut(&mut self, day: Day) -> &mut Vec<ScheduledClass> {
        self.0.entry(day).or_default()
    }

    /// Appends to the class's own day; collisions are not rejected here.
    pub fn push(&mut self, class: ScheduledClass) {
        self.day_mut(class.day).push(class);
    }

    pub fn collides(&self, class: &ScheduledClass) -> bool {
        self.day(class.day).iter().any(|c| c.collides_with(class))
    }

    pub fn days(&self) -> impl Iterator<Item = (Day, &[ScheduledClass])> + '_ {
        Day::ALL.iter().map(move |&d| (d, self.day(d)))
    }

    pub fn sessions(&self) -> impl Iterator<Item = &ScheduledClass> + '_ {
        self.0.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_for_subject(&self, subject: &SubjectId) -> usize {
        self.sessions().filter(|c| &c.subject == subject).count()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LunchBreak {
    #[serde(default = "default_lunch_start")]
    pub start_time: TimeOfDay,
    /// Minutes.
    #[serde(default = "default_lunch_duration")]
    pub duration: u32,
}

impl Default for LunchBreak {
    fn default() -> Self {
        Self {
            start_time: default_lunch_start(),
            duration: default_lunch_duration(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default = "default_max_classes_per_day")]
    pub max_classes_per_day: u32,
    #[serde(default = "default_day_start")]
    pub start_time: TimeOfDay,
    #[serde(default = "default_day_end")]
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub lunch_break: LunchBreak,
    /// Minutes; every catalog slot has this length.
    #[serde(default = "default_class_duration")]
    pub class_duration: u32,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_classes_per_day: default_max_classes_per_day(),
            start_time: default_day_start(),
            end_time: default_day_end(),
            lunch_break: LunchBreak::default(),
            class_duration: default_class_duration(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    FacultyClash,
    ClassroomClash,
    StudentClash,
    ConstraintViolation,
}

#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Conflict {
    pub fn new(kind: ConflictKind, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            severity,
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub classroom_utilization: f64,
    pub faculty_workload_balance: f64,
    pub student_satisfaction: f64,
    pub time_slot_efficiency: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub faculty: Vec<Faculty>,
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GaParams {
    pub population_size: usize,
    pub generations: usize,
    pub elite_ratio: f64,
    pub tournament_size: usize,
    pub mutation_rate: f64,
    /// Probability that a pooled parent session is offered to the offspring.
    pub crossover_inclusion: f64,
    pub seed: u64,
    pub time_limit_ms: Option<u64>,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            elite_ratio: 0.2,
            tournament_size: 3,
            mutation_rate: 0.1,
            crossover_inclusion: 0.5,
            seed: 0,
            time_limit_ms: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Default)]
pub struct SolveEnvelope {
    #[serde(flatten)]
    pub request: OptimizeRequest,
    #[serde(default)]
    pub params: GaParams,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub seed: u64,
    pub population: usize,
    pub generations_run: usize,
    pub best_fitness_history: Vec<f64>,
    pub sessions_required: u32,
    pub sessions_placed: u32,
    pub elapsed_ms: u64,
    pub stopped_early: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeOutcome {
    pub schedule: WeeklySchedule,
    pub score: f64,
    pub metrics: Metrics,
    pub conflicts: Vec<Conflict>,
    pub stats: RunStats,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct TimetableOption {
    pub id: u32,
    #[serde(flatten)]
    pub outcome: OptimizeOutcome,
}

fn default_true() -> bool {
    true
}
fn default_hours_per_class() -> u32 {
    1
}
fn default_min_capacity() -> u32 {
    30
}
fn default_max_hours_per_week() -> u32 {
    20
}
fn default_faculty_classes_per_day() -> u32 {
    4
}
fn default_max_classes_per_day() -> u32 {
    6
}
fn default_day_start() -> TimeOfDay {
    TimeOfDay::from_hm(9, 0)
}
fn default_day_end() -> TimeOfDay {
    TimeOfDay::from_hm(17, 0)
}
fn default_lunch_start() -> TimeOfDay {
    TimeOfDay::from_hm(13, 0)
}
fn default_lunch_duration() -> u32 {
    60
}
fn default_class_duration() -> u32 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(day: Day, h: u16, faculty: &str, room: &str) -> ScheduledClass {
        ScheduledClass {
            day,
            time_slot: TimeSlot::new(TimeOfDay::from_hm(h, 0), TimeOfDay::from_hm(h + 1, 0)),
            subject: "S1".into(),
            faculty: Some(faculty.into()),
            classroom: room.into(),
            class_type: ClassType::Theory,
            is_fixed: false,
        }
    }

    #[test]
    fn collision_needs_same_slot_and_shared_resource() {
        let a = class(Day::Monday, 9, "F1", "R1");
        assert!(a.collides_with(&class(Day::Monday, 9, "F1", "R2")));
        assert!(a.collides_with(&class(Day::Monday, 9, "F2", "R1")));
        assert!(!a.collides_with(&class(Day::Monday, 9, "F2", "R2")));
        assert!(!a.collides_with(&class(Day::Monday, 10, "F1", "R1")));
        assert!(!a.collides_with(&class(Day::Tuesday, 9, "F1", "R1")));

        let mut unstaffed = class(Day::Monday, 9, "F1", "R2");
        unstaffed.faculty = None;
        assert!(!a.collides_with(&unstaffed));
    }

    #[test]
    fn schedule_routes_classes_to_their_day() {
        let mut s = WeeklySchedule::new();
        assert!(s.is_empty());
        s.push(class(Day::Friday, 9, "F1", "R1"));
        s.push(class(Day::Friday, 10, "F1", "R1"));
        assert_eq!(s.day(Day::Friday).len(), 2);
        assert!(s.day(Day::Monday).is_empty());
        assert_eq!(s.len(), 2);
        assert_eq!(s.count_for_subject(&"S1".into()), 2);
        assert!(s.collides(&class(Day::Friday, 10, "F2", "R1")));
        assert_eq!(s.days().count(), 6);
    }

    #[test]
    fn request_defaults_fill_missing_fields() {
        let req: OptimizeRequest = serde_json::from_value(serde_json::json!({
            "subjects": [{
                "id": "S1",
                "type": "practical",
                "classRequirements": {"classesPerWeek": 2, "preferredClassroomType": "laboratory"}
            }],
            "faculty": [{"id": "F1", "subjects": ["S1"],
                "availability": {"monday": {"isAvailable": false}}}],
            "classrooms": [{"id": "R1", "type": "laboratory", "capacity": 40}]
        }))
        .unwrap();
        assert_eq!(req.constraints.max_classes_per_day, 6);
        assert_eq!(req.constraints.lunch_break.start_time, TimeOfDay::from_hm(13, 0));
        let s = &req.subjects[0];
        assert_eq!(s.class_type, ClassType::Practical);
        assert_eq!(s.class_requirements.min_classroom_capacity, 30);
        assert!(req.classrooms[0].suits(&s.class_requirements));
        let f = &req.faculty[0];
        assert_eq!(f.workload.max_classes_per_day, 4);
        assert!(!f.availability.get(Day::Monday).unwrap().is_available);
        assert!(f.availability.get(Day::Tuesday).is_none());
    }

    #[test]
    fn schedule_serializes_as_day_map() {
        let mut s = WeeklySchedule::new();
        s.push(class(Day::Monday, 9, "F1", "R1"));
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["monday"][0]["timeSlot"]["startTime"], "09:00");
        assert_eq!(v["saturday"], serde_json::json!([]));
    }

    #[test]
    fn flagged_time_slots_block_only_when_marked() {
        let day: DayAvailability = serde_json::from_value(serde_json::json!({
            "timeSlots": [
                {"startTime": "09:00", "endTime": "11:00", "isBlocked": true, "reason": "senate"},
                {"startTime": "14:00", "endTime": "15:00"}
            ],
            "blocked": [{"startTime": "16:00", "endTime": "17:00"}]
        }))
        .unwrap();
        assert!(day.is_available);
        let blocks: Vec<String> = day.blocked_intervals().map(|b| b.to_string()).collect();
        assert_eq!(blocks, vec!["16:00-17:00", "09:00-11:00"]);
    }
}
