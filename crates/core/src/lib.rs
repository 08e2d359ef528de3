pub mod availability;
pub mod catalog;
pub mod conflicts;
pub mod placement;
pub mod scoring;
pub mod validate;

pub use types::{
    Classroom, Conflict, Constraints, Faculty, GaParams, Metrics, OptimizeOutcome, OptimizeRequest,
    SolveEnvelope, Subject, TimetableOption, WeeklySchedule,
};
pub use validate::{diagnose, validate, ValidationError};

/// A timetable producer. Runs are CPU-bound and synchronous; callers that
/// need a wall-clock bound set `GaParams::time_limit_ms`.
pub trait Solver: Send + Sync + 'static {
    fn solve(&self, env: &SolveEnvelope) -> anyhow::Result<OptimizeOutcome>;
}
