pub mod engine;
pub mod generator;
pub mod operators;
pub mod params;
pub mod problem;

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sched_core::conflicts::{audit, detect_conflicts};
use sched_core::placement::place_fixed_slots;
use sched_core::scoring::{compute_metrics, overall_score, ScoreWeights};
use sched_core::{diagnose, Solver};
use tracing::info;
use types::{
    GaParams, OptimizeOutcome, OptimizeRequest, RunStats, SolveEnvelope, TimetableOption,
    WeeklySchedule,
};

use crate::engine::evolve;
pub use crate::params::{validate_params, ParamsError};
use crate::problem::Problem;

/// Genetic timetable search. Stateless; every run is driven by the
/// envelope's `GaParams`, including the seed.
#[derive(Clone, Debug, Default)]
pub struct GeneticSolver {
    weights: ScoreWeights,
}

impl GeneticSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn optimize(&self, env: &SolveEnvelope) -> Result<OptimizeOutcome, ParamsError> {
        let mut rng = ChaCha8Rng::seed_from_u64(env.params.seed);
        self.optimize_with_rng(&env.request, &env.params, &mut rng)
    }

    /// Fixed placements, then the search, then reporting, drawing from `rng`.
    pub fn optimize_with_rng<R: Rng>(
        &self,
        req: &OptimizeRequest,
        params: &GaParams,
        rng: &mut R,
    ) -> Result<OptimizeOutcome, ParamsError> {
        validate_params(params)?;
        let started = Instant::now();
        info!(
            subjects = req.subjects.len(),
            faculty = req.faculty.len(),
            classrooms = req.classrooms.len(),
            population = params.population_size,
            generations = params.generations,
            seed = params.seed,
            "optimization started"
        );

        let mut base = WeeklySchedule::new();
        let mut conflicts = place_fixed_slots(&mut base, &req.subjects, &req.faculty);
        conflicts.extend(diagnose(req));

        let problem = Problem::new(req, base);
        let evo = evolve(&problem, params, rng);
        let schedule = evo.best.schedule;

        conflicts.extend(detect_conflicts(&schedule));
        conflicts.extend(audit(&schedule, req));

        let metrics = compute_metrics(&schedule, &problem.scoring());
        let score = overall_score(&metrics, &self.weights);

        let sessions_placed = schedule
            .sessions()
            .filter(|c| problem.quotas.contains_key(&c.subject))
            .count() as u32;
        let stats = RunStats {
            seed: params.seed,
            population: params.population_size,
            generations_run: evo.generations_run,
            best_fitness_history: evo.history,
            sessions_required: problem.sessions_required(),
            sessions_placed,
            elapsed_ms: started.elapsed().as_millis() as u64,
            stopped_early: evo.stopped_early,
        };
        info!(
            score,
            sessions = schedule.len(),
            conflicts = conflicts.len(),
            elapsed_ms = stats.elapsed_ms,
            "optimization finished"
        );

        Ok(OptimizeOutcome {
            schedule,
            score,
            metrics,
            conflicts,
            stats,
        })
    }

    /// `count` independent runs seeded `seed`, `seed + 1`, ..., returned best
    /// score first. Ids follow run order, starting at 1.
    pub fn generate_options(
        &self,
        env: &SolveEnvelope,
        count: u32,
    ) -> Result<Vec<TimetableOption>, ParamsError> {
        validate_params(&env.params)?;
        let mut options = (0..count)
            .map(|i| {
                let params = GaParams {
                    seed: env.params.seed.wrapping_add(u64::from(i)),
                    ..env.params.clone()
                };
                let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
                let outcome = self.optimize_with_rng(&env.request, &params, &mut rng)?;
                Ok(TimetableOption { id: i + 1, outcome })
            })
            .collect::<Result<Vec<TimetableOption>, ParamsError>>()?;
        options.sort_by(|a, b| b.outcome.score.total_cmp(&a.outcome.score));
        Ok(options)
    }
}

impl Solver for GeneticSolver {
    fn solve(&self, env: &SolveEnvelope) -> anyhow::Result<OptimizeOutcome> {
        Ok(self.optimize(env)?)
    }
}
