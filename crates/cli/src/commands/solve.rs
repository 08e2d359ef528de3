use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use sched_core::Solver;
use solver_heur::GeneticSolver;
use tracing::{info, warn};
use types::GaParams;

use super::{print_json, read_envelope};

/// Search settings given here win over `TIMETABLE__GA__*` variables, which
/// win over the request's own `params` block.
#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Request document, or `-` to read stdin
    pub input: PathBuf,

    #[arg(long, env = "TIMETABLE__GA__SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "TIMETABLE__GA__POPULATION")]
    pub population: Option<usize>,

    #[arg(long, env = "TIMETABLE__GA__GENERATIONS")]
    pub generations: Option<usize>,

    #[arg(long, env = "TIMETABLE__GA__MUTATION_RATE")]
    pub mutation_rate: Option<f64>,

    /// Wall-clock budget; the best timetable so far is returned when it runs out
    #[arg(long, env = "TIMETABLE__GA__TIME_LIMIT_MS")]
    pub time_limit_ms: Option<u64>,

    /// Produce this many alternatives from consecutive seeds, best first
    #[arg(long)]
    pub options: Option<u32>,

    #[arg(long)]
    pub pretty: bool,
}

impl SolveArgs {
    pub fn apply(&self, params: &mut GaParams) {
        if let Some(v) = self.seed {
            params.seed = v;
        }
        if let Some(v) = self.population {
            params.population_size = v;
        }
        if let Some(v) = self.generations {
            params.generations = v;
        }
        if let Some(v) = self.mutation_rate {
            params.mutation_rate = v;
        }
        if self.time_limit_ms.is_some() {
            params.time_limit_ms = self.time_limit_ms;
        }
    }
}

pub fn handle(args: SolveArgs) -> anyhow::Result<ExitCode> {
    let mut env = read_envelope(&args.input)?;
    args.apply(&mut env.params);

    if let Err(e) = sched_core::validate(&env.request) {
        for msg in e.errors() {
            warn!(problem = %msg, "request failed validation, solving anyway");
        }
    }

    let solver = GeneticSolver::new();
    match args.options {
        Some(count) => {
            let options = solver.generate_options(&env, count)?;
            info!(count = options.len(), "options generated");
            print_json(&options, args.pretty)?;
        }
        None => {
            let solver: &dyn Solver = &solver;
            let outcome = solver.solve(&env)?;
            print_json(&outcome, args.pretty)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
