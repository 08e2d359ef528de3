use std::time::Instant;

use rand::Rng;
use rayon::prelude::*;
use sched_core::scoring::{fitness, ScoringContext};
use tracing::{debug, warn};
use types::GaParams;

use crate::generator::generate_candidate;
use crate::operators::{crossover, mutate, tournament, Individual};
use crate::params::{deadline, elite_count};
use crate::problem::Problem;

#[derive(Clone, Debug)]
pub struct Evolution {
    pub best: Individual,
    /// Best fitness at each evaluation, initial population first.
    pub history: Vec<f64>,
    pub generations_run: usize,
    pub stopped_early: bool,
}

/// Scores every individual in place. Individuals own their schedules, so
/// the work fans out across threads without locking.
pub fn evaluate_population(pop: &mut [Individual], ctx: &ScoringContext<'_>) {
    pop.par_iter_mut()
        .for_each(|ind| ind.fitness = fitness(&ind.schedule, ctx));
}

fn sort_by_fitness(pop: &mut [Individual]) {
    pop.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

/// Runs the generational loop. `params` must already be validated.
///
/// Each generation is scored, sorted best-first, and replaced by its elites
/// plus tournament-bred offspring. The final population is scored once more
/// and its best member returned.
pub fn evolve<R: Rng>(problem: &Problem<'_>, params: &GaParams, rng: &mut R) -> Evolution {
    let started = Instant::now();
    let stop_at = deadline(params, started);
    let ctx = problem.scoring();
    let size = params.population_size;
    let elites = elite_count(params);

    let mut pop: Vec<Individual> = (0..size)
        .map(|_| Individual::unscored(generate_candidate(problem, rng)))
        .collect();

    let mut history = Vec::with_capacity(params.generations + 1);
    let mut generations_run = 0;
    let mut stopped_early = false;

    for generation in 0..params.generations {
        evaluate_population(&mut pop, &ctx);
        sort_by_fitness(&mut pop);
        let best = pop[0].fitness;
        history.push(best);
        if tracing::enabled!(tracing::Level::DEBUG) {
            let mean = pop.iter().map(|i| i.fitness).sum::<f64>() / pop.len() as f64;
            debug!(generation, best, mean, "generation scored");
        }

        let mut next: Vec<Individual> = pop[..elites].to_vec();
        while next.len() < size {
            let p1 = tournament(&pop, params.tournament_size, rng);
            let p2 = tournament(&pop, params.tournament_size, rng);
            let mut child = crossover(
                &p1.schedule,
                &p2.schedule,
                &problem.quotas,
                params.crossover_inclusion,
                rng,
            );
            if rng.gen_bool(params.mutation_rate) {
                mutate(&mut child, &problem.catalog, rng);
            }
            next.push(Individual::unscored(child));
        }
        pop = next;
        generations_run += 1;

        if stop_at.is_some_and(|t| Instant::now() >= t) && generations_run < params.generations {
            warn!(generations_run, "time limit reached, returning best so far");
            stopped_early = true;
            break;
        }
    }

    evaluate_population(&mut pop, &ctx);
    sort_by_fitness(&mut pop);
    let best = pop.swap_remove(0);
    history.push(best.fitness);

    Evolution {
        best,
        history,
        generations_run,
        stopped_early,
    }
}
