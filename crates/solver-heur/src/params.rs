use std::time::{Duration, Instant};

use thiserror::Error;
use types::GaParams;

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("populationSize must be at least 1")]
    EmptyPopulation,
    #[error("tournamentSize must be at least 1")]
    EmptyTournament,
    #[error("{name} must lie in [0, 1], got {value}")]
    Rate { name: &'static str, value: f64 },
}

pub fn validate_params(p: &GaParams) -> Result<(), ParamsError> {
    if p.population_size == 0 {
        return Err(ParamsError::EmptyPopulation);
    }
    if p.tournament_size == 0 {
        return Err(ParamsError::EmptyTournament);
    }
    for (name, value) in [
        ("eliteRatio", p.elite_ratio),
        ("mutationRate", p.mutation_rate),
        ("crossoverInclusion", p.crossover_inclusion),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ParamsError::Rate { name, value });
        }
    }
    Ok(())
}

/// Individuals carried over unchanged; at least one so the best never regresses.
pub fn elite_count(p: &GaParams) -> usize {
    let n = (p.population_size as f64 * p.elite_ratio).floor() as usize;
    n.clamp(1, p.population_size.max(1))
}

pub fn deadline(p: &GaParams, started: Instant) -> Option<Instant> {
    p.time_limit_ms.map(|ms| started + Duration::from_millis(ms))
}
