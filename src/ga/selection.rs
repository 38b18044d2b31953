//! Selection strategies for the GA.
//!
//! All weighted strategies read [`Individual::cumulative_scaled_value`], so
//! they assume the population has just been evaluated and scaled. Scaling
//! already folds in the objective direction; only the tournament needs to
//! compare raw values.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 3 (roulette wheel, linear scaling)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::error::GaError;
use super::types::{Individual, Objective};
use crate::sampling::seek_lower_bound;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_genopt::ga::Selection;
///
/// // Two roulette draws, keep the better one (default)
/// let sel = Selection::Tournament;
///
/// // A single fitness-proportionate draw
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Selection {
    /// Two independent roulette draws; the better of the pair wins.
    #[default]
    Tournament,

    /// Fitness-proportionate draw over the scaled values.
    ///
    /// # Complexity
    /// O(log n) per selection
    Roulette,

    /// Uniform draw, ignoring fitness entirely.
    Uniform,
}

impl Selection {
    /// Selects a parent index from an evaluated population.
    ///
    /// # Errors
    /// [`GaError::EmptyPopulation`] if `population` is empty.
    pub fn select<G, R: Rng>(
        &self,
        population: &[Individual<G>],
        objective: Objective,
        rng: &mut R,
    ) -> Result<usize, GaError> {
        match self {
            Selection::Tournament => tournament(population, objective, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Uniform => uniform(population, rng),
        }
    }
}

/// Roulette draw: key uniform in `[0, total)`, located by binary search.
pub(crate) fn roulette<G, R: Rng>(
    population: &[Individual<G>],
    rng: &mut R,
) -> Result<usize, GaError> {
    let total = population
        .last()
        .ok_or(GaError::EmptyPopulation)?
        .cumulative_scaled_value;
    let key = rng.random::<f64>() * total;
    seek_lower_bound(population, key, |ind| ind.cumulative_scaled_value)
        .ok_or(GaError::EmptyPopulation)
}

/// Two roulette draws; on equal values the second draw wins when
/// maximizing and the first when minimizing.
pub(crate) fn tournament<G, R: Rng>(
    population: &[Individual<G>],
    objective: Objective,
    rng: &mut R,
) -> Result<usize, GaError> {
    let a = roulette(population, rng)?;
    let b = roulette(population, rng)?;

    let a_higher = population[a].value > population[b].value;
    let winner = match (objective, a_higher) {
        (Objective::Maximize, true) | (Objective::Minimize, false) => a,
        (Objective::Maximize, false) | (Objective::Minimize, true) => b,
    };
    Ok(winner)
}

fn uniform<G, R: Rng>(population: &[Individual<G>], rng: &mut R) -> Result<usize, GaError> {
    if population.is_empty() {
        return Err(GaError::EmptyPopulation);
    }
    Ok(rng.random_range(0..population.len()))
}
