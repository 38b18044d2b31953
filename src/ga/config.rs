//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::error::ConfigError;
use super::selection::Selection;
use super::types::Objective;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, operator rates, objective direction, and the
/// three stopping criteria (stagnation, wall clock, generation count).
///
/// # Defaults
///
/// ```
/// use u_genopt::ga::{GaConfig, Objective};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.iteration_limit, 1000);
/// assert_eq!(config.time_limit_ms, 5000);
/// assert_eq!(config.objective, Objective::Maximize);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genopt::ga::{GaConfig, Objective};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_objective(Objective::Minimize)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Must be even because offspring are produced in pairs.
    pub population_size: usize,

    /// Maximum number of generations.
    pub iteration_limit: usize,

    /// Wall-clock budget in milliseconds, checked once per generation.
    ///
    /// The run may overshoot by up to one generation's worth of work; 0
    /// stops after the first bred generation.
    pub time_limit_ms: u64,

    /// Probability of mutating each child (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability of recombining each parent pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Stop after this many consecutive generations without a new incumbent.
    pub improvement_iteration_limit: usize,

    /// Whether higher or lower objective values are better.
    pub objective: Objective,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Report progress every this many generations.
    ///
    /// Generations that produce a new incumbent are always reported.
    /// `0` disables periodic reports.
    pub progress_interval: usize,

    /// Evaluate individuals on rayon workers (requires the `parallel`
    /// feature; ignored otherwise). Results are identical either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            iteration_limit: 1000,
            time_limit_ms: 5000,
            mutation_rate: 0.02,
            crossover_rate: 0.6,
            improvement_iteration_limit: 500,
            objective: Objective::Maximize,
            selection: Selection::default(),
            progress_interval: 1,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_iteration_limit(mut self, n: usize) -> Self {
        self.iteration_limit = n;
        self
    }

    /// Sets the wall-clock limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the per-child mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the per-pair crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_improvement_iteration_limit(mut self, limit: usize) -> Self {
        self.improvement_iteration_limit = limit;
        self
    }

    /// Sets the optimization direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the periodic progress interval (0 to report improvements only).
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.population_size % 2 != 0 {
            return Err(ConfigError::OddPopulationSize(self.population_size));
        }
        check_probability("mutation_rate", self.mutation_rate)?;
        check_probability("crossover_rate", self.crossover_rate)?;
        if self.improvement_iteration_limit == 0 {
            return Err(ConfigError::ZeroImprovementLimit);
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
