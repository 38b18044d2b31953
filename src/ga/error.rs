//! GA error types.

use super::runner::Phase;

/// An invalid [`GaConfig`](super::GaConfig) parameter.
///
/// Returned by [`GaConfig::validate`](super::GaConfig::validate) before any
/// work starts, so a bad option never fails mid-run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("population_size must be even, got {0}")]
    OddPopulationSize(usize),
    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("improvement_iteration_limit must be at least 1")]
    ZeroImprovementLimit,
}

/// Errors surfaced by the GA engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("population is empty")]
    EmptyPopulation,
    #[error("individual {index} evaluated to non-finite value {value}")]
    NonFiniteValue { index: usize, value: f64 },
    #[error("{operation} is not allowed in phase {phase:?}")]
    OutOfPhase {
        operation: &'static str,
        phase: Phase,
    },
}
