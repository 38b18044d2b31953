//! GA evolutionary loop execution.
//!
//! [`GeneticOptimizer`] owns one run's state and exposes each step of the
//! loop (initialize → evaluate → breed → evaluate → … → finalize).
//! [`GaRunner`] wraps it in a single call that seeds the RNG from the
//! configuration.

use super::config::GaConfig;
use super::error::GaError;
use super::types::{GaProblem, Individual, Objective, Refinement};
use crate::random::create_rng;
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Why the generation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StopReason {
    /// `improvement_iteration_limit` generations passed without a new incumbent.
    NoImprovement,
    /// The wall-clock budget ran out.
    TimeLimit,
    /// `iteration_limit` generations were bred.
    IterationLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::NoImprovement => "no-improvement",
            StopReason::TimeLimit => "time-limit",
            StopReason::IterationLimit => "iteration-limit",
        })
    }
}

/// Where a [`GeneticOptimizer`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No population yet.
    Uninitialized,
    /// Seed population built, not yet scored.
    EvaluatingInitial,
    /// Population scored; ready to breed.
    Breeding,
    /// Offspring bred, not yet scored.
    Evaluating,
    /// The run has finished.
    Terminated(StopReason),
}

/// Population statistics for the latest evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index (0 is the seed population).
    pub generation: usize,
    /// Lowest objective value in the population.
    pub population_min: f64,
    /// Mean objective value in the population.
    pub population_mean: f64,
    /// Highest objective value in the population.
    pub population_max: f64,
    /// Whether this evaluation produced a new incumbent.
    pub improved: bool,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult<G> {
    /// Chromosome of the best solution found.
    pub best: Vec<G>,

    /// Objective value of `best`.
    pub best_value: f64,

    /// Why the generation loop stopped.
    pub stop_reason: StopReason,

    /// Generation at which the incumbent last improved (0 = seed population).
    pub last_improved_generation: usize,

    /// Number of generations bred.
    pub generations: usize,

    /// Whether the final local search replaced the incumbent.
    pub refined: bool,
}

/// One GA run over a borrowed problem.
///
/// Individual steps are public so callers (and tests) can drive or observe
/// the loop generation by generation; [`optimize`](Self::optimize) runs the
/// whole thing.
///
/// # Usage
///
/// ```
/// use u_genopt::ga::{GaConfig, GeneticOptimizer, Objective};
/// use u_genopt::problems::{Location, Tsp};
/// use u_genopt::random::create_rng;
///
/// let tsp = Tsp::new(&[
///     Location::new(0.0, 0.0),
///     Location::new(1.0, 0.0),
///     Location::new(1.0, 1.0),
///     Location::new(0.0, 1.0),
/// ]);
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_iteration_limit(30)
///     .with_objective(Objective::Minimize);
///
/// let mut optimizer = GeneticOptimizer::new(&tsp, config, create_rng(1)).unwrap();
/// let result = optimizer.optimize(|_| {}).unwrap();
/// assert!((result.best_value - 3.0).abs() < 1e-9);
/// ```
pub struct GeneticOptimizer<'p, P: GaProblem, R: Rng> {
    problem: &'p P,
    config: GaConfig,
    rng: R,
    phase: Phase,
    population: Vec<Individual<P::Gene>>,
    incumbent: Option<Individual<P::Gene>>,
    incumbent_updated: bool,
    stats: GenerationStats,
}

impl<'p, P: GaProblem, R: Rng> GeneticOptimizer<'p, P, R> {
    /// Creates an optimizer after validating `config`.
    ///
    /// `config.seed` is ignored here; the caller supplies the generator.
    pub fn new(problem: &'p P, config: GaConfig, rng: R) -> Result<Self, GaError> {
        config.validate()?;
        Ok(Self {
            problem,
            config,
            rng,
            phase: Phase::Uninitialized,
            population: Vec::new(),
            incumbent: None,
            incumbent_updated: false,
            stats: GenerationStats {
                generation: 0,
                population_min: 0.0,
                population_mean: 0.0,
                population_max: 0.0,
                improved: false,
            },
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The live population.
    pub fn population(&self) -> &[Individual<P::Gene>] {
        &self.population
    }

    /// Best individual seen so far, if any evaluation has run.
    pub fn incumbent(&self) -> Option<&Individual<P::Gene>> {
        self.incumbent.as_ref()
    }

    /// Statistics of the most recent evaluation.
    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// The validated configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Discards any previous state and seeds a fresh population.
    pub fn initialize(&mut self) {
        let problem = self.problem;
        let rng = &mut self.rng;
        self.population = (0..self.config.population_size)
            .map(|_| Individual::new(problem.create_chromosome(&mut *rng)))
            .collect();
        self.incumbent = None;
        self.incumbent_updated = false;
        self.stats.generation = 0;
        self.phase = Phase::EvaluatingInitial;
    }

    /// Scores, scales, and accumulates the population, then updates the
    /// incumbent.
    ///
    /// After this call every `scaled_value` lies in `[0.5, 10.5]` (or is
    /// exactly `1.0` when all values tie), with better individuals weighted
    /// higher, and `cumulative_scaled_value` is non-decreasing.
    ///
    /// Fails with [`GaError::NonFiniteValue`] if any objective value is NaN
    /// or infinite; the incumbent and weights are left untouched.
    pub fn evaluate(&mut self) -> Result<(), GaError> {
        match self.phase {
            Phase::EvaluatingInitial | Phase::Evaluating => {}
            phase => {
                return Err(GaError::OutOfPhase {
                    operation: "evaluate",
                    phase,
                })
            }
        }
        if self.population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }

        self.compute_values();
        if let Some((index, ind)) = self
            .population
            .iter()
            .enumerate()
            .find(|(_, ind)| !ind.value.is_finite())
        {
            return Err(GaError::NonFiniteValue {
                index,
                value: ind.value,
            });
        }

        let mut min_idx = 0;
        let mut max_idx = 0;
        let mut total = 0.0;
        for (i, ind) in self.population.iter().enumerate() {
            if ind.value < self.population[min_idx].value {
                min_idx = i;
            }
            if ind.value > self.population[max_idx].value {
                max_idx = i;
            }
            total += ind.value;
        }
        let min = self.population[min_idx].value;
        let max = self.population[max_idx].value;
        let mean = total / self.population.len() as f64;

        let objective = self.config.objective;
        let best_idx = match objective {
            Objective::Maximize => max_idx,
            Objective::Minimize => min_idx,
        };
        let best = &self.population[best_idx];
        let replace = match &self.incumbent {
            None => true,
            Some(current) => objective.is_better(best.value, current.value),
        };
        if replace {
            self.incumbent = Some(best.clone());
            self.incumbent_updated = true;
        }

        scale_population(&mut self.population, min, max, objective);

        self.stats.population_min = min;
        self.stats.population_mean = mean;
        self.stats.population_max = max;
        self.stats.improved = self.incumbent_updated;
        self.phase = Phase::Breeding;
        Ok(())
    }

    /// Replaces the population with offspring of selected parents.
    ///
    /// Pairs of parents are chosen with the configured selection strategy
    /// and copied into two children. One crossover trial runs per pair,
    /// then one independent mutation trial per child.
    pub fn breed(&mut self) -> Result<(), GaError> {
        if self.phase != Phase::Breeding {
            return Err(GaError::OutOfPhase {
                operation: "breed",
                phase: self.phase,
            });
        }

        let size = self.config.population_size;
        let objective = self.config.objective;
        let selection = self.config.selection;
        let mut next = Vec::with_capacity(size);

        while next.len() < size {
            let p1 = selection.select(&self.population, objective, &mut self.rng)?;
            let p2 = selection.select(&self.population, objective, &mut self.rng)?;

            let mut c1 = Individual::new(self.population[p1].x.clone());
            let mut c2 = Individual::new(self.population[p2].x.clone());

            if self.rng.random::<f64>() < self.config.crossover_rate {
                self.problem.crossover(&mut c1.x, &mut c2.x, &mut self.rng);
            }
            if self.rng.random::<f64>() < self.config.mutation_rate {
                self.problem.mutate(&mut c1.x, &mut self.rng);
            }
            if self.rng.random::<f64>() < self.config.mutation_rate {
                self.problem.mutate(&mut c2.x, &mut self.rng);
            }

            next.push(c1);
            next.push(c2);
        }

        self.population = next;
        self.incumbent_updated = false;
        self.stats.generation += 1;
        self.phase = Phase::Evaluating;
        Ok(())
    }

    /// Runs the full loop and returns the best solution.
    ///
    /// `on_progress` sees the statistics of every generation that improved
    /// the incumbent, plus every `progress_interval`-th generation.
    ///
    /// Stopping criteria are checked after each generation in this order:
    /// no improvement, time limit, iteration limit.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            population_size = self.config.population_size,
            objective = ?self.config.objective,
        )
    )]
    pub fn optimize<F>(&mut self, mut on_progress: F) -> Result<GaResult<P::Gene>, GaError>
    where
        F: FnMut(&GenerationStats),
    {
        let started = Instant::now();
        let time_limit = Duration::from_millis(self.config.time_limit_ms);
        let interval = self.config.progress_interval;

        info!(
            variables = self.problem.variable_count(),
            iteration_limit = self.config.iteration_limit,
            time_limit_ms = self.config.time_limit_ms,
            "starting GA run"
        );

        self.initialize();
        self.evaluate()?;
        let mut last_improved = 0;
        let mut stop_reason = StopReason::IterationLimit;

        for generation in 1..=self.config.iteration_limit {
            self.breed()?;
            self.evaluate()?;

            trace!(
                generation,
                min = self.stats.population_min,
                mean = self.stats.population_mean,
                max = self.stats.population_max,
                "generation evaluated"
            );

            if self.stats.improved {
                last_improved = generation;
                debug!(generation, value = self.best_value(), "new incumbent");
            }

            if self.stats.improved || (interval > 0 && generation % interval == 0) {
                on_progress(&self.stats);
            }

            if generation - last_improved >= self.config.improvement_iteration_limit {
                stop_reason = StopReason::NoImprovement;
                break;
            }
            if started.elapsed() >= time_limit {
                stop_reason = StopReason::TimeLimit;
                break;
            }
        }

        let refined = self.finalize();
        self.phase = Phase::Terminated(stop_reason);

        let best = self.incumbent.as_ref().ok_or(GaError::EmptyPopulation)?;
        info!(
            %stop_reason,
            generations = self.stats.generation,
            best_value = best.value,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GA run finished"
        );

        Ok(GaResult {
            best: best.x.clone(),
            best_value: best.value,
            stop_reason,
            last_improved_generation: last_improved,
            generations: self.stats.generation,
            refined,
        })
    }

    /// Applies the problem's local search to a clone of the incumbent and
    /// keeps the clone only if it is strictly better.
    fn finalize(&mut self) -> bool {
        let Some(incumbent) = &self.incumbent else {
            return false;
        };

        let mut candidate = incumbent.clone();
        if self.problem.refine(&mut candidate.x) == Refinement::Unsupported {
            return false;
        }
        candidate.value = self.problem.evaluate(&candidate.x);

        let improved = self
            .config
            .objective
            .is_better(candidate.value, incumbent.value);
        debug!(
            before = incumbent.value,
            after = candidate.value,
            improved,
            "local search on incumbent"
        );
        if improved {
            self.incumbent = Some(candidate);
        }
        improved
    }

    fn best_value(&self) -> f64 {
        self.incumbent.as_ref().map_or(f64::NAN, |ind| ind.value)
    }

    fn compute_values(&mut self) {
        let problem = self.problem;

        if self.config.parallel {
            #[cfg(feature = "parallel")]
            {
                self.population.par_iter_mut().for_each(|ind| {
                    ind.value = problem.evaluate(&ind.x);
                });
                return;
            }
        }

        for ind in self.population.iter_mut() {
            ind.value = problem.evaluate(&ind.x);
        }
    }
}

/// Linearly maps values onto `[0.5, 10.5]` (better is higher) and fills
/// the running sums used by roulette selection.
fn scale_population<G>(population: &mut [Individual<G>], min: f64, max: f64, objective: Objective) {
    let range = max - min;
    let mut cumulative = 0.0;

    for ind in population.iter_mut() {
        ind.scaled_value = if range == 0.0 {
            1.0
        } else {
            match objective {
                Objective::Maximize => 10.0 * (ind.value - min) / range + 0.5,
                Objective::Minimize => 10.0 * (max - ind.value) / range + 0.5,
            }
        };
        cumulative += ind.scaled_value;
        ind.cumulative_scaled_value = cumulative;
    }
}

/// Executes a GA run in one call.
///
/// # Usage
///
/// ```
/// use u_genopt::ga::{GaConfig, GaRunner, Objective, StopReason};
/// use u_genopt::problems::IntegerVector;
///
/// // Maximize the sum of five variables, each in 0..=3.
/// let problem = IntegerVector::new(vec![3; 5]);
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_iteration_limit(200)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
///
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_value >= 12.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization without progress reporting.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Gene>, GaError> {
        Self::run_with_progress(problem, config, |_| {})
    }

    /// Runs the GA, forwarding progress reports to `on_progress`.
    ///
    /// The generator is seeded from `config.seed`, or randomly when unset.
    pub fn run_with_progress<P, F>(
        problem: &P,
        config: &GaConfig,
        on_progress: F,
    ) -> Result<GaResult<P::Gene>, GaError>
    where
        P: GaProblem,
        F: FnMut(&GenerationStats),
    {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut optimizer = GeneticOptimizer::new(problem, config.clone(), create_rng(seed))?;
        optimizer.optimize(on_progress)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use crate::problems::{IntegerVector, Location, Tsp};
    use std::thread::sleep;

    fn unit_square() -> Tsp {
        Tsp::new(&[
            Location::new(0.0, 0.0),
            Location::new(1.0, 0.0),
            Location::new(1.0, 1.0),
            Location::new(0.0, 1.0),
        ])
    }

    fn random_tsp(n: usize, seed: u64) -> Tsp {
        let mut rng = create_rng(seed);
        let locations: Vec<Location> = (0..n)
            .map(|_| Location::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        Tsp::new(&locations)
    }

    fn all_permutations(n: usize) -> Vec<Vec<usize>> {
        if n == 0 {
            return vec![vec![]];
        }
        let mut out = Vec::new();
        for perm in all_permutations(n - 1) {
            for pos in 0..=perm.len() {
                let mut p = perm.clone();
                p.insert(pos, n - 1);
                out.push(p);
            }
        }
        out
    }

    /// Every chromosome evaluates to the same value after a fixed delay.
    struct SlowConstant {
        delay: Duration,
    }

    impl GaProblem for SlowConstant {
        type Gene = usize;

        fn variable_count(&self) -> usize {
            1
        }

        fn create_chromosome<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
            vec![0]
        }

        fn evaluate(&self, _x: &[usize]) -> f64 {
            sleep(self.delay);
            1.0
        }

        fn mutate<R: Rng>(&self, _x: &mut [usize], _rng: &mut R) {}

        fn crossover<R: Rng>(&self, _x1: &mut [usize], _x2: &mut [usize], _rng: &mut R) {}
    }

    fn slow(ms: u64) -> SlowConstant {
        SlowConstant {
            delay: Duration::from_millis(ms),
        }
    }

    // ---- Scaling ----

    #[test]
    fn test_scaling_orders_by_goodness() {
        let tsp = random_tsp(12, 3);
        for objective in [Objective::Maximize, Objective::Minimize] {
            let config = GaConfig::default()
                .with_population_size(40)
                .with_objective(objective);
            let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(5)).unwrap();
            opt.initialize();
            opt.evaluate().unwrap();

            let pop = opt.population();
            for a in pop {
                assert!((0.5..=10.5).contains(&a.scaled_value));
                for b in pop {
                    if objective.is_better(a.value, b.value) {
                        assert!(a.scaled_value > b.scaled_value);
                    }
                }
            }
            for w in pop.windows(2) {
                assert!(w[1].cumulative_scaled_value >= w[0].cumulative_scaled_value);
            }
        }
    }

    #[test]
    fn test_scaling_extremes() {
        let tsp = random_tsp(10, 9);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_objective(Objective::Minimize);
        let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(2)).unwrap();
        opt.initialize();
        opt.evaluate().unwrap();

        let stats = opt.stats();
        for ind in opt.population() {
            if ind.value == stats.population_min {
                assert!((ind.scaled_value - 10.5).abs() < 1e-9);
            }
            if ind.value == stats.population_max {
                assert!((ind.scaled_value - 0.5).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_scaling_flat_population() {
        let problem = slow(0);
        let config = GaConfig::default().with_population_size(6);
        let mut opt = GeneticOptimizer::new(&problem, config, create_rng(1)).unwrap();
        opt.initialize();
        opt.evaluate().unwrap();

        let pop = opt.population();
        assert!(pop.iter().all(|ind| ind.scaled_value == 1.0));
        assert_eq!(pop[5].cumulative_scaled_value, 6.0);
    }

    #[test]
    fn test_infinite_penalty_rejected() {
        // x[0] is pinned to 0, so every individual hits the penalty.
        let problem = IntegerVector::new(vec![0, 5])
            .with_objective(|x| if x[0] == 0 { f64::NEG_INFINITY } else { 1.0 });
        let config = GaConfig::default().with_population_size(20);
        let mut opt = GeneticOptimizer::new(&problem, config, create_rng(6)).unwrap();
        opt.initialize();

        assert_eq!(
            opt.evaluate(),
            Err(GaError::NonFiniteValue {
                index: 0,
                value: f64::NEG_INFINITY,
            })
        );
        assert!(opt.incumbent().is_none());
        assert_eq!(opt.phase(), Phase::EvaluatingInitial);
    }

    #[test]
    fn test_nan_value_fails_run() {
        let problem = IntegerVector::new(vec![3; 4]).with_objective(|x| {
            if x[1] == 2 {
                f64::NAN
            } else {
                f64::from(x[0])
            }
        });
        let config = GaConfig::default()
            .with_population_size(40)
            .with_seed(11);
        let err = GaRunner::run(&problem, &config).unwrap_err();
        assert!(matches!(err, GaError::NonFiniteValue { value, .. } if value.is_nan()));
    }

    #[test]
    fn test_exact_cumulative_key_selects_individual() {
        let tsp = random_tsp(8, 4);
        let config = GaConfig::default().with_population_size(16);
        let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(8)).unwrap();
        opt.initialize();
        opt.evaluate().unwrap();

        let pop = opt.population();
        let seek = |key| crate::sampling::seek_lower_bound(pop, key, |i| i.cumulative_scaled_value);
        assert_eq!(seek(0.0), Some(0));
        for (i, ind) in pop.iter().enumerate() {
            assert_eq!(seek(ind.cumulative_scaled_value), Some(i));
        }
    }

    // ---- Incumbent ----

    #[test]
    fn test_incumbent_is_independent_copy() {
        let tsp = random_tsp(10, 1);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_objective(Objective::Minimize)
            .with_mutation_rate(1.0);
        let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(4)).unwrap();
        opt.initialize();
        opt.evaluate().unwrap();

        let snapshot = opt.incumbent().unwrap().clone();
        assert_eq!(snapshot.value, opt.stats().population_min);

        for _ in 0..5 {
            opt.breed().unwrap();
            opt.evaluate().unwrap();
        }
        let incumbent = opt.incumbent().unwrap();
        assert!(incumbent.value <= snapshot.value);
        assert!((tsp.evaluate(&incumbent.x) - incumbent.value).abs() < 1e-9);
    }

    #[test]
    fn test_incumbent_never_worsens() {
        let tsp = random_tsp(15, 21);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_objective(Objective::Minimize)
            .with_mutation_rate(0.5);
        let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(3)).unwrap();
        opt.initialize();
        opt.evaluate().unwrap();

        let mut best = opt.incumbent().unwrap().value;
        for _ in 0..30 {
            opt.breed().unwrap();
            opt.evaluate().unwrap();
            let now = opt.incumbent().unwrap().value;
            assert!(now <= best);
            assert_eq!(opt.stats().improved, now < best);
            best = now;
        }
    }

    // ---- State machine ----

    #[test]
    fn test_phase_transitions() {
        let tsp = unit_square();
        let config = GaConfig::default().with_population_size(4);
        let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(0)).unwrap();

        assert_eq!(opt.phase(), Phase::Uninitialized);
        assert!(matches!(
            opt.breed(),
            Err(GaError::OutOfPhase { operation: "breed", .. })
        ));
        assert!(matches!(opt.evaluate(), Err(GaError::OutOfPhase { .. })));

        opt.initialize();
        assert_eq!(opt.phase(), Phase::EvaluatingInitial);
        assert_eq!(opt.population().len(), 4);
        assert!(opt.incumbent().is_none());

        opt.evaluate().unwrap();
        assert_eq!(opt.phase(), Phase::Breeding);
        assert!(opt.incumbent().is_some());

        opt.breed().unwrap();
        assert_eq!(opt.phase(), Phase::Evaluating);
        assert_eq!(opt.stats().generation, 1);
        assert!(matches!(opt.breed(), Err(GaError::OutOfPhase { .. })));

        opt.evaluate().unwrap();
        assert_eq!(opt.phase(), Phase::Breeding);
    }

    #[test]
    fn test_terminated_phase_records_reason() {
        let tsp = unit_square();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_iteration_limit(2);
        let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(0)).unwrap();
        let result = opt.optimize(|_| {}).unwrap();
        assert_eq!(opt.phase(), Phase::Terminated(result.stop_reason));
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let tsp = unit_square();
        let config = GaConfig::default().with_population_size(5);
        assert!(matches!(
            GeneticOptimizer::new(&tsp, config.clone(), create_rng(0)),
            Err(GaError::Config(_))
        ));
        assert!(matches!(GaRunner::run(&tsp, &config), Err(GaError::Config(_))));
    }

    #[test]
    fn test_population_size_preserved() {
        let tsp = random_tsp(6, 2);
        let config = GaConfig::default()
            .with_population_size(12)
            .with_crossover_rate(1.0)
            .with_mutation_rate(1.0);
        let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(6)).unwrap();
        opt.initialize();
        opt.evaluate().unwrap();
        for _ in 0..10 {
            opt.breed().unwrap();
            assert_eq!(opt.population().len(), 12);
            for ind in opt.population() {
                let mut sorted = ind.x.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..6).collect::<Vec<_>>());
            }
            opt.evaluate().unwrap();
        }
    }

    // ---- Stopping criteria ----

    #[test]
    fn test_iteration_limit() {
        let tsp = random_tsp(8, 1);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_iteration_limit(3)
            .with_seed(1);
        let result = GaRunner::run(&tsp, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert_eq!(result.generations, 3);
    }

    #[test]
    fn test_zero_iteration_limit_returns_seed_best() {
        let tsp = random_tsp(8, 1);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_iteration_limit(0)
            .with_objective(Objective::Minimize)
            .with_seed(1);
        let result = GaRunner::run(&tsp, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert_eq!(result.generations, 0);
        assert_eq!(result.last_improved_generation, 0);
    }

    #[test]
    fn test_no_improvement_stops_run() {
        let problem = slow(0);
        let config = GaConfig::default()
            .with_population_size(4)
            .with_improvement_iteration_limit(5);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::NoImprovement);
        assert_eq!(result.generations, 5);
        assert_eq!(result.last_improved_generation, 0);
    }

    #[test]
    fn test_time_limit_stops_run() {
        let problem = slow(1);
        let config = GaConfig::default()
            .with_population_size(2)
            .with_iteration_limit(100_000)
            .with_time_limit_ms(10);

        let started = Instant::now();
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TimeLimit);
        assert!(started.elapsed() >= Duration::from_millis(10));
        assert!(result.generations < 100_000);
    }

    #[test]
    fn test_no_improvement_beats_time_limit() {
        // Generation 1 is both stale and over budget.
        let problem = slow(2);
        let config = GaConfig::default()
            .with_population_size(2)
            .with_improvement_iteration_limit(1)
            .with_time_limit_ms(1);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::NoImprovement);
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_time_limit_beats_iteration_limit() {
        let problem = slow(2);
        let config = GaConfig::default()
            .with_population_size(2)
            .with_iteration_limit(1)
            .with_time_limit_ms(1);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TimeLimit);
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_zero_time_limit_stops_after_first_generation() {
        let problem = slow(0);
        let config = GaConfig::default()
            .with_population_size(2)
            .with_time_limit_ms(0);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TimeLimit);
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_generous_time_limit_not_reported() {
        let problem = slow(0);
        let config = GaConfig::default()
            .with_population_size(2)
            .with_iteration_limit(1)
            .with_time_limit_ms(60_000);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
    }

    // ---- Progress reporting ----

    #[test]
    fn test_progress_every_generation() {
        let tsp = random_tsp(8, 5);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_iteration_limit(12)
            .with_seed(3);
        let mut seen = Vec::new();
        GaRunner::run_with_progress(&tsp, &config, |s| seen.push(s.generation)).unwrap();
        assert_eq!(seen, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_progress_interval_and_improvements() {
        let tsp = random_tsp(20, 5);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_iteration_limit(40)
            .with_objective(Objective::Minimize)
            .with_progress_interval(10)
            .with_seed(3);
        let mut seen = Vec::new();
        let result =
            GaRunner::run_with_progress(&tsp, &config, |s| seen.push(*s)).unwrap();

        for s in &seen {
            assert!(s.improved || s.generation % 10 == 0, "{s:?}");
            assert!(s.population_min <= s.population_mean);
            assert!(s.population_mean <= s.population_max);
        }
        for g in [10, 20, 30, 40] {
            assert!(seen.iter().any(|s| s.generation == g));
        }
        if result.last_improved_generation > 0 {
            assert!(seen
                .iter()
                .any(|s| s.generation == result.last_improved_generation && s.improved));
        }
    }

    #[test]
    fn test_progress_disabled_reports_only_improvements() {
        let tsp = random_tsp(20, 6);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_iteration_limit(30)
            .with_objective(Objective::Minimize)
            .with_progress_interval(0)
            .with_seed(8);
        let mut seen = Vec::new();
        GaRunner::run_with_progress(&tsp, &config, |s| seen.push(*s)).unwrap();
        assert!(seen.iter().all(|s| s.improved));
    }

    // ---- Determinism ----

    #[test]
    fn test_seeded_runs_are_identical() {
        let tsp = random_tsp(12, 11);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_objective(Objective::Minimize);

        let trace = |seed| {
            let mut opt = GeneticOptimizer::new(&tsp, config.clone(), create_rng(seed)).unwrap();
            opt.initialize();
            opt.evaluate().unwrap();
            let mut states = vec![opt.population().to_vec()];
            for _ in 0..15 {
                opt.breed().unwrap();
                opt.evaluate().unwrap();
                states.push(opt.population().to_vec());
            }
            states
        };

        assert_eq!(trace(77), trace(77));
        assert_ne!(trace(77), trace(78));
    }

    #[test]
    fn test_seeded_runner_results_match() {
        let tsp = random_tsp(15, 2);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_iteration_limit(50)
            .with_objective(Objective::Minimize)
            .with_seed(42);

        let mut a = Vec::new();
        let mut b = Vec::new();
        let ra = GaRunner::run_with_progress(&tsp, &config, |s| a.push(*s)).unwrap();
        let rb = GaRunner::run_with_progress(&tsp, &config, |s| b.push(*s)).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stop_reason_serializes_kebab_case() {
        let json = serde_json::to_string(&StopReason::NoImprovement).unwrap();
        assert_eq!(json, r#""no-improvement""#);
        let back: StopReason = serde_json::from_str(r#""time-limit""#).unwrap();
        assert_eq!(back, StopReason::TimeLimit);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_json_roundtrip() {
        let tsp = random_tsp(8, 2);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_iteration_limit(20)
            .with_objective(Objective::Minimize)
            .with_seed(9);
        let result = GaRunner::run(&tsp, &config).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(&format!(r#""stop_reason":"{}""#, result.stop_reason)));
        let back: GaResult<usize> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.best, result.best);
        assert_eq!(back.stop_reason, result.stop_reason);
        assert_eq!(back.generations, result.generations);
        assert_eq!(back.last_improved_generation, result.last_improved_generation);
        assert_eq!(back.refined, result.refined);
        assert!((back.best_value - result.best_value).abs() < 1e-9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stats_json_roundtrip() {
        let stats = GenerationStats {
            generation: 4,
            population_min: 1.5,
            population_mean: 2.25,
            population_max: 3.0,
            improved: true,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: GenerationStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let tsp = random_tsp(15, 2);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_iteration_limit(50)
            .with_objective(Objective::Minimize)
            .with_seed(42);

        let seq = GaRunner::run(&tsp, &config).unwrap();
        let par = GaRunner::run(&tsp, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }

    // ---- End to end ----

    #[test]
    fn test_unit_square_finds_shortest_path() {
        let tsp = unit_square();
        let brute_force = all_permutations(4)
            .iter()
            .map(|p| tsp.evaluate(p))
            .fold(f64::INFINITY, f64::min);
        assert!((brute_force - 3.0).abs() < 1e-9);

        let config = GaConfig::default()
            .with_population_size(20)
            .with_iteration_limit(50)
            .with_objective(Objective::Minimize)
            .with_seed(7);
        let result = GaRunner::run(&tsp, &config).unwrap();

        let mut path = result.best.clone();
        tsp.refine(&mut path);
        assert!((tsp.evaluate(&path) - brute_force).abs() < 1e-9);
        assert!((result.best_value - brute_force).abs() < 1e-9);
    }

    #[test]
    fn test_refinement_improves_short_run() {
        // A single tiny generation leaves plenty for 2-opt to fix.
        let tsp = random_tsp(40, 13);
        let config = GaConfig::default()
            .with_population_size(4)
            .with_iteration_limit(1)
            .with_objective(Objective::Minimize)
            .with_seed(5);
        let result = GaRunner::run(&tsp, &config).unwrap();

        assert!(result.refined);
        assert!((tsp.evaluate(&result.best) - result.best_value).abs() < 1e-9);
        let mut again = result.best.clone();
        tsp.refine(&mut again);
        assert_eq!(again, result.best, "refined path should be 2-opt optimal");
    }

    #[test]
    fn test_maximize_integer_vector() {
        let problem = IntegerVector::new(vec![5; 8]);
        let config = GaConfig::default()
            .with_population_size(40)
            .with_iteration_limit(300)
            .with_mutation_rate(0.3)
            .with_seed(42);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert!(result.best_value >= 34.0, "got {}", result.best_value);
        assert!(!result.refined);
        assert_eq!(result.best.len(), 8);
    }

    #[test]
    fn test_all_selection_strategies_improve() {
        let tsp = random_tsp(12, 17);
        for selection in [Selection::Tournament, Selection::Roulette, Selection::Uniform] {
            let config = GaConfig::default()
                .with_population_size(30)
                .with_iteration_limit(60)
                .with_objective(Objective::Minimize)
                .with_selection(selection)
                .with_seed(9);
            // Same generator seed, so both see the same seed population.
            let mut probe = GeneticOptimizer::new(&tsp, config.clone(), create_rng(9)).unwrap();
            probe.initialize();
            probe.evaluate().unwrap();
            let seed_best = probe.incumbent().unwrap().value;

            let mut opt = GeneticOptimizer::new(&tsp, config, create_rng(9)).unwrap();
            let result = opt.optimize(|_| {}).unwrap();
            assert!(result.best_value <= seed_best, "{selection:?}");
        }
    }
}
