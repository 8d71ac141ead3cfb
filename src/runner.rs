//! PSO execution loop.
//!
//! [`PsoRunner`] orchestrates the complete solve: feasible
//! initialization → motion → personal-best update → inertia-weight
//! update → global-best update, repeated for the configured number of
//! generations.

use crate::config::{Direction, PsoConfig};
use crate::constraint::ConstraintSet;
use crate::init::init_swarm;
use crate::motion::Motion;
use crate::types::{Goal, NullObserver, Observer, Particle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a PSO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoResult {
    /// The best position found by any particle.
    pub best_position: Vec<f64>,

    /// Goal value at the best position.
    pub best_goal_value: f64,

    /// Number of generations executed.
    pub iterations: usize,

    /// Number of particles that survived feasible initialization.
    pub effective_particles: usize,

    /// Global-best goal value after initialization and after each
    /// generation.
    pub goal_history: Vec<f64>,
}

/// Optional collaborators for a run.
#[derive(Default)]
pub struct RunOptions<'a> {
    /// Legality checks applied to every generated and evolved position.
    pub constraints: Option<&'a ConstraintSet>,

    /// Pre-seeded positions by slot index; slots beyond the list are
    /// initialized randomly.
    pub seeds: Option<&'a [Vec<f64>]>,

    /// Diagnostic sink. `None` discards all events.
    pub observer: Option<&'a dyn Observer>,
}

/// Executes the PSO algorithm.
///
/// # Usage
///
/// ```
/// use swarm_compose::{PsoConfig, PsoRunner};
///
/// let goal = |p: &[f64]| (p[0] - 30.0).powi(2) + (p[1] - 70.0).powi(2);
/// let config = PsoConfig::default()
///     .with_dimension(2)
///     .with_bounds(0.0, 100.0)
///     .with_particle_count(10)
///     .with_iterations(50)
///     .with_seed(42);
/// let result = PsoRunner::run(&goal, &config).expect("feasible problem");
/// assert_eq!(result.best_position.len(), 2);
/// assert!(result.best_goal_value <= result.goal_history[0]);
/// ```
pub struct PsoRunner;

impl PsoRunner {
    /// Runs unconstrained PSO. Returns `None` when the configuration is
    /// invalid, no particle could be feasibly initialized, or no
    /// candidate ever passed the goal filter.
    pub fn run<G: Goal>(goal: &G, config: &PsoConfig) -> Option<PsoResult> {
        Self::run_with(goal, config, RunOptions::default())
    }

    /// Runs PSO with optional constraints, pre-seeded positions, and a
    /// diagnostic observer.
    pub fn run_with<G: Goal>(
        goal: &G,
        config: &PsoConfig,
        opts: RunOptions<'_>,
    ) -> Option<PsoResult> {
        if config.validate().is_err() {
            return None;
        }
        let null = NullObserver;
        let observer: &dyn Observer = opts.observer.unwrap_or(&null);

        // Independent random streams per stochastic component, all
        // derived from one master seed for reproducibility.
        let mut master = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let mut init_rng = StdRng::seed_from_u64(master.random());
        let mut weight_rng = StdRng::seed_from_u64(master.random());
        let mut motion = Motion::new(config, master.random(), master.random());

        let mut swarm = init_swarm(config, opts.constraints, opts.seeds, &mut init_rng, observer);
        if swarm.is_empty() {
            return None;
        }
        let effective_particles = swarm.len();

        // A run that never produces an admissible goal value cannot
        // yield a result.
        let mut global_best = select_global_best(goal, config, &swarm, None)?;
        let mut goal_history = Vec::with_capacity(config.iterations + 1);
        goal_history.push(goal.calc(&global_best));

        for i in 0..config.iterations {
            for p in swarm.iter_mut() {
                let mut np = motion.search_food(p, &global_best, config);
                let valid = match opts.constraints {
                    Some(set) => match set.check(&np.position) {
                        Ok(()) => true,
                        Err(violation) => {
                            observer.on_constraint_violation(&violation.name, &violation.position);
                            false
                        }
                    },
                    None => true,
                };
                if valid {
                    update_personal_best(goal, config.direction, &mut np);
                }
                *p = np;
            }

            let weight = config.weight_schedule.value(
                i,
                config.iterations,
                config.min_weight,
                config.max_weight,
                &mut weight_rng,
            );
            motion.update_inertia_weight(weight);

            if let Some(improved) =
                select_global_best(goal, config, &swarm, Some(global_best.as_slice()))
            {
                global_best = improved;
            }
            let best_value = goal.calc(&global_best);
            goal_history.push(best_value);
            observer.on_iteration(i, best_value);
        }

        let best_goal_value = goal.calc(&global_best);
        observer.on_result(&global_best, best_goal_value);

        Some(PsoResult {
            best_position: global_best,
            best_goal_value,
            iterations: config.iterations,
            effective_particles,
            goal_history,
        })
    }
}

/// Whether `candidate` strictly improves on `incumbent` in the given
/// direction. NaN on either side never improves.
fn improves(direction: Direction, candidate: f64, incumbent: f64) -> bool {
    match direction {
        Direction::Minimize => candidate < incumbent,
        Direction::Maximize => candidate > incumbent,
    }
}

/// Replaces a particle's best position with its current position iff the
/// goal value strictly improves. Ties and NaN never update.
fn update_personal_best<G: Goal>(goal: &G, direction: Direction, p: &mut Particle) {
    let current = goal.calc(&p.position);
    let best = goal.calc(&p.best_position);
    if improves(direction, current, best) {
        p.best_position.clone_from(&p.position);
    }
}

/// Selects a new global best over all particles' personal bests.
///
/// Candidates are filtered by the configured goal filter (NaN is always
/// excluded) and sorted ascending by goal value; the extreme matching
/// the direction is adopted — unconditionally on first assignment
/// (`current == None`), otherwise only on strict improvement. Returns
/// `None` when the global best is unchanged or no candidate is
/// admissible.
fn select_global_best<G: Goal>(
    goal: &G,
    config: &PsoConfig,
    swarm: &[Particle],
    current: Option<&[f64]>,
) -> Option<Vec<f64>> {
    let mut candidates: Vec<(&[f64], f64)> = swarm
        .iter()
        .map(|p| (p.best_position.as_slice(), goal.calc(&p.best_position)))
        .filter(|&(_, value)| !value.is_nan() && config.goal_filter.admits(value))
        .collect();
    candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let &(position, value) = match config.direction {
        Direction::Minimize => candidates.first()?,
        Direction::Maximize => candidates.last()?,
    };

    match current {
        None => Some(position.to_vec()),
        Some(incumbent) => {
            if improves(config.direction, value, goal.calc(incumbent)) {
                Some(position.to_vec())
            } else {
                None
            }
        }
    }
}
