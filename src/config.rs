//! Solver configuration.
//!
//! [`PsoConfig`] holds all parameters controlling the search space,
//! the swarm, and the iteration loop.

use crate::weight::WeightSchedule;
use std::collections::BTreeMap;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Search for the smallest goal value.
    #[default]
    Minimize,
    /// Search for the largest goal value.
    Maximize,
}

/// Filter applied to goal values before global-best selection.
///
/// Composition objectives often represent a magnitude that is only
/// meaningful when positive, so the default discards non-positive
/// values from global-best candidacy, in both directions. Use
/// [`GoalFilter::All`] when negative or zero goal values are legitimate
/// (notably for `Maximize` runs whose optimum may be non-positive).
///
/// NaN goal values are excluded under either variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalFilter {
    /// Only strictly positive goal values may become the global best.
    #[default]
    Positive,
    /// Any finite goal value may become the global best.
    All,
}

impl GoalFilter {
    /// Whether `value` is admissible as a global-best candidate.
    pub fn admits(self, value: f64) -> bool {
        match self {
            GoalFilter::Positive => value > 0.0,
            GoalFilter::All => !value.is_nan(),
        }
    }
}

/// Configuration for a composition PSO run.
///
/// The search space is the simplex slice where every component lies in
/// `[lower_bound, upper_bound]` and all components sum to `upper_bound`
/// (the upper bound doubles as the composition total).
///
/// # Examples
///
/// ```
/// use swarm_compose::{Direction, PsoConfig};
///
/// let config = PsoConfig::default()
///     .with_dimension(3)
///     .with_bounds(0.0, 100.0)
///     .with_particle_count(20)
///     .with_iterations(200)
///     .with_direction(Direction::Minimize)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of components (food sources) in a position vector.
    pub dimension: usize,

    /// Requested swarm size. The effective size after feasible
    /// initialization is reported in the run result.
    pub particle_count: usize,

    /// Smallest value any single component may take.
    pub lower_bound: f64,

    /// Largest value any single component may take. Also the required
    /// sum of every position vector (composition constraint).
    pub upper_bound: f64,

    /// Optimization direction.
    pub direction: Direction,

    /// Number of motion generations. Zero skips the loop entirely and
    /// returns the best of the initialized swarm.
    pub iterations: usize,

    /// Inertia-weight lower bound used by the decaying schedules.
    pub min_weight: f64,

    /// Inertia-weight upper bound used by the decaying schedules.
    pub max_weight: f64,

    /// Per-dimension speed cap. Must be positive.
    pub max_velocity: f64,

    /// Acceleration factor toward a particle's own best (c1).
    pub acc_personal: f64,

    /// Acceleration factor toward the global best (c2).
    pub acc_social: f64,

    /// Inertia-weight decay policy.
    pub weight_schedule: WeightSchedule,

    /// Dimensions pinned to exact values. Pinned dimensions carry zero
    /// velocity and are excluded from the random sum-balancing.
    pub fixed_positions: BTreeMap<usize, f64>,

    /// Goal-value filter for global-best candidacy.
    pub goal_filter: GoalFilter,

    /// Feasibility attempts per particle slot before the slot is dropped.
    pub init_retry_budget: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            dimension: 3,
            particle_count: 30,
            lower_bound: 0.0,
            upper_bound: 1000.0,
            direction: Direction::Minimize,
            iterations: 2000,
            min_weight: 0.1,
            max_weight: 1.0,
            max_velocity: 2.0,
            acc_personal: 2.0,
            acc_social: 2.0,
            weight_schedule: WeightSchedule::Typical,
            fixed_positions: BTreeMap::new(),
            goal_filter: GoalFilter::Positive,
            init_retry_budget: 1000,
            seed: None,
        }
    }
}

impl PsoConfig {
    pub fn with_dimension(mut self, n: usize) -> Self {
        self.dimension = n;
        self
    }

    pub fn with_particle_count(mut self, n: usize) -> Self {
        self.particle_count = n;
        self
    }

    /// Sets the per-component bounds. The upper bound is also the
    /// required sum of every position vector.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_weight_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_weight = min;
        self.max_weight = max;
        self
    }

    pub fn with_max_velocity(mut self, v: f64) -> Self {
        self.max_velocity = v;
        self
    }

    pub fn with_acceleration(mut self, personal: f64, social: f64) -> Self {
        self.acc_personal = personal;
        self.acc_social = social;
        self
    }

    pub fn with_weight_schedule(mut self, schedule: WeightSchedule) -> Self {
        self.weight_schedule = schedule;
        self
    }

    /// Pins dimension `index` to `value` for the whole run.
    pub fn with_fixed_position(mut self, index: usize, value: f64) -> Self {
        self.fixed_positions.insert(index, value);
        self
    }

    pub fn with_goal_filter(mut self, filter: GoalFilter) -> Self {
        self.goal_filter = filter;
        self
    }

    pub fn with_init_retry_budget(mut self, n: usize) -> Self {
        self.init_retry_budget = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// An inverted bound interval (`lower_bound > upper_bound`) is NOT
    /// rejected here: it makes every slot infeasible, which the
    /// initializer handles by retry exhaustion, and the run reports no
    /// solution.
    pub fn validate(&self) -> Result<(), String> {
        if self.dimension == 0 {
            return Err("dimension must be positive".into());
        }
        if self.min_weight > self.max_weight {
            return Err(format!(
                "min_weight ({}) must not exceed max_weight ({})",
                self.min_weight, self.max_weight
            ));
        }
        if self.max_velocity <= 0.0 {
            return Err(format!(
                "max_velocity must be positive, got {}",
                self.max_velocity
            ));
        }
        if let Some((&index, _)) = self.fixed_positions.range(self.dimension..).next() {
            return Err(format!(
                "fixed position index {index} is out of range for dimension {}",
                self.dimension
            ));
        }
        if !self.fixed_positions.is_empty() && self.fixed_positions.len() >= self.dimension {
            return Err("at least one free dimension is required to close the sum".into());
        }
        Ok(())
    }

    /// Number of dimensions not pinned by `fixed_positions`.
    pub fn free_dimensions(&self) -> usize {
        self.dimension - self.fixed_positions.len()
    }
}
