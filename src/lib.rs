//! Particle swarm optimization for composition problems.
//!
//! Solves constrained continuous optimization over a fixed number of
//! components (food sources) whose values must sum to a target total —
//! blend/recipe style problems — minimizing or maximizing a
//! caller-supplied scalar objective.
//!
//! - **[`PsoConfig`]**: search space, swarm size, bounds (the upper
//!   bound doubles as the composition total), iteration budget, inertia
//!   weights, pinned dimensions.
//! - **[`Goal`]**: the objective, a pure function of the position
//!   vector. Any `Fn(&[f64]) -> f64` closure qualifies.
//! - **[`ConstraintSet`]**: ordered, short-circuiting legality checks
//!   supplied by the caller.
//! - **[`WeightSchedule`]**: four inertia-weight decay policies.
//! - **[`PsoRunner`]**: feasible initialization with bounded retries,
//!   the generation loop, and personal/global best tracking.
//!
//! All failure modes are non-fatal: an unsolvable run returns `None`
//! rather than panicking, and per-candidate problems (constraint
//! violations, undefined goal values) only exclude the offending
//! candidate from best-tracking.
//!
//! # Example
//!
//! ```
//! use swarm_compose::{PsoConfig, PsoRunner};
//!
//! // Three components summing to 100, pushed toward the blend
//! // (20, 30, 50).
//! let goal = |p: &[f64]| {
//!     (p[0] - 20.0).powi(2) + (p[1] - 30.0).powi(2) + (p[2] - 50.0).powi(2)
//! };
//! let config = PsoConfig::default()
//!     .with_dimension(3)
//!     .with_bounds(0.0, 100.0)
//!     .with_particle_count(20)
//!     .with_iterations(100)
//!     .with_seed(7);
//!
//! let result = PsoRunner::run(&goal, &config).expect("feasible problem");
//! assert!(result.best_goal_value <= result.goal_history[0]);
//! ```

mod config;
mod constraint;
mod init;
mod motion;
mod runner;
mod types;
mod weight;

pub use config::{Direction, GoalFilter, PsoConfig};
pub use constraint::{Constraint, ConstraintCheck, ConstraintSet, ConstraintViolation};
pub use init::init_swarm;
pub use motion::Motion;
pub use runner::{PsoResult, PsoRunner, RunOptions};
pub use types::{Goal, NullObserver, Observer, Particle};
pub use weight::WeightSchedule;
