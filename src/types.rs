//! Core types: the objective trait, the particle state, and the
//! diagnostic observer.

/// Objective function over a position vector.
///
/// Implementations must be pure functions of the position. A NaN return
/// models an undefined evaluation: NaN fails every strictly-better
/// comparison, so the offending candidate is never adopted as a personal
/// or global best, but its particle stays in the swarm.
///
/// Any `Fn(&[f64]) -> f64` closure implements `Goal` directly:
///
/// ```
/// use swarm_compose::Goal;
///
/// let goal = |position: &[f64]| position.iter().map(|x| x * x).sum::<f64>();
/// assert!((goal.calc(&[3.0, 4.0]) - 25.0).abs() < 1e-12);
/// ```
pub trait Goal: Send + Sync {
    /// Computes the goal value at `position`.
    fn calc(&self, position: &[f64]) -> f64;
}

impl<F> Goal for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn calc(&self, position: &[f64]) -> f64 {
        self(position)
    }
}

/// One candidate solution in the swarm.
///
/// A motion step produces a fresh `Particle` from the old one; particles
/// are replaced, never mutated in place. All vectors have the
/// configured dimension.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position, one value per component.
    pub position: Vec<f64>,

    /// Current velocity, one value per component.
    pub velocity: Vec<f64>,

    /// Best position this particle has visited so far.
    pub best_position: Vec<f64>,

    /// Per-dimension speed cap (positive).
    pub max_velocity: f64,
}

impl Particle {
    /// Creates a particle whose best position is its current position
    /// (no history yet).
    pub fn new(position: Vec<f64>, velocity: Vec<f64>, max_velocity: f64) -> Self {
        let best_position = position.clone();
        Self {
            position,
            velocity,
            best_position,
            max_velocity,
        }
    }
}

/// Diagnostic sink for non-fatal run events.
///
/// All methods default to no-ops; the solver runs correctly with no
/// observer installed. Implementations typically log.
pub trait Observer {
    /// A particle slot exhausted its feasibility retry budget and was
    /// dropped from the swarm.
    fn on_slot_dropped(&self, _slot: usize, _attempts: usize) {}

    /// A candidate position failed a constraint check.
    fn on_constraint_violation(&self, _name: &str, _position: &[f64]) {}

    /// A generation completed. `best_goal` is the current global-best
    /// goal value.
    fn on_iteration(&self, _iteration: usize, _best_goal: f64) {}

    /// The run produced its final result.
    fn on_result(&self, _position: &[f64], _value: f64) {}
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_goal() {
        let goal = |p: &[f64]| p.iter().sum::<f64>();
        assert!((goal.calc(&[1.0, 2.0, 3.0]) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_particle_new_copies_position_to_best() {
        let p = Particle::new(vec![1.0, 2.0], vec![0.1, 0.2], 2.0);
        assert_eq!(p.position, p.best_position);
        assert_eq!(p.velocity, vec![0.1, 0.2]);
        assert!((p.max_velocity - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_null_observer_is_silent() {
        let obs = NullObserver;
        obs.on_slot_dropped(0, 1000);
        obs.on_constraint_violation("range", &[1.0]);
        obs.on_iteration(3, 0.5);
        obs.on_result(&[1.0], 0.5);
    }
}
