//! Pluggable position-legality constraints.
//!
//! A [`ConstraintSet`] is an ordered list of [`Constraint`] checks
//! evaluated as a lazy AND: the first failing check stops evaluation.
//! Failures are values, not panics; callers report them to the
//! diagnostic observer and retry or skip as appropriate.

/// Raw outcome of one constraint evaluation.
///
/// A check either decides legality directly or produces a numeric score
/// that the constraint's [`accept`](Constraint::accept) post-processor
/// turns into a verdict (e.g. thresholding a distance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintCheck {
    /// The check decided pass/fail itself.
    Decided(bool),
    /// A raw score to be post-processed by [`Constraint::accept`].
    Score(f64),
}

/// One legality predicate over a position vector.
///
/// # Examples
///
/// ```
/// use swarm_compose::{Constraint, ConstraintCheck};
///
/// /// Requires every component to stay under a ceiling.
/// struct Ceiling(f64);
///
/// impl Constraint for Ceiling {
///     fn name(&self) -> &str {
///         "ceiling"
///     }
///
///     fn evaluate(&self, position: &[f64]) -> ConstraintCheck {
///         ConstraintCheck::Decided(position.iter().all(|&x| x <= self.0))
///     }
/// }
/// ```
pub trait Constraint: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Evaluates the check against a candidate position.
    fn evaluate(&self, position: &[f64]) -> ConstraintCheck;

    /// Post-processes a [`ConstraintCheck::Score`] into a verdict.
    ///
    /// Only called for `Score` results. The default treats any non-zero
    /// score as a pass.
    fn accept(&self, score: f64) -> bool {
        score != 0.0
    }
}

/// A failed constraint check: which check, and the position it rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    /// Name of the failing check.
    pub name: String,
    /// The candidate position that was rejected.
    pub position: Vec<f64>,
}

/// Ordered set of constraints with short-circuit verification.
#[derive(Default)]
pub struct ConstraintSet {
    checks: Vec<Box<dyn Constraint>>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Appends a check. Evaluation order is registration order.
    pub fn push(&mut self, check: Box<dyn Constraint>) {
        self.checks.push(check);
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Evaluates all checks in order, stopping at the first failure.
    pub fn check(&self, position: &[f64]) -> Result<(), ConstraintViolation> {
        for c in &self.checks {
            let passed = match c.evaluate(position) {
                ConstraintCheck::Decided(flag) => flag,
                ConstraintCheck::Score(score) => c.accept(score),
            };
            if !passed {
                return Err(ConstraintViolation {
                    name: c.name().to_string(),
                    position: position.to_vec(),
                });
            }
        }
        Ok(())
    }

    /// Boolean form of [`check`](ConstraintSet::check).
    pub fn verify(&self, position: &[f64]) -> bool {
        self.check(position).is_ok()
    }
}

impl std::fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.checks.iter().map(|c| c.name()).collect();
        f.debug_struct("ConstraintSet").field("checks", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct AlwaysPass;

    impl Constraint for AlwaysPass {
        fn name(&self) -> &str {
            "always-pass"
        }
        fn evaluate(&self, _position: &[f64]) -> ConstraintCheck {
            ConstraintCheck::Decided(true)
        }
    }

    struct AlwaysFail;

    impl Constraint for AlwaysFail {
        fn name(&self) -> &str {
            "always-fail"
        }
        fn evaluate(&self, _position: &[f64]) -> ConstraintCheck {
            ConstraintCheck::Decided(false)
        }
    }

    /// Counts evaluations so short-circuiting can be asserted.
    struct Counting<'a>(&'a AtomicUsize, bool);

    impl Constraint for Counting<'_> {
        fn name(&self) -> &str {
            "counting"
        }
        fn evaluate(&self, _position: &[f64]) -> ConstraintCheck {
            self.0.fetch_add(1, Ordering::Relaxed);
            ConstraintCheck::Decided(self.1)
        }
    }

    /// Passes when the component sum stays below a threshold, via the
    /// score post-processing path.
    struct SumBelow(f64);

    impl Constraint for SumBelow {
        fn name(&self) -> &str {
            "sum-below"
        }
        fn evaluate(&self, position: &[f64]) -> ConstraintCheck {
            ConstraintCheck::Score(position.iter().sum())
        }
        fn accept(&self, score: f64) -> bool {
            score < self.0
        }
    }

    #[test]
    fn test_empty_set_passes() {
        let set = ConstraintSet::new();
        assert!(set.verify(&[1.0, 2.0]));
        assert!(set.is_empty());
    }

    #[test]
    fn test_all_pass() {
        let mut set = ConstraintSet::new();
        set.push(Box::new(AlwaysPass));
        set.push(Box::new(AlwaysPass));
        assert!(set.check(&[0.0]).is_ok());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_violation_carries_name_and_position() {
        let mut set = ConstraintSet::new();
        set.push(Box::new(AlwaysFail));
        let err = set.check(&[1.5, 2.5]).unwrap_err();
        assert_eq!(err.name, "always-fail");
        assert_eq!(err.position, vec![1.5, 2.5]);
    }

    #[test]
    fn test_short_circuit_on_first_failure() {
        static FIRST: AtomicUsize = AtomicUsize::new(0);
        static SECOND: AtomicUsize = AtomicUsize::new(0);

        let mut set = ConstraintSet::new();
        set.push(Box::new(Counting(&FIRST, false)));
        set.push(Box::new(Counting(&SECOND, true)));

        assert!(!set.verify(&[0.0]));
        assert_eq!(FIRST.load(Ordering::Relaxed), 1);
        assert_eq!(SECOND.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_score_postprocessing() {
        let mut set = ConstraintSet::new();
        set.push(Box::new(SumBelow(10.0)));
        assert!(set.verify(&[3.0, 4.0]));
        assert!(!set.verify(&[6.0, 7.0]));
    }

    #[test]
    fn test_registration_order_is_evaluation_order() {
        let mut set = ConstraintSet::new();
        set.push(Box::new(SumBelow(10.0)));
        set.push(Box::new(AlwaysFail));
        // First check passes, second fails: the violation names the second.
        let err = set.check(&[1.0]).unwrap_err();
        assert_eq!(err.name, "always-fail");
        // First check fails: the violation names the first.
        let err = set.check(&[20.0]).unwrap_err();
        assert_eq!(err.name, "sum-below");
    }
}
