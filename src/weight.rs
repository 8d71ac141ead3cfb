//! Inertia-weight schedules.
//!
//! The inertia weight damps the carry-over of a particle's previous
//! velocity. Decaying it over the run shifts the swarm from global
//! exploration toward local refinement.

use rand::Rng;

/// Inertia-weight decay policy, evaluated once per generation.
///
/// # References
///
/// - Typical / LinearDifferential: Shi & Eberhart (1998), linearly and
///   quadratically decreasing inertia weight
/// - Fitd: "first increase then decrease" piecewise-linear ramp
/// - Random: Eberhart & Shi (2001), random inertia weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightSchedule {
    /// Linear decay from `max_weight` toward `min_weight`.
    #[default]
    Typical,

    /// Quadratic decay: starts flatter than `Typical`, falls faster
    /// near the end of the run.
    LinearDifferential,

    /// Rises to 0.9 at the midpoint of the run, then falls back.
    Fitd,

    /// Uniform over `[0.25, 0.75)`, independent of the iteration index.
    Random,
}

impl WeightSchedule {
    /// Weight for zero-based iteration `i`, `i < iterations`.
    ///
    /// The decaying policies divide by `iterations`; callers must only
    /// evaluate the schedule when `iterations > 0` (the solver does so
    /// exclusively inside the generation loop, which is skipped for a
    /// zero-iteration run).
    pub fn value<R: Rng>(
        self,
        i: usize,
        iterations: usize,
        min_weight: f64,
        max_weight: f64,
        rng: &mut R,
    ) -> f64 {
        let progress = (i + 1) as f64 / iterations as f64;
        match self {
            WeightSchedule::Typical => max_weight - (max_weight - min_weight) * progress,
            WeightSchedule::LinearDifferential => {
                max_weight - (max_weight - min_weight) * progress * progress
            }
            WeightSchedule::Fitd => {
                if progress <= 0.5 {
                    progress + 0.4
                } else {
                    1.4 - progress
                }
            }
            WeightSchedule::Random => (rng.random_range(0.0..1.0) + 0.5) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_typical_endpoints() {
        let mut r = rng();
        let first = WeightSchedule::Typical.value(0, 100, 0.1, 1.0, &mut r);
        let last = WeightSchedule::Typical.value(99, 100, 0.1, 1.0, &mut r);
        // i = 0 already steps one increment below max_weight.
        assert!((first - (1.0 - 0.9 / 100.0)).abs() < 1e-12);
        assert!(first < 1.0);
        assert!((last - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_typical_monotone_decreasing() {
        let mut r = rng();
        let mut prev = f64::INFINITY;
        for i in 0..50 {
            let w = WeightSchedule::Typical.value(i, 50, 0.1, 1.0, &mut r);
            assert!(w < prev, "expected strict decay at i={i}");
            prev = w;
        }
    }

    #[test]
    fn test_linear_differential_above_typical_early() {
        // Quadratic decay stays above linear decay until the end.
        let mut r = rng();
        for i in 0..99 {
            let lin = WeightSchedule::Typical.value(i, 100, 0.1, 1.0, &mut r);
            let quad = WeightSchedule::LinearDifferential.value(i, 100, 0.1, 1.0, &mut r);
            assert!(quad >= lin, "quadratic fell below linear at i={i}");
        }
        let lin = WeightSchedule::Typical.value(99, 100, 0.1, 1.0, &mut r);
        let quad = WeightSchedule::LinearDifferential.value(99, 100, 0.1, 1.0, &mut r);
        assert!((lin - quad).abs() < 1e-12, "both end at min_weight");
    }

    #[test]
    fn test_fitd_peak_at_midpoint() {
        let mut r = rng();
        let mid = WeightSchedule::Fitd.value(49, 100, 0.1, 1.0, &mut r);
        assert!((mid - 0.9).abs() < 1e-12);
        // Rising before the midpoint, falling after.
        let early = WeightSchedule::Fitd.value(9, 100, 0.1, 1.0, &mut r);
        let late = WeightSchedule::Fitd.value(89, 100, 0.1, 1.0, &mut r);
        assert!((early - 0.5).abs() < 1e-12);
        assert!((late - 0.5).abs() < 1e-12);
        assert!(mid > early && mid > late);
    }

    #[test]
    fn test_fitd_ignores_weight_bounds() {
        let mut r = rng();
        let w = WeightSchedule::Fitd.value(0, 10, 0.0, 100.0, &mut r);
        assert!((w - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_random_in_range() {
        let mut r = rng();
        for i in 0..1000 {
            let w = WeightSchedule::Random.value(i, 10, 0.1, 1.0, &mut r);
            assert!((0.25..0.75).contains(&w), "random weight {w} out of range");
        }
    }
}
