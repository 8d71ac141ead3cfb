//! Particle motion model.
//!
//! Implements the canonical PSO velocity/position recurrence with a
//! sign-preserving velocity clamp and a hard position clamp against the
//! search bounds. Fixed dimensions never move.
//!
//! Note: clamping positions per dimension does not re-establish the
//! composition sum after a step; the swarm relies on the pull toward
//! feasible personal/global bests to stay near the simplex. See the
//! characterization test below.

use crate::config::PsoConfig;
use crate::types::Particle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Computes a particle's next velocity and position from its own history
/// and the swarm's global best.
///
/// Carries two independent random streams: one for the cognitive
/// (personal-best) term and one for the social (global-best) term. Fresh
/// draws are taken per dimension per call; the two terms never share a
/// draw.
#[derive(Debug)]
pub struct Motion {
    inertia_weight: f64,
    acc_personal: f64,
    acc_social: f64,
    rng_personal: StdRng,
    rng_social: StdRng,
}

impl Motion {
    /// Creates a motion model with initial inertia weight 1.0 and the
    /// configured acceleration factors. `seed_personal` and
    /// `seed_social` seed the two independent streams.
    pub fn new(config: &PsoConfig, seed_personal: u64, seed_social: u64) -> Self {
        Self {
            inertia_weight: 1.0,
            acc_personal: config.acc_personal,
            acc_social: config.acc_social,
            rng_personal: StdRng::seed_from_u64(seed_personal),
            rng_social: StdRng::seed_from_u64(seed_social),
        }
    }

    /// Current inertia weight.
    pub fn inertia_weight(&self) -> f64 {
        self.inertia_weight
    }

    /// Replaces the inertia weight used by subsequent motion steps.
    pub fn update_inertia_weight(&mut self, weight: f64) {
        self.inertia_weight = weight;
    }

    /// One motion step: returns a fresh particle moved toward its own
    /// best and the global best. The input particle is not mutated; its
    /// best position is carried over unchanged.
    pub fn search_food(
        &mut self,
        p: &Particle,
        global_best: &[f64],
        config: &PsoConfig,
    ) -> Particle {
        let dim = config.dimension;
        let mut position = vec![0.0; dim];
        let mut velocity = vec![0.0; dim];

        for k in 0..dim {
            if let Some(&pinned) = config.fixed_positions.get(&k) {
                position[k] = pinned;
                velocity[k] = 0.0;
                continue;
            }

            let nv = self.next_velocity(
                p.velocity[k],
                p.best_position[k],
                global_best[k],
                p.position[k],
                p.max_velocity,
            );
            velocity[k] = nv;
            position[k] = (p.position[k] + nv)
                .min(config.upper_bound)
                .max(config.lower_bound);
        }

        Particle {
            position,
            velocity,
            best_position: p.best_position.clone(),
            max_velocity: p.max_velocity,
        }
    }

    fn next_velocity(&mut self, v: f64, pbest: f64, gbest: f64, x: f64, max_v: f64) -> f64 {
        let r1: f64 = self.rng_personal.random_range(0.0..1.0);
        let r2: f64 = self.rng_social.random_range(0.0..1.0);
        let nv = self.inertia_weight * v
            + self.acc_personal * r1 * (pbest - x)
            + self.acc_social * r2 * (gbest - x);
        if nv.abs() > max_v.abs() {
            max_v.abs() * nv.signum()
        } else {
            nv
        }
    }
}
