//! Feasible swarm initialization.
//!
//! Builds particles that satisfy the composition constraint exactly:
//! fixed dimensions take their pinned value, free dimensions are drawn
//! inside the remaining budget, and the last free dimension closes the
//! sum. Each slot gets a bounded number of attempts to also satisfy the
//! caller's constraint set; slots that never succeed are dropped.

use crate::config::PsoConfig;
use crate::constraint::ConstraintSet;
use crate::types::{Observer, Particle};
use rand::Rng;

/// Initializes the swarm.
///
/// `seeds` optionally pre-seeds slots by index: a slot with a seed entry
/// of the right length takes that position verbatim (velocities are
/// still randomized). Every slot is validated against `constraints` (if
/// any) with up to `config.init_retry_budget` attempts; exhausted slots
/// are dropped and reported to the observer.
///
/// The returned swarm may be smaller than `config.particle_count`; an
/// empty swarm means initialization failed.
pub fn init_swarm<R: Rng>(
    config: &PsoConfig,
    constraints: Option<&ConstraintSet>,
    seeds: Option<&[Vec<f64>]>,
    rng: &mut R,
    observer: &dyn Observer,
) -> Vec<Particle> {
    let mut swarm = Vec::with_capacity(config.particle_count);

    for slot in 0..config.particle_count {
        let seed = seeds
            .and_then(|s| s.get(slot))
            .filter(|p| p.len() == config.dimension);

        let mut placed = false;
        for _ in 0..config.init_retry_budget {
            let candidate = match seed {
                Some(position) => Some((position.clone(), seeded_velocity(config, rng))),
                None => assemble(config, rng),
            };
            let Some((position, velocity)) = candidate else {
                continue;
            };

            if let Some(set) = constraints {
                if let Err(violation) = set.check(&position) {
                    observer.on_constraint_violation(&violation.name, &violation.position);
                    continue;
                }
            }

            swarm.push(Particle::new(position, velocity, config.max_velocity));
            placed = true;
            break;
        }

        if !placed {
            observer.on_slot_dropped(slot, config.init_retry_budget);
        }
    }

    swarm
}

/// One assembly attempt. Returns `None` when the remaining budget leaves
/// no legal interval for a free dimension or the closing value falls
/// outside the bounds.
fn assemble<R: Rng>(config: &PsoConfig, rng: &mut R) -> Option<(Vec<f64>, Vec<f64>)> {
    let dim = config.dimension;
    let mut position = vec![0.0; dim];
    let mut velocity = vec![0.0; dim];

    let mut running = 0.0;
    for (&k, &pinned) in &config.fixed_positions {
        position[k] = pinned;
        running += pinned;
    }

    let free: Vec<usize> = (0..dim)
        .filter(|k| !config.fixed_positions.contains_key(k))
        .collect();
    let last = *free.last()?;

    for &k in &free {
        velocity[k] = rng.random_range(0.0..config.max_velocity);
        if k == last {
            // Close the composition sum exactly.
            let closing = config.upper_bound - running;
            if !(config.lower_bound..=config.upper_bound).contains(&closing) {
                return None;
            }
            position[k] = closing;
        } else {
            let remaining = config.upper_bound - running;
            if remaining <= config.lower_bound {
                return None;
            }
            let value = rng.random_range(config.lower_bound..remaining);
            position[k] = value;
            running += value;
        }
    }

    Some((position, velocity))
}

/// Velocities for a pre-seeded slot: random within the cap for free
/// dimensions, zero for pinned ones.
fn seeded_velocity<R: Rng>(config: &PsoConfig, rng: &mut R) -> Vec<f64> {
    (0..config.dimension)
        .map(|k| {
            if config.fixed_positions.contains_key(&k) {
                0.0
            } else {
                rng.random_range(0.0..config.max_velocity)
            }
        })
        .collect()
}
