//! Neighborhoods and elitist best-tracking
//!
//! A neighborhood observes a fixed list of particles by index and remembers
//! the best particle any of them has ever shown. The remembered best only
//! improves: a refresh where every member got worse leaves it untouched.
//!
//! Members are indices into the particle arena owned by
//! [`SwarmStructure`](crate::structure::SwarmStructure). The same particle may
//! be observed by many neighborhoods, but it follows the best of exactly one:
//! the first neighborhood that registered it.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::particle::Particle;
use crate::traits::{Domain, Position};
use crate::BEST_FITNESS_SENTINEL;

/// Handle to a neighborhood within its swarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "alloc", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborhoodId(pub usize);

impl NeighborhoodId {
    /// Position of the neighborhood in its swarm's table
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A communication group with an elitist best-so-far record
pub struct Neighborhood<D: Domain> {
    id: NeighborhoodId,
    members: Vec<usize>,
    best: Particle<D>,
}

impl<D: Domain> Neighborhood<D> {
    /// Create an empty neighborhood whose best carries the sentinel fitness
    pub fn new(id: NeighborhoodId) -> Self {
        let mut best = Particle::<D>::default();
        best.position.set_fitness(BEST_FITNESS_SENTINEL);
        Self {
            id,
            members: Vec::new(),
            best,
        }
    }

    /// This neighborhood's handle
    pub fn id(&self) -> NeighborhoodId {
        self.id
    }

    /// Observed particle indices, in registration order
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if no particle has been registered
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Best particle seen so far
    pub fn best(&self) -> &Particle<D> {
        &self.best
    }

    /// Fitness of the best particle seen so far
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness()
    }

    /// Check if the best has moved off the sentinel
    pub fn has_best(&self) -> bool {
        self.best_fitness() < BEST_FITNESS_SENTINEL
    }

    /// Register `particle`, stored at `index` in the arena.
    ///
    /// The particle adopts this neighborhood as home unless an earlier
    /// neighborhood already claimed it.
    pub fn add(&mut self, index: usize, particle: &mut Particle<D>) {
        particle.claim_home(self.id);
        self.members.push(index);
    }

    /// Refresh the best from the current members.
    ///
    /// The lowest-fitness member (first one on ties) replaces the stored best
    /// only if it is strictly better. Returns `true` if the best changed.
    ///
    /// # Panics
    ///
    /// Panics if the neighborhood has no members, or if a member index is
    /// outside `particles`.
    pub fn update_best(&mut self, particles: &[Particle<D>]) -> bool {
        let Some(candidate) = self
            .members
            .iter()
            .map(|&m| &particles[m])
            .min_by(|&a, &b| compare_fitness(a, b))
        else {
            panic!("update_best on empty neighborhood {}", self.id.0);
        };

        if compare_fitness(candidate, &self.best) == Ordering::Less {
            self.best = candidate.clone();
            return true;
        }
        false
    }

    /// Move the lowest-fitness member to the front and the highest-fitness
    /// member to the back.
    ///
    /// Ties pick the first minimum and the last maximum. Other members keep
    /// no particular order. Does nothing on an empty neighborhood.
    pub fn minmax(&mut self, particles: &[Particle<D>]) {
        let len = self.members.len();
        if len == 0 {
            return;
        }

        let member_at = |pos: usize| &particles[self.members[pos]];
        let min_pos = (0..len)
            .min_by(|&a, &b| compare_fitness(member_at(a), member_at(b)))
            .unwrap_or(0);
        let max_pos = (0..len)
            .max_by(|&a, &b| compare_fitness(member_at(a), member_at(b)))
            .unwrap_or(len - 1);

        self.members.swap(0, min_pos);
        // The first swap moved whatever sat at the front into min_pos.
        let max_pos = if max_pos == 0 { min_pos } else { max_pos };
        self.members.swap(len - 1, max_pos);
    }
}

fn compare_fitness<D: Domain>(a: &Particle<D>, b: &Particle<D>) -> Ordering {
    order_fitness(a.fitness(), b.fitness())
}

/// Total order on fitness values where every NaN, whatever its sign, ranks
/// after all real values.
pub(crate) fn order_fitness(a: f64, b: f64) -> Ordering {
    let rank = |f: f64| if f.is_nan() { f64::INFINITY } else { f };
    rank(a).total_cmp(&rank(b))
}

impl<D: Domain> Clone for Neighborhood<D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            members: self.members.clone(),
            best: self.best.clone(),
        }
    }
}

impl<D: Domain> core::fmt::Debug for Neighborhood<D>
where
    D::Position: core::fmt::Debug,
    D::Velocity: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Neighborhood")
            .field("id", &self.id)
            .field("members", &self.members)
            .field("best", &self.best)
            .finish()
    }
}
