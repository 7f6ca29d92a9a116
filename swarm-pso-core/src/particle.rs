//! Particle state
//!
//! A particle carries the caller's position, velocity and personal best,
//! plus a handle to its home neighborhood. The handle is written once, by the
//! first neighborhood that registers the particle.

use crate::neighborhood::{Neighborhood, NeighborhoodId};
use crate::traits::{Domain, Position};
use crate::{Error, Result};

/// Particle state in PSO
pub struct Particle<D: Domain> {
    /// Current position, including its fitness
    pub position: D::Position,
    /// Current velocity
    pub velocity: D::Velocity,
    /// Personal best position, maintained by the caller
    pub best_position: D::Position,
    home: Option<NeighborhoodId>,
}

impl<D: Domain> Particle<D> {
    /// Create a particle from explicit state, with no home neighborhood yet
    pub fn new(position: D::Position, velocity: D::Velocity, best_position: D::Position) -> Self {
        Self {
            position,
            velocity,
            best_position,
            home: None,
        }
    }

    /// Fitness of the current position
    pub fn fitness(&self) -> f64 {
        self.position.fitness()
    }

    /// Neighborhood whose best this particle follows
    pub fn home_neighborhood(&self) -> Option<NeighborhoodId> {
        self.home
    }

    /// Record `id` as home unless one is already set.
    ///
    /// Returns `true` if this call assigned the home.
    pub(crate) fn claim_home(&mut self, id: NeighborhoodId) -> bool {
        if self.home.is_some() {
            return false;
        }
        self.home = Some(id);
        true
    }

    pub(crate) fn clear_home(&mut self) {
        self.home = None;
    }

    /// Best position known to this particle's home neighborhood.
    ///
    /// Before the first neighborhood refresh this is the sentinel-seeded
    /// position (fitness [`BEST_FITNESS_SENTINEL`](crate::BEST_FITNESS_SENTINEL)),
    /// which means no social best exists yet.
    pub fn gbest_position<'a>(
        &self,
        neighborhoods: &'a [Neighborhood<D>],
    ) -> Result<&'a D::Position> {
        let home = self.home.ok_or(Error::NoHomeNeighborhood)?;
        neighborhoods
            .get(home.index())
            .map(|n| &n.best().position)
            .ok_or(Error::UnknownNeighborhood {
                neighborhood: home.index(),
            })
    }
}

impl<D: Domain> Default for Particle<D> {
    fn default() -> Self {
        Self::new(
            D::Position::default(),
            D::Velocity::default(),
            D::Position::default(),
        )
    }
}

impl<D: Domain> Clone for Particle<D> {
    fn clone(&self) -> Self {
        Self {
            position: self.position.clone(),
            velocity: self.velocity.clone(),
            best_position: self.best_position.clone(),
            home: self.home,
        }
    }
}

impl<D: Domain> core::fmt::Debug for Particle<D>
where
    D::Position: core::fmt::Debug,
    D::Velocity: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Particle")
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("best_position", &self.best_position)
            .field("home", &self.home)
            .finish()
    }
}
