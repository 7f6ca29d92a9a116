//! Core traits for SwarmPSO
//!
//! These traits are the seams between the swarm core and the caller: the
//! problem domain supplies positions and velocities, and a layout supplies
//! the neighborhood index groups.

use crate::topology::IndexGroups;
use crate::Result;

/// A point in the search space that carries its own fitness.
///
/// Lower fitness is better. The core ranks a NaN fitness, of either sign,
/// after every real value, so a NaN never displaces a real best.
pub trait Position: Clone + Default {
    /// Fitness of this position
    fn fitness(&self) -> f64;

    /// Overwrite the stored fitness
    fn set_fitness(&mut self, fitness: f64);
}

/// The problem domain a swarm optimizes over.
///
/// Implementors are usually zero-sized marker types that only name the
/// position and velocity representations.
pub trait Domain {
    /// Position representation, including its fitness
    type Position: Position;
    /// Velocity representation
    type Velocity: Clone + Default;
}

/// A rule that assigns particle indices to neighborhoods.
///
/// [`SwarmStructure`](crate::structure::SwarmStructure) depends only on this
/// capability. [`Topology`](crate::topology::Topology) provides the built-in
/// shapes, and callers may supply their own.
pub trait NeighborhoodLayout {
    /// Compute the index groups for a population of the given size
    fn index_groups(&self, population: usize) -> Result<IndexGroups>;

    /// Short name for logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<L: NeighborhoodLayout + ?Sized> NeighborhoodLayout for &L {
    fn index_groups(&self, population: usize) -> Result<IndexGroups> {
        (**self).index_groups(population)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
