//! # SwarmPSO Core
//!
//! Neighborhood topologies and elitist best-tracking for particle swarm
//! optimization.
//!
//! This crate is `no_std` compatible (it requires an allocator) and provides:
//! - Index-only neighborhood topologies (Full, Ring, Star, Multi)
//! - Neighborhoods that keep an elitist best-so-far record
//! - Particles with a first-write-wins home neighborhood handle
//! - [`SwarmStructure`](structure::SwarmStructure), which wires the above
//!   together and refreshes every neighborhood best once per iteration
//!
//! Fitness evaluation, movement rules and the iteration loop belong to the
//! caller. The core only reads `fitness()` from positions and never writes
//! positions, velocities or personal bests.
//!
//! ## Feature Flags
//!
//! - `std` (default): Enable standard library support
//! - `alloc`: Enable allocator-backed serde support (included with `std`)
//! - `telemetry`: Enable tracing-based telemetry
//! - `parallel`: Refresh neighborhoods concurrently with rayon

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod telemetry;

pub mod neighborhood;
pub mod particle;
pub mod structure;
pub mod topology;
pub mod traits;

pub use neighborhood::{Neighborhood, NeighborhoodId};
pub use particle::Particle;
pub use structure::SwarmStructure;
pub use topology::{IndexGroup, IndexGroups, Topology};
pub use traits::{Domain, NeighborhoodLayout, Position};

/// Fitness assigned to a fresh neighborhood best.
///
/// Any real fitness compares lower, so the first `update_best` always
/// replaces it.
pub const BEST_FITNESS_SENTINEL: f64 = 1e100;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::neighborhood::*;
    pub use crate::particle::*;
    pub use crate::structure::*;
    pub use crate::topology::*;
    pub use crate::traits::*;
    pub use crate::BEST_FITNESS_SENTINEL;
}

/// Result type for SwarmPSO operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for SwarmPSO core operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A topology was asked to lay out zero particles
    EmptyPopulation,
    /// `Multi` was configured with zero partitions
    ZeroPartitions,
    /// The population cannot fill every neighborhood of the layout
    PopulationTooSmall {
        /// Minimum population the layout needs
        required: usize,
        /// Population actually requested
        population: usize,
    },
    /// A particle was asked for its social best before it had a home
    NoHomeNeighborhood,
    /// A neighborhood handle does not name a neighborhood of this swarm
    UnknownNeighborhood {
        /// Offending neighborhood index
        neighborhood: usize,
    },
    /// A layout left a particle out of every neighborhood
    OrphanedParticle {
        /// Index of the orphaned particle
        particle: usize,
    },
    /// A layout produced a neighborhood with no members
    EmptyNeighborhood {
        /// Index of the empty neighborhood
        neighborhood: usize,
    },
    /// A layout produced an index outside the population
    ParticleOutOfRange {
        /// Offending index
        index: usize,
        /// Population size
        population: usize,
    },
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::EmptyPopulation => write!(f, "population size must be non-zero"),
            Error::ZeroPartitions => write!(f, "multi topology needs at least one partition"),
            Error::PopulationTooSmall {
                required,
                population,
            } => write!(
                f,
                "population of {} cannot fill a layout that needs {} particles",
                population, required
            ),
            Error::NoHomeNeighborhood => write!(f, "particle has no home neighborhood"),
            Error::UnknownNeighborhood { neighborhood } => {
                write!(f, "neighborhood {} does not exist", neighborhood)
            }
            Error::OrphanedParticle { particle } => {
                write!(f, "particle {} belongs to no neighborhood", particle)
            }
            Error::EmptyNeighborhood { neighborhood } => {
                write!(f, "layout left neighborhood {} without members", neighborhood)
            }
            Error::ParticleOutOfRange { index, population } => write!(
                f,
                "layout referenced particle {} but population is {}",
                index, population
            ),
        }
    }
}
