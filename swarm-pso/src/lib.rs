//! # SwarmPSO
//!
//! **Neighborhood topologies and elitist best-tracking for particle swarm optimization.**
//!
//! SwarmPSO is the information-sharing core of a PSO engine. It partitions a
//! population into neighborhoods (Full, Ring, Star or independent Multi
//! sub-swarms) and keeps, per neighborhood, the best particle ever observed.
//! Movement rules, fitness evaluation and the iteration loop stay with the
//! caller. The top-level `swarm-pso` crate is `std`-only; `no_std` portability
//! is exposed via `swarm-pso-core`.
//!
//! ## Quick Start
//!
//! ```rust
//! use swarm_pso::prelude::*;
//!
//! #[derive(Clone, Default)]
//! struct Point {
//!     coords: [f64; 2],
//!     fitness: f64,
//! }
//!
//! impl Position for Point {
//!     fn fitness(&self) -> f64 {
//!         self.fitness
//!     }
//!     fn set_fitness(&mut self, fitness: f64) {
//!         self.fitness = fitness;
//!     }
//! }
//!
//! struct Plane;
//!
//! impl Domain for Plane {
//!     type Position = Point;
//!     type Velocity = [f64; 2];
//! }
//!
//! let config = SwarmConfig::builder()
//!     .population(12)
//!     .topology(Topology::Star)
//!     .build();
//! let mut swarm = config.into_structure::<Plane>()?;
//!
//! // one driver iteration: evaluate, refresh, then read social bests
//! for (i, particle) in swarm.particles_mut().iter_mut().enumerate() {
//!     particle.position.coords = [i as f64, 1.0];
//!     particle.position.fitness = (i as f64).powi(2) + 1.0;
//! }
//! swarm.update_neighborhoods();
//! assert_eq!(swarm.global_best().map(|p| p.fitness()), Some(1.0));
//! # Ok::<(), swarm_pso::ConfigError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `telemetry`: Enable tracing-based telemetry in the core
//! - `parallel`: Refresh neighborhoods concurrently with rayon
//!
//! ## Crate Structure
//!
//! - [`swarm_pso_core`]: Topologies, neighborhoods and the swarm structure
//!   (no_std compatible)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
compile_error!("`swarm-pso` requires the `std` feature. Use `swarm-pso-core` for no_std targets.");

// Re-export the core crate
pub use swarm_pso_core as swarm_core;

// Re-export commonly used items at the top level
pub use swarm_pso_core::{
    neighborhood::{Neighborhood, NeighborhoodId},
    particle::Particle,
    structure::SwarmStructure,
    topology::{IndexGroup, IndexGroups, Topology},
    traits::{Domain, NeighborhoodLayout, Position},
    Error, Result, BEST_FITNESS_SENTINEL,
};

use serde::{Deserialize, Serialize};

/// Prelude module for convenient imports
///
/// ```rust
/// use swarm_pso::prelude::*;
/// ```
pub mod prelude {
    pub use crate::swarm_core::prelude::*;

    pub use crate::{ConfigError, SwarmConfig, SwarmConfigBuilder};
}

/// Errors raised while loading or applying a [`SwarmConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[error("invalid swarm configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration cannot produce a valid swarm
    #[error("unusable swarm configuration: {0}")]
    Invalid(#[from] Error),
}

/// Configuration for a swarm structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Number of particles
    pub population: usize,
    /// Neighborhood topology
    pub topology: Topology,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            population: 30,
            topology: Topology::Ring,
        }
    }
}

impl SwarmConfig {
    /// Create a new config builder
    pub fn builder() -> SwarmConfigBuilder {
        SwarmConfigBuilder::new()
    }

    /// Parse a configuration from JSON.
    ///
    /// Missing fields fall back to [`SwarmConfig::default`].
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> std::result::Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that the topology can lay out the population
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.topology.index_groups(self.population)?;
        Ok(())
    }

    /// Build a swarm structure with default-initialized particles
    pub fn into_structure<D: Domain>(&self) -> std::result::Result<SwarmStructure<D>, ConfigError> {
        Ok(SwarmStructure::new(self.population, self.topology)?)
    }
}

/// Builder for SwarmConfig
#[derive(Debug, Default)]
pub struct SwarmConfigBuilder {
    config: SwarmConfig,
}

impl SwarmConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles
    pub fn population(mut self, population: usize) -> Self {
        self.config.population = population;
        self
    }

    /// Set the neighborhood topology
    pub fn topology(mut self, topology: Topology) -> Self {
        self.config.topology = topology;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SwarmConfig {
        self.config
    }
}
