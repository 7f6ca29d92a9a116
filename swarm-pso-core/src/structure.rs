//! Swarm structure
//!
//! [`SwarmStructure`] owns the particle population and one neighborhood per
//! index group of its layout. Membership is wired once, at construction;
//! afterwards the caller mutates particles and calls
//! [`update_neighborhoods`](SwarmStructure::update_neighborhoods) once per
//! iteration, before any particle reads its social best.
//!
//! ```rust
//! use swarm_pso_core::prelude::*;
//!
//! #[derive(Clone, Default)]
//! struct Scalar {
//!     value: f64,
//!     fitness: f64,
//! }
//!
//! impl Position for Scalar {
//!     fn fitness(&self) -> f64 {
//!         self.fitness
//!     }
//!     fn set_fitness(&mut self, fitness: f64) {
//!         self.fitness = fitness;
//!     }
//! }
//!
//! struct Parabola;
//!
//! impl Domain for Parabola {
//!     type Position = Scalar;
//!     type Velocity = f64;
//! }
//!
//! let mut swarm = SwarmStructure::<Parabola>::new(5, Topology::Ring)?;
//! for (i, particle) in swarm.particles_mut().iter_mut().enumerate() {
//!     particle.position.value = i as f64 - 2.0;
//!     particle.position.fitness = particle.position.value.powi(2);
//! }
//! swarm.update_neighborhoods();
//! assert_eq!(swarm.gbest_position(2)?.fitness(), 0.0);
//! # Ok::<(), swarm_pso_core::Error>(())
//! ```

use alloc::vec::Vec;

use crate::neighborhood::{order_fitness, Neighborhood, NeighborhoodId};
use crate::particle::Particle;
use crate::topology::{IndexGroups, Topology};
use crate::traits::{Domain, NeighborhoodLayout};
use crate::{Error, Result};

/// A particle population partitioned into neighborhoods
pub struct SwarmStructure<D: Domain, L: NeighborhoodLayout = Topology> {
    layout: L,
    groups: IndexGroups,
    particles: Vec<Particle<D>>,
    neighborhoods: Vec<Neighborhood<D>>,
}

impl<D: Domain, L: NeighborhoodLayout> SwarmStructure<D, L> {
    /// Build `population` default particles and wire them into the layout
    pub fn new(population: usize, layout: L) -> Result<Self> {
        let particles = (0..population).map(|_| Particle::default()).collect();
        Self::from_particles(particles, layout)
    }

    /// Wire caller-initialized particles into the layout.
    ///
    /// Any home assignment the particles carry is discarded; homes are
    /// assigned again from the layout's index groups.
    pub fn from_particles(mut particles: Vec<Particle<D>>, layout: L) -> Result<Self> {
        let population = particles.len();
        let groups = layout.index_groups(population)?;

        for particle in particles.iter_mut() {
            particle.clear_home();
        }

        let mut neighborhoods = Vec::with_capacity(groups.count());
        for (n, group) in groups.iter().enumerate() {
            if group.is_empty() {
                return Err(Error::EmptyNeighborhood { neighborhood: n });
            }

            let mut neighborhood = Neighborhood::new(NeighborhoodId(n));
            for index in group.iter() {
                let particle = particles
                    .get_mut(index)
                    .ok_or(Error::ParticleOutOfRange { index, population })?;
                neighborhood.add(index, particle);
            }
            neighborhoods.push(neighborhood);
        }

        if let Some(particle) = particles
            .iter()
            .position(|p| p.home_neighborhood().is_none())
        {
            return Err(Error::OrphanedParticle { particle });
        }

        swarm_debug!(
            topology = layout.name(),
            population,
            neighborhoods = neighborhoods.len(),
            "swarm structure built"
        );

        Ok(Self {
            layout,
            groups,
            particles,
            neighborhoods,
        })
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check if the swarm has no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Layout the swarm was built from
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Index groups the layout produced
    pub fn index_groups(&self) -> &IndexGroups {
        &self.groups
    }

    /// All particles, in index order
    pub fn particles(&self) -> &[Particle<D>] {
        &self.particles
    }

    /// Mutable access for the driver's per-iteration updates
    pub fn particles_mut(&mut self) -> &mut [Particle<D>] {
        &mut self.particles
    }

    /// Particle at `index`
    pub fn particle(&self, index: usize) -> Option<&Particle<D>> {
        self.particles.get(index)
    }

    /// Mutable particle at `index`
    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle<D>> {
        self.particles.get_mut(index)
    }

    /// All neighborhoods, indexed by [`NeighborhoodId`]
    pub fn neighborhoods(&self) -> &[Neighborhood<D>] {
        &self.neighborhoods
    }

    /// Neighborhood named by `id`
    pub fn neighborhood(&self, id: NeighborhoodId) -> Option<&Neighborhood<D>> {
        self.neighborhoods.get(id.index())
    }

    /// Social best visible to the particle at `index`.
    ///
    /// Before the first [`update_neighborhoods`](Self::update_neighborhoods)
    /// this is the sentinel-seeded position.
    pub fn gbest_position(&self, index: usize) -> Result<&D::Position> {
        let particle = self.particles.get(index).ok_or(Error::ParticleOutOfRange {
            index,
            population: self.particles.len(),
        })?;
        particle.gbest_position(&self.neighborhoods)
    }

    /// Refresh the best of every neighborhood from current particle state.
    ///
    /// Returns how many neighborhoods improved.
    pub fn update_neighborhoods(&mut self) -> usize {
        let particles = &self.particles;
        let mut improved = 0;
        for neighborhood in self.neighborhoods.iter_mut() {
            if neighborhood.update_best(particles) {
                swarm_trace!(
                    neighborhood = neighborhood.id().index(),
                    fitness = neighborhood.best_fitness(),
                    "neighborhood best improved"
                );
                improved += 1;
            }
        }
        improved
    }

    /// Refresh every neighborhood best concurrently.
    ///
    /// Equivalent to [`update_neighborhoods`](Self::update_neighborhoods):
    /// each neighborhood reads shared particles and writes only its own best.
    #[cfg(feature = "parallel")]
    pub fn update_neighborhoods_par(&mut self) -> usize
    where
        D::Position: Send + Sync,
        D::Velocity: Send + Sync,
    {
        use rayon::prelude::*;

        let particles = &self.particles;
        self.neighborhoods
            .par_iter_mut()
            .map(|neighborhood| usize::from(neighborhood.update_best(particles)))
            .sum()
    }

    /// Reorder one neighborhood so its best member is first and its worst last
    pub fn minmax_neighborhood(&mut self, id: NeighborhoodId) -> Result<()> {
        let particles = &self.particles;
        let neighborhood = self
            .neighborhoods
            .get_mut(id.index())
            .ok_or(Error::UnknownNeighborhood {
                neighborhood: id.index(),
            })?;
        neighborhood.minmax(particles);
        Ok(())
    }

    /// Apply [`Neighborhood::minmax`] to every neighborhood
    pub fn minmax_neighborhoods(&mut self) {
        let particles = &self.particles;
        for neighborhood in self.neighborhoods.iter_mut() {
            neighborhood.minmax(particles);
        }
    }

    /// Lowest best across all neighborhoods.
    ///
    /// `None` until some neighborhood has recorded a real best.
    pub fn global_best(&self) -> Option<&Particle<D>> {
        self.neighborhoods
            .iter()
            .filter(|n| n.has_best())
            .min_by(|a, b| order_fitness(a.best_fitness(), b.best_fitness()))
            .map(|n| n.best())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::test_domain::{Line, Point};
    use crate::topology::IndexGroup;
    use crate::BEST_FITNESS_SENTINEL;
    use alloc::vec;

    fn set_fitness(swarm: &mut SwarmStructure<Line, impl NeighborhoodLayout>, fitness: &[f64]) {
        for (particle, &f) in swarm.particles_mut().iter_mut().zip(fitness) {
            particle.position.fitness = f;
        }
    }

    /// Layout with a fixed set of groups, for exercising construction checks
    struct Fixed(Vec<Vec<usize>>);

    impl NeighborhoodLayout for Fixed {
        fn index_groups(&self, _population: usize) -> Result<IndexGroups> {
            Ok(IndexGroups::from(
                self.0.iter().cloned().map(IndexGroup::from).collect::<Vec<_>>(),
            ))
        }
    }

    #[test]
    fn test_builds_one_neighborhood_per_group() {
        let swarm = SwarmStructure::<Line>::new(6, Topology::Star).unwrap();
        assert_eq!(swarm.len(), 6);
        assert_eq!(swarm.neighborhoods().len(), 6);
        assert_eq!(swarm.neighborhoods()[2].members(), &[2, 1, 0, 3, 4, 5]);
        assert_eq!(swarm.layout(), &Topology::Star);
        assert_eq!(swarm.index_groups().count(), 6);
    }

    #[test]
    fn test_homes_follow_registration_order() {
        let swarm = SwarmStructure::<Line>::new(5, Topology::Ring).unwrap();
        let homes: Vec<usize> = swarm
            .particles()
            .iter()
            .map(|p| p.home_neighborhood().unwrap().index())
            .collect();
        // neighborhood 0 = [0, 1, 4] claims first; neighborhood i then claims i + 1
        assert_eq!(homes, vec![0, 0, 1, 2, 0]);
    }

    #[test]
    fn test_star_homes_hub_and_upper_leaves_outside_own_group() {
        let swarm = SwarmStructure::<Line>::new(6, Topology::Star).unwrap();
        let homes: Vec<usize> = swarm
            .particles()
            .iter()
            .map(|p| p.home_neighborhood().unwrap().index())
            .collect();
        // neighborhood 0 = [0, 2] claims the hub; the hub's group [2, 1, 0, 3, 4, 5]
        // then claims every leaf above the hub before their own groups exist
        assert_eq!(homes, vec![0, 1, 0, 2, 2, 2]);
    }

    #[test]
    fn test_upper_leaf_follows_hub_group_best() {
        let mut swarm = SwarmStructure::<Line>::new(6, Topology::Star).unwrap();
        set_fitness(&mut swarm, &[7.0, 6.0, 5.0, 0.5, 3.0, 4.0]);
        swarm.update_neighborhoods();

        // neighborhood 4 = [4, 2] only sees 3.0; the hub's group saw 0.5
        assert_eq!(swarm.neighborhoods()[4].best_fitness(), 3.0);
        assert_eq!(swarm.neighborhoods()[2].best_fitness(), 0.5);
        assert_eq!(swarm.gbest_position(4).unwrap().fitness, 0.5);
        assert_eq!(swarm.gbest_position(5).unwrap().fitness, 0.5);
        // leaves below the hub follow their own group
        assert_eq!(swarm.gbest_position(1).unwrap().fitness, 5.0);
        assert_eq!(swarm.gbest_position(0).unwrap().fitness, 5.0);
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(NeighborhoodLayout::name(&Topology::multi(3)), "multi");
        assert_eq!(NeighborhoodLayout::name(&&Topology::Star), "star");
        assert_eq!(Fixed(vec![vec![0]]).name(), "custom");
    }

    #[test]
    fn test_global_best_survives_negative_nan() {
        let mut swarm = SwarmStructure::<Line>::new(2, Topology::Full).unwrap();
        set_fitness(&mut swarm, &[4.0, 8.0]);
        swarm.update_neighborhoods();

        set_fitness(&mut swarm, &[4.0, -f64::NAN]);
        swarm.update_neighborhoods();
        assert_eq!(swarm.global_best().map(|p| p.fitness()), Some(4.0));

        set_fitness(&mut swarm, &[0.5, -f64::NAN]);
        assert_eq!(swarm.update_neighborhoods(), 2);
        assert_eq!(swarm.global_best().map(|p| p.fitness()), Some(0.5));
    }

    #[test]
    fn test_gbest_before_update_is_sentinel() {
        let swarm = SwarmStructure::<Line>::new(3, Topology::Full).unwrap();
        assert_eq!(swarm.gbest_position(1).unwrap().fitness, BEST_FITNESS_SENTINEL);
        assert!(swarm.global_best().is_none());
    }

    #[test]
    fn test_update_reports_improvements() {
        let mut swarm = SwarmStructure::<Line>::new(4, Topology::multi(2)).unwrap();
        set_fitness(&mut swarm, &[4.0, 3.0, 2.0, 1.0]);
        assert_eq!(swarm.update_neighborhoods(), 2);
        assert_eq!(swarm.neighborhoods()[0].best_fitness(), 2.0);
        assert_eq!(swarm.neighborhoods()[1].best_fitness(), 1.0);

        set_fitness(&mut swarm, &[0.5, 9.0, 9.0, 9.0]);
        assert_eq!(swarm.update_neighborhoods(), 1);
        assert_eq!(swarm.gbest_position(2).unwrap().fitness, 0.5);
        assert_eq!(swarm.gbest_position(3).unwrap().fitness, 1.0);
    }

    #[test]
    fn test_global_best() {
        let mut swarm = SwarmStructure::<Line>::new(6, Topology::multi(3)).unwrap();
        set_fitness(&mut swarm, &[6.0, 5.0, 4.0, 3.0, 2.0, 7.0]);
        swarm.update_neighborhoods();
        let best = swarm.global_best().unwrap();
        assert_eq!(best.fitness(), 2.0);
    }

    #[test]
    fn test_from_particles_resets_homes() {
        let source = SwarmStructure::<Line>::new(3, Topology::multi(3)).unwrap();
        assert_eq!(
            source.particle(2).unwrap().home_neighborhood(),
            Some(NeighborhoodId(2))
        );
        let particles = source.particles().to_vec();
        let swarm = SwarmStructure::<Line>::from_particles(particles, Topology::Ring).unwrap();
        assert_eq!(
            swarm.particle(2).unwrap().home_neighborhood(),
            Some(NeighborhoodId(0))
        );
        assert_eq!(
            swarm.particle(1).unwrap().home_neighborhood(),
            Some(NeighborhoodId(0))
        );
    }

    #[test]
    fn test_from_particles_keeps_state() {
        let particles = vec![
            Particle::<Line>::new(Point { x: 1.0, fitness: 1.0 }, 0.1, Point::default()),
            Particle::<Line>::new(Point { x: 2.0, fitness: 4.0 }, 0.2, Point::default()),
        ];
        let mut swarm = SwarmStructure::from_particles(particles, Topology::Full).unwrap();
        swarm.update_neighborhoods();
        assert_eq!(swarm.gbest_position(1).unwrap().x, 1.0);
        assert_eq!(swarm.particle(1).unwrap().velocity, 0.2);
    }

    #[test]
    fn test_invalid_layouts_rejected() {
        assert_eq!(
            SwarmStructure::<Line>::new(0, Topology::Full).err(),
            Some(Error::EmptyPopulation)
        );
        assert_eq!(
            SwarmStructure::<Line, _>::new(3, Fixed(vec![vec![0, 1]])).err(),
            Some(Error::OrphanedParticle { particle: 2 })
        );
        assert_eq!(
            SwarmStructure::<Line, _>::new(2, Fixed(vec![vec![0, 1], vec![]])).err(),
            Some(Error::EmptyNeighborhood { neighborhood: 1 })
        );
        assert_eq!(
            SwarmStructure::<Line, _>::new(2, Fixed(vec![vec![0, 5]])).err(),
            Some(Error::ParticleOutOfRange {
                index: 5,
                population: 2
            })
        );
    }

    #[test]
    fn test_lookup_errors() {
        let mut swarm = SwarmStructure::<Line>::new(3, Topology::Ring).unwrap();
        assert_eq!(
            swarm.gbest_position(3).err(),
            Some(Error::ParticleOutOfRange {
                index: 3,
                population: 3
            })
        );
        assert_eq!(
            swarm.minmax_neighborhood(NeighborhoodId(9)),
            Err(Error::UnknownNeighborhood { neighborhood: 9 })
        );
    }

    #[test]
    fn test_minmax_neighborhood() {
        let mut swarm = SwarmStructure::<Line>::new(4, Topology::Full).unwrap();
        set_fitness(&mut swarm, &[3.0, 9.0, 1.0, 5.0]);
        swarm.minmax_neighborhood(NeighborhoodId(0)).unwrap();
        let members = swarm.neighborhoods()[0].members();
        assert_eq!(members[0], 2);
        assert_eq!(members[3], 1);

        swarm.minmax_neighborhoods();
        assert_eq!(swarm.neighborhoods()[0].members()[0], 2);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let fitness = [5.0, 3.0, 8.0, 1.0, 9.0, 2.0, 7.0];
        let mut sequential = SwarmStructure::<Line>::new(7, Topology::Ring).unwrap();
        let mut parallel = SwarmStructure::<Line>::new(7, Topology::Ring).unwrap();
        set_fitness(&mut sequential, &fitness);
        set_fitness(&mut parallel, &fitness);

        assert_eq!(
            sequential.update_neighborhoods(),
            parallel.update_neighborhoods_par()
        );
        for (a, b) in sequential
            .neighborhoods()
            .iter()
            .zip(parallel.neighborhoods())
        {
            assert_eq!(a.best_fitness(), b.best_fitness());
        }
    }
}
