//! Neighborhood topologies
//!
//! A topology is a pure function of the population size. It produces
//! [`IndexGroups`]: for every neighborhood, the ordered list of particle
//! indices it observes. Groups may overlap, and a group may name the same
//! particle more than once.

use alloc::vec::Vec;

use crate::traits::NeighborhoodLayout;
use crate::{Error, Result};

/// Ordered particle indices observed by one neighborhood
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "alloc", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexGroup {
    indices: Vec<usize>,
}

impl IndexGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the group has no entries
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a particle index
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Swap the entry at `position` into the front of the group.
    ///
    /// Panics if `position` is out of bounds.
    pub fn swap_front(&mut self, position: usize) {
        self.indices.swap(0, position);
    }

    /// Entry at `position`
    pub fn get(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// Entries in order
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate over the entries in order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Check if the group names `index` at least once
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

impl From<Vec<usize>> for IndexGroup {
    fn from(indices: Vec<usize>) -> Self {
        Self { indices }
    }
}

/// Index groups for every neighborhood of a layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "alloc", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexGroups {
    groups: Vec<IndexGroup>,
}

impl IndexGroups {
    /// Create `count` empty groups
    pub fn with_count(count: usize) -> Self {
        let mut groups = Vec::with_capacity(count);
        groups.resize_with(count, IndexGroup::new);
        Self { groups }
    }

    /// Number of neighborhoods
    pub fn count(&self) -> usize {
        self.groups.len()
    }

    /// Group for neighborhood `index`
    pub fn get(&self, index: usize) -> Option<&IndexGroup> {
        self.groups.get(index)
    }

    /// Mutable group for neighborhood `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut IndexGroup> {
        self.groups.get_mut(index)
    }

    /// Iterate over the groups in neighborhood order
    pub fn iter(&self) -> impl Iterator<Item = &IndexGroup> + '_ {
        self.groups.iter()
    }

    /// Neighborhoods that name `index`, in neighborhood order
    pub fn neighborhoods_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.groups
            .iter()
            .enumerate()
            .filter(move |(_, group)| group.contains(index))
            .map(|(n, _)| n)
    }
}

impl From<Vec<IndexGroup>> for IndexGroups {
    fn from(groups: Vec<IndexGroup>) -> Self {
        Self { groups }
    }
}

impl core::ops::Index<usize> for IndexGroups {
    type Output = IndexGroup;

    fn index(&self, index: usize) -> &IndexGroup {
        &self.groups[index]
    }
}

impl core::ops::IndexMut<usize> for IndexGroups {
    fn index_mut(&mut self, index: usize) -> &mut IndexGroup {
        &mut self.groups[index]
    }
}

/// Swarm neighborhood topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "alloc",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Topology {
    /// Fully connected - one neighborhood holding every particle
    Full,
    /// Ring - each particle with its two circular neighbors
    Ring,
    /// Star - a hub at `population / 3` that sees everyone
    Star,
    /// Independent sub-swarms, assigned round-robin
    Multi { partitions: usize },
}

impl Default for Topology {
    fn default() -> Self {
        Self::Ring
    }
}

impl Topology {
    /// Create a multi topology with the given number of partitions
    pub fn multi(partitions: usize) -> Self {
        Self::Multi { partitions }
    }

    /// Short lowercase name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Topology::Full => "full",
            Topology::Ring => "ring",
            Topology::Star => "star",
            Topology::Multi { .. } => "multi",
        }
    }

    /// Number of neighborhoods this topology creates for `population`
    pub fn neighborhood_count(&self, population: usize) -> usize {
        match self {
            Topology::Full => 1,
            Topology::Ring | Topology::Star => population,
            Topology::Multi { partitions } => *partitions,
        }
    }

    /// Hub index of a star over `population` particles
    pub fn star_hub(population: usize) -> usize {
        population / 3
    }

    fn full(population: usize) -> IndexGroups {
        let mut groups = IndexGroups::with_count(1);
        for i in 0..population {
            groups[0].push(i);
        }
        groups
    }

    fn ring(population: usize) -> IndexGroups {
        let mut groups = IndexGroups::with_count(population);
        for i in 0..population {
            let group = &mut groups[i];
            group.push(i);
            group.push((i + 1) % population);
            group.push((i + population - 1) % population);
        }
        groups
    }

    fn star(population: usize) -> IndexGroups {
        let central = Self::star_hub(population);
        let mut groups = IndexGroups::with_count(population);
        for i in 0..population {
            groups[i].push(i);
            if i != central {
                groups[i].push(central);
                groups[central].push(i);
            }
        }
        // Downstream indexing expects the hub entry order produced by this swap.
        groups[central].swap_front(central);
        groups
    }

    fn multi_groups(population: usize, partitions: usize) -> Result<IndexGroups> {
        if partitions == 0 {
            return Err(Error::ZeroPartitions);
        }
        if population < partitions {
            return Err(Error::PopulationTooSmall {
                required: partitions,
                population,
            });
        }

        let mut groups = IndexGroups::with_count(partitions);
        for i in 0..population {
            groups[i % partitions].push(i);
        }
        Ok(groups)
    }
}

impl NeighborhoodLayout for Topology {
    fn index_groups(&self, population: usize) -> Result<IndexGroups> {
        if population == 0 {
            return Err(Error::EmptyPopulation);
        }

        match self {
            Topology::Full => Ok(Self::full(population)),
            Topology::Ring => Ok(Self::ring(population)),
            Topology::Star => Ok(Self::star(population)),
            Topology::Multi { partitions } => Self::multi_groups(population, *partitions),
        }
    }

    fn name(&self) -> &str {
        Topology::name(self)
    }
}
