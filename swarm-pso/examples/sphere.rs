//! Sphere Example
//!
//! Drives a small PSO over the 2-D sphere function, once per topology, and
//! prints the best fitness each swarm reaches.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swarm_pso::prelude::*;

const DIM: usize = 2;
const ITERATIONS: usize = 200;
const INERTIA: f64 = 0.7;
const COGNITIVE: f64 = 1.5;
const SOCIAL: f64 = 1.5;
const BOUND: f64 = 5.0;

#[derive(Debug, Clone, Default)]
struct Point {
    coords: [f64; DIM],
    fitness: f64,
}

impl Position for Point {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

struct Sphere;

impl Domain for Sphere {
    type Position = Point;
    type Velocity = [f64; DIM];
}

fn evaluate(point: &mut Point) {
    point.fitness = point.coords.iter().map(|x| x * x).sum();
}

fn run(topology: Topology, rng: &mut StdRng) -> Result<f64, ConfigError> {
    let config = SwarmConfig::builder()
        .population(24)
        .topology(topology)
        .build();
    let mut swarm = config.into_structure::<Sphere>()?;

    for particle in swarm.particles_mut() {
        for d in 0..DIM {
            particle.position.coords[d] = rng.gen_range(-BOUND..BOUND);
        }
        evaluate(&mut particle.position);
        particle.best_position = particle.position.clone();
    }
    swarm.update_neighborhoods();

    for _ in 0..ITERATIONS {
        // Social bests are read before any particle moves this iteration.
        let social: Vec<Point> = (0..swarm.len())
            .map(|i| swarm.gbest_position(i).cloned())
            .collect::<Result<_, _>>()?;

        for (particle, gbest) in swarm.particles_mut().iter_mut().zip(&social) {
            for d in 0..DIM {
                let r1: f64 = rng.gen();
                let r2: f64 = rng.gen();
                particle.velocity[d] = INERTIA * particle.velocity[d]
                    + COGNITIVE * r1 * (particle.best_position.coords[d] - particle.position.coords[d])
                    + SOCIAL * r2 * (gbest.coords[d] - particle.position.coords[d]);
                particle.position.coords[d] =
                    (particle.position.coords[d] + particle.velocity[d]).clamp(-BOUND, BOUND);
            }
            evaluate(&mut particle.position);
            if particle.position.fitness < particle.best_position.fitness {
                particle.best_position = particle.position.clone();
            }
        }

        swarm.update_neighborhoods();
    }

    Ok(swarm
        .global_best()
        .map(|p| p.fitness())
        .unwrap_or(BEST_FITNESS_SENTINEL))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SwarmPSO Sphere Example");
    println!("=======================");

    let mut rng = StdRng::seed_from_u64(7);
    for topology in [
        Topology::Full,
        Topology::Ring,
        Topology::Star,
        Topology::multi(4),
    ] {
        let best = run(topology, &mut rng)?;
        println!("  {:<6} best fitness: {:.3e}", topology.name(), best);
    }

    Ok(())
}
