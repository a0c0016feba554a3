//! A minimal self-replicator used to drive the engine.
//!
//! Each organism banks the cycles it is granted. Once the bank covers the
//! replication cost of its genome it produces a point-mutated copy. An
//! organism that has run for longer than its lifespan dies, and a birth
//! that pushes the population past its cap kills a random other member.

use descent_core::{Hardware, OrganismRef, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

pub type Genome = Vec<u8>;

/// Fixed cost of copying one genome site.
const SITE_COST: u64 = 4;

/// Cycles needed to copy `genome`.
///
/// Low-valued sites copy faster, so selection can favour them.
pub fn replication_cost(genome: &[u8]) -> u64 {
    let extra: u64 = genome.iter().map(|&b| u64::from(b % 4)).sum();
    (genome.len() as u64 * SITE_COST + extra).max(1)
}

#[derive(Debug, Clone, Copy, Default)]
struct Cpu {
    banked: u64,
    age: u64,
}

#[derive(Debug, Clone)]
pub struct ReplicatorHardware {
    rng: ChaCha8Rng,
    mutation_rate: f64,
    lifespan: u64,
    max_population_size: usize,
    cpus: HashMap<OrganismRef, Cpu>,
    births: u64,
    culled: u64,
}

impl ReplicatorHardware {
    pub fn new(seed: u64, mutation_rate: f64, lifespan: u64, max_population_size: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            mutation_rate,
            lifespan,
            max_population_size,
            cpus: HashMap::new(),
            births: 0,
            culled: 0,
        }
    }

    /// A random genome of `len` sites.
    pub fn random_genome(&mut self, len: usize) -> Genome {
        (0..len).map(|_| self.rng.gen()).collect()
    }

    pub fn births(&self) -> u64 {
        self.births
    }

    pub fn culled(&self) -> u64 {
        self.culled
    }

    /// Drops per-organism state for everything no longer alive.
    ///
    /// Must run before extinct ancestry is released, since released handles
    /// are reused by later births.
    pub fn forget_dead(&mut self, world: &World<Genome>) {
        self.cpus.retain(|&org, _| world.is_alive(org));
    }

    fn copy_genome(&mut self, genome: &[u8]) -> Genome {
        genome
            .iter()
            .map(|&site| {
                if self.rng.gen_bool(self.mutation_rate) {
                    self.rng.gen()
                } else {
                    site
                }
            })
            .collect()
    }

    fn cull(&mut self, world: &mut World<Genome>, parent: OrganismRef) {
        let members = world.population().len();
        if members <= self.max_population_size {
            return;
        }
        let victim = world.population()[self.rng.gen_range(0..members)];
        if victim != parent && world.is_alive(victim) && world.kill(victim).is_ok() {
            self.culled += 1;
        }
    }
}

impl Hardware<Genome> for ReplicatorHardware {
    fn execute(&mut self, org: OrganismRef, cycles: u64, world: &mut World<Genome>) {
        let (genome, priority) = match world.organism(org) {
            Ok(o) => (o.representation.clone(), o.priority),
            Err(e) => {
                tracing::warn!(%org, error = %e, "Scheduled organism is not in the arena");
                return;
            }
        };

        let cpu = self.cpus.entry(org).or_default();
        cpu.age += cycles;
        if cpu.age > self.lifespan {
            if let Err(e) = world.kill(org) {
                tracing::warn!(%org, error = %e, "Failed to retire organism past its lifespan");
            }
            return;
        }
        cpu.banked += cycles;
        let cost = replication_cost(&genome);
        let copies = cpu.banked / cost;
        cpu.banked %= cost;

        for _ in 0..copies {
            let child = self.copy_genome(&genome);
            match world.give_birth(&[org], child, priority) {
                Ok(_) => self.births += 1,
                Err(e) => {
                    tracing::warn!(%org, error = %e, "Replication failed");
                    return;
                }
            }
            self.cull(world, org);
            if !world.is_alive(org) {
                return;
            }
        }
    }
}
