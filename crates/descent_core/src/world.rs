use crate::ancestry::AncestryGraph;
use crate::error::Result;
use crate::organism::{Organism, OrganismRef};
use crate::population::Population;
use descent_data::ANCESTOR_GENERATION;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Executes organisms on behalf of the scheduler.
///
/// `execute` runs an organism for `cycles` cycles. It may give birth through
/// [`World::give_birth`] and kill through [`World::kill`]; it never sees the
/// resource pool.
pub trait Hardware<R> {
    fn execute(&mut self, org: OrganismRef, cycles: u64, world: &mut World<R>);
}

impl<R, F> Hardware<R> for F
where
    F: FnMut(OrganismRef, u64, &mut World<R>),
{
    fn execute(&mut self, org: OrganismRef, cycles: u64, world: &mut World<R>) {
        self(org, cycles, world)
    }
}

/// The live population together with the ancestry of every member.
pub struct World<R> {
    ancestry: AncestryGraph<R>,
    population: Population,
    tick: u64,
    id_rng: ChaCha8Rng,
}

impl<R> Default for World<R> {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl<R> World<R> {
    /// Creates an empty world whose organism identifiers derive from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            ancestry: AncestryGraph::new(),
            population: Population::new(),
            tick: 0,
            id_rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn ancestry(&self) -> &AncestryGraph<R> {
        &self.ancestry
    }

    pub fn ancestry_mut(&mut self) -> &mut AncestryGraph<R> {
        &mut self.ancestry
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub(crate) fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    /// Index of the current (or last completed) tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub(crate) fn begin_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    pub fn organism(&self, org: OrganismRef) -> Result<&Organism<R>> {
        self.ancestry.organism(org)
    }

    fn next_id(&mut self) -> Uuid {
        Uuid::from_u128(self.id_rng.gen::<u128>())
    }

    /// Adds a founding ancestor (no parents) to the population.
    pub fn found(&mut self, representation: R, priority: f64) -> OrganismRef {
        let id = self.next_id();
        let mut organism = Organism::new(id, representation, priority, ANCESTOR_GENERATION);
        organism.birth_tick = self.tick;
        let org = self.ancestry.insert(organism);
        self.ancestry.enter_population(org);
        self.population.push(org);
        org
    }

    /// Creates an offspring of `parents` and appends it to the population.
    ///
    /// The inheritance hook fires exactly once, before the offspring becomes
    /// a population member. Offspring born mid-tick are not scheduled until
    /// the next tick.
    pub fn give_birth(
        &mut self,
        parents: &[OrganismRef],
        representation: R,
        priority: f64,
    ) -> Result<OrganismRef> {
        let mut generation = ANCESTOR_GENERATION;
        let mut depth = 0;
        for &p in parents {
            let parent = self.ancestry.organism(p)?;
            generation = generation.max(parent.generation);
            depth = depth.max(parent.depth);
        }
        let id = self.next_id();
        let mut organism = Organism::new(id, representation, priority, generation + 1.0);
        if !parents.is_empty() {
            organism.depth = depth + 1;
        }
        organism.birth_tick = self.tick;

        let offspring = self.ancestry.insert(organism);
        self.ancestry.notify_birth(parents, offspring)?;
        self.ancestry.enter_population(offspring);
        self.population.push(offspring);
        Ok(offspring)
    }

    /// Marks an organism dead. It leaves the population at the end of the
    /// current tick.
    pub fn kill(&mut self, org: OrganismRef) -> Result<()> {
        self.ancestry.organism_mut(org)?.kill();
        Ok(())
    }

    pub fn is_alive(&self, org: OrganismRef) -> bool {
        self.ancestry.get(org).is_some_and(Organism::alive)
    }

    /// Rebuilds the population from its living members, keeping their order.
    ///
    /// Returns the number of survivors.
    pub fn retain_alive(&mut self) -> usize {
        let (alive, dead): (Vec<_>, Vec<_>) = self
            .population
            .iter()
            .partition(|&org| self.is_alive(org));
        let survivors = alive.len();
        self.population.replace(alive);
        for org in dead {
            self.ancestry.leave_population(org);
        }
        survivors
    }

    /// Releases organisms no population member descends from.
    pub fn release_extinct(&mut self) -> usize {
        self.ancestry.release_extinct()
    }
}
