use descent_core::{OrganismRef, World};
use std::collections::HashMap;

/// Builds ancestry trees node by node.
///
/// Node `i` carries representation `i`. Every node is born into the
/// population; nodes marked dead are removed by `build`.
#[allow(dead_code)]
pub struct WorldBuilder {
    seed: u64,
    parents: Vec<Option<usize>>,
    dead: Vec<usize>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            seed: 0,
            parents: Vec::new(),
            dead: Vec::new(),
        }
    }

    /// One node per entry; `None` is a founder, `Some(p)` a child of node `p < i`.
    pub fn from_parents(parents: &[Option<usize>]) -> Self {
        Self {
            parents: parents.to_vec(),
            ..Self::new()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn founder(mut self) -> Self {
        self.parents.push(None);
        self
    }

    pub fn child_of(mut self, parent: usize) -> Self {
        self.parents.push(Some(parent));
        self
    }

    /// Appends `len` nodes, each the child of the one before, starting below `from`.
    pub fn chain(mut self, from: usize, len: usize) -> Self {
        let mut parent = from;
        for _ in 0..len {
            self.parents.push(Some(parent));
            parent = self.parents.len() - 1;
        }
        self
    }

    /// Index the next node will get.
    pub fn next_index(&self) -> usize {
        self.parents.len()
    }

    pub fn kill(mut self, node: usize) -> Self {
        self.dead.push(node);
        self
    }

    /// Keeps only `alive` in the population.
    pub fn alive_only(mut self, alive: &[usize]) -> Self {
        self.dead = (0..self.parents.len()).filter(|i| !alive.contains(i)).collect();
        self
    }

    pub fn build(self) -> (World<u32>, Vec<OrganismRef>) {
        let mut world = World::with_seed(self.seed);
        let mut refs: Vec<OrganismRef> = Vec::with_capacity(self.parents.len());
        for (i, parent) in self.parents.iter().enumerate() {
            let org = match parent {
                None => world.found(i as u32, 1.0),
                Some(p) => world
                    .give_birth(&[refs[*p]], i as u32, 1.0)
                    .expect("parent exists"),
            };
            refs.push(org);
        }
        for &d in &self.dead {
            world.kill(refs[d]).expect("node exists");
        }
        world.retain_alive();
        (world, refs)
    }
}

/// Hardware that records what it ran and follows a fixed script.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct ScriptedHardware {
    /// Every execution, in order.
    pub calls: Vec<(OrganismRef, u64)>,
    /// Total cycles granted per organism.
    pub cycles: HashMap<OrganismRef, u64>,
    /// Give birth each time an organism's total crosses a multiple of this.
    pub reproduce_every: Option<u64>,
    /// Kill an organism once its total reaches this.
    pub kill_after: Option<u64>,
    pub births: Vec<OrganismRef>,
}

#[allow(dead_code)]
impl ScriptedHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reproduce_every(mut self, cycles: u64) -> Self {
        self.reproduce_every = Some(cycles);
        self
    }

    pub fn kill_after(mut self, cycles: u64) -> Self {
        self.kill_after = Some(cycles);
        self
    }

    pub fn total_cycles(&self) -> u64 {
        self.cycles.values().sum()
    }
}

impl<R: Clone> descent_core::Hardware<R> for ScriptedHardware {
    fn execute(&mut self, org: OrganismRef, cycles: u64, world: &mut World<R>) {
        self.calls.push((org, cycles));
        let total = self.cycles.entry(org).or_insert(0);
        let before = *total;
        *total += cycles;
        let after = *total;

        if let Some(every) = self.reproduce_every {
            let copies = after / every - before / every;
            let repr = world.organism(org).expect("scheduled organism exists").representation.clone();
            for _ in 0..copies {
                let child = world.give_birth(&[org], repr.clone(), 1.0).expect("birth");
                self.births.push(child);
            }
        }
        if self.kill_after.is_some_and(|limit| after >= limit) {
            world.kill(org).expect("scheduled organism exists");
        }
    }
}

/// The deepest organism every population member descends from, found by
/// tallying each member's ancestors directly.
#[allow(dead_code)]
pub fn brute_force_mrca<R>(world: &World<R>) -> Option<OrganismRef> {
    let members = world.population().len();
    let mut tally: HashMap<OrganismRef, usize> = HashMap::new();
    for member in world.population().iter() {
        let mut current = Some(member);
        while let Some(org) = current {
            *tally.entry(org).or_insert(0) += 1;
            current = world.ancestry().parents(org).next();
        }
    }
    tally
        .into_iter()
        .filter(|&(_, count)| count == members)
        .max_by_key(|&(org, _)| world.organism(org).expect("tallied organism exists").depth)
        .map(|(org, _)| org)
}
