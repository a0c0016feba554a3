use crate::organism::OrganismRef;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Index;

/// Ordered, index-addressable set of live organism handles.
///
/// Offspring may be appended while a scheduling pass is running, so callers
/// iterate by position rather than holding an iterator across executions.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<OrganismRef>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<OrganismRef> {
        self.members.get(index).copied()
    }

    pub fn first(&self) -> Option<OrganismRef> {
        self.members.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = OrganismRef> + '_ {
        self.members.iter().copied()
    }

    pub fn as_slice(&self) -> &[OrganismRef] {
        &self.members
    }

    pub fn contains(&self, org: OrganismRef) -> bool {
        self.members.contains(&org)
    }

    /// Uniformly permutes the visitation order.
    pub fn shuffle<G: Rng + ?Sized>(&mut self, rng: &mut G) {
        self.members.shuffle(rng);
    }

    pub(crate) fn push(&mut self, org: OrganismRef) {
        self.members.push(org);
    }

    pub(crate) fn replace(&mut self, members: Vec<OrganismRef>) -> Vec<OrganismRef> {
        std::mem::replace(&mut self.members, members)
    }
}

impl Index<usize> for Population {
    type Output = OrganismRef;

    fn index(&self, index: usize) -> &Self::Output {
        &self.members[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_shuffle_keeps_members() {
        let mut pop = Population::new();
        for i in 0..32 {
            pop.push(OrganismRef::new(i));
        }
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        pop.shuffle(&mut rng);
        let mut idx: Vec<_> = pop.iter().map(OrganismRef::index).collect();
        assert_ne!(idx, (0..32).collect::<Vec<_>>());
        idx.sort_unstable();
        assert_eq!(idx, (0..32).collect::<Vec<_>>());
    }
}
