use petgraph::stable_graph::NodeIndex;
use std::fmt;
use uuid::Uuid;

/// Handle to an organism in the ancestry arena.
///
/// Handles stay valid until the organism is released from the arena; a
/// released slot may later be reused by a newborn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrganismRef(NodeIndex);

impl OrganismRef {
    pub fn new(index: usize) -> Self {
        Self(NodeIndex::new(index))
    }

    pub fn index(self) -> usize {
        self.0.index()
    }

    pub(crate) fn node(self) -> NodeIndex {
        self.0
    }
}

impl From<NodeIndex> for OrganismRef {
    fn from(idx: NodeIndex) -> Self {
        Self(idx)
    }
}

impl fmt::Display for OrganismRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

/// An organism (living or historical) stored in the ancestry arena.
#[derive(Debug, Clone)]
pub struct Organism<R> {
    /// Unique identifier, stable across persistence.
    pub id: Uuid,
    /// Opaque genome.
    pub representation: R,
    /// Fitness-like scheduling weight.
    pub priority: f64,
    /// Generation; negative for a founding ancestor.
    pub generation: f64,
    /// Parent hops to a root.
    pub depth: usize,
    pub birth_tick: u64,
    alive: bool,
    fixation_time: Option<u64>,
    share_count: usize,
}

impl<R> Organism<R> {
    pub fn new(id: Uuid, representation: R, priority: f64, generation: f64) -> Self {
        Self {
            id,
            representation,
            priority,
            generation,
            depth: 0,
            birth_tick: 0,
            alive: true,
            fixation_time: None,
            share_count: 0,
        }
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// True for a founding ancestor.
    pub fn is_ancestor(&self) -> bool {
        self.generation < 0.0
    }

    pub fn fixation_time(&self) -> Option<u64> {
        self.fixation_time
    }

    /// Sets the fixation time unless one is already recorded.
    ///
    /// Returns false when the organism was already stamped.
    pub fn stamp_fixation(&mut self, tick: u64) -> bool {
        if self.fixation_time.is_some() {
            return false;
        }
        self.fixation_time = Some(tick);
        true
    }

    /// Number of current population members whose lineage runs through
    /// this organism, itself included.
    pub fn share_count(&self) -> usize {
        self.share_count
    }

    pub(crate) fn share_count_mut(&mut self) -> &mut usize {
        &mut self.share_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixation_is_set_once() {
        let mut org = Organism::new(Uuid::nil(), 0u8, 1.0, 0.0);
        assert!(org.stamp_fixation(5));
        assert!(!org.stamp_fixation(9));
        assert_eq!(org.fixation_time(), Some(5));
    }

    #[test]
    fn test_ancestor_sentinel() {
        let org = Organism::new(Uuid::nil(), 0u8, 1.0, -1.0);
        assert!(org.is_ancestor());
        assert!(org.alive());
    }
}
