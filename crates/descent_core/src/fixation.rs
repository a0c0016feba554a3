//! Fixation tracking.
//!
//! At the end of a tick, every organism on the MRCA lineage that has no
//! fixation time yet is stamped with the current tick. The walk runs from
//! the MRCA toward the root and stops at the first stamped organism: its
//! ancestors were all stamped at the same or an earlier tick.

use crate::error::Result;
use crate::lineage::Lineage;
use crate::mrca::try_mrca;
use crate::world::World;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct FixationTracker {
    stamped: u64,
}

impl FixationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total organisms stamped so far.
    pub fn stamped(&self) -> u64 {
        self.stamped
    }

    /// Stamps newly fixed organisms with the world's current tick.
    ///
    /// Returns how many were stamped. An empty population, or one without a
    /// common ancestor yet, stamps nothing.
    pub fn record<R>(&mut self, world: &mut World<R>) -> Result<usize> {
        if world.population().is_empty() {
            return Ok(0);
        }
        let Some(m) = try_mrca(world)? else {
            return Ok(0);
        };
        let lineage = Lineage::of(world.ancestry(), m)?;
        let tick = world.tick();

        let mut stamped = 0;
        for org in lineage.iter().rev() {
            if !world.ancestry_mut().organism_mut(org)?.stamp_fixation(tick) {
                break;
            }
            stamped += 1;
        }

        if stamped > 0 {
            debug!(tick, stamped, lineage = lineage.len(), "Fixation recorded");
        }
        self.stamped += stamped as u64;
        Ok(stamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organism::OrganismRef;

    fn fixation(world: &World<u8>, org: OrganismRef) -> Option<u64> {
        world.organism(org).unwrap().fixation_time()
    }

    #[test]
    fn test_stamps_whole_lineage_once() {
        let mut world = World::with_seed(0);
        let root = world.found(0u8, 1.0);
        let a = world.give_birth(&[root], 1, 1.0).unwrap();
        world.kill(root).unwrap();
        world.retain_alive();

        let mut tracker = FixationTracker::new();
        assert_eq!(tracker.record(&mut world).unwrap(), 2);
        assert_eq!(fixation(&world, root), Some(0));
        assert_eq!(fixation(&world, a), Some(0));
        assert_eq!(tracker.record(&mut world).unwrap(), 0);
    }

    #[test]
    fn test_later_fixation_stops_at_stamped() {
        let mut world = World::with_seed(0);
        let root = world.found(0u8, 1.0);
        let a = world.give_birth(&[root], 1, 1.0).unwrap();
        let b = world.give_birth(&[a], 2, 1.0).unwrap();
        let c = world.give_birth(&[root], 3, 1.0).unwrap();

        let mut tracker = FixationTracker::new();
        assert_eq!(tracker.record(&mut world).unwrap(), 1);
        assert_eq!(fixation(&world, root), Some(0));

        // The sibling branch dies out; `a` and `b` become fixed later.
        world.kill(c).unwrap();
        world.kill(root).unwrap();
        world.kill(a).unwrap();
        world.retain_alive();
        world.begin_tick();
        world.begin_tick();

        assert_eq!(tracker.record(&mut world).unwrap(), 2);
        assert_eq!(fixation(&world, a), Some(2));
        assert_eq!(fixation(&world, b), Some(2));
        assert_eq!(fixation(&world, root), Some(0));
        assert_eq!(tracker.stamped(), 3);
    }

    #[test]
    fn test_no_common_ancestor_stamps_nothing() {
        let mut world = World::with_seed(0);
        world.found(0u8, 1.0);
        world.found(1u8, 1.0);
        let mut tracker = FixationTracker::new();
        assert_eq!(tracker.record(&mut world).unwrap(), 0);
    }
}
