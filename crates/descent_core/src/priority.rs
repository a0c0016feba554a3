//! Priority accessors: how many cycles an organism is granted per visit.

use crate::organism::Organism;

/// Maps an organism to the cycles it receives on one scheduling visit.
///
/// The value is read fresh on every visit, so priority changes made during
/// a tick take effect at the organism's next visit.
pub trait PriorityAccessor {
    fn priority<R>(&self, organism: &Organism<R>) -> f64;
}

/// One cycle per visit: classic unweighted round robin.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPriority;

impl PriorityAccessor for FixedPriority {
    fn priority<R>(&self, _organism: &Organism<R>) -> f64 {
        1.0
    }
}

/// The organism's stored priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganismPriority;

impl PriorityAccessor for OrganismPriority {
    fn priority<R>(&self, organism: &Organism<R>) -> f64 {
        organism.priority
    }
}

/// Converts a priority into a cycle quantum.
///
/// Fractions are truncated. A live organism always gets at least one cycle so
/// a tick cannot stall, and never more than `remaining`.
/// Infinite priority saturates to the whole remaining budget.
pub fn quantum(priority: f64, remaining: u64) -> u64 {
    let cycles = if priority >= 1.0 {
        if priority >= u64::MAX as f64 {
            u64::MAX
        } else {
            priority as u64
        }
    } else {
        1
    };
    cycles.min(remaining)
}
