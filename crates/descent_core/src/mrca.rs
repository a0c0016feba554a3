//! Most-recent-common-ancestor resolution.
//!
//! Along any chain from a root to a living organism, the share-count first
//! rises (from the root down to the MRCA, where it equals the population
//! size) and then falls toward the leaf. A single walk from any member
//! toward the root therefore finds the MRCA: it is the deepest organism
//! at which the count steps up to its maximum.

use crate::error::{DescentError, Result};
use crate::organism::OrganismRef;
use crate::world::World;

/// The most recent common ancestor of every population member.
///
/// A population of one is its own MRCA. Fails with
/// [`DescentError::InvalidState`] on an empty population, or when the
/// members descend from different founders.
pub fn mrca<R>(world: &World<R>) -> Result<OrganismRef> {
    try_mrca(world)?
        .ok_or_else(|| DescentError::invalid_state("population has no common ancestor"))
}

/// Like [`mrca`], but `Ok(None)` when the members descend from different
/// founders.
pub fn try_mrca<R>(world: &World<R>) -> Result<Option<OrganismRef>> {
    let population = world.population();
    let ancestry = world.ancestry();
    let start = population
        .first()
        .ok_or_else(|| DescentError::invalid_state("MRCA of an empty population"))?;
    let total = population.len();

    let mut offspring = start;
    let mut candidate = start;
    let mut candidate_count = ancestry.share_count(start)?;

    while candidate_count < total {
        let Some(parent) = ancestry.sole_parent(offspring)? else {
            break;
        };
        let parent_count = ancestry.share_count(parent)?;
        let offspring_count = ancestry.share_count(offspring)?;
        if parent_count < offspring_count {
            candidate = offspring;
            candidate_count = offspring_count;
        } else if parent_count > offspring_count {
            candidate = parent;
            candidate_count = parent_count;
        }
        offspring = parent;
    }

    Ok((candidate_count == total).then_some(candidate))
}
