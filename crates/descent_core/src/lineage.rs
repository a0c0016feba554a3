//! Line-of-descent extraction.
//!
//! A [`Lineage`] is a disposable snapshot: an ordered list of handles from a
//! founding ancestor to some organism. Editing it never touches the ancestry
//! graph. Handles may go stale once extinct ancestry is released, so keep
//! [`Lineage::to_record`] output rather than the lineage itself when it must
//! outlive the current tick.
//!
//! Asexual only: a walk that meets an organism with several parents fails
//! with [`crate::DescentError::MultipleParentsUnsupported`].

use crate::ancestry::AncestryGraph;
use crate::error::Result;
use crate::mrca::mrca;
use crate::organism::OrganismRef;
use crate::world::World;
use descent_data::OrganismSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineage {
    entries: Vec<OrganismRef>,
}

impl Lineage {
    /// Walks parent links from `org` back to its root.
    ///
    /// The result is ordered ancestor first and ends with `org`.
    pub fn of<R>(ancestry: &AncestryGraph<R>, org: OrganismRef) -> Result<Self> {
        let mut entries = vec![org];
        let mut current = org;
        while let Some(parent) = ancestry.sole_parent(current)? {
            entries.push(parent);
            current = parent;
        }
        entries.reverse();
        Ok(Self { entries })
    }

    /// Lineage of the population's most recent common ancestor.
    pub fn mrca_lineage<R>(world: &World<R>) -> Result<Self> {
        let m = mrca(world)?;
        Self::of(world.ancestry(), m)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<OrganismRef> {
        self.entries.first().copied()
    }

    pub fn last(&self) -> Option<OrganismRef> {
        self.entries.last().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = OrganismRef> + '_ {
        self.entries.iter().copied()
    }

    pub fn as_slice(&self) -> &[OrganismRef] {
        &self.entries
    }

    /// Drops the root entry.
    pub fn remove_default_ancestor(&mut self) {
        if !self.entries.is_empty() {
            self.entries.remove(0);
        }
    }

    /// Collapses runs of equal genomes, keeping the most recent copy of each.
    ///
    /// The root and the final entry always stay.
    pub fn uniq<R: PartialEq>(&mut self, ancestry: &AncestryGraph<R>) -> Result<()> {
        let reprs = self.representations(ancestry)?;
        let last = self.entries.len().saturating_sub(1);
        let mut k = 0;
        self.entries.retain(|_| {
            let keep = k == 0 || k == last || reprs[k] != reprs[k + 1];
            k += 1;
            keep
        });
        Ok(())
    }

    /// Collapses runs of equal genomes, keeping the oldest copy of each.
    ///
    /// The root is never compared or removed, and the final entry always stays.
    pub fn runiq<R: PartialEq>(&mut self, ancestry: &AncestryGraph<R>) -> Result<()> {
        let reprs = self.representations(ancestry)?;
        let last = self.entries.len().saturating_sub(1);
        let mut k = 0;
        self.entries.retain(|_| {
            let keep = k <= 1 || k == last || reprs[k] != reprs[k - 1];
            k += 1;
            keep
        });
        Ok(())
    }

    fn representations<'a, R>(&self, ancestry: &'a AncestryGraph<R>) -> Result<Vec<&'a R>> {
        self.entries
            .iter()
            .map(|&org| ancestry.organism(org).map(|o| &o.representation))
            .collect()
    }

    /// Detached, persistable copy of every entry, ancestor first.
    pub fn to_record<R: Clone>(&self, ancestry: &AncestryGraph<R>) -> Result<Vec<OrganismSnapshot<R>>> {
        self.entries
            .iter()
            .map(|&org| ancestry.snapshot(org))
            .collect()
    }
}

impl IntoIterator for Lineage {
    type Item = OrganismRef;
    type IntoIter = std::vec::IntoIter<OrganismRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Lineage of a single organism; shorthand for [`Lineage::of`].
pub fn lineage<R>(ancestry: &AncestryGraph<R>, org: OrganismRef) -> Result<Lineage> {
    Lineage::of(ancestry, org)
}

impl From<Lineage> for Vec<OrganismRef> {
    fn from(lineage: Lineage) -> Self {
        lineage.entries
    }
}
