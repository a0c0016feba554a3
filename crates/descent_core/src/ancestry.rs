use crate::error::{DescentError, Result};
use crate::organism::{Organism, OrganismRef};
use crate::population::Population;
use descent_data::OrganismSnapshot;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;
use std::collections::HashMap;

/// Every organism ever born that is still reachable from the live
/// population, linked parent -> offspring.
///
/// The arena owns the organisms; the population and any lineage snapshot only
/// hold handles. An organism stays in the arena for as long as one live
/// population member descends from it.
pub struct AncestryGraph<R> {
    graph: StableDiGraph<Organism<R>, ()>,
}

impl<R> Default for AncestryGraph<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> AncestryGraph<R> {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
        }
    }

    /// Number of organisms held by the arena.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of parent -> offspring links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn insert(&mut self, organism: Organism<R>) -> OrganismRef {
        self.graph.add_node(organism).into()
    }

    pub fn contains(&self, org: OrganismRef) -> bool {
        self.graph.contains_node(org.node())
    }

    pub fn get(&self, org: OrganismRef) -> Option<&Organism<R>> {
        self.graph.node_weight(org.node())
    }

    pub fn get_mut(&mut self, org: OrganismRef) -> Option<&mut Organism<R>> {
        self.graph.node_weight_mut(org.node())
    }

    pub fn organism(&self, org: OrganismRef) -> Result<&Organism<R>> {
        self.get(org).ok_or(DescentError::UnknownOrganism(org))
    }

    pub fn organism_mut(&mut self, org: OrganismRef) -> Result<&mut Organism<R>> {
        self.get_mut(org).ok_or(DescentError::UnknownOrganism(org))
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrganismRef, &Organism<R>)> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| (idx.into(), &self.graph[idx]))
    }

    /// The parent set of an organism. Empty for a founding ancestor.
    pub fn parents(&self, org: OrganismRef) -> impl Iterator<Item = OrganismRef> + '_ {
        self.graph
            .neighbors_directed(org.node(), Direction::Incoming)
            .map(OrganismRef::from)
    }

    pub fn has_parents(&self, org: OrganismRef) -> bool {
        self.parents(org).next().is_some()
    }

    /// The single parent of an asexually produced organism.
    pub fn sole_parent(&self, org: OrganismRef) -> Result<Option<OrganismRef>> {
        if !self.contains(org) {
            return Err(DescentError::UnknownOrganism(org));
        }
        let mut parents = self.parents(org);
        let first = parents.next();
        if parents.next().is_some() {
            return Err(DescentError::MultipleParentsUnsupported { organism: org });
        }
        Ok(first)
    }

    /// Inheritance hook: records every parent in the offspring's parent set.
    ///
    /// Must run once per birth, before the offspring joins the population.
    /// Parents are left untouched.
    pub fn notify_birth(&mut self, parents: &[OrganismRef], offspring: OrganismRef) -> Result<()> {
        if !self.contains(offspring) {
            return Err(DescentError::UnknownOrganism(offspring));
        }
        if let Some(&missing) = parents.iter().find(|p| !self.contains(**p)) {
            return Err(DescentError::UnknownOrganism(missing));
        }
        for parent in parents {
            self.graph.update_edge(parent.node(), offspring.node(), ());
        }
        Ok(())
    }

    /// The organism and every organism it descends from.
    pub fn ancestors_inclusive(&self, org: OrganismRef) -> Vec<OrganismRef> {
        if !self.contains(org) {
            return Vec::new();
        }
        let reversed = Reversed(&self.graph);
        let mut dfs = Dfs::new(reversed, org.node());
        let mut out = Vec::new();
        while let Some(idx) = dfs.next(reversed) {
            out.push(idx.into());
        }
        out
    }

    pub(crate) fn enter_population(&mut self, org: OrganismRef) {
        for idx in self.ancestors_inclusive(org) {
            if let Some(node) = self.get_mut(idx) {
                *node.share_count_mut() += 1;
            }
        }
    }

    pub(crate) fn leave_population(&mut self, org: OrganismRef) {
        for idx in self.ancestors_inclusive(org) {
            if let Some(node) = self.get_mut(idx) {
                let count = node.share_count_mut();
                *count = count.saturating_sub(1);
            }
        }
    }

    pub fn share_count(&self, org: OrganismRef) -> Result<usize> {
        Ok(self.organism(org)?.share_count())
    }

    /// Recomputes share-counts from scratch with one pass over the
    /// population. Organisms absent from the map have a count of zero.
    pub fn tally_share_counts(&self, population: &Population) -> HashMap<OrganismRef, usize> {
        let mut tally = HashMap::new();
        for member in population.iter() {
            for idx in self.ancestors_inclusive(member) {
                *tally.entry(idx).or_insert(0) += 1;
            }
        }
        tally
    }

    /// True when the incrementally maintained counters agree with a fresh
    /// tally over `population`.
    pub fn verify_share_counts(&self, population: &Population) -> bool {
        let tally = self.tally_share_counts(population);
        self.iter()
            .all(|(idx, org)| org.share_count() == tally.get(&idx).copied().unwrap_or(0))
    }

    /// Drops every organism no population member descends from.
    ///
    /// Returns the number of organisms released. Handles to released
    /// organisms become stale.
    pub fn release_extinct(&mut self) -> usize {
        let extinct: Vec<_> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph[idx].share_count() == 0)
            .collect();
        for idx in &extinct {
            self.graph.remove_node(*idx);
        }
        extinct.len()
    }

    /// Detached copy of an organism for persistence.
    pub fn snapshot(&self, org: OrganismRef) -> Result<OrganismSnapshot<R>>
    where
        R: Clone,
    {
        let organism = self.organism(org)?;
        let parent_id = self
            .parents(org)
            .next()
            .and_then(|p| self.get(p))
            .map(|p| p.id);
        Ok(OrganismSnapshot {
            id: organism.id,
            parent_id,
            generation: organism.generation,
            fixation_time: organism.fixation_time(),
            representation: organism.representation.clone(),
        })
    }

    /// Export the ancestry to Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph Ancestry {\n");
        dot.push_str("  node [shape=box, style=filled, fontname=\"Arial\"];\n");

        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            let color = if node.alive() {
                "#e1f5fe" // Light blue
            } else {
                "#eeeeee" // Gray
            };
            let fixed = node
                .fixation_time()
                .map_or_else(|| "-".to_string(), |t| t.to_string());

            dot.push_str(&format!(
                "  \"{}\" [label=\"{} (Gen {})\\nShare: {} Fixed: {}\", fillcolor=\"{}\"];\n",
                node.id,
                &node.id.to_string()[..8],
                node.generation,
                node.share_count(),
                fixed,
                color
            ));
        }

        for edge in self.graph.edge_indices() {
            if let Some((from, to)) = self.graph.edge_endpoints(edge) {
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\";\n",
                    self.graph[from].id, self.graph[to].id
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn org(tag: u8) -> Organism<u8> {
        Organism::new(Uuid::from_u128(tag as u128 + 1), tag, 1.0, 0.0)
    }

    #[test]
    fn test_notify_birth_links_parents() {
        let mut graph = AncestryGraph::new();
        let p = graph.insert(org(0));
        let c = graph.insert(org(1));
        graph.notify_birth(&[p], c).unwrap();

        assert_eq!(graph.parents(c).collect::<Vec<_>>(), vec![p]);
        assert!(!graph.has_parents(p));
        assert_eq!(graph.sole_parent(c).unwrap(), Some(p));
    }

    #[test]
    fn test_sole_parent_rejects_two_parents() {
        let mut graph = AncestryGraph::new();
        let a = graph.insert(org(0));
        let b = graph.insert(org(1));
        let c = graph.insert(org(2));
        graph.notify_birth(&[a, b], c).unwrap();

        assert_eq!(
            graph.sole_parent(c),
            Err(DescentError::MultipleParentsUnsupported { organism: c })
        );
    }

    #[test]
    fn test_notify_birth_unknown_parent() {
        let mut graph = AncestryGraph::new();
        let c = graph.insert(org(0));
        let ghost = OrganismRef::new(99);
        assert_eq!(
            graph.notify_birth(&[ghost], c),
            Err(DescentError::UnknownOrganism(ghost))
        );
    }

    #[test]
    fn test_share_counts_and_release() {
        let mut graph = AncestryGraph::new();
        let root = graph.insert(org(0));
        let a = graph.insert(org(1));
        let b = graph.insert(org(2));
        graph.notify_birth(&[root], a).unwrap();
        graph.notify_birth(&[root], b).unwrap();
        graph.enter_population(a);
        graph.enter_population(b);

        assert_eq!(graph.share_count(root).unwrap(), 2);
        assert_eq!(graph.share_count(a).unwrap(), 1);

        graph.leave_population(b);
        assert_eq!(graph.share_count(root).unwrap(), 1);
        assert_eq!(graph.release_extinct(), 1);
        assert!(!graph.contains(b));
        assert!(graph.contains(root));
    }

    #[test]
    fn test_snapshot_carries_parent_id() {
        let mut graph = AncestryGraph::new();
        let p = graph.insert(org(0));
        let c = graph.insert(org(1));
        graph.notify_birth(&[p], c).unwrap();

        let snap = graph.snapshot(c).unwrap();
        assert_eq!(snap.parent_id, Some(graph.organism(p).unwrap().id));
        assert_eq!(snap.representation, 1);
    }

    #[test]
    fn test_to_dot_lists_edges() {
        let mut graph = AncestryGraph::new();
        let p = graph.insert(org(0));
        let c = graph.insert(org(1));
        graph.notify_birth(&[p], c).unwrap();

        let dot = graph.to_dot();
        let pid = graph.organism(p).unwrap().id.to_string();
        let cid = graph.organism(c).unwrap().id.to_string();
        assert!(dot.contains(&format!("\"{}\" -> \"{}\"", pid, cid)));
    }
}
