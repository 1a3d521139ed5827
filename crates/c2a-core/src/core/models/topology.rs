use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    pub atom1: usize, // Lower atom index
    pub atom2: usize, // Higher atom index
}

impl Bond {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            atom1: a.min(b),
            atom2: a.max(b),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.atom1 == index || self.atom2 == index
    }
}

/// Symmetric, simple bond graph keyed by 1-based atom index.
///
/// Every bond is stored in both directions and repeated insertions of the same
/// pair are ignored, so the graph never contains multi-edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondGraph {
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
}

impl BondGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bond between `a` and `b`.
    ///
    /// # Return
    ///
    /// Returns `true` if the bond was not already present.
    pub fn add_bond(&mut self, a: usize, b: usize) -> bool {
        let inserted = self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        inserted
    }

    pub fn neighbors(&self, index: usize) -> Option<&BTreeSet<usize>> {
        self.adjacency.get(&index)
    }

    pub fn contains_bond(&self, a: usize, b: usize) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Iterates over `(atom index, bonded indices)` for every atom with at least one bond entry.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> {
        self.adjacency.iter().map(|(&i, n)| (i, n))
    }

    /// Iterates over each bond once, lower index first.
    pub fn bonds(&self) -> impl Iterator<Item = Bond> + '_ {
        self.adjacency.iter().flat_map(|(&a, neighbors)| {
            neighbors
                .iter()
                .filter(move |&&b| a < b)
                .map(move |&b| Bond::new(a, b))
        })
    }

    pub fn atom_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds().count()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn is_symmetric(&self) -> bool {
        self.adjacency
            .iter()
            .all(|(&a, neighbors)| neighbors.iter().all(|&b| self.contains_bond(b, a)))
    }

    pub fn into_inner(self) -> BTreeMap<usize, BTreeSet<usize>> {
        self.adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_new_orders_indices() {
        let bond = Bond::new(9, 3);
        assert_eq!(bond.atom1, 3);
        assert_eq!(bond.atom2, 9);
        assert!(bond.contains(3));
        assert!(bond.contains(9));
        assert!(!bond.contains(4));
    }

    #[test]
    fn add_bond_inserts_both_directions() {
        let mut graph = BondGraph::new();
        assert!(graph.add_bond(1, 2));

        assert!(graph.contains_bond(1, 2));
        assert!(graph.contains_bond(2, 1));
        assert!(graph.is_symmetric());
    }

    #[test]
    fn add_bond_suppresses_duplicates_in_either_order() {
        let mut graph = BondGraph::new();
        graph.add_bond(1, 2);
        assert!(!graph.add_bond(1, 2));
        assert!(!graph.add_bond(2, 1));

        assert_eq!(graph.neighbors(1).unwrap().len(), 1);
        assert_eq!(graph.neighbors(2).unwrap().len(), 1);
        assert_eq!(graph.bond_count(), 1);
    }

    #[test]
    fn bonds_yields_each_bond_once() {
        let mut graph = BondGraph::new();
        graph.add_bond(1, 2);
        graph.add_bond(2, 3);
        graph.add_bond(3, 1);

        let bonds: Vec<Bond> = graph.bonds().collect();
        assert_eq!(
            bonds,
            vec![Bond::new(1, 2), Bond::new(1, 3), Bond::new(2, 3)]
        );
        assert_eq!(graph.atom_count(), 3);
    }

    #[test]
    fn empty_graph_has_no_bonds() {
        let graph = BondGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.bond_count(), 0);
        assert!(graph.neighbors(1).is_none());
        assert!(graph.is_symmetric());
    }
}
