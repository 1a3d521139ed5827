use super::atom::Atom;
use std::collections::BTreeMap;

/// The complete atom collection of one structure being converted.
///
/// Atoms are keyed by their 1-based index. A `Structure` is owned exclusively by
/// a single conversion and is never shared between structures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    /// Atoms keyed by their 1-based index.
    atoms: BTreeMap<usize, Atom>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an atom, keyed by its index.
    ///
    /// # Return
    ///
    /// Returns the previously stored atom if the index was already occupied.
    pub fn insert_atom(&mut self, atom: Atom) -> Option<Atom> {
        self.atoms.insert(atom.index, atom)
    }

    /// Retrieves an immutable reference to an atom by its index.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(&index)
    }

    /// Retrieves a mutable reference to an atom by its index.
    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.atoms.contains_key(&index)
    }

    /// Returns an iterator over all atoms in ascending index order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }

    /// Returns a mutable iterator over all atoms in ascending index order.
    pub fn atoms_mut(&mut self) -> impl Iterator<Item = &mut Atom> {
        self.atoms.values_mut()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Counts each bond once.
    pub fn bond_count(&self) -> usize {
        self.atoms
            .values()
            .map(|atom| atom.bonded.iter().filter(|&&b| b > atom.index).count())
            .sum()
    }

    /// Removes the bond between `a` and `b` from both atoms.
    ///
    /// # Return
    ///
    /// Returns `true` if either side of the bond was present.
    pub fn disconnect(&mut self, a: usize, b: usize) -> bool {
        let removed_a = self
            .atoms
            .get_mut(&a)
            .is_some_and(|atom| atom.bonded.remove(&b));
        let removed_b = self
            .atoms
            .get_mut(&b)
            .is_some_and(|atom| atom.bonded.remove(&a));
        removed_a || removed_b
    }

    /// Checks that atom indices are exactly `1..=len`.
    pub fn is_contiguous(&self) -> bool {
        self.atoms.keys().copied().eq(1..=self.atoms.len())
    }

    /// Returns the first index in `1..=len` with no atom, if any.
    pub fn first_missing_index(&self) -> Option<usize> {
        (1..=self.atoms.len()).find(|i| !self.atoms.contains_key(i))
    }

    /// Checks that `j` is bonded to `i` whenever `i` is bonded to `j`.
    pub fn is_bond_symmetric(&self) -> bool {
        self.atoms.values().all(|atom| {
            atom.bonded.iter().all(|&other| {
                self.atoms
                    .get(&other)
                    .is_some_and(|o| o.bonded.contains(&atom.index))
            })
        })
    }
}

impl FromIterator<Atom> for Structure {
    fn from_iter<T: IntoIterator<Item = Atom>>(iter: T) -> Self {
        let mut structure = Structure::new();
        for atom in iter {
            structure.insert_atom(atom);
        }
        structure
    }
}
