use crate::core::models::structure::Structure;
use crate::core::models::topology::Bond;
use tracing::{debug, instrument};

const HYDROGEN: &str = "H";

/// Severs every bond between two hydrogen atoms.
///
/// CHARMM water models constrain the H-H distance with an extra bond in the
/// PSF; AMOEBA treats water hydrogens as bonded to oxygen only.
#[instrument(skip_all, name = "bond_correction_task")]
pub fn run(structure: &mut Structure) -> usize {
    let hydrogen_pairs: Vec<Bond> = structure
        .atoms()
        .filter(|atom| atom.element == HYDROGEN)
        .flat_map(|atom| {
            atom.bonded
                .iter()
                .filter(move |&&other| atom.index < other)
                .map(move |&other| Bond::new(atom.index, other))
        })
        .filter(|bond| {
            structure
                .atom(bond.atom2)
                .is_some_and(|other| other.element == HYDROGEN)
        })
        .collect();

    for bond in &hydrogen_pairs {
        structure.disconnect(bond.atom1, bond.atom2);
    }

    debug!(severed = hydrogen_pairs.len(), "Severed hydrogen-hydrogen bonds.");
    hydrogen_pairs.len()
}
