use crate::core::models::structure::Structure;
use crate::core::models::topology::BondGraph;
use crate::engine::error::FragmentError;
use tracing::{debug, instrument};

/// Copies each atom's bonded set from the topology graph onto the structure.
///
/// Atoms absent from the graph keep an empty bond set.
#[instrument(skip_all, name = "adjacency_merge_task")]
pub fn run(structure: &mut Structure, graph: BondGraph) -> Result<usize, FragmentError> {
    let bond_count = graph.bond_count();

    for (index, neighbors) in graph.into_inner() {
        let atom = structure
            .atom_mut(index)
            .ok_or(FragmentError::UnknownBondedAtom { index })?;
        atom.bonded = neighbors;
    }

    debug!(bonds = bond_count, "Merged topology bonds into structure.");
    Ok(bond_count)
}
