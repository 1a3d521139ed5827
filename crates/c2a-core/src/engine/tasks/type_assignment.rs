use crate::core::models::structure::Structure;
use crate::core::typemap::registry::TypeMap;
use crate::engine::error::FragmentError;
use tracing::instrument;

/// Resolves every atom's CHARMM type to its AMOEBA type.
///
/// There is no fallback type: the first atom whose CHARMM type is missing from
/// the map, or maps to a non-integer, fails the whole structure.
#[instrument(skip_all, name = "type_assignment_task")]
pub fn run(structure: &mut Structure, type_map: &TypeMap) -> Result<(), FragmentError> {
    for atom in structure.atoms_mut() {
        let atom_type = type_map
            .resolve(&atom.charmm_type)
            .map_err(|source| FragmentError::TypeAssignment {
                index: atom.index,
                source,
            })?;
        atom.atom_type = Some(atom_type);
    }
    Ok(())
}
