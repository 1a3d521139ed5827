use crate::core::models::structure::Structure;
use crate::core::models::topology::BondGraph;
use crate::core::typemap::registry::TypeMap;
use crate::engine::error::FragmentError;
use crate::engine::tasks;
use serde::Serialize;
use tracing::{debug, instrument};

/// Counts describing one finished fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FragmentSummary {
    /// Number of atoms written.
    pub atoms: usize,
    /// Number of bonds remaining after correction.
    pub bonds: usize,
    /// Number of hydrogen-hydrogen bonds severed.
    pub severed_bonds: usize,
    /// Number of unbonded atoms given an ion charge.
    pub ions: usize,
}

/// Turns a parsed structure and its topology into a finished AMOEBA fragment.
///
/// The structure is transformed in place, in a fixed order:
///
/// 1. Bonds from `bonds` are merged onto the atoms.
/// 2. Hydrogen-hydrogen bonds are severed.
/// 3. Leftover `POT` element symbols become `K`.
/// 4. Unbonded K, Na, Li and H atoms gain `+`; unbonded Cl, F, Br and I gain `-`.
/// 5. Every atom's AMOEBA type is resolved from its CHARMM type.
///
/// # Errors
///
/// Fails if atom indices are not exactly `1..=n`, if a bond references an atom
/// missing from the structure, or if any CHARMM type cannot be resolved.
#[instrument(skip_all, name = "fragment_builder")]
pub fn build(
    structure: &mut Structure,
    bonds: BondGraph,
    type_map: &TypeMap,
) -> Result<FragmentSummary, FragmentError> {
    if let Some(missing) = structure.first_missing_index() {
        return Err(FragmentError::NonContiguousAtoms {
            missing,
            count: structure.len(),
        });
    }

    tasks::merge::run(structure, bonds)?;
    let severed_bonds = tasks::bond_correction::run(structure);
    tasks::ion_charges::normalize_potassium(structure);
    let ions = tasks::ion_charges::assign_ion_charges(structure);
    tasks::type_assignment::run(structure, type_map)?;

    let summary = FragmentSummary {
        atoms: structure.len(),
        bonds: structure.bond_count(),
        severed_bonds,
        ions,
    };
    debug!(?summary, "Fragment built.");
    Ok(summary)
}
