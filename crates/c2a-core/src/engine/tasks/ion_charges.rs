use crate::core::models::atom::IonCharge;
use crate::core::models::structure::Structure;
use phf::phf_set;
use tracing::{debug, instrument};

const POTASSIUM_CHARMM_TYPE: &str = "POT";
const POTASSIUM_ELEMENT: &str = "K";

static CATION_ELEMENTS: phf::Set<&'static str> = phf_set! { "K", "Na", "Li", "H" };
static ANION_ELEMENTS: phf::Set<&'static str> = phf_set! { "Cl", "F", "Br", "I" };

/// Charge assumed for an unbonded atom of the given element.
pub fn ion_charge_for(element: &str) -> IonCharge {
    if CATION_ELEMENTS.contains(element) {
        IonCharge::Cation
    } else if ANION_ELEMENTS.contains(element) {
        IonCharge::Anion
    } else {
        IonCharge::Neutral
    }
}

/// Rewrites any remaining `POT` element symbols to `K`.
#[instrument(skip_all, name = "potassium_normalization_task")]
pub fn normalize_potassium(structure: &mut Structure) -> usize {
    let mut rewritten = 0;
    for atom in structure.atoms_mut() {
        if atom.element == POTASSIUM_CHARMM_TYPE {
            atom.element = POTASSIUM_ELEMENT.to_string();
            rewritten += 1;
        }
    }
    rewritten
}

/// Appends `+` or `-` to the element of every unbonded ion-forming atom.
///
/// An empty bond set is the only signal used; bonded atoms are never charged.
#[instrument(skip_all, name = "ion_charge_task")]
pub fn assign_ion_charges(structure: &mut Structure) -> usize {
    let mut charged = 0;
    for atom in structure.atoms_mut().filter(|atom| !atom.is_bonded()) {
        let charge = ion_charge_for(&atom.element);
        if charge != IonCharge::Neutral {
            atom.element.push_str(charge.suffix());
            charged += 1;
        }
    }
    debug!(ions = charged, "Assigned ion charges to unbonded atoms.");
    charged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn unbonded(index: usize, element: &str) -> Atom {
        Atom::new(index, element, element, Point3::origin())
    }

    #[test]
    fn ion_charge_for_classifies_elements() {
        for cation in ["K", "Na", "Li", "H"] {
            assert_eq!(ion_charge_for(cation), IonCharge::Cation);
        }
        for anion in ["Cl", "F", "Br", "I"] {
            assert_eq!(ion_charge_for(anion), IonCharge::Anion);
        }
        for neutral in ["C", "O", "N", "P", "S", "CL", "K+"] {
            assert_eq!(ion_charge_for(neutral), IonCharge::Neutral);
        }
    }

    #[test]
    fn normalize_potassium_rewrites_sentinel() {
        let mut s: Structure = [unbonded(1, "POT"), unbonded(2, "O")].into_iter().collect();
        assert_eq!(normalize_potassium(&mut s), 1);
        assert_eq!(s.atom(1).unwrap().element, "K");
        assert_eq!(s.atom(2).unwrap().element, "O");
    }

    #[test]
    fn unbonded_ions_receive_suffixes() {
        let mut s: Structure = [
            unbonded(1, "K"),
            unbonded(2, "Na"),
            unbonded(3, "Cl"),
            unbonded(4, "H"),
            unbonded(5, "O"),
        ]
        .into_iter()
        .collect();

        assert_eq!(assign_ion_charges(&mut s), 4);

        let elements: Vec<&str> = s.atoms().map(|a| a.element.as_str()).collect();
        assert_eq!(elements, vec!["K+", "Na+", "Cl-", "H+", "O"]);
    }

    #[test]
    fn bonded_atoms_never_receive_suffixes() {
        let mut s: Structure = [unbonded(1, "H"), unbonded(2, "Cl")].into_iter().collect();
        s.atom_mut(1).unwrap().bonded.insert(2);
        s.atom_mut(2).unwrap().bonded.insert(1);

        assert_eq!(assign_ion_charges(&mut s), 0);
        assert_eq!(s.atom(1).unwrap().element, "H");
        assert_eq!(s.atom(2).unwrap().element, "Cl");
    }

    #[test]
    fn assign_ion_charges_is_idempotent() {
        let mut s: Structure = [unbonded(1, "K")].into_iter().collect();
        assign_ion_charges(&mut s);
        assert_eq!(assign_ion_charges(&mut s), 0);
        assert_eq!(s.atom(1).unwrap().element, "K+");
    }
}
