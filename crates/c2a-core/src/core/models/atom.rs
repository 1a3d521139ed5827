use nalgebra::Point3;
use std::collections::BTreeSet;
use std::fmt;

/// Inferred formal charge of a monatomic species.
///
/// The charge is not stored separately; it is encoded in the element symbol as
/// a trailing `+` or `-` once the ion correction rules have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IonCharge {
    /// No charge suffix on the element symbol.
    #[default]
    Neutral,
    /// Element symbol ends with `+`.
    Cation,
    /// Element symbol ends with `-`.
    Anion,
}

impl IonCharge {
    /// Returns the suffix appended to an element symbol for this charge.
    pub fn suffix(self) -> &'static str {
        match self {
            IonCharge::Neutral => "",
            IonCharge::Cation => "+",
            IonCharge::Anion => "-",
        }
    }
}

/// Residue membership of an atom as read from the CHARMM coordinate file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Molecule {
    /// The molecule (residue) sequence number.
    pub number: isize,
    /// The molecule (residue) type, e.g. "DMPG" or "TIP3".
    pub kind: String,
}

impl Molecule {
    pub fn new(number: isize, kind: &str) -> Self {
        Self {
            number,
            kind: kind.to_string(),
        }
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}

/// Represents one atom of a structure being converted.
///
/// An atom is created by the coordinate reader with an empty bond set and no
/// AMOEBA type. The fragment builder then populates its bonds, may rewrite its
/// element symbol, and finally assigns the AMOEBA type before the atom is
/// serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The 1-based atom index shared by the PDB and PSF files.
    pub index: usize,
    /// The element symbol, optionally suffixed with `+`/`-` for inferred ions.
    pub element: String,
    /// The AMOEBA atom type, `None` until type assignment.
    pub atom_type: Option<i32>,
    /// Indices of bonded atoms, kept sorted for deterministic output.
    pub bonded: BTreeSet<usize>,
    /// The Cartesian coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The CHARMM atom type used to look up the AMOEBA type (e.g. "HT", "OT").
    pub charmm_type: String,
    /// The molecule this atom belongs to.
    pub molecule: Molecule,
}

impl Atom {
    /// Creates an unbonded, untyped atom.
    ///
    /// # Arguments
    ///
    /// * `index` - The 1-based atom index.
    /// * `charmm_type` - The CHARMM atom type identifier.
    /// * `element` - The element symbol.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(index: usize, charmm_type: &str, element: &str, position: Point3<f64>) -> Self {
        Self {
            index,
            element: element.to_string(),
            atom_type: None,
            bonded: BTreeSet::new(),
            position,
            charmm_type: charmm_type.to_string(),
            molecule: Molecule::default(),
        }
    }

    pub fn with_molecule(mut self, molecule: Molecule) -> Self {
        self.molecule = molecule;
        self
    }

    pub fn is_bonded(&self) -> bool {
        !self.bonded.is_empty()
    }

    pub fn is_bonded_to(&self, other: usize) -> bool {
        self.bonded.contains(&other)
    }

    /// Returns the element symbol with any ion charge suffix removed.
    pub fn base_element(&self) -> &str {
        self.element.trim_end_matches(['+', '-'])
    }

    /// Returns the charge encoded in the element symbol.
    pub fn charge_state(&self) -> IonCharge {
        if self.element.ends_with('+') {
            IonCharge::Cation
        } else if self.element.ends_with('-') {
            IonCharge::Anion
        } else {
            IonCharge::Neutral
        }
    }
}
