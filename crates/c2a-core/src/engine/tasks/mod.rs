pub mod bond_correction;
pub mod ion_charges;
pub mod merge;
pub mod type_assignment;
