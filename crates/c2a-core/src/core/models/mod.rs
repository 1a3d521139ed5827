//! Data structures describing one structure during conversion.
//!
//! An [`atom::Atom`] is created by the PDB reader, gains its bonds from a
//! [`topology::BondGraph`] built by the PSF reader, and is owned by a
//! [`structure::Structure`] for the lifetime of a single conversion.

pub mod atom;
pub mod structure;
pub mod topology;
