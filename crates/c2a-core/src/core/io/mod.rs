//! Provides input/output functionality for the CHARMM and AMOEBA text formats.
//!
//! CHARMM structures arrive as a PDB coordinate file ([`pdb`]) paired with a PSF
//! topology file ([`psf`]); both are read through the [`traits::StructureReader`]
//! interface. Converted structures are written as AMOEBA fragment files
//! ([`txyz`]).

pub mod pdb;
pub mod psf;
pub mod traits;
pub mod txyz;
