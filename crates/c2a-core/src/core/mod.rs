//! # Core Module
//!
//! Fundamental building blocks of the converter: the per-structure data model,
//! the atom type vocabulary, and the text formats read and written during a
//! conversion.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bond graphs and whole structures
//! - **Type Vocabulary** ([`typemap`]) - CHARMM to AMOEBA atom type mapping
//! - **File I/O** ([`io`]) - CHARMM PDB and PSF readers, AMOEBA TXYZ writer

pub mod io;
pub mod models;
pub mod typemap;
