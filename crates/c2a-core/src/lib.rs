//! # charmm2amoeba Core Library
//!
//! Converts CHARMM bilayer structures, given as paired PDB coordinate and PSF
//! topology files, into AMOEBA-style fragment (`.txyz`) files.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Atom`,
//!   `BondGraph`), the CHARMM to AMOEBA type vocabulary, and the PDB/PSF readers
//!   and TXYZ writer.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the error taxonomy, progress
//!   reporting, and the fragment builder that merges bonds, applies the hydrogen
//!   and ion correction rules, and assigns AMOEBA types.
//!
//! - **[`workflows`]: The Public API.** Single-pair conversion and the parallel
//!   batch orchestrator that drives one conversion per structure in a directory.

pub mod core;
pub mod engine;
pub mod workflows;
