//! # Type Map Module
//!
//! CHARMM to AMOEBA atom type vocabulary.
//!
//! ## Overview
//!
//! The vocabulary is a whitespace-delimited, two-column text resource: the
//! first column is a CHARMM atom type (e.g. `HT`), the second the AMOEBA type
//! number it maps to. It is loaded once per batch and shared read-only by every
//! concurrent conversion.
//!
//! ```ignore
//! use charmm2amoeba::core::typemap::registry::TypeMap;
//!
//! let type_map = TypeMap::load("dmpg_type_conversion.txt".as_ref())?;
//! let amoeba_type = type_map.resolve("OT")?;
//! ```

pub mod registry;
