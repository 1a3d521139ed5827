use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::io::psf::PsfError;
use crate::core::io::txyz::TxyzError;
use crate::core::typemap::registry::{TypeLookupError, TypeMapLoadError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("Bond list references atom {index}, which is absent from the coordinate file")]
    UnknownBondedAtom { index: usize },

    #[error("Atom indices are not contiguous: index {missing} missing from 1..={count}")]
    NonContiguousAtoms { missing: usize, count: usize },

    #[error("Type assignment failed for atom {index}: {source}")]
    TypeAssignment {
        index: usize,
        #[source]
        source: TypeLookupError,
    },
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    TypeMap(#[from] TypeMapLoadError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read input directory '{path}': {source}", path = path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory '{path}': {source}", path = path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Output file '{path}' would be written by more than one structure (including '{coordinate}')",
        path = path.display(),
        coordinate = coordinate.display()
    )]
    OutputCollision { path: PathBuf, coordinate: PathBuf },

    #[error("Failed to read coordinate file '{path}': {source}", path = path.display())]
    CoordinateRead {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to read topology file '{path}': {source}", path = path.display())]
    TopologyRead {
        path: PathBuf,
        #[source]
        source: PsfError,
    },

    #[error("Failed to build fragment for '{path}': {source}", path = path.display())]
    Fragment {
        path: PathBuf,
        #[source]
        source: FragmentError,
    },

    #[error("Failed to write fragment file '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: TxyzError,
    },
}
