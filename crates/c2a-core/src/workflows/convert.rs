use crate::core::io::pdb::PdbFile;
use crate::core::io::psf::PsfFile;
use crate::core::io::traits::StructureReader;
use crate::core::io::txyz::TxyzFile;
use crate::core::typemap::registry::TypeMap;
use crate::engine::error::ConversionError;
use crate::engine::fragment::{self, FragmentSummary};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// The input and output files of one structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructurePair {
    /// Base name shared by the three files.
    pub name: String,
    pub coordinate_path: PathBuf,
    pub topology_path: PathBuf,
    pub output_path: PathBuf,
}

/// Converts one CHARMM PDB/PSF pair into an AMOEBA fragment file.
///
/// The conversion runs start to finish on the calling thread. Every error names
/// the file that caused it.
#[instrument(skip_all, name = "convert_workflow", fields(structure = %pair.name))]
pub fn run(pair: &StructurePair, type_map: &TypeMap) -> Result<FragmentSummary, ConversionError> {
    debug!("Reading coordinates from {:?}", pair.coordinate_path);
    let mut structure = PdbFile::read_from_path(&pair.coordinate_path).map_err(|source| {
        ConversionError::CoordinateRead {
            path: pair.coordinate_path.clone(),
            source,
        }
    })?;

    debug!("Reading bonds from {:?}", pair.topology_path);
    let bonds = PsfFile::read_from_path(&pair.topology_path).map_err(|source| {
        ConversionError::TopologyRead {
            path: pair.topology_path.clone(),
            source,
        }
    })?;

    let summary = fragment::build(&mut structure, bonds, type_map).map_err(|source| {
        ConversionError::Fragment {
            path: pair.coordinate_path.clone(),
            source,
        }
    })?;

    debug!("Writing fragment to {:?}", pair.output_path);
    TxyzFile::write_to_path(&structure, &pair.output_path).map_err(|source| {
        ConversionError::Write {
            path: pair.output_path.clone(),
            source,
        }
    })?;

    Ok(summary)
}
