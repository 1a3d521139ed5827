use crate::core::io::traits::{StructureReader, lossy_lines};
use crate::core::models::atom::{Atom, Molecule};
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

const ATOM_RECORD: &str = "ATOM";
const MIN_ATOM_TOKENS: usize = 11;
const POTASSIUM_CHARMM_TYPE: &str = "POT";
const POTASSIUM_ELEMENT: &str = "K";

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer in field {field} (value: '{value}')")]
    InvalidInt { field: usize, value: String },
    #[error("Invalid float in field {field} (value: '{value}')")]
    InvalidFloat { field: usize, value: String },
}

/// Reader for CHARMM-generated PDB coordinate files.
///
/// Only `ATOM` records with more than ten whitespace-separated fields are
/// recognized; every other line (headers, `TER`, `END`, short records) is
/// skipped. Fields are taken by position rather than by column.
pub struct PdbFile;

impl PdbFile {
    fn parse_atom(tokens: &[&str], line: usize) -> Result<Atom, PdbError> {
        let index: usize = parse_int(tokens, 1, line)?;
        let charmm_type = tokens[2];
        let element = if charmm_type == POTASSIUM_CHARMM_TYPE {
            POTASSIUM_ELEMENT.to_string()
        } else {
            charmm_type.chars().take(1).collect()
        };
        let molecule = Molecule::new(parse_int(tokens, 4, line)?, tokens[3]);
        let position = Point3::new(
            parse_float(tokens, 5, line)?,
            parse_float(tokens, 6, line)?,
            parse_float(tokens, 7, line)?,
        );

        Ok(Atom::new(index, charmm_type, &element, position).with_molecule(molecule))
    }
}

fn parse_int<T: std::str::FromStr>(
    tokens: &[&str],
    field: usize,
    line: usize,
) -> Result<T, PdbError> {
    tokens[field].parse().map_err(|_| PdbError::Parse {
        line,
        kind: PdbParseErrorKind::InvalidInt {
            field,
            value: tokens[field].into(),
        },
    })
}

fn parse_float(tokens: &[&str], field: usize, line: usize) -> Result<f64, PdbError> {
    tokens[field].parse().map_err(|_| PdbError::Parse {
        line,
        kind: PdbParseErrorKind::InvalidFloat {
            field,
            value: tokens[field].into(),
        },
    })
}

impl StructureReader for PdbFile {
    type Output = Structure;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut structure = Structure::new();

        for (line_num, line_res) in lossy_lines(reader).enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < MIN_ATOM_TOKENS || tokens[0] != ATOM_RECORD {
                continue;
            }

            let atom = Self::parse_atom(&tokens, line_num)?;
            let index = atom.index;
            if structure.insert_atom(atom).is_some() {
                return Err(PdbError::Inconsistency(format!(
                    "Duplicate atom index {} on line {}",
                    index, line_num
                )));
            }
        }

        Ok(structure)
    }
}
