use crate::core::io::traits::{StructureReader, lossy_lines};
use crate::core::models::topology::BondGraph;
use std::io::{self, BufRead};
use thiserror::Error;

const BOND_SECTION_MARKER: &str = "!NBOND:";
const SECTION_HEADER_TOKENS: usize = 3;

#[derive(Debug, Error)]
pub enum PsfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Position of the reader relative to the `!NBOND:` section of a PSF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    #[default]
    OutsideBonds,
    InsideBonds,
}

impl SectionState {
    /// Every three-token line is treated as a section header: the bond header
    /// opens the bond section, any other header closes it.
    pub fn next(self, tokens: &[&str]) -> Self {
        if tokens.len() != SECTION_HEADER_TOKENS {
            return self;
        }
        if tokens[1] == BOND_SECTION_MARKER {
            SectionState::InsideBonds
        } else {
            SectionState::OutsideBonds
        }
    }
}

/// Reader for the bond list of CHARMM PSF topology files.
///
/// Only the `!NBOND:` section is interpreted. Its lines hold atom index pairs;
/// a pair that does not parse as two integers is skipped, which also tolerates
/// an odd trailing token.
pub struct PsfFile;

impl PsfFile {
    fn scan_bond_line(tokens: &[&str], graph: &mut BondGraph) {
        for pair in tokens.chunks_exact(2) {
            if let (Ok(a1), Ok(a2)) = (pair[0].parse::<usize>(), pair[1].parse::<usize>()) {
                graph.add_bond(a1, a2);
            }
        }
    }
}

impl StructureReader for PsfFile {
    type Output = BondGraph;
    type Error = PsfError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut graph = BondGraph::new();
        let mut state = SectionState::default();

        for line_res in lossy_lines(reader) {
            let line = line_res?;
            let tokens: Vec<&str> = line.split_whitespace().collect();

            if state == SectionState::InsideBonds {
                Self::scan_bond_line(&tokens, &mut graph);
            }
            state = state.next(&tokens);
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WATER_PSF: &str = "\
PSF EXT CMAP

         1 !NTITLE
* WATER BOX

         4 !NATOM
         1 TIP3     1        TIP3     OH2      OT      -0.834000       15.9994           0
         2 TIP3     1        TIP3     H1       HT       0.417000        1.0080           0
         3 TIP3     1        TIP3     H2       HT       0.417000        1.0080           0
         4 POT      2        POT      POT      POT      1.000000       39.1020           0

         3 !NBOND: bonds
         1         2         1         3         2         3

         1 !NTHETA: angles
         2         1         3
";

    fn read(content: &str) -> BondGraph {
        PsfFile::read_from(&mut Cursor::new(content)).unwrap()
    }

    #[test]
    fn read_from_collects_bonds_from_bond_section_only() {
        let graph = read(WATER_PSF);

        assert_eq!(graph.bond_count(), 3);
        assert!(graph.contains_bond(1, 2));
        assert!(graph.contains_bond(1, 3));
        assert!(graph.contains_bond(2, 3));
        assert!(graph.neighbors(4).is_none());
        assert!(graph.is_symmetric());
    }

    #[test]
    fn angle_section_does_not_contribute_bonds() {
        let content = "\
         1 !NBOND: bonds
         1         2

         1 !NTHETA: angles
         5         6         7
";
        let graph = read(content);
        assert_eq!(graph.bond_count(), 1);
        assert!(!graph.contains_bond(5, 6));
    }

    #[test]
    fn bond_section_spans_multiple_lines() {
        let content = "\
         5 !NBOND: bonds
         1         2         2         3         3         4         4         5
         5         6
";
        let graph = read(content);
        assert_eq!(graph.bond_count(), 5);
        assert!(graph.contains_bond(5, 6));
    }

    #[test]
    fn duplicate_and_reversed_pairs_are_suppressed() {
        let content = "\
         3 !NBOND: bonds
         1         2         2         1         1         2
";
        let graph = read(content);
        assert_eq!(graph.bond_count(), 1);
        assert_eq!(graph.neighbors(1).unwrap().len(), 1);
    }

    #[test]
    fn odd_trailing_token_and_non_integer_pairs_are_skipped() {
        let content = "\
         2 !NBOND: bonds
         1         2         x         4         7
";
        let graph = read(content);
        assert_eq!(graph.bond_count(), 1);
        assert!(graph.contains_bond(1, 2));
        assert!(graph.neighbors(7).is_none());
    }

    #[test]
    fn any_three_token_line_closes_the_bond_section() {
        let content = "\
         2 !NBOND: bonds
         1         2         3
         4         5
";
        let graph = read(content);
        assert!(graph.contains_bond(1, 2));
        assert!(!graph.contains_bond(4, 5));
    }

    #[test]
    fn file_without_bond_section_yields_empty_graph() {
        let content = "PSF\n\n         1 !NTITLE\n* TITLE\n";
        assert!(read(content).is_empty());
    }

    #[test]
    fn latin1_title_is_tolerated() {
        let mut content = b"PSF\n\n         1 !NTITLE\n* title \xE9\n\n".to_vec();
        content.extend_from_slice(b"         1 !NBOND: bonds\n         1         2\n");

        let graph = PsfFile::read_from(&mut Cursor::new(content)).unwrap();
        assert!(graph.contains_bond(1, 2));
    }

    #[test]
    fn section_state_transitions() {
        let state = SectionState::default();
        assert_eq!(state, SectionState::OutsideBonds);

        let state = state.next(&["10", "!NBOND:", "bonds"]);
        assert_eq!(state, SectionState::InsideBonds);

        let state = state.next(&["1", "2", "3", "4"]);
        assert_eq!(state, SectionState::InsideBonds);

        let state = state.next(&["20", "!NTHETA:", "angles"]);
        assert_eq!(state, SectionState::OutsideBonds);
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PsfFile::read_from_path(dir.path().join("absent.psf"));
        assert!(matches!(result, Err(PsfError::Io(_))));
    }
}
