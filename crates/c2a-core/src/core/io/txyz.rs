use crate::core::models::structure::Structure;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

/// Writer for AMOEBA fragment (Tinker XYZ style) files.
///
/// The first line holds the atom count and a title, separated by a tab. Each
/// following line holds one atom: index, element, coordinates to six decimal
/// places, AMOEBA type, then the indices of its bonded atoms in ascending order.
/// All fields are tab-separated.
pub struct TxyzFile;

impl TxyzFile {
    /// Writes `structure` to `writer`, using `title` on the header line.
    ///
    /// # Errors
    ///
    /// Returns [`TxyzError::Inconsistency`] if an index in `1..=len` has no atom
    /// or an atom has no AMOEBA type, and [`TxyzError::Io`] if writing fails.
    pub fn write_to(
        structure: &Structure,
        title: &str,
        writer: &mut impl Write,
    ) -> Result<(), TxyzError> {
        writeln!(writer, "{}\t{}", structure.len(), title)?;

        for index in 1..=structure.len() {
            let atom = structure.atom(index).ok_or_else(|| {
                TxyzError::Inconsistency(format!("Atom index {} is missing", index))
            })?;
            let atom_type = atom.atom_type.ok_or_else(|| {
                TxyzError::Inconsistency(format!(
                    "Atom {} ({}) has no AMOEBA type",
                    index, atom.charmm_type
                ))
            })?;

            write!(
                writer,
                "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{}",
                index,
                atom.element,
                atom.position.x,
                atom.position.y,
                atom.position.z,
                atom_type
            )?;
            for bonded in &atom.bonded {
                write!(writer, "\t{}", bonded)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    /// Writes `structure` to `path`, creating missing parent directories.
    ///
    /// The file name of `path` is used as the header title.
    pub fn write_to_path<P: AsRef<Path>>(structure: &Structure, path: P) -> Result<(), TxyzError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(structure, &title, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn typed_water_pair() -> Structure {
        let mut hydrogen = Atom::new(1, "HT", "H", Point3::new(0.0, 0.0, 0.0));
        hydrogen.atom_type = Some(1);
        hydrogen.bonded.insert(2);
        let mut oxygen = Atom::new(2, "OT", "O", Point3::new(1.0, 0.0, 0.0));
        oxygen.atom_type = Some(2);
        oxygen.bonded.insert(1);
        [hydrogen, oxygen].into_iter().collect()
    }

    fn render(structure: &Structure, title: &str) -> Result<String, TxyzError> {
        let mut buffer = Vec::new();
        TxyzFile::write_to(structure, title, &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn write_to_emits_header_and_atom_lines() {
        let output = render(&typed_water_pair(), "water.txyz").unwrap();
        assert_eq!(
            output,
            "2\twater.txyz\n\
             1\tH\t0.000000\t0.000000\t0.000000\t1\t2\n\
             2\tO\t1.000000\t0.000000\t0.000000\t2\t1\n"
        );
    }

    #[test]
    fn bonded_indices_are_written_in_ascending_order() {
        let mut center = Atom::new(1, "CTL2", "C", Point3::new(-1.5, 2.25, 0.125));
        center.atom_type = Some(31);
        center.bonded.extend([4, 2, 3]);
        let mut structure: Structure = [center].into_iter().collect();
        for i in 2..=4 {
            let mut h = Atom::new(i, "HAL2", "H", Point3::origin());
            h.atom_type = Some(32);
            h.bonded.insert(1);
            structure.insert_atom(h);
        }

        let output = render(&structure, "lipid").unwrap();
        let first_atom = output.lines().nth(1).unwrap();
        assert_eq!(first_atom, "1\tC\t-1.500000\t2.250000\t0.125000\t31\t2\t3\t4");
    }

    #[test]
    fn unbonded_atoms_have_no_trailing_fields() {
        let mut ion = Atom::new(1, "POT", "K+", Point3::new(3.0, 4.0, 5.0));
        ion.atom_type = Some(7);
        let output = render(&[ion].into_iter().collect(), "ion").unwrap();
        assert_eq!(output.lines().nth(1).unwrap(), "1\tK+\t3.000000\t4.000000\t5.000000\t7");
    }

    #[test]
    fn untyped_atom_is_an_inconsistency() {
        let mut structure = typed_water_pair();
        structure.atom_mut(2).unwrap().atom_type = None;
        assert!(matches!(
            render(&structure, "x"),
            Err(TxyzError::Inconsistency(_))
        ));
    }

    #[test]
    fn gap_in_indices_is_an_inconsistency() {
        let mut atom = Atom::new(2, "OT", "O", Point3::origin());
        atom.atom_type = Some(2);
        let structure: Structure = [atom].into_iter().collect();
        assert!(matches!(
            render(&structure, "x"),
            Err(TxyzError::Inconsistency(_))
        ));
    }

    #[test]
    fn write_to_path_creates_parent_directories_and_uses_file_name_as_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("bilayer.txyz");

        TxyzFile::write_to_path(&typed_water_pair(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("2\tbilayer.txyz\n"));
        assert_eq!(content.lines().count(), 3);
    }
}
