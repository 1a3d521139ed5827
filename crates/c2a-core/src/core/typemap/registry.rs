use crate::core::io::traits::lossy_lines;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
    registry: HashMap<String, String>,
}

impl TypeMap {
    pub fn load(path: &Path) -> Result<Self, TypeMapLoadError> {
        let io_error = |e: std::io::Error| TypeMapLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        };
        let file = File::open(path).map_err(io_error)?;
        Self::from_reader(BufReader::new(file)).map_err(io_error)
    }

    /// Lines with fewer than two tokens are skipped; later duplicates win.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, std::io::Error> {
        let mut registry = HashMap::new();
        for line in lossy_lines(reader) {
            let line = line?;
            let mut tokens = line.split_whitespace();
            if let (Some(charmm), Some(amoeba)) = (tokens.next(), tokens.next()) {
                registry.insert(charmm.to_string(), amoeba.to_string());
            }
        }
        Ok(Self { registry })
    }

    pub fn get(&self, charmm_type: &str) -> Option<&str> {
        self.registry.get(charmm_type).map(String::as_str)
    }

    /// Looks up `charmm_type` and parses the mapped AMOEBA type as an integer.
    pub fn resolve(&self, charmm_type: &str) -> Result<i32, TypeLookupError> {
        let value = self
            .get(charmm_type)
            .ok_or_else(|| TypeLookupError::Missing(charmm_type.to_string()))?;
        value.parse().map_err(|_| TypeLookupError::NotAnInteger {
            charmm_type: charmm_type.to_string(),
            value: value.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            registry: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TypeMapLoadError {
    #[error("Failed to read CHARMM to AMOEBA type map '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeLookupError {
    #[error("No AMOEBA type mapped for CHARMM type '{0}'")]
    Missing(String),
    #[error("AMOEBA type '{value}' for CHARMM type '{charmm_type}' is not an integer")]
    NotAnInteger { charmm_type: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn from_reader_parses_two_column_lines() {
        let content = "HT 1\nOT\t2\n   CTL2    31   \n";
        let map = TypeMap::from_reader(Cursor::new(content)).unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("HT"), Some("1"));
        assert_eq!(map.get("OT"), Some("2"));
        assert_eq!(map.get("CTL2"), Some("31"));
    }

    #[test]
    fn from_reader_skips_short_and_blank_lines() {
        let content = "\nHEADER\nHT 1\n   \n";
        let map = TypeMap::from_reader(Cursor::new(content)).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("HEADER"), None);
    }

    #[test]
    fn from_reader_ignores_extra_tokens() {
        let map = TypeMap::from_reader(Cursor::new("OT 2 water oxygen\n")).unwrap();
        assert_eq!(map.get("OT"), Some("2"));
    }

    #[test]
    fn non_utf8_line_does_not_fail_the_load() {
        let content = b"# types by J. Pe\xF1a\nHT 1\n".to_vec();
        let map = TypeMap::from_reader(Cursor::new(content)).unwrap();
        assert_eq!(map.get("HT"), Some("1"));
    }

    #[test]
    fn duplicate_keys_keep_last_occurrence() {
        let map = TypeMap::from_reader(Cursor::new("HT 1\nHT 5\n")).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("HT"), Some("5"));
    }

    #[test]
    fn resolve_parses_integer_types() {
        let map: TypeMap = [("HT", "1"), ("OT", "-2")].into_iter().collect();
        assert_eq!(map.resolve("HT"), Ok(1));
        assert_eq!(map.resolve("OT"), Ok(-2));
    }

    #[test]
    fn resolve_fails_for_missing_type() {
        let map: TypeMap = [("HT", "1")].into_iter().collect();
        assert_eq!(
            map.resolve("SOD"),
            Err(TypeLookupError::Missing("SOD".to_string()))
        );
    }

    #[test]
    fn resolve_fails_for_non_integer_value() {
        let map: TypeMap = [("HT", "one")].into_iter().collect();
        assert!(matches!(
            map.resolve("HT"),
            Err(TypeLookupError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.txt");
        fs::write(&path, "HT 1\nOT 2\n").unwrap();

        let map = TypeMap::load(&path).unwrap();
        assert_eq!(map.resolve("OT"), Ok(2));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = TypeMap::load(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(TypeMapLoadError::Io { .. })));
    }
}
