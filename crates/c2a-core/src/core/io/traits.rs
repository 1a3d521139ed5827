use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading one of the whitespace-tokenized CHARMM
/// input formats.
///
/// Implementors handle format-specific line recognition and field extraction;
/// opening the file and buffering are shared.
pub trait StructureReader {
    /// The value produced by a successful parse.
    type Output;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads the format from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Reads the format from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Splits `reader` into lines without requiring UTF-8.
///
/// CHARMM files often carry Latin-1 bytes in titles and remarks; such bytes are
/// replaced with U+FFFD instead of failing the read. A trailing `\r` is dropped.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8(bytes)
                .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn lossy_lines_replaces_invalid_bytes_and_strips_carriage_returns() {
        let content = b"* title \xE9\r\nATOM 1\n\nlast".to_vec();
        let lines: Vec<String> = lossy_lines(Cursor::new(content))
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["* title \u{FFFD}", "ATOM 1", "", "last"]);
    }
}
