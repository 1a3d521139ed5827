use crate::engine::error::ConversionError;
use crate::engine::fragment::FragmentSummary;
use crate::workflows::convert::StructurePair;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// The result of converting one structure in a batch.
#[derive(Debug)]
pub struct PairOutcome {
    pub pair: StructurePair,
    pub result: Result<FragmentSummary, ConversionError>,
}

impl PairOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    structure: &'a str,
    status: &'static str,
    atoms: Option<usize>,
    bonds: Option<usize>,
    severed_bonds: Option<usize>,
    ions: Option<usize>,
    output: String,
    error: Option<String>,
}

impl<'a> From<&'a PairOutcome> for ReportRow<'a> {
    fn from(outcome: &'a PairOutcome) -> Self {
        let summary = outcome.result.as_ref().ok();
        Self {
            structure: &outcome.pair.name,
            status: if outcome.is_success() { "ok" } else { "failed" },
            atoms: summary.map(|s| s.atoms),
            bonds: summary.map(|s| s.bonds),
            severed_bonds: summary.map(|s| s.severed_bonds),
            ions: summary.map(|s| s.ions),
            output: outcome.pair.output_path.display().to_string(),
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Per-structure outcomes of a batch, in discovery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<PairOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<PairOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &PairOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &PairOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(PairOutcome::is_success)
    }

    pub fn total_atoms(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|s| s.atoms)
            .sum()
    }

    /// Writes one CSV row per structure to `writer`.
    pub fn write_csv_to(&self, writer: impl Write) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for outcome in &self.outcomes {
            csv_writer.serialize(ReportRow::from(outcome))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        let file = std::fs::File::create(path)?;
        self.write_csv_to(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::FragmentError;
    use std::path::PathBuf;

    fn pair(name: &str) -> StructurePair {
        StructurePair {
            name: name.into(),
            coordinate_path: PathBuf::from(format!("in/{name}.pdb")),
            topology_path: PathBuf::from(format!("in/{name}.psf")),
            output_path: PathBuf::from(format!("out/{name}.txyz")),
        }
    }

    fn mixed_report() -> BatchReport {
        BatchReport::new(vec![
            PairOutcome {
                pair: pair("bilayer1"),
                result: Ok(FragmentSummary {
                    atoms: 10,
                    bonds: 8,
                    severed_bonds: 2,
                    ions: 1,
                }),
            },
            PairOutcome {
                pair: pair("bilayer2"),
                result: Err(ConversionError::Fragment {
                    path: PathBuf::from("in/bilayer2.pdb"),
                    source: FragmentError::UnknownBondedAtom { index: 12 },
                }),
            },
        ])
    }

    #[test]
    fn report_partitions_outcomes() {
        let report = mixed_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report.succeeded().count(), 1);
        assert_eq!(report.failed().count(), 1);
        assert!(!report.is_success());
        assert_eq!(report.total_atoms(), 10);
    }

    #[test]
    fn empty_report_is_successful() {
        let report = BatchReport::default();
        assert!(report.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn write_csv_to_emits_header_and_rows() {
        let mut buffer = Vec::new();
        mixed_report().write_csv_to(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "structure,status,atoms,bonds,severed_bonds,ions,output,error"
        );
        assert_eq!(lines[1], "bilayer1,ok,10,8,2,1,out/bilayer1.txyz,");
        assert!(lines[2].starts_with("bilayer2,failed,,,,,out/bilayer2.txyz,"));
        assert!(lines[2].contains("atom 12"));
    }
}
