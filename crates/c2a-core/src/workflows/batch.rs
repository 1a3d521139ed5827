use crate::core::typemap::registry::TypeMap;
use crate::engine::config::{ConversionConfig, FailurePolicy};
use crate::engine::error::ConversionError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::workflows::convert::{self, StructurePair};
use crate::workflows::report::{BatchReport, PairOutcome};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Finds every coordinate file in the input directory and derives its pair.
///
/// The base name is the file name up to its first `.`; the topology file is
/// expected next to the coordinate file and the output is placed in the output
/// directory. Pairs are returned sorted by base name.
pub fn discover_pairs(config: &ConversionConfig) -> Result<Vec<StructurePair>, ConversionError> {
    let dir_error = |source| ConversionError::InputDirectory {
        path: config.input_dir.clone(),
        source,
    };
    let extensions = &config.extensions;

    let mut pairs = Vec::new();
    for entry in fs::read_dir(&config.input_dir).map_err(dir_error)? {
        let entry = entry.map_err(dir_error)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches_extension = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy() == extensions.coordinate.as_str());
        if !matches_extension {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let name = file_name.split('.').next().unwrap_or_default().to_string();
        pairs.push(StructurePair {
            topology_path: config
                .input_dir
                .join(format!("{}.{}", name, extensions.topology)),
            output_path: config
                .output_dir
                .join(format!("{}.{}", name, extensions.output)),
            coordinate_path: path,
            name,
        });
    }

    pairs.sort_by(|a, b| {
        (&a.name, &a.coordinate_path).cmp(&(&b.name, &b.coordinate_path))
    });
    Ok(pairs)
}

/// Output paths claimed by more than one pair.
///
/// Coordinate files that differ only after their first `.` (for example
/// `dmpg.frame1.pdb` and `dmpg.frame2.pdb`) resolve to the same output file.
pub fn shared_output_paths(pairs: &[StructurePair]) -> HashSet<PathBuf> {
    let mut claims: HashMap<&PathBuf, usize> = HashMap::new();
    for pair in pairs {
        *claims.entry(&pair.output_path).or_default() += 1;
    }
    claims
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(path, _)| path.clone())
        .collect()
}

/// Converts every structure pair in the configured input directory.
///
/// The type map is loaded once and shared read-only by all conversions. With
/// [`FailurePolicy::Isolate`] each pair's failure is recorded in the returned
/// report; with [`FailurePolicy::Abort`] the first failure is returned instead.
/// Pairs that would write the same output file are never converted; each fails
/// with [`ConversionError::OutputCollision`].
#[instrument(skip_all, name = "batch_workflow")]
pub fn run(
    config: &ConversionConfig,
    reporter: &ProgressReporter,
) -> Result<BatchReport, ConversionError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading type map",
    });
    let loaded = TypeMap::load(&config.type_map_path);
    reporter.report(Progress::PhaseFinish);
    let type_map = loaded?;
    info!(
        entries = type_map.len(),
        "Loaded CHARMM to AMOEBA type map from {:?}.", config.type_map_path
    );

    run_with_type_map(config, &type_map, reporter)
}

/// Same as [`run`], with an already loaded type map.
#[instrument(skip_all, name = "batch_conversion")]
pub fn run_with_type_map(
    config: &ConversionConfig,
    type_map: &TypeMap,
    reporter: &ProgressReporter,
) -> Result<BatchReport, ConversionError> {
    let pairs = discover_pairs(config)?;
    fs::create_dir_all(&config.output_dir).map_err(|source| ConversionError::OutputDirectory {
        path: config.output_dir.clone(),
        source,
    })?;

    info!(
        structures = pairs.len(),
        policy = %config.failure_policy,
        "Converting structures from {:?} into {:?}.",
        config.input_dir,
        config.output_dir
    );
    if pairs.is_empty() {
        warn!(
            "No '.{}' files found in {:?}.",
            config.extensions.coordinate, config.input_dir
        );
        return Ok(BatchReport::default());
    }

    reporter.report(Progress::PhaseStart {
        name: "Converting structures",
    });
    reporter.report(Progress::TaskStart {
        total_steps: pairs.len() as u64,
    });

    let collisions = shared_output_paths(&pairs);
    for path in &collisions {
        warn!("Several coordinate files map to {:?}; none of them will be converted.", path);
    }

    let convert_pair = |pair: &StructurePair| {
        let result = if collisions.contains(&pair.output_path) {
            Err(ConversionError::OutputCollision {
                path: pair.output_path.clone(),
                coordinate: pair.coordinate_path.clone(),
            })
        } else {
            convert::run(pair, type_map)
        };
        if let Err(e) = &result {
            warn!(structure = %pair.name, "Conversion failed: {}", e);
        }
        reporter.structure_finished(&pair.name, &result);
        result
    };

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let outcomes: Result<Vec<PairOutcome>, ConversionError> = match config.failure_policy {
        FailurePolicy::Isolate => Ok(iterator
            .map(|pair| PairOutcome {
                pair: pair.clone(),
                result: convert_pair(pair),
            })
            .collect()),
        FailurePolicy::Abort => iterator
            .map(|pair| {
                convert_pair(pair).map(|summary| PairOutcome {
                    pair: pair.clone(),
                    result: Ok(summary),
                })
            })
            .collect(),
    };

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    let outcomes = outcomes?;

    let report = BatchReport::new(outcomes);
    info!(
        succeeded = report.succeeded().count(),
        failed = report.failed().count(),
        "Batch conversion complete."
    );
    Ok(report)
}
