use crate::cli::BatchArgs;
use crate::error::{CliError, Result};
use charmm2amoeba::engine::config::{self as core_config, FailurePolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPathsConfig {
    #[serde(rename = "input-dir")]
    input_dir: Option<PathBuf>,
    #[serde(rename = "output-dir")]
    output_dir: Option<PathBuf>,
    #[serde(rename = "type-map")]
    type_map: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialExtensionsConfig {
    coordinate: Option<String>,
    topology: Option<String>,
    output: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialBatchSection {
    #[serde(rename = "failure-policy")]
    failure_policy: Option<FailurePolicy>,
    report: Option<PathBuf>,
}

/// Batch settings as read from a TOML file; every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialBatchConfig {
    paths: Option<PartialPathsConfig>,
    extensions: Option<PartialExtensionsConfig>,
    batch: Option<PartialBatchSection>,
}

/// Everything the `batch` command needs after merging file and CLI values.
#[derive(Debug)]
pub struct BatchSettings {
    pub conversion: core_config::ConversionConfig,
    pub report_path: Option<PathBuf>,
}

impl PartialBatchConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Applies `-S` overrides and CLI flags on top of the file values.
    ///
    /// Precedence, highest first: explicit CLI flags, `-S` values, the file.
    pub fn merge_with_cli(mut self, args: &BatchArgs) -> Result<BatchSettings> {
        self.apply_set_values(&args.set_values)?;

        let paths = self.paths.take().unwrap_or_default();
        let extensions = self.extensions.take().unwrap_or_default();
        let batch = self.batch.take().unwrap_or_default();

        let required = |cli: Option<&PathBuf>, file: Option<PathBuf>, key: &str| {
            cli.cloned().or(file).ok_or_else(|| {
                CliError::Config(format!(
                    "A value for '{}' is required either in the config file or via CLI argument.",
                    key
                ))
            })
        };

        let mut builder = core_config::ConversionConfigBuilder::new()
            .input_dir(required(
                args.input_dir.as_ref(),
                paths.input_dir,
                "paths.input-dir",
            )?)
            .output_dir(required(
                args.output_dir.as_ref(),
                paths.output_dir,
                "paths.output-dir",
            )?)
            .type_map_path(required(
                args.type_map.as_ref(),
                paths.type_map,
                "paths.type-map",
            )?);

        if let Some(ext) = extensions.coordinate {
            builder = builder.coordinate_extension(ext);
        }
        if let Some(ext) = extensions.topology {
            builder = builder.topology_extension(ext);
        }
        if let Some(ext) = extensions.output {
            builder = builder.output_extension(ext);
        }

        let failure_policy = if args.abort_on_error {
            FailurePolicy::Abort
        } else {
            batch.failure_policy.unwrap_or_default()
        };
        builder = builder.failure_policy(failure_policy);

        let conversion = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(BatchSettings {
            conversion,
            report_path: args.report.clone().or(batch.report),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let value = value.trim();

            match key.trim() {
                "paths.input-dir" => {
                    self.paths.get_or_insert_with(Default::default).input_dir = Some(value.into());
                }
                "paths.output-dir" => {
                    self.paths.get_or_insert_with(Default::default).output_dir =
                        Some(value.into());
                }
                "paths.type-map" => {
                    self.paths.get_or_insert_with(Default::default).type_map = Some(value.into());
                }
                "extensions.coordinate" => {
                    self.extensions
                        .get_or_insert_with(Default::default)
                        .coordinate = Some(value.to_string());
                }
                "extensions.topology" => {
                    self.extensions
                        .get_or_insert_with(Default::default)
                        .topology = Some(value.to_string());
                }
                "extensions.output" => {
                    self.extensions.get_or_insert_with(Default::default).output =
                        Some(value.to_string());
                }
                "batch.failure-policy" => {
                    let policy = value
                        .parse::<FailurePolicy>()
                        .map_err(|e| CliError::Config(e.to_string()))?;
                    self.batch.get_or_insert_with(Default::default).failure_policy = Some(policy);
                }
                "batch.report" => {
                    self.batch.get_or_insert_with(Default::default).report = Some(value.into());
                }
                other => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        other
                    )));
                }
            }
        }
        Ok(())
    }
}
