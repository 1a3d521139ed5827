use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_COORDINATE_EXTENSION: &str = "pdb";
pub const DEFAULT_TOPOLOGY_EXTENSION: &str = "psf";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "txyz";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {parameter}: {message}")]
    InvalidValue {
        parameter: &'static str,
        message: String,
    },
}

/// How a batch reacts when one structure fails to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Record the failure and keep converting the remaining structures.
    #[default]
    Isolate,
    /// Stop the batch at the first failed structure.
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "isolate" | "keep-going" => Ok(FailurePolicy::Isolate),
            "abort" | "strict" => Ok(FailurePolicy::Abort),
            _ => Err(ConfigError::InvalidValue {
                parameter: "failure_policy",
                message: format!("'{}' (expected 'isolate' or 'abort')", s),
            }),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Isolate => write!(f, "isolate"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// File extensions (without the leading dot) that pair inputs and name outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExtensions {
    pub coordinate: String,
    pub topology: String,
    pub output: String,
}

impl Default for FileExtensions {
    fn default() -> Self {
        Self {
            coordinate: DEFAULT_COORDINATE_EXTENSION.to_string(),
            topology: DEFAULT_TOPOLOGY_EXTENSION.to_string(),
            output: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub type_map_path: PathBuf,
    pub extensions: FileExtensions,
    pub failure_policy: FailurePolicy,
}

#[derive(Default)]
pub struct ConversionConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    type_map_path: Option<PathBuf>,
    coordinate_extension: Option<String>,
    topology_extension: Option<String>,
    output_extension: Option<String>,
    failure_policy: Option<FailurePolicy>,
}

impl ConversionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_dir(mut self, path: PathBuf) -> Self {
        self.input_dir = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn type_map_path(mut self, path: PathBuf) -> Self {
        self.type_map_path = Some(path);
        self
    }
    pub fn coordinate_extension(mut self, ext: impl Into<String>) -> Self {
        self.coordinate_extension = Some(ext.into());
        self
    }
    pub fn topology_extension(mut self, ext: impl Into<String>) -> Self {
        self.topology_extension = Some(ext.into());
        self
    }
    pub fn output_extension(mut self, ext: impl Into<String>) -> Self {
        self.output_extension = Some(ext.into());
        self
    }
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<ConversionConfig, ConfigError> {
        let defaults = FileExtensions::default();
        let extensions = FileExtensions {
            coordinate: normalize_extension(
                "coordinate_extension",
                self.coordinate_extension.unwrap_or(defaults.coordinate),
            )?,
            topology: normalize_extension(
                "topology_extension",
                self.topology_extension.unwrap_or(defaults.topology),
            )?,
            output: normalize_extension(
                "output_extension",
                self.output_extension.unwrap_or(defaults.output),
            )?,
        };

        Ok(ConversionConfig {
            input_dir: self
                .input_dir
                .ok_or(ConfigError::MissingParameter("input_dir"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            type_map_path: self
                .type_map_path
                .ok_or(ConfigError::MissingParameter("type_map_path"))?,
            extensions,
            failure_policy: self.failure_policy.unwrap_or_default(),
        })
    }
}

fn normalize_extension(parameter: &'static str, ext: String) -> Result<String, ConfigError> {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(ConfigError::InvalidValue {
            parameter,
            message: format!("'{}' is not a file extension", ext),
        });
    }
    Ok(trimmed.to_string())
}
