use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "c2a - Convert CHARMM bilayer structures (PDB + PSF) into AMOEBA fragment files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Maximum number of structures converted at the same time.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every PDB/PSF pair in a directory into AMOEBA fragment files.
    Batch(BatchArgs),
    /// Convert a single PDB/PSF pair into one AMOEBA fragment file.
    Convert(ConvertArgs),
}

/// Arguments for the `batch` subcommand.
///
/// Paths may come from the command line or from the `[paths]` section of the
/// configuration file; command-line values win.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory holding the `.pdb` and `.psf` files.
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory that receives the `.txyz` files. Created if missing.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Two-column CHARMM to AMOEBA type map.
    #[arg(short = 't', long, value_name = "PATH")]
    pub type_map: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stop at the first structure that fails instead of converting the rest.
    #[arg(long)]
    pub abort_on_error: bool,

    /// Write a CSV report with one row per structure.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S extensions.output=xyz
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// CHARMM coordinate file.
    #[arg(long, required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// CHARMM topology file with the bond list.
    #[arg(long, required = true, value_name = "PATH")]
    pub psf: PathBuf,

    /// Output fragment file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Two-column CHARMM to AMOEBA type map.
    #[arg(short = 't', long, required = true, value_name = "PATH")]
    pub type_map: PathBuf,
}
