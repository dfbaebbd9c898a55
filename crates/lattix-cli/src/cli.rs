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
    author = "Lattix Developers",
    version,
    about = "lattix - grow surface-limited aggregates on periodic Bravais lattices and export their sites.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grow an aggregate from the origin and write its occupied sites.
    Grow(GrowArgs),
    /// Write every site of the primary periodic box of a lattice.
    Sites(SitesArgs),
}

/// Lattice geometry overrides shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct LatticeArgs {
    /// Unit cell family: linear, square, sc, bcc or fcc.
    #[arg(long = "cell", value_name = "FAMILY")]
    pub cell: Option<String>,

    /// Side length of the conventional unit cell.
    #[arg(long, value_name = "FLOAT")]
    pub side: Option<f64>,

    /// Periodic box size in unit cells per axis (e.g. '20x20x20').
    #[arg(short, long, value_name = "DIMS")]
    pub period: Option<String>,
}

/// Arguments for the `grow` subcommand.
#[derive(Args, Debug)]
pub struct GrowArgs {
    /// Path for the delimited output file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub lattice: LatticeArgs,

    /// Number of cells in the grown aggregate.
    #[arg(short = 'n', long, value_name = "INT")]
    pub size: Option<usize>,

    /// Seed for the random number generator. Drawn from system entropy when absent.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S growth.target-size=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `sites` subcommand.
#[derive(Args, Debug)]
pub struct SitesArgs {
    /// Path for the delimited output file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub lattice: LatticeArgs,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S lattice.side=2.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
