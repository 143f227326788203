use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tset_common::GoVersion;

/// CLI arguments for the tset binary.
#[derive(Parser, Debug)]
#[command(
    name = "tset",
    version,
    about = "Resolve the type sets of interface declarations"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a compilation unit and print the type set of every interface.
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the compilation unit (JSON).
    pub unit: PathBuf,

    /// Minimum language version, e.g. `go1.18`. Overrides the unit's own.
    #[arg(long = "go", value_name = "VERSION")]
    pub go_version: Option<GoVersion>,

    /// Package path of the unit. Overrides the unit's own.
    #[arg(short = 'p', long)]
    pub package: Option<String>,

    /// Output format for resolved type sets.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
