//! Command-line argument definitions for the argmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the output format and logging verbosity.

use clap::{Parser, ValueEnum};

/// What the CLI writes once the map is processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The map written back as a script, with positions
    #[default]
    Dsl,
    /// The laid out box tree, one box per line
    Outline,
}

/// Command-line arguments for the argmap tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input script
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Dsl)]
    pub format: OutputFormat,

    /// Keep the positions from the script instead of laying the map out
    #[arg(long)]
    pub keep_positions: bool,
}
