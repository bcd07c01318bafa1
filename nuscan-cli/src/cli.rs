//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// nuscan -- list the NuGet packages a .NET solution or project depends on.
///
/// Package metadata (name, description, license, project URL) is fetched from
/// the package sources declared in NuGet.config files.
#[derive(Parser, Debug)]
#[command(name = "nuscan", version, about, long_about = None)]
pub struct Cli {
    /// Solution (.sln) or project (.csproj) file to scan.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the scan result as JSON to FILE instead of printing a table.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to a nuscan.toml configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Additional NuGet.config file or directory to search (repeatable).
    #[arg(long = "source", value_name = "PATH")]
    pub sources: Vec<PathBuf>,

    /// Do not search the platform default NuGet.config locations.
    #[arg(long)]
    pub no_default_sources: bool,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Override log format.
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

/// Supported log formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// Machine-readable JSON lines.
    Json,
}

impl LogFormat {
    /// Name used in the `[general]` config section.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}
