//! Output rendering for console tables vs JSON files
//!
//! Scan output flows through [`OutputWriter`], which either renders a text table to
//! stdout or saves pretty JSON to a file. This keeps target-specific logic out of
//! the command handler.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;

use nuscan_core::types::ScanResult;

use crate::error::CliError;

/// Where the scan result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Human-readable table on stdout.
    Console,
    /// Pretty-printed JSON written to a file.
    File(PathBuf),
}

/// Abstraction for writing CLI output to different targets.
///
/// Command handlers call `writer.render(&payload)` where `payload`
/// implements both `Serialize` (for the JSON file) and `Render` (for the console).
pub struct OutputWriter {
    target: OutputTarget,
}

impl OutputWriter {
    /// Create a new output writer for the specified target.
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }

    /// Console output unless an output file is given.
    pub fn from_output_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(OutputTarget::File(path.to_path_buf())),
            None => Self::new(OutputTarget::Console),
        }
    }

    /// The configured output target.
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Render a payload to the configured target.
    ///
    /// For `Console`, delegates to `Render::render_text()` on stdout.
    /// For `File`, serialises via `serde_json` and overwrites the file.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        match &self.target {
            OutputTarget::Console => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                payload.render_text(&mut handle)?;
                handle.flush()?;
            }
            OutputTarget::File(path) => {
                let mut file = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(&mut file, payload)?;
                writeln!(file)?;
                file.flush()?;
            }
        }
        Ok(())
    }
}

/// Trait for human-readable text rendering.
///
/// Implemented by every CLI output payload alongside `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

const ID_HEADER: &str = "Id";
const VERSION_HEADER: &str = "Version";
const LICENSE_HEADER: &str = "License";
const PROJECT_HEADER: &str = "Project";
const MISSING: &str = "-";

fn or_missing(value: &str) -> &str {
    if value.is_empty() { MISSING } else { value }
}

impl Render for ScanResult {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let id_width = self
            .packages
            .iter()
            .map(|p| p.id.chars().count())
            .chain([ID_HEADER.len()])
            .max()
            .unwrap_or(ID_HEADER.len());
        let version_width = self
            .packages
            .iter()
            .map(|p| p.version.chars().count())
            .chain([VERSION_HEADER.len()])
            .max()
            .unwrap_or(VERSION_HEADER.len());
        let license_width = self
            .packages
            .iter()
            .map(|p| or_missing(&p.license_url).chars().count())
            .chain([LICENSE_HEADER.len()])
            .max()
            .unwrap_or(LICENSE_HEADER.len());

        if self.packages.is_empty() {
            writeln!(w, "{}", "No package references found.".yellow())?;
        } else {
            writeln!(
                w,
                "{:<id_width$}  {:<version_width$}  {:<license_width$}  {}",
                ID_HEADER.bold(),
                VERSION_HEADER.bold(),
                LICENSE_HEADER.bold(),
                PROJECT_HEADER.bold()
            )?;
            writeln!(
                w,
                "{}",
                "-".repeat(id_width + version_width + license_width + PROJECT_HEADER.len() + 6)
            )?;

            for p in &self.packages {
                let id = if p.resolved {
                    p.id.normal()
                } else {
                    p.id.yellow()
                };
                writeln!(
                    w,
                    "{:<id_width$}  {:<version_width$}  {:<license_width$}  {}",
                    id,
                    p.version,
                    or_missing(&p.license_url),
                    or_missing(&p.project_url)
                )?;
            }
        }

        writeln!(w)?;
        writeln!(w, "Scanned projects: {}", self.scanned_projects)?;
        writeln!(w, "Used packages: {}", self.total_packages)?;

        let unresolved = self.unresolved_count();
        if unresolved > 0 {
            writeln!(
                w,
                "Unresolved: {}",
                unresolved.to_string().yellow().bold()
            )?;
        } else {
            writeln!(w, "Unresolved: {}", "0".green())?;
        }

        Ok(())
    }
}
