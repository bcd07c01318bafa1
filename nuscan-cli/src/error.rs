//! CLI-specific error types and exit code mapping

use nuscan_core::error::NuscanError;
use nuscan_registry::RegistryError;
use nuscan_scanner::ScannerError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input file is neither a solution nor a project file.
    #[error("unknown input file format: {0} (expected .sln or .csproj)")]
    InvalidInput(String),

    /// No usable package source was found in any NuGet.config.
    #[error("no package sources found: {0}")]
    NoSources(String),

    /// Scanning the input file failed.
    #[error("scan error: {0}")]
    Scan(String),

    /// Logging subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),

    /// A background task failed to complete.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (output file write, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                     |
    /// |------|-----------------------------|
    /// | 0    | Success                     |
    /// | 1    | General / command error     |
    /// | 2    | Configuration error         |
    /// | 3    | Unsupported input file      |
    /// | 4    | No package sources found    |
    /// | 5    | Scan failed                 |
    /// | 10   | IO error                    |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Logging(_) => 2,
            Self::InvalidInput(_) => 3,
            Self::NoSources(_) => 4,
            Self::Scan(_) => 5,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<NuscanError> for CliError {
    fn from(e: NuscanError) -> Self {
        match e {
            NuscanError::Config(_) => Self::Config(e.to_string()),
            NuscanError::Io(io) => Self::Io(io),
            other => Self::Scan(other.to_string()),
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NoSourcesFound => Self::NoSources(
                "add a packageSources entry to a NuGet.config or pass --source".to_owned(),
            ),
            RegistryError::Config { .. } | RegistryError::ClientBuild(_) => {
                Self::Config(e.to_string())
            }
            other => Self::Scan(other.to_string()),
        }
    }
}

impl From<ScannerError> for CliError {
    fn from(e: ScannerError) -> Self {
        match e {
            ScannerError::InvalidInputFormat { path } => Self::InvalidInput(path),
            ScannerError::Config { .. } => Self::Config(e.to_string()),
            other => Self::Scan(other.to_string()),
        }
    }
}
