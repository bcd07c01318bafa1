#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ScannerError`, `ProjectReadError`)
//! - [`config`]: Scanner configuration (`ScannerConfig`, builder)
//! - [`project`]: MSBuild project readers (`ProjectReader` trait, `MsBuildProjectReader`)
//! - [`scanner`]: Main orchestrator (`PackageScanner`, `PackageScannerBuilder`)
//!
//! # Architecture
//!
//! ```text
//! App.sln --> SolutionParser --> ProjectDescriptor (.csproj only)
//!                                        |
//!                                  ProjectReader
//!                                        |
//!                           Vec<PackageReference> (dedup by id+version)
//!                                        |
//!                     RegistryQuery x sources (first match wins)
//!                                        |
//!                                  ScanResult (sorted)
//! ```

pub mod config;
pub mod error;
pub mod project;
pub mod scanner;

// --- Public API Re-exports ---

// Scanner (main orchestrator)
pub use scanner::{EntryKind, PackageScanner, PackageScannerBuilder};

// Configuration
pub use config::{ScannerConfig, ScannerConfigBuilder};

// Error
pub use error::{ProjectReadError, ScannerError};

// Project readers
pub use project::{MsBuildProjectReader, ProjectReader, parse_project};
