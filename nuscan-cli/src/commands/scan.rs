//! `nuscan <INPUT>` command handler

use std::path::PathBuf;

use tracing::info;

use nuscan_core::config::NuscanConfig;
use nuscan_core::types::ScanResult;
use nuscan_registry::{ConfigSourceLocator, RegistryClient, RegistryClientConfig};
use nuscan_scanner::{EntryKind, PackageScannerBuilder, ScannerConfig, ScannerError};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::{OutputTarget, OutputWriter};

/// Build the effective configuration.
///
/// Order: config file (or defaults) -> `NUSCAN_*` env overrides -> CLI flags -> validate.
pub async fn load_config(cli: &Cli) -> Result<NuscanConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => NuscanConfig::load(path).await?,
        None => NuscanConfig::from_env()?,
    };

    if let Some(level) = &cli.log_level {
        config.general.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.general.log_format = format.as_str().to_owned();
    }
    if cli.no_default_sources {
        config.registry.search_default_locations = false;
    }

    config.validate()?;
    Ok(config)
}

/// Execute the scan command.
///
/// The input extension and the input file's existence are checked before any
/// NuGet.config search or network access.
/// The input file itself is added to the locator's extra paths so a NuGet.config
/// next to the solution is discovered.
pub async fn execute(cli: &Cli, config: &NuscanConfig) -> Result<ScanResult, CliError> {
    let scanner_config = ScannerConfig::from_core(&config.scan);
    if EntryKind::detect(&cli.input, &scanner_config).is_none() {
        return Err(CliError::InvalidInput(cli.input.display().to_string()));
    }
    if let Err(source) = tokio::fs::metadata(&cli.input).await {
        return Err(ScannerError::EntryFileUnreadable {
            path: cli.input.display().to_string(),
            source,
        }
        .into());
    }

    let registry_config = RegistryClientConfig::from_core(&config.registry);
    let extra_paths = locator_paths(cli, &registry_config);
    let locator = ConfigSourceLocator::from_config(&registry_config);

    let sources = tokio::task::spawn_blocking(move || locator.search(&extra_paths))
        .await
        .map_err(|e| CliError::Command(format!("spawn_blocking failed: {e}")))??;

    let scanner = PackageScannerBuilder::new()
        .config(scanner_config)
        .sources(sources)
        .registry(RegistryClient::new(&registry_config)?)
        .build()?;

    let result = scanner.scan(&cli.input).await?;

    let writer = OutputWriter::from_output_path(cli.output.as_deref());
    writer.render(&result)?;
    if let OutputTarget::File(path) = writer.target() {
        info!(path = %path.display(), packages = result.total_packages, "scan result saved");
    }

    Ok(result)
}

/// Configured extra paths, then `--source` paths, then the input file.
fn locator_paths(cli: &Cli, registry_config: &RegistryClientConfig) -> Vec<PathBuf> {
    registry_config
        .extra_config_paths
        .iter()
        .chain(cli.sources.iter())
        .cloned()
        .chain(std::iter::once(cli.input.clone()))
        .collect()
}
