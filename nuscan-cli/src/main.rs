use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use nuscan_cli::cli::Cli;
use nuscan_cli::commands::scan;
use nuscan_cli::error::CliError;
use nuscan_cli::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "nuscan failed");
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = scan::load_config(cli).await?;
    logging::init_tracing(&config.general)?;
    nuscan_core::metrics::describe_all();

    tracing::info!(input = %cli.input.display(), "nuscan starting");
    let result = scan::execute(cli, &config).await?;

    if let Some(path) = &cli.output {
        eprintln!(
            "Saved {} packages to {}",
            result.total_packages,
            path.display().to_string().bold()
        );
    }
    eprintln!("{}", "Done.".green().bold());
    Ok(())
}
