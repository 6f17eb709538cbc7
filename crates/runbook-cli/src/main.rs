//! runbookgen binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use runbook_cli::cli::{Cli, Commands};
use runbook_cli::commands::{CleanCommand, GenerateCommand, InspectCommand, ValidateCommand};
use runbook_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), runbook_cli::CliError> {
    let format = OutputFormat::new(cli.output);
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Generate(args) => {
            GenerateCommand::new()
                .execute(&mut stdout, &format, args)
                .await?;
        }
        Commands::Validate(args) => {
            ValidateCommand::new()
                .execute(&mut stdout, &format, args)
                .await?;
        }
        Commands::Inspect(args) => {
            InspectCommand::new()
                .execute(&mut stdout, &format, args)
                .await?;
        }
        Commands::Clean(args) => {
            CleanCommand::new()
                .execute(&mut stdout, &format, args)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_validate_missing_file_fails() {
        let cli = Cli::parse_from(["runbookgen", "validate", "/nonexistent/rules.yaml"]);
        let result = run(cli).await;
        assert!(matches!(result, Err(runbook_cli::CliError::Io(_))));
    }

    #[tokio::test]
    async fn run_clean_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["runbookgen", "clean", "--base-name", "rules", "-o", &out_dir]);
        assert!(run(cli).await.is_ok());
    }
}
