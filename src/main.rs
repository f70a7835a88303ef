mod cli;
mod commands;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use convoy::config::{Overrides, Parser as ManifestParser, Stack};
use convoy::output::{CliOutput, UserOutput};
use convoy::{Error as ConvoyError, Orchestrator};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let out = CliOutput;
        if let Some(convoy_error) = e.downcast_ref::<ConvoyError>() {
            out.error(&format!("Error: {}", convoy_error));
            if let Some(suggestion) = convoy_error.suggestion() {
                out.warning(&format!("\nHint: {}", suggestion));
            }
        } else {
            out.error(&format!("Error: {:#}", e));
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    // Completions need no manifest.
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    // ── Load and finalize the model ─────────────────────────────────
    let parser = ManifestParser::new();
    let manifest_path = if let Some(path) = cli.file.clone() {
        path
    } else if let Some(cwd) = &cli.cwd {
        ManifestParser::find_manifest_in_dir(cwd)?
    } else {
        parser.find_manifest_file()?
    };

    let manifest = parser.load_manifest(&manifest_path)?;
    let overrides = Overrides {
        remote: cli.remote.clone(),
        network_type: cli.network_type.clone(),
        network_uplink: cli.network_uplink.clone(),
        project: cli.project.clone(),
    };
    let stack = Stack::from_manifest(manifest, &overrides);

    if let Commands::Validate = &cli.command {
        return Ok(commands::run_validate(&stack, &CliOutput)?);
    }

    // Graph errors surface here, before any remote call is possible.
    stack.validate()?;
    let orchestrator = Orchestrator::from_stack(stack)?;

    // Ctrl-C stops issuing new operations; completed ones stand.
    let cancel = orchestrator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, finishing current operation");
            cancel.cancel();
        }
    });

    match cli.command {
        Commands::Up { dry_run } => {
            commands::run_up(&orchestrator, dry_run, &CliOutput).await?;
        }
        Commands::Down { dry_run } => {
            commands::run_down(&orchestrator, dry_run, &CliOutput).await?;
        }
        Commands::Plan => {
            commands::run_plan(&orchestrator, &CliOutput)?;
        }
        // Handled above
        Commands::Validate | Commands::Completions { .. } => {
            unreachable!("handled before orchestrator construction");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
