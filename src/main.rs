mod cli;
mod commands;
mod config;
mod console;
mod credentials;
mod error;
mod models;
mod shutdown;
mod uploader;

use clap::Parser;
use cli::{Cli, Commands};
use error::WizardError;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Info) => commands::info::run(),
        None => run_wizard().await,
    };

    if let Err(e) = result {
        let code = e
            .downcast_ref::<WizardError>()
            .map_or(1, WizardError::exit_code);
        if code == 0 {
            println!("\n{}", shutdown::FAREWELL);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(code);
    }
}

async fn run_wizard() -> anyhow::Result<()> {
    let token = CancellationToken::new();
    if let Err(e) = shutdown::listen(token.clone()) {
        tracing::warn!(error = %e, "unable to install signal handlers");
    }

    tokio::select! {
        result = commands::upload::run(token.clone()) => result,
        // Prompt reads cannot be interrupted, leave right away
        () = token.cancelled() => {
            println!("\n{}", shutdown::FAREWELL);
            std::process::exit(0);
        }
    }
}
