use blob_spammer::cli::Cli;
use blob_spammer::commands;
use blob_spammer::utils::logging::init_logging;
use blob_spammer::utils::signal::wait_for_shutdown;
use clap::Parser as _;
use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    init_logging()?;

    let cli = Cli::parse();
    let command_name = cli.command.name();
    info!(command = command_name, "Starting blob spammer");

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match wait_for_shutdown().await {
            Ok(_) => signal_token.cancel(),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signals"),
        }
    });

    match commands::run(cli.command, shutdown).await {
        Ok(()) => {
            info!(command = command_name, "Done");
            Ok(())
        }
        Err(e) => {
            error!(command = command_name, error = %e, "Command failed");
            std::process::exit(1);
        }
    }
}
