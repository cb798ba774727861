//! Rehearse CLI entry point.
//!
//! Binary name: `rehearse`
//!
//! Parses CLI arguments, initializes the data directory and transcript
//! store, then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,rehearse=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init().await?;

    match cli.command {
        Commands::Interview {
            job_title,
            style,
            questions,
            model,
            name,
        } => {
            cli::interview::run(&state, job_title, style, questions, model, name).await?;
        }

        Commands::History => {
            cli::history::list_transcripts(&state, cli.json).await?;
        }

        Commands::Show { id } => {
            cli::history::show_transcript(&state, id, cli.json).await?;
        }
    }

    Ok(())
}
