//! CLI command definitions and dispatch for the `rehearse` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod history;
pub mod interview;

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Practice job interviews against an AI interviewer.
#[derive(Parser)]
#[command(name = "rehearse", version, about, long_about = None)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an interactive mock interview.
    Interview {
        /// Job title to interview for (e.g., "Backend Engineer").
        #[arg(long)]
        job_title: String,

        /// Interview style: general, technical, or behavioral.
        #[arg(long, default_value = "general")]
        style: String,

        /// Number of questions to ask (1-10). Defaults from config.toml.
        #[arg(long)]
        questions: Option<u8>,

        /// Model identifier passed to the provider. Defaults from config.toml.
        #[arg(long)]
        model: Option<String>,

        /// Your name, recorded on the saved transcript.
        #[arg(long)]
        name: Option<String>,
    },

    /// List past interviews, newest first.
    History,

    /// Show one past interview in full.
    Show {
        /// Transcript id to display.
        id: Uuid,
    },
}
