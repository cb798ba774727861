//! Interactive interview command.
//!
//! Drives an `InterviewEngine` over the terminal: prints each question,
//! reads the answer, shows per-answer feedback, and finishes with the
//! overall evaluation. On a retriable failure the just-typed answer is
//! pre-filled into the next prompt so resubmission is a single action.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::ExposeSecret;

use rehearse_core::llm::provider::LlmProvider;
use rehearse_core::session::{InterviewEngine, SubmitOutcome};
use rehearse_core::transcript::store::{NullTranscriptStore, TranscriptStore};
use rehearse_infra::config::resolve_api_key;
use rehearse_infra::llm::openai_compat::OpenAiCompatibleProvider;
use rehearse_types::error::SessionError;
use rehearse_types::interview::{InterviewStyle, Phase, SessionConfig, SessionState};

use crate::state::AppState;

/// Run one interactive interview session end to end.
pub async fn run(
    state: &AppState,
    job_title: String,
    style_name: String,
    questions: Option<u8>,
    model: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let style = match style_name.parse::<InterviewStyle>() {
        Ok(style) => style,
        Err(err) => {
            tracing::warn!("{err}, falling back to general");
            InterviewStyle::General
        }
    };

    let config = SessionConfig {
        job_title,
        style,
        question_count: questions.unwrap_or(state.config.default_question_count),
        model: model.unwrap_or_else(|| state.config.default_model.clone()),
        participant: name,
    };

    let api_key = resolve_api_key()
        .context("set REHEARSE_API_KEY or OPENROUTER_API_KEY to your provider API key")?;
    let provider = OpenAiCompatibleProvider::openrouter(api_key.expose_secret(), &config.model)?;

    match &state.store {
        Some(store) => drive(config, provider, store).await,
        None => {
            println!(
                "  {}",
                console::style("Transcript store unavailable; this session will not be saved.")
                    .dim()
            );
            drive(config, provider, NullTranscriptStore).await
        }
    }
}

async fn drive<P: LlmProvider, S: TranscriptStore>(
    config: SessionConfig,
    provider: P,
    store: S,
) -> Result<()> {
    banner(&config);

    let engine = InterviewEngine::new(config, provider, store)?;
    let mut session = SessionState::new();

    let progress = spinner("Generating first question...");
    let started = engine.start(&mut session).await;
    progress.finish_and_clear();
    started?;

    let total = engine.config().question_count;
    // Pre-filled into the next prompt after a retriable failure, so the
    // user resubmits rather than re-types.
    let mut initial = String::new();

    while session.phase == Phase::InProgress {
        let Some(pending) = session.pending_turn() else {
            break;
        };
        let number = session.turns.len();
        let question = pending.question.clone();

        println!();
        println!(
            "  {} {}",
            style(format!("Question {number}/{total}:")).cyan().bold(),
            question
        );
        println!();

        let answer: String = Input::new()
            .with_prompt("Your answer")
            .with_initial_text(initial.clone())
            .interact_text()?;
        initial.clear();

        let progress = spinner("Analyzing your answer...");
        let result = engine.submit_answer(&mut session, &answer).await;
        progress.finish_and_clear();

        match result {
            Ok(outcome) => {
                let answered_index = match outcome {
                    SubmitOutcome::NextQuestion => session.turns.len() - 2,
                    SubmitOutcome::Completed => session.turns.len() - 1,
                };
                if let Some(feedback) = &session.turns[answered_index].feedback {
                    println!();
                    println!("  {}", style("Feedback").yellow().bold());
                    println!("{}", indent(feedback));
                }
            }
            Err(SessionError::EmptyAnswer) => {
                println!("  {} Please provide an answer.", style("!").yellow().bold());
            }
            Err(err) if err.is_retriable() => {
                println!("  {} {err}", style("!").red().bold());
                println!(
                    "  {}",
                    style("Try submitting your answer again.").dim()
                );
                initial = answer;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(evaluation) = &session.evaluation {
        println!();
        println!("  {} Interview completed!", style("*").green().bold());
        println!();
        println!("  {}", style("Your Final Feedback").bold());
        println!("{}", indent(evaluation));
        println!();
    }

    Ok(())
}

fn banner(config: &SessionConfig) {
    println!();
    println!(
        "  {} Mock Interview",
        style(&config.job_title).cyan().bold()
    );
    println!(
        "  {}",
        style(format!(
            "Style: {} | Length: {} questions | Model: {}",
            config.style, config.question_count, config.model
        ))
        .dim()
    );
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
