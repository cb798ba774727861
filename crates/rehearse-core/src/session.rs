//! Interview session state machine.
//!
//! `InterviewEngine` drives one session from `NotStarted` through a
//! sequence of question/answer/feedback turns to `Completed`. The engine
//! is explicitly constructed with a validated config, a caller-owned
//! provider, and a caller-owned store; every operation takes the
//! caller-owned `SessionState` by mutable reference.
//!
//! Transition rules:
//! - `start` asks the first question; on failure the state is untouched.
//! - `submit_answer` records the answer (tentative), requests feedback
//!   (failure is a soft degrade), then either asks the next question or --
//!   once every question is answered -- requests the final evaluation and
//!   hands the finalized record to the store. A failed question or
//!   evaluation call rolls the tentative answer back exactly, so the
//!   identical answer can be resubmitted.
//! - `reset` unconditionally returns to a fresh `NotStarted`.

use chrono::Utc;
use tracing::{debug, info, warn};

use rehearse_types::error::SessionError;
use rehearse_types::interview::{Phase, SessionConfig, SessionState, Turn};
use rehearse_types::llm::LlmError;
use rehearse_types::transcript::TranscriptRecord;

use crate::llm::provider::LlmProvider;
use crate::prompt;
use crate::transcript::store::TranscriptStore;

/// Result of a `start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The first question was generated and is awaiting its answer.
    Started,
    /// The session was already in progress or completed; nothing was done.
    AlreadyStarted,
}

/// Result of a successful `submit_answer` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The answer was accepted and the next question is pending.
    NextQuestion,
    /// The answer was the last one; the session is now completed.
    Completed,
}

/// Drives a single interview session.
///
/// Generic over the provider and store ports so the engine never depends
/// on the infrastructure layer. One engine instance serves one session
/// configuration; transitions are strictly sequential (one provider call
/// in flight at a time, each depending on the state produced by the
/// previous step).
pub struct InterviewEngine<P: LlmProvider, S: TranscriptStore> {
    config: SessionConfig,
    provider: P,
    store: S,
}

impl<P: LlmProvider, S: TranscriptStore> InterviewEngine<P, S> {
    /// Create an engine for one session, validating the configuration.
    pub fn new(config: SessionConfig, provider: P, store: S) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            store,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start the interview by generating the first question.
    ///
    /// Idempotent guard: a session that is already in progress or
    /// completed returns `AlreadyStarted` without touching the provider.
    /// On provider failure no partial state is created.
    pub async fn start(&self, state: &mut SessionState) -> Result<StartOutcome, SessionError> {
        if state.phase != Phase::NotStarted {
            return Ok(StartOutcome::AlreadyStarted);
        }

        let question = self.next_question(&[]).await?;
        state.turns.push(Turn::pending(question));
        state.phase = Phase::InProgress;
        info!(
            job_title = %self.config.job_title,
            style = %self.config.style,
            questions = self.config.question_count,
            "interview started"
        );
        Ok(StartOutcome::Started)
    }

    /// Submit the answer to the pending question.
    ///
    /// Records the trimmed answer, requests feedback (soft degrade on
    /// failure), then advances: the next question if any remain, else the
    /// final evaluation and transcript persistence. If the advancing call
    /// fails, the answer and its feedback are removed again and the error
    /// is surfaced -- the state is exactly as before this call, so the
    /// same answer can be resubmitted.
    pub async fn submit_answer(
        &self,
        state: &mut SessionState,
        answer: &str,
    ) -> Result<SubmitOutcome, SessionError> {
        match state.phase {
            Phase::NotStarted => return Err(SessionError::NotStarted),
            Phase::Completed => return Err(SessionError::AlreadyCompleted),
            Phase::InProgress => {}
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        if state.pending_turn().is_none() {
            return Err(SessionError::NoPendingQuestion);
        }

        // Tentatively record the answer on the pending turn (always last).
        let pending_index = state.turns.len() - 1;
        state.turns[pending_index].answer = Some(answer.to_string());

        let question = state.turns[pending_index].question.clone();
        state.turns[pending_index].feedback = self.coach(&question, answer).await;

        if state.answered_count() < self.config.question_count as usize {
            match self.next_question(&state.turns).await {
                Ok(next) => {
                    state.turns.push(Turn::pending(next));
                    info!(answered = state.answered_count(), "next question ready");
                    Ok(SubmitOutcome::NextQuestion)
                }
                Err(err) => {
                    rollback_turn(&mut state.turns[pending_index]);
                    warn!(error = %err, "next question failed, answer rolled back");
                    Err(err.into())
                }
            }
        } else {
            match self.evaluate(&state.turns).await {
                Ok(evaluation) => {
                    state.evaluation = Some(evaluation);
                    state.phase = Phase::Completed;
                    info!(turns = state.turns.len(), "interview completed");

                    let record = self.finalize_record(state);
                    match self.store.append(&record).await {
                        Ok(id) => info!(%id, "transcript stored"),
                        // Completion already happened in memory; a failed
                        // write is surfaced as a warning, nothing more.
                        Err(err) => warn!(error = %err, "failed to store transcript"),
                    }
                    Ok(SubmitOutcome::Completed)
                }
                Err(err) => {
                    rollback_turn(&mut state.turns[pending_index]);
                    warn!(error = %err, "evaluation failed, answer rolled back");
                    Err(err.into())
                }
            }
        }
    }

    /// Discard all in-memory session state. Persisted transcripts are
    /// unaffected.
    pub fn reset(&self, state: &mut SessionState) {
        state.reset();
        info!("session reset");
    }

    async fn next_question(&self, turns: &[Turn]) -> Result<String, LlmError> {
        let request = prompt::question_request(&self.config, turns);
        let response = self.provider.complete(&request).await?;
        debug!(
            provider = self.provider.name(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "question completion received"
        );
        require_content(response.content)
    }

    async fn evaluate(&self, turns: &[Turn]) -> Result<String, LlmError> {
        let request = prompt::evaluation_request(&self.config, turns);
        let response = self.provider.complete(&request).await?;
        debug!(
            provider = self.provider.name(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "evaluation completion received"
        );
        require_content(response.content)
    }

    /// Per-answer feedback is best-effort: any failure (or an empty
    /// completion) leaves feedback absent for this turn and the interview
    /// continues.
    async fn coach(&self, question: &str, answer: &str) -> Option<String> {
        let request = prompt::feedback_request(&self.config.model, question, answer);
        match self.provider.complete(&request).await {
            Ok(response) => {
                let feedback = response.content.trim().to_string();
                if feedback.is_empty() {
                    warn!("feedback completion was empty, continuing without it");
                    None
                } else {
                    Some(feedback)
                }
            }
            Err(err) => {
                warn!(error = %err, "feedback generation failed, continuing without it");
                None
            }
        }
    }

    fn finalize_record(&self, state: &SessionState) -> TranscriptRecord {
        TranscriptRecord {
            participant: self
                .config
                .participant
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or("Anonymous")
                .to_string(),
            job_title: self.config.job_title.clone(),
            questions: state.turns.iter().map(|t| t.question.clone()).collect(),
            answers: state
                .turns
                .iter()
                .filter_map(|t| t.answer.clone())
                .collect(),
            feedback: state.turns.iter().map(|t| t.feedback.clone()).collect(),
            evaluation: state.evaluation.clone().unwrap_or_default(),
            model: self.config.model.clone(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

fn rollback_turn(turn: &mut Turn) {
    turn.answer = None;
    turn.feedback = None;
}

/// Successful completions must carry a non-empty string; anything else is
/// a provider failure.
fn require_content(content: String) -> Result<String, LlmError> {
    let content = content.trim().to_string();
    if content.is_empty() {
        Err(LlmError::Provider {
            message: "provider returned an empty completion".to_string(),
        })
    } else {
        Ok(content)
    }
}
