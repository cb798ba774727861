//! Interview session types for Rehearse.
//!
//! These types model a single mock-interview session: its immutable
//! configuration, the ordered question/answer/feedback turns, and the
//! mutable session state that the engine advances.
//!
//! `SessionState` is a plain serializable value object owned by the caller;
//! every engine operation takes it by mutable reference. There is no hidden
//! global session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

/// Upper bound on the number of questions in one session.
pub const MAX_QUESTION_COUNT: u8 = 10;

/// Style of interview being conducted.
///
/// `Behavioral` interviews require STAR-format question phrasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStyle {
    #[default]
    General,
    Technical,
    Behavioral,
}

impl fmt::Display for InterviewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewStyle::General => write!(f, "general"),
            InterviewStyle::Technical => write!(f, "technical"),
            InterviewStyle::Behavioral => write!(f, "behavioral"),
        }
    }
}

impl FromStr for InterviewStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(InterviewStyle::General),
            "technical" => Ok(InterviewStyle::Technical),
            "behavioral" => Ok(InterviewStyle::Behavioral),
            other => Err(format!("invalid interview style: '{other}'")),
        }
    }
}

/// Immutable configuration for one interview session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Position being interviewed for. Must be non-empty after trimming.
    pub job_title: String,
    pub style: InterviewStyle,
    /// Total number of questions to ask (1..=10).
    pub question_count: u8,
    /// Opaque model identifier passed through to the provider.
    pub model: String,
    /// Display name recorded on the transcript; absent means "Anonymous".
    pub participant: Option<String>,
}

impl SessionConfig {
    /// Validate the configuration before any prompt is built.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.job_title.trim().is_empty() {
            return Err(SessionError::EmptyJobTitle);
        }
        if self.question_count == 0 || self.question_count > MAX_QUESTION_COUNT {
            return Err(SessionError::QuestionCountOutOfRange {
                requested: self.question_count,
                max: MAX_QUESTION_COUNT,
            });
        }
        Ok(())
    }
}

/// Coarse status of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::NotStarted => write!(f, "not_started"),
            Phase::InProgress => write!(f, "in_progress"),
            Phase::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" => Ok(Phase::NotStarted),
            "in_progress" => Ok(Phase::InProgress),
            "completed" => Ok(Phase::Completed),
            other => Err(format!("invalid phase: '{other}'")),
        }
    }
}

/// One question/answer/feedback unit within a session.
///
/// A turn with a question but no answer yet is the pending turn; at most
/// one pending turn exists at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: Option<String>,
    /// May stay absent when feedback generation failed for this turn.
    pub feedback: Option<String>,
}

impl Turn {
    /// A freshly asked question awaiting its answer.
    pub fn pending(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: None,
            feedback: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}

/// Mutable state of one interview session.
///
/// Invariants upheld by every engine operation:
/// - `answered_count() <= turns.len() <= answered_count() + 1`
/// - `feedback_count() <= answered_count()`
/// - `phase == Completed` iff `evaluation.is_some()`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub turns: Vec<Turn>,
    /// Present only once the session has completed.
    pub evaluation: Option<String>,
}

impl SessionState {
    /// A fresh, not-yet-started session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of turns with a recorded answer.
    pub fn answered_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_answered()).count()
    }

    /// Number of turns with recorded feedback.
    pub fn feedback_count(&self) -> usize {
        self.turns.iter().filter(|t| t.feedback.is_some()).count()
    }

    /// The turn currently awaiting an answer, if any.
    ///
    /// The pending turn is always the last one; earlier turns are answered
    /// before a new question is appended.
    pub fn pending_turn(&self) -> Option<&Turn> {
        self.turns.last().filter(|t| !t.is_answered())
    }

    /// Discard all in-memory state, returning to a fresh `NotStarted`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
