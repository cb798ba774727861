//! Prompt builder for the three interview request kinds.
//!
//! Pure functions with no retained state: given the session configuration
//! and the transcript so far, each builder renders the exact
//! `CompletionRequest` sent to the provider. Token caps and temperatures
//! are fixed per request kind -- short and varied for question generation,
//! longer and steadier for the final evaluation.

use rehearse_types::interview::{InterviewStyle, SessionConfig, Turn};
use rehearse_types::llm::{CompletionRequest, Message};

/// Response cap for question generation (one concise question).
pub const QUESTION_MAX_TOKENS: u32 = 150;
/// Response cap for per-answer feedback (2-3 bullet points).
pub const FEEDBACK_MAX_TOKENS: u32 = 200;
/// Response cap for the final evaluation.
pub const EVALUATION_MAX_TOKENS: u32 = 500;

/// Higher temperature for question variety.
pub const QUESTION_TEMPERATURE: f64 = 0.7;
pub const FEEDBACK_TEMPERATURE: f64 = 0.4;
/// Lower temperature for a more deterministic evaluation.
pub const EVALUATION_TEMPERATURE: f64 = 0.5;

/// Build the request for the next interview question.
///
/// Answered turns are replayed as alternating assistant (question) / user
/// (answer) messages so the provider can base its next question on the
/// candidate's previous answers. A trailing user directive asks for the
/// first or the next question.
pub fn question_request(config: &SessionConfig, turns: &[Turn]) -> CompletionRequest {
    let mut system = format!(
        "You are an expert interviewer for a {} position. \
         You will conduct a mock interview with a total of {} questions. \
         Ask one concise, relevant interview question at a time. \
         Do not number your questions. \
         Base your next question on the candidate's previous answers.",
        config.job_title.trim(),
        config.question_count,
    );
    system.push_str(style_directive(config.style));

    let mut messages = Vec::new();
    for turn in turns {
        let Some(answer) = &turn.answer else {
            // The pending turn has no answer yet and is not replayed.
            continue;
        };
        messages.push(Message::assistant(turn.question.clone()));
        messages.push(Message::user(answer.clone()));
    }

    let directive = if messages.is_empty() {
        "Please ask me the first question."
    } else {
        "Please ask me the next question."
    };
    messages.push(Message::user(directive));

    CompletionRequest {
        model: config.model.clone(),
        system: Some(system),
        messages,
        max_tokens: QUESTION_MAX_TOKENS,
        temperature: Some(QUESTION_TEMPERATURE),
    }
}

/// Build the request for per-answer coaching feedback on one
/// question/answer pair.
pub fn feedback_request(model: &str, question: &str, answer: &str) -> CompletionRequest {
    let system = "You are an expert interview coach. \
                  Provide 2-3 bullet points of constructive, concise feedback on the user's \
                  answer to the interview question. \
                  Focus on what they did well and how they could improve. \
                  Start with 'Here's some feedback on your answer:'"
        .to_string();

    CompletionRequest {
        model: model.to_string(),
        system: Some(system),
        messages: vec![Message::user(format!(
            "Question: {question}\n\nAnswer: {answer}"
        ))],
        max_tokens: FEEDBACK_MAX_TOKENS,
        temperature: Some(FEEDBACK_TEMPERATURE),
    }
}

/// Build the request for the final overall evaluation.
///
/// The transcript is rendered as numbered question/answer pairs only --
/// per-turn feedback is never fed back into the evaluation.
pub fn evaluation_request(config: &SessionConfig, turns: &[Turn]) -> CompletionRequest {
    let system = format!(
        "You are an expert hiring manager for a {} position. \
         Your task is to provide a final, overall evaluation of the candidate's \
         performance based on the following interview transcript.",
        config.job_title.trim(),
    );

    let mut transcript = String::new();
    for (i, turn) in turns.iter().filter(|t| t.is_answered()).enumerate() {
        let answer = turn.answer.as_deref().unwrap_or_default();
        transcript.push_str(&format!(
            "Question {n}: {q}\nAnswer {n}: {a}\n\n",
            n = i + 1,
            q = turn.question,
            a = answer,
        ));
    }

    let user = format!(
        "Here is the interview transcript:\n\n{transcript}\
         Please provide a concise, overall evaluation of the candidate's performance. \
         Focus on: \n1. Overall Strengths \n2. Key Areas for Improvement. \n\n\
         Provide your final feedback in clear, constructive bullet points."
    );

    CompletionRequest {
        model: config.model.clone(),
        system: Some(system),
        messages: vec![Message::user(user)],
        max_tokens: EVALUATION_MAX_TOKENS,
        temperature: Some(EVALUATION_TEMPERATURE),
    }
}

fn style_directive(style: InterviewStyle) -> &'static str {
    match style {
        InterviewStyle::Technical => {
            " This is a technical interview. \
             Ask a technical question related to the job, testing their \
             knowledge and problem-solving skills."
        }
        InterviewStyle::Behavioral => {
            " This is a behavioral interview. \
             Ask a behavioral question that the user should answer using the STAR method. \
             Start your question with 'Tell me about a time when...' or \
             'Describe a situation where...'"
        }
        InterviewStyle::General => {
            " This is a general interview. Ask a common, non-technical question."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_types::llm::MessageRole;

    fn config(style: InterviewStyle) -> SessionConfig {
        SessionConfig {
            job_title: "Backend Engineer".to_string(),
            style,
            question_count: 3,
            model: "z-ai/glm-4.5-air".to_string(),
            participant: None,
        }
    }

    fn answered(question: &str, answer: &str) -> Turn {
        Turn {
            question: question.to_string(),
            answer: Some(answer.to_string()),
            feedback: Some("well structured".to_string()),
        }
    }

    #[test]
    fn test_first_question_request() {
        let request = question_request(&config(InterviewStyle::General), &[]);

        assert_eq!(request.model, "z-ai/glm-4.5-air");
        assert_eq!(request.max_tokens, QUESTION_MAX_TOKENS);
        assert_eq!(request.temperature, Some(QUESTION_TEMPERATURE));

        let system = request.system.unwrap();
        assert!(system.contains("expert interviewer for a Backend Engineer position"));
        assert!(system.contains("a total of 3 questions"));
        assert!(system.contains("general interview"));

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].content, "Please ask me the first question.");
    }

    #[test]
    fn test_next_question_replays_answered_turns() {
        let turns = vec![
            answered("Q1", "A1"),
            answered("Q2", "A2"),
        ];
        let request = question_request(&config(InterviewStyle::Technical), &turns);

        // assistant Q1, user A1, assistant Q2, user A2, trailing directive
        assert_eq!(request.messages.len(), 5);
        assert_eq!(request.messages[0].role, MessageRole::Assistant);
        assert_eq!(request.messages[0].content, "Q1");
        assert_eq!(request.messages[1].role, MessageRole::User);
        assert_eq!(request.messages[1].content, "A1");
        assert_eq!(request.messages[2].content, "Q2");
        assert_eq!(request.messages[3].content, "A2");
        assert_eq!(
            request.messages.last().unwrap().content,
            "Please ask me the next question."
        );
    }

    #[test]
    fn test_pending_turn_is_not_replayed() {
        let turns = vec![answered("Q1", "A1"), Turn::pending("Q2")];
        let request = question_request(&config(InterviewStyle::General), &turns);

        // assistant Q1, user A1, trailing directive -- the unanswered Q2 is skipped
        assert_eq!(request.messages.len(), 3);
        assert!(!request.messages.iter().any(|m| m.content == "Q2"));
    }

    #[test]
    fn test_style_directives() {
        let system = |style| {
            question_request(&config(style), &[])
                .system
                .unwrap()
        };

        assert!(system(InterviewStyle::General).contains("common, non-technical question"));
        assert!(system(InterviewStyle::Technical).contains("knowledge and problem-solving skills"));

        let behavioral = system(InterviewStyle::Behavioral);
        assert!(behavioral.contains("STAR method"));
        assert!(behavioral.contains("Tell me about a time when..."));
        assert!(behavioral.contains("Describe a situation where..."));
    }

    #[test]
    fn test_feedback_request() {
        let request = feedback_request("gpt-4o", "Why Rust?", "Memory safety.");

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.max_tokens, FEEDBACK_MAX_TOKENS);
        assert_eq!(request.temperature, Some(FEEDBACK_TEMPERATURE));

        let system = request.system.unwrap();
        assert!(system.contains("expert interview coach"));
        assert!(system.contains("2-3 bullet points"));
        assert!(system.contains("Here's some feedback on your answer:"));

        assert_eq!(request.messages.len(), 1);
        assert_eq!(
            request.messages[0].content,
            "Question: Why Rust?\n\nAnswer: Memory safety."
        );
    }

    #[test]
    fn test_evaluation_request_numbers_pairs_and_excludes_feedback() {
        let turns = vec![answered("Q1", "A1"), answered("Q2", "A2")];
        let request = evaluation_request(&config(InterviewStyle::General), &turns);

        assert_eq!(request.max_tokens, EVALUATION_MAX_TOKENS);
        assert_eq!(request.temperature, Some(EVALUATION_TEMPERATURE));
        assert!(
            request
                .system
                .as_deref()
                .unwrap()
                .contains("expert hiring manager for a Backend Engineer position")
        );

        assert_eq!(request.messages.len(), 1);
        let user = &request.messages[0].content;
        assert!(user.contains("Question 1: Q1\nAnswer 1: A1"));
        assert!(user.contains("Question 2: Q2\nAnswer 2: A2"));
        assert!(user.contains("Overall Strengths"));
        assert!(user.contains("Key Areas for Improvement"));
        // Per-turn feedback text must never reach the evaluation prompt.
        assert!(!user.contains("well structured"));
    }
}
