//! Interview history commands: list and show.
//!
//! Reads stored transcripts, newest first, as a table or as JSON; `show`
//! prints one transcript in full including per-answer feedback and the
//! final evaluation.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use uuid::Uuid;

use rehearse_core::transcript::sort_newest_first;
use rehearse_core::transcript::store::TranscriptStore;
use rehearse_infra::sqlite::transcript::SqliteTranscriptStore;

use crate::state::AppState;

fn store(state: &AppState) -> Result<&SqliteTranscriptStore> {
    state.store.as_ref().with_context(|| {
        format!(
            "transcript store unavailable at {}, no history to read",
            state.data_dir.display()
        )
    })
}

/// List past interviews, newest first.
pub async fn list_transcripts(state: &AppState, json: bool) -> Result<()> {
    let mut records = store(state)?.list().await?;
    sort_newest_first(&mut records);

    if json {
        let entries: Vec<serde_json::Value> = records
            .iter()
            .map(|(id, record)| {
                serde_json::json!({
                    "id": id.to_string(),
                    "record": record,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if records.is_empty() {
        println!();
        println!(
            "  {} No past interviews found. Start one with: {}",
            style("i").blue().bold(),
            style("rehearse interview --job-title \"...\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Job Title").fg(Color::White),
        Cell::new("Participant").fg(Color::White),
        Cell::new("Questions").fg(Color::White),
        Cell::new("Model").fg(Color::White),
        Cell::new("When").fg(Color::White),
    ]);

    for (id, record) in &records {
        table.add_row(vec![
            Cell::new(id.to_string()).fg(Color::DarkGrey),
            Cell::new(&record.job_title).fg(Color::Cyan),
            Cell::new(&record.participant).fg(Color::White),
            Cell::new(record.questions.len().to_string()).fg(Color::White),
            Cell::new(&record.model).fg(Color::DarkGrey),
            Cell::new(record.display_timestamp()).fg(Color::White),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} interview{}",
        style(records.len()).bold(),
        if records.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show one past interview in full.
pub async fn show_transcript(state: &AppState, id: Uuid, json: bool) -> Result<()> {
    let records = store(state)?.list().await?;
    let (_, record) = records
        .into_iter()
        .find(|(record_id, _)| *record_id == id)
        .with_context(|| format!("Transcript '{id}' not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Mock Interview",
        style(&record.job_title).cyan().bold()
    );
    println!(
        "  {}",
        style(format!(
            "Participant: {} | Model: {} | {}",
            record.participant,
            record.model,
            record.display_timestamp()
        ))
        .dim()
    );
    println!();

    for (i, question) in record.questions.iter().enumerate() {
        println!(
            "  {} {}",
            style(format!("Q{}:", i + 1)).cyan().bold(),
            question
        );
        if let Some(answer) = record.answers.get(i) {
            println!("  {} {}", style(format!("A{}:", i + 1)).bold(), answer);
        }
        if let Some(Some(feedback)) = record.feedback.get(i) {
            println!(
                "  {} {}",
                style("Feedback:").yellow().bold(),
                feedback
            );
        }
        println!();
    }

    println!("  {}", style("Final Evaluation").bold());
    for line in record.evaluation.lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}
