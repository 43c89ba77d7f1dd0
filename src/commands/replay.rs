//! @acp:module "Replay Command"
//! @acp:summary "Re-resolve a stored answer file"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `scaffold replay <FILE>`: the stored answers go through
//! defaults and the full finalize pass, exactly like freshly collected ones.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use super::output::{emit_answers, AnswerSink};
use crate::answers::{Answers, ResolvedAnswers};
use crate::graph::QuestionGraph;
use crate::questions;

/// Options for the replay command
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Stored answer file
    pub file: PathBuf,
    /// Output path; prints to stdout when absent
    pub output: Option<PathBuf>,
}

/// Load an answer file from disk
pub fn load_answers(path: &Path) -> Result<Answers> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid answer file", path.display()))
}

/// Defaults, then finalize
pub async fn resolve(graph: &QuestionGraph, mut answers: Answers) -> crate::Result<ResolvedAnswers> {
    let defaulted = graph.apply_defaults(&mut answers);
    if !defaulted.is_empty() {
        tracing::info!("Applied defaults for: {}", defaulted.join(", "));
    }
    graph.finalize(answers, &[]).await
}

/// Execute the replay command
pub async fn execute_replay(options: ReplayOptions) -> Result<()> {
    eprintln!(
        "{} Replaying {}",
        style("→").cyan(),
        style(options.file.display()).bold()
    );

    let answers = load_answers(&options.file)?;
    let resolved = resolve(&questions::standard(), answers).await?;

    let sink = options
        .output
        .map(AnswerSink::File)
        .unwrap_or(AnswerSink::Stdout);
    emit_answers(&resolved, &sink)
}
