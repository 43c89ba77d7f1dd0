//! @acp:module "Output"
//! @acp:summary "Writing resolved answer files and reporting the result"
//! @acp:domain cli
//! @acp:layer utility

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use crate::answers::ResolvedAnswers;

/// Where a command sends its resolved answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSink {
    Stdout,
    File(PathBuf),
}

/// Write the answer file, or print it for `--stdout`
pub fn emit_answers(resolved: &ResolvedAnswers, sink: &AnswerSink) -> Result<()> {
    let json = resolved.to_json_pretty()?;
    match sink {
        AnswerSink::Stdout => println!("{}", json),
        AnswerSink::File(path) => {
            write_answers_file(path, &json)?;
            eprintln!(
                "{} Wrote {} answers to {}",
                style("✓").green(),
                resolved.answers().len(),
                style(path.display()).cyan()
            );
        }
    }
    Ok(())
}

fn write_answers_file(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", path.display()))
}
