//! @acp:module "Migrate Command"
//! @acp:summary "Infer the answer file of an existing adapter project"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `scaffold migrate <DIR>`.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use super::output::{emit_answers, AnswerSink};
use crate::config::Config;
use crate::migrate::{migrate_project, FsProject, MigrationOptions};
use crate::questions;

/// Options for the migrate command
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Project directory holding package.json and io-package.json
    pub dir: PathBuf,
    /// Answer file path; defaults to the configured answers file inside `dir`
    pub output: Option<PathBuf>,
    /// Print the answers instead of writing them
    pub stdout: bool,
    /// Additional validators to skip
    pub skip_validation: Vec<String>,
}

impl MigrateOptions {
    fn sink(&self, config: &Config) -> AnswerSink {
        if self.stdout {
            AnswerSink::Stdout
        } else {
            AnswerSink::File(
                self.output
                    .clone()
                    .unwrap_or_else(|| self.dir.join(&config.answers_file)),
            )
        }
    }

    fn migration(&self, config: &Config) -> MigrationOptions {
        let mut migration = config.migration.clone();
        for name in &self.skip_validation {
            if !migration.disable_validation.contains(name) {
                migration.disable_validation.push(name.clone());
            }
        }
        migration
    }
}

/// Execute the migrate command
pub async fn execute_migrate(options: MigrateOptions, config: &Config) -> Result<()> {
    eprintln!(
        "{} Migrating {}",
        style("→").cyan(),
        style(options.dir.display()).bold()
    );

    let project = FsProject::open(&options.dir).await?;
    let migration = options.migration(config);
    for name in &migration.disable_validation {
        tracing::warn!("Validation of \"{}\" is disabled for migration", name);
    }

    let resolved = migrate_project(&questions::standard(), &project, &migration).await?;
    emit_answers(&resolved, &options.sink(config))
}
