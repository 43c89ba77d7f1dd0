//! @acp:module "Migration"
//! @acp:summary "Infer an answer set from an existing project instead of interactive input"
//! @acp:domain engine
//! @acp:layer service
//!
//! ## Overview
//!
//! Migration walks the question graph once, in declaration order, keeping a
//! running partial answer set. Every active question with a migration
//! function gets to look at the project (through a [`MigrationContext`]) and at
//! the answers inferred before it. Later questions depend on earlier ones, so
//! the walk is strictly sequential: one question resolves fully before the
//! next condition is evaluated.
//!
//! The inferred set then goes through the same defaults, completeness,
//! transformation and validation passes as an interactively collected one.

pub mod analyze;
pub mod context;
pub mod fs;
pub mod manifest;
pub mod memory;

pub use context::{MigrationContext, PathFilter};
pub use fs::FsProject;
pub use memory::MemoryProject;

use serde::{Deserialize, Serialize};

use crate::answers::{Answers, ResolvedAnswers};
use crate::error::Result;
use crate::graph::QuestionGraph;

/// Validators disabled by default for migrated projects
pub const DEFAULT_DISABLED_VALIDATORS: &[&str] = &["adapterName"];

/// Options of a migration session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOptions {
    /// Questions whose validators are skipped because the existing project
    /// cannot be meaningfully checked against them
    #[serde(default = "default_disabled_validators")]
    pub disable_validation: Vec<String>,
}

fn default_disabled_validators() -> Vec<String> {
    DEFAULT_DISABLED_VALIDATORS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            disable_validation: default_disabled_validators(),
        }
    }
}

/// Derive answers from a project, in declaration order.
///
/// Inactive questions and questions without a migration function stay
/// unanswered. Any failing migration function aborts the whole inference.
pub async fn infer(graph: &QuestionGraph, context: &dyn MigrationContext) -> Result<Answers> {
    let mut answers = Answers::new();

    for q in graph.iter() {
        if !q.is_active(&answers) {
            continue;
        }
        let Some(migrate) = q.migrate else {
            continue;
        };

        let outcome = migrate(context, &answers).await;
        match outcome {
            Ok(Some(value)) => {
                tracing::debug!("Inferred \"{}\" = {}", q.name, value);
                answers.insert(q.name, value);
            }
            Ok(None) => tracing::debug!("Nothing to infer for \"{}\"", q.name),
            Err(e) => {
                tracing::debug!("Inference of \"{}\" failed: {}", q.name, e);
                return Err(e);
            }
        }
    }

    tracing::info!("Inferred {} answers", answers.len());
    Ok(answers)
}

/// Full migration session: infer, fill defaults, then finalize
pub async fn migrate_project(
    graph: &QuestionGraph,
    context: &dyn MigrationContext,
    options: &MigrationOptions,
) -> Result<ResolvedAnswers> {
    let mut answers = infer(graph, context).await?;

    let defaulted = graph.apply_defaults(&mut answers);
    if !defaulted.is_empty() {
        tracing::info!("Applied defaults for: {}", defaulted.join(", "));
    }

    let skip: Vec<&str> = options
        .disable_validation
        .iter()
        .map(String::as_str)
        .collect();
    graph.finalize(answers, &skip).await
}

#[cfg(test)]
mod tests {
    use futures::future::BoxFuture;
    use serde_json::json;

    use super::*;
    use crate::answers::AnswerValue;
    use crate::error::ScaffoldError;
    use crate::graph::{Condition, Question};

    fn features<'a>(
        ctx: &'a dyn MigrationContext,
        _: &'a Answers,
    ) -> BoxFuture<'a, Result<Option<AnswerValue>>> {
        Box::pin(async move {
            let mut found = Vec::new();
            if ctx.directory_exists("admin").await {
                found.push("adapter");
            }
            if ctx.directory_exists("widgets").await {
                found.push("vis");
            }
            Ok(Some(AnswerValue::from(found)))
        })
    }

    // Reads an answer inferred earlier in the same pass
    fn echo_features<'a>(
        _: &'a dyn MigrationContext,
        answers: &'a Answers,
    ) -> BoxFuture<'a, Result<Option<AnswerValue>>> {
        Box::pin(async move { Ok(answers.get("features").map(|f| AnswerValue::from(f.to_string()))) })
    }

    fn failing<'a>(
        _: &'a dyn MigrationContext,
        _: &'a Answers,
    ) -> BoxFuture<'a, Result<Option<AnswerValue>>> {
        Box::pin(async move { Err(ScaffoldError::inference("broken", "bad manifest")) })
    }

    fn graph() -> QuestionGraph {
        QuestionGraph::new(vec![
            Question::multi_select("features", &["adapter", "vis"]).migrate(features),
            Question::input("summary")
                .when(Condition::contains("features", "adapter"))
                .migrate(echo_features),
            Question::input("widgetOnly")
                .when(Condition::excludes("features", "adapter"))
                .migrate(echo_features),
            Question::yes_no("noMigration").default_value("no"),
        ])
    }

    #[tokio::test]
    async fn test_infer_threads_partial_answers() {
        let project = MemoryProject::new(json!({}), json!({}))
            .with_dir("admin")
            .with_dir("widgets");
        let answers = infer(&graph(), &project).await.unwrap();

        assert_eq!(answers.get("features"), Some(&AnswerValue::from(vec!["adapter", "vis"])));
        assert_eq!(answers.text("summary"), Some("adapter, vis"));
        assert!(!answers.contains("widgetOnly"));
        assert!(!answers.contains("noMigration"));
    }

    #[tokio::test]
    async fn test_infer_is_deterministic() {
        let project = MemoryProject::new(json!({}), json!({})).with_dir("widgets");
        let first = infer(&graph(), &project).await.unwrap();
        let second = infer(&graph(), &project).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text("widgetOnly"), Some("vis"));
    }

    #[tokio::test]
    async fn test_failing_migration_aborts() {
        let g = QuestionGraph::new(vec![
            Question::input("broken").migrate(failing),
            Question::input("after").migrate(echo_features),
        ]);
        let err = infer(&g, &MemoryProject::default()).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Inference { .. }));
    }

    #[tokio::test]
    async fn test_migrate_project_applies_defaults() {
        let project = MemoryProject::new(json!({}), json!({})).with_dir("admin");
        let resolved = migrate_project(&graph(), &project, &MigrationOptions::default())
            .await
            .unwrap();
        assert_eq!(resolved.get("noMigration"), Some(&AnswerValue::from("no")));
    }

    #[test]
    fn test_options_default_disables_adapter_name() {
        let options: MigrationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.disable_validation, vec!["adapterName".to_string()]);
    }
}
