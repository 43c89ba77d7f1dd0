#![forbid(unsafe_code)]

//! @acp:module "Scaffold Library"
//! @acp:summary "Answer resolution for the adapter creator: question graph, pipeline and migration"
//! @acp:domain engine
//! @acp:layer api
//! @acp:stability stable
//!
//! # Scaffold
//!
//! Resolves the complete, validated answer set that drives project
//! generation, either from interactively collected answers or by inferring
//! them from an existing adapter project.
//!
//! ## Features
//!
//! - **Question Graph**: Ordered, conditionally active questions with multi-branch names
//! - **Answer Pipeline**: Completeness check, transforms, then fail-fast validation
//! - **Migration**: Per-question inference from manifests and source heuristics
//!
//! ## Example
//!
//! ```rust,no_run
//! use scaffold::{migrate_project, questions, FsProject, MigrationOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let graph = questions::standard();
//!     let project = FsProject::open("./ioBroker.weather").await?;
//!
//!     let answers = migrate_project(&graph, &project, &MigrationOptions::default()).await?;
//!     std::fs::write(".create-adapter.json", answers.to_json_pretty()?)?;
//!
//!     Ok(())
//! }
//! ```

pub mod answers;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod migrate;
pub mod questions;

// Re-exports
pub use answers::{AdapterSetting, AnswerValue, Answers, ResolvedAnswers, SelectOption, SettingKind};
pub use config::Config;
pub use error::{Result, ScaffoldError};
pub use graph::{Condition, Question, QuestionGraph, QuestionKind};
pub use migrate::{
    infer, migrate_project, FsProject, MemoryProject, MigrationContext, MigrationOptions,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
