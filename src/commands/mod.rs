//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each command is in its own submodule and drives the library through the
//! standard question graph.

pub mod init;
pub mod migrate;
pub mod output;
pub mod questions;
pub mod replay;

pub use init::{execute_init, InitOptions};
pub use migrate::{execute_migrate, MigrateOptions};
pub use output::{emit_answers, AnswerSink};
pub use questions::{execute_questions, QuestionsOptions};
pub use replay::{execute_replay, load_answers, ReplayOptions};
