//! @acp:module "Question Graph"
//! @acp:summary "Ordered question branches, completeness checking and static defaults"
//! @acp:domain engine
//! @acp:layer logic
//!
//! The graph is an ordered list of question records. Several records may share
//! a name; each is a branch gated by its own conditions, and the active branch
//! of a name is looked up at runtime as the first one whose conditions hold.

pub mod condition;
pub mod pipeline;
pub mod question;

use std::collections::HashMap;

pub use condition::{evaluate, Condition};
pub use question::{ready, MigrateFn, Question, QuestionKind, TransformFn, ValidateFn, Verdict};

use crate::answers::Answers;
use crate::error::{Result, ScaffoldError};

/// @acp:summary "Immutable, declaration-ordered collection of question branches"
#[derive(Debug, Clone)]
pub struct QuestionGraph {
    questions: Vec<Question>,
    branch_counts: HashMap<&'static str, usize>,
}

impl QuestionGraph {
    pub fn new(questions: Vec<Question>) -> Self {
        let mut branch_counts = HashMap::new();
        for q in &questions {
            *branch_counts.entry(q.name).or_insert(0) += 1;
        }
        Self {
            questions,
            branch_counts,
        }
    }

    /// All branches in declaration order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct answer slot names in first-declaration order
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for q in &self.questions {
            if !names.contains(&q.name) {
                names.push(q.name);
            }
        }
        names
    }

    /// Every branch sharing `name`, in declaration order
    pub fn branches<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| q.name == name)
    }

    /// First branch of `name` whose conditions hold
    pub fn active_branch(&self, name: &str, answers: &Answers) -> Option<&Question> {
        self.questions
            .iter()
            .find(|q| q.name == name && q.is_active(answers))
    }

    pub fn is_multi_branch(&self, name: &str) -> bool {
        self.branch_counts.get(name).copied().unwrap_or(0) > 1
    }

    /// Check that every active required question is answered and no inactive
    /// question carries an answer.
    ///
    /// Names with more than one branch are exempt from the extraneous check,
    /// whichever branch is currently active.
    pub fn check_completeness(&self, answers: &Answers) -> Result<()> {
        for q in &self.questions {
            let answered = answers.contains(q.name);
            if q.is_active(answers) {
                if !q.optional && !answered {
                    return Err(ScaffoldError::MissingAnswer(q.name.to_string()));
                }
            } else if answered && !self.is_multi_branch(q.name) {
                return Err(ScaffoldError::ExtraneousAnswer(q.name.to_string()));
            }
        }
        Ok(())
    }

    /// Fill active, unanswered questions that carry a static default.
    ///
    /// Runs in declaration order so a default can activate later questions.
    /// Returns the names that were filled.
    pub fn apply_defaults(&self, answers: &mut Answers) -> Vec<&'static str> {
        let mut filled = Vec::new();
        for q in &self.questions {
            if answers.contains(q.name) || !q.is_active(answers) {
                continue;
            }
            if let Some(default) = &q.default {
                tracing::debug!("Defaulting \"{}\" to {}", q.name, default);
                answers.insert(q.name, default.clone());
                filled.push(q.name);
            }
        }
        filled
    }
}
