//! @acp:module "Question"
//! @acp:summary "Structural question record: kind, gating conditions and callbacks"
//! @acp:domain engine
//! @acp:layer model
//!
//! Questions carry no display text. Callbacks are plain function pointers that
//! receive everything they read as arguments, so a question never captures
//! state of its own.

use std::fmt;

use futures::future::BoxFuture;

use super::condition::Condition;
use crate::answers::{AnswerValue, Answers};
use crate::error::Result;
use crate::migrate::MigrationContext;

/// Outcome of a validator: `Err` carries the user-facing message
pub type Verdict = std::result::Result<(), String>;

/// Validator callback
pub type ValidateFn = for<'a> fn(&'a AnswerValue) -> BoxFuture<'a, Verdict>;

/// Transform callback, applied before validation
pub type TransformFn = for<'a> fn(&'a AnswerValue) -> BoxFuture<'a, Result<AnswerValue>>;

/// Migration callback; `Ok(None)` leaves the slot unanswered
pub type MigrateFn = for<'a> fn(
    &'a dyn MigrationContext,
    &'a Answers,
) -> BoxFuture<'a, Result<Option<AnswerValue>>>;

/// Wrap an already computed value for a callback that has nothing to await
pub fn ready<'a, T: Send + 'a>(value: T) -> BoxFuture<'a, T> {
    Box::pin(futures::future::ready(value))
}

/// Shape of the answer a question collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text
    Input,
    /// One of `choices`
    Select,
    /// Any subset of `choices`
    MultiSelect,
    /// `"yes"` or `"no"`
    YesNo,
    /// Structured list of custom settings
    SettingsList,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Input => "input",
            QuestionKind::Select => "select",
            QuestionKind::MultiSelect => "multiselect",
            QuestionKind::YesNo => "yesno",
            QuestionKind::SettingsList => "settings",
        }
    }
}

/// @acp:summary "One branch of a named answer slot"
#[derive(Clone)]
pub struct Question {
    pub name: &'static str,
    pub kind: QuestionKind,
    pub choices: &'static [&'static str],
    pub conditions: Vec<Condition>,
    pub optional: bool,
    pub expert_only: bool,
    pub default: Option<AnswerValue>,
    pub validate: Option<ValidateFn>,
    pub transform: Option<TransformFn>,
    pub migrate: Option<MigrateFn>,
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("conditions", &self.conditions)
            .field("optional", &self.optional)
            .field("expert_only", &self.expert_only)
            .field("default", &self.default)
            .field("validate", &self.validate.is_some())
            .field("transform", &self.transform.is_some())
            .field("migrate", &self.migrate.is_some())
            .finish()
    }
}

impl Question {
    pub fn new(name: &'static str, kind: QuestionKind) -> Self {
        Self {
            name,
            kind,
            choices: &[],
            conditions: Vec::new(),
            optional: false,
            expert_only: false,
            default: None,
            validate: None,
            transform: None,
            migrate: None,
        }
    }

    pub fn input(name: &'static str) -> Self {
        Self::new(name, QuestionKind::Input)
    }

    pub fn select(name: &'static str, choices: &'static [&'static str]) -> Self {
        Self::new(name, QuestionKind::Select).choices(choices)
    }

    pub fn multi_select(name: &'static str, choices: &'static [&'static str]) -> Self {
        Self::new(name, QuestionKind::MultiSelect).choices(choices)
    }

    pub fn yes_no(name: &'static str) -> Self {
        Self::new(name, QuestionKind::YesNo).choices(&["yes", "no"])
    }

    pub fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    /// Add a gating condition; repeated calls are ANDed
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn expert_only(mut self) -> Self {
        self.expert_only = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<AnswerValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn validate(mut self, f: ValidateFn) -> Self {
        self.validate = Some(f);
        self
    }

    pub fn transform(mut self, f: TransformFn) -> Self {
        self.transform = Some(f);
        self
    }

    pub fn migrate(mut self, f: MigrateFn) -> Self {
        self.migrate = Some(f);
        self
    }

    /// Whether this branch is active for the given answers
    pub fn is_active(&self, answers: &Answers) -> bool {
        super::condition::evaluate(&self.conditions, answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_empty<'a>(value: &'a AnswerValue) -> BoxFuture<'a, Verdict> {
        ready(match value.as_str() {
            Some(s) if !s.is_empty() => Ok(()),
            _ => Err("empty".to_string()),
        })
    }

    #[tokio::test]
    async fn test_builder_and_callbacks() {
        let q = Question::input("title")
            .when(Condition::contains("features", "adapter"))
            .validate(non_empty);

        assert_eq!(q.kind, QuestionKind::Input);
        assert!(!q.optional);
        let validate = q.validate.unwrap();
        assert!(validate(&"x".into()).await.is_ok());
        assert_eq!(validate(&"".into()).await, Err("empty".to_string()));
    }

    #[test]
    fn test_yes_no_choices() {
        let q = Question::yes_no("gitCommit");
        assert_eq!(q.choices, &["yes", "no"]);
        assert!(q.is_active(&Answers::new()));
    }
}
