//! @acp:module "Condition Evaluator"
//! @acp:summary "Evaluate question visibility predicates against a partial answer set"
//! @acp:domain engine
//! @acp:layer logic

use std::fmt;

use crate::answers::{AnswerValue, Answers};

/// Atomic predicate over one other answer
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The answer equals one of the listed values
    EqualsOneOf { name: String, values: Vec<AnswerValue> },
    /// The answer is a list containing the value
    Contains { name: String, value: AnswerValue },
    /// The answer is absent, not a list, or a list without the value
    Excludes { name: String, value: AnswerValue },
}

impl Condition {
    pub fn equals(name: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Condition::EqualsOneOf {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    pub fn one_of<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AnswerValue>,
    {
        Condition::EqualsOneOf {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(name: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Condition::Contains {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn excludes(name: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Condition::Excludes {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Name of the answer this predicate reads
    pub fn subject(&self) -> &str {
        match self {
            Condition::EqualsOneOf { name, .. }
            | Condition::Contains { name, .. }
            | Condition::Excludes { name, .. } => name,
        }
    }

    /// Evaluate this predicate; never fails
    pub fn holds(&self, answers: &Answers) -> bool {
        match self {
            Condition::EqualsOneOf { name, values } => answers
                .get(name)
                .map(|answer| values.contains(answer))
                .unwrap_or(false),
            Condition::Contains { name, value } => answers
                .get(name)
                .map(|answer| answer.list_contains(value))
                .unwrap_or(false),
            Condition::Excludes { name, value } => !answers
                .get(name)
                .map(|answer| answer.list_contains(value))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::EqualsOneOf { name, values } if values.len() == 1 => {
                write!(f, "{} = {}", name, values[0])
            }
            Condition::EqualsOneOf { name, values } => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{} in [{}]", name, parts.join(" | "))
            }
            Condition::Contains { name, value } => write!(f, "{} contains {}", name, value),
            Condition::Excludes { name, value } => write!(f, "{} excludes {}", name, value),
        }
    }
}

/// Evaluate a condition list: empty is true, otherwise all must hold
pub fn evaluate(conditions: &[Condition], answers: &Answers) -> bool {
    conditions.iter().all(|c| c.holds(answers))
}
