//! @acp:module "Answer Model"
//! @acp:summary "Typed answer values, the mutable answer set and the finalized handoff"
//! @acp:domain engine
//! @acp:layer model

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single answer: scalar, list of scalars, or the structured settings list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<AnswerValue>),
    Settings(Vec<AdapterSetting>),
}

impl AnswerValue {
    /// `"yes"` or `"no"`
    pub fn yes_no(flag: bool) -> Self {
        AnswerValue::Text(if flag { "yes" } else { "no" }.to_string())
    }

    /// Build a list of text values
    pub fn texts<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::List(items.into_iter().map(|s| AnswerValue::Text(s.into())).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AnswerValue]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Settings entries; an empty plain list counts as no settings
    pub fn as_settings(&self) -> Option<&[AdapterSetting]> {
        match self {
            AnswerValue::Settings(items) => Some(items),
            AnswerValue::List(items) if items.is_empty() => Some(&[]),
            _ => None,
        }
    }

    /// True iff this is a list holding `needle`
    pub fn list_contains(&self, needle: &AnswerValue) -> bool {
        self.as_list()
            .map(|items| items.contains(needle))
            .unwrap_or(false)
    }

    pub fn is_yes(&self) -> bool {
        self.as_str() == Some("yes")
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(value: Vec<&str>) -> Self {
        AnswerValue::texts(value)
    }
}

impl From<Vec<AdapterSetting>> for AnswerValue {
    fn from(value: Vec<AdapterSetting>) -> Self {
        AnswerValue::Settings(value)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Bool(b) => write!(f, "{}", b),
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Text(s) => write!(f, "{}", s),
            AnswerValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
            AnswerValue::Settings(items) => {
                let keys: Vec<&str> = items.iter().map(|s| s.key.as_str()).collect();
                write!(f, "[{}]", keys.join(", "))
            }
        }
    }
}

/// Input kind of a custom adapter setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    Text,
    Number,
    Checkbox,
    Select,
}

impl SettingKind {
    pub fn all() -> &'static [SettingKind] {
        &[
            SettingKind::Text,
            SettingKind::Number,
            SettingKind::Checkbox,
            SettingKind::Select,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKind::Text => "text",
            SettingKind::Number => "number",
            SettingKind::Checkbox => "checkbox",
            SettingKind::Select => "select",
        }
    }
}

/// One option of a `select` setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

/// @acp:summary "Custom setting entry of the adapterSettings answer"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterSetting {
    pub key: String,
    pub input_type: SettingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

impl AdapterSetting {
    pub fn new(key: impl Into<String>, input_type: SettingKind) -> Self {
        Self {
            key: key.into(),
            input_type,
            label: None,
            default_value: None,
            options: None,
        }
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// @acp:summary "Answer set under construction, keyed by question name"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, AnswerValue>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AnswerValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Store an answer, returning the previous value if it was overwritten
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AnswerValue>) -> Option<AnswerValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<AnswerValue> {
        self.0.remove(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AnswerValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builder-style insert used by tests and fixtures
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(name, value);
        self
    }
}

/// @acp:summary "Finalized answer set handed to the rendering collaborator"
///
/// Only produced by a successful finalize pass; it has no mutating methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedAnswers(Answers);

impl ResolvedAnswers {
    pub(crate) fn new(answers: Answers) -> Self {
        Self(answers)
    }

    pub fn get(&self, name: &str) -> Option<&AnswerValue> {
        self.0.get(name)
    }

    pub fn answers(&self) -> &Answers {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
