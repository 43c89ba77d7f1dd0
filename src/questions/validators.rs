//! @acp:module "Answer Validators"
//! @acp:summary "Side-effect-free checks of the standard answers"
//! @acp:domain engine
//! @acp:layer logic
//!
//! Every check is a plain function; the exported validators wrap them into
//! the asynchronous callback shape questions expect.

use std::collections::HashSet;
use std::sync::LazyLock;

use futures::future::BoxFuture;
use regex::Regex;
use serde_json::Value;

use super::choices;
use crate::answers::{AnswerValue, SettingKind};
use crate::graph::{ready, Verdict};

static ADAPTER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9\-_]+$").expect("valid adapter name pattern"));

static FORBIDDEN_TITLE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)iobroker|adapter").expect("valid title pattern"));

static GITHUB_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$").expect("valid github user pattern")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static SETTING_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid setting key pattern"));

macro_rules! validators {
    ($($(#[$meta:meta])* $name:ident => $check:expr;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<'a>(value: &'a AnswerValue) -> BoxFuture<'a, Verdict> {
                ready($check(value))
            }
        )*
    };
}

validators! {
    features => |v| check_multi_select(v, choices::FEATURES, 1, "feature");
    admin_features => |v| check_multi_select(v, choices::ADMIN_FEATURES, 0, "admin feature");
    adapter_type => |v| check_select(v, choices::ADAPTER_TYPES, "adapter type");
    widget_type => |v| check_select(v, choices::WIDGET_TYPES, "type");
    start_mode => |v| check_select(v, choices::START_MODES, "start mode");
    connection_type => |v| check_select(v, choices::CONNECTION_TYPES, "connection type");
    data_source => |v| check_select(v, choices::DATA_SOURCES, "data source");
    language => |v| check_select(v, choices::LANGUAGES, "language");
    tools => |v| check_multi_select(v, choices::TOOLS, 0, "tool");
    indentation => |v| check_select(v, choices::INDENTATION, "indentation");
    quotes => |v| check_select(v, choices::QUOTES, "quote style");
    git_protocol => |v| check_select(v, choices::GIT_PROTOCOLS, "protocol");
    default_branch => |v| check_select(v, choices::DEFAULT_BRANCHES, "branch");
    yes_no => |v| check_select(v, choices::YES_NO, "answer");
    adapter_name => check_adapter_name;
    title => check_title;
    author_name => |v| check_non_empty(v, "Please enter your name!");
    author_github => check_github_user;
    author_email => check_email;
    license => |v| check_non_empty(v, "Please choose a license!");
    adapter_settings => check_adapter_settings;
}

fn text(value: &AnswerValue) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("Expected a text answer, got {}", value))
}

pub fn check_non_empty(value: &AnswerValue, message: &str) -> Verdict {
    if text(value)?.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

pub fn check_select(value: &AnswerValue, allowed: &[&str], what: &str) -> Verdict {
    let choice = text(value)?;
    if allowed.contains(&choice) {
        Ok(())
    } else {
        Err(format!("\"{}\" is not a valid {}!", choice, what))
    }
}

pub fn check_multi_select(value: &AnswerValue, allowed: &[&str], min: usize, what: &str) -> Verdict {
    let items = value
        .as_list()
        .ok_or_else(|| format!("Expected a list of {}s, got {}", what, value))?;
    if items.len() < min {
        return Err(format!(
            "Please select at least {} {}{}!",
            min,
            what,
            if min == 1 { "" } else { "s" }
        ));
    }
    for item in items {
        check_select(item, allowed, what)?;
    }
    Ok(())
}

pub fn check_adapter_name(value: &AnswerValue) -> Verdict {
    let name = text(value)?;
    if name.is_empty() {
        return Err("Please enter a name!".to_string());
    }
    if !ADAPTER_NAME.is_match(name) {
        return Err(
            "The adapter name may only consist of lowercase letters, numbers, \"-\" and \"_\"!"
                .to_string(),
        );
    }
    if name.starts_with(['-', '_']) {
        return Err("The adapter name must start with a letter or a number!".to_string());
    }
    Ok(())
}

pub fn check_title(value: &AnswerValue) -> Verdict {
    let title = text(value)?.trim();
    if title.is_empty() {
        return Err("Please enter a title!".to_string());
    }
    if FORBIDDEN_TITLE_WORDS.is_match(title) {
        return Err("The title must not contain the words \"ioBroker\" or \"adapter\"!".to_string());
    }
    Ok(())
}

pub fn check_github_user(value: &AnswerValue) -> Verdict {
    let user = text(value)?;
    if GITHUB_USER.is_match(user) {
        Ok(())
    } else {
        Err("Please enter a valid GitHub username!".to_string())
    }
}

pub fn check_email(value: &AnswerValue) -> Verdict {
    let email = text(value)?;
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err("Please enter a valid email address!".to_string())
    }
}

fn default_matches(kind: SettingKind, default: &Value) -> bool {
    match kind {
        SettingKind::Checkbox => default.is_boolean(),
        SettingKind::Number => default.is_number(),
        SettingKind::Text | SettingKind::Select => default.is_string(),
    }
}

pub fn check_adapter_settings(value: &AnswerValue) -> Verdict {
    let settings = value
        .as_settings()
        .ok_or_else(|| format!("Expected a list of settings, got {}", value))?;

    let mut seen = HashSet::new();
    for setting in settings {
        if !SETTING_KEY.is_match(&setting.key) {
            return Err(format!("\"{}\" is not a valid setting key!", setting.key));
        }
        if !seen.insert(setting.key.as_str()) {
            return Err(format!("The setting key \"{}\" is used more than once!", setting.key));
        }
        if setting.input_type == SettingKind::Select
            && setting.options.as_ref().map_or(true, |o| o.is_empty())
        {
            return Err(format!(
                "The select setting \"{}\" needs at least one option!",
                setting.key
            ));
        }
        if let Some(default) = &setting.default_value {
            if !default_matches(setting.input_type, default) {
                return Err(format!(
                    "The default value of \"{}\" does not fit a {} setting!",
                    setting.key,
                    setting.input_type.as_str()
                ));
            }
        }
    }
    Ok(())
}
