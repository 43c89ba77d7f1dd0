//! @acp:module "Init Command"
//! @acp:summary "Collect answers interactively for a new adapter"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `scaffold init`. Questions are asked in graph order; a rejected
//! answer is reported and the question asked again. Expert-only questions are
//! skipped unless expert mode is on, leaving them to the static defaults.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use serde_json::json;

use super::output::{emit_answers, AnswerSink};
use super::replay::resolve;
use crate::answers::{AdapterSetting, AnswerValue, Answers, SelectOption, SettingKind};
use crate::config::Config;
use crate::graph::{Question, QuestionKind};
use crate::questions;

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Ask expert-only questions
    pub expert: bool,
    /// Answer file path; defaults to the configured answers file
    pub output: Option<PathBuf>,
}

/// Prompt text of each answer slot
pub fn label(name: &str) -> &'static str {
    match name {
        "features" => "Which features should your project contain?",
        "adminFeatures" => "Which additional features should be available in the admin?",
        "type" => "Which category does your adapter fall into?",
        "startMode" => "When should the adapter be started?",
        "connectionType" => "From where will the adapter get its data?",
        "dataSource" => "How will the adapter receive its data?",
        "connectionIndicator" => "Do you want to indicate the connection state?",
        "adapterName" => "Please enter the name of your project",
        "title" => "Which title should be shown in the admin UI?",
        "description" => "Please enter a short description",
        "keywords" => "Enter some keywords (comma separated) to describe your project",
        "contributors" => "If you're working in a team, please enter the names of your contributors (comma separated)",
        "expert" => "Would you like to see the expert settings?",
        "language" => "Which language do you want to use to code the adapter?",
        "adapterSettings" => "Define the settings for the adapter",
        "tools" => "Which of the following tools do you want to use?",
        "releaseScript" => "Would you like to use the release script to automate the release process?",
        "indentation" => "Do you prefer tab or space indentation?",
        "quotes" => "Do you prefer double or single quotes?",
        "es6class" => "How should the main adapter file be structured? Use an ES6 class?",
        "adminReact" => "Use React for the Admin UI?",
        "tabReact" => "Use React for the tab UI?",
        "authorName" => "Please enter your name (or nickname)",
        "authorGithub" => "What's your name/org on GitHub?",
        "authorEmail" => "What's your email address?",
        "gitRemoteProtocol" => "Which protocol should be used for the repo URL?",
        "gitCommit" => "Initialize the GitHub repo automatically?",
        "defaultBranch" => "How should the main branch be called?",
        "license" => "Which license should be used for your project?",
        "dependabot" => "Do you want to receive regular dependency updates through Pull Requests?",
        _ => "Please enter a value",
    }
}

/// Whether a question is asked or left to its default
pub fn should_ask(question: &Question, answers: &Answers, expert_mode: bool) -> bool {
    if answers.contains(question.name) || !question.is_active(answers) {
        return false;
    }
    if question.expert_only {
        return expert_mode || answers.get("expert").is_some_and(AnswerValue::is_yes);
    }
    true
}

/// Execute the init command
pub async fn execute_init(options: InitOptions, config: &Config) -> Result<()> {
    let expert_mode = options.expert || config.expert;
    println!("{} Adapter Setup\n", style("→").cyan());

    let graph = questions::standard();
    let mut answers = Answers::new();
    if expert_mode {
        answers.insert("expert", AnswerValue::yes_no(true));
    }

    for q in graph.iter() {
        if !should_ask(q, &answers, expert_mode) {
            continue;
        }
        if let Some(value) = ask_until_valid(q).await? {
            answers.insert(q.name, value);
        }
    }

    let resolved = resolve(&graph, answers).await?;
    let path = options.output.unwrap_or_else(|| config.answers_file.clone());
    emit_answers(&resolved, &AnswerSink::File(path))?;

    println!("\n{}", style("Next steps:").bold());
    println!(
        "  Run {} to check the stored answers",
        style("scaffold replay").cyan()
    );
    Ok(())
}

/// Prompt for one answer; rejected answers are reported and asked again.
///
/// The raw answer is returned; the finalize pass applies the transforms.
async fn ask_until_valid(question: &Question) -> Result<Option<AnswerValue>> {
    loop {
        let Some(raw) = prompt(question)? else {
            return Ok(None);
        };
        let value = match question.transform {
            Some(transform) => transform(&raw).await?,
            None => raw.clone(),
        };
        match question.validate {
            Some(validate) => match validate(&value).await {
                Ok(()) => return Ok(Some(raw)),
                Err(message) => eprintln!("{} {}", style("✗").red(), message),
            },
            None => return Ok(Some(raw)),
        }
    }
}

fn default_index(question: &Question) -> usize {
    question
        .default
        .as_ref()
        .and_then(AnswerValue::as_str)
        .and_then(|d| question.choices.iter().position(|c| *c == d))
        .unwrap_or(0)
}

fn prompt(question: &Question) -> Result<Option<AnswerValue>> {
    let theme = ColorfulTheme::default();
    let text = label(question.name);

    let value = match question.kind {
        QuestionKind::Input => {
            let input: String = Input::with_theme(&theme)
                .with_prompt(text)
                .allow_empty(question.optional)
                .interact_text()?;
            if question.optional && input.trim().is_empty() {
                return Ok(None);
            }
            AnswerValue::from(input)
        }
        QuestionKind::Select => {
            let idx = Select::with_theme(&theme)
                .with_prompt(text)
                .items(question.choices)
                .default(default_index(question))
                .interact()?;
            AnswerValue::from(question.choices[idx])
        }
        QuestionKind::MultiSelect => {
            let selected = MultiSelect::with_theme(&theme)
                .with_prompt(text)
                .items(question.choices)
                .interact()?;
            AnswerValue::texts(selected.into_iter().map(|idx| question.choices[idx]))
        }
        QuestionKind::YesNo => {
            let default = question.default.as_ref().is_none_or(AnswerValue::is_yes);
            let yes = Confirm::with_theme(&theme)
                .with_prompt(text)
                .default(default)
                .interact()?;
            AnswerValue::yes_no(yes)
        }
        QuestionKind::SettingsList => prompt_settings(question, &theme)?,
    };
    Ok(Some(value))
}

fn prompt_settings(question: &Question, theme: &ColorfulTheme) -> Result<AnswerValue> {
    println!("{}", style(label(question.name)).bold());
    if let Some(default) = &question.default {
        let keep = Confirm::with_theme(theme)
            .with_prompt(format!("Use the sample settings ({})?", default))
            .default(true)
            .interact()?;
        if keep {
            return Ok(default.clone());
        }
    }

    let kinds: Vec<&str> = SettingKind::all().iter().map(SettingKind::as_str).collect();
    let mut settings = Vec::new();
    while Confirm::with_theme(theme)
        .with_prompt("Add a setting?")
        .default(settings.is_empty())
        .interact()?
    {
        let key: String = Input::with_theme(theme).with_prompt("Key").interact_text()?;
        let kind = SettingKind::all()[Select::with_theme(theme)
            .with_prompt("Input type")
            .items(&kinds)
            .default(0)
            .interact()?];
        let caption: String = Input::with_theme(theme)
            .with_prompt("Label")
            .allow_empty(true)
            .interact_text()?;

        let mut setting = AdapterSetting::new(key, kind);
        if !caption.trim().is_empty() {
            setting = setting.with_label(caption.trim());
        }
        setting = match kind {
            SettingKind::Checkbox => setting.with_default(json!(Confirm::with_theme(theme)
                .with_prompt("Checked by default?")
                .default(false)
                .interact()?)),
            SettingKind::Number => {
                let n: f64 = Input::with_theme(theme)
                    .with_prompt("Default value")
                    .default(0.0)
                    .interact_text()?;
                setting.with_default(json!(n))
            }
            SettingKind::Text => {
                let s: String = Input::with_theme(theme)
                    .with_prompt("Default value")
                    .allow_empty(true)
                    .interact_text()?;
                setting.with_default(json!(s))
            }
            SettingKind::Select => {
                let raw: String = Input::with_theme(theme)
                    .with_prompt("Options (comma separated)")
                    .interact_text()?;
                let options: Vec<SelectOption> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| SelectOption {
                        value: s.to_string(),
                        text: s.to_string(),
                    })
                    .collect();
                let first = options.first().map(|o| o.value.clone()).unwrap_or_default();
                setting.options = Some(options);
                setting.with_default(json!(first))
            }
        };
        settings.push(setting);
    }
    Ok(AnswerValue::Settings(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_standard_question_has_a_label() {
        for name in questions::standard().names() {
            assert_ne!(label(name), "Please enter a value", "no label for {}", name);
        }
    }

    #[test]
    fn test_expert_questions_are_skipped() {
        let graph = questions::standard();
        let settings = graph.branches("adapterSettings").next().unwrap();
        let novice = Answers::new()
            .with("features", vec!["adapter"])
            .with("expert", "no");
        let expert = novice.clone().with("expert", "yes");

        assert!(!should_ask(settings, &novice, false));
        assert!(should_ask(settings, &novice, true));
        assert!(should_ask(settings, &expert, false));
    }

    #[test]
    fn test_inactive_and_answered_are_skipped() {
        let graph = questions::standard();
        let title = graph.branches("title").next().unwrap();
        let widgets = Answers::new().with("features", vec!["vis"]);
        let answered = Answers::new()
            .with("features", vec!["adapter"])
            .with("title", "Weather");

        assert!(!should_ask(title, &widgets, false));
        assert!(!should_ask(title, &answered, false));
    }

    #[test]
    fn test_default_index() {
        let quotes = Question::select("quotes", questions::choices::QUOTES).default_value("double");
        assert_eq!(default_index(&quotes), 1);
        let plain = Question::select("quotes", questions::choices::QUOTES);
        assert_eq!(default_index(&plain), 0);
    }
}
