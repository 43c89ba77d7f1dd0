//! @acp:module "Standard Questions"
//! @acp:summary "The adapter creator's question graph with validators, transforms and migrations"
//! @acp:domain engine
//! @acp:layer model
//!
//! ## Overview
//!
//! [`standard`] declares the full question set in asking order. Everything
//! beyond the project features is gated on the adapter feature, and `type`
//! has two branches: the adapter type vocabulary when the adapter feature is
//! selected, the widget type otherwise.

pub mod choices;
pub mod migrations;
pub mod transforms;
pub mod validators;

use serde_json::json;

use crate::answers::{AdapterSetting, AnswerValue, SettingKind};
use crate::graph::{Condition, Question, QuestionGraph, QuestionKind};

fn is_adapter() -> Condition {
    Condition::contains("features", "adapter")
}

/// Sample settings offered to new adapters
pub fn default_settings() -> AnswerValue {
    AnswerValue::Settings(vec![
        AdapterSetting::new("option1", SettingKind::Checkbox).with_default(json!(true)),
        AdapterSetting::new("option2", SettingKind::Text).with_default(json!("42")),
    ])
}

/// Question graph of the adapter creator
pub fn standard() -> QuestionGraph {
    QuestionGraph::new(vec![
        Question::multi_select("features", choices::FEATURES)
            .validate(validators::features)
            .migrate(migrations::features),
        Question::multi_select("adminFeatures", choices::ADMIN_FEATURES)
            .when(is_adapter())
            .optional()
            .validate(validators::admin_features)
            .migrate(migrations::admin_features),
        Question::select("type", choices::ADAPTER_TYPES)
            .when(is_adapter())
            .validate(validators::adapter_type)
            .migrate(migrations::adapter_type),
        Question::select("type", choices::WIDGET_TYPES)
            .when(Condition::excludes("features", "adapter"))
            .validate(validators::widget_type)
            .migrate(migrations::widget_type),
        Question::select("startMode", choices::START_MODES)
            .when(is_adapter())
            .validate(validators::start_mode)
            .migrate(migrations::start_mode),
        Question::select("connectionType", choices::CONNECTION_TYPES)
            .when(is_adapter())
            .validate(validators::connection_type)
            .migrate(migrations::connection_type),
        Question::select("dataSource", choices::DATA_SOURCES)
            .when(is_adapter())
            .validate(validators::data_source)
            .migrate(migrations::data_source),
        Question::yes_no("connectionIndicator")
            .when(is_adapter())
            .validate(validators::yes_no)
            .migrate(migrations::connection_indicator),
        Question::input("adapterName")
            .validate(validators::adapter_name)
            .transform(transforms::adapter_name)
            .migrate(migrations::adapter_name),
        Question::input("title")
            .when(is_adapter())
            .validate(validators::title)
            .transform(transforms::trim)
            .migrate(migrations::title),
        Question::input("description")
            .optional()
            .transform(transforms::trim)
            .migrate(migrations::description),
        Question::input("keywords")
            .optional()
            .transform(transforms::comma_list)
            .migrate(migrations::keywords),
        Question::input("contributors")
            .optional()
            .expert_only()
            .transform(transforms::comma_list)
            .migrate(migrations::contributors),
        Question::yes_no("expert")
            .default_value("no")
            .validate(validators::yes_no)
            .migrate(migrations::expert),
        Question::select("language", choices::LANGUAGES)
            .when(is_adapter())
            .validate(validators::language)
            .migrate(migrations::language),
        Question::new("adapterSettings", QuestionKind::SettingsList)
            .when(is_adapter())
            .expert_only()
            .default_value(default_settings())
            .validate(validators::adapter_settings)
            .migrate(migrations::adapter_settings),
        Question::multi_select("tools", choices::TOOLS)
            .when(is_adapter())
            .optional()
            .validate(validators::tools)
            .migrate(migrations::tools),
        Question::yes_no("releaseScript")
            .when(is_adapter())
            .expert_only()
            .default_value("no")
            .validate(validators::yes_no)
            .migrate(migrations::release_script),
        Question::select("indentation", choices::INDENTATION)
            .when(is_adapter())
            .validate(validators::indentation)
            .migrate(migrations::indentation),
        Question::select("quotes", choices::QUOTES)
            .when(is_adapter())
            .validate(validators::quotes)
            .migrate(migrations::quotes),
        Question::yes_no("es6class")
            .when(is_adapter())
            .when(Condition::equals("language", "JavaScript"))
            .expert_only()
            .default_value("yes")
            .validate(validators::yes_no)
            .migrate(migrations::es6class),
        Question::yes_no("adminReact")
            .when(is_adapter())
            .validate(validators::yes_no)
            .migrate(migrations::admin_react),
        Question::yes_no("tabReact")
            .when(is_adapter())
            .when(Condition::contains("adminFeatures", "tab"))
            .validate(validators::yes_no)
            .migrate(migrations::tab_react),
        Question::input("authorName")
            .validate(validators::author_name)
            .transform(transforms::trim)
            .migrate(migrations::author_name),
        Question::input("authorGithub")
            .validate(validators::author_github)
            .transform(transforms::trim)
            .migrate(migrations::author_github),
        Question::input("authorEmail")
            .validate(validators::author_email)
            .transform(transforms::trim)
            .migrate(migrations::author_email),
        Question::select("gitRemoteProtocol", choices::GIT_PROTOCOLS)
            .validate(validators::git_protocol)
            .migrate(migrations::git_remote_protocol),
        Question::yes_no("gitCommit")
            .default_value("no")
            .validate(validators::yes_no)
            .migrate(migrations::git_commit),
        Question::select("defaultBranch", choices::DEFAULT_BRANCHES)
            .expert_only()
            .default_value("main")
            .validate(validators::default_branch),
        Question::input("license")
            .validate(validators::license)
            .transform(transforms::trim)
            .migrate(migrations::license),
        Question::yes_no("dependabot")
            .expert_only()
            .default_value("no")
            .validate(validators::yes_no)
            .migrate(migrations::dependabot),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Answers;

    fn adapter_answers() -> Answers {
        Answers::new()
            .with("features", vec!["adapter"])
            .with("adminFeatures", AnswerValue::List(vec![]))
            .with("type", "weather")
            .with("startMode", "daemon")
            .with("connectionType", "cloud")
            .with("dataSource", "poll")
            .with("connectionIndicator", "no")
            .with("adapterName", "weather")
            .with("title", "Weather")
            .with("expert", "no")
            .with("language", "TypeScript")
            .with("indentation", "Tab")
            .with("quotes", "double")
            .with("adminReact", "no")
            .with("authorName", "Jane Doe")
            .with("authorGithub", "janedoe")
            .with("authorEmail", "jane@example.com")
            .with("gitRemoteProtocol", "HTTPS")
            .with("license", "MIT License")
    }

    #[test]
    fn test_declaration_order() {
        let names = standard().names();
        assert_eq!(names.first(), Some(&"features"));
        assert_eq!(names.last(), Some(&"dependabot"));
        let pos = |n: &str| names.iter().position(|x| *x == n).unwrap();
        assert!(pos("language") < pos("es6class"));
        assert!(pos("adminFeatures") < pos("tabReact"));
        assert!(standard().is_multi_branch("type"));
    }

    #[test]
    fn test_defaults_fill_expert_questions() {
        let graph = standard();
        let mut answers = adapter_answers();
        let filled = graph.apply_defaults(&mut answers);

        assert_eq!(
            filled,
            vec!["adapterSettings", "releaseScript", "gitCommit", "defaultBranch", "dependabot"]
        );
        assert_eq!(answers.get("adapterSettings"), Some(&default_settings()));
        // es6class stays inactive for TypeScript
        assert!(!answers.contains("es6class"));
        assert!(graph.check_completeness(&answers).is_ok());
    }

    #[tokio::test]
    async fn test_finalize_normalizes() {
        let graph = standard();
        let mut answers = adapter_answers()
            .with("adapterName", " Weather ")
            .with("keywords", "weather, forecast");
        graph.apply_defaults(&mut answers);

        let resolved = graph.finalize(answers, &[]).await.unwrap();
        assert_eq!(resolved.get("adapterName"), Some(&AnswerValue::from("weather")));
        assert_eq!(
            resolved.get("keywords"),
            Some(&AnswerValue::from(vec!["weather", "forecast"]))
        );
    }

    #[tokio::test]
    async fn test_widget_project_needs_no_adapter_answers() {
        let graph = standard();
        let mut answers = Answers::new()
            .with("features", vec!["vis"])
            .with("type", "visualization-widgets")
            .with("adapterName", "weather-widgets")
            .with("authorName", "Jane Doe")
            .with("authorGithub", "janedoe")
            .with("authorEmail", "jane@example.com")
            .with("gitRemoteProtocol", "SSH")
            .with("license", "MIT License");
        graph.apply_defaults(&mut answers);

        assert!(!answers.contains("adapterSettings"));
        assert!(graph.finalize(answers, &[]).await.is_ok());
    }
}
