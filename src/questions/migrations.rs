//! @acp:module "Answer Migrations"
//! @acp:summary "Per-question inference of answers from an existing project"
//! @acp:domain engine
//! @acp:layer service
//!
//! Each function reads the project through the [`MigrationContext`] and, where
//! it depends on earlier questions, the answers inferred so far. `Ok(None)`
//! leaves the slot to static defaults; malformed manifest fields are errors.

use futures::future::BoxFuture;
use serde_json::Value;

use crate::answers::{AdapterSetting, AnswerValue, Answers, SettingKind};
use crate::error::{Result, ScaffoldError};
use crate::migrate::analyze;
use crate::migrate::manifest::{
    localized_at, person_at, person_from, repository_url, string_at, strings_at,
};
use crate::migrate::{MigrationContext, PathFilter};

type Inferred<'a> = BoxFuture<'a, Result<Option<AnswerValue>>>;

const CONNECTION_STATE_ID: &str = "info.connection";

const RELEASE_SCRIPT: &str = "@alcalzone/release-script";

fn is_typescript(answers: &Answers) -> bool {
    answers.text("language") == Some("TypeScript")
}

fn not_declaration(path: &str) -> bool {
    !path.ends_with(".d.ts")
}

/// Sources of the admin tab: a `tab/` directory or a file named `tab.*`
fn is_tab_source(path: &str) -> bool {
    let mut segments: Vec<&str> = path.split('/').collect();
    let Some(file) = segments.pop() else {
        return false;
    };
    let stem = file.split('.').next().unwrap_or(file);
    stem.eq_ignore_ascii_case("tab") || segments.iter().any(|dir| dir.eq_ignore_ascii_case("tab"))
}

fn is_admin_source(path: &str) -> bool {
    !is_tab_source(path)
}

/// React sources in the admin UI use the language's JSX flavor
fn react_extension(answers: &Answers) -> &'static str {
    if is_typescript(answers) {
        ".tsx"
    } else {
        ".jsx"
    }
}

pub fn features<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let mut features = Vec::new();
        if ctx.directory_exists("admin").await {
            features.push("adapter");
        }
        if ctx.directory_exists("widgets").await {
            features.push("vis");
        }
        Ok(Some(features.into()))
    })
}

pub fn admin_features<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let mut features = Vec::new();
        if ctx.file_exists("admin/custom_m.html").await
            || ctx.file_exists("admin/jsonCustom.json").await
            || ctx.directory_exists("admin/src/custom").await
        {
            features.push("custom");
        }
        if ctx.file_exists("admin/tab_m.html").await || ctx.file_exists("admin/tab.html").await {
            features.push("tab");
        }
        Ok(Some(features.into()))
    })
}

pub fn adapter_type<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(string_at(ctx.io_package_json(), "/common/type", "type")?.map(AnswerValue::from))
    })
}

pub fn widget_type<'a>(_: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move { Ok(Some(AnswerValue::from("visualization-widgets"))) })
}

pub fn start_mode<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(string_at(ctx.io_package_json(), "/common/mode", "startMode")?.map(AnswerValue::from))
    })
}

pub fn connection_type<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(
            string_at(ctx.io_package_json(), "/common/connectionType", "connectionType")?
                .map(AnswerValue::from),
        )
    })
}

pub fn data_source<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(string_at(ctx.io_package_json(), "/common/dataSource", "dataSource")?.map(AnswerValue::from))
    })
}

pub fn connection_indicator<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let found = match ctx.io_package_json().get("instanceObjects") {
            None | Some(Value::Null) => false,
            Some(Value::Array(objects)) => objects
                .iter()
                .any(|o| o.get("_id").and_then(Value::as_str) == Some(CONNECTION_STATE_ID)),
            Some(other) => {
                return Err(ScaffoldError::inference(
                    "connectionIndicator",
                    format!("expected an array at /instanceObjects, found {}", other),
                ))
            }
        };
        Ok(Some(AnswerValue::yes_no(found)))
    })
}

pub fn adapter_name<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(string_at(ctx.io_package_json(), "/common/name", "adapterName")?.map(AnswerValue::from))
    })
}

pub fn title<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let io = ctx.io_package_json();
        let title = match localized_at(io, "/common/titleLang", "title")? {
            Some(title) => Some(title),
            None => string_at(io, "/common/title", "title")?,
        };
        Ok(title.map(AnswerValue::from))
    })
}

pub fn description<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let description = match localized_at(ctx.io_package_json(), "/common/desc", "description")? {
            Some(desc) => Some(desc),
            None => string_at(ctx.package_json(), "/description", "description")?,
        };
        Ok(description.map(AnswerValue::from))
    })
}

pub fn keywords<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let keywords = match strings_at(ctx.io_package_json(), "/common/keywords", "keywords")? {
            Some(keywords) => Some(keywords),
            None => strings_at(ctx.package_json(), "/keywords", "keywords")?,
        };
        Ok(keywords
            .filter(|k| !k.is_empty())
            .map(|k| AnswerValue::from(k.join(", "))))
    })
}

pub fn contributors<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let names = match ctx.package_json().get("contributors") {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Array(people)) => people
                .iter()
                .map(|p| person_from(p, "/contributors", "contributors"))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .filter_map(|p| p.name)
                .collect::<Vec<_>>(),
            Some(other) => {
                return Err(ScaffoldError::inference(
                    "contributors",
                    format!("expected an array at /contributors, found {}", other),
                ))
            }
        };
        Ok((!names.is_empty()).then(|| AnswerValue::from(names.join(", "))))
    })
}

/// A migrated project is described completely, as an expert would
pub fn expert<'a>(_: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move { Ok(Some(AnswerValue::yes_no(true))) })
}

pub fn language<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let filter: &PathFilter = &not_declaration;
        let typescript = ctx.directory_exists("src").await
            && ctx.has_files_with_extension("src", ".ts", Some(filter)).await?;
        Ok(Some(AnswerValue::from(if typescript {
            "TypeScript"
        } else {
            "JavaScript"
        })))
    })
}

fn setting_from_native(key: &str, value: &Value) -> AdapterSetting {
    let kind = match value {
        Value::Bool(_) => SettingKind::Checkbox,
        Value::Number(_) => SettingKind::Number,
        _ => SettingKind::Text,
    };
    let default = match value {
        Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
        Value::Null => Value::String(String::new()),
        other => Value::String(other.to_string()),
    };
    AdapterSetting::new(key, kind).with_default(default)
}

pub fn adapter_settings<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        match ctx.io_package_json().get("native") {
            None | Some(Value::Null) => Ok(Some(AnswerValue::Settings(Vec::new()))),
            Some(Value::Object(native)) => Ok(Some(AnswerValue::Settings(
                native
                    .iter()
                    .map(|(key, value)| setting_from_native(key, value))
                    .collect(),
            ))),
            Some(other) => Err(ScaffoldError::inference(
                "adapterSettings",
                format!("expected an object at /native, found {}", other),
            )),
        }
    })
}

pub fn tools<'a>(ctx: &'a dyn MigrationContext, answers: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let mut tools = Vec::new();
        if ctx.has_dev_dependency("eslint") {
            tools.push("ESLint");
        }
        if ctx.has_dev_dependency("prettier") {
            tools.push("Prettier");
        }
        // TypeScript sources are always type checked; JavaScript opts in
        if !is_typescript(answers) && ctx.has_dev_dependency("typescript") {
            tools.push("type checking");
        }
        if ctx.has_dev_dependency("nyc") {
            tools.push("code coverage");
        }
        if ctx.directory_exists(".devcontainer").await {
            tools.push("devcontainer");
        }
        Ok(Some(tools.into()))
    })
}

pub fn release_script<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move { Ok(Some(AnswerValue::yes_no(ctx.has_dev_dependency(RELEASE_SCRIPT)))) })
}

pub fn indentation<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let tabs = ctx.analyze_code("\t", "    ").await?;
        Ok(Some(AnswerValue::from(if tabs { "Tab" } else { "Space (4)" })))
    })
}

pub fn quotes<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let double = ctx.analyze_code("\"", "'").await?;
        Ok(Some(AnswerValue::from(if double { "double" } else { "single" })))
    })
}

pub fn es6class<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let content = ctx.main_file_content().await?;
        Ok(Some(AnswerValue::yes_no(analyze::has_class_declaration(&content))))
    })
}

pub fn admin_react<'a>(ctx: &'a dyn MigrationContext, answers: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let filter: &PathFilter = &is_admin_source;
        let react = ctx
            .has_files_with_extension("admin/src", react_extension(answers), Some(filter))
            .await?;
        Ok(Some(AnswerValue::yes_no(react)))
    })
}

pub fn tab_react<'a>(ctx: &'a dyn MigrationContext, answers: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let filter: &PathFilter = &is_tab_source;
        let react = ctx
            .has_files_with_extension("admin/src", react_extension(answers), Some(filter))
            .await?;
        Ok(Some(AnswerValue::yes_no(react)))
    })
}

pub fn author_name<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(person_at(ctx.package_json(), "/author", "authorName")?
            .and_then(|p| p.name)
            .map(AnswerValue::from))
    })
}

pub fn author_github<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(repository_url(ctx.package_json(), "authorGithub")?
            .and_then(|url| analyze::github_owner(&url))
            .map(AnswerValue::from))
    })
}

pub fn author_email<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(person_at(ctx.package_json(), "/author", "authorEmail")?
            .and_then(|p| p.email)
            .map(AnswerValue::from))
    })
}

pub fn git_remote_protocol<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(repository_url(ctx.package_json(), "gitRemoteProtocol")?.map(|url| {
            AnswerValue::from(if url.starts_with("git@") { "SSH" } else { "HTTPS" })
        }))
    })
}

/// Migrated sources are already committed
pub fn git_commit<'a>(_: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move { Ok(Some(AnswerValue::yes_no(false))) })
}

pub fn license<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        let package = ctx.package_json();
        let license = match string_at(package, "/license", "license")? {
            Some(license) => Some(license),
            None => string_at(package, "/licenses/0/type", "license")?,
        };
        Ok(license.map(AnswerValue::from))
    })
}

pub fn dependabot<'a>(ctx: &'a dyn MigrationContext, _: &'a Answers) -> Inferred<'a> {
    Box::pin(async move {
        Ok(Some(AnswerValue::yes_no(
            ctx.file_exists(".github/dependabot.yml").await,
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::MemoryProject;
    use serde_json::json;

    #[tokio::test]
    async fn test_connection_indicator() {
        let with = MemoryProject::new(
            json!({}),
            json!({ "instanceObjects": [{ "_id": "info" }, { "_id": "info.connection" }] }),
        );
        let without = MemoryProject::new(json!({}), json!({ "instanceObjects": [] }));
        let broken = MemoryProject::new(json!({}), json!({ "instanceObjects": {} }));
        let empty = Answers::new();

        assert_eq!(
            connection_indicator(&with, &empty).await.unwrap(),
            Some(AnswerValue::from("yes"))
        );
        assert_eq!(
            connection_indicator(&without, &empty).await.unwrap(),
            Some(AnswerValue::from("no"))
        );
        assert!(connection_indicator(&broken, &empty).await.is_err());
    }

    #[tokio::test]
    async fn test_language_ignores_declaration_files() {
        let empty = Answers::new();
        let declarations = MemoryProject::default().with_file("src/types.d.ts", "");
        let sources = MemoryProject::default().with_file("src/main.ts", "");

        assert_eq!(
            language(&declarations, &empty).await.unwrap(),
            Some(AnswerValue::from("JavaScript"))
        );
        assert_eq!(
            language(&sources, &empty).await.unwrap(),
            Some(AnswerValue::from("TypeScript"))
        );
    }

    #[tokio::test]
    async fn test_admin_react_depends_on_language() {
        let project = MemoryProject::default().with_file("admin/src/app.tsx", "");
        let ts = Answers::new().with("language", "TypeScript");
        let js = Answers::new().with("language", "JavaScript");

        assert_eq!(admin_react(&project, &ts).await.unwrap(), Some(AnswerValue::from("yes")));
        assert_eq!(admin_react(&project, &js).await.unwrap(), Some(AnswerValue::from("no")));
        assert_eq!(tab_react(&project, &ts).await.unwrap(), Some(AnswerValue::from("no")));

        let tab = project.with_file("admin/src/tab/TabApp.tsx", "");
        assert_eq!(tab_react(&tab, &ts).await.unwrap(), Some(AnswerValue::from("yes")));
    }

    #[test]
    fn test_tab_sources() {
        assert!(is_tab_source("admin/src/tab.jsx"));
        assert!(is_tab_source("admin/src/tab/TabApp.tsx"));
        assert!(is_tab_source("admin/src/Tab.tsx"));
        assert!(!is_tab_source("admin/src/components/Table.jsx"));
        assert!(!is_tab_source("admin/src/tabs.jsx"));
        assert!(!is_tab_source("admin/src/app.jsx"));
    }

    #[tokio::test]
    async fn test_tab_react_only() {
        let project = MemoryProject::default()
            .with_file("admin/index_m.html", "")
            .with_file("admin/tab_m.html", "")
            .with_file("admin/src/tab.jsx", "");
        let js = Answers::new().with("language", "JavaScript");

        assert_eq!(admin_react(&project, &js).await.unwrap(), Some(AnswerValue::from("no")));
        assert_eq!(tab_react(&project, &js).await.unwrap(), Some(AnswerValue::from("yes")));
    }

    #[tokio::test]
    async fn test_admin_react_only() {
        let project = MemoryProject::default()
            .with_file("admin/src/app.jsx", "")
            .with_file("admin/src/components/Table.jsx", "");
        let js = Answers::new().with("language", "JavaScript");

        assert_eq!(admin_react(&project, &js).await.unwrap(), Some(AnswerValue::from("yes")));
        assert_eq!(tab_react(&project, &js).await.unwrap(), Some(AnswerValue::from("no")));
    }

    #[tokio::test]
    async fn test_admin_features() {
        let empty = Answers::new();
        let react_custom = MemoryProject::default().with_file("admin/src/custom/index.jsx", "");
        let json_custom = MemoryProject::default()
            .with_file("admin/jsonCustom.json", "{}")
            .with_file("admin/tab.html", "");

        assert_eq!(
            admin_features(&react_custom, &empty).await.unwrap(),
            Some(AnswerValue::from(vec!["custom"]))
        );
        assert_eq!(
            admin_features(&json_custom, &empty).await.unwrap(),
            Some(AnswerValue::from(vec!["custom", "tab"]))
        );
        assert_eq!(
            admin_features(&MemoryProject::default(), &empty).await.unwrap(),
            Some(AnswerValue::List(vec![]))
        );
    }

    #[tokio::test]
    async fn test_author_and_repository() {
        let project = MemoryProject::new(
            json!({
                "author": { "name": "Jane Doe", "email": "jane@example.com" },
                "repository": { "type": "git", "url": "git@github.com:janedoe/weather.git" }
            }),
            json!({}),
        );
        let empty = Answers::new();
        assert_eq!(author_name(&project, &empty).await.unwrap(), Some("Jane Doe".into()));
        assert_eq!(author_email(&project, &empty).await.unwrap(), Some("jane@example.com".into()));
        assert_eq!(author_github(&project, &empty).await.unwrap(), Some("janedoe".into()));
        assert_eq!(git_remote_protocol(&project, &empty).await.unwrap(), Some("SSH".into()));
    }

    #[tokio::test]
    async fn test_settings_from_native() {
        let project = MemoryProject::new(
            json!({}),
            json!({ "native": { "interval": 30, "useTls": false, "host": "localhost" } }),
        );
        let value = adapter_settings(&project, &Answers::new()).await.unwrap().unwrap();
        let settings = value.as_settings().unwrap();

        let kinds: Vec<(&str, SettingKind)> = settings
            .iter()
            .map(|s| (s.key.as_str(), s.input_type))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("host", SettingKind::Text),
                ("interval", SettingKind::Number),
                ("useTls", SettingKind::Checkbox),
            ]
        );
    }

    #[tokio::test]
    async fn test_wrong_manifest_shape_fails() {
        let project = MemoryProject::new(json!({}), json!({ "common": { "type": 42 } }));
        let err = adapter_type(&project, &Answers::new()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot infer answer \"type\": expected a string at /common/type, found 42"
        );
    }

    #[tokio::test]
    async fn test_keywords_and_contributors() {
        let project = MemoryProject::new(
            json!({ "keywords": ["weather", "forecast"], "contributors": ["Max <max@example.com>", { "name": "Eva" }] }),
            json!({}),
        );
        let empty = Answers::new();
        assert_eq!(keywords(&project, &empty).await.unwrap(), Some("weather, forecast".into()));
        assert_eq!(contributors(&project, &empty).await.unwrap(), Some("Max, Eva".into()));
    }
}
