//! @acp:module "Manifest Fields"
//! @acp:summary "Typed access to nested manifest fields for migration functions"
//! @acp:domain engine
//! @acp:layer logic
//!
//! Absent or `null` fields read as `None`. A field that is present with the
//! wrong shape is a malformed manifest and fails the inference of the
//! question that asked for it.

use serde_json::Value;

use crate::error::{Result, ScaffoldError};

fn present<'a>(doc: &'a Value, pointer: &str) -> Option<&'a Value> {
    doc.pointer(pointer).filter(|v| !v.is_null())
}

/// String at a JSON pointer
pub fn string_at(doc: &Value, pointer: &str, question: &str) -> Result<Option<String>> {
    match present(doc, pointer) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ScaffoldError::inference(
            question,
            format!("expected a string at {}, found {}", pointer, other),
        )),
    }
}

/// Boolean at a JSON pointer
pub fn bool_at(doc: &Value, pointer: &str, question: &str) -> Result<Option<bool>> {
    match present(doc, pointer) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(ScaffoldError::inference(
            question,
            format!("expected a boolean at {}, found {}", pointer, other),
        )),
    }
}

/// Plain string or a translation object; English wins, then any translation
pub fn localized_at(doc: &Value, pointer: &str, question: &str) -> Result<Option<String>> {
    match present(doc, pointer) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Object(translations)) => Ok(translations
            .get("en")
            .or_else(|| translations.values().next())
            .and_then(Value::as_str)
            .map(str::to_string)),
        Some(other) => Err(ScaffoldError::inference(
            question,
            format!("expected a string or translations at {}, found {}", pointer, other),
        )),
    }
}

/// Array of strings at a JSON pointer
pub fn strings_at(doc: &Value, pointer: &str, question: &str) -> Result<Option<Vec<String>>> {
    match present(doc, pointer) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ScaffoldError::inference(
                        question,
                        format!("expected only strings in {}, found {}", pointer, item),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(other) => Err(ScaffoldError::inference(
            question,
            format!("expected an array at {}, found {}", pointer, other),
        )),
    }
}

/// Person field in either object form or `"Name <email> (url)"` form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Person {
    fn parse(text: &str) -> Self {
        let (name_part, rest) = match text.find('<') {
            Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
            None => (text.split('(').next().unwrap_or(text), None),
        };
        let name = name_part.trim();
        let email = rest
            .and_then(|r| r.split('>').next())
            .map(str::trim)
            .filter(|e| !e.is_empty());
        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            email: email.map(str::to_string),
        }
    }
}

pub fn person_from(value: &Value, pointer: &str, question: &str) -> Result<Person> {
    match value {
        Value::String(s) => Ok(Person::parse(s)),
        Value::Object(fields) => Ok(Person {
            name: fields.get("name").and_then(Value::as_str).map(str::to_string),
            email: fields.get("email").and_then(Value::as_str).map(str::to_string),
        }),
        other => Err(ScaffoldError::inference(
            question,
            format!("expected a person at {}, found {}", pointer, other),
        )),
    }
}

pub fn person_at(doc: &Value, pointer: &str, question: &str) -> Result<Option<Person>> {
    present(doc, pointer)
        .map(|value| person_from(value, pointer, question))
        .transpose()
}

/// `repository` as a URL string or `{ "url": ... }`
pub fn repository_url(package: &Value, question: &str) -> Result<Option<String>> {
    match present(package, "/repository") {
        Some(Value::String(_)) => string_at(package, "/repository", question),
        _ => string_at(package, "/repository/url", question),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_at() {
        let doc = json!({ "common": { "type": "weather", "mode": null, "enabled": true } });
        assert_eq!(
            string_at(&doc, "/common/type", "type").unwrap().as_deref(),
            Some("weather")
        );
        assert_eq!(string_at(&doc, "/common/mode", "startMode").unwrap(), None);
        assert_eq!(string_at(&doc, "/common/none", "x").unwrap(), None);

        let err = string_at(&doc, "/common/enabled", "x").unwrap_err();
        assert!(err.to_string().contains("expected a string"));
    }

    #[test]
    fn test_localized_at_prefers_english() {
        let doc = json!({ "common": { "desc": { "de": "Wetter", "en": "Weather" }, "title": "Plain" } });
        assert_eq!(
            localized_at(&doc, "/common/desc", "description").unwrap().as_deref(),
            Some("Weather")
        );
        assert_eq!(
            localized_at(&doc, "/common/title", "title").unwrap().as_deref(),
            Some("Plain")
        );
    }

    #[test]
    fn test_strings_at_rejects_mixed_arrays() {
        let doc = json!({ "ok": ["a", "b"], "bad": ["a", 1] });
        assert_eq!(
            strings_at(&doc, "/ok", "keywords").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(strings_at(&doc, "/bad", "keywords").is_err());
    }

    #[test]
    fn test_person_forms() {
        let doc = json!({
            "author": "Jane Doe <jane@example.com> (https://example.com)",
            "maintainer": { "name": "John", "email": "john@example.com" },
            "plain": "Solo Dev (https://solo.dev)"
        });
        assert_eq!(
            person_at(&doc, "/author", "authorName").unwrap(),
            Some(Person {
                name: Some("Jane Doe".into()),
                email: Some("jane@example.com".into()),
            })
        );
        assert_eq!(
            person_at(&doc, "/maintainer", "authorName").unwrap().unwrap().email.as_deref(),
            Some("john@example.com")
        );
        assert_eq!(
            person_at(&doc, "/plain", "authorName").unwrap().unwrap().name.as_deref(),
            Some("Solo Dev")
        );
    }

    #[test]
    fn test_repository_url_forms() {
        let short = json!({ "repository": "https://github.com/a/b" });
        let long = json!({ "repository": { "type": "git", "url": "git@github.com:a/b.git" } });
        assert_eq!(repository_url(&short, "x").unwrap().as_deref(), Some("https://github.com/a/b"));
        assert_eq!(repository_url(&long, "x").unwrap().as_deref(), Some("git@github.com:a/b.git"));
        assert_eq!(repository_url(&json!({}), "x").unwrap(), None);
    }
}
