//! @acp:module "Source Heuristics"
//! @acp:summary "Token-frequency and pattern heuristics over project source text"
//! @acp:domain engine
//! @acp:layer logic
//!
//! Shared by every `MigrationContext` implementation so that the filesystem
//! and in-memory views agree on what counts as source code.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// A line that starts a class declaration
static CLASS_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^class\s").expect("valid class pattern"));

/// Owner segment of a GitHub repository URL (https, git+https or ssh form)
static GITHUB_OWNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[/:]([^/]+)/").expect("valid github pattern"));

/// Directories whose content never counts as project source
const IGNORED_DIRS: &[&str] = &["node_modules", "build", "dist", ".git", "coverage"];

/// Directories scanned by code-style analysis, besides the entry point
pub const SOURCE_DIRS: &[&str] = &["lib", "src"];

/// Entry point of TypeScript sources
pub const TYPESCRIPT_ENTRY: &str = "src/main.ts";

pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

/// Whether a relative path names hand-written JavaScript/TypeScript source
pub fn is_code_file(path: &str) -> bool {
    if path.split('/').any(is_ignored_dir) {
        return false;
    }
    if path.ends_with(".d.ts") {
        return false;
    }
    [".js", ".ts", ".jsx", ".tsx"]
        .iter()
        .any(|ext| path.ends_with(ext))
}

/// Resolve the entry-point path of a project.
///
/// TypeScript sources win; otherwise the manifest's `main` field, falling
/// back to `main.js`.
pub fn entry_point(package: &Value, file_exists: impl Fn(&str) -> bool) -> String {
    if file_exists(TYPESCRIPT_ENTRY) {
        return TYPESCRIPT_ENTRY.to_string();
    }
    package
        .get("main")
        .and_then(Value::as_str)
        .map(|main| main.trim_start_matches("./").to_string())
        .unwrap_or_else(|| "main.js".to_string())
}

/// Non-overlapping occurrences of `token` in `text`
pub fn count_occurrences(text: &str, token: &str) -> usize {
    if token.is_empty() {
        return 0;
    }
    text.matches(token).count()
}

/// `true` when `either` occurs at least as often as `or` across `sources`
pub fn favors<'a>(sources: impl IntoIterator<Item = &'a str>, either: &str, or: &str) -> bool {
    let (mut either_count, mut or_count) = (0usize, 0usize);
    for text in sources {
        either_count += count_occurrences(text, either);
        or_count += count_occurrences(text, or);
    }
    tracing::debug!(
        "Code analysis: {:?} x{} vs {:?} x{}",
        either,
        either_count,
        or,
        or_count
    );
    either_count >= or_count
}

pub fn has_class_declaration(content: &str) -> bool {
    CLASS_DECLARATION.is_match(content)
}

pub fn github_owner(url: &str) -> Option<String> {
    GITHUB_OWNER
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_code_file() {
        assert!(is_code_file("main.js"));
        assert!(is_code_file("src/lib/tools.ts"));
        assert!(is_code_file("admin/src/app.tsx"));
        assert!(!is_code_file("src/types.d.ts"));
        assert!(!is_code_file("node_modules/x/index.js"));
        assert!(!is_code_file("build/main.js"));
        assert!(!is_code_file("README.md"));
    }

    #[test]
    fn test_entry_point() {
        let pkg = json!({ "main": "./build/main.js" });
        assert_eq!(entry_point(&pkg, |p| p == TYPESCRIPT_ENTRY), "src/main.ts");
        assert_eq!(entry_point(&pkg, |_| false), "build/main.js");
        assert_eq!(entry_point(&json!({}), |_| false), "main.js");
    }

    #[test]
    fn test_favors_majority_and_ties() {
        let tabs = "\tfoo();\n\tbar();\n";
        let spaces = "    foo();\n";
        assert!(favors([tabs, spaces], "\t", "    "));
        assert!(!favors([spaces], "\t", "    "));
        assert!(favors(std::iter::empty::<&str>(), "\t", "    "));
    }

    #[test]
    fn test_class_declaration_must_start_a_line() {
        assert!(has_class_declaration("'use strict';\nclass Weather extends Adapter {}"));
        assert!(!has_class_declaration("const x = 1; class Weather {}"));
        assert!(!has_class_declaration("// classic adapter\nfunction main() {}"));
    }

    #[test]
    fn test_github_owner() {
        assert_eq!(
            github_owner("https://github.com/jdoe/weather.git").as_deref(),
            Some("jdoe")
        );
        assert_eq!(
            github_owner("git+https://github.com/jdoe/weather").as_deref(),
            Some("jdoe")
        );
        assert_eq!(
            github_owner("git@github.com:jdoe/weather.git").as_deref(),
            Some("jdoe")
        );
        assert_eq!(github_owner("https://gitlab.com/jdoe/weather"), None);
    }
}
