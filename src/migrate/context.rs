//! @acp:module "Migration Context"
//! @acp:summary "Read-only view over an existing project consulted by migration functions"
//! @acp:domain engine
//! @acp:layer service

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Predicate over a project-relative file path (`/`-separated)
pub type PathFilter = dyn Fn(&str) -> bool + Send + Sync;

/// Project view handed to every migration function.
///
/// Implementations are constructed once per migration session by the caller
/// and only read from. Paths are relative to the project root and use `/`.
#[async_trait]
pub trait MigrationContext: Send + Sync {
    /// Parsed primary package manifest (`package.json`)
    fn package_json(&self) -> &Value;

    /// Parsed adapter manifest (`io-package.json`)
    fn io_package_json(&self) -> &Value;

    async fn file_exists(&self, path: &str) -> bool;

    async fn directory_exists(&self, path: &str) -> bool;

    /// Whether `dir` holds, at any depth, a file ending in `extension` that
    /// also passes `filter`
    async fn has_files_with_extension(
        &self,
        dir: &str,
        extension: &str,
        filter: Option<&PathFilter>,
    ) -> Result<bool>;

    /// Compare how often two candidate tokens occur in the project's source
    /// code. `true` favors `either`; ties favor `either`.
    async fn analyze_code(&self, either: &str, or: &str) -> Result<bool>;

    /// Text of the project's entry-point file
    async fn main_file_content(&self) -> Result<String>;

    fn has_dev_dependency(&self, name: &str) -> bool {
        self.package_json()
            .get("devDependencies")
            .and_then(Value::as_object)
            .map(|deps| deps.contains_key(name))
            .unwrap_or(false)
    }
}
