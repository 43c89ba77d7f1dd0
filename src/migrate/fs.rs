//! @acp:module "Filesystem Project"
//! @acp:summary "MigrationContext over an adapter project directory on disk"
//! @acp:domain engine
//! @acp:layer service

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use walkdir::WalkDir;

use super::analyze;
use super::context::{MigrationContext, PathFilter};
use crate::error::{Result, ScaffoldError};

/// Primary package manifest file name
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Adapter manifest file name
pub const ADAPTER_MANIFEST: &str = "io-package.json";

/// @acp:summary "Existing project opened for migration"
#[derive(Debug, Clone)]
pub struct FsProject {
    root: PathBuf,
    package: Value,
    io_package: Value,
}

impl FsProject {
    /// Open a project directory and parse both manifests
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !tokio::fs::metadata(&root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            return Err(ScaffoldError::Other(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let package = read_manifest(&root.join(PACKAGE_MANIFEST)).await?;
        let io_package = read_manifest(&root.join(ADAPTER_MANIFEST)).await?;
        tracing::debug!("Opened project at {}", root.display());

        Ok(Self {
            root,
            package,
            io_package,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn is_file(&self, path: &str) -> bool {
        tokio::fs::metadata(self.root.join(path))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Relative paths of all files under `dir`, skipping dependency and build trees.
    ///
    /// The walk itself is synchronous and runs on the blocking pool.
    async fn files_under(&self, dir: &str) -> Result<Vec<String>> {
        let root = self.root.clone();
        let base = self.root.join(dir);
        tokio::task::spawn_blocking(move || walk_files(&root, &base))
            .await
            .map_err(std::io::Error::from)?
    }

    async fn entry_point(&self) -> String {
        let typescript = self.is_file(analyze::TYPESCRIPT_ENTRY).await;
        analyze::entry_point(&self.package, |p| {
            p == analyze::TYPESCRIPT_ENTRY && typescript
        })
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn walk_files(root: &Path, base: &Path) -> Result<Vec<String>> {
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(base).into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir()
            && analyze::is_ignored_dir(&entry.file_name().to_string_lossy()))
    });
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(relative(root, entry.path()));
        }
    }
    Ok(files)
}

async fn read_manifest(path: &Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ScaffoldError::manifest(path, e.to_string()))?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| ScaffoldError::manifest(path, e.to_string()))?;
    if !value.is_object() {
        return Err(ScaffoldError::manifest(path, "expected a JSON object"));
    }
    Ok(value)
}

#[async_trait]
impl MigrationContext for FsProject {
    fn package_json(&self) -> &Value {
        &self.package
    }

    fn io_package_json(&self) -> &Value {
        &self.io_package
    }

    async fn file_exists(&self, path: &str) -> bool {
        self.is_file(path).await
    }

    async fn directory_exists(&self, path: &str) -> bool {
        tokio::fs::metadata(self.root.join(path))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    async fn has_files_with_extension(
        &self,
        dir: &str,
        extension: &str,
        filter: Option<&PathFilter>,
    ) -> Result<bool> {
        Ok(self.files_under(dir).await?.iter().any(|path| {
            path.ends_with(extension) && filter.map(|f| f(path.as_str())).unwrap_or(true)
        }))
    }

    async fn analyze_code(&self, either: &str, or: &str) -> Result<bool> {
        let mut paths = BTreeSet::new();
        let entry = self.entry_point().await;
        if analyze::is_code_file(&entry) && self.is_file(&entry).await {
            paths.insert(entry);
        }
        for dir in analyze::SOURCE_DIRS {
            paths.extend(
                self.files_under(dir)
                    .await?
                    .into_iter()
                    .filter(|path| analyze::is_code_file(path)),
            );
        }

        let mut sources = Vec::with_capacity(paths.len());
        for path in &paths {
            sources.push(tokio::fs::read_to_string(self.root.join(path)).await?);
        }
        Ok(analyze::favors(sources.iter().map(String::as_str), either, or))
    }

    async fn main_file_content(&self) -> Result<String> {
        let entry = self.entry_point().await;
        Ok(tokio::fs::read_to_string(self.root.join(&entry)).await?)
    }
}
