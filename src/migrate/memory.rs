//! @acp:module "In-Memory Project"
//! @acp:summary "MigrationContext over files and manifests held in memory"
//! @acp:domain engine
//! @acp:layer service

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::analyze;
use super::context::{MigrationContext, PathFilter};
use crate::error::{Result, ScaffoldError};

/// @acp:summary "Project fixture: relative path -> file content, plus both manifests"
#[derive(Debug, Clone)]
pub struct MemoryProject {
    package: Value,
    io_package: Value,
    files: BTreeMap<String, String>,
    directories: BTreeSet<String>,
}

impl Default for MemoryProject {
    fn default() -> Self {
        Self {
            package: json!({}),
            io_package: json!({}),
            files: BTreeMap::new(),
            directories: BTreeSet::new(),
        }
    }
}

/// Lookup form of a relative path: no leading `./`, no trailing `/`
fn normalize(path: &str) -> &str {
    path.trim_start_matches("./").trim_end_matches('/')
}

impl MemoryProject {
    pub fn new(package: Value, io_package: Value) -> Self {
        Self {
            package,
            io_package,
            ..Self::default()
        }
    }

    /// Add a file; its parent directories come into existence with it
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        let path = normalize(path).to_string();
        let mut parent = path.as_str();
        while let Some(idx) = parent.rfind('/') {
            parent = &parent[..idx];
            self.directories.insert(parent.to_string());
        }
        self.files.insert(path, content.to_string());
        self
    }

    /// Add an empty directory
    pub fn with_dir(mut self, path: &str) -> Self {
        self.directories
            .insert(normalize(path).to_string());
        self
    }

    fn files_under<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = (&'a String, &'a String)> + 'a {
        let prefix = format!("{}/", normalize(dir));
        self.files
            .iter()
            .filter(move |(path, _)| path.starts_with(&prefix))
    }
}

#[async_trait]
impl MigrationContext for MemoryProject {
    fn package_json(&self) -> &Value {
        &self.package
    }

    fn io_package_json(&self) -> &Value {
        &self.io_package
    }

    async fn file_exists(&self, path: &str) -> bool {
        self.files.contains_key(normalize(path))
    }

    async fn directory_exists(&self, path: &str) -> bool {
        self.directories.contains(normalize(path))
    }

    async fn has_files_with_extension(
        &self,
        dir: &str,
        extension: &str,
        filter: Option<&PathFilter>,
    ) -> Result<bool> {
        Ok(self.files_under(dir).any(|(path, _)| {
            path.ends_with(extension)
                && !path.split('/').any(analyze::is_ignored_dir)
                && filter.map(|f| f(path.as_str())).unwrap_or(true)
        }))
    }

    async fn analyze_code(&self, either: &str, or: &str) -> Result<bool> {
        let entry = analyze::entry_point(&self.package, |p| self.files.contains_key(p));
        let sources = self.files.iter().filter_map(|(path, content)| {
            let in_source_dir = analyze::SOURCE_DIRS
                .iter()
                .any(|dir| path.starts_with(&format!("{}/", dir)));
            ((in_source_dir || *path == entry) && analyze::is_code_file(path))
                .then_some(content.as_str())
        });
        Ok(analyze::favors(sources, either, or))
    }

    async fn main_file_content(&self) -> Result<String> {
        let entry = analyze::entry_point(&self.package, |p| self.files.contains_key(p));
        self.files.get(&entry).cloned().ok_or_else(|| {
            ScaffoldError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("entry point {} not found", entry),
            ))
        })
    }
}
