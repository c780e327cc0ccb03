// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for bundle specs.

pub use farm_core::{load_job_record, RenderConfiguration, RenderRequestBuilder, Shot};
pub use farm_job::test_support::{
    host_project, JOB_TEMPLATE, RENDER_JOB_TEMPLATE, RENDER_STEP_TEMPLATE, STEP_TEMPLATE,
};
pub use farm_job::{Job, JobHistoryDir, Registry, RenderJob};
pub use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tempfile::TempDir;

/// Scratch project directory holding templates, records and bundle output.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Project { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` at `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    /// Bundle history rooted inside the project.
    pub fn history(&self) -> JobHistoryDir {
        JobHistoryDir::new(self.path().join("history"))
    }

    /// Project path with forward slashes, as it appears in bundle files.
    pub fn slashed(&self, rel: &str) -> String {
        self.path().join(rel).to_string_lossy().replace('\\', "/")
    }
}

pub fn read_yaml(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_yaml::from_str(&content).unwrap()
}

pub fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

/// `name -> value` lookup in a parsed `parameter_values.yaml`.
pub fn parameter_value<'a>(document: &'a Value, name: &str) -> Option<&'a Value> {
    document["parameterValues"]
        .as_sequence()?
        .iter()
        .find(|entry| entry["name"].as_str() == Some(name))
        .map(|entry| &entry["value"])
}

/// Values of a string list under `path` in a parsed `asset_references.yaml`.
pub fn string_list(document: &Value, path: &[&str]) -> Vec<String> {
    let mut node = &document["assetReferences"];
    for key in path {
        node = &node[*key];
    }
    node.as_sequence()
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
