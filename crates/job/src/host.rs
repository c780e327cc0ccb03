// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborators supplied by the host editor.
//!
//! The job crate never talks to the editor or to source control directly;
//! render jobs receive a [`HostProject`] snapshot and trait objects for the
//! queries that need a live host.

use std::path::{Path, PathBuf};

/// Snapshot of the host project taken at submission time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostProject {
    /// The `.uproject` file.
    pub project_file: PathBuf,
    pub project_name: String,
    pub project_dir: PathBuf,
    /// Writable project directory for intermediate files.
    pub saved_dir: PathBuf,
    /// Editor executable that will render on workers.
    pub executable: PathBuf,
    /// Arguments the editor itself was launched with.
    pub inherited_command_line: String,
    /// Arguments the user configured for out-of-process renders.
    pub additional_command_line: String,
}

impl HostProject {
    pub fn config_dir(&self) -> PathBuf {
        self.project_dir.join("Config")
    }

    pub fn binaries_dir(&self) -> PathBuf {
        self.project_dir.join("Binaries")
    }
}

/// Resolves the asset dependency closure of a host asset.
pub trait DependencyCollector: Send + Sync {
    /// Host asset paths (e.g. `/Game/Maps/Main`) the given asset depends on.
    fn collect(&self, asset_path: &str) -> Vec<String>;

    /// Map a host asset path onto the filesystem, if it lives on disk.
    fn to_filesystem_path(&self, asset_path: &str) -> Option<PathBuf>;
}

/// Source-control workspace the project is synced through.
pub trait SourceControl: Send + Sync {
    fn stream_path(&self) -> Option<String>;

    /// Latest submitted changelist; `None` means "latest at sync time".
    fn latest_changelist(&self) -> Option<u64>;

    /// Local root of the client workspace.
    fn client_root(&self) -> Option<PathBuf>;
}

/// Collector for hosts without an asset registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDependencies;

impl DependencyCollector for NoDependencies {
    fn collect(&self, _asset_path: &str) -> Vec<String> {
        Vec::new()
    }

    fn to_filesystem_path(&self, _asset_path: &str) -> Option<PathBuf> {
        None
    }
}

/// `path` relative to `root`, with forward slashes and no leading `/`.
pub fn relative_to_root(path: &Path, root: &Path) -> String {
    let normalize = |p: &Path| p.to_string_lossy().replace('\\', "/");
    let path = normalize(path);
    let root = normalize(root);
    let root = root.trim_end_matches('/');
    path.strip_prefix(root).unwrap_or(&path).trim_start_matches('/').to_string()
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
