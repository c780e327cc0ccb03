// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lazy, cached template loading.

use serde::de::DeserializeOwned;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Descriptor file \"{}\" not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid template {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to serialize template: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error(transparent)]
    Parameter(#[from] farm_core::ParameterError),
}

impl TemplateError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TemplateError::NotFound(_))
    }
}

/// Read and parse a YAML template document.
pub fn load_template<T: DeserializeOwned>(path: &Path) -> Result<T, TemplateError> {
    if path.as_os_str().is_empty() || !path.is_file() {
        return Err(TemplateError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|source| TemplateError::Read { path: path.to_path_buf(), source })?;
    let template = serde_yaml::from_str(&content)
        .map_err(|source| TemplateError::Parse { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "loaded template");
    Ok(template)
}

/// Template document behind an entity, parsed on first use.
///
/// A source built with [`TemplateSource::from_template`] never touches disk.
#[derive(Debug, Clone)]
pub struct TemplateSource<T> {
    path: PathBuf,
    cache: OnceCell<T>,
}

impl<T> Default for TemplateSource<T> {
    fn default() -> Self {
        Self { path: PathBuf::new(), cache: OnceCell::new() }
    }
}

impl<T: DeserializeOwned> TemplateSource<T> {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), cache: OnceCell::new() }
    }

    pub fn from_template(template: T) -> Self {
        Self { path: PathBuf::new(), cache: OnceCell::from(template) }
    }

    /// Source for an optional path; `None` behaves like a missing file.
    pub fn from_optional(path: Option<&Path>) -> Self {
        path.map(Self::from_path).unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed template, loading and caching it on first access.
    ///
    /// Failures are not cached: a template that appears later is picked up.
    pub fn get(&self) -> Result<&T, TemplateError> {
        if let Some(template) = self.cache.get() {
            return Ok(template);
        }
        let template = load_template(&self.path)?;
        Ok(self.cache.get_or_init(|| template))
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
