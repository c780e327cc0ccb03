// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stored job configuration records.
//!
//! A [`JobRecord`] is the saved, host-independent description of a job:
//! which template files to use and which values to feed them. Records are
//! written as TOML or JSON and turned into entities by the job crate.

use crate::parameter::{ParameterDefinition, ParameterError, ParameterType, StepParameterDefinition};
use crate::shared_settings::InitialState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Registry tag used when a record does not name one.
pub const DEFAULT_KIND: &str = "default";

fn default_kind() -> String {
    DEFAULT_KIND.to_string()
}

/// Supported record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(Format::Toml),
            Some("json") => Some(Format::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported record format: {}", .0.display())]
    UnknownFormat(PathBuf),
    #[error("invalid TOML record: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A job parameter as stored: the value is kept as a raw string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    #[serde(default)]
    pub value: String,
}

impl ParameterRecord {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType, value: impl Into<String>) -> Self {
        Self { name: name.into(), parameter_type, value: value.into() }
    }

    pub fn to_definition(&self) -> Result<ParameterDefinition, ParameterError> {
        ParameterDefinition::from_raw(&self.name, self.parameter_type, &self.value)
    }
}

/// A step parameter as stored: each range entry is a raw string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepParameterRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    #[serde(default)]
    pub range: Vec<String>,
}

impl StepParameterRecord {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType, range: Vec<String>) -> Self {
        Self { name: name.into(), parameter_type, range }
    }

    pub fn to_definition(&self) -> Result<StepParameterDefinition, ParameterError> {
        StepParameterDefinition::from_raw(&self.name, self.parameter_type, &self.range)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub template_path: Option<PathBuf>,
    #[serde(default)]
    pub variables: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub template_path: Option<PathBuf>,
    #[serde(default)]
    pub parameters: Vec<StepParameterRecord>,
    #[serde(default, rename = "environment")]
    pub environments: Vec<EnvironmentRecord>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// Scheduling settings shared by every job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedSettingsRecord {
    pub name: String,
    pub initial_state: InitialState,
    pub maximum_failed_tasks_count: u32,
    pub maximum_retries_per_task: u32,
    pub priority: u32,
}

impl Default for SharedSettingsRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            initial_state: InitialState::Ready,
            maximum_failed_tasks_count: 100,
            maximum_retries_per_task: 5,
            priority: 50,
        }
    }
}

/// Inclusive numeric bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Worker requirements as stored.
///
/// `run_on_all_worker_nodes` disables every other constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRequirementsRecord {
    pub run_on_all_worker_nodes: bool,
    pub operating_system: Option<String>,
    pub cpu_architecture: Option<String>,
    pub cpus: Bounds,
    pub memory_mib: Bounds,
    pub gpus: Bounds,
    pub gpu_memory_mib: Bounds,
    pub scratch_space_gib: Bounds,
}

impl Default for HostRequirementsRecord {
    fn default() -> Self {
        Self {
            run_on_all_worker_nodes: true,
            operating_system: None,
            cpu_architecture: None,
            cpus: Bounds::default(),
            memory_mib: Bounds::default(),
            gpus: Bounds::default(),
            gpu_memory_mib: Bounds::default(),
            scratch_space_gib: Bounds::default(),
        }
    }
}

/// Saved description of a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub template_path: Option<PathBuf>,
    #[serde(default)]
    pub shared_settings: SharedSettingsRecord,
    #[serde(default)]
    pub host_requirements: Option<HostRequirementsRecord>,
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepRecord>,
    #[serde(default, rename = "environment")]
    pub environments: Vec<EnvironmentRecord>,
}

impl JobRecord {
    /// Resolve relative template paths against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        fn resolve(path: &mut Option<PathBuf>, base: &Path) {
            if let Some(p) = path.as_mut() {
                if p.is_relative() && !p.as_os_str().is_empty() {
                    *p = base.join(&*p);
                }
            }
        }
        resolve(&mut self.template_path, base);
        for env in &mut self.environments {
            resolve(&mut env.template_path, base);
        }
        for step in &mut self.steps {
            resolve(&mut step.template_path, base);
            for env in &mut step.environments {
                resolve(&mut env.template_path, base);
            }
        }
    }
}

/// Parse a job record from a string in the given format.
pub fn parse_job_record(content: &str, format: Format) -> Result<JobRecord, RecordError> {
    let record = match format {
        Format::Toml => toml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };
    Ok(record)
}

/// Load a job record from disk, inferring the format from the extension.
///
/// Relative template paths inside the record are resolved against the
/// record's directory.
pub fn load_job_record(path: &Path) -> Result<JobRecord, RecordError> {
    let format = Format::from_path(path).ok_or_else(|| RecordError::UnknownFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path)
        .map_err(|source| RecordError::Io { path: path.to_path_buf(), source })?;
    let mut record = parse_job_record(&content, format)?;
    if let Some(dir) = path.parent() {
        record.resolve_paths(dir);
    }
    Ok(record)
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
