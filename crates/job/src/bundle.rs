// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job bundle output: directory allocation and the three bundle files.

use crate::env;
use crate::error::JobError;
use chrono::{Local, NaiveDate};
use farm_core::{AssetReferences, ParameterValueEntry};
use farm_template::{template_to_yaml, JobTemplate};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

pub const TEMPLATE_FILE: &str = "template.yaml";
pub const PARAMETER_VALUES_FILE: &str = "parameter_values.yaml";
pub const ASSET_REFERENCES_FILE: &str = "asset_references.yaml";

/// Hands out an empty directory for each bundle.
pub trait BundleSink {
    fn create_bundle_dir(&self, submitter: &str, job_name: &str) -> io::Result<PathBuf>;
}

/// Date-partitioned bundle history on local disk.
///
/// Layout: `<root>/<YYYY-MM>/<YYYY-MM-DD>-<NN>-<submitter>-<name>`, where `NN`
/// counts up from `01` within a day.
#[derive(Debug, Clone)]
pub struct JobHistoryDir {
    root: PathBuf,
}

impl JobHistoryDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JobHistoryDir { root: root.into() }
    }

    /// History rooted where [`env::history_dir`] points.
    pub fn from_env() -> Result<Self, JobError> {
        Ok(JobHistoryDir::new(env::history_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Allocate the bundle directory for `date`.
    ///
    /// Numbers start at two digits and widen past 99.
    pub fn create_dated(
        &self,
        date: NaiveDate,
        submitter: &str,
        job_name: &str,
    ) -> io::Result<PathBuf> {
        let month_dir = self.root.join(date.format("%Y-%m").to_string());
        std::fs::create_dir_all(&month_dir)?;

        let day_prefix = format!("{}-", date.format("%Y-%m-%d"));
        let mut last = 0u32;
        for entry in std::fs::read_dir(&month_dir)? {
            let file_name = entry?.file_name();
            let Some(rest) = file_name.to_str().and_then(|n| n.strip_prefix(&day_prefix)) else {
                continue;
            };
            if let Some(n) = rest.split('-').next().and_then(|n| n.parse::<u32>().ok()) {
                last = last.max(n);
            }
        }

        let dir = month_dir.join(format!(
            "{day_prefix}{:02}-{}-{}",
            last + 1,
            sanitize(submitter),
            sanitize(job_name)
        ));
        // An existing directory belongs to an earlier bundle.
        std::fs::create_dir(&dir)?;
        Ok(dir)
    }
}

impl BundleSink for JobHistoryDir {
    fn create_bundle_dir(&self, submitter: &str, job_name: &str) -> io::Result<PathBuf> {
        self.create_dated(Local::now().date_naive(), submitter, job_name)
    }
}

/// Keep ASCII alphanumerics, `-` and `_`; everything else becomes `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParameterValuesDocument<'a> {
    parameter_values: &'a [ParameterValueEntry],
}

fn write_file(dir: &Path, name: &str, content: &str) -> Result<(), JobError> {
    let path = dir.join(name);
    std::fs::write(&path, content).map_err(|source| JobError::Write { path, source })
}

/// Write `template.yaml`, `parameter_values.yaml` and `asset_references.yaml`
/// into a fresh directory from `sink`; returns that directory.
pub fn write_job_bundle(
    sink: &dyn BundleSink,
    template: &JobTemplate,
    parameter_values: &[ParameterValueEntry],
    asset_references: &AssetReferences,
) -> Result<PathBuf, JobError> {
    let dir = sink.create_bundle_dir(&env::submitter_name(), &template.name)?;

    write_file(&dir, TEMPLATE_FILE, &template_to_yaml(template)?)?;
    let values = ParameterValuesDocument { parameter_values };
    write_file(&dir, PARAMETER_VALUES_FILE, &serde_yaml::to_string(&values)?)?;
    write_file(
        &dir,
        ASSET_REFERENCES_FILE,
        &serde_yaml::to_string(&asset_references.to_document())?,
    )?;

    tracing::info!(path = %dir.display(), "job bundle written");
    Ok(dir)
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
