// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render output path resolution.

use crate::error::JobError;
use crate::host::HostProject;
use farm_core::RenderRequest;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Characters rejected in output paths.
pub const INVALID_PATH_CHARS: [char; 6] = ['"', '|', '*', '?', '<', '>'];

/// Regex for `{token}` placeholders.
#[allow(clippy::expect_used)]
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("constant regex pattern is valid"));

pub fn validate_path_characters(path: &str) -> Result<(), JobError> {
    if path.contains(INVALID_PATH_CHARS) {
        return Err(JobError::InvalidPathCharacters(path.to_string()));
    }
    Ok(())
}

/// Values substituted into `{token}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct PathContext {
    values: HashMap<&'static str, String>,
}

impl PathContext {
    pub fn from_request(request: &RenderRequest, host: &HostProject) -> Self {
        let map = asset_name(&request.map_path);
        let values = HashMap::from([
            ("project_dir", host.project_dir.to_string_lossy().replace('\\', "/")),
            ("job_name", request.job_name.clone()),
            ("level", map.clone()),
            ("map", map),
            ("sequence", asset_name(&request.sequence_path)),
        ]);
        PathContext { values }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }
}

/// Last segment of an asset path, without any `.Object` suffix.
fn asset_name(asset_path: &str) -> String {
    let last = asset_path.rsplit('/').next().unwrap_or(asset_path);
    last.split('.').next().unwrap_or(last).to_string()
}

/// Validate `path`, substitute known tokens and drop trailing slashes.
///
/// Unknown tokens are left untouched.
pub fn resolve_output_directory(path: &str, context: &PathContext) -> Result<String, JobError> {
    validate_path_characters(path)?;
    let resolved = TOKEN.replace_all(path, |caps: &Captures| match context.get(&caps[1]) {
        Some(value) => value.to_string(),
        None => caps[0].to_string(),
    });
    Ok(resolved.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
