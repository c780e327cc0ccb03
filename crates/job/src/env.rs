// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the job crate.

use crate::error::JobError;
use std::path::PathBuf;

/// Submitter label used when `FARM_SUBMITTER_NAME` is unset.
pub const DEFAULT_SUBMITTER: &str = "Unreal";

/// Resolve the bundle history root:
/// FARM_HISTORY_DIR > XDG_STATE_HOME/farm/job_history > ~/.local/state/farm/job_history
pub fn history_dir() -> Result<PathBuf, JobError> {
    if let Some(dir) = non_empty("FARM_HISTORY_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("farm/job_history"));
    }
    let home = dirs::home_dir().ok_or(JobError::NoHistoryDir)?;
    Ok(home.join(".local/state/farm/job_history"))
}

/// Submitter label written into bundle directory names.
pub fn submitter_name() -> String {
    non_empty("FARM_SUBMITTER_NAME").unwrap_or_else(|| DEFAULT_SUBMITTER.to_string())
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
