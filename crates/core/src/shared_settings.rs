// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler settings appended to every parameter-values list.

use crate::parameter::{ParameterValue, ParameterValueEntry};
use crate::record::SharedSettingsRecord;
use serde::{Deserialize, Serialize};

/// State a submitted job starts in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InitialState {
    #[default]
    Ready,
    Suspended,
}

crate::simple_display! {
    InitialState {
        Ready => "READY",
        Suspended => "SUSPENDED",
    }
}

/// Scheduling settings for a job.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedSettings {
    /// Job name override; `None` keeps the configured name.
    pub name: Option<String>,
    pub initial_state: InitialState,
    pub max_failed_tasks_count: u32,
    pub max_retries_per_task: u32,
    pub priority: u32,
}

impl SharedSettings {
    pub const TARGET_TASK_RUN_STATUS: &'static str = "deadline:targetTaskRunStatus";
    pub const MAX_FAILED_TASKS_COUNT: &'static str = "deadline:maxFailedTasksCount";
    pub const MAX_RETRIES_PER_TASK: &'static str = "deadline:maxRetriesPerTask";
    pub const PRIORITY: &'static str = "deadline:priority";

    /// Names of the serialized entries, in emission order.
    pub const PARAMETER_NAMES: [&'static str; 4] = [
        Self::TARGET_TASK_RUN_STATUS,
        Self::MAX_FAILED_TASKS_COUNT,
        Self::MAX_RETRIES_PER_TASK,
        Self::PRIORITY,
    ];

    /// Render the settings as parameter-value entries, always in the same order.
    pub fn serialize(&self) -> Vec<ParameterValueEntry> {
        vec![
            ParameterValueEntry::new(
                Self::TARGET_TASK_RUN_STATUS,
                Some(ParameterValue::String(self.initial_state.to_string())),
            ),
            ParameterValueEntry::new(
                Self::MAX_FAILED_TASKS_COUNT,
                Some(ParameterValue::Int(i64::from(self.max_failed_tasks_count))),
            ),
            ParameterValueEntry::new(
                Self::MAX_RETRIES_PER_TASK,
                Some(ParameterValue::Int(i64::from(self.max_retries_per_task))),
            ),
            ParameterValueEntry::new(
                Self::PRIORITY,
                Some(ParameterValue::Int(i64::from(self.priority))),
            ),
        ]
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        SharedSettings::from(&SharedSettingsRecord::default())
    }
}

impl From<&SharedSettingsRecord> for SharedSettings {
    fn from(record: &SharedSettingsRecord) -> Self {
        let name = match record.name.trim() {
            "" | "Untitled" => None,
            name => Some(name.to_string()),
        };
        SharedSettings {
            name,
            initial_state: record.initial_state,
            max_failed_tasks_count: record.maximum_failed_tasks_count,
            max_retries_per_task: record.maximum_retries_per_task,
            priority: record.priority,
        }
    }
}

#[cfg(test)]
#[path = "shared_settings_tests.rs"]
mod tests;
