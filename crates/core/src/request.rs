// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime render requests.
//!
//! A [`RenderRequest`] is what the host hands over at submission time: the
//! queued render (shots, sequence, map, configuration) plus per-submission
//! overrides layered on top of the stored [`JobRecord`](crate::record::JobRecord).

use crate::record::{
    HostRequirementsRecord, ParameterRecord, SharedSettingsRecord, StepParameterRecord,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub name: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn enabled() -> bool {
    true
}

impl Shot {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self { name: name.into(), enabled }
    }
}

/// Render settings taken from the queued configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfiguration {
    pub command_line_args: String,
    pub device_profile_cvars: Vec<String>,
    pub exec_cmds: Vec<String>,
    /// Output directory; may contain `{token}` placeholders.
    pub output_directory: String,
}

/// Extra files and directories the submitter attached by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachments {
    pub input_files: Vec<String>,
    pub input_directories: Vec<String>,
    pub output_directories: Vec<String>,
}

/// Job-wide overrides chosen for one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetOverrides {
    pub shared_settings: Option<SharedSettingsRecord>,
    pub host_requirements: Option<HostRequirementsRecord>,
    pub attachments: Attachments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentOverride {
    pub name: String,
    #[serde(default)]
    pub variables: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOverride {
    pub name: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub environment_overrides: Vec<EnvironmentOverride>,
    #[serde(default)]
    pub parameters: Vec<StepParameterRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub job_name: String,
    #[serde(default)]
    pub shots: Vec<Shot>,
    /// Host asset path of the level sequence to render.
    #[serde(default)]
    pub sequence_path: String,
    /// Host asset path of the level (map).
    #[serde(default)]
    pub map_path: String,
    #[serde(default)]
    pub configuration_path: Option<String>,
    #[serde(default)]
    pub queue_asset_path: Option<String>,
    #[serde(default)]
    pub manifest_path: Option<String>,
    #[serde(default)]
    pub configuration: RenderConfiguration,
    #[serde(default)]
    pub parameter_overrides: Vec<ParameterRecord>,
    #[serde(default)]
    pub preset_overrides: PresetOverrides,
    #[serde(default)]
    pub step_overrides: Vec<StepOverride>,
    #[serde(default)]
    pub environment_overrides: Vec<EnvironmentOverride>,
}

impl RenderRequest {
    pub fn enabled_shot_count(&self) -> usize {
        self.shots.iter().filter(|s| s.enabled).count()
    }

    pub fn step_override(&self, name: &str) -> Option<&StepOverride> {
        self.step_overrides.iter().find(|o| o.name == name)
    }

    pub fn environment_override(&self, name: &str) -> Option<&EnvironmentOverride> {
        self.environment_overrides.iter().find(|o| o.name == name)
    }
}

crate::builder! {
    pub struct RenderRequestBuilder => RenderRequest {
        into {
            job_name: String = "Render",
            sequence_path: String = "/Game/Cinematics/Seq",
            map_path: String = "/Game/Maps/Main",
        }
        set {
            shots: Vec<Shot> = vec![Shot::new("shot_0010", true)],
            configuration: RenderConfiguration = RenderConfiguration::default(),
            parameter_overrides: Vec<ParameterRecord> = Vec::new(),
            preset_overrides: PresetOverrides = PresetOverrides::default(),
            step_overrides: Vec<StepOverride> = Vec::new(),
            environment_overrides: Vec<EnvironmentOverride> = Vec::new(),
        }
        option {
            configuration_path: String = None,
            queue_asset_path: String = None,
            manifest_path: String = None,
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
