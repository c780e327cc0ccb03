// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative job, step and environment template documents.

use farm_core::{
    HostRequirements, ParameterDefinition, ParameterType, ParameterValue, StepParameterDefinition,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Template specification version written into every built job.
pub const JOB_TEMPLATE_VERSION: &str = "jobtemplate-2023-09";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectType {
    File,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataFlow {
    None,
    In,
    Out,
    Inout,
}

/// A job-level parameter as declared in a template.
///
/// Keys the model does not name (description, userInterface, bounds) are
/// kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_flow: Option<DataFlow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParameterValue>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl JobParameterDefinition {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            object_type: None,
            data_flow: None,
            default: None,
            extra: IndexMap::new(),
        }
    }

    pub fn with_default(mut self, value: impl Into<ParameterValue>) -> Self {
        self.default = Some(self.parameter_type.normalize(value.into()));
        self
    }

    /// Declared default widened to the parameter's type.
    pub fn default_value(&self) -> Option<ParameterValue> {
        self.default.clone().map(|v| self.parameter_type.normalize(v))
    }
}

impl From<&JobParameterDefinition> for ParameterDefinition {
    fn from(def: &JobParameterDefinition) -> Self {
        ParameterDefinition::new(def.name.clone(), def.parameter_type, def.default_value())
    }
}

/// A step task parameter as declared in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    #[serde(default)]
    pub range: Vec<ParameterValue>,
}

impl From<&TaskParameterDefinition> for StepParameterDefinition {
    fn from(def: &TaskParameterDefinition) -> Self {
        StepParameterDefinition::new(def.name.clone(), def.parameter_type, def.range.clone())
    }
}

impl From<&StepParameterDefinition> for TaskParameterDefinition {
    fn from(def: &StepParameterDefinition) -> Self {
        TaskParameterDefinition {
            name: def.name.clone(),
            parameter_type: def.parameter_type,
            range: def.range.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpace {
    #[serde(default)]
    pub task_parameter_definitions: Vec<TaskParameterDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combination: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDependency {
    pub depends_on: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Value>,
}

impl EnvironmentTemplate {
    pub fn variables(&self) -> impl Iterator<Item = (&String, &String)> {
        self.variables.iter().flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_space: Option<ParameterSpace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_environments: Option<Vec<EnvironmentTemplate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<StepDependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_requirements: Option<HostRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Value>,
}

impl StepTemplate {
    pub fn task_parameters(&self) -> &[TaskParameterDefinition] {
        self.parameter_space
            .as_ref()
            .map(|space| space.task_parameter_definitions.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTemplate {
    #[serde(default)]
    pub specification_version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameter_definitions: Vec<JobParameterDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_environments: Option<Vec<EnvironmentTemplate>>,
    #[serde(default)]
    pub steps: Vec<StepTemplate>,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
