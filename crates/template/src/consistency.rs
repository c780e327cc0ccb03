// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift detection and repair between a template's schema and stored configuration.
//!
//! Both sides are reduced to [`SchemaEntry`] values, so job parameters, step
//! parameters and environment variables share one diff algorithm. Identity is
//! `(name, kind)`: a parameter whose type changed shows up on both sides.

use crate::loader::{load_template, TemplateError};
use crate::model::{
    EnvironmentTemplate, JobParameterDefinition, JobTemplate, StepTemplate, TaskParameterDefinition,
};
use farm_core::{ParameterDefinition, ParameterType, StepParameterDefinition};
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;

pub const CONSISTENT_REASON: &str = "Parameters are consistent";
pub const MISSING_IN_TEMPLATE_LABEL: &str = "Data Asset's parameters missed in YAML";
pub const MISSING_IN_CONFIG_LABEL: &str = "YAML's parameters missed in Data Asset";

/// What a schema entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Parameter(ParameterType),
    Variable,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Parameter(ty) => write!(f, "{ty}"),
            EntryKind::Variable => f.write_str("VARIABLE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl SchemaEntry {
    pub fn parameter(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self { name: name.into(), kind: EntryKind::Parameter(parameter_type) }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: EntryKind::Variable }
    }
}

impl From<&SchemaEntry> for SchemaEntry {
    fn from(entry: &SchemaEntry) -> Self {
        entry.clone()
    }
}

impl fmt::Display for SchemaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Anything that can be compared by `(name, kind)`.
pub trait Keyed {
    fn schema_entry(&self) -> SchemaEntry;
}

impl Keyed for SchemaEntry {
    fn schema_entry(&self) -> SchemaEntry {
        self.clone()
    }
}

impl Keyed for ParameterDefinition {
    fn schema_entry(&self) -> SchemaEntry {
        SchemaEntry::parameter(self.name.clone(), self.parameter_type)
    }
}

impl Keyed for StepParameterDefinition {
    fn schema_entry(&self) -> SchemaEntry {
        SchemaEntry::parameter(self.name.clone(), self.parameter_type)
    }
}

impl Keyed for JobParameterDefinition {
    fn schema_entry(&self) -> SchemaEntry {
        SchemaEntry::parameter(self.name.clone(), self.parameter_type)
    }
}

impl Keyed for TaskParameterDefinition {
    fn schema_entry(&self) -> SchemaEntry {
        SchemaEntry::parameter(self.name.clone(), self.parameter_type)
    }
}

pub fn schema_of<T: Keyed>(items: &[T]) -> Vec<SchemaEntry> {
    items.iter().map(Keyed::schema_entry).collect()
}

pub fn variable_schema<'a>(names: impl IntoIterator<Item = &'a String>) -> Vec<SchemaEntry> {
    names.into_iter().map(|name| SchemaEntry::variable(name.clone())).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyCheckResult {
    pub passed: bool,
    pub reason: String,
}

impl ConsistencyCheckResult {
    /// Prefix the reason with the owning entity's label.
    pub fn labelled(mut self, label: &str) -> Self {
        self.reason = format!("{label}: {}", self.reason);
        self
    }
}

/// Entries of `right` absent from `left`, and entries of `left` absent from `right`.
///
/// Each list follows the order of the input it was taken from; repeated
/// entries are reported once.
pub fn symmetric_difference<T: PartialEq + Clone>(left: &[T], right: &[T]) -> (Vec<T>, Vec<T>) {
    fn missing<T: PartialEq + Clone>(from: &[T], present: &[T]) -> Vec<T> {
        let mut out: Vec<T> = Vec::new();
        for item in from {
            if !present.contains(item) && !out.contains(item) {
                out.push(item.clone());
            }
        }
        out
    }
    (missing(right, left), missing(left, right))
}

fn join(entries: &[SchemaEntry]) -> String {
    entries.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Compare a template's schema with a stored configuration's schema.
pub fn check_consistency(template: &[SchemaEntry], config: &[SchemaEntry]) -> ConsistencyCheckResult {
    let (missing_in_template, missing_in_config) = symmetric_difference(template, config);

    let mut lines = Vec::new();
    if !missing_in_template.is_empty() {
        lines.push(format!("{MISSING_IN_TEMPLATE_LABEL}: {}", join(&missing_in_template)));
    }
    if !missing_in_config.is_empty() {
        lines.push(format!("{MISSING_IN_CONFIG_LABEL}: {}", join(&missing_in_config)));
    }

    if lines.is_empty() {
        ConsistencyCheckResult { passed: true, reason: CONSISTENT_REASON.to_string() }
    } else {
        ConsistencyCheckResult { passed: false, reason: lines.join("\n") }
    }
}

/// [`check_consistency`] over typed parameter lists.
pub fn check_parameters_consistency<T: Keyed, C: Keyed>(
    template_params: &[T],
    config_params: &[C],
) -> ConsistencyCheckResult {
    check_consistency(&schema_of(template_params), &schema_of(config_params))
}

/// Make the config side match the template's schema.
///
/// Config entries listed in `missing_in_template` are dropped; template
/// entries listed in `missing_in_config` are appended in template order,
/// carrying their template defaults. Surviving config entries keep their values.
pub fn fix_parameters_consistency<T, C>(
    missing_in_template: &[SchemaEntry],
    missing_in_config: &[SchemaEntry],
    template_params: &[T],
    config_params: &[C],
) -> Vec<C>
where
    T: Keyed,
    C: Keyed + Clone + for<'a> From<&'a T>,
{
    let mut fixed: Vec<C> = config_params
        .iter()
        .filter(|p| !missing_in_template.contains(&p.schema_entry()))
        .cloned()
        .collect();
    fixed.extend(
        template_params
            .iter()
            .filter(|p| missing_in_config.contains(&p.schema_entry()))
            .map(C::from),
    );
    fixed
}

/// [`fix_parameters_consistency`] for name-to-value variable maps.
pub fn fix_variables_consistency(
    missing_in_template: &[SchemaEntry],
    missing_in_config: &[SchemaEntry],
    template_variables: &IndexMap<String, String>,
    config_variables: &IndexMap<String, String>,
) -> IndexMap<String, String> {
    let mut fixed: IndexMap<String, String> = config_variables
        .iter()
        .filter(|(name, _)| !missing_in_template.contains(&SchemaEntry::variable(name.as_str())))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    for (name, value) in template_variables {
        if missing_in_config.contains(&SchemaEntry::variable(name.as_str())) {
            fixed.insert(name.clone(), value.clone());
        }
    }
    fixed
}

/// Reconcile stored job parameters against the job template at `path`.
pub fn fix_job_parameters_consistency(
    path: &Path,
    job_parameters: &[ParameterDefinition],
) -> Result<Vec<ParameterDefinition>, TemplateError> {
    let template: JobTemplate = load_template(path)?;
    let template_params = &template.parameter_definitions;
    let (missing_in_template, missing_in_config) =
        symmetric_difference(&schema_of(template_params), &schema_of(job_parameters));
    Ok(fix_parameters_consistency(
        &missing_in_template,
        &missing_in_config,
        template_params,
        job_parameters,
    ))
}

/// Reconcile stored step parameters against the step template at `path`.
pub fn fix_step_parameters_consistency(
    path: &Path,
    step_parameters: &[StepParameterDefinition],
) -> Result<Vec<StepParameterDefinition>, TemplateError> {
    let template: StepTemplate = load_template(path)?;
    let template_params = template.task_parameters();
    let (missing_in_template, missing_in_config) =
        symmetric_difference(&schema_of(template_params), &schema_of(step_parameters));
    Ok(fix_parameters_consistency(
        &missing_in_template,
        &missing_in_config,
        template_params,
        step_parameters,
    ))
}

/// Reconcile stored environment variables against the environment template at `path`.
pub fn fix_environment_variables_consistency(
    path: &Path,
    variables: &IndexMap<String, String>,
) -> Result<IndexMap<String, String>, TemplateError> {
    let template: EnvironmentTemplate = load_template(path)?;
    let template_variables: IndexMap<String, String> =
        template.variables().map(|(k, v)| (k.clone(), v.clone())).collect();
    let (missing_in_template, missing_in_config) = symmetric_difference(
        &variable_schema(template_variables.keys()),
        &variable_schema(variables.keys()),
    );
    Ok(fix_variables_consistency(
        &missing_in_template,
        &missing_in_config,
        &template_variables,
        variables,
    ))
}

#[cfg(test)]
#[path = "consistency_tests.rs"]
mod tests;
