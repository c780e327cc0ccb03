// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job steps: a parameter space, child environments and dependencies.

use crate::entity::Entity;
use crate::environment::Environment;
use crate::error::JobError;
use farm_core::{AssetReferences, HostRequirements, ParameterType, StepParameterDefinition, StepRecord};
use farm_template::{
    check_parameters_consistency, ConsistencyCheckResult, ParameterSpace, StepDependency,
    StepTemplate, TaskParameterDefinition, TemplateSource,
};

#[derive(Debug, Clone)]
pub struct Step {
    name: String,
    extra_parameters: Vec<StepParameterDefinition>,
    environments: Vec<Environment>,
    step_dependencies: Vec<String>,
    host_requirements: Option<HostRequirements>,
    template: TemplateSource<StepTemplate>,
}

impl Step {
    /// Create a step, adding template task parameters missing from `extra_parameters`.
    pub fn new(
        template: TemplateSource<StepTemplate>,
        name: Option<String>,
        extra_parameters: Vec<StepParameterDefinition>,
    ) -> Self {
        let mut step = Step {
            name: name.unwrap_or_default(),
            extra_parameters,
            environments: Vec::new(),
            step_dependencies: Vec::new(),
            host_requirements: None,
            template,
        };
        step.create_missing_extra_parameters_from_template();
        step
    }

    /// Translate a stored step record; child environments use their own kinds.
    pub fn from_record(
        record: &StepRecord,
        build_environment: impl Fn(&farm_core::EnvironmentRecord) -> Environment,
    ) -> Result<Self, JobError> {
        let extra_parameters = record
            .parameters
            .iter()
            .map(|p| p.to_definition())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Step::new(
            TemplateSource::from_optional(record.template_path.as_deref()),
            record.name.clone(),
            extra_parameters,
        )
        .with_environments(record.environments.iter().map(build_environment).collect())
        .with_dependencies(record.depends_on.clone()))
    }

    pub fn with_environments(mut self, environments: Vec<Environment>) -> Self {
        self.environments = environments;
        self
    }

    pub fn with_dependencies(mut self, step_dependencies: Vec<String>) -> Self {
        self.step_dependencies = step_dependencies;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extra_parameters(&self) -> &[StepParameterDefinition] {
        &self.extra_parameters
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    pub fn environments_mut(&mut self) -> &mut [Environment] {
        &mut self.environments
    }

    pub fn step_dependencies(&self) -> &[String] {
        &self.step_dependencies
    }

    pub fn set_step_dependencies(&mut self, step_dependencies: Vec<String>) {
        self.step_dependencies = step_dependencies;
    }

    pub fn host_requirements(&self) -> Option<&HostRequirements> {
        self.host_requirements.as_ref()
    }

    /// Replace the host requirements wholesale.
    pub fn set_host_requirements(&mut self, host_requirements: Option<HostRequirements>) {
        self.host_requirements = host_requirements;
    }

    pub fn find_extra_parameter(
        &self,
        name: &str,
        parameter_type: ParameterType,
    ) -> Option<&StepParameterDefinition> {
        self.extra_parameters.iter().find(|p| p.matches(name, parameter_type))
    }

    /// Replace the parameter with the same name and type.
    ///
    /// Returns `false`, leaving the step unchanged, when no such parameter
    /// exists; a type change is not an update.
    pub fn update_extra_parameter(&mut self, parameter: StepParameterDefinition) -> bool {
        match self
            .extra_parameters
            .iter_mut()
            .find(|p| p.matches(&parameter.name, parameter.parameter_type))
        {
            Some(existing) => {
                *existing = parameter;
                true
            }
            None => false,
        }
    }

    fn create_missing_extra_parameters_from_template(&mut self) {
        let template = match self.template.get() {
            Ok(template) => template,
            Err(e) => {
                tracing::warn!(
                    path = %self.template.path().display(),
                    error = %e,
                    "no step template to read parameters from"
                );
                return;
            }
        };
        if self.name.is_empty() {
            self.name = template.name.clone();
        }
        for param in template.task_parameters() {
            if !self.extra_parameters.iter().any(|p| p.name == param.name) {
                self.extra_parameters.push(StepParameterDefinition::from(param));
            }
        }
    }

    /// Task parameters in template order, ranges taken from matching step parameters.
    fn build_step_parameter_definition_list(
        &self,
        template: &StepTemplate,
    ) -> Vec<TaskParameterDefinition> {
        template
            .task_parameters()
            .iter()
            .map(|param| match self.find_extra_parameter(&param.name, param.parameter_type) {
                Some(extra) => TaskParameterDefinition::from(extra),
                None => param.clone(),
            })
            .collect()
    }
}

impl Entity for Step {
    type Template = StepTemplate;

    fn check_parameters_consistency(&self) -> Result<ConsistencyCheckResult, JobError> {
        let template = self.template.get()?;
        let result = check_parameters_consistency(template.task_parameters(), &self.extra_parameters);
        Ok(result.labelled(&format!("Step {}", self.name)))
    }

    fn build_template_unchecked(&self) -> Result<StepTemplate, JobError> {
        let template = self.template.get()?;

        let task_parameters = self.build_step_parameter_definition_list(template);
        let parameter_space = if task_parameters.is_empty() {
            None
        } else {
            Some(ParameterSpace {
                task_parameter_definitions: task_parameters,
                combination: template
                    .parameter_space
                    .as_ref()
                    .and_then(|space| space.combination.clone()),
            })
        };

        let step_environments = self
            .environments
            .iter()
            .map(Entity::build_template)
            .collect::<Result<Vec<_>, _>>()?;

        let dependencies: Vec<StepDependency> = self
            .step_dependencies
            .iter()
            .map(|name| StepDependency { depends_on: name.clone() })
            .collect();

        Ok(StepTemplate {
            name: self.name.clone(),
            description: template.description.clone(),
            parameter_space,
            step_environments: if step_environments.is_empty() { None } else { Some(step_environments) },
            dependencies: if dependencies.is_empty() { None } else { Some(dependencies) },
            host_requirements: self.host_requirements.clone(),
            script: template.script.clone(),
        })
    }

    fn asset_references(&self) -> Result<AssetReferences, JobError> {
        let mut refs = AssetReferences::new();
        for env in &self.environments {
            refs.merge(env.asset_references()?);
        }
        Ok(refs)
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
