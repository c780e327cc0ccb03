// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs: steps, environments, job parameters and shared settings.

use crate::bundle::{write_job_bundle, BundleSink};
use crate::entity::Entity;
use crate::environment::Environment;
use crate::error::JobError;
use crate::registry::Registry;
use crate::render_step::RenderStep;
use crate::step::Step;
use farm_core::{
    AssetReferences, HostRequirements, JobRecord, ParameterDefinition, ParameterType,
    ParameterValue, ParameterValueEntry, SharedSettings,
};
use farm_template::{
    check_parameters_consistency, ConsistencyCheckResult, JobTemplate, StepTemplate,
    TemplateSource, JOB_TEMPLATE_VERSION,
};
use std::path::PathBuf;

/// A step of a job; render steps carry chunking and request handling.
#[derive(Debug, Clone)]
pub enum JobStep {
    Generic(Step),
    Render(RenderStep),
}

impl JobStep {
    pub fn step(&self) -> &Step {
        match self {
            JobStep::Generic(step) => step,
            JobStep::Render(render) => render.step(),
        }
    }

    pub fn step_mut(&mut self) -> &mut Step {
        match self {
            JobStep::Generic(step) => step,
            JobStep::Render(render) => render.step_mut(),
        }
    }

    pub fn name(&self) -> &str {
        self.step().name()
    }

    pub fn is_render(&self) -> bool {
        matches!(self, JobStep::Render(_))
    }

    pub fn as_render(&self) -> Option<&RenderStep> {
        match self {
            JobStep::Render(render) => Some(render),
            JobStep::Generic(_) => None,
        }
    }
}

impl From<Step> for JobStep {
    fn from(step: Step) -> Self {
        JobStep::Generic(step)
    }
}

impl From<RenderStep> for JobStep {
    fn from(step: RenderStep) -> Self {
        JobStep::Render(step)
    }
}

impl Entity for JobStep {
    type Template = StepTemplate;

    fn check_parameters_consistency(&self) -> Result<ConsistencyCheckResult, JobError> {
        match self {
            JobStep::Generic(step) => step.check_parameters_consistency(),
            JobStep::Render(render) => render.check_parameters_consistency(),
        }
    }

    fn build_template_unchecked(&self) -> Result<StepTemplate, JobError> {
        match self {
            JobStep::Generic(step) => step.build_template_unchecked(),
            JobStep::Render(render) => render.build_template_unchecked(),
        }
    }

    fn build_template(&self) -> Result<StepTemplate, JobError> {
        match self {
            JobStep::Generic(step) => step.build_template(),
            JobStep::Render(render) => render.build_template(),
        }
    }

    fn asset_references(&self) -> Result<AssetReferences, JobError> {
        self.step().asset_references()
    }
}

/// A submittable job built from a job template and stored configuration.
#[derive(Debug, Clone)]
pub struct Job {
    name: Option<String>,
    template: TemplateSource<JobTemplate>,
    steps: Vec<JobStep>,
    environments: Vec<Environment>,
    extra_parameters: Vec<ParameterDefinition>,
    shared_settings: SharedSettings,
    asset_references: AssetReferences,
}

/// Builder for [`Job`]; `build` fills in template parameters.
pub struct JobBuilder {
    template: TemplateSource<JobTemplate>,
    name: Option<String>,
    steps: Vec<JobStep>,
    environments: Vec<Environment>,
    extra_parameters: Vec<ParameterDefinition>,
    shared_settings: SharedSettings,
    asset_references: AssetReferences,
}

impl JobBuilder {
    farm_core::setters! {
        set {
            steps: Vec<JobStep>,
            environments: Vec<Environment>,
            extra_parameters: Vec<ParameterDefinition>,
            shared_settings: SharedSettings,
            asset_references: AssetReferences,
        }
        option {
            name: String,
        }
    }

    pub fn build(self) -> Job {
        let mut job = Job {
            name: self.name,
            template: self.template,
            steps: self.steps,
            environments: self.environments,
            extra_parameters: self.extra_parameters,
            shared_settings: self.shared_settings,
            asset_references: self.asset_references,
        };
        job.create_missing_extra_parameters_from_template();
        job
    }
}

impl Job {
    pub fn builder(template: TemplateSource<JobTemplate>) -> JobBuilder {
        JobBuilder {
            template,
            name: None,
            steps: Vec::new(),
            environments: Vec::new(),
            extra_parameters: Vec::new(),
            shared_settings: SharedSettings::default(),
            asset_references: AssetReferences::new(),
        }
    }

    /// Translate a stored job record, dispatching steps and environments by tag.
    pub fn from_record(record: &JobRecord, registry: &Registry) -> Result<Job, JobError> {
        let host_requirements = record.host_requirements.as_ref().and_then(HostRequirements::from_record);

        let mut steps = record
            .steps
            .iter()
            .map(|s| registry.build_step(s))
            .collect::<Result<Vec<_>, _>>()?;
        for step in &mut steps {
            step.step_mut().set_host_requirements(host_requirements.clone());
        }

        let extra_parameters = record
            .parameters
            .iter()
            .map(|p| p.to_definition())
            .collect::<Result<Vec<_>, _>>()?;

        let shared_settings = SharedSettings::from(&record.shared_settings);
        let name = shared_settings.name.clone().or_else(|| record.name.clone());

        let mut builder = Job::builder(TemplateSource::from_optional(record.template_path.as_deref()))
            .steps(steps)
            .environments(record.environments.iter().map(|e| registry.build_environment(e)).collect())
            .extra_parameters(extra_parameters)
            .shared_settings(shared_settings);
        if let Some(name) = name {
            builder = builder.name(name);
        }
        Ok(builder.build())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn template_source(&self) -> &TemplateSource<JobTemplate> {
        &self.template
    }

    pub fn steps(&self) -> &[JobStep] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [JobStep] {
        &mut self.steps
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    pub fn environments_mut(&mut self) -> &mut [Environment] {
        &mut self.environments
    }

    pub fn extra_parameters(&self) -> &[ParameterDefinition] {
        &self.extra_parameters
    }

    pub fn set_extra_parameters(&mut self, extra_parameters: Vec<ParameterDefinition>) {
        self.extra_parameters = extra_parameters;
    }

    pub fn shared_settings(&self) -> &SharedSettings {
        &self.shared_settings
    }

    pub fn set_shared_settings(&mut self, shared_settings: SharedSettings) {
        self.shared_settings = shared_settings;
    }

    pub fn own_asset_references(&self) -> &AssetReferences {
        &self.asset_references
    }

    pub fn find_extra_parameter(
        &self,
        name: &str,
        parameter_type: ParameterType,
    ) -> Option<&ParameterDefinition> {
        self.extra_parameters.iter().find(|p| p.matches(name, parameter_type))
    }

    /// Parameter values in template order, followed by the shared settings.
    ///
    /// Each value comes from the matching extra parameter, else the template default.
    pub fn build_parameter_values(&self) -> Result<Vec<ParameterValueEntry>, JobError> {
        let template = self.template.get()?;
        let mut values: Vec<ParameterValueEntry> = template
            .parameter_definitions
            .iter()
            .map(|def| {
                let value = match self.find_extra_parameter(&def.name, def.parameter_type) {
                    Some(extra) => extra.value.clone(),
                    None => def.default_value(),
                };
                ParameterValueEntry::new(def.name.clone(), value)
            })
            .collect();
        values.extend(self.shared_settings.serialize());
        Ok(values)
    }

    /// Build and write the three bundle files; returns the bundle directory.
    ///
    /// Template, parameter values and asset references are all built before
    /// the sink is asked for a directory, so a failed build leaves no
    /// partial bundle behind.
    pub fn create_job_bundle(&self, sink: &dyn BundleSink) -> Result<PathBuf, JobError> {
        let template = self.build_template()?;
        let values = self.build_parameter_values()?;
        let refs = self.asset_references()?;
        write_job_bundle(sink, &template, &values, &refs)
    }

    fn create_missing_extra_parameters_from_template(&mut self) {
        let template = match self.template.get() {
            Ok(template) => template,
            Err(e) => {
                tracing::warn!(
                    path = %self.template.path().display(),
                    error = %e,
                    "no job template to read parameters from"
                );
                return;
            }
        };
        if self.name.is_none() && !template.name.is_empty() {
            self.name = Some(template.name.clone());
        }
        for def in &template.parameter_definitions {
            if !self.extra_parameters.iter().any(|p| p.name == def.name) {
                self.extra_parameters.push(ParameterDefinition::from(def));
            }
        }
    }
}

impl Entity for Job {
    type Template = JobTemplate;

    fn check_parameters_consistency(&self) -> Result<ConsistencyCheckResult, JobError> {
        let template = self.template.get()?;
        let result =
            check_parameters_consistency(&template.parameter_definitions, &self.extra_parameters);
        Ok(result.labelled(&format!("Job {}", self.name.as_deref().unwrap_or_default())))
    }

    fn build_template_unchecked(&self) -> Result<JobTemplate, JobError> {
        let template = self.template.get()?;
        let steps = self.steps.iter().map(Entity::build_template).collect::<Result<Vec<_>, _>>()?;
        let environments = self
            .environments
            .iter()
            .map(Entity::build_template)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JobTemplate {
            specification_version: JOB_TEMPLATE_VERSION.to_string(),
            name: self.name.clone().unwrap_or_else(|| template.name.clone()),
            description: template.description.clone(),
            parameter_definitions: template.parameter_definitions.clone(),
            job_environments: if environments.is_empty() { None } else { Some(environments) },
            steps,
        })
    }

    /// Own references plus every step's and environment's.
    fn asset_references(&self) -> Result<AssetReferences, JobError> {
        let mut refs = self.asset_references.clone();
        for step in &self.steps {
            refs.merge(step.asset_references()?);
        }
        for env in &self.environments {
            refs.merge(env.asset_references()?);
        }
        Ok(refs)
    }
}

/// Set the value of the first entry named `name`; returns whether one matched.
pub fn update_parameter_value(
    values: &mut [ParameterValueEntry],
    name: &str,
    value: Option<ParameterValue>,
) -> bool {
    match values.iter_mut().find(|v| v.name == name) {
        Some(entry) => {
            entry.value = value;
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
