// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tag-dispatched construction of steps and environments from stored records.

use crate::environment::{Environment, EnvironmentKind};
use crate::error::JobError;
use crate::job::JobStep;
use crate::render_step::RenderStep;
use crate::step::Step;
use farm_core::record::DEFAULT_KIND;
use farm_core::{EnvironmentRecord, StepRecord};
use std::collections::HashMap;

pub const RENDER_KIND: &str = "render";
pub const UGS_KIND: &str = "ugs";

pub type StepConstructor = fn(&StepRecord, &Registry) -> Result<JobStep, JobError>;
pub type EnvironmentConstructor = fn(&EnvironmentRecord) -> Environment;

/// Maps record `kind` tags to constructors; unknown tags use `"default"`.
#[derive(Clone)]
pub struct Registry {
    steps: HashMap<String, StepConstructor>,
    environments: HashMap<String, EnvironmentConstructor>,
}

fn plain_step(record: &StepRecord, registry: &Registry) -> Result<JobStep, JobError> {
    Ok(Step::from_record(record, |e| registry.build_environment(e))?.into())
}

fn render_step(record: &StepRecord, registry: &Registry) -> Result<JobStep, JobError> {
    Ok(RenderStep::new(Step::from_record(record, |e| registry.build_environment(e))?).into())
}

fn plain_environment(record: &EnvironmentRecord) -> Environment {
    Environment::from_record(record)
}

fn ugs_environment(record: &EnvironmentRecord) -> Environment {
    Environment::from_record(record).with_kind(EnvironmentKind::Ugs)
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Registry { steps: HashMap::new(), environments: HashMap::new() };
        registry.register_step(DEFAULT_KIND, plain_step);
        registry.register_step(RENDER_KIND, render_step);
        registry.register_environment(DEFAULT_KIND, plain_environment);
        registry.register_environment(UGS_KIND, ugs_environment);
        registry
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut steps: Vec<_> = self.steps.keys().collect();
        let mut environments: Vec<_> = self.environments.keys().collect();
        steps.sort();
        environments.sort();
        f.debug_struct("Registry")
            .field("steps", &steps)
            .field("environments", &environments)
            .finish()
    }
}

impl Registry {
    pub fn register_step(&mut self, kind: &str, constructor: StepConstructor) {
        self.steps.insert(kind.to_string(), constructor);
    }

    pub fn register_environment(&mut self, kind: &str, constructor: EnvironmentConstructor) {
        self.environments.insert(kind.to_string(), constructor);
    }

    pub fn build_step(&self, record: &StepRecord) -> Result<JobStep, JobError> {
        let constructor = match self.steps.get(&record.kind) {
            Some(constructor) => *constructor,
            None => {
                tracing::debug!(kind = %record.kind, "unknown step kind, using default");
                self.steps.get(DEFAULT_KIND).copied().unwrap_or(plain_step)
            }
        };
        constructor(record, self)
    }

    pub fn build_environment(&self, record: &EnvironmentRecord) -> Environment {
        let constructor = match self.environments.get(&record.kind) {
            Some(constructor) => *constructor,
            None => {
                tracing::debug!(kind = %record.kind, "unknown environment kind, using default");
                self.environments.get(DEFAULT_KIND).copied().unwrap_or(plain_environment)
            }
        };
        constructor(record)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
