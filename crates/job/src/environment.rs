// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job and step environments.

use crate::entity::Entity;
use crate::error::JobError;
use farm_core::{EnvironmentOverride, EnvironmentRecord};
use farm_template::consistency::{check_consistency, variable_schema};
use farm_template::{ConsistencyCheckResult, EnvironmentTemplate, TemplateSource};
use indexmap::IndexMap;
use std::path::Path;

/// Flavor of environment, selected by registry tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvironmentKind {
    #[default]
    Generic,
    /// Syncs the project through source control instead of uploading it.
    Ugs,
}

farm_core::simple_display! {
    EnvironmentKind {
        Generic => "default",
        Ugs => "ugs",
    }
}

/// Named set of variables plus the template's enter/exit script.
#[derive(Debug, Clone)]
pub struct Environment {
    name: String,
    kind: EnvironmentKind,
    variables: IndexMap<String, String>,
    template: TemplateSource<EnvironmentTemplate>,
}

impl Environment {
    /// Create an environment, adding template variables missing from `variables`.
    ///
    /// A missing template is not an error here; it surfaces on build.
    pub fn new(
        template: TemplateSource<EnvironmentTemplate>,
        name: Option<String>,
        variables: IndexMap<String, String>,
    ) -> Self {
        let mut env = Environment {
            name: name.unwrap_or_default(),
            kind: EnvironmentKind::Generic,
            variables,
            template,
        };
        env.create_missing_variables_from_template();
        env
    }

    pub fn from_record(record: &EnvironmentRecord) -> Self {
        Environment::new(
            TemplateSource::from_optional(record.template_path.as_deref()),
            record.name.clone(),
            record.variables.clone(),
        )
    }

    pub fn with_kind(mut self, kind: EnvironmentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EnvironmentKind {
        self.kind
    }

    pub fn variables(&self) -> &IndexMap<String, String> {
        &self.variables
    }

    pub fn set_variables(&mut self, variables: IndexMap<String, String>) {
        self.variables = variables;
    }

    pub fn template_path(&self) -> &Path {
        self.template.path()
    }

    /// Copy of this environment with an override's variables applied.
    pub fn merged(&self, environment_override: Option<&EnvironmentOverride>) -> Environment {
        let mut env = self.clone();
        if let Some(o) = environment_override {
            env.variables = o.variables.clone();
        }
        env
    }

    fn create_missing_variables_from_template(&mut self) {
        let template = match self.template.get() {
            Ok(template) => template,
            Err(e) => {
                tracing::warn!(
                    path = %self.template.path().display(),
                    error = %e,
                    "no environment template to read variables from"
                );
                return;
            }
        };
        if self.name.is_empty() {
            self.name = template.name.clone();
        }
        for (key, value) in template.variables() {
            if !self.variables.contains_key(key) {
                self.variables.insert(key.clone(), value.clone());
            }
        }
    }
}

impl Entity for Environment {
    type Template = EnvironmentTemplate;

    fn check_parameters_consistency(&self) -> Result<ConsistencyCheckResult, JobError> {
        let template = self.template.get()?;
        let template_keys: Vec<&String> = template.variables().map(|(k, _)| k).collect();
        let result = check_consistency(
            &variable_schema(template_keys),
            &variable_schema(self.variables.keys()),
        );
        Ok(result.labelled(&format!("Environment {}", self.name)))
    }

    fn build_template_unchecked(&self) -> Result<EnvironmentTemplate, JobError> {
        let template = self.template.get()?;
        Ok(EnvironmentTemplate {
            name: self.name.clone(),
            description: template.description.clone(),
            variables: if self.variables.is_empty() { None } else { Some(self.variables.clone()) },
            script: template.script.clone(),
        })
    }
}

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
