// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layering a render request over a stored job.
//!
//! Every function here is pure: it takes the stored state by reference and
//! returns the merged copy. Overrides are matched to steps, environments and
//! parameters by exact name (and type, for parameters); overrides that match
//! nothing are skipped with a debug log.

use crate::error::JobError;
use crate::job::{Job, JobStep};
use crate::step::Step;
use farm_core::{
    HostRequirements, ParameterDefinition, RenderRequest, SharedSettings, StepOverride,
};
use std::sync::Arc;

/// Replace base parameters by `(name, type)`; overrides matching nothing are dropped.
pub fn merge_parameters(
    base: &[ParameterDefinition],
    overrides: &[ParameterDefinition],
) -> Vec<ParameterDefinition> {
    let mut merged = base.to_vec();
    for o in overrides {
        match merged.iter_mut().find(|p| p.matches(&o.name, o.parameter_type)) {
            Some(existing) => *existing = o.clone(),
            None => tracing::debug!(
                parameter = %o.name,
                parameter_type = %o.parameter_type,
                "parameter override matches no job parameter"
            ),
        }
    }
    merged
}

/// Apply one step override: dependencies, environment variables, parameters.
pub fn merge_step(step: &Step, step_override: &StepOverride) -> Result<Step, JobError> {
    let mut merged = step.clone();
    merged.set_step_dependencies(step_override.depends_on.clone());

    for env in merged.environments_mut() {
        let env_override =
            step_override.environment_overrides.iter().find(|o| o.name == env.name());
        *env = env.merged(env_override);
    }

    for record in &step_override.parameters {
        let parameter = record.to_definition()?;
        if !merged.update_extra_parameter(parameter) {
            tracing::debug!(
                step = %step.name(),
                parameter = %record.name,
                "step parameter override matches no step parameter"
            );
        }
    }
    Ok(merged)
}

/// The job as it should be submitted for `request`.
///
/// Precedence, highest first: the request's overrides, the stored job,
/// template defaults (already folded into the stored job).
pub fn apply_request(job: &Job, request: &Arc<RenderRequest>) -> Result<Job, JobError> {
    let mut merged = job.clone();
    let presets = &request.preset_overrides;

    // Present preset requirements replace every step's, even with "run anywhere".
    let preset_requirements = presets.host_requirements.as_ref().map(HostRequirements::from_record);
    for step in merged.steps_mut() {
        if let Some(requirements) = &preset_requirements {
            step.step_mut().set_host_requirements(requirements.clone());
        }
        if let JobStep::Render(render) = step {
            render.set_request(Arc::clone(request));
        }
        if let Some(step_override) = request.step_override(step.name()) {
            let updated = merge_step(step.step(), step_override)?;
            *step.step_mut() = updated;
        }
    }
    for o in &request.step_overrides {
        if !job.steps().iter().any(|s| s.name() == o.name) {
            tracing::debug!(step = %o.name, "step override matches no step");
        }
    }

    for env in merged.environments_mut() {
        *env = env.merged(request.environment_override(env.name()));
    }
    for o in &request.environment_overrides {
        if !job.environments().iter().any(|e| e.name() == o.name) {
            tracing::debug!(environment = %o.name, "environment override matches no environment");
        }
    }

    let parameter_overrides = request
        .parameter_overrides
        .iter()
        .map(|p| p.to_definition())
        .collect::<Result<Vec<_>, _>>()?;
    merged.set_extra_parameters(merge_parameters(job.extra_parameters(), &parameter_overrides));

    let mut preset_name = None;
    if let Some(record) = &presets.shared_settings {
        let settings = SharedSettings::from(record);
        preset_name = settings.name.clone();
        merged.set_shared_settings(settings);
    }

    let name = preset_name
        .or_else(|| job.name().map(str::to_string))
        .or_else(|| Some(request.job_name.clone()).filter(|n| !n.is_empty()));
    merged.set_name(name);

    Ok(merged)
}

#[cfg(test)]
#[path = "overrides_tests.rs"]
mod tests;
