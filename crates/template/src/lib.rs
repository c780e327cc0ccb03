// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! farm-template: job template documents, loading, and schema reconciliation

pub mod consistency;
pub mod loader;
pub mod model;
pub mod names;
pub mod serialize;

pub use consistency::{
    check_consistency, check_parameters_consistency, fix_environment_variables_consistency,
    fix_job_parameters_consistency, fix_parameters_consistency, fix_step_parameters_consistency,
    fix_variables_consistency, symmetric_difference, ConsistencyCheckResult, EntryKind, Keyed,
    SchemaEntry,
};
pub use loader::{load_template, TemplateError, TemplateSource};
pub use model::{
    DataFlow, EnvironmentTemplate, JobParameterDefinition, JobTemplate, ObjectType,
    ParameterSpace, StepDependency, StepTemplate, TaskParameterDefinition, JOB_TEMPLATE_VERSION,
};
pub use names::{JobParameterNames, StepParameterNames};
pub use serialize::{serialize_template, template_to_yaml, TEMPLATE_KEY_ORDER};
