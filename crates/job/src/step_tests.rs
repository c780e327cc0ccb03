// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{source, write_template, ENVIRONMENT_TEMPLATE, STEP_TEMPLATE};
use farm_core::test_support::{step_param_record, step_record};
use farm_core::{EnvironmentRecord, HostRequirementsRecord, ParameterValue};
use indexmap::IndexMap;
use yare::parameterized;

fn step_with(extra: Vec<StepParameterDefinition>) -> Step {
    Step::new(source(STEP_TEMPLATE), None, extra)
}

fn range(values: &[i64]) -> Vec<ParameterValue> {
    values.iter().copied().map(ParameterValue::Int).collect()
}

#[test]
fn creates_missing_parameters_in_template_order() {
    let step = step_with(vec![]);
    assert_eq!(step.name(), "StepA");
    let names: Vec<&str> = step.extra_parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["ParamA", "ParamC"]);
    assert!(step.check_parameters_consistency().unwrap().passed);
}

#[test]
fn stored_parameters_keep_their_ranges() {
    let step = step_with(vec![StepParameterDefinition::new("ParamC", ParameterType::Int, range(&[4, 5]))]);
    let param = step.find_extra_parameter("ParamC", ParameterType::Int).unwrap();
    assert_eq!(param.range, range(&[4, 5]));
}

#[test]
fn same_name_different_type_is_reported_on_both_sides() {
    let step = step_with(vec![StepParameterDefinition::new(
        "ParamC",
        ParameterType::Float,
        vec![ParameterValue::Float(1.0)],
    )]);
    let result = step.check_parameters_consistency().unwrap();
    assert!(!result.passed);
    assert!(result.reason.starts_with("Step StepA: "), "{}", result.reason);
    assert!(result.reason.contains("ParamC (INT)"), "{}", result.reason);
    assert!(result.reason.contains("ParamC (FLOAT)"), "{}", result.reason);
    assert!(matches!(step.build_template(), Err(JobError::Inconsistent(_))));
}

#[parameterized(
    same_name_and_type = { "ParamC", ParameterType::Int, true },
    unknown_name = { "ParamZ", ParameterType::Int, false },
    type_change = { "ParamC", ParameterType::Float, false },
)]
fn updates_only_matching_parameter(name: &str, parameter_type: ParameterType, updated: bool) {
    let mut step = step_with(vec![]);
    let before = step.extra_parameters().to_vec();
    let replacement = StepParameterDefinition::new(name, parameter_type, range(&[7]));

    assert_eq!(step.update_extra_parameter(replacement), updated);
    if updated {
        assert_eq!(step.find_extra_parameter(name, parameter_type).unwrap().range, range(&[7]));
    } else {
        assert_eq!(step.extra_parameters(), before.as_slice());
    }
}

#[test]
fn build_uses_step_ranges_in_template_order() {
    let mut step = step_with(vec![]);
    step.update_extra_parameter(StepParameterDefinition::new("ParamC", ParameterType::Int, range(&[1, 2, 3])));
    step.set_step_dependencies(vec!["Setup".into()]);

    let built = step.build_template().unwrap();
    let params = built.task_parameters();
    assert_eq!(params[0].name, "ParamA");
    assert_eq!(params[1].range, range(&[1, 2, 3]));
    assert_eq!(built.dependencies, Some(vec![StepDependency { depends_on: "Setup".into() }]));
    assert_eq!(built.step_environments, None);
    assert!(built.script.is_some());
}

#[test]
fn build_emits_host_requirements() {
    let record = HostRequirementsRecord {
        run_on_all_worker_nodes: false,
        operating_system: Some("Linux".into()),
        ..HostRequirementsRecord::default()
    };
    let mut step = step_with(vec![]);
    step.set_host_requirements(HostRequirements::from_record(&record));

    let built = step.build_template().unwrap();
    assert_eq!(built.host_requirements, HostRequirements::from_record(&record));
    assert!(built.host_requirements.is_some());
}

#[test]
fn from_record_builds_environments_and_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    let step_path = write_template(dir.path(), "step.yml", STEP_TEMPLATE);
    let env_path = write_template(dir.path(), "env.yml", ENVIRONMENT_TEMPLATE);

    let mut record = step_record("", "Custom", &step_path);
    record.parameters = vec![step_param_record("ParamC", ParameterType::Int, &["1", "2", ""])];
    record.depends_on = vec!["Setup".into()];
    record.environments = vec![EnvironmentRecord {
        kind: "default".into(),
        name: None,
        template_path: Some(env_path),
        variables: IndexMap::new(),
    }];

    let step = Step::from_record(&record, Environment::from_record).unwrap();
    assert_eq!(step.name(), "Custom");
    assert_eq!(step.step_dependencies(), ["Setup".to_string()]);
    assert_eq!(step.environments()[0].name(), "EnvironmentA");
    assert_eq!(step.find_extra_parameter("ParamC", ParameterType::Int).unwrap().range, range(&[1, 2]));

    let built = step.build_template().unwrap();
    assert_eq!(built.step_environments.map(|e| e.len()), Some(1));
}

#[test]
fn invalid_record_range_is_an_error() {
    let mut record = step_record("", "Bad", "missing.yml");
    record.parameters = vec![step_param_record("ParamC", ParameterType::Int, &["one"])];
    let err = Step::from_record(&record, Environment::from_record).unwrap_err();
    assert!(matches!(err, JobError::Parameter(_)), "{err}");
}

#[test]
fn asset_references_come_from_environments() {
    let step = step_with(vec![]);
    assert!(step.asset_references().unwrap().is_empty());
}
