// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{source, write_template, ENVIRONMENT_TEMPLATE};
use farm_template::EnvironmentTemplate;

fn vars(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn env_with(variables: IndexMap<String, String>) -> Environment {
    Environment::new(source(ENVIRONMENT_TEMPLATE), None, variables)
}

#[test]
fn creates_missing_variables_and_takes_template_name() {
    let env = env_with(vars(&[("VARIABLE_A", "custom")]));
    assert_eq!(env.name(), "EnvironmentA");
    assert_eq!(env.variables(), &vars(&[("VARIABLE_A", "custom"), ("VARIABLE_B", "VALUE_B")]));
}

#[test]
fn explicit_name_wins() {
    let env = Environment::new(source(ENVIRONMENT_TEMPLATE), Some("Setup".into()), IndexMap::new());
    assert_eq!(env.name(), "Setup");
}

#[test]
fn consistent_after_construction() {
    let result = env_with(IndexMap::new()).check_parameters_consistency().unwrap();
    assert!(result.passed, "{}", result.reason);
}

#[test]
fn extra_variable_fails_validation_with_label() {
    let mut env = env_with(IndexMap::new());
    let mut variables = env.variables().clone();
    variables.insert("VARIABLE_C".into(), "x".into());
    env.set_variables(variables);

    let err = env.validate_parameters().unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Environment EnvironmentA: "), "{message}");
    assert!(message.contains("VARIABLE_C (VARIABLE)"), "{message}");
}

#[test]
fn missing_template_is_recoverable_until_build() {
    let env = Environment::new(TemplateSource::default(), Some("Bare".into()), vars(&[("A", "1")]));
    assert_eq!(env.variables(), &vars(&[("A", "1")]));

    let err = env.build_template().unwrap_err();
    assert!(matches!(err, JobError::Template(ref e) if e.is_not_found()), "{err}");
}

#[test]
fn build_emits_variables_and_script() {
    let built = env_with(vars(&[("VARIABLE_B", "override")])).build_template().unwrap();
    assert_eq!(built.name, "EnvironmentA");
    assert_eq!(
        built.variables,
        Some(vars(&[("VARIABLE_B", "override"), ("VARIABLE_A", "VALUE_A")]))
    );
    assert!(built.script.is_some());
}

#[test]
fn build_omits_empty_variables() {
    let template = EnvironmentTemplate { name: "Empty".into(), ..EnvironmentTemplate::default() };
    let env = Environment::new(TemplateSource::from_template(template), None, IndexMap::new());
    assert_eq!(env.build_template().unwrap().variables, None);
}

#[test]
fn loads_template_from_record_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_template(dir.path(), "env.yml", ENVIRONMENT_TEMPLATE);
    let record = EnvironmentRecord {
        kind: "default".into(),
        name: None,
        template_path: Some(path.clone()),
        variables: IndexMap::new(),
    };

    let env = Environment::from_record(&record);
    assert_eq!(env.name(), "EnvironmentA");
    assert_eq!(env.template_path(), path.as_path());
    assert_eq!(env.kind(), EnvironmentKind::Generic);
    assert_eq!(env.variables().len(), 2);
}

#[test]
fn override_replaces_variables() {
    let env = env_with(IndexMap::new()).with_kind(EnvironmentKind::Ugs);
    let merged = env.merged(Some(&EnvironmentOverride {
        name: "EnvironmentA".into(),
        variables: vars(&[("VARIABLE_A", "from request"), ("VARIABLE_B", "b")]),
    }));
    assert_eq!(merged.variables()["VARIABLE_A"], "from request");
    assert_eq!(merged.kind(), EnvironmentKind::Ugs);
    assert_eq!(env.variables()["VARIABLE_A"], "VALUE_A");
    assert_eq!(env.merged(None).variables(), env.variables());
}
