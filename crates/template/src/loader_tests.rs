// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::model::{EnvironmentTemplate, JobTemplate};

#[test]
fn missing_file_reports_descriptor_not_found() {
    let source: TemplateSource<JobTemplate> = TemplateSource::from_path("/nonexistent/job.yml");
    let err = source.get().unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Descriptor file \"/nonexistent/job.yml\" not found");
}

#[test]
fn empty_path_is_not_found() {
    let source: TemplateSource<JobTemplate> = TemplateSource::from_optional(None);
    assert_eq!(source.get().unwrap_err().to_string(), "Descriptor file \"\" not found");
}

#[test]
fn template_is_cached_after_first_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.yml");
    std::fs::write(&path, "name: EnvA\nvariables:\n  A: '1'\n").unwrap();

    let source: TemplateSource<EnvironmentTemplate> = TemplateSource::from_path(&path);
    assert_eq!(source.get().unwrap().name, "EnvA");

    std::fs::write(&path, "name: Changed\n").unwrap();
    assert_eq!(source.get().unwrap().name, "EnvA");
}

#[test]
fn template_appearing_later_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.yml");
    let source: TemplateSource<EnvironmentTemplate> = TemplateSource::from_path(&path);
    assert!(source.get().is_err());

    std::fs::write(&path, "name: Late\n").unwrap();
    assert_eq!(source.get().unwrap().name, "Late");
}

#[test]
fn invalid_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.yml");
    std::fs::write(&path, "parameterDefinitions: {not: [a list").unwrap();

    let err = load_template::<JobTemplate>(&path).unwrap_err();
    assert!(matches!(err, TemplateError::Parse { .. }));
}

#[test]
fn in_memory_template_never_reads_disk() {
    let template = EnvironmentTemplate { name: "Mem".into(), ..EnvironmentTemplate::default() };
    let source = TemplateSource::from_template(template);
    assert_eq!(source.get().unwrap().name, "Mem");
    assert_eq!(source.path(), Path::new(""));
}
