// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain job bundle specs

use crate::prelude::*;

const RECORD: &str = r#"
template_path = "../templates/job.yml"

[shared_settings]
name = "Nightly"
priority = 75

[[parameters]]
name = "ParamB"
type = "STRING"
value = "bar"

[[step]]
name = "StepA"
template_path = "../templates/step.yml"
"#;

fn nightly(project: &Project) -> Job {
    project.file("templates/job.yml", JOB_TEMPLATE);
    project.file("templates/step.yml", STEP_TEMPLATE);
    let record = load_job_record(&project.file("jobs/nightly.toml", RECORD)).unwrap();
    Job::from_record(&record, &Registry::default()).unwrap()
}

#[test]
fn bundle_holds_template_values_and_references() {
    let project = Project::empty();
    let bundle = nightly(&project).create_job_bundle(&project.history()).unwrap();

    let mut names: Vec<String> = std::fs::read_dir(&bundle)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["asset_references.yaml", "parameter_values.yaml", "template.yaml"]);
}

#[test]
fn parameter_values_follow_template_then_shared_settings() {
    let project = Project::empty();
    let bundle = nightly(&project).create_job_bundle(&project.history()).unwrap();

    similar_asserts::assert_eq!(
        read_yaml(&bundle.join("parameter_values.yaml")),
        yaml(
            r#"
parameterValues:
  - name: ParamA
    value: path/to/file
  - name: ParamB
    value: bar
  - name: "deadline:targetTaskRunStatus"
    value: READY
  - name: "deadline:maxFailedTasksCount"
    value: 100
  - name: "deadline:maxRetriesPerTask"
    value: 5
  - name: "deadline:priority"
    value: 75
"#
        )
    );
}

#[test]
fn template_keys_are_ordered_and_name_comes_from_settings() {
    let project = Project::empty();
    let bundle = nightly(&project).create_job_bundle(&project.history()).unwrap();

    let template = read_yaml(&bundle.join("template.yaml"));
    let keys: Vec<&str> =
        template.as_mapping().unwrap().keys().filter_map(|k| k.as_str()).collect();
    assert_eq!(keys, ["specificationVersion", "name", "parameterDefinitions", "steps"]);
    assert_eq!(template["name"].as_str(), Some("Nightly"));
    assert_eq!(template["steps"][0]["name"].as_str(), Some("StepA"));
}

#[test]
fn references_file_is_empty_for_a_plain_job() {
    let project = Project::empty();
    let bundle = nightly(&project).create_job_bundle(&project.history()).unwrap();

    let refs = read_yaml(&bundle.join("asset_references.yaml"));
    assert!(string_list(&refs, &["inputs", "filenames"]).is_empty());
    assert!(string_list(&refs, &["inputs", "directories"]).is_empty());
    assert!(string_list(&refs, &["outputs", "directories"]).is_empty());
}

#[test]
fn mismatched_record_parameter_blocks_the_bundle() {
    let project = Project::empty();
    project.file("templates/job.yml", JOB_TEMPLATE);
    let record = load_job_record(&project.file(
        "jobs/broken.toml",
        "template_path = \"../templates/job.yml\"\n\n[[parameters]]\nname = \"ParamB\"\ntype = \"INT\"\nvalue = \"3\"\n",
    ))
    .unwrap();
    let job = Job::from_record(&record, &Registry::default()).unwrap();

    let err = job.create_job_bundle(&project.history()).unwrap_err();
    assert!(err.to_string().contains("ParamB (INT)"), "{err}");
    assert!(!project.path().join("history").exists());
}
