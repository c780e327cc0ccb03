// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bundle history layout specs

use crate::prelude::*;

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

#[test]
fn bundles_land_in_month_directories_with_running_numbers() {
    let project = Project::empty();
    project.file("job.yml", JOB_TEMPLATE);
    let record = load_job_record(&project.file("job.toml", "template_path = \"job.yml\"\n")).unwrap();
    let job = Job::from_record(&record, &Registry::default()).unwrap();
    let history = project.history();

    let first = job.create_job_bundle(&history).unwrap();
    let second = job.create_job_bundle(&history).unwrap();

    let month = first.parent().unwrap();
    assert_eq!(month.parent(), Some(history.root()));
    assert_eq!(second.parent(), Some(month));
    assert!(file_name(&first).starts_with(&file_name(month)), "{}", first.display());

    for (dir, number) in [(&first, "-01-"), (&second, "-02-")] {
        let name = file_name(dir);
        assert_eq!(&name[10..14], number, "{name}");
        assert!(name.ends_with("-JobA"), "{name}");
    }
}

#[test]
fn job_names_are_sanitized_for_the_filesystem() {
    let project = Project::empty();
    project.file("job.yml", JOB_TEMPLATE);
    let record = load_job_record(&project.file(
        "job.toml",
        "template_path = \"job.yml\"\n\n[shared_settings]\nname = \"Shot 010: final\"\n",
    ))
    .unwrap();
    let job = Job::from_record(&record, &Registry::default()).unwrap();

    let bundle = job.create_job_bundle(&project.history()).unwrap();
    assert!(file_name(&bundle).ends_with("-Shot_010__final"), "{}", bundle.display());
    assert_eq!(read_yaml(&bundle.join("template.yaml"))["name"].as_str(), Some("Shot 010: final"));
}
