// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render job bundle specs

use crate::prelude::*;
use farm_core::{Attachments, PresetOverrides};

const RECORD: &str = r#"
template_path = "templates/render_job.yml"

[[step]]
kind = "render"
name = "Render"
template_path = "templates/render_step.yml"
"#;

fn render_job(project: &Project) -> RenderJob {
    project.file("templates/render_job.yml", RENDER_JOB_TEMPLATE);
    project.file("templates/render_step.yml", RENDER_STEP_TEMPLATE);
    let record = load_job_record(&project.file("render.toml", RECORD)).unwrap();
    RenderJob::from_record(&record, &Registry::default(), host_project(project.path())).unwrap()
}

fn trailer_request() -> farm_core::RenderRequest {
    RenderRequestBuilder::default()
        .job_name("Trailer")
        .sequence_path("/Game/Cine/Intro.Intro")
        .map_path("/Game/Maps/City.City")
        .configuration_path("/Game/Config/Final")
        .shots(vec![Shot::new("a", true), Shot::new("b", true)])
        .configuration(RenderConfiguration {
            command_line_args: "-windowed".into(),
            exec_cmds: vec!["r.Foo 1".into()],
            output_directory: "{project_dir}/Movies/{sequence}/".into(),
            ..RenderConfiguration::default()
        })
        .preset_overrides(PresetOverrides {
            attachments: Attachments {
                input_files: vec!["Content/notes.txt".into(), "Content/missing.txt".into()],
                ..Attachments::default()
            },
            ..PresetOverrides::default()
        })
        .build()
}

#[test]
fn render_bundle_fills_host_parameters() {
    let project = Project::empty();
    let mut job = render_job(&project);
    job.attach_request(trailer_request()).unwrap();

    let bundle = job.create_job_bundle(&project.history()).unwrap();
    let values = read_yaml(&bundle.join("parameter_values.yaml"));

    assert_eq!(
        parameter_value(&values, "ProjectFilePath").and_then(|v| v.as_str()),
        Some(project.slashed("Game.uproject").as_str())
    );
    assert_eq!(parameter_value(&values, "ExtraCmdArgs").and_then(|v| v.as_str()), Some(""));
    assert_eq!(parameter_value(&values, "Quality").and_then(|v| v.as_str()), Some("high"));

    let args_file = parameter_value(&values, "ExtraCmdArgsFile").and_then(|v| v.as_str()).unwrap();
    assert!(args_file.starts_with(&project.slashed("Saved/FarmSubmitter/ExtraCmdArgs/")), "{args_file}");
    assert_eq!(
        std::fs::read_to_string(args_file).unwrap(),
        "-windowed -execcmds=\"r.Foo 1\" -log"
    );
}

#[test]
fn render_step_is_expanded_from_the_request() {
    let project = Project::empty();
    let mut job = render_job(&project);
    job.attach_request(trailer_request()).unwrap();

    let bundle = job.create_job_bundle(&project.history()).unwrap();
    let template = read_yaml(&bundle.join("template.yaml"));
    assert_eq!(template["name"].as_str(), Some("Render Job"));

    let step = &template["steps"][0];
    assert_eq!(step["name"].as_str(), Some("Render"));
    let range_of = |name: &str| {
        step["parameterSpace"]["taskParameterDefinitions"]
            .as_sequence()
            .unwrap()
            .iter()
            .find(|p| p["name"].as_str() == Some(name))
            .map(|p| p["range"].clone())
            .unwrap()
    };
    assert_eq!(range_of("LevelSequencePath"), yaml("[/Game/Cine/Intro.Intro]"));
    assert_eq!(range_of("LevelPath"), yaml("[/Game/Maps/City.City]"));
    assert_eq!(range_of("ChunkId"), yaml("[0, 1]"));
}

#[test]
fn render_references_cover_host_attachments_and_output() {
    let project = Project::empty();
    project.dir("Config");
    project.file("Content/notes.txt", "notes");
    let mut job = render_job(&project);
    job.attach_request(trailer_request()).unwrap();

    let bundle = job.create_job_bundle(&project.history()).unwrap();
    let refs = read_yaml(&bundle.join("asset_references.yaml"));

    let files = string_list(&refs, &["inputs", "filenames"]);
    assert!(files.contains(&project.slashed("Content/notes.txt")), "{files:?}");
    assert!(!files.iter().any(|f| f.ends_with("missing.txt")), "{files:?}");
    let args_file = job.extra_cmd_args_file().unwrap().to_string_lossy().replace('\\', "/");
    assert!(files.contains(&args_file), "{files:?}");

    assert_eq!(string_list(&refs, &["inputs", "directories"]), [project.slashed("Config")]);
    assert_eq!(string_list(&refs, &["outputs", "directories"]), [project.slashed("Movies/Intro")]);
}

#[test]
fn reattaching_a_request_does_not_compound() {
    let project = Project::empty();
    let mut job = render_job(&project);
    job.attach_request(trailer_request()).unwrap();
    job.attach_request(RenderRequestBuilder::default().job_name("Second").build()).unwrap();

    assert_eq!(job.request().map(|r| r.job_name.as_str()), Some("Second"));
    assert_eq!(job.job().name(), Some("Render Job"));
    assert!(job.command_line_args().iter().all(|a| a != "-windowed"));
}

#[test]
fn dependencies_need_a_request() {
    let project = Project::empty();
    let job = render_job(&project);
    let err = job.collect_request_dependencies().unwrap_err();
    assert_eq!(err.to_string(), "Render request must be provided");
}
