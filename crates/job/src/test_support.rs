// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template fixtures and fake collaborators for job tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::bundle::BundleSink;
use crate::host::{DependencyCollector, HostProject, SourceControl};
use farm_template::TemplateSource;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ── Template fixtures ───────────────────────────────────────────────────

pub const JOB_TEMPLATE: &str = r#"specificationVersion: jobtemplate-2023-09
name: JobA
parameterDefinitions:
  - name: ParamA
    type: PATH
    objectType: FILE
    dataFlow: IN
    default: path/to/file
  - name: ParamB
    type: STRING
    default: foo
steps:
  - name: StepA
    script:
      actions:
        onRun:
          command: echo
"#;

pub const STEP_TEMPLATE: &str = r#"name: StepA
parameterSpace:
  taskParameterDefinitions:
    - name: ParamA
      type: PATH
      range: [path/to/file]
    - name: ParamC
      type: INT
      range: [1]
script:
  actions:
    onRun:
      command: "{{Task.File.Run}}"
"#;

pub const ENVIRONMENT_TEMPLATE: &str = r#"name: EnvironmentA
variables:
  VARIABLE_A: VALUE_A
  VARIABLE_B: VALUE_B
script:
  actions:
    onEnter:
      command: "{{Env.File.Init}}"
"#;

/// Render step driven by sequence, level and configuration paths.
pub const RENDER_STEP_TEMPLATE: &str = r#"name: Render
parameterSpace:
  taskParameterDefinitions:
    - name: LevelSequencePath
      type: PATH
      range: [/Game/Seq]
    - name: LevelPath
      type: PATH
      range: [/Game/Map]
    - name: MoviePipelineConfigurationPath
      type: PATH
      range: [/Game/Config]
    - name: ChunkSize
      type: INT
      range: [1]
    - name: ChunkId
      type: INT
      range: [0]
  combination: "(LevelSequencePath, LevelPath, MoviePipelineConfigurationPath, ChunkSize) * ChunkId"
script:
  actions:
    onRun:
      command: render
"#;

pub const RENDER_JOB_TEMPLATE: &str = r#"specificationVersion: jobtemplate-2023-09
name: Render Job
parameterDefinitions:
  - name: ProjectFilePath
    type: PATH
  - name: ExtraCmdArgs
    type: STRING
    default: "-log"
  - name: ExtraCmdArgsFile
    type: PATH
  - name: Quality
    type: STRING
    default: high
steps: []
"#;

pub const UGS_ENVIRONMENT_TEMPLATE: &str = r#"name: UGS Sync
variables:
  UGS_STREAM: ""
"#;

pub const UGS_JOB_TEMPLATE: &str = r#"specificationVersion: jobtemplate-2023-09
name: UGS Render Job
parameterDefinitions:
  - name: ProjectFilePath
    type: PATH
  - name: ProjectName
    type: STRING
  - name: ProjectRelativePath
    type: PATH
  - name: ExecutableRelativePath
    type: PATH
  - name: PerforceStreamPath
    type: STRING
  - name: PerforceChangelistNumber
    type: STRING
  - name: ExtraCmdArgs
    type: STRING
  - name: ExtraCmdArgsFile
    type: PATH
steps: []
"#;

/// Parse a fixture; panics on malformed YAML.
#[allow(clippy::expect_used)]
pub fn parse<T: DeserializeOwned>(yaml: &str) -> T {
    serde_yaml::from_str(yaml).expect("fixture template is valid YAML")
}

/// In-memory template source for a fixture.
pub fn source<T: DeserializeOwned>(yaml: &str) -> TemplateSource<T> {
    TemplateSource::from_template(parse(yaml))
}

/// Write a fixture into `dir` and return its path.
#[allow(clippy::expect_used)]
pub fn write_template(dir: &Path, file_name: &str, yaml: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, yaml).expect("fixture template is writable");
    path
}

/// Host snapshot rooted at `project_dir`, with the saved dir inside it.
pub fn host_project(project_dir: &Path) -> HostProject {
    HostProject {
        project_file: project_dir.join("Game.uproject"),
        project_name: "Game".to_string(),
        project_dir: project_dir.to_path_buf(),
        saved_dir: project_dir.join("Saved"),
        executable: project_dir.join("Engine/Binaries/UnrealEditor-Cmd"),
        inherited_command_line: String::new(),
        additional_command_line: String::new(),
    }
}

// ── Fake collaborators ──────────────────────────────────────────────────

/// Sink that creates one numbered directory per bundle under `root`.
pub struct FakeSink {
    root: PathBuf,
    created: Mutex<Vec<(String, String)>>,
}

impl FakeSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FakeSink { root: root.into(), created: Mutex::new(Vec::new()) }
    }

    /// `(submitter, job_name)` pairs in call order.
    pub fn created(&self) -> Vec<(String, String)> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl BundleSink for FakeSink {
    fn create_bundle_dir(&self, submitter: &str, job_name: &str) -> io::Result<PathBuf> {
        let mut created = self.created.lock().map_err(|_| io::Error::other("poisoned"))?;
        created.push((submitter.to_string(), job_name.to_string()));
        let dir = self.root.join(format!("bundle-{}", created.len()));
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Collector answering from fixed tables.
#[derive(Debug, Default)]
pub struct FakeCollector {
    pub dependencies: HashMap<String, Vec<String>>,
    pub filesystem: HashMap<String, PathBuf>,
}

impl DependencyCollector for FakeCollector {
    fn collect(&self, asset_path: &str) -> Vec<String> {
        self.dependencies.get(asset_path).cloned().unwrap_or_default()
    }

    fn to_filesystem_path(&self, asset_path: &str) -> Option<PathBuf> {
        self.filesystem.get(asset_path).cloned()
    }
}

#[derive(Debug, Default)]
pub struct FakeSourceControl {
    pub stream: Option<String>,
    pub changelist: Option<u64>,
    pub client_root: Option<PathBuf>,
}

impl SourceControl for FakeSourceControl {
    fn stream_path(&self) -> Option<String> {
        self.stream.clone()
    }

    fn latest_changelist(&self) -> Option<u64> {
        self.changelist
    }

    fn client_root(&self) -> Option<PathBuf> {
        self.client_root.clone()
    }
}
