// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render jobs: a [`Job`] with exactly one render step, driven by a render request.

use crate::bundle::{write_job_bundle, BundleSink};
use crate::cmd_args::resolve_command_line;
use crate::entity::Entity;
use crate::environment::EnvironmentKind;
use crate::error::JobError;
use crate::host::{relative_to_root, DependencyCollector, HostProject, NoDependencies, SourceControl};
use crate::job::{update_parameter_value, Job, JobStep};
use crate::overrides::apply_request;
use crate::paths::{resolve_output_directory, PathContext};
use crate::registry::{Registry, RENDER_KIND};
use crate::render_step::RenderStep;
use farm_core::{
    AssetReferences, JobRecord, ParameterType, ParameterValue, ParameterValueEntry, RenderRequest,
};
use farm_template::{JobParameterNames, JobTemplate};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Subdirectory of the host's saved dir holding command-line files.
pub const CMD_ARGS_DIR: &str = "FarmSubmitter/ExtraCmdArgs";

/// How project files reach render nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStrategy {
    /// Upload project files as job attachments.
    S3,
    /// Sync the project through source control on the worker.
    Ugs,
}

farm_core::simple_display! {
    TransferStrategy {
        S3 => "S3",
        Ugs => "UGS",
    }
}

pub struct RenderJob {
    /// Job as stored, before any request is layered on.
    stored: Job,
    /// Stored job with the current request applied.
    job: Job,
    request: Option<Arc<RenderRequest>>,
    host: HostProject,
    collector: Arc<dyn DependencyCollector>,
    source_control: Option<Arc<dyn SourceControl>>,
    extra_cmd_args_file: Option<PathBuf>,
}

impl std::fmt::Debug for RenderJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderJob")
            .field("job", &self.job)
            .field("request", &self.request)
            .field("host", &self.host)
            .field("strategy", &self.transfer_strategy())
            .field("extra_cmd_args_file", &self.extra_cmd_args_file)
            .finish_non_exhaustive()
    }
}

impl RenderJob {
    /// Wrap a job that has exactly one render step.
    pub fn new(job: Job, host: HostProject) -> Result<Self, JobError> {
        let count = job.steps().iter().filter(|s| s.is_render()).count();
        if count != 1 {
            return Err(JobError::RenderStepCount { count });
        }
        Ok(RenderJob {
            stored: job.clone(),
            job,
            request: None,
            host,
            collector: Arc::new(NoDependencies),
            source_control: None,
            extra_cmd_args_file: None,
        })
    }

    /// Translate a stored record; the render step count is checked first.
    pub fn from_record(
        record: &JobRecord,
        registry: &Registry,
        host: HostProject,
    ) -> Result<Self, JobError> {
        let count = record.steps.iter().filter(|s| s.kind == RENDER_KIND).count();
        if count != 1 {
            return Err(JobError::RenderStepCount { count });
        }
        RenderJob::new(Job::from_record(record, registry)?, host)
    }

    pub fn with_collector(mut self, collector: Arc<dyn DependencyCollector>) -> Self {
        self.collector = collector;
        self
    }

    pub fn with_source_control(mut self, source_control: Arc<dyn SourceControl>) -> Self {
        self.source_control = Some(source_control);
        self
    }

    /// Layer `request` over the stored job, replacing any earlier request.
    pub fn attach_request(&mut self, request: RenderRequest) -> Result<(), JobError> {
        let request = Arc::new(request);
        self.job = apply_request(&self.stored, &request)?;
        self.request = Some(request);
        Ok(())
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    pub fn request(&self) -> Option<&RenderRequest> {
        self.request.as_deref()
    }

    pub fn host(&self) -> &HostProject {
        &self.host
    }

    pub fn extra_cmd_args_file(&self) -> Option<&Path> {
        self.extra_cmd_args_file.as_deref()
    }

    pub fn render_step(&self) -> Option<&RenderStep> {
        self.job.steps().iter().find_map(JobStep::as_render)
    }

    pub fn transfer_strategy(&self) -> TransferStrategy {
        if self.job.environments().iter().any(|e| e.kind() == EnvironmentKind::Ugs) {
            TransferStrategy::Ugs
        } else {
            TransferStrategy::S3
        }
    }

    /// Arguments for the render process, see [`resolve_command_line`].
    pub fn command_line_args(&self) -> Vec<String> {
        let extra = self
            .job
            .find_extra_parameter(JobParameterNames::EXTRA_CMD_ARGS, ParameterType::String)
            .and_then(|p| p.value.as_ref())
            .and_then(ParameterValue::as_str);
        resolve_command_line(
            &self.host,
            self.request.as_deref().map(|r| &r.configuration),
            extra,
        )
    }

    fn write_cmd_args_file(&mut self, content: &str) -> Result<PathBuf, JobError> {
        let dir = self.host.saved_dir.join(CMD_ARGS_DIR);
        std::fs::create_dir_all(&dir).map_err(|source| JobError::Write { path: dir.clone(), source })?;
        let path = dir.join(format!("ExtraCmdArgs-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, content)
            .map_err(|source| JobError::Write { path: path.clone(), source })?;
        tracing::info!(path = %path.display(), "saved render command line");
        self.extra_cmd_args_file = Some(path.clone());
        Ok(path)
    }

    /// Job parameter values with host-derived values filled in.
    ///
    /// Values already set keep their position; parameters without a value
    /// (and `ExtraCmdArgs`, which always moves to the file) follow them.
    /// Writes a fresh command-line file on every call.
    pub fn build_parameter_values(&mut self) -> Result<Vec<ParameterValueEntry>, JobError> {
        let (mut filled, mut unfilled): (Vec<_>, Vec<_>) =
            self.job.build_parameter_values()?.into_iter().partition(|p| {
                !(p.is_unfilled() || p.name == JobParameterNames::EXTRA_CMD_ARGS)
            });

        let args = self.command_line_args().join(" ");
        let args_file = self.write_cmd_args_file(&args)?;

        let mut set = |name: &str, value: String| {
            update_parameter_value(&mut unfilled, name, Some(ParameterValue::String(value)));
        };
        set(JobParameterNames::EXTRA_CMD_ARGS, String::new());
        set(JobParameterNames::EXTRA_CMD_ARGS_FILE, forward_slashes(&args_file));
        set(JobParameterNames::PROJECT_FILE_PATH, forward_slashes(&self.host.project_file));

        if self.transfer_strategy() == TransferStrategy::Ugs {
            if let Some(source_control) = &self.source_control {
                set(
                    JobParameterNames::PERFORCE_STREAM_PATH,
                    source_control.stream_path().unwrap_or_default(),
                );
                set(
                    JobParameterNames::PERFORCE_CHANGELIST_NUMBER,
                    source_control
                        .latest_changelist()
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "latest".to_string()),
                );
                set(JobParameterNames::PROJECT_NAME, self.host.project_name.clone());
                if let Some(root) = source_control.client_root() {
                    set(
                        JobParameterNames::PROJECT_RELATIVE_PATH,
                        relative_to_root(&self.host.project_file, &root),
                    );
                    set(
                        JobParameterNames::EXECUTABLE_RELATIVE_PATH,
                        relative_to_root(&self.host.executable, &root),
                    );
                }
            } else {
                tracing::warn!("no source control attached; leaving sync parameters unset");
            }
        }

        filled.append(&mut unfilled);
        Ok(filled)
    }

    /// Host asset paths the request's sequence and level depend on, then the
    /// sequence and level themselves.
    pub fn collect_request_dependencies(&self) -> Result<Vec<String>, JobError> {
        let request = self.request.as_deref().ok_or(JobError::RequestMissing)?;
        let sequence = strip_object_suffix(&request.sequence_path);
        let level = strip_object_suffix(&request.map_path);

        let mut dependencies = self.collector.collect(sequence);
        dependencies.extend(self.collector.collect(level));
        dependencies.push(sequence.to_string());
        dependencies.push(level.to_string());
        Ok(dependencies)
    }

    /// Dependencies mapped to filesystem paths that exist.
    pub fn dependency_paths(&self) -> Result<Vec<String>, JobError> {
        Ok(self
            .collect_request_dependencies()?
            .iter()
            .filter_map(|d| self.collector.to_filesystem_path(d))
            .filter(|p| p.exists())
            .map(|p| forward_slashes(&p))
            .collect())
    }

    fn existing_project_path(&self, path: &str) -> Option<String> {
        let path = Path::new(path);
        let path = if path.is_absolute() { path.to_path_buf() } else { self.host.project_dir.join(path) };
        path.exists().then(|| forward_slashes(&path))
    }

    pub fn build_template(&self) -> Result<JobTemplate, JobError> {
        self.job.build_template()
    }

    /// Write the bundle; see [`RenderJob::build_parameter_values`] for the
    /// command-line file written alongside it.
    ///
    /// As with [`Job::create_job_bundle`], every artifact is built before the
    /// sink allocates a directory.
    pub fn create_job_bundle(&mut self, sink: &dyn BundleSink) -> Result<PathBuf, JobError> {
        let template = self.build_template()?;
        let values = self.build_parameter_values()?;
        let refs = self.asset_references()?;
        write_job_bundle(sink, &template, &values, &refs)
    }

    /// Fails with [`JobError::RequestMissing`] under the S3 strategy when no
    /// request is attached, since the scene dependencies cannot be collected.
    pub fn asset_references(&self) -> Result<AssetReferences, JobError> {
        let mut refs = self.job.asset_references()?;

        if self.transfer_strategy() == TransferStrategy::S3 {
            refs.input_filenames.extend(self.dependency_paths()?);
            for dir in [self.host.config_dir(), self.host.binaries_dir()] {
                if dir.exists() {
                    refs.input_directories.insert(forward_slashes(&dir));
                }
            }
        }

        if let Some(file) = self.extra_cmd_args_file.as_deref().filter(|f| f.exists()) {
            refs.input_filenames.insert(forward_slashes(file));
        }

        if let Some(request) = self.request.as_deref() {
            let attachments = &request.preset_overrides.attachments;
            refs.input_filenames
                .extend(attachments.input_files.iter().filter_map(|p| self.existing_project_path(p)));
            refs.input_directories.extend(
                attachments.input_directories.iter().filter_map(|p| self.existing_project_path(p)),
            );
            refs.output_directories.extend(
                attachments.output_directories.iter().filter_map(|p| self.existing_project_path(p)),
            );

            let output = &request.configuration.output_directory;
            if !output.is_empty() {
                let context = PathContext::from_request(request, &self.host);
                refs.output_directories.insert(resolve_output_directory(output, &context)?);
            }
        }
        Ok(refs)
    }
}

fn forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `/Game/Maps/Main.Main` -> `/Game/Maps/Main`
fn strip_object_suffix(asset_path: &str) -> &str {
    let name_start = asset_path.rfind('/').map_or(0, |i| i + 1);
    match asset_path[name_start..].rfind('.') {
        Some(dot) => &asset_path[..name_start + dot],
        None => asset_path,
    }
}

#[cfg(test)]
#[path = "render_job_tests.rs"]
mod tests;
