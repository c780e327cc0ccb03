// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render steps: chunked task fan-out driven by a render request.

use crate::entity::Entity;
use crate::error::JobError;
use crate::step::Step;
use farm_core::{
    AssetReferences, ParameterType, ParameterValue, RenderRequest, StepParameterDefinition,
};
use farm_template::{ConsistencyCheckResult, StepParameterNames, StepTemplate};
use std::sync::Arc;

/// Which parameter group drives a render step.
///
/// The groups are mutually exclusive; classification checks them in
/// declaration order and the first complete group wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderArgumentsType {
    /// A pre-built queue manifest file.
    QueueManifestPath,
    /// A saved render queue asset.
    MovieQueueAsset,
    /// Sequence, level and configuration paths.
    RenderData,
    NotSet,
}

farm_core::simple_display! {
    RenderArgumentsType {
        QueueManifestPath => "QUEUE_MANIFEST_PATH",
        MovieQueueAsset => "MRQ_ASSET",
        RenderData => "RENDER_DATA",
        NotSet => "NOT_SET",
    }
}

impl RenderArgumentsType {
    const GROUPS: [(RenderArgumentsType, &'static [&'static str]); 3] = [
        (RenderArgumentsType::QueueManifestPath, &[StepParameterNames::QUEUE_MANIFEST_PATH]),
        (RenderArgumentsType::MovieQueueAsset, &[StepParameterNames::MOVIE_PIPELINE_QUEUE_PATH]),
        (
            RenderArgumentsType::RenderData,
            &[
                StepParameterNames::LEVEL_SEQUENCE_PATH,
                StepParameterNames::LEVEL_PATH,
                StepParameterNames::MOVIE_PIPELINE_CONFIGURATION_PATH,
            ],
        ),
    ];

    /// Classify a set of present parameter names.
    pub fn classify<'a>(names: impl IntoIterator<Item = &'a str>) -> RenderArgumentsType {
        let names: Vec<&str> = names.into_iter().collect();
        Self::GROUPS
            .iter()
            .find(|(_, required)| required.iter().all(|r| names.contains(r)))
            .map(|(kind, _)| *kind)
            .unwrap_or(RenderArgumentsType::NotSet)
    }
}

/// A [`Step`] that renders the shots of an attached [`RenderRequest`].
#[derive(Debug, Clone)]
pub struct RenderStep {
    step: Step,
    request: Option<Arc<RenderRequest>>,
}

impl RenderStep {
    pub fn new(step: Step) -> Self {
        RenderStep { step, request: None }
    }

    pub fn with_request(mut self, request: Arc<RenderRequest>) -> Self {
        self.request = Some(request);
        self
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn step_mut(&mut self) -> &mut Step {
        &mut self.step
    }

    pub fn request(&self) -> Option<&RenderRequest> {
        self.request.as_deref()
    }

    pub fn set_request(&mut self, request: Arc<RenderRequest>) {
        self.request = Some(request);
    }

    pub fn render_arguments_type(&self) -> RenderArgumentsType {
        RenderArgumentsType::classify(self.step.extra_parameters().iter().map(|p| p.name.as_str()))
    }

    /// Number of task chunks: enabled shots divided by `ChunkSize`, rounded up.
    pub fn chunk_ids_count(&self) -> Result<usize, JobError> {
        let request = self.request.as_deref().ok_or(JobError::RequestMissing)?;
        let chunk_size = self
            .step
            .find_extra_parameter(StepParameterNames::CHUNK_SIZE, ParameterType::Int)
            .and_then(|p| p.range.first())
            .ok_or(JobError::ChunkSizeMissing)?;
        let chunk_size = match chunk_size.as_int() {
            Some(size) if size > 0 => size as usize,
            _ => return Err(JobError::InvalidChunkSize(chunk_size.to_string())),
        };
        Ok(request.enabled_shot_count().div_ceil(chunk_size))
    }

    /// Copy of the inner step with request-derived parameters filled in.
    ///
    /// A step with a `ChunkId` parameter cannot build without a request.
    fn resolved_step(&self) -> Result<Step, JobError> {
        let mut step = self.step.clone();
        if let Some(request) = self.request.as_deref() {
            Self::fill_render_arguments(&mut step, self.render_arguments_type(), request);
        }

        if step.find_extra_parameter(StepParameterNames::CHUNK_ID, ParameterType::Int).is_some() {
            let count = self.chunk_ids_count()?;
            let ids = (0..count as i64).map(ParameterValue::Int).collect();
            step.update_extra_parameter(StepParameterDefinition::new(
                StepParameterNames::CHUNK_ID,
                ParameterType::Int,
                ids,
            ));
        }
        Ok(step)
    }

    /// Asset paths are passed on verbatim, object suffix included.
    fn fill_render_arguments(step: &mut Step, kind: RenderArgumentsType, request: &RenderRequest) {
        let path_param = |name: &str, value: &str| {
            StepParameterDefinition::new(name, ParameterType::Path, vec![value.into()])
        };
        match kind {
            RenderArgumentsType::QueueManifestPath => {
                if let Some(manifest) = &request.manifest_path {
                    step.update_extra_parameter(path_param(
                        StepParameterNames::QUEUE_MANIFEST_PATH,
                        manifest,
                    ));
                }
            }
            RenderArgumentsType::MovieQueueAsset => {
                if let Some(asset) = &request.queue_asset_path {
                    step.update_extra_parameter(path_param(
                        StepParameterNames::MOVIE_PIPELINE_QUEUE_PATH,
                        asset,
                    ));
                }
            }
            RenderArgumentsType::RenderData => {
                step.update_extra_parameter(path_param(
                    StepParameterNames::LEVEL_SEQUENCE_PATH,
                    &request.sequence_path,
                ));
                step.update_extra_parameter(path_param(StepParameterNames::LEVEL_PATH, &request.map_path));
                if let Some(configuration) = &request.configuration_path {
                    step.update_extra_parameter(path_param(
                        StepParameterNames::MOVIE_PIPELINE_CONFIGURATION_PATH,
                        configuration,
                    ));
                }
            }
            RenderArgumentsType::NotSet => {}
        }
    }
}

impl Entity for RenderStep {
    type Template = StepTemplate;

    fn check_parameters_consistency(&self) -> Result<ConsistencyCheckResult, JobError> {
        self.step.check_parameters_consistency()
    }

    fn build_template_unchecked(&self) -> Result<StepTemplate, JobError> {
        if self.render_arguments_type() == RenderArgumentsType::NotSet {
            return Err(JobError::RenderArgumentsNotSet);
        }
        self.resolved_step()?.build_template_unchecked()
    }

    fn build_template(&self) -> Result<StepTemplate, JobError> {
        if self.render_arguments_type() == RenderArgumentsType::NotSet {
            return Err(JobError::RenderArgumentsNotSet);
        }
        self.validate_parameters()?;
        self.build_template_unchecked()
    }

    fn asset_references(&self) -> Result<AssetReferences, JobError> {
        self.step.asset_references()
    }
}

#[cfg(test)]
#[path = "render_step_tests.rs"]
mod tests;
