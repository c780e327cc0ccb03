// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while assembling jobs and bundles.

use farm_core::ParameterError;
use farm_template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    /// Template and stored configuration disagree; carries the labelled reason.
    #[error("{0}")]
    Inconsistent(String),
    #[error("Render job should have exactly 1 render step, found {count}")]
    RenderStepCount { count: usize },
    #[error("Render request must be provided")]
    RequestMissing,
    #[error("Render step's parameter \"ChunkSize\" must be provided")]
    ChunkSizeMissing,
    #[error("Render step's parameter \"ChunkSize\" must be a positive integer, got {0}")]
    InvalidChunkSize(String),
    #[error(
        "Render step parameters are not valid. Expected one of: \
         QueueManifestPath; MoviePipelineQueuePath; \
         LevelSequencePath + LevelPath + MoviePipelineConfigurationPath"
    )]
    RenderArgumentsNotSet,
    #[error("path \"{0}\" contains invalid characters (\" | * ? < >)")]
    InvalidPathCharacters(String),
    #[error("no home directory to place job history in")]
    NoHistoryDir,
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to serialize bundle file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
