// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known parameter names understood by render templates.

/// Job-level parameters filled in at submission time.
pub struct JobParameterNames;

impl JobParameterNames {
    pub const PROJECT_FILE_PATH: &'static str = "ProjectFilePath";
    pub const PROJECT_NAME: &'static str = "ProjectName";
    pub const PROJECT_RELATIVE_PATH: &'static str = "ProjectRelativePath";
    pub const EXTRA_CMD_ARGS: &'static str = "ExtraCmdArgs";
    pub const EXTRA_CMD_ARGS_FILE: &'static str = "ExtraCmdArgsFile";
    pub const EXECUTABLE_RELATIVE_PATH: &'static str = "ExecutableRelativePath";
    pub const PERFORCE_STREAM_PATH: &'static str = "PerforceStreamPath";
    pub const PERFORCE_CHANGELIST_NUMBER: &'static str = "PerforceChangelistNumber";
}

/// Step-level task parameters of render steps.
pub struct StepParameterNames;

impl StepParameterNames {
    pub const QUEUE_MANIFEST_PATH: &'static str = "QueueManifestPath";
    pub const MOVIE_PIPELINE_QUEUE_PATH: &'static str = "MoviePipelineQueuePath";
    pub const LEVEL_SEQUENCE_PATH: &'static str = "LevelSequencePath";
    pub const LEVEL_PATH: &'static str = "LevelPath";
    pub const MOVIE_PIPELINE_CONFIGURATION_PATH: &'static str = "MoviePipelineConfigurationPath";
    pub const CHUNK_SIZE: &'static str = "ChunkSize";
    pub const CHUNK_ID: &'static str = "ChunkId";
}
