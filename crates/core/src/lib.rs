// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! farm-core: shared data model for render farm job bundles

pub mod macros;

pub mod asset_refs;
pub mod host_requirements;
pub mod parameter;
pub mod record;
pub mod request;
pub mod shared_settings;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use asset_refs::{AssetReferences, AssetReferencesDocument};
pub use host_requirements::HostRequirements;
pub use parameter::{
    ParameterDefinition, ParameterError, ParameterType, ParameterValue, ParameterValueEntry,
    StepParameterDefinition,
};
pub use record::{
    load_job_record, parse_job_record, EnvironmentRecord, Format, HostRequirementsRecord,
    JobRecord, ParameterRecord, RecordError, SharedSettingsRecord, StepParameterRecord, StepRecord,
};
#[cfg(any(test, feature = "test-support"))]
pub use request::RenderRequestBuilder;
pub use request::{
    Attachments, EnvironmentOverride, PresetOverrides, RenderConfiguration, RenderRequest, Shot,
    StepOverride,
};
pub use shared_settings::{InitialState, SharedSettings};
