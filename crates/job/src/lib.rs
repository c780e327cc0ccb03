// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! farm-job: template-backed jobs, request overrides, and job bundle output

pub mod bundle;
pub mod cmd_args;
pub mod entity;
pub mod env;
pub mod environment;
pub mod error;
pub mod host;
pub mod job;
pub mod overrides;
pub mod paths;
pub mod registry;
pub mod render_job;
pub mod render_step;
pub mod step;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bundle::{write_job_bundle, BundleSink, JobHistoryDir};
pub use entity::Entity;
pub use environment::{Environment, EnvironmentKind};
pub use error::JobError;
pub use host::{DependencyCollector, HostProject, NoDependencies, SourceControl};
pub use job::{update_parameter_value, Job, JobBuilder, JobStep};
pub use overrides::apply_request;
pub use registry::Registry;
pub use render_job::{RenderJob, TransferStrategy};
pub use render_step::{RenderArgumentsType, RenderStep};
pub use step::Step;
