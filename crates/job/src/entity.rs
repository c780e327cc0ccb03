// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Behavior shared by jobs, steps and environments.

use crate::error::JobError;
use farm_core::AssetReferences;
use farm_template::ConsistencyCheckResult;

/// A template-backed unit of a job.
///
/// Implementors provide the consistency check and the raw build; the
/// default [`Entity::build_template`] refuses to build a drifted entity.
pub trait Entity {
    /// Template document this entity builds.
    type Template;

    /// Compare the entity's configuration with its template.
    ///
    /// Fails only when the template itself cannot be loaded.
    fn check_parameters_consistency(&self) -> Result<ConsistencyCheckResult, JobError>;

    /// Build the template from current state without validating first.
    fn build_template_unchecked(&self) -> Result<Self::Template, JobError>;

    fn validate_parameters(&self) -> Result<(), JobError> {
        let result = self.check_parameters_consistency()?;
        if result.passed {
            Ok(())
        } else {
            Err(JobError::Inconsistent(result.reason))
        }
    }

    fn build_template(&self) -> Result<Self::Template, JobError> {
        self.validate_parameters()?;
        self.build_template_unchecked()
    }

    fn asset_references(&self) -> Result<AssetReferences, JobError> {
        Ok(AssetReferences::new())
    }
}
