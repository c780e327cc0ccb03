// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker host requirements in job-template form.

use crate::record::{Bounds, HostRequirementsRecord};
use serde::{Deserialize, Serialize};

pub const AMOUNT_VCPU: &str = "amount.worker.vcpu";
pub const AMOUNT_MEMORY: &str = "amount.worker.memory";
pub const AMOUNT_GPU: &str = "amount.worker.gpu";
pub const AMOUNT_GPU_MEMORY: &str = "amount.worker.gpu.memory";
pub const AMOUNT_DISK_SCRATCH: &str = "amount.worker.disk.scratch";
pub const ATTR_OS_FAMILY: &str = "attr.worker.os.family";
pub const ATTR_CPU_ARCH: &str = "attr.worker.cpu.arch";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountRequirement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRequirement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<String>,
}

/// Constraints on the workers a step may run on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostRequirements {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amounts: Vec<AmountRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeRequirement>,
}

impl HostRequirements {
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty() && self.attributes.is_empty()
    }

    /// Translate a stored record.
    ///
    /// Returns `None` when the record runs on all workers or sets nothing.
    pub fn from_record(record: &HostRequirementsRecord) -> Option<HostRequirements> {
        if record.run_on_all_worker_nodes {
            return None;
        }

        let mut requirements = HostRequirements::default();
        for (name, bounds) in [
            (AMOUNT_VCPU, record.cpus),
            (AMOUNT_MEMORY, record.memory_mib),
            (AMOUNT_GPU, record.gpus),
            (AMOUNT_GPU_MEMORY, record.gpu_memory_mib),
            (AMOUNT_DISK_SCRATCH, record.scratch_space_gib),
        ] {
            if let Some(amount) = amount(name, bounds) {
                requirements.amounts.push(amount);
            }
        }
        for (name, value) in [
            (ATTR_OS_FAMILY, &record.operating_system),
            (ATTR_CPU_ARCH, &record.cpu_architecture),
        ] {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                requirements.attributes.push(AttributeRequirement {
                    name: name.to_string(),
                    any_of: vec![value.to_lowercase()],
                    all_of: Vec::new(),
                });
            }
        }

        if requirements.is_empty() {
            None
        } else {
            Some(requirements)
        }
    }
}

fn amount(name: &str, bounds: Bounds) -> Option<AmountRequirement> {
    if bounds.is_open() {
        return None;
    }
    Some(AmountRequirement { name: name.to_string(), min: bounds.min, max: bounds.max })
}

#[cfg(test)]
#[path = "host_requirements_tests.rs"]
mod tests;
