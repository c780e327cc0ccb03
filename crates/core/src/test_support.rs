// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::parameter::{ParameterDefinition, ParameterType, ParameterValue};
use crate::record::{ParameterRecord, StepParameterRecord, StepRecord, DEFAULT_KIND};
use std::path::PathBuf;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for parameter types.
pub mod strategies {
    use crate::parameter::{ParameterDefinition, ParameterType, ParameterValue};
    use proptest::prelude::*;

    pub fn arb_parameter_type() -> impl Strategy<Value = ParameterType> {
        prop_oneof![
            Just(ParameterType::Int),
            Just(ParameterType::Float),
            Just(ParameterType::String),
            Just(ParameterType::Path),
        ]
    }

    /// A definition whose value agrees with its type.
    pub fn arb_parameter_definition() -> impl Strategy<Value = ParameterDefinition> {
        ("[A-Z][a-zA-Z]{0,7}", arb_parameter_type()).prop_flat_map(|(name, ty)| {
            let value = match ty {
                ParameterType::Int => any::<i32>().prop_map(|i| ParameterValue::Int(i64::from(i))).boxed(),
                ParameterType::Float => (-1000i32..1000)
                    .prop_map(|i| ParameterValue::Float(f64::from(i) / 4.0))
                    .boxed(),
                ParameterType::String | ParameterType::Path => {
                    "[a-z/._]{1,12}".prop_map(ParameterValue::String).boxed()
                }
            };
            proptest::option::of(value)
                .prop_map(move |value| ParameterDefinition::new(name.clone(), ty, value))
        })
    }

    /// Definitions with pairwise-distinct names.
    pub fn arb_parameter_list(max: usize) -> impl Strategy<Value = Vec<ParameterDefinition>> {
        proptest::collection::vec(arb_parameter_definition(), 0..max).prop_map(|mut defs| {
            let mut seen = std::collections::HashSet::new();
            defs.retain(|d| seen.insert(d.name.clone()));
            defs
        })
    }
}

// ── Record factory functions ────────────────────────────────────────────

pub fn param(name: &str, parameter_type: ParameterType, value: impl Into<ParameterValue>) -> ParameterDefinition {
    ParameterDefinition::new(name, parameter_type, Some(value.into()))
}

pub fn param_record(name: &str, parameter_type: ParameterType, value: &str) -> ParameterRecord {
    ParameterRecord::new(name, parameter_type, value)
}

pub fn step_param_record(name: &str, parameter_type: ParameterType, range: &[&str]) -> StepParameterRecord {
    StepParameterRecord::new(name, parameter_type, range.iter().map(|s| s.to_string()).collect())
}

pub fn step_record(kind: &str, name: &str, template_path: impl Into<PathBuf>) -> StepRecord {
    StepRecord {
        kind: if kind.is_empty() { DEFAULT_KIND.to_string() } else { kind.to_string() },
        name: Some(name.to_string()),
        template_path: Some(template_path.into()),
        parameters: Vec::new(),
        environments: Vec::new(),
        depends_on: Vec::new(),
    }
}
