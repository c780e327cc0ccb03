// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-order rendering of job templates.

use crate::loader::TemplateError;
use crate::model::JobTemplate;
use serde_yaml::{Mapping, Value};

/// Top-level keys of a written job template, in output order.
pub const TEMPLATE_KEY_ORDER: [&str; 5] =
    ["specificationVersion", "name", "parameterDefinitions", "jobEnvironments", "steps"];

/// Render a job template as an ordered mapping.
///
/// Keys outside [`TEMPLATE_KEY_ORDER`] are dropped, as is an empty
/// `jobEnvironments` list.
pub fn serialize_template(template: &JobTemplate) -> Result<Mapping, TemplateError> {
    let mut source = match serde_yaml::to_value(template)? {
        Value::Mapping(map) => map,
        _ => return Ok(Mapping::new()),
    };

    let mut ordered = Mapping::new();
    for key in TEMPLATE_KEY_ORDER {
        let Some(value) = source.remove(key) else {
            continue;
        };
        if key == "jobEnvironments" && matches!(&value, Value::Sequence(s) if s.is_empty()) {
            continue;
        }
        ordered.insert(Value::from(key), value);
    }
    Ok(ordered)
}

/// [`serialize_template`] as YAML text.
pub fn template_to_yaml(template: &JobTemplate) -> Result<String, TemplateError> {
    Ok(serde_yaml::to_string(&serialize_template(template)?)?)
}

#[cfg(test)]
#[path = "serialize_tests.rs"]
mod tests;
