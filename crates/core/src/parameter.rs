// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed parameters carried by jobs, steps and parameter-value lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while coercing raw configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("unknown parameter type \"{0}\"")]
    UnknownType(String),
    #[error("parameter \"{name}\": cannot read \"{raw}\" as {parameter_type}")]
    InvalidValue { name: String, parameter_type: ParameterType, raw: String },
}

/// Value type of a job or step parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterType {
    Int,
    Float,
    String,
    Path,
}

crate::simple_display! {
    ParameterType {
        Int => "INT",
        Float => "FLOAT",
        String => "STRING",
        Path => "PATH",
    }
}

impl FromStr for ParameterType {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INT" => Ok(Self::Int),
            "FLOAT" => Ok(Self::Float),
            "STRING" => Ok(Self::String),
            "PATH" => Ok(Self::Path),
            _ => Err(ParameterError::UnknownType(s.to_string())),
        }
    }
}

impl ParameterType {
    /// Convert a raw configuration string into a value of this type.
    ///
    /// An empty string means "no value". Strings and paths are taken verbatim.
    pub fn coerce(self, name: &str, raw: &str) -> Result<Option<ParameterValue>, ParameterError> {
        if raw.is_empty() {
            return Ok(None);
        }
        let err = || ParameterError::InvalidValue {
            name: name.to_string(),
            parameter_type: self,
            raw: raw.to_string(),
        };
        let value = match self {
            Self::Int => ParameterValue::Int(raw.trim().parse().map_err(|_| err())?),
            Self::Float => ParameterValue::Float(raw.trim().parse().map_err(|_| err())?),
            Self::String | Self::Path => ParameterValue::String(raw.to_string()),
        };
        Ok(Some(value))
    }

    /// Widen a decoded value to this type's representation.
    ///
    /// YAML reads `1` as an integer even when the parameter is FLOAT, and a
    /// numeric-looking default for a STRING parameter as a number.
    pub fn normalize(self, value: ParameterValue) -> ParameterValue {
        match (self, value) {
            (Self::Float, ParameterValue::Int(i)) => ParameterValue::Float(i as f64),
            (Self::String | Self::Path, ParameterValue::Int(i)) => ParameterValue::String(i.to_string()),
            (Self::String | Self::Path, ParameterValue::Float(f)) => {
                ParameterValue::String(f.to_string())
            }
            (_, value) => value,
        }
    }
}

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Int(i64),
    Float(f64),
    String(String),
}

impl ParameterValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParameterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// A job-level parameter: name, type and an optional value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    #[serde(default)]
    pub value: Option<ParameterValue>,
}

impl ParameterDefinition {
    pub fn new(
        name: impl Into<String>,
        parameter_type: ParameterType,
        value: Option<ParameterValue>,
    ) -> Self {
        let value = value.map(|v| parameter_type.normalize(v));
        Self { name: name.into(), parameter_type, value }
    }

    /// Build from a raw (name, type, string value) triple.
    pub fn from_raw(
        name: &str,
        parameter_type: ParameterType,
        raw: &str,
    ) -> Result<Self, ParameterError> {
        Ok(Self::new(name, parameter_type, parameter_type.coerce(name, raw)?))
    }

    pub fn matches(&self, name: &str, parameter_type: ParameterType) -> bool {
        self.name == name && self.parameter_type == parameter_type
    }
}

/// A step parameter: name, type and its task range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    #[serde(default)]
    pub range: Vec<ParameterValue>,
}

impl StepParameterDefinition {
    pub fn new(
        name: impl Into<String>,
        parameter_type: ParameterType,
        range: Vec<ParameterValue>,
    ) -> Self {
        let range = range.into_iter().map(|v| parameter_type.normalize(v)).collect();
        Self { name: name.into(), parameter_type, range }
    }

    /// Build from raw range strings; empty entries are skipped.
    pub fn from_raw(
        name: &str,
        parameter_type: ParameterType,
        raw_range: &[String],
    ) -> Result<Self, ParameterError> {
        let mut range = Vec::with_capacity(raw_range.len());
        for raw in raw_range {
            if let Some(value) = parameter_type.coerce(name, raw)? {
                range.push(value);
            }
        }
        Ok(Self::new(name, parameter_type, range))
    }

    pub fn matches(&self, name: &str, parameter_type: ParameterType) -> bool {
        self.name == name && self.parameter_type == parameter_type
    }
}

/// One entry of a parameter-values list as submitted with a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValueEntry {
    pub name: String,
    pub value: Option<ParameterValue>,
}

impl ParameterValueEntry {
    pub fn new(name: impl Into<String>, value: Option<ParameterValue>) -> Self {
        Self { name: name.into(), value }
    }

    /// True when the entry carries no value or an empty string.
    pub fn is_unfilled(&self) -> bool {
        match &self.value {
            None => true,
            Some(ParameterValue::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
