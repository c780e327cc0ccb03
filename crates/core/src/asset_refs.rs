// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Files and directories a job reads and writes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set-valued record of job inputs and outputs.
///
/// Sets keep the record free of duplicates and make [`AssetReferences::union`]
/// commutative and idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetReferences {
    pub input_filenames: BTreeSet<String>,
    pub input_directories: BTreeSet<String>,
    pub output_directories: BTreeSet<String>,
}

impl AssetReferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.input_filenames.is_empty()
            && self.input_directories.is_empty()
            && self.output_directories.is_empty()
    }

    /// Field-wise union of two records.
    pub fn union(&self, other: &AssetReferences) -> AssetReferences {
        AssetReferences {
            input_filenames: self.input_filenames.union(&other.input_filenames).cloned().collect(),
            input_directories: self
                .input_directories
                .union(&other.input_directories)
                .cloned()
                .collect(),
            output_directories: self
                .output_directories
                .union(&other.output_directories)
                .cloned()
                .collect(),
        }
    }

    /// In-place variant of [`AssetReferences::union`].
    pub fn merge(&mut self, other: AssetReferences) {
        self.input_filenames.extend(other.input_filenames);
        self.input_directories.extend(other.input_directories);
        self.output_directories.extend(other.output_directories);
    }

    /// Serializable `{inputs: {filenames, directories}, outputs: {directories}}` form.
    pub fn to_document(&self) -> AssetReferencesDocument {
        AssetReferencesDocument {
            asset_references: AssetReferencesBody {
                inputs: Inputs {
                    filenames: self.input_filenames.iter().cloned().collect(),
                    directories: self.input_directories.iter().cloned().collect(),
                },
                outputs: Outputs {
                    directories: self.output_directories.iter().cloned().collect(),
                },
            },
        }
    }
}

impl From<AssetReferencesDocument> for AssetReferences {
    fn from(doc: AssetReferencesDocument) -> Self {
        let body = doc.asset_references;
        AssetReferences {
            input_filenames: body.inputs.filenames.into_iter().collect(),
            input_directories: body.inputs.directories.into_iter().collect(),
            output_directories: body.outputs.directories.into_iter().collect(),
        }
    }
}

/// On-disk shape of an asset references file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReferencesDocument {
    pub asset_references: AssetReferencesBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReferencesBody {
    #[serde(default)]
    pub inputs: Inputs,
    #[serde(default)]
    pub outputs: Outputs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(default)]
    pub filenames: Vec<String>,
    #[serde(default)]
    pub directories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub directories: Vec<String>,
}

#[cfg(test)]
#[path = "asset_refs_tests.rs"]
mod tests;
