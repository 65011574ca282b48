// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-target archive contents.
//!
//! Every target ships the same base set:
//!
//! | Member            | Source                          |
//! |-------------------|---------------------------------|
//! | `<name>.kmodel`   | `<example_dir>/<name>.kmodel`   |
//! | `flash-list.json` | `<example_dir>/flash-list.json` |
//! | kernel binary     | configured kernel path          |
//!
//! A [`TargetPolicy`] adds the target-specific extras on top of that.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the flashing manifest inside every example directory.
pub const FLASH_LIST_FILE: &str = "flash-list.json";

/// Files a particular target adds to the base archive set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPolicy {
    /// Target (example) name, e.g. `"mnist"`.
    pub name: String,
    /// Extra files, relative to the example directory, that must exist.
    #[serde(default)]
    pub extra_required: Vec<String>,
    /// Extra files included when present.
    #[serde(default)]
    pub optional: Vec<String>,
}

/// Resolved input paths for one archive build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchivePlan {
    pub required: Vec<PathBuf>,
    pub optional: Vec<PathBuf>,
}

impl TargetPolicy {
    /// A policy with no extra files.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra_required: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// Adds a required extra file.
    pub fn require(mut self, file: impl Into<String>) -> Self {
        self.extra_required.push(file.into());
        self
    }

    /// Adds an optional extra file.
    pub fn allow(mut self, file: impl Into<String>) -> Self {
        self.optional.push(file.into());
        self
    }

    /// Base name of the compiled model for this target.
    pub fn model_file(&self) -> String {
        format!("{}.kmodel", self.name)
    }

    /// Built-in policies: `mnist` needs its flash image data, `iris` does not.
    pub fn defaults() -> Vec<TargetPolicy> {
        vec![
            TargetPolicy::new("mnist").require("mnist_images.bin"),
            TargetPolicy::new("iris"),
        ]
    }

    /// Finds the policy for `name`, falling back to the base set only.
    pub fn lookup(policies: &[TargetPolicy], name: &str) -> TargetPolicy {
        policies
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .unwrap_or_else(|| TargetPolicy::new(name))
    }

    /// Resolves the policy against an example directory and kernel binary.
    ///
    /// Order is base set (model, manifest, kernel) then extras in the
    /// order they were declared.
    pub fn plan(&self, example_dir: &Path, kernel: &Path) -> ArchivePlan {
        let mut required = vec![
            example_dir.join(self.model_file()),
            example_dir.join(FLASH_LIST_FILE),
            kernel.to_path_buf(),
        ];
        required.extend(self.extra_required.iter().map(|f| example_dir.join(f)));

        ArchivePlan {
            required,
            optional: self.optional.iter().map(|f| example_dir.join(f)).collect(),
        }
    }
}
