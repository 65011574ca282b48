// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Read-only view of `flash-list.json`.
//!
//! The manifest tells the flashing tool where each binary goes. It is copied
//! into the archive verbatim; this view only exists to cross-check it
//! against the archive members.
//!
//! # Format
//! ```json
//! {
//!   "version": "0.1.0",
//!   "files": [
//!     { "address": 0,       "bin": "acoral-kernel.bin", "sha256Prefix": true },
//!     { "address": 12582912, "bin": "mnist.kmodel",     "sha256Prefix": false }
//!   ]
//! }
//! ```

use crate::ArchiveError;
use std::collections::HashSet;
use std::path::Path;

/// Deserialized `flash-list.json`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FlashList {
    #[serde(default)]
    pub version: String,
    pub files: Vec<FlashListEntry>,
}

/// One binary to flash.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FlashListEntry {
    /// Flash address the binary is written to.
    pub address: u64,
    /// Archive member name.
    pub bin: String,
    #[serde(rename = "sha256Prefix", default)]
    pub sha256_prefix: bool,
}

impl FlashList {
    /// Loads a flash list from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, ArchiveError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ArchiveError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Parses a flash list from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        let list: Self = serde_json::from_str(json)?;
        Ok(list)
    }

    /// Names of the binaries the list refers to.
    pub fn bins(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.bin.as_str())
    }

    /// Cross-checks the list against a set of archive members.
    ///
    /// Returns one human-readable finding per problem: a listed binary that
    /// is not a member, or two entries sharing a flash address.
    pub fn lint<S: AsRef<str>>(&self, members: &[S]) -> Vec<String> {
        let members: HashSet<&str> = members.iter().map(|m| m.as_ref()).collect();
        let mut findings = Vec::new();

        for entry in &self.files {
            if !members.contains(entry.bin.as_str()) {
                findings.push(format!(
                    "flash list references '{}' which is not in the archive",
                    entry.bin
                ));
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.files {
            if !seen.insert(entry.address) {
                findings.push(format!(
                    "flash list maps more than one binary to address {:#x}",
                    entry.address
                ));
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "0.1.0",
        "files": [
            { "address": 0, "bin": "acoral-kernel.bin", "sha256Prefix": true },
            { "address": 12582912, "bin": "mnist.kmodel", "sha256Prefix": false },
            { "address": 13631488, "bin": "mnist_images.bin", "sha256Prefix": false }
        ]
    }"#;

    #[test]
    fn test_parse() {
        let list = FlashList::from_json(SAMPLE).unwrap();
        assert_eq!(list.version, "0.1.0");
        assert_eq!(list.files.len(), 3);
        assert!(list.files[0].sha256_prefix);
        assert_eq!(list.files[1].address, 0xC0_0000);
        assert_eq!(list.files[2].address, 0xD0_0000);
        assert_eq!(
            list.bins().collect::<Vec<_>>(),
            vec!["acoral-kernel.bin", "mnist.kmodel", "mnist_images.bin"]
        );
    }

    #[test]
    fn test_lint_clean() {
        let list = FlashList::from_json(SAMPLE).unwrap();
        let members = [
            "mnist.kmodel",
            "flash-list.json",
            "acoral-kernel.bin",
            "mnist_images.bin",
        ];
        assert!(list.lint(&members).is_empty());
    }

    #[test]
    fn test_lint_missing_member_and_address_clash() {
        let mut list = FlashList::from_json(SAMPLE).unwrap();
        list.files[2].address = 0;
        let findings = list.lint(&["mnist.kmodel", "acoral-kernel.bin"]);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].contains("mnist_images.bin"));
        assert!(findings[1].contains("0x0"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            FlashList::from_json("{ not json"),
            Err(ArchiveError::FlashList(_))
        ));
    }
}
