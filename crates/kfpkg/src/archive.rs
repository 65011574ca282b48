// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A committed `.kfpkg` file.

use crate::ArchiveError;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A deployment archive on disk.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DeploymentArchive {
    pub path: PathBuf,
    /// Member names in archive order.
    pub members: Vec<String>,
    pub size_bytes: u64,
}

impl DeploymentArchive {
    /// Opens an existing archive and lists its members.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let file = std::fs::File::open(path).map_err(|e| ArchiveError::io(path, e))?;
        let size_bytes = file
            .metadata()
            .map_err(|e| ArchiveError::io(path, e))?
            .len();
        let mut zip = zip::ZipArchive::new(file)?;

        let mut members = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            members.push(zip.by_index(i)?.name().to_string());
        }

        Ok(Self {
            path: path.to_path_buf(),
            members,
            size_bytes,
        })
    }

    /// Whether `name` is a member.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Reads and decompresses one member.
    pub fn read_member(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let file =
            std::fs::File::open(&self.path).map_err(|e| ArchiveError::io(&self.path, e))?;
        let mut zip = zip::ZipArchive::new(file)?;
        let mut entry = zip.by_name(name)?;
        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut buf)
            .map_err(|e| ArchiveError::io(&self.path, e))?;
        Ok(buf)
    }

    /// Returns a one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} members, {} bytes [{}]",
            self.path.display(),
            self.members.len(),
            self.size_bytes,
            self.members.join(", "),
        )
    }
}
