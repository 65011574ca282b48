// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII staging directory that is removed on drop.
//!
//! [`StagingArea`] is how the builder guarantees cleanup: the staging
//! directory is a [`tempfile::TempDir`] owned by the guard, so it disappears
//! when the guard goes out of scope, whether the build returned `Ok`, an
//! error via `?`, or unwound.

use crate::ArchiveError;
use std::path::{Path, PathBuf};

/// A file copied into the staging area.
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Flat archive member name (the source's base name).
    pub name: String,
    /// Location of the copy inside the staging directory.
    pub path: PathBuf,
    /// Where it was copied from.
    pub origin: PathBuf,
}

/// An isolated, flat staging directory for one archive build.
///
/// # Example
/// ```ignore
/// let mut staging = StagingArea::acquire(out_dir)?;
/// staging.stage(Path::new("mnist.kmodel"))?;
/// drop(staging);               // directory removed
/// ```
pub struct StagingArea {
    /// Removes the directory when dropped.
    dir: tempfile::TempDir,
    staged: Vec<StagedFile>,
}

impl StagingArea {
    /// Creates a fresh staging directory inside `parent`.
    ///
    /// Staging next to the output keeps the final copy on one filesystem.
    pub fn acquire(parent: &Path) -> Result<Self, ArchiveError> {
        let dir = tempfile::Builder::new()
            .prefix(".kfpkg-staging-")
            .tempdir_in(parent)
            .map_err(|e| ArchiveError::io(parent, e))?;
        tracing::debug!("staging: acquired {}", dir.path().display());
        Ok(Self {
            dir,
            staged: Vec::new(),
        })
    }

    /// Copies `src` into the staging directory under its base name.
    ///
    /// Returns [`ArchiveError::DuplicateMember`] if that name is taken.
    pub fn stage(&mut self, src: &Path) -> Result<&StagedFile, ArchiveError> {
        let name = src
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ArchiveError::InvalidMemberName {
                path: src.to_path_buf(),
            })?
            .to_string();

        if self.staged.iter().any(|f| f.name == name) {
            return Err(ArchiveError::DuplicateMember { name });
        }

        let dest = self.dir.path().join(&name);
        std::fs::copy(src, &dest).map_err(|e| ArchiveError::io(src, e))?;
        tracing::debug!("staging: {} -> {}", src.display(), name);

        self.staged.push(StagedFile {
            name,
            path: dest,
            origin: src.to_path_buf(),
        });
        Ok(&self.staged[self.staged.len() - 1])
    }

    /// The staging directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Staged files in the order they were added.
    pub fn files(&self) -> &[StagedFile] {
        &self.staged
    }

    /// Looks up a staged file by member name.
    pub fn get(&self, name: &str) -> Option<&StagedFile> {
        self.staged.iter().find(|f| f.name == name)
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        tracing::debug!(
            "staging: releasing {} ({} files)",
            self.dir.path().display(),
            self.staged.len()
        );
    }
}

impl std::fmt::Debug for StagingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingArea")
            .field("path", &self.dir.path())
            .field("files", &self.staged.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_and_release() {
        let out = tempfile::tempdir().unwrap();
        let src_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("mnist.kmodel");
        std::fs::write(&src, b"kmodel").unwrap();

        let staged_dir;
        {
            let mut staging = StagingArea::acquire(out.path()).unwrap();
            staged_dir = staging.path().to_path_buf();
            let f = staging.stage(&src).unwrap();
            assert_eq!(f.name, "mnist.kmodel");
            assert_eq!(std::fs::read(&f.path).unwrap(), b"kmodel");
            assert!(staged_dir.starts_with(out.path()));
        }
        assert!(!staged_dir.exists());
    }

    #[test]
    fn test_duplicate_base_name() {
        let out = tempfile::tempdir().unwrap();
        let a = out.path().join("a");
        let b = out.path().join("b");
        std::fs::create_dir_all(&a).unwrap();
        std::fs::create_dir_all(&b).unwrap();
        std::fs::write(a.join("kernel.bin"), b"1").unwrap();
        std::fs::write(b.join("kernel.bin"), b"2").unwrap();

        let mut staging = StagingArea::acquire(out.path()).unwrap();
        staging.stage(&a.join("kernel.bin")).unwrap();
        let err = staging.stage(&b.join("kernel.bin")).unwrap_err();
        assert!(matches!(err, ArchiveError::DuplicateMember { name } if name == "kernel.bin"));
        assert_eq!(staging.files().len(), 1);
        assert!(staging.get("kernel.bin").is_some());
    }

    #[test]
    fn test_released_on_error_path() {
        let out = tempfile::tempdir().unwrap();
        let mut staging = StagingArea::acquire(out.path()).unwrap();
        let staged_dir = staging.path().to_path_buf();

        let err = staging.stage(&out.path().join("does-not-exist.bin")).unwrap_err();
        assert!(matches!(err, ArchiveError::Io { .. }));
        drop(staging);

        assert!(!staged_dir.exists());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }
}
