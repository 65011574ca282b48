// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Archive assembly and atomic commit.

use crate::flash_list::FlashList;
use crate::policy::FLASH_LIST_FILE;
use crate::{ArchiveError, DeploymentArchive, StagingArea, TargetPolicy};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Builds `.kfpkg` archives into one output directory.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    output_dir: PathBuf,
}

impl ArchiveBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the archive for `example_name` is committed to.
    pub fn archive_path(&self, example_name: &str) -> PathBuf {
        self.output_dir.join(format!("{example_name}.kfpkg"))
    }

    /// Packages `required` then the present `optional` files into
    /// `<output_dir>/<example_name>.kfpkg`.
    ///
    /// Every required file is checked before anything touches the disk. The
    /// first missing one is reported as [`ArchiveError::MissingArtifact`].
    /// Members are stored flat under their base names, deflated, with a
    /// fixed timestamp so identical inputs give identical archives.
    pub fn build(
        &self,
        example_name: &str,
        required: &[PathBuf],
        optional: &[PathBuf],
    ) -> Result<DeploymentArchive, ArchiveError> {
        if example_name.is_empty()
            || example_name.contains(['/', '\\'])
            || example_name == "."
            || example_name == ".."
        {
            return Err(ArchiveError::InvalidName {
                name: example_name.to_string(),
            });
        }

        if let Some(missing) = required.iter().find(|p| !p.is_file()) {
            return Err(ArchiveError::MissingArtifact {
                path: missing.clone(),
            });
        }
        let present_optional: Vec<&PathBuf> = optional
            .iter()
            .filter(|p| {
                let present = p.is_file();
                if !present {
                    tracing::warn!("optional file {} not found, skipping", p.display());
                }
                present
            })
            .collect();

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ArchiveError::io(&self.output_dir, e))?;

        let mut staging = StagingArea::acquire(&self.output_dir)?;
        for path in required.iter().chain(present_optional) {
            staging.stage(path)?;
        }

        let archive_path = self.archive_path(example_name);
        let archive = commit(&staging, &archive_path)?;
        tracing::info!("Packaged {}", archive.summary());
        Ok(archive)
    }

    /// Builds the archive for a configured target.
    ///
    /// After committing, the example's `flash-list.json` is checked against
    /// the member list and any inconsistency is logged as a warning.
    pub fn build_target(
        &self,
        policy: &TargetPolicy,
        example_dir: &Path,
        kernel: &Path,
    ) -> Result<DeploymentArchive, ArchiveError> {
        let plan = policy.plan(example_dir, kernel);
        let archive = self.build(&policy.name, &plan.required, &plan.optional)?;

        match FlashList::from_file(&example_dir.join(FLASH_LIST_FILE)) {
            Ok(list) => {
                for finding in list.lint(&archive.members) {
                    tracing::warn!("{}: {finding}", policy.name);
                }
            }
            Err(e) => tracing::warn!("{}: could not check flash list: {e}", policy.name),
        }

        Ok(archive)
    }
}

fn member_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

/// Zips the staged files into a temporary file beside `archive_path`, then
/// renames it into place. The temporary file is deleted if anything fails.
fn commit(staging: &StagingArea, archive_path: &Path) -> Result<DeploymentArchive, ArchiveError> {
    let parent = archive_path.parent().unwrap_or_else(|| Path::new("."));
    let mut partial = tempfile::Builder::new()
        .prefix(".kfpkg-")
        .suffix(".partial")
        .tempfile_in(parent)
        .map_err(|e| ArchiveError::io(parent, e))?;

    {
        let mut zip = zip::ZipWriter::new(partial.as_file_mut());
        for staged in staging.files() {
            zip.start_file(staged.name.as_str(), member_options())?;
            let mut src = std::fs::File::open(&staged.path)
                .map_err(|e| ArchiveError::io(&staged.path, e))?;
            std::io::copy(&mut src, &mut zip).map_err(|e| ArchiveError::io(&staged.path, e))?;
        }
        zip.finish()?;
    }

    partial
        .as_file()
        .sync_all()
        .map_err(|e| ArchiveError::io(partial.path(), e))?;
    partial
        .persist(archive_path)
        .map_err(|e| ArchiveError::io(archive_path, e.error))?;

    let size_bytes = std::fs::metadata(archive_path)
        .map_err(|e| ArchiveError::io(archive_path, e))?
        .len();

    Ok(DeploymentArchive {
        path: archive_path.to_path_buf(),
        members: staging.files().iter().map(|f| f.name.clone()).collect(),
        size_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        _root: tempfile::TempDir,
        example_dir: PathBuf,
        kernel: PathBuf,
    }

    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let example_dir = root.path().join("example").join("mnist");
        let build_dir = root.path().join("build");
        std::fs::create_dir_all(&example_dir).unwrap();
        std::fs::create_dir_all(&build_dir).unwrap();

        std::fs::write(example_dir.join("mnist.kmodel"), vec![0xAB; 2048]).unwrap();
        std::fs::write(
            example_dir.join("flash-list.json"),
            r#"{"version":"0.1.0","files":[
                {"address":0,"bin":"acoral-kernel.bin","sha256Prefix":true},
                {"address":12582912,"bin":"mnist.kmodel","sha256Prefix":false},
                {"address":13631488,"bin":"mnist_images.bin","sha256Prefix":false}]}"#,
        )
        .unwrap();
        std::fs::write(example_dir.join("mnist_images.bin"), vec![0u8; 40960]).unwrap();
        let kernel = build_dir.join("acoral-kernel.bin");
        std::fs::write(&kernel, b"kernel").unwrap();

        Fixture {
            example_dir,
            kernel,
            _root: root,
        }
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_mnist_member_set() {
        let fx = fixture();
        let policy = TargetPolicy::lookup(&TargetPolicy::defaults(), "mnist");
        let archive = ArchiveBuilder::new(&fx.example_dir)
            .build_target(&policy, &fx.example_dir, &fx.kernel)
            .unwrap();

        assert_eq!(archive.path, fx.example_dir.join("mnist.kfpkg"));
        assert_eq!(
            archive.members,
            vec![
                "mnist.kmodel",
                "flash-list.json",
                "acoral-kernel.bin",
                "mnist_images.bin"
            ]
        );

        let reopened = DeploymentArchive::open(&archive.path).unwrap();
        assert_eq!(reopened, archive);
        assert_eq!(reopened.read_member("acoral-kernel.bin").unwrap(), b"kernel");
        assert_eq!(reopened.read_member("mnist_images.bin").unwrap().len(), 40960);
    }

    #[test]
    fn test_members_are_deflated_and_flat() {
        let fx = fixture();
        let archive = ArchiveBuilder::new(&fx.example_dir)
            .build_target(&TargetPolicy::new("mnist"), &fx.example_dir, &fx.kernel)
            .unwrap();

        let mut zip = zip::ZipArchive::new(std::fs::File::open(&archive.path).unwrap()).unwrap();
        for i in 0..zip.len() {
            let entry = zip.by_index(i).unwrap();
            assert!(!entry.name().contains('/'));
            assert_eq!(entry.compression(), CompressionMethod::Deflated);
        }
    }

    #[test]
    fn test_missing_required_leaves_nothing() {
        let fx = fixture();
        std::fs::remove_file(fx.example_dir.join("mnist_images.bin")).unwrap();
        let before = dir_entries(&fx.example_dir);

        let policy = TargetPolicy::lookup(&TargetPolicy::defaults(), "mnist");
        let err = ArchiveBuilder::new(&fx.example_dir)
            .build_target(&policy, &fx.example_dir, &fx.kernel)
            .unwrap_err();

        match err {
            ArchiveError::MissingArtifact { path } => {
                assert_eq!(path, fx.example_dir.join("mnist_images.bin"))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!fx.example_dir.join("mnist.kfpkg").exists());
        assert_eq!(dir_entries(&fx.example_dir), before);
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_archive() {
        let fx = fixture();
        let builder = ArchiveBuilder::new(&fx.example_dir);
        let policy = TargetPolicy::new("mnist");
        let first = builder.build_target(&policy, &fx.example_dir, &fx.kernel).unwrap();
        let first_bytes = std::fs::read(&first.path).unwrap();

        // A second mnist.kmodel collides with the one from the base set.
        let other = fx.example_dir.join("dup");
        std::fs::create_dir_all(&other).unwrap();
        std::fs::write(other.join("mnist.kmodel"), b"x").unwrap();
        let plan = policy.plan(&fx.example_dir, &fx.kernel);
        let err = builder
            .build("mnist", &plan.required, &[other.join("mnist.kmodel")])
            .unwrap_err();
        assert!(matches!(err, ArchiveError::DuplicateMember { .. }));

        assert_eq!(std::fs::read(&first.path).unwrap(), first_bytes);
        assert!(dir_entries(&fx.example_dir)
            .iter()
            .all(|n| !n.starts_with(".kfpkg-")));
    }

    #[test]
    fn test_optional_files_skipped_when_absent() {
        let fx = fixture();
        std::fs::write(fx.example_dir.join("README.txt"), b"notes").unwrap();
        let policy = TargetPolicy::new("mnist")
            .allow("README.txt")
            .allow("labels.txt");
        let archive = ArchiveBuilder::new(&fx.example_dir)
            .build_target(&policy, &fx.example_dir, &fx.kernel)
            .unwrap();
        assert_eq!(archive.members.last().map(String::as_str), Some("README.txt"));
        assert!(!archive.contains("labels.txt"));
    }

    #[test]
    fn test_deterministic_output() {
        let fx = fixture();
        let out_a = tempfile::tempdir().unwrap();
        let out_b = tempfile::tempdir().unwrap();
        let policy = TargetPolicy::lookup(&TargetPolicy::defaults(), "mnist");

        let a = ArchiveBuilder::new(out_a.path())
            .build_target(&policy, &fx.example_dir, &fx.kernel)
            .unwrap();
        let b = ArchiveBuilder::new(out_b.path())
            .build_target(&policy, &fx.example_dir, &fx.kernel)
            .unwrap();
        assert_eq!(std::fs::read(a.path).unwrap(), std::fs::read(b.path).unwrap());
    }

    #[test]
    fn test_rejects_path_like_name() {
        let fx = fixture();
        let err = ArchiveBuilder::new(&fx.example_dir)
            .build("../escape", &[], &[])
            .unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidName { .. }));
    }
}
