// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # kfpkg
//!
//! Builds the `.kfpkg` archive consumed by the K210 flashing tool: a zip
//! container holding the compiled kmodel, `flash-list.json`, the kernel
//! binary and any target-specific data files, each stored flat under its
//! base name.
//!
//! # Build Lifecycle
//! ```text
//! pre-flight ──► StagingArea::acquire ──► stage files ──► commit
//!  (all required      (TempDir in the        (flat copy,      (zip into a temp
//!   files exist?)      output dir)            unique names)    file, rename)
//!                                │
//!                                └── dropped on every exit path
//! ```
//!
//! A build that fails at any step leaves no archive behind; a build that
//! succeeds replaces `<name>.kfpkg` with a single rename.
//!
//! # Example
//! ```no_run
//! use kfpkg::{ArchiveBuilder, TargetPolicy};
//! use std::path::Path;
//!
//! let policy = TargetPolicy::new("mnist").require("mnist_images.bin");
//! let archive = ArchiveBuilder::new(Path::new("example/mnist"))
//!     .build_target(&policy, Path::new("example/mnist"), Path::new("build/acoral-kernel.bin"))
//!     .unwrap();
//! println!("{}", archive.summary());
//! ```

mod archive;
mod builder;
mod error;
mod flash_list;
mod policy;
mod staging;

pub use archive::DeploymentArchive;
pub use builder::ArchiveBuilder;
pub use error::ArchiveError;
pub use flash_list::{FlashList, FlashListEntry};
pub use policy::{ArchivePlan, TargetPolicy, FLASH_LIST_FILE};
pub use staging::{StagedFile, StagingArea};
