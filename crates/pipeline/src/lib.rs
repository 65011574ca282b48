// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # pipeline
//!
//! Ties the deployment crates together behind one configuration.
//!
//! The pipeline takes:
//! - A [`PipelineConfig`] (TOML or defaults) describing input geometry,
//!   flash layout, tool locations and per-target archive policies.
//! - A target name, resolved to `<root>/<examples_dir>/<target>`.
//!
//! And runs any of the stages against it:
//! ```text
//! images/test/*.png ──convert──► raw_images/*.raw ──evaluate──► AccuracyReport
//! {0..9}.{png,jpg,raw} ──pack──► mnist_images.bin ─┐
//! model.tflite ──compile──► <target>.kmodel ───────┼──package──► <target>.kfpkg
//! flash-list.json, kernel ─────────────────────────┘
//! ```
//!
//! Stage errors from every crate are collected into [`PipelineError`].

mod config;
mod error;
mod stages;

pub use config::{
    CalibrationConfig, ConvertConfig, EvaluateConfig, FlashConfig, InputConfig, PipelineConfig,
    ToolsConfig, WorkspaceConfig,
};
pub use error::PipelineError;
pub use stages::{PackOutcome, Pipeline};
