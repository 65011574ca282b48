// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # toolchain
//!
//! The external collaborators of the deployment pipeline, behind typed
//! interfaces:
//!
//! - [`ToolCommand`] — a configured external program run under a timeout.
//! - [`NccInference`] — `ncc infer` as an [`inference_eval::InferenceBackend`].
//! - [`NccCompiler`] — `ncc compile` behind the [`ModelCompiler`] trait.
//! - [`CalibrationSet`] — normalized calibration samples loaded from CSV.
//!
//! Tool paths are never hard-coded: every wrapper takes its [`ToolCommand`]
//! from configuration.

mod calibration;
mod compile;
mod error;
mod ncc;
mod process;

pub use calibration::CalibrationSet;
pub use compile::{CompileOptions, CompiledModel, ModelCompiler, NccCompiler};
pub use error::ToolError;
pub use ncc::{read_single_output, NccInference};
pub use process::{ToolCommand, ToolOutput};
