// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The deployment stages, each resolved against one target's example
//! directory.

use crate::{PipelineConfig, PipelineError};
use flash_packer::{pack, resolve_slot_sources, FlashImage};
use inference_eval::{EvaluationReport, Evaluator, InferenceBackend};
use kfpkg::{ArchiveBuilder, DeploymentArchive};
use raw_encoder::{convert_dir, ConvertedImage};
use std::path::{Path, PathBuf};
use toolchain::{CalibrationSet, CompiledModel, ModelCompiler, NccCompiler, NccInference};

/// A packed flash image and where it was written.
#[derive(Debug, Clone)]
pub struct PackOutcome {
    pub image: FlashImage,
    pub path: PathBuf,
}

/// Runs pipeline stages for named targets.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn existing_dir(what: &'static str, path: PathBuf) -> Result<PathBuf, PipelineError> {
        if path.is_dir() {
            Ok(path)
        } else {
            Err(PipelineError::MissingInput { what, path })
        }
    }

    /// Converts the target's test images into `.raw` model inputs.
    pub fn convert(&self, target: &str) -> Result<Vec<ConvertedImage>, PipelineError> {
        let example_dir = self.config.example_dir(target);
        let input_dir =
            Self::existing_dir("image directory", example_dir.join(&self.config.convert.input_dir))?;
        let output_dir = example_dir.join(&self.config.convert.output_dir);

        let converted = convert_dir(
            &input_dir,
            &output_dir,
            &self.config.input.target,
            self.config.convert.limit,
        )?;
        tracing::info!(
            "{target}: converted {} images into {}",
            converted.len(),
            output_dir.display()
        );
        Ok(converted)
    }

    /// Packs the per-slot sources of the target into its flash image file.
    pub fn pack(&self, target: &str) -> Result<PackOutcome, PipelineError> {
        let example_dir = self.config.example_dir(target);
        let slot_dir =
            Self::existing_dir("slot source directory", example_dir.join(&self.config.flash.slot_dir))?;
        let layout = &self.config.flash.layout;

        let slots = resolve_slot_sources(&slot_dir, layout, &self.config.input.target);
        let image = pack(&slots, layout)?;

        let path = example_dir.join(&self.config.flash.image_file);
        image.write_to(&path)?;
        for slot in image.populated_slots() {
            tracing::debug!("slot {slot} at {:#X}", layout.address(*slot));
        }
        Ok(PackOutcome { image, path })
    }

    /// Builds `<target>.kfpkg` in the target's example directory.
    pub fn package(&self, target: &str) -> Result<DeploymentArchive, PipelineError> {
        let example_dir = self.config.example_dir(target);
        let policy = self.config.policy(target);
        let archive = ArchiveBuilder::new(&example_dir).build_target(
            &policy,
            &example_dir,
            &self.config.kernel_path(),
        )?;
        Ok(archive)
    }

    /// Path of the compiled model for `target`.
    pub fn kmodel_path(&self, target: &str) -> PathBuf {
        self.config
            .example_dir(target)
            .join(self.config.policy(target).model_file())
    }

    /// Evaluates the target's compiled model through `ncc infer`.
    pub async fn evaluate(&self, target: &str) -> Result<EvaluationReport, PipelineError> {
        let kmodel = self.kmodel_path(target);
        if !kmodel.is_file() {
            return Err(PipelineError::MissingInput {
                what: "compiled model",
                path: kmodel,
            });
        }
        let backend = NccInference::new(self.config.tools.ncc.clone(), kmodel)
            .with_normalization(self.config.input.mean, self.config.input.std);
        self.evaluate_with(target, backend).await
    }

    /// Evaluates the target's samples with any backend.
    pub async fn evaluate_with<B: InferenceBackend>(
        &self,
        target: &str,
        backend: B,
    ) -> Result<EvaluationReport, PipelineError> {
        let samples_dir = self
            .config
            .example_dir(target)
            .join(&self.config.evaluate.samples_dir);
        let report = Evaluator::new(backend)
            .evaluate_dir(&samples_dir, self.config.evaluate.limit)
            .await?;
        Ok(report)
    }

    /// Compiles `model` into the target's kmodel with `ncc compile`.
    pub async fn compile(&self, target: &str, model: &Path) -> Result<CompiledModel, PipelineError> {
        let compiler = NccCompiler::new(self.config.tools.ncc.clone(), self.config.compile.clone());
        self.compile_with(target, model, &compiler).await
    }

    /// Compiles with any [`ModelCompiler`].
    ///
    /// When `[calibration]` is configured, the CSV is normalized and written
    /// to a temporary dataset directory that lives for the duration of the
    /// compile.
    pub async fn compile_with<C: ModelCompiler>(
        &self,
        target: &str,
        model: &Path,
        compiler: &C,
    ) -> Result<CompiledModel, PipelineError> {
        let example_dir = self.config.example_dir(target);
        let output = self.kmodel_path(target);

        let dataset = match &self.config.calibration {
            Some(cal) => {
                let set = CalibrationSet::from_csv(&example_dir.join(&cal.csv), cal.columns)?;
                let dir = tempfile::Builder::new()
                    .prefix("kdeploy-calib-")
                    .tempdir()
                    .map_err(|source| PipelineError::Io {
                        path: std::env::temp_dir(),
                        source,
                    })?;
                set.write_raw_dir(dir.path())?;
                Some(dir)
            }
            None => None,
        };

        let compiled = compiler
            .compile(model, &output, dataset.as_ref().map(|d| d.path()))
            .await?;
        Ok(compiled)
    }
}
