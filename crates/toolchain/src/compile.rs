// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model compilation through `ncc compile`.

use crate::{ToolCommand, ToolError};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use tensor_core::DType;

/// Options forwarded to the model compiler.
///
/// Defaults target a 28×28 grayscale classifier on the K210 with int8
/// quantization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Source model format (`tflite`, `onnx`, ...).
    pub input_format: String,
    pub target: String,
    /// NHWC input shape including the batch dimension.
    pub input_shape: Vec<usize>,
    pub input_type: DType,
    pub output_type: DType,
    pub quant_type: DType,
    pub w_quant_type: DType,
    /// Value range the quantized input is mapped onto.
    pub input_range: (f32, f32),
    pub mean: f32,
    pub std: f32,
    pub preprocess: bool,
    /// Size above which the compiled model no longer fits the board's
    /// model region. Exceeding it is reported, not rejected.
    pub max_kmodel_bytes: u64,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            input_format: "tflite".into(),
            target: "k210".into(),
            input_shape: vec![1, 28, 28, 1],
            input_type: DType::U8,
            output_type: DType::F32,
            quant_type: DType::I8,
            w_quant_type: DType::I8,
            input_range: (-128.0, 127.0),
            mean: 127.5,
            std: 127.5,
            preprocess: true,
            max_kmodel_bytes: 435_000,
        }
    }
}

impl CompileOptions {
    /// Command-line arguments for `ncc compile`.
    pub fn to_args(&self, model: &Path, output: &Path, calibration: Option<&Path>) -> Vec<OsString> {
        let shape = self
            .input_shape
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut args: Vec<OsString> = vec![
            "compile".into(),
            model.into(),
            output.into(),
            "-i".into(),
            self.input_format.as_str().into(),
            "-t".into(),
            self.target.as_str().into(),
            "--input-shape".into(),
            shape.into(),
            "--input-type".into(),
            self.input_type.ncc_name().into(),
            "--output-type".into(),
            self.output_type.ncc_name().into(),
            "--quant-type".into(),
            self.quant_type.ncc_name().into(),
            "--w-quant-type".into(),
            self.w_quant_type.ncc_name().into(),
            "--input-range".into(),
            format!("{},{}", self.input_range.0, self.input_range.1).into(),
            "--mean".into(),
            self.mean.to_string().into(),
            "--std".into(),
            self.std.to_string().into(),
        ];
        if self.preprocess {
            args.push("--preprocess".into());
        }
        if let Some(dir) = calibration {
            args.extend(["--dataset".into(), dir.into(), "--dataset-format".into(), "raw".into()]);
        }
        args
    }
}

/// A compiled model on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledModel {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Larger than [`CompileOptions::max_kmodel_bytes`].
    pub oversized: bool,
}

/// Turns a source model into a deployable kmodel.
pub trait ModelCompiler {
    /// Compiles `model` to `output`, optionally calibrating with the raw
    /// samples in `calibration`.
    fn compile(
        &self,
        model: &Path,
        output: &Path,
        calibration: Option<&Path>,
    ) -> impl Future<Output = Result<CompiledModel, ToolError>> + Send;
}

/// [`ModelCompiler`] backed by the `ncc` command-line compiler.
#[derive(Debug, Clone)]
pub struct NccCompiler {
    tool: ToolCommand,
    options: CompileOptions,
}

impl NccCompiler {
    pub fn new(tool: ToolCommand, options: CompileOptions) -> Self {
        Self { tool, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }
}

impl ModelCompiler for NccCompiler {
    async fn compile(
        &self,
        model: &Path,
        output: &Path,
        calibration: Option<&Path>,
    ) -> Result<CompiledModel, ToolError> {
        if !model.is_file() {
            return Err(ToolError::io(
                model,
                std::io::Error::new(std::io::ErrorKind::NotFound, "model file not found"),
            ));
        }

        tracing::info!(
            "Compiling {} for {} (input {:?} {}, quant {})",
            model.display(),
            self.options.target,
            self.options.input_shape,
            self.options.input_type,
            self.options.quant_type,
        );
        self.tool
            .run(self.options.to_args(model, output, calibration))
            .await?;

        let size_bytes = match std::fs::metadata(output) {
            Ok(m) => m.len(),
            Err(_) => {
                return Err(ToolError::Failed {
                    program: self.tool.name(),
                    detail: format!("no compiled model written to {}", output.display()),
                })
            }
        };

        let oversized = size_bytes > self.options.max_kmodel_bytes;
        if oversized {
            tracing::warn!(
                "compiled model is {} bytes, larger than the expected {} bytes",
                size_bytes,
                self.options.max_kmodel_bytes
            );
        } else {
            tracing::info!("Compiled {} ({} bytes)", output.display(), size_bytes);
        }

        Ok(CompiledModel {
            path: output.to_path_buf(),
            size_bytes,
            oversized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CompileOptions::default().to_args(
            Path::new("mnist.tflite"),
            Path::new("mnist.kmodel"),
            Some(Path::new("calib")),
        );
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        let joined = args.join(" ");
        assert!(joined.starts_with("compile mnist.tflite mnist.kmodel -i tflite -t k210"));
        assert!(joined.contains("--input-shape 1,28,28,1"));
        assert!(joined.contains("--input-type uint8"));
        assert!(joined.contains("--output-type float32"));
        assert!(joined.contains("--quant-type int8 --w-quant-type int8"));
        assert!(joined.contains("--input-range -128,127"));
        assert!(joined.contains("--mean 127.5 --std 127.5"));
        assert!(joined.ends_with("--preprocess --dataset calib --dataset-format raw"));
    }

    #[test]
    fn test_options_from_toml() {
        let opts: CompileOptions = toml::from_str(
            r#"
            input_shape = [1, 4]
            input_type = "float32"
            preprocess = false
            "#,
        )
        .unwrap();
        assert_eq!(opts.input_shape, vec![1, 4]);
        assert_eq!(opts.input_type, DType::F32);
        assert_eq!(opts.target, "k210");
        assert!(!opts.to_args(Path::new("a"), Path::new("b"), None)
            .iter()
            .any(|a| a == "--preprocess" || a == "--dataset"));
    }

    #[cfg(unix)]
    mod with_fake_tool {
        use super::*;

        /// Writes `$SIZE` zero bytes to the output path (`$3`).
        fn fake_ncc(dir: &Path, size: usize) -> ToolCommand {
            let script = dir.join("ncc.sh");
            std::fs::write(
                &script,
                format!("[ \"$1\" = compile ] || exit 64\nhead -c {size} /dev/zero > \"$3\"\n"),
            )
            .unwrap();
            ToolCommand::new("sh").with_base_args([script.to_string_lossy().into_owned()])
        }

        #[tokio::test]
        async fn test_compile_reports_size() {
            let dir = tempfile::tempdir().unwrap();
            let model = dir.path().join("mnist.tflite");
            std::fs::write(&model, b"tflite").unwrap();
            let out = dir.path().join("mnist.kmodel");

            let compiler = NccCompiler::new(fake_ncc(dir.path(), 1024), CompileOptions::default());
            let compiled = compiler.compile(&model, &out, None).await.unwrap();
            assert_eq!(compiled.size_bytes, 1024);
            assert!(!compiled.oversized);
        }

        #[tokio::test]
        async fn test_oversized_model_is_flagged() {
            let dir = tempfile::tempdir().unwrap();
            let model = dir.path().join("mnist.tflite");
            std::fs::write(&model, b"tflite").unwrap();
            let out = dir.path().join("mnist.kmodel");

            let options = CompileOptions {
                max_kmodel_bytes: 100,
                ..CompileOptions::default()
            };
            let compiler = NccCompiler::new(fake_ncc(dir.path(), 101), options);
            let compiled = compiler.compile(&model, &out, None).await.unwrap();
            assert!(compiled.oversized);
        }

        #[tokio::test]
        async fn test_missing_model() {
            let dir = tempfile::tempdir().unwrap();
            let compiler = NccCompiler::new(fake_ncc(dir.path(), 1), CompileOptions::default());
            let err = compiler
                .compile(&dir.path().join("nope.tflite"), &dir.path().join("o.kmodel"), None)
                .await
                .unwrap_err();
            assert!(matches!(err, ToolError::Io { .. }));
        }
    }
}
