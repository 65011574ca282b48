// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Running a configured external program.

use crate::ToolError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

/// An external program plus the arguments always passed before the
/// subcommand.
///
/// ```toml
/// program = "/opt/ncc/ncc"
/// base_args = []
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    pub program: PathBuf,
    #[serde(default)]
    pub base_args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ToolCommand {
    fn default() -> Self {
        Self::new("ncc")
    }
}

/// Captured output of a successful run.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Program name used in diagnostics.
    pub fn name(&self) -> String {
        self.program.display().to_string()
    }

    /// Runs the program with `base_args` followed by `args`.
    ///
    /// Non-zero exit is [`ToolError::Failed`] carrying stderr. A run that
    /// exceeds the timeout is killed and reported as [`ToolError::TimedOut`].
    pub async fn run<I, S>(&self, args: I) -> Result<ToolOutput, ToolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        tracing::debug!("running {:?}", cmd.as_std());

        let child = cmd.spawn().map_err(|source| ToolError::Spawn {
            program: self.name(),
            source,
        })?;

        let output = match tokio::time::timeout(self.timeout(), child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| ToolError::Spawn {
                program: self.name(),
                source,
            })?,
            Err(_) => {
                return Err(ToolError::TimedOut {
                    program: self.name(),
                    timeout: self.timeout(),
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let diagnostic = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(ToolError::Failed {
                program: self.name(),
                detail: format!("{}: {diagnostic}", output.status),
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> ToolCommand {
        ToolCommand::new("sh").with_base_args(["-c", script, "tool"])
    }

    #[tokio::test]
    async fn test_success_captures_output() {
        let out = sh("echo hello; echo warn >&2").run(["ignored"]).await.unwrap();
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.stderr.trim(), "warn");
    }

    #[tokio::test]
    async fn test_args_follow_base_args() {
        let out = sh("echo \"$1 $2\"").run(["infer", "model.kmodel"]).await.unwrap();
        assert_eq!(out.stdout.trim(), "infer model.kmodel");
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let err = sh("echo 'bad kmodel' >&2; exit 3")
            .run(Vec::<String>::new())
            .await
            .unwrap_err();
        match err {
            ToolError::Failed { program, detail } => {
                assert_eq!(program, "sh");
                assert!(detail.contains("bad kmodel"), "{detail}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let err = sh("sleep 30")
            .with_timeout(Duration::from_secs(1))
            .run(Vec::<String>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::TimedOut { .. }));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = ToolCommand::new("/nonexistent/ncc")
            .run(["infer"])
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[test]
    fn test_toml_defaults() {
        let cmd: ToolCommand = toml::from_str(r#"program = "/opt/ncc/ncc""#).unwrap();
        assert_eq!(cmd.program, PathBuf::from("/opt/ncc/ncc"));
        assert!(cmd.base_args.is_empty());
        assert_eq!(cmd.timeout(), Duration::from_secs(120));
    }
}
