//! Media tool invocation
//!
//! Every call goes through [`MediaTool::run`]: argv only, no shell, bounded by a
//! timeout. The child is spawned with `kill_on_drop`, so a timeout or a dropped
//! request future takes the process down with it.

use crate::error::{PipelineError, PipelineResult};
use clipdrop_core::Config;
use std::ffi::OsStr;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// Longest stderr excerpt carried into an error message
const STDERR_TAIL_BYTES: usize = 2000;

#[derive(Debug, Clone, Copy)]
pub struct ToolTimeouts {
    pub metadata: Duration,
    pub download: Duration,
}

impl Default for ToolTimeouts {
    fn default() -> Self {
        Self {
            metadata: Duration::from_secs(60),
            download: Duration::from_secs(1800),
        }
    }
}

/// The external media tool (yt-dlp or a compatible binary)
#[derive(Debug, Clone)]
pub struct MediaTool {
    program: String,
    /// Placed before the arguments of every invocation
    extra_args: Vec<String>,
    timeouts: ToolTimeouts,
}

impl MediaTool {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>, timeouts: ToolTimeouts) -> Self {
        Self {
            program: program.into(),
            extra_args,
            timeouts,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.ytdlp_path(),
            config.ytdlp_extra_args().to_vec(),
            ToolTimeouts {
                metadata: config.metadata_timeout(),
                download: config.download_timeout(),
            },
        )
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeouts(&self) -> ToolTimeouts {
        self.timeouts
    }

    /// Run the tool to completion and return its output.
    ///
    /// A non-zero exit is an error carrying the tail of stderr.
    #[tracing::instrument(skip(self, args), fields(
        process.executable.name = %self.program,
        timeout_secs = timeout.as_secs()
    ))]
    pub async fn run<I, S>(&self, args: I, timeout: Duration) -> PipelineResult<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let start = std::time::Instant::now();

        let mut command = Command::new(&self.program);
        command
            .args(&self.extra_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| {
                tracing::warn!(
                    program = %self.program,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Media tool timed out, process killed"
                );
                PipelineError::ToolTimedOut {
                    program: self.program.clone(),
                    timeout,
                }
            })?
            .map_err(|e| PipelineError::ExternalTool {
                program: self.program.clone(),
                message: format!("failed to start: {}", e),
            })?;

        tracing::debug!(
            program = %self.program,
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Media tool exited"
        );

        if !output.status.success() {
            let stderr = stderr_tail(&output.stderr);
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(PipelineError::ExternalTool {
                program: self.program.clone(),
                message,
            });
        }

        Ok(output)
    }

    /// `--version` of the tool, used by the readiness probe and at startup
    pub async fn version(&self, timeout: Duration) -> PipelineResult<String> {
        let output = self.run(["--version"], timeout).await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.len() <= STDERR_TAIL_BYTES {
        return trimmed.to_string();
    }
    let mut cut = trimmed.len() - STDERR_TAIL_BYTES;
    while !trimmed.is_char_boundary(cut) {
        cut += 1;
    }
    format!("...{}", &trimmed[cut..])
}
