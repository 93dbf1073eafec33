//! Running a composition plan

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::plan::CompositionPlan;
use crate::error::{ProducerError, Result};

/// Executes a composition plan
#[async_trait]
pub trait CompositionEngine: Send + Sync {
    async fn run(&self, plan: &CompositionPlan) -> Result<()>;
}

/// Runs ffmpeg as a child process.
///
/// stdout and stderr are inherited, so a `-` output streams straight to the
/// caller's stdout and ffmpeg's diagnostics reach the user unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegEngine;

impl FfmpegEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check if `program` can be started.
    ///
    /// Only startability is checked; the exit status of `-version` is ignored.
    pub async fn check_available(program: &str) -> bool {
        Command::new(program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok()
    }
}

#[async_trait]
impl CompositionEngine for FfmpegEngine {
    async fn run(&self, plan: &CompositionPlan) -> Result<()> {
        debug!("ffmpeg args: {:?}", plan.args());

        let status = Command::new(&plan.program)
            .args(plan.args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                ProducerError::CompositionEngine(format!("failed to start {}: {e}", plan.program))
            })?;

        if !status.success() {
            return Err(ProducerError::CompositionEngine(format!(
                "ffmpeg exited with status: {status}"
            )));
        }

        info!("Composited match video to {}", plan.output);
        Ok(())
    }
}
