// PROMPTOID Render Bridge - Final Prompt Hand-Off
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID
//
// The engine's contract ends at the edited prompt string. When
// PROMPTOID_RENDER_CMD points at a renderer, it is invoked with the
// prompt and an output path; otherwise the prompt is dropped as a job
// file for a detached renderer to pick up.

use std::path::PathBuf;
use tokio::process::Command;
use tracing::{info, warn};

pub struct RenderBridge {
    command: Option<String>,
    output_dir: PathBuf,
}

impl RenderBridge {
    pub fn from_env() -> Self {
        Self {
            command: std::env::var("PROMPTOID_RENDER_CMD").ok(),
            output_dir: PathBuf::from("videos"),
        }
    }

    /// Hand the prompt off. Returns the path of whatever artifact the
    /// hand-off produced (video or job file).
    pub async fn render(&self, prompt: &str) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let Some(cmd) = &self.command else {
            let job = self.output_dir.join("render_job.txt");
            std::fs::write(&job, prompt)?;
            warn!("[RENDER] No renderer configured, job written to {:?}", job);
            return Ok(job);
        };

        let output = self.output_dir.join("generated.mp4");
        info!("[RENDER] Invoking renderer for prompt: {}", prompt);

        let status = Command::new(cmd)
            .arg("--prompt")
            .arg(prompt)
            .arg("--output")
            .arg(&output)
            .status()
            .await?;
        if !status.success() {
            anyhow::bail!("renderer exited with {}", status);
        }
        Ok(output)
    }
}
