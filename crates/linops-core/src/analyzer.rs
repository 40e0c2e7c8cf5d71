//! External analyzer runner.
//!
//! The clustering/summarization step is a separate Python program; this
//! module only spawns it against an exported CSV, streams its output, and
//! maps a non-zero exit to a typed error.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::error::{OpsError, Result};

#[derive(Debug, Clone)]
pub struct AnalyzerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for AnalyzerCommand {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["analyze_feedback.py".to_string()],
        }
    }
}

impl AnalyzerCommand {
    /// Full argv with the CSV path appended as the final argument.
    pub fn argv(&self, csv_path: &Path) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv.push(csv_path.display().to_string());
        argv
    }
}

/// Run the analyzer to completion in `cwd`.
///
/// Stdout lines are forwarded to this process's stdout (the analyzer's
/// report is user-facing); stderr lines go to the log.
pub async fn run_analyzer(command: &AnalyzerCommand, csv_path: &Path, cwd: &Path) -> Result<()> {
    let argv = command.argv(csv_path);
    tracing::info!(argv = ?argv, "running analyzer");

    let mut child = Command::new(&argv[0])
        .args(&argv[1..])
        .current_dir(cwd)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .map_err(|e| OpsError::AnalyzerSpawnFailed(format!("'{}': {e}", argv[0])))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| OpsError::AnalyzerSpawnFailed("failed to capture stdout".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| OpsError::AnalyzerSpawnFailed("failed to capture stderr".into()))?;

    let stdout_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            println!("{line}");
        }
    });
    let stderr_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            tracing::warn!(target: "analyzer", "{line}");
        }
    });
    let _ = tokio::join!(stdout_task, stderr_task);

    let status = child.wait().await?;
    if !status.success() {
        return Err(OpsError::AnalyzerFailed(status.code().unwrap_or(-1)));
    }
    Ok(())
}
