//! Output publishing: file write plus git commit/push.
//!
//! The publisher treats its directory as an existing git checkout whose
//! remote and upstream branch are already configured; it never initializes
//! or repairs one.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::constants::COMMIT_MESSAGE;

/// What the publish step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The calendar changed; a commit was created and pushed.
    Published,
    /// The staged calendar matches the last commit; nothing to do.
    UpToDate,
}

/// Writes the rendered calendar and pushes it out when it changed.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, file_name: &str, content: &[u8]) -> Result<PublishOutcome>;
}

/// The production publisher: stages the file in the enclosing git repository
/// and commits/pushes only when the staged diff is non-empty.
pub struct GitPublisher {
    repo_dir: PathBuf,
}

impl GitPublisher {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Result<Self> {
        which::which("git").context("git not found in PATH")?;
        Ok(Self {
            repo_dir: repo_dir.into(),
        })
    }

    /// Run a git subcommand with inherited stdio, failing on non-zero exit.
    async fn git(&self, args: &[&str]) -> Result<()> {
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .status()
            .await
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        if !status.success() {
            anyhow::bail!(
                "git {} exited with status: {}",
                args.join(" "),
                status.code().unwrap_or(-1)
            );
        }
        Ok(())
    }

    /// Run a git subcommand capturing stdout, failing on non-zero exit.
    async fn git_stdout(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .stderr(Stdio::inherit())
            .output()
            .await
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        if !output.status.success() {
            anyhow::bail!(
                "git {} exited with status: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1)
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Publisher for GitPublisher {
    async fn publish(&self, file_name: &str, content: &[u8]) -> Result<PublishOutcome> {
        let path = self.repo_dir.join(file_name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        self.git(&["add", file_name]).await?;

        let diff = self
            .git_stdout(&["diff", "--stat", "--cached", "--", "*.ics"])
            .await?;
        if diff.trim().is_empty() {
            info!("already up to date");
            return Ok(PublishOutcome::UpToDate);
        }

        self.git(&["commit", "-m", COMMIT_MESSAGE]).await?;
        self.git(&["push"]).await?;
        Ok(PublishOutcome::Published)
    }
}
