//! Execution of git subcommands
//!
//! The filesystem backend never spawns processes itself; it goes through a
//! [`GitRunner`]. Production code uses [`SystemGit`], tests can substitute a
//! runner that records calls and answers from a script.

use crate::error::{RepoAdminError, RepoResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` inside `repo_dir`
    ///
    /// Returns stdout without trailing whitespace. A non-zero exit status is a
    /// [`RepoAdminError::CommandExecutionFailure`].
    async fn run(&self, repo_dir: &Path, args: &[&str]) -> RepoResult<String>;
}

/// Runs the `git` executable found on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, repo_dir: &Path, args: &[&str]) -> RepoResult<String> {
        let repo_path = repo_dir.display().to_string();

        // Never prompt: a missing credential must fail the command
        let output = Command::new("git")
            .args(args)
            .current_dir(repo_dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_MERGE_AUTOEDIT", "no")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                RepoAdminError::command_failure(
                    args,
                    &repo_path,
                    &format!("Failed to execute git: {}", e),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Merge conflicts are reported on stdout
            let detail = if stderr.trim().is_empty() {
                String::from_utf8_lossy(&output.stdout).into_owned()
            } else {
                stderr.into_owned()
            };
            return Err(RepoAdminError::command_failure(args, &repo_path, &detail));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}
