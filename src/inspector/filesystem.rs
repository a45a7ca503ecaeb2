//! Inspector backed by a working copy on disk

use super::RepoInspector;
use super::types::{BranchName, CommitRecord, CommittedFileEntry, PushCredential, RepoLocation};
use crate::constants::git::REMOTE_NAME;
use crate::error::{RepoAdminError, RepoResult};
use crate::git::{
    GitRunner, parse_branch_list, parse_file_list, parse_last_commit, parse_name_only_log,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs git subcommands inside `root/name` and parses what they print
pub struct FilesystemInspector {
    repo_dir: PathBuf,
    name: String,
    location: RepoLocation,
    runner: Arc<dyn GitRunner>,
}

impl FilesystemInspector {
    /// Fails with [`RepoAdminError::LocationNotFound`] unless `root/name` is a directory
    pub fn new(root: impl AsRef<Path>, name: &str, runner: Arc<dyn GitRunner>) -> RepoResult<Self> {
        let repo_dir = root.as_ref().join(name);
        if !repo_dir.is_dir() {
            return Err(RepoAdminError::LocationNotFound {
                location: repo_dir.display().to_string(),
            });
        }

        Ok(Self {
            repo_dir,
            name: name.to_string(),
            location: RepoLocation::Local,
            runner,
        })
    }

    /// Label this working copy as the bundle's remote
    ///
    /// Remote roots may be plain directories of non-bare repositories; they
    /// are driven exactly like local clones but reported as remote.
    pub fn with_location(mut self, location: RepoLocation) -> Self {
        self.location = location;
        self
    }

    /// Create `root/name` as an empty repository whose first commit lands on `master`
    ///
    /// The directory must not exist yet.
    pub async fn init_repo(
        root: impl AsRef<Path>,
        name: &str,
        runner: Arc<dyn GitRunner>,
    ) -> RepoResult<Self> {
        let repo_dir = root.as_ref().join(name);
        if repo_dir.exists() {
            return Err(RepoAdminError::AlreadyExists {
                location: repo_dir.display().to_string(),
            });
        }
        tokio::fs::create_dir_all(&repo_dir)
            .await
            .map_err(|e| RepoAdminError::io(&repo_dir, e))?;

        runner.run(&repo_dir, &["init", "--quiet"]).await?;
        runner
            .run(&repo_dir, &["symbolic-ref", "HEAD", "refs/heads/master"])
            .await?;

        Self::new(root, name, runner)
    }

    pub fn path(&self) -> &Path {
        &self.repo_dir
    }

    /// Stage exactly `files` and commit them
    pub async fn commit_files(&self, files: &[&str], message: &str) -> RepoResult<()> {
        let mut add = vec!["add", "--"];
        add.extend_from_slice(files);
        self.git(&add).await?;
        self.git(&["commit", "--quiet", "-m", message]).await?;
        Ok(())
    }

    /// Create `branch` at HEAD and switch to it, without touching any remote
    pub async fn switch_to_new_branch(&self, branch: &BranchName) -> RepoResult<()> {
        self.git(&["checkout", "--quiet", "-b", branch.as_str()]).await?;
        Ok(())
    }

    /// Clone this repository into `parent/<name>` and inspect the clone
    pub async fn clone_into(&self, parent: impl AsRef<Path>) -> RepoResult<Self> {
        let parent = parent.as_ref();
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RepoAdminError::io(parent, e))?;

        let source = self.repo_dir.to_string_lossy();
        self.runner
            .run(parent, &["clone", "--quiet", &source, &self.name])
            .await?;

        Self::new(parent, &self.name, Arc::clone(&self.runner))
    }

    async fn git(&self, args: &[&str]) -> RepoResult<String> {
        self.runner.run(&self.repo_dir, args).await
    }
}

#[async_trait]
impl RepoInspector for FilesystemInspector {
    fn repo_name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> RepoLocation {
        self.location
    }

    async fn current_branch(&self) -> RepoResult<BranchName> {
        let raw = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(BranchName::parse(raw.trim()))
    }

    async fn modified_files(&self) -> RepoResult<Vec<String>> {
        // ls-files -m also lists deleted files
        let modified = parse_file_list(&self.git(&["ls-files", "-m"]).await?);
        let deleted = self.deleted_files().await?;
        Ok(modified
            .into_iter()
            .filter(|path| !deleted.contains(path))
            .collect())
    }

    async fn deleted_files(&self) -> RepoResult<Vec<String>> {
        Ok(parse_file_list(&self.git(&["ls-files", "-d"]).await?))
    }

    async fn untracked_files(&self) -> RepoResult<Vec<String>> {
        Ok(parse_file_list(
            &self.git(&["ls-files", "-o", "--exclude-standard"]).await?,
        ))
    }

    async fn last_commit(&self) -> RepoResult<CommitRecord> {
        let raw = self
            .git(&["log", "-1", "--no-color", "--pretty=format:%H|%ai|%s"])
            .await?;
        parse_last_commit(&raw)
    }

    async fn branches(&self) -> RepoResult<Vec<BranchName>> {
        Ok(parse_branch_list(
            &self.git(&["branch", "--no-color"]).await?,
        ))
    }

    async fn committed_files(&self) -> RepoResult<Vec<CommittedFileEntry>> {
        let raw = self
            .git(&[
                "log",
                "--name-only",
                "--pretty=medium",
                "--date=iso",
                "--no-decorate",
                "--no-color",
            ])
            .await?;
        parse_name_only_log(&raw)
    }

    async fn checkout(&self, branch: &BranchName) -> RepoResult<()> {
        self.git(&["checkout", branch.as_str()]).await?;
        Ok(())
    }

    async fn pull_request(&self, from: &BranchName, to: &BranchName) -> RepoResult<()> {
        self.git(&["checkout", to.as_str()]).await?;
        self.git(&["merge", from.as_str()]).await?;
        Ok(())
    }

    async fn update_local(&self, branch: &BranchName) -> RepoResult<()> {
        self.git(&["checkout", branch.as_str()]).await?;
        self.git(&["pull", "--no-rebase"]).await?;
        Ok(())
    }

    async fn has_uncommitted_work(&self) -> RepoResult<bool> {
        let status = self.git(&["status", "--porcelain"]).await?;
        Ok(!status.trim().is_empty())
    }

    async fn merged_branches(&self, into: &BranchName) -> RepoResult<Vec<BranchName>> {
        Ok(parse_branch_list(
            &self
                .git(&["branch", "--no-color", "--merged", into.as_str()])
                .await?,
        ))
    }

    async fn create_branch(&self, branch: &BranchName) -> RepoResult<()> {
        self.git(&["checkout", "-b", branch.as_str()]).await?;
        self.git(&["push", "-u", REMOTE_NAME, branch.as_str()]).await?;
        Ok(())
    }

    async fn commit_all(&self, message: &str) -> RepoResult<bool> {
        if !self.has_uncommitted_work().await? {
            return Ok(false);
        }
        self.git(&["add", "."]).await?;
        self.git(&["commit", "-m", message]).await?;
        Ok(true)
    }

    async fn push(&self) -> RepoResult<()> {
        self.git(&["push"]).await?;
        Ok(())
    }

    async fn delete_branch(&self, branch: &BranchName) -> RepoResult<()> {
        self.git(&["branch", "-d", branch.as_str()]).await?;
        self.git(&["push", REMOTE_NAME, "--delete", branch.as_str()])
            .await?;
        Ok(())
    }

    async fn authenticate_remote(&self, credential: &PushCredential) -> RepoResult<()> {
        let url = credential.remote_url(&self.name);
        self.git(&["remote", "set-url", REMOTE_NAME, &url]).await?;
        Ok(())
    }
}
