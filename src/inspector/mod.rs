//! Uniform access to a repository, wherever it lives
//!
//! A [`RepoInspector`] answers the same questions for a local working copy and
//! for a repository hosted on GitHub. Everything above this module goes
//! through the trait and never learns which backend it is talking to.

pub mod filesystem;
pub mod locator;
pub mod remote;
pub mod types;

pub use filesystem::FilesystemInspector;
pub use locator::RepoLocator;
pub use remote::{CommitSource, GitHubInspector};
pub use types::{
    BranchName, CommitRecord, CommitTimestamp, CommittedFileEntry, PushCredential, RepoLocation,
};

use crate::error::RepoResult;
use async_trait::async_trait;
use std::ops::Deref;

#[async_trait]
pub trait RepoInspector: Send + Sync {
    /// Name of the repository, e.g. `cash.svc`
    fn repo_name(&self) -> &str;

    fn location(&self) -> RepoLocation;

    /// Branch checked out in the working copy; hosted repos report their default branch
    async fn current_branch(&self) -> RepoResult<BranchName>;

    /// Files with unstaged modifications, never including deleted files
    async fn modified_files(&self) -> RepoResult<Vec<String>>;

    async fn deleted_files(&self) -> RepoResult<Vec<String>>;

    async fn untracked_files(&self) -> RepoResult<Vec<String>>;

    async fn last_commit(&self) -> RepoResult<CommitRecord>;

    async fn branches(&self) -> RepoResult<Vec<BranchName>>;

    /// Whole history, one entry per (commit, file), ascending by commit ordinal
    async fn committed_files(&self) -> RepoResult<Vec<CommittedFileEntry>>;

    async fn checkout(&self, branch: &BranchName) -> RepoResult<()>;

    /// Merge `from` into `to`, leaving `to` checked out
    async fn pull_request(&self, from: &BranchName, to: &BranchName) -> RepoResult<()>;

    /// Check out `branch` and pull it from its upstream
    async fn update_local(&self, branch: &BranchName) -> RepoResult<()>;

    /// True when staged, unstaged or untracked changes exist
    async fn has_uncommitted_work(&self) -> RepoResult<bool>;

    /// Branches whose tips are reachable from `into`
    async fn merged_branches(&self, into: &BranchName) -> RepoResult<Vec<BranchName>>;

    /// Create `branch`, switch to it and push it upstream
    async fn create_branch(&self, branch: &BranchName) -> RepoResult<()>;

    /// Stage everything and commit; `false` when there was nothing to commit
    async fn commit_all(&self, message: &str) -> RepoResult<bool>;

    async fn push(&self) -> RepoResult<()>;

    /// Delete `branch` locally and on the remote
    async fn delete_branch(&self, branch: &BranchName) -> RepoResult<()>;

    /// Point `origin` at a URL carrying `credential`
    async fn authenticate_remote(&self, credential: &PushCredential) -> RepoResult<()>;

    async fn has_branch(&self, branch: &BranchName) -> RepoResult<bool> {
        Ok(self.branches().await?.contains(branch))
    }
}

/// The two backends a [`RepoLocator`] can hand out
pub enum Inspector {
    Filesystem(FilesystemInspector),
    Remote(GitHubInspector),
}

impl Inspector {
    /// Relabel a working copy; GitHub repositories are always remote
    pub fn with_location(self, location: RepoLocation) -> Self {
        match self {
            Inspector::Filesystem(inspector) => {
                Inspector::Filesystem(inspector.with_location(location))
            }
            remote => remote,
        }
    }
}

impl Deref for Inspector {
    type Target = dyn RepoInspector;

    fn deref(&self) -> &Self::Target {
        match self {
            Inspector::Filesystem(inspector) => inspector,
            Inspector::Remote(inspector) => inspector,
        }
    }
}
