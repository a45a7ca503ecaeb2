//! Choosing a backend for a repository

use super::filesystem::FilesystemInspector;
use super::remote::{CommitSource, GitHubInspector};
use super::Inspector;
use crate::constants::github::WEB_BASE;
use crate::error::{RepoAdminError, RepoResult};
use crate::git::{GitRunner, SystemGit};
use bundle_github::GitHubClient;
use std::path::Path;
use std::sync::Arc;

/// Resolves a (root, name) pair to the inspector able to read it
///
/// A directory on disk always wins; otherwise a GitHub root is served by the
/// API backend. The locator keeps no state beyond the shared git runner and
/// the optional GitHub access.
#[derive(Clone)]
pub struct RepoLocator {
    runner: Arc<dyn GitRunner>,
    github: Option<Arc<dyn CommitSource>>,
}

impl Default for RepoLocator {
    fn default() -> Self {
        Self::new(Arc::new(SystemGit))
    }
}

impl RepoLocator {
    /// A locator without GitHub access
    pub fn new(runner: Arc<dyn GitRunner>) -> Self {
        Self {
            runner,
            github: None,
        }
    }

    /// Enable the GitHub backend with a personal access token
    pub fn with_github_token(self, token: &str) -> RepoResult<Self> {
        let client = GitHubClient::new(token)?;
        Ok(self.with_commit_source(Arc::new(client)))
    }

    pub fn with_commit_source(mut self, source: Arc<dyn CommitSource>) -> Self {
        self.github = Some(source);
        self
    }

    pub fn runner(&self) -> Arc<dyn GitRunner> {
        Arc::clone(&self.runner)
    }

    pub fn resolve(&self, root: &str, name: &str) -> RepoResult<Inspector> {
        if Path::new(root).join(name).is_dir() {
            let inspector = FilesystemInspector::new(root, name, self.runner())?;
            return Ok(Inspector::Filesystem(inspector));
        }

        if root.starts_with(WEB_BASE) {
            let source = self
                .github
                .clone()
                .ok_or_else(|| RepoAdminError::AuthenticationFailure {
                    url: root.to_string(),
                    detail: "no GitHub token configured".to_string(),
                })?;
            return Ok(Inspector::Remote(GitHubInspector::new(root, name, source)?));
        }

        Err(RepoAdminError::LocationNotFound {
            location: Path::new(root).join(name).display().to_string(),
        })
    }
}
