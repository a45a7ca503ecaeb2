//! Commit operations

use crate::client::GitHubClient;
use crate::error::GitHubResult;
use serde::Deserialize;

/// A commit as returned by `GET /repos/{owner}/{repo}/commits/{ref}`
///
/// Only the fields needed to rebuild a history are mapped. `parents` holds
/// links, not commits: each one has to be fetched through its `url`.
#[derive(Deserialize, Debug, Clone)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitDetail {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// ISO 8601 timestamp, e.g. `2023-06-15T03:32:57Z`
    pub date: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub sha: String,
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitFile {
    pub filename: String,
}

impl GitHubClient {
    /// Get the commit a branch, tag or sha points to
    pub async fn get_commit(&self, owner: &str, repo: &str, reference: &str) -> GitHubResult<Commit> {
        let url = self.repo_url(owner, repo, &format!("/commits/{}", reference));
        self.get_json(&url).await
    }

    /// Get a commit from an absolute API URL, as found in [`ParentRef::url`]
    pub async fn get_commit_by_url(&self, url: &str) -> GitHubResult<Commit> {
        self.get_json(url).await
    }
}
