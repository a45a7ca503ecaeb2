//! Inspector backed by the GitHub REST API
//!
//! The API exposes history as a DAG: a commit only links to its parents, and
//! every parent has to be fetched separately. [`GitHubInspector`] walks that
//! graph once and flattens it into the same ordinal-numbered table the
//! filesystem backend derives from `git log`.

use super::RepoInspector;
use super::types::{
    BranchName, CommitRecord, CommitTimestamp, CommittedFileEntry, PushCredential, RepoLocation,
};
use crate::constants::branches::MASTER_BRANCH;
use crate::error::{RepoAdminError, RepoResult};
use async_trait::async_trait;
use bundle_github::{Commit, GitHubClient, parse_owner};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;

/// Where commits and branch names come from
///
/// [`GitHubClient`] is the production source; anything that can hand out
/// commits by branch and by parent URL can stand in for it.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Commit the tip of `branch` points to
    async fn tip_commit(&self, owner: &str, repo: &str, branch: &str) -> RepoResult<Commit>;

    /// Commit behind a parent link
    async fn commit_at(&self, url: &str) -> RepoResult<Commit>;

    async fn branch_names(&self, owner: &str, repo: &str) -> RepoResult<Vec<String>>;
}

#[async_trait]
impl CommitSource for GitHubClient {
    async fn tip_commit(&self, owner: &str, repo: &str, branch: &str) -> RepoResult<Commit> {
        Ok(self.get_commit(owner, repo, branch).await?)
    }

    async fn commit_at(&self, url: &str) -> RepoResult<Commit> {
        Ok(self.get_commit_by_url(url).await?)
    }

    async fn branch_names(&self, owner: &str, repo: &str) -> RepoResult<Vec<String>> {
        let branches = self.list_branches(owner, repo).await?;
        Ok(branches.into_iter().map(|b| b.name).collect())
    }
}

/// Read-only view of a repository hosted on GitHub
pub struct GitHubInspector {
    owner: String,
    name: String,
    source: Arc<dyn CommitSource>,
}

impl GitHubInspector {
    /// `remote_root` is the owner's page, e.g. `https://github.com/acme`
    pub fn new(remote_root: &str, name: &str, source: Arc<dyn CommitSource>) -> RepoResult<Self> {
        let owner = parse_owner(remote_root).ok_or_else(|| RepoAdminError::LocationNotFound {
            location: format!("{}/{}", remote_root.trim_end_matches('/'), name),
        })?;

        Ok(Self {
            owner,
            name: name.to_string(),
            source,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Fetch every commit reachable from master, each one exactly once
    async fn reachable_commits(&self) -> RepoResult<Vec<Commit>> {
        let tip = self
            .source
            .tip_commit(&self.owner, &self.name, MASTER_BRANCH)
            .await?;

        let mut queued: HashSet<String> = HashSet::from([tip.sha.clone()]);
        let mut pending = vec![tip];
        let mut reached = Vec::new();

        while let Some(commit) = pending.pop() {
            for parent in &commit.parents {
                if queued.insert(parent.sha.clone()) {
                    pending.push(self.source.commit_at(&parent.url).await?);
                }
            }
            reached.push(commit);
        }

        Ok(reached)
    }
}

/// `git log` prints message lines indented; joining the non-blank ones gives
/// the same summary the filesystem backend builds
fn summarize(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Order commits newest first without ever placing a parent ahead of its child
///
/// A commit becomes eligible once all of its children are placed. Among the
/// eligible ones the latest date goes first; equal dates between unrelated
/// commits fall back to the hash.
fn newest_first(commits: Vec<Commit>) -> RepoResult<Vec<(CommitTimestamp, Commit)>> {
    let mut by_sha: HashMap<String, (CommitTimestamp, Commit)> = HashMap::new();
    for commit in commits {
        let date = CommitTimestamp::from_rfc3339(&commit.commit.author.date)?;
        by_sha.insert(commit.sha.clone(), (date, commit));
    }

    let mut unplaced_children: HashMap<String, usize> = HashMap::new();
    for (_, commit) in by_sha.values() {
        for parent in &commit.parents {
            if by_sha.contains_key(&parent.sha) {
                *unplaced_children.entry(parent.sha.clone()).or_default() += 1;
            }
        }
    }

    let mut eligible: BinaryHeap<(CommitTimestamp, Reverse<String>)> = by_sha
        .iter()
        .filter(|(sha, _)| !unplaced_children.contains_key(*sha))
        .map(|(sha, (date, _))| (*date, Reverse(sha.clone())))
        .collect();

    let mut ordered = Vec::with_capacity(by_sha.len());
    while let Some((_, Reverse(sha))) = eligible.pop() {
        let Some((date, commit)) = by_sha.remove(&sha) else {
            continue;
        };
        for parent in &commit.parents {
            let Some(count) = unplaced_children.get_mut(&parent.sha) else {
                continue;
            };
            *count -= 1;
            if *count == 0 {
                if let Some((parent_date, _)) = by_sha.get(&parent.sha) {
                    eligible.push((*parent_date, Reverse(parent.sha.clone())));
                }
            }
        }
        ordered.push((date, commit));
    }

    if !by_sha.is_empty() {
        return Err(RepoAdminError::malformed(
            "GitHub commit graph",
            format!("{} commits are part of a cycle", by_sha.len()),
        ));
    }

    Ok(ordered)
}

fn author_of(commit: &Commit) -> String {
    let author = &commit.commit.author;
    if author.email.is_empty() {
        author.name.clone()
    } else {
        format!("{} <{}>", author.name, author.email)
    }
}

#[async_trait]
impl RepoInspector for GitHubInspector {
    fn repo_name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> RepoLocation {
        RepoLocation::Remote
    }

    async fn current_branch(&self) -> RepoResult<BranchName> {
        Ok(BranchName::Master)
    }

    async fn modified_files(&self) -> RepoResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn deleted_files(&self) -> RepoResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn untracked_files(&self) -> RepoResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn last_commit(&self) -> RepoResult<CommitRecord> {
        let commit = self
            .source
            .tip_commit(&self.owner, &self.name, MASTER_BRANCH)
            .await?;

        Ok(CommitRecord {
            message: commit
                .commit
                .message
                .lines()
                .next()
                .unwrap_or_default()
                .to_string(),
            timestamp: CommitTimestamp::from_rfc3339(&commit.commit.author.date)?,
            hash: commit.sha,
        })
    }

    async fn branches(&self) -> RepoResult<Vec<BranchName>> {
        let names = self.source.branch_names(&self.owner, &self.name).await?;
        Ok(names.iter().map(|name| BranchName::parse(name)).collect())
    }

    async fn committed_files(&self) -> RepoResult<Vec<CommittedFileEntry>> {
        let ordered = newest_first(self.reachable_commits().await?)?;

        let count = ordered.len();
        let mut entries = Vec::new();
        for (idx, (commit_date, commit)) in ordered.into_iter().enumerate().rev() {
            let commit_ordinal = count - 1 - idx;
            let summary = summarize(&commit.commit.message);
            let author = author_of(&commit);

            let entry = |file_ordinal: usize, file_path: &str| CommittedFileEntry {
                commit_ordinal,
                commit_date,
                summary: summary.clone(),
                file_ordinal,
                file_path: file_path.to_string(),
                commit_hash: commit.sha.clone(),
                author: author.clone(),
            };

            if commit.files.is_empty() {
                entries.push(entry(0, ""));
            } else {
                entries.extend(
                    commit
                        .files
                        .iter()
                        .enumerate()
                        .map(|(file_ordinal, file)| entry(file_ordinal, &file.filename)),
                );
            }
        }

        Ok(entries)
    }

    async fn checkout(&self, _branch: &BranchName) -> RepoResult<()> {
        Err(RepoAdminError::unsupported("checkout", &self.name))
    }

    async fn pull_request(&self, _from: &BranchName, _to: &BranchName) -> RepoResult<()> {
        Err(RepoAdminError::unsupported("pull_request", &self.name))
    }

    async fn update_local(&self, _branch: &BranchName) -> RepoResult<()> {
        Err(RepoAdminError::unsupported("update_local", &self.name))
    }

    async fn has_uncommitted_work(&self) -> RepoResult<bool> {
        Ok(false)
    }

    async fn merged_branches(&self, _into: &BranchName) -> RepoResult<Vec<BranchName>> {
        Ok(Vec::new())
    }

    async fn create_branch(&self, _branch: &BranchName) -> RepoResult<()> {
        Err(RepoAdminError::unsupported("create_branch", &self.name))
    }

    async fn commit_all(&self, _message: &str) -> RepoResult<bool> {
        Err(RepoAdminError::unsupported("commit_all", &self.name))
    }

    async fn push(&self) -> RepoResult<()> {
        Err(RepoAdminError::unsupported("push", &self.name))
    }

    async fn delete_branch(&self, _branch: &BranchName) -> RepoResult<()> {
        Err(RepoAdminError::unsupported("delete_branch", &self.name))
    }

    async fn authenticate_remote(&self, _credential: &PushCredential) -> RepoResult<()> {
        Err(RepoAdminError::unsupported("authenticate_remote", &self.name))
    }
}
