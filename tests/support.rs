//! Common test support utilities and fixtures
//!
//! This module provides shared functionality to reduce code duplication
//! across integration tests: real git repositories in temporary directories,
//! a scripted git runner that records every call, and an in-memory stand-in
//! for the GitHub API.

#![allow(dead_code)]

use async_trait::async_trait;
use bundle_github::{Commit, CommitAuthor, CommitDetail, CommitFile, ParentRef};
use bundle_ops::bundle::RepoBundle;
use bundle_ops::error::{RepoAdminError, RepoResult};
use bundle_ops::git::{GitRunner, Logger, SystemGit};
use bundle_ops::inspector::{CommitSource, RepoLocator};
use bundle_ops::workspace::BundleWorkspace;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// =================================
// ===== Real git repositories
// =================================

/// Run git in `dir`, panicking with stderr on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    git_with_env(dir, args, &[])
}

pub fn git_with_env(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(env.iter().copied())
        .output()
        .expect("Failed to execute git");
    assert!(
        output.status.success(),
        "git {} failed in {}: {}",
        args.join(" "),
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

/// Configure an identity so commits work without global git config
pub fn configure_identity(dir: &Path) {
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

/// Write `file` and commit it
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    fs::write(dir.join(file), content).expect("Failed to write file");
    git(dir, &["add", file]);
    git(dir, &["commit", "-m", message]);
}

/// Write `file` and commit it with fixed author and committer dates
///
/// `date` is anything git accepts, e.g. `2024-01-02T10:00:00Z`.
pub fn commit_file_at(dir: &Path, file: &str, content: &str, message: &str, date: &str) {
    fs::write(dir.join(file), content).expect("Failed to write file");
    git(dir, &["add", file]);
    git_with_env(
        dir,
        &["commit", "-m", message],
        &[("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)],
    );
}

/// Initialize an empty repository whose first commit will land on `master`
pub fn init_empty_repo(path: &Path) {
    fs::create_dir_all(path).expect("Failed to create repo directory");
    git(path, &["init", "--quiet"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/master"]);
    configure_identity(path);
}

/// Initialize a repository on `master` with one commit
pub fn init_git_repo(path: &Path) {
    init_empty_repo(path);
    commit_file(path, "README.md", "# Test Repository\n", "Initial commit");
}

/// A local root and a remote root of plain directories
///
/// Remotes are non-bare repositories with `master`, `integration` and
/// `operate`, left on `master`; local working copies are clones of them.
pub struct GitFixture {
    pub root: TempDir,
    pub local_root: PathBuf,
    pub remote_root: PathBuf,
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl GitFixture {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let local_root = root.path().join("local");
        let remote_root = root.path().join("remote");
        fs::create_dir_all(&local_root).expect("Failed to create local root");
        fs::create_dir_all(&remote_root).expect("Failed to create remote root");
        Self {
            root,
            local_root,
            remote_root,
        }
    }

    pub fn local(&self, name: &str) -> PathBuf {
        self.local_root.join(name)
    }

    pub fn remote(&self, name: &str) -> PathBuf {
        self.remote_root.join(name)
    }

    /// Create the remote repository `name` and clone it into the local root
    pub fn create_repo_pair(&self, name: &str) {
        let remote = self.remote(name);
        init_git_repo(&remote);
        git(&remote, &["branch", "integration"]);
        git(&remote, &["branch", "operate"]);

        let source = remote.to_string_lossy().into_owned();
        let target = self.local(name).to_string_lossy().into_owned();
        git(&self.local_root, &["clone", "--quiet", &source, &target]);
        configure_identity(&self.local(name));
    }

    /// Create every repository of `bundle`
    pub fn create_bundle(&self, bundle: &RepoBundle) {
        for repo in bundle.iter() {
            self.create_repo_pair(&repo.name);
        }
    }

    pub fn workspace(&self, bundle: RepoBundle) -> BundleWorkspace {
        self.workspace_with_runner(bundle, Arc::new(SystemGit))
    }

    pub fn workspace_with_runner(&self, bundle: RepoBundle, runner: Arc<dyn GitRunner>) -> BundleWorkspace {
        BundleWorkspace::new(
            &self.local_root,
            self.remote_root.to_string_lossy(),
            bundle,
            RepoLocator::new(runner),
            Logger::quiet(),
        )
    }
}

/// Real git with the test identity passed on every invocation
///
/// Repositories created by the code under test have no local identity, so
/// their commits would otherwise depend on the global git configuration.
pub struct IdentityGit;

#[async_trait]
impl GitRunner for IdentityGit {
    async fn run(&self, repo_dir: &Path, args: &[&str]) -> RepoResult<String> {
        let mut full = vec![
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ];
        full.extend_from_slice(args);
        SystemGit.run(repo_dir, &full).await
    }
}

/// `cash.svc` and `cash.docs`, enough for workflows without the cost of five repos
pub fn small_bundle() -> RepoBundle {
    RepoBundle::standard("cash").subset(&["cash.svc", "cash.docs"])
}

// =================================
// ===== Scripted git runner
// =================================

/// One invocation seen by [`ScriptedGit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCall {
    pub repo: String,
    pub args: Vec<String>,
}

impl GitCall {
    /// True for commands that change a repository
    pub fn is_mutation(&self) -> bool {
        match self.args.first().map(String::as_str) {
            Some("checkout" | "merge" | "push" | "pull" | "add" | "commit" | "remote") => true,
            Some("branch") => self.args.iter().any(|a| a == "-d" || a == "-D"),
            _ => false,
        }
    }
}

/// Git runner answering from a script instead of running git
///
/// Replies are keyed by repository directory name and the space-joined
/// arguments; anything unscripted answers with empty output.
#[derive(Default)]
pub struct ScriptedGit {
    calls: Mutex<Vec<GitCall>>,
    replies: Mutex<HashMap<(String, String), String>>,
}

impl ScriptedGit {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, repo: &str, command: &str, output: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert((repo.to_string(), command.to_string()), output.to_string());
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<GitCall> {
        self.calls().into_iter().filter(GitCall::is_mutation).collect()
    }
}

#[async_trait]
impl GitRunner for ScriptedGit {
    async fn run(&self, repo_dir: &Path, args: &[&str]) -> RepoResult<String> {
        let repo = repo_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.lock().unwrap().push(GitCall {
            repo: repo.clone(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });

        let key = (repo, args.join(" "));
        Ok(self
            .replies
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}

/// Workspace over empty directories, driven by a [`ScriptedGit`]
pub struct ScriptedBundle {
    pub root: TempDir,
    pub git: Arc<ScriptedGit>,
    pub workspace: BundleWorkspace,
}

impl ScriptedBundle {
    pub fn new(bundle: RepoBundle) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        for repo in bundle.iter() {
            fs::create_dir_all(root.path().join("local").join(&repo.name)).unwrap();
            fs::create_dir_all(root.path().join("remote").join(&repo.name)).unwrap();
        }

        let git = ScriptedGit::new();
        let runner: Arc<dyn GitRunner> = git.clone();
        let workspace = BundleWorkspace::new(
            root.path().join("local"),
            root.path().join("remote").to_string_lossy(),
            bundle,
            RepoLocator::new(runner),
            Logger::quiet(),
        );

        Self {
            root,
            git,
            workspace,
        }
    }
}

// =================================
// ===== In-memory GitHub
// =================================

pub const FAKE_API: &str = "https://api.github.test";

pub fn commit_url(sha: &str) -> String {
    format!("{}/repos/acme/cash.svc/commits/{}", FAKE_API, sha)
}

/// Build an API commit; `date` is RFC 3339
pub fn api_commit(sha: &str, date: &str, message: &str, parents: &[&str], files: &[&str]) -> Commit {
    Commit {
        sha: sha.to_string(),
        commit: CommitDetail {
            message: message.to_string(),
            author: CommitAuthor {
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                date: date.to_string(),
            },
        },
        parents: parents
            .iter()
            .map(|sha| ParentRef {
                sha: sha.to_string(),
                url: commit_url(sha),
            })
            .collect(),
        files: files
            .iter()
            .map(|f| CommitFile {
                filename: f.to_string(),
            })
            .collect(),
    }
}

/// Commit graph served from memory; counts how often each commit is fetched
#[derive(Default)]
pub struct FakeGitHub {
    commits: HashMap<String, Commit>,
    tips: HashMap<String, String>,
    branches: Vec<String>,
    fetches: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new(commits: Vec<Commit>, master_tip: &str) -> Self {
        Self {
            commits: commits.into_iter().map(|c| (c.sha.clone(), c)).collect(),
            tips: HashMap::from([("master".to_string(), master_tip.to_string())]),
            branches: vec!["master".to_string()],
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_branches(mut self, branches: &[&str]) -> Self {
        self.branches = branches.iter().map(|b| b.to_string()).collect();
        self
    }

    /// Shas fetched so far, in fetch order
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    fn lookup(&self, sha: &str, url: &str) -> RepoResult<Commit> {
        self.fetches.lock().unwrap().push(sha.to_string());
        self.commits
            .get(sha)
            .cloned()
            .ok_or_else(|| RepoAdminError::LocationNotFound {
                location: url.to_string(),
            })
    }
}

#[async_trait]
impl CommitSource for FakeGitHub {
    async fn tip_commit(&self, _owner: &str, _repo: &str, branch: &str) -> RepoResult<Commit> {
        let sha = self.tips.get(branch).cloned().unwrap_or_default();
        self.lookup(&sha, branch)
    }

    async fn commit_at(&self, url: &str) -> RepoResult<Commit> {
        let sha = url.rsplit('/').next().unwrap_or_default();
        self.lookup(sha, url)
    }

    async fn branch_names(&self, _owner: &str, _repo: &str) -> RepoResult<Vec<String>> {
        Ok(self.branches.clone())
    }
}
