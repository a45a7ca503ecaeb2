//! Error taxonomy for bundle operations
//!
//! Every failure of an inspector, the lifecycle manager or the administration
//! layer is a [`RepoAdminError`]. Precondition failures (dirty trees, unmerged
//! branches, wrong checkouts) are raised before any repository is touched;
//! the remaining variants describe a failed call against one repository.

use bundle_github::GitHubError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoAdminError>;

/// Appended to every failed git invocation
pub const GIT_CREDENTIAL_HINT: &str = "Often this is a Git authentication issue. If \
    'git config --get credential.helper' returns 'manager', Git is using the Git Credential \
    Manager and it is probably not configured for the remote's URL; otherwise look at \
    https://git-scm.com/docs/gitcredentials, or set up SSH keys as explained in \
    https://docs.github.com/en/authentication/connecting-to-github-with-ssh";

static URL_CREDENTIALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<scheme>[a-z]+://)(?P<user>[^:/@\s]+):[^@\s]+@").expect("valid regex")
});

/// Replace `user:secret@` in URLs with `user:***@`
pub fn redact_credentials(text: &str) -> String {
    URL_CREDENTIALS
        .replace_all(text, "${scheme}${user}:***@")
        .into_owned()
}

#[derive(Debug, Error)]
pub enum RepoAdminError {
    #[error("No repository found at '{location}'")]
    LocationNotFound { location: String },

    #[error("Authentication failure for '{url}': {detail}")]
    AuthenticationFailure { url: String, detail: String },

    #[error("{0}")]
    HttpStatus(GitHubError),

    #[error("{0}")]
    Transport(GitHubError),

    #[error(
        "Can't proceed with branch '{branch}' because there is uncommitted work in these repo(s): {}",
        .repos.join(", ")
    )]
    UncommittedWorkConflict { branch: String, repos: Vec<String> },

    #[error(
        "Can't remove branch '{branch}' because it has not yet been merged with the '{into}' branch in these repo(s): {}",
        .repos.join(", ")
    )]
    UnmergedBranchConflict {
        branch: String,
        into: String,
        repos: Vec<String>,
    },

    #[error(
        "Repo '{repo}' has the wrong branch checked out: '{actual}' (should have been '{expected}')"
    )]
    BranchMismatch {
        repo: String,
        expected: String,
        actual: String,
    },

    #[error(
        "Can't switch to branch '{branch}' because that branch doesn't exist in these repo(s): {}",
        .repos.join(", ")
    )]
    MissingBranch { branch: String, repos: Vec<String> },

    #[error("Invalid branch name '{name}': {reason}")]
    InvalidBranchName { name: String, reason: String },

    #[error("'{operation}' is not supported for '{repo}': a remote-only view has no working tree")]
    UnsupportedOperation {
        operation: &'static str,
        repo: String,
    },

    #[error(
        "Could not run git command '{command}' in '{repo_path}'.\n\t==> {hint}\n\nError message is:\n{stderr}",
        hint = GIT_CREDENTIAL_HINT
    )]
    CommandExecutionFailure {
        command: String,
        repo_path: String,
        stderr: String,
    },

    #[error("Unexpected output from {origin}: {detail}")]
    MalformedOutput { origin: String, detail: String },

    #[error("'{location}' already exists; a new project needs fresh repository folders")]
    AlreadyExists { location: String },

    #[error("Could not write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RepoAdminError {
    pub fn command_failure(args: &[&str], repo_path: &str, stderr: &str) -> Self {
        RepoAdminError::CommandExecutionFailure {
            command: redact_credentials(&format!("git {}", args.join(" "))),
            repo_path: repo_path.to_string(),
            stderr: redact_credentials(stderr.trim()),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        RepoAdminError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn unsupported(operation: &'static str, repo: &str) -> Self {
        RepoAdminError::UnsupportedOperation {
            operation,
            repo: repo.to_string(),
        }
    }

    pub fn malformed(origin: impl Into<String>, detail: impl Into<String>) -> Self {
        RepoAdminError::MalformedOutput {
            origin: origin.into(),
            detail: detail.into(),
        }
    }
}

impl From<GitHubError> for RepoAdminError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Unauthorized { .. } => RepoAdminError::AuthenticationFailure {
                url: err.url().to_string(),
                detail: err.to_string(),
            },
            GitHubError::Status { .. } => RepoAdminError::HttpStatus(err),
            GitHubError::Transport { .. } => RepoAdminError::Transport(err),
            GitHubError::Decode { .. } => RepoAdminError::MalformedOutput {
                origin: err.url().to_string(),
                detail: err.to_string(),
            },
        }
    }
}
