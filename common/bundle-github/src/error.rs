//! Errors raised by GitHub API calls

use thiserror::Error;

pub type GitHubResult<T> = Result<T, GitHubError>;

/// Failure of a GitHub API call
///
/// The variants separate the two usual operator-side causes: a token that
/// GitHub no longer accepts (reported as 401/403) and a TLS certificate
/// problem (which never reaches HTTP and surfaces as a transport failure).
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error(
        "GitHub rejected the credentials for GET '{url}' (HTTP {status}). The token has probably \
         expired or been revoked, or it lacks access to this repository: issue a new token and \
         update the secret store"
    )]
    Unauthorized {
        status: u16,
        url: String,
        body: String,
    },

    #[error(
        "Error status {status} from GET '{url}': {body}. An expired token shows up as 401/403 and \
         an expired certificate as a connection failure, so this is most likely neither"
    )]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error(
        "Problem connecting to GitHub at '{url}': {source}. If the token is valid, check whether a \
         certificate in the TLS chain (for instance a proxy certificate) has expired"
    )]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse GitHub API response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GitHubError {
    pub(crate) fn from_status(status: u16, url: &str, body: String) -> Self {
        match status {
            401 | 403 => GitHubError::Unauthorized {
                status,
                url: url.to_string(),
                body,
            },
            _ => GitHubError::Status {
                status,
                url: url.to_string(),
                body,
            },
        }
    }

    /// HTTP status of the failed call, when the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Unauthorized { status, .. } | GitHubError::Status { status, .. } => {
                Some(*status)
            }
            GitHubError::Transport { .. } | GitHubError::Decode { .. } => None,
        }
    }

    /// URL of the failed call
    pub fn url(&self) -> &str {
        match self {
            GitHubError::Unauthorized { url, .. }
            | GitHubError::Status { url, .. }
            | GitHubError::Transport { url, .. }
            | GitHubError::Decode { url, .. } => url,
        }
    }
}
