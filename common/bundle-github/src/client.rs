//! GitHub client implementation

use crate::error::{GitHubError, GitHubResult};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// GitHub API base URL
pub const API_BASE: &str = "https://api.github.com";

/// Upper bound for a single API call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const DEFAULT_USER_AGENT: &str = concat!("bundle-github/", env!("CARGO_PKG_VERSION"));

/// GitHub API client for making authenticated requests
///
/// Every request carries the bearer token given at construction time. The
/// client has no `Debug` impl so the token cannot end up in logs.
pub struct GitHubClient {
    pub(crate) client: reqwest::Client,
    pub(crate) token: String,
    pub(crate) api_base: String,
}

impl GitHubClient {
    /// Create a client for the public GitHub API
    pub fn new(token: impl Into<String>) -> GitHubResult<Self> {
        Self::with_api_base(token, API_BASE)
    }

    /// Create a client against another API root (GitHub Enterprise, test servers)
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> GitHubResult<Self> {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| GitHubError::Transport {
                url: api_base.clone(),
                source,
            })?;

        Ok(Self {
            client,
            token: token.into(),
            api_base,
        })
    }

    /// The API root this client talks to
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Absolute URL of a resource under `/repos/{owner}/{repo}`
    ///
    /// `resource` is expected to start with a slash, e.g. `"/branches"`.
    pub fn repo_url(&self, owner: &str, repo: &str, resource: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_base, owner, repo, resource)
    }

    /// GET an absolute URL and decode its JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> GitHubResult<T> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, DEFAULT_USER_AGENT)
            .send()
            .await
            .map_err(|source| GitHubError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GitHubError::from_status(status.as_u16(), url, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|source| GitHubError::Decode {
                url: url.to_string(),
                source,
            })
    }
}
