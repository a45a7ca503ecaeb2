//! Branch listing

use crate::client::GitHubClient;
use crate::error::GitHubResult;
use serde::Deserialize;

/// Page size requested from the branches endpoint (GitHub's maximum)
pub const BRANCHES_PER_PAGE: u32 = 100;

#[derive(Deserialize, Debug, Clone)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub protected: bool,
}

impl GitHubClient {
    /// List every branch of a repository, following pagination
    pub async fn list_branches(&self, owner: &str, repo: &str) -> GitHubResult<Vec<Branch>> {
        let mut branches = Vec::new();
        let mut page = 1;

        loop {
            let url = self.repo_url(
                owner,
                repo,
                &format!("/branches?per_page={}&page={}", BRANCHES_PER_PAGE, page),
            );
            let batch: Vec<Branch> = self.get_json(&url).await?;
            let last_page = batch.len() < BRANCHES_PER_PAGE as usize;
            branches.extend(batch);

            if last_page {
                return Ok(branches);
            }
            page += 1;
        }
    }
}
