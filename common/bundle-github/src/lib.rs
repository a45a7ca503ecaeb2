//! GitHub API client library
//!
//! This library provides the read-only slice of the GitHub REST API that
//! bundle administration needs: commit lookups (including walking parent
//! links) and branch listings.
//!
//! ## Modules
//!
//! - [`client`]: Core GitHub client implementation
//! - [`commits`]: Commit retrieval by reference or by absolute URL
//! - [`branches`]: Paginated branch listing
//! - [`error`]: Error type distinguishing credential, status and transport failures
//! - [`util`]: Utility functions for GitHub URLs

mod branches;
mod client;
mod commits;
mod error;
mod util;

// Re-export public API
pub use branches::{BRANCHES_PER_PAGE, Branch};
pub use client::{API_BASE, GitHubClient, REQUEST_TIMEOUT};
pub use commits::{Commit, CommitAuthor, CommitDetail, CommitFile, ParentRef};
pub use error::{GitHubError, GitHubResult};
pub use util::parse_owner;
