//! Utility functions for GitHub operations

/// Extract the owner (user or organization) from a GitHub root URL
///
/// Supports:
/// - HTTPS: `https://github.com/owner` (trailing slash allowed)
/// - HTTPS with a repository: `https://github.com/owner/repo`
/// - SSH: `git@github.com:owner`
///
/// Returns `None` when the URL names no owner, e.g. `https://github.com/`.
pub fn parse_owner(root: &str) -> Option<String> {
    let root = root.trim().trim_end_matches('/');

    let path = if let Some(rest) = root
        .strip_prefix("https://")
        .or_else(|| root.strip_prefix("http://"))
    {
        // Drop the host
        rest.split_once('/').map(|(_, path)| path)?
    } else if root.starts_with("git@") {
        root.split_once(':').map(|(_, path)| path)?
    } else {
        return None;
    };

    path.split('/')
        .next()
        .filter(|owner| !owner.is_empty())
        .map(str::to_string)
}
