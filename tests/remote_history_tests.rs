//! GitHub inspector tests over an in-memory commit graph

mod support;

use bundle_ops::error::RepoAdminError;
use bundle_ops::git::SystemGit;
use bundle_ops::inspector::{
    BranchName, CommitSource, FilesystemInspector, GitHubInspector, PushCredential,
    RepoInspector, RepoLocation,
};
use std::collections::HashSet;
use std::sync::Arc;
use support::*;
use tempfile::TempDir;

const OWNER_PAGE: &str = "https://github.com/acme";

fn remote_over(fake: Arc<FakeGitHub>) -> GitHubInspector {
    let source: Arc<dyn CommitSource> = fake;
    GitHubInspector::new(OWNER_PAGE, "cash.svc", source).unwrap()
}

/// a <- b <- m, a <- c <- m
fn diamond() -> Vec<bundle_github::Commit> {
    vec![
        api_commit("aaaa111", "2024-01-01T09:00:00Z", "Initial commit", &[], &["README.md"]),
        api_commit(
            "bbbb222",
            "2024-01-02T09:00:00Z",
            "Add service",
            &["aaaa111"],
            &["src/service.rs", "src/lib.rs"],
        ),
        api_commit("cccc333", "2024-01-03T09:00:00Z", "Add docs", &["aaaa111"], &["docs/index.md"]),
        api_commit(
            "dddd444",
            "2024-01-04T09:00:00Z",
            "Merge pull request #1 from acme/integration\n\nFirst MVP",
            &["bbbb222", "cccc333"],
            &[],
        ),
    ]
}

#[tokio::test]
async fn test_diamond_history_visits_each_commit_once() {
    let fake = Arc::new(FakeGitHub::new(diamond(), "dddd444"));
    let remote = remote_over(fake.clone());

    let entries = remote.committed_files().await.unwrap();

    let fetches = fake.fetches();
    let distinct: HashSet<&String> = fetches.iter().collect();
    assert_eq!(fetches.len(), 4);
    assert_eq!(distinct.len(), 4);

    let positions: Vec<(usize, &str, usize, &str)> = entries
        .iter()
        .map(|e| {
            (
                e.commit_ordinal,
                e.commit_hash.as_str(),
                e.file_ordinal,
                e.file_path.as_str(),
            )
        })
        .collect();
    assert_eq!(
        positions,
        vec![
            (0, "aaaa111", 0, "README.md"),
            (1, "bbbb222", 0, "src/service.rs"),
            (1, "bbbb222", 1, "src/lib.rs"),
            (2, "cccc333", 0, "docs/index.md"),
            (3, "dddd444", 0, ""),
        ]
    );

    let merge = entries.last().unwrap();
    assert_eq!(merge.summary, "Merge pull request #1 from acme/integration; First MVP");
    assert_eq!(merge.author, "Test User <test@example.com>");
    assert_eq!(merge.commit_date.to_string(), "240104.090000");
}

#[tokio::test]
async fn test_unrelated_commits_with_equal_dates_are_ordered_by_hash() {
    let commits = vec![
        api_commit("aaaa111", "2024-01-01T09:00:00Z", "Initial commit", &[], &["README.md"]),
        api_commit("ffff999", "2024-01-02T09:00:00Z", "Left", &["aaaa111"], &["left.txt"]),
        api_commit("eeee888", "2024-01-02T09:00:00Z", "Right", &["aaaa111"], &["right.txt"]),
        api_commit(
            "dddd444",
            "2024-01-03T09:00:00Z",
            "Merge",
            &["ffff999", "eeee888"],
            &[],
        ),
    ];
    let remote = remote_over(Arc::new(FakeGitHub::new(commits, "dddd444")));

    let first = remote.committed_files().await.unwrap();
    let second = remote.committed_files().await.unwrap();
    assert_eq!(first, second);

    // Siblings share a date; eeee888 sorts before ffff999 and so gets the
    // higher ordinal
    assert_eq!(first[1].commit_hash, "ffff999");
    assert_eq!(first[1].commit_ordinal, 1);
    assert_eq!(first[2].commit_hash, "eeee888");
    assert_eq!(first[2].commit_ordinal, 2);
}

#[tokio::test]
async fn test_linear_history_matches_local_log() {
    let temp_dir = TempDir::new().unwrap();
    let repo = temp_dir.path().join("cash.svc");
    init_empty_repo(&repo);

    let dates = [
        ("2024-03-01 08:00:00 +0000", "2024-03-01T08:00:00Z"),
        ("2024-03-02 09:15:00 +0000", "2024-03-02T09:15:00Z"),
        ("2024-03-03 17:45:30 +0000", "2024-03-03T17:45:30Z"),
    ];
    let steps = [
        ("README.md", "Initial commit"),
        ("service.rs", "Add service"),
        ("service.rs", "Fix rounding\n\nRounds half to even"),
    ];

    let mut commits = Vec::new();
    let mut parent: Option<String> = None;
    for (idx, ((file, message), (git_date, api_date))) in steps.iter().zip(dates).enumerate() {
        commit_file_at(&repo, file, &format!("v{}\n", idx), message, git_date);
        let sha = git(&repo, &["rev-parse", "HEAD"]);
        let parents: Vec<&str> = parent.iter().map(String::as_str).collect();
        commits.push(api_commit(&sha, api_date, message, &parents, &[*file]));
        parent = Some(sha);
    }
    let tip = parent.unwrap();

    let local = FilesystemInspector::new(temp_dir.path(), "cash.svc", Arc::new(SystemGit)).unwrap();
    let remote = remote_over(Arc::new(FakeGitHub::new(commits, &tip)));

    let local_entries = local.committed_files().await.unwrap();
    let remote_entries = remote.committed_files().await.unwrap();
    assert_eq!(local_entries.len(), 3);
    assert_eq!(local_entries, remote_entries);
    assert_eq!(remote_entries[2].summary, "Fix rounding; Rounds half to even");
}

#[tokio::test]
async fn test_same_second_history_matches_local_log() {
    let temp_dir = TempDir::new().unwrap();
    let repo = temp_dir.path().join("cash.svc");
    init_empty_repo(&repo);

    let mut commits = Vec::new();
    let mut parent: Option<String> = None;
    for step in 0..4 {
        let file = format!("step{}.txt", step);
        let message = format!("step {}", step);
        commit_file_at(&repo, &file, "x\n", &message, "2024-03-01 08:00:00 +0000");
        let sha = git(&repo, &["rev-parse", "HEAD"]);
        let parents: Vec<&str> = parent.iter().map(String::as_str).collect();
        commits.push(api_commit(
            &sha,
            "2024-03-01T08:00:00Z",
            &message,
            &parents,
            &[file.as_str()],
        ));
        parent = Some(sha);
    }
    let tip = parent.unwrap();

    let local = FilesystemInspector::new(temp_dir.path(), "cash.svc", Arc::new(SystemGit)).unwrap();
    let remote = remote_over(Arc::new(FakeGitHub::new(commits, &tip)));

    let local_entries = local.committed_files().await.unwrap();
    let remote_entries = remote.committed_files().await.unwrap();

    let steps: Vec<(usize, &str)> = remote_entries
        .iter()
        .map(|e| (e.commit_ordinal, e.summary.as_str()))
        .collect();
    assert_eq!(
        steps,
        vec![(0, "step 0"), (1, "step 1"), (2, "step 2"), (3, "step 3")]
    );
    assert_eq!(local_entries, remote_entries);
}

#[tokio::test]
async fn test_child_dated_before_parent_stays_newer() {
    let commits = vec![
        api_commit("aaaa111", "2024-01-05T09:00:00Z", "Initial commit", &[], &["README.md"]),
        api_commit("bbbb222", "2024-01-01T09:00:00Z", "Skewed clock", &["aaaa111"], &["a.txt"]),
    ];
    let remote = remote_over(Arc::new(FakeGitHub::new(commits, "bbbb222")));

    let entries = remote.committed_files().await.unwrap();
    let order: Vec<(usize, &str)> = entries
        .iter()
        .map(|e| (e.commit_ordinal, e.commit_hash.as_str()))
        .collect();
    assert_eq!(order, vec![(0, "aaaa111"), (1, "bbbb222")]);
}

#[tokio::test]
async fn test_remote_status_queries() {
    let fake = Arc::new(
        FakeGitHub::new(diamond(), "dddd444").with_branches(&["master", "integration", "story_9"]),
    );
    let remote = remote_over(fake);

    assert_eq!(remote.location(), RepoLocation::Remote);
    assert_eq!(remote.current_branch().await.unwrap(), BranchName::Master);
    assert!(remote.modified_files().await.unwrap().is_empty());
    assert!(remote.untracked_files().await.unwrap().is_empty());
    assert!(!remote.has_uncommitted_work().await.unwrap());

    let last = remote.last_commit().await.unwrap();
    assert_eq!(last.hash, "dddd444");
    assert_eq!(last.message, "Merge pull request #1 from acme/integration");

    let branches = remote.branches().await.unwrap();
    assert_eq!(
        branches,
        vec![
            BranchName::Master,
            BranchName::Integration,
            BranchName::Feature("story_9".to_string())
        ]
    );
}

#[tokio::test]
async fn test_remote_refuses_working_tree_operations() {
    let remote = remote_over(Arc::new(FakeGitHub::new(diamond(), "dddd444")));
    let feature = BranchName::Feature("story_9".to_string());

    let results = vec![
        remote.checkout(&feature).await,
        remote.pull_request(&feature, &BranchName::Integration).await,
        remote.update_local(&BranchName::Integration).await,
        remote.create_branch(&feature).await,
        remote.commit_all("message").await.map(|_| ()),
        remote.push().await,
        remote.delete_branch(&feature).await,
        remote
            .authenticate_remote(&PushCredential::new("ada", "token"))
            .await,
    ];

    for result in results {
        assert!(matches!(
            result,
            Err(RepoAdminError::UnsupportedOperation { repo, .. }) if repo == "cash.svc"
        ));
    }
}

#[tokio::test]
async fn test_missing_parent_fails() {
    let commits = vec![api_commit(
        "bbbb222",
        "2024-01-02T09:00:00Z",
        "Orphaned",
        &["aaaa111"],
        &["a.txt"],
    )];
    let remote = remote_over(Arc::new(FakeGitHub::new(commits, "bbbb222")));

    assert!(remote.committed_files().await.is_err());
}
