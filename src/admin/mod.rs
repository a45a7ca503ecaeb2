//! Status and history reports across a bundle

pub mod project;
pub mod report;

pub use report::{ConsoleReport, JsonReportWriter, ReportSink, Table};

use crate::constants::report::*;
use crate::error::RepoResult;
use crate::inspector::{BranchName, CommitRecord, CommittedFileEntry, RepoInspector, RepoLocation};
use crate::workspace::BundleWorkspace;
use serde::Serialize;

/// Which copies of each repository a report looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitUsage {
    NoGit,
    LocalOnly,
    #[default]
    LocalAndRemote,
}

impl GitUsage {
    pub fn locations(&self) -> &'static [RepoLocation] {
        match self {
            GitUsage::NoGit => &[],
            GitUsage::LocalOnly => &[RepoLocation::Local],
            GitUsage::LocalAndRemote => &[RepoLocation::Local, RepoLocation::Remote],
        }
    }
}

/// State of one copy of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoStats {
    pub repo_name: String,
    pub location: RepoLocation,
    pub current_branch: BranchName,
    pub untracked_count: usize,
    pub modified_count: usize,
    pub deleted_count: usize,
    pub last_commit: CommitRecord,
}

/// History of one copy of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoLog {
    pub repo_name: String,
    pub location: RepoLocation,
    pub entries: Vec<CommittedFileEntry>,
}

pub struct RepoAdministration<'a> {
    workspace: &'a BundleWorkspace,
}

impl<'a> RepoAdministration<'a> {
    pub fn new(workspace: &'a BundleWorkspace) -> Self {
        Self { workspace }
    }

    pub fn repo_names(&self) -> Vec<String> {
        self.workspace.bundle().names()
    }

    pub async fn current_local_branch(&self, repo: &str) -> RepoResult<BranchName> {
        self.workspace.local(repo)?.current_branch().await
    }

    fn scope(&self, repos: Option<&[String]>) -> Vec<String> {
        match repos {
            Some(repos) => repos.to_vec(),
            None => self.repo_names(),
        }
    }

    /// One row per repository and location; a repository's local row precedes its remote row
    pub async fn repo_stats(&self, usage: GitUsage, repos: Option<&[String]>) -> RepoResult<Vec<RepoStats>> {
        let mut stats = Vec::new();
        for name in self.scope(repos) {
            for &location in usage.locations() {
                let inspector = self.workspace.inspector(location, &name)?;
                stats.push(one_repo_stats(&*inspector).await?);
            }
        }
        Ok(stats)
    }

    pub async fn repo_logs(&self, usage: GitUsage, repos: Option<&[String]>) -> RepoResult<Vec<RepoLog>> {
        let mut logs = Vec::new();
        for name in self.scope(repos) {
            for &location in usage.locations() {
                let inspector = self.workspace.inspector(location, &name)?;
                logs.push(RepoLog {
                    repo_name: name.clone(),
                    location: inspector.location(),
                    entries: inspector.committed_files().await?,
                });
            }
        }
        Ok(logs)
    }

    /// Write the stats table and one log table per repository copy into `sink`
    ///
    /// With `mask` set, timestamps, hashes and authors are replaced so that
    /// two reports over the same content compare equal.
    pub async fn publish_report(
        &self,
        sink: &mut dyn ReportSink,
        usage: GitUsage,
        repos: Option<&[String]>,
        mask: bool,
    ) -> RepoResult<()> {
        let mut stats = stats_table(&self.repo_stats(usage, repos).await?);
        if mask {
            stats.fill_columns(&[LAST_COMMIT_TIMESTAMP_COL, LAST_COMMIT_HASH_COL], MASKED_MSG);
        }
        sink.add_table(stats);

        for log in self.repo_logs(usage, repos).await? {
            let mut table = log_table(&log);
            if mask {
                table.fill_columns(
                    &[COMMIT_DATE_COL, COMMIT_HASH_COL, COMMIT_AUTHOR_COL],
                    MASKED_MSG,
                );
            }
            sink.add_table(table);
        }

        Ok(())
    }
}

async fn one_repo_stats(inspector: &dyn RepoInspector) -> RepoResult<RepoStats> {
    Ok(RepoStats {
        repo_name: inspector.repo_name().to_string(),
        location: inspector.location(),
        current_branch: inspector.current_branch().await?,
        untracked_count: inspector.untracked_files().await?.len(),
        modified_count: inspector.modified_files().await?.len(),
        deleted_count: inspector.deleted_files().await?.len(),
        last_commit: inspector.last_commit().await?,
    })
}

/// Name of the log table of one repository copy, cut to what spreadsheet tabs accept
///
/// Only the repository part is shortened, so a repository's local and remote
/// tables never share a name.
pub fn log_table_name(repo: &str, location: RepoLocation) -> String {
    let suffix = format!(" ({})", location);
    let room = MAX_TABLE_NAME_LEN.saturating_sub(suffix.chars().count());
    let repo: String = repo.chars().take(room).collect();
    format!("{}{}", repo, suffix)
}

pub fn stats_table(stats: &[RepoStats]) -> Table {
    let mut table = Table::new(
        STATS_TABLE,
        &[
            REPO_NAME_COL,
            LOCAL_OR_REMOTE_COL,
            CURRENT_BRANCH_COL,
            NB_UNTRACKED_FILES_COL,
            NB_MODIFIED_FILES_COL,
            NB_DELETED_FILES_COL,
            LAST_COMMIT_COL,
            LAST_COMMIT_TIMESTAMP_COL,
            LAST_COMMIT_HASH_COL,
        ],
    );

    for row in stats {
        table.push_row(vec![
            row.repo_name.clone(),
            row.location.to_string(),
            row.current_branch.to_string(),
            row.untracked_count.to_string(),
            row.modified_count.to_string(),
            row.deleted_count.to_string(),
            row.last_commit.message.clone(),
            row.last_commit.timestamp.to_string(),
            row.last_commit.hash.clone(),
        ]);
    }

    table
}

pub fn log_table(log: &RepoLog) -> Table {
    let mut table = Table::new(
        log_table_name(&log.repo_name, log.location),
        &[
            COMMIT_NB_COL,
            COMMIT_DATE_COL,
            COMMIT_SUMMARY_COL,
            COMMIT_FILE_NB_COL,
            COMMIT_FILE_COL,
            COMMIT_HASH_COL,
            COMMIT_AUTHOR_COL,
        ],
    );

    for entry in &log.entries {
        table.push_row(vec![
            entry.commit_ordinal.to_string(),
            entry.commit_date.to_string(),
            entry.summary.clone(),
            entry.file_ordinal.to_string(),
            entry.file_path.clone(),
            entry.commit_hash.clone(),
            entry.author.clone(),
        ]);
    }

    table
}
