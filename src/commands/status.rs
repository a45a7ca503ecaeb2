//! Read-only commands: status, history and reports

use super::{Command, CommandContext};
use crate::admin::{
    ConsoleReport, GitUsage, JsonReportWriter, RepoAdministration, RepoLog, ReportSink, log_table,
    stats_table,
};
use crate::inspector::RepoLocation;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use std::path::PathBuf;

/// Branch, pending changes and last commit of every repository
pub struct StatusCommand {
    /// Output in JSON format
    pub json: bool,
    pub usage: GitUsage,
}

#[async_trait]
impl Command for StatusCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let workspace = context.workspace()?;
        let admin = RepoAdministration::new(&workspace);
        let stats = admin.repo_stats(self.usage, None).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }

        ConsoleReport.add_table(stats_table(&stats));

        let dirty = stats
            .iter()
            .filter(|s| s.untracked_count + s.modified_count + s.deleted_count > 0)
            .count();
        if dirty > 0 {
            println!(
                "{}",
                format!("{} repository copies have uncommitted changes", dirty).yellow()
            );
        } else {
            println!("{}", "All repositories are clean".green());
        }

        Ok(())
    }
}

/// Commit history of one repository
pub struct LogCommand {
    pub repo: String,
    pub remote: bool,
}

#[async_trait]
impl Command for LogCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let workspace = context.workspace()?;
        let location = if self.remote {
            RepoLocation::Remote
        } else {
            RepoLocation::Local
        };

        let inspector = workspace.inspector(location, &self.repo)?;
        let log = RepoLog {
            repo_name: self.repo.clone(),
            location: inspector.location(),
            entries: inspector.committed_files().await?,
        };

        ConsoleReport.add_table(log_table(&log));
        Ok(())
    }
}

/// Full report (stats plus one log per repository copy) written as JSON
pub struct ReportCommand {
    pub publications_folder: PathBuf,
    pub mask: bool,
    pub local_only: bool,
}

#[async_trait]
impl Command for ReportCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let workspace = context.workspace()?;
        let admin = RepoAdministration::new(&workspace);
        let usage = if self.local_only {
            GitUsage::LocalOnly
        } else {
            GitUsage::LocalAndRemote
        };

        let mut writer = JsonReportWriter::in_publications(&self.publications_folder);
        admin
            .publish_report(&mut writer, usage, None, self.mask)
            .await?;
        let path = writer.save()?;

        println!(
            "{}",
            format!(
                "Wrote {} tables to {}",
                writer.tables().len(),
                path.display()
            )
            .green()
        );
        Ok(())
    }
}
