//! Init command implementation

use super::{Command, CommandContext};
use crate::admin::{GitUsage, RepoAdministration};
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Create the repositories of a new project from the configured bundle
pub struct InitCommand {
    pub work_branch: String,
    pub usage: GitUsage,
}

#[async_trait]
impl Command for InitCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let workspace = context.workspace()?;
        let bundle = RepoAdministration::new(&workspace)
            .create_project(&self.work_branch, self.usage)
            .await?;

        println!(
            "{}",
            format!(
                "Created {} repositories under {}",
                bundle.len(),
                workspace.local_root().display()
            )
            .green()
        );
        Ok(())
    }
}
