//! Promotion, release and branch switching commands

use super::{Command, CommandContext};
use crate::inspector::{BranchName, RepoLocation};
use crate::lifecycle::BranchLifecycleManager;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStep {
    /// integration → master in the remote
    Promote,
    /// master → operate in the remote, then the local operate
    Release,
    /// operate → master → integration in the remote
    Hotfix,
}

pub struct ReleaseCommand {
    pub step: ReleaseStep,
}

#[async_trait]
impl Command for ReleaseCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let workspace = context.workspace()?;
        let manager = BranchLifecycleManager::new(&workspace);

        match self.step {
            ReleaseStep::Promote => manager.promote_integration_to_master().await?,
            ReleaseStep::Release => manager.publish_release().await?,
            ReleaseStep::Hotfix => manager.publish_hotfix().await?,
        }

        Ok(())
    }
}

/// Switch every repository to the same branch
pub struct CheckoutCommand {
    pub branch: String,
    pub remote: bool,
}

#[async_trait]
impl Command for CheckoutCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let workspace = context.workspace()?;
        let location = if self.remote {
            RepoLocation::Remote
        } else {
            RepoLocation::Local
        };

        BranchLifecycleManager::new(&workspace)
            .checkout_branch(&BranchName::parse(&self.branch), location)
            .await?;
        Ok(())
    }
}
