//! Feature branch workflow commands

use super::{Command, CommandContext};
use crate::lifecycle::BranchLifecycleManager;
use anyhow::Result;
use async_trait::async_trait;

/// One step in the life of a feature branch
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureAction {
    Start { name: String },
    Commit { name: String, message: String },
    Finish { name: String, remove: bool },
    Remove { name: String },
    Refresh { name: String },
    Pull { name: String },
}

pub struct FeatureCommand {
    pub action: FeatureAction,
}

#[async_trait]
impl Command for FeatureCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let workspace = context.workspace()?;
        let mut manager = BranchLifecycleManager::new(&workspace);

        match &self.action {
            FeatureAction::Start { name } => manager.start_feature(name).await?,
            FeatureAction::Commit { name, message } => {
                if let Some(credential) = context.push_credential()? {
                    manager = manager.with_push_credential(credential);
                }
                manager.commit_feature(name, message).await?
            }
            FeatureAction::Finish { name, remove } => {
                manager.finish_feature(name).await?;
                if *remove {
                    manager.remove_feature(name).await?;
                }
            }
            FeatureAction::Remove { name } => manager.remove_feature(name).await?,
            FeatureAction::Refresh { name } => manager.refresh_from_integration(name).await?,
            FeatureAction::Pull { name } => manager.refresh_from_remote(name).await?,
        }

        Ok(())
    }
}
