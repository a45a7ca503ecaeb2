//! Base types and traits for the command pattern

use crate::config::{Config, github_token};
use crate::git::Logger;
use crate::inspector::{PushCredential, RepoLocator};
use crate::workspace::BundleWorkspace;
use anyhow::{Context, Result, anyhow};

/// Context passed to all commands containing shared configuration and options
#[derive(Clone)]
pub struct CommandContext {
    /// The loaded configuration
    pub config: Config,
    /// Optional list of specific repository names to operate on
    pub repos: Option<Vec<String>>,
    pub logger: Logger,
}

impl CommandContext {
    /// Build the workspace commands operate on
    ///
    /// GitHub access is enabled whenever a token can be found.
    pub fn workspace(&self) -> Result<BundleWorkspace> {
        let bundle = self.config.bundle(self.repos.as_deref())?;

        let mut locator = RepoLocator::default();
        if let Some(token) = github_token(&self.config)? {
            locator = locator
                .with_github_token(&token)
                .context("Failed to set up the GitHub client")?;
        }

        Ok(BundleWorkspace::new(
            self.config.local_root_path(),
            self.config.remote_root_location(),
            bundle,
            locator,
            self.logger,
        ))
    }

    /// Credential to push with, when a GitHub user is configured
    pub fn push_credential(&self) -> Result<Option<PushCredential>> {
        let Some(user) = &self.config.github_user else {
            return Ok(None);
        };
        let token = github_token(&self.config)?.ok_or_else(|| {
            anyhow!(
                "'github_user' is set to '{}' but no GitHub token was found in the secrets file or GITHUB_TOKEN",
                user
            )
        })?;
        Ok(Some(PushCredential::new(user.clone(), token)))
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
