//! Branch promotion across every repository of a bundle
//!
//! Feature work happens locally and reaches `integration` through a local
//! merge; `integration` is promoted to `master` in the remote, releases go
//! from `master` to `operate`, and hot fixes flow back from `operate`.
//!
//! Every operation checks its preconditions on the whole bundle first and
//! only then starts changing repositories, one repository at a time in bundle
//! order. A failure while changing repositories stops the operation; the
//! repositories already processed keep their new state.

use crate::error::{RepoAdminError, RepoResult};
use crate::git::Logger;
use crate::inspector::{BranchName, Inspector, PushCredential, RepoLocation};
use crate::workspace::BundleWorkspace;

pub struct BranchLifecycleManager<'a> {
    workspace: &'a BundleWorkspace,
    credential: Option<PushCredential>,
    logger: Logger,
}

impl<'a> BranchLifecycleManager<'a> {
    pub fn new(workspace: &'a BundleWorkspace) -> Self {
        Self {
            workspace,
            credential: None,
            logger: workspace.logger(),
        }
    }

    /// Rewrite `origin` with this credential before every push of [`Self::commit_feature`]
    pub fn with_push_credential(mut self, credential: PushCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    fn local_repos(&self) -> RepoResult<Vec<Inspector>> {
        self.workspace.inspectors(RepoLocation::Local)
    }

    fn remote_repos(&self) -> RepoResult<Vec<Inspector>> {
        self.workspace.inspectors(RepoLocation::Remote)
    }

    /// Switch to the feature branch, creating it (and its remote backup) where missing
    pub async fn start_feature(&self, name: &str) -> RepoResult<()> {
        let feature = BranchName::feature(name)?;

        for repo in self.local_repos()? {
            self.logger.section(repo.repo_name());
            if repo.has_branch(&feature).await? {
                repo.checkout(&feature).await?;
                self.logger
                    .info(repo.repo_name(), &format!("Switched to existing branch '{}'", feature));
            } else {
                repo.create_branch(&feature).await?;
                self.logger.success(
                    repo.repo_name(),
                    &format!("Created branch '{}' and pushed it to the remote", feature),
                );
            }
        }

        Ok(())
    }

    /// Commit pending work on the feature branch and push it as a backup
    pub async fn commit_feature(&self, name: &str, message: &str) -> RepoResult<()> {
        let feature = BranchName::feature(name)?;
        let repos = self.local_repos()?;

        for repo in &repos {
            let actual = repo.current_branch().await?;
            if actual != feature {
                return Err(RepoAdminError::BranchMismatch {
                    repo: repo.repo_name().to_string(),
                    expected: feature.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        for repo in &repos {
            self.logger.section(repo.repo_name());
            if repo.commit_all(message).await? {
                self.logger.success(repo.repo_name(), "Committed");
            } else {
                self.logger.info(repo.repo_name(), "Nothing to commit");
            }

            if let Some(credential) = &self.credential {
                repo.authenticate_remote(credential).await?;
            }
            repo.push().await?;
            self.logger.success(repo.repo_name(), "Pushed");
        }

        Ok(())
    }

    /// Merge the feature branch into `integration` locally and push `integration`
    pub async fn finish_feature(&self, name: &str) -> RepoResult<()> {
        let feature = BranchName::feature(name)?;
        let repos = self.local_repos()?;

        let dirty = self.repos_with_uncommitted_work(&repos).await?;
        if !dirty.is_empty() {
            return Err(RepoAdminError::UncommittedWorkConflict {
                branch: feature.to_string(),
                repos: dirty,
            });
        }

        for repo in &repos {
            self.logger.section(repo.repo_name());
            repo.update_local(&BranchName::Integration).await?;
            repo.pull_request(&feature, &BranchName::Integration).await?;
            repo.push().await?;
            self.logger.success(
                repo.repo_name(),
                &format!("Merged '{}' into '{}'", feature, BranchName::Integration),
            );
        }

        Ok(())
    }

    /// Delete the feature branch locally and remotely, once merged everywhere
    pub async fn remove_feature(&self, name: &str) -> RepoResult<()> {
        let feature = BranchName::feature(name)?;
        let repos = self.local_repos()?;

        let mut unmerged = Vec::new();
        for repo in &repos {
            let merged = repo.merged_branches(&BranchName::Integration).await?;
            if !merged.contains(&feature) {
                unmerged.push(repo.repo_name().to_string());
            }
        }
        if !unmerged.is_empty() {
            return Err(RepoAdminError::UnmergedBranchConflict {
                branch: feature.to_string(),
                into: BranchName::Integration.to_string(),
                repos: unmerged,
            });
        }

        for repo in &repos {
            self.logger.section(repo.repo_name());
            // git refuses to delete the branch that is checked out
            if repo.current_branch().await? == feature {
                self.logger.warn(
                    repo.repo_name(),
                    &format!("'{}' is checked out, switching to '{}'", feature, BranchName::Integration),
                );
                repo.checkout(&BranchName::Integration).await?;
            }
            repo.delete_branch(&feature).await?;
            self.logger.success(
                repo.repo_name(),
                &format!("Deleted local and remote '{}'", feature),
            );
        }

        Ok(())
    }

    /// Bring the latest `integration` into the feature branch
    pub async fn refresh_from_integration(&self, name: &str) -> RepoResult<()> {
        let feature = BranchName::feature(name)?;
        let repos = self.local_repos()?;

        let dirty = self.repos_with_uncommitted_work(&repos).await?;
        if !dirty.is_empty() {
            return Err(RepoAdminError::UncommittedWorkConflict {
                branch: feature.to_string(),
                repos: dirty,
            });
        }

        for repo in &repos {
            self.logger.section(repo.repo_name());
            repo.update_local(&BranchName::Integration).await?;
            repo.pull_request(&BranchName::Integration, &feature).await?;
            self.logger.success(
                repo.repo_name(),
                &format!("Merged '{}' into '{}'", BranchName::Integration, feature),
            );
        }

        Ok(())
    }

    /// Pull the remote feature branch into the local one
    pub async fn refresh_from_remote(&self, name: &str) -> RepoResult<()> {
        let feature = BranchName::feature(name)?;

        for repo in self.local_repos()? {
            self.logger.section(repo.repo_name());
            repo.update_local(&feature).await?;
            self.logger.success(repo.repo_name(), &format!("Pulled '{}'", feature));
        }

        Ok(())
    }

    /// In the remote, sync `integration` with `master` and then promote it to `master`
    pub async fn promote_integration_to_master(&self) -> RepoResult<()> {
        for repo in self.remote_repos()? {
            self.logger.section(repo.repo_name());
            repo.pull_request(&BranchName::Master, &BranchName::Integration)
                .await?;
            repo.pull_request(&BranchName::Integration, &BranchName::Master)
                .await?;
            self.logger.success(repo.repo_name(), "Promoted integration to master");
        }

        Ok(())
    }

    /// Release remote `master` to remote `operate` and refresh the local `operate`
    pub async fn publish_release(&self) -> RepoResult<()> {
        let remotes = self.remote_repos()?;
        let locals = self.local_repos()?;

        for (remote, local) in remotes.iter().zip(&locals) {
            self.logger.section(remote.repo_name());
            remote
                .pull_request(&BranchName::Master, &BranchName::Operate)
                .await?;
            remote.checkout(&BranchName::Master).await?;
            local.update_local(&BranchName::Operate).await?;
            self.logger.success(remote.repo_name(), "Published release to operate");
        }

        Ok(())
    }

    /// Carry a hot fix from remote `operate` to `master` and `integration`
    ///
    /// The local working copy ends up back on `operate`, where hot fixes are made.
    pub async fn publish_hotfix(&self) -> RepoResult<()> {
        let remotes = self.remote_repos()?;
        let locals = self.local_repos()?;

        for (remote, local) in remotes.iter().zip(&locals) {
            self.logger.section(remote.repo_name());
            remote
                .pull_request(&BranchName::Operate, &BranchName::Master)
                .await?;
            remote
                .pull_request(&BranchName::Master, &BranchName::Integration)
                .await?;
            remote.checkout(&BranchName::Master).await?;

            local.update_local(&BranchName::Integration).await?;
            local.checkout(&BranchName::Operate).await?;
            self.logger.success(remote.repo_name(), "Published hot fix");
        }

        Ok(())
    }

    /// Check out `branch` in every repository at `location`
    ///
    /// Nothing is switched unless every repository is clean and has the branch.
    pub async fn checkout_branch(&self, branch: &BranchName, location: RepoLocation) -> RepoResult<()> {
        let repos = self.workspace.inspectors(location)?;

        let mut dirty = Vec::new();
        for repo in &repos {
            let untracked = repo.untracked_files().await?;
            let modified = repo.modified_files().await?;
            let deleted = repo.deleted_files().await?;
            if !untracked.is_empty() || !modified.is_empty() || !deleted.is_empty() {
                dirty.push(repo.repo_name().to_string());
            }
        }
        if !dirty.is_empty() {
            return Err(RepoAdminError::UncommittedWorkConflict {
                branch: branch.to_string(),
                repos: dirty,
            });
        }

        let mut missing = Vec::new();
        for repo in &repos {
            if !repo.has_branch(branch).await? {
                missing.push(repo.repo_name().to_string());
            }
        }
        if !missing.is_empty() {
            return Err(RepoAdminError::MissingBranch {
                branch: branch.to_string(),
                repos: missing,
            });
        }

        for repo in &repos {
            repo.checkout(branch).await?;
            self.logger
                .success(repo.repo_name(), &format!("Checked out '{}'", branch));
        }

        Ok(())
    }

    async fn repos_with_uncommitted_work(&self, repos: &[Inspector]) -> RepoResult<Vec<String>> {
        let mut dirty = Vec::new();
        for repo in repos {
            if repo.has_uncommitted_work().await? {
                dirty.push(repo.repo_name().to_string());
            }
        }
        Ok(dirty)
    }
}
