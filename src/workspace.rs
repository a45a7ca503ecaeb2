//! Everything a workflow needs to reach the repositories of a bundle

use crate::bundle::RepoBundle;
use crate::error::RepoResult;
use crate::git::{GitRunner, Logger};
use crate::inspector::{Inspector, RepoLocation, RepoLocator};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Local root, remote root and bundle, plus the means to inspect them
///
/// Both [`BranchLifecycleManager`](crate::lifecycle::BranchLifecycleManager)
/// and [`RepoAdministration`](crate::admin::RepoAdministration) borrow a
/// workspace; neither owns any repository state of its own.
#[derive(Clone)]
pub struct BundleWorkspace {
    local_root: PathBuf,
    remote_root: String,
    bundle: RepoBundle,
    locator: RepoLocator,
    logger: Logger,
}

impl BundleWorkspace {
    pub fn new(
        local_root: impl Into<PathBuf>,
        remote_root: impl Into<String>,
        bundle: RepoBundle,
        locator: RepoLocator,
        logger: Logger,
    ) -> Self {
        Self {
            local_root: local_root.into(),
            remote_root: remote_root.into(),
            bundle,
            locator,
            logger,
        }
    }

    pub fn local_root(&self) -> &Path {
        &self.local_root
    }

    pub fn remote_root(&self) -> &str {
        &self.remote_root
    }

    pub fn bundle(&self) -> &RepoBundle {
        &self.bundle
    }

    pub fn logger(&self) -> Logger {
        self.logger
    }

    /// Runner shared by every filesystem inspector of this workspace
    pub fn runner(&self) -> Arc<dyn GitRunner> {
        self.locator.runner()
    }

    /// Working copy of `name` under the local root
    pub fn local(&self, name: &str) -> RepoResult<Inspector> {
        let root = self.local_root.to_string_lossy();
        self.locator.resolve(&root, name)
    }

    /// `name` under the remote root, either a directory or a GitHub owner
    pub fn remote(&self, name: &str) -> RepoResult<Inspector> {
        Ok(self
            .locator
            .resolve(&self.remote_root, name)?
            .with_location(RepoLocation::Remote))
    }

    pub fn inspector(&self, location: RepoLocation, name: &str) -> RepoResult<Inspector> {
        match location {
            RepoLocation::Local => self.local(name),
            RepoLocation::Remote => self.remote(name),
        }
    }

    /// One inspector per bundled repository, in bundle order
    ///
    /// Fails on the first repository that cannot be located, before any of
    /// them is used.
    pub fn inspectors(&self, location: RepoLocation) -> RepoResult<Vec<Inspector>> {
        self.bundle
            .iter()
            .map(|repo| self.inspector(location, &repo.name))
            .collect()
    }
}
