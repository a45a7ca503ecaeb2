//! Creation of the repositories of a new project

use super::{GitUsage, RepoAdministration};
use crate::bundle::{RepoBundle, RepoDescriptor};
use crate::constants::github::WEB_BASE;
use crate::constants::project::*;
use crate::error::{RepoAdminError, RepoResult};
use crate::inspector::{BranchName, FilesystemInspector, RepoInspector};
use std::path::{Path, PathBuf};

impl RepoAdministration<'_> {
    /// Create every repository of the bundle with a README and a `.gitignore`
    ///
    /// With [`GitUsage::LocalAndRemote`] each repository is initialized under
    /// the remote root, gets its initial commit on `master` and a
    /// `work_branch`, and is cloned under the local root; the remote is left
    /// on `master` so the clone can push to `work_branch`. With
    /// [`GitUsage::LocalOnly`] the same happens in the local root and nothing
    /// is cloned. [`GitUsage::NoGit`] only writes the files.
    ///
    /// No folder is created unless none of the target folders exists yet.
    pub async fn create_project(&self, work_branch: &str, usage: GitUsage) -> RepoResult<RepoBundle> {
        let work_branch = work_branch_name(work_branch)?;
        let bundle = self.workspace.bundle();

        if usage == GitUsage::LocalAndRemote && self.workspace.remote_root().starts_with(WEB_BASE) {
            return Err(RepoAdminError::unsupported(
                "create_project",
                self.workspace.remote_root(),
            ));
        }

        for repo in bundle.iter() {
            if let Some(taken) = self.targets(usage, &repo.name).into_iter().find(|p| p.exists()) {
                return Err(RepoAdminError::AlreadyExists {
                    location: taken.display().to_string(),
                });
            }
        }

        let logger = self.workspace.logger();
        for repo in bundle.iter() {
            logger.section(&repo.name);
            match usage {
                GitUsage::NoGit => {
                    let dir = self.workspace.local_root().join(&repo.name);
                    tokio::fs::create_dir_all(&dir)
                        .await
                        .map_err(|e| RepoAdminError::io(&dir, e))?;
                    write_starter_files(&dir, repo).await?;
                }
                GitUsage::LocalOnly => {
                    self.init_with_work_branch(self.workspace.local_root(), repo, &work_branch)
                        .await?;
                }
                GitUsage::LocalAndRemote => {
                    let remote_root = Path::new(self.workspace.remote_root());
                    let remote = self.init_with_work_branch(remote_root, repo, &work_branch).await?;
                    remote.clone_into(self.workspace.local_root()).await?;
                    remote.checkout(&BranchName::Master).await?;
                }
            }
            logger.success(&repo.name, "Created");
        }

        Ok(bundle.clone())
    }

    fn targets(&self, usage: GitUsage, name: &str) -> Vec<PathBuf> {
        let mut targets = vec![self.workspace.local_root().join(name)];
        if usage == GitUsage::LocalAndRemote {
            targets.push(Path::new(self.workspace.remote_root()).join(name));
        }
        targets
    }

    async fn init_with_work_branch(
        &self,
        root: &Path,
        repo: &RepoDescriptor,
        work_branch: &BranchName,
    ) -> RepoResult<FilesystemInspector> {
        let inspector = FilesystemInspector::init_repo(root, &repo.name, self.workspace.runner()).await?;
        write_starter_files(inspector.path(), repo).await?;
        inspector
            .commit_files(&[README_FILE, GITIGNORE_FILE], INITIAL_COMMIT_MSG)
            .await?;
        inspector.switch_to_new_branch(work_branch).await?;
        Ok(inspector)
    }
}

/// `master` already exists once the initial commit is made
fn work_branch_name(name: &str) -> RepoResult<BranchName> {
    match BranchName::parse(name) {
        BranchName::Master => Err(RepoAdminError::InvalidBranchName {
            name: name.to_string(),
            reason: "the work branch must differ from 'master'".to_string(),
        }),
        BranchName::Feature(name) => BranchName::feature(&name),
        role => Ok(role),
    }
}

async fn write_starter_files(dir: &Path, repo: &RepoDescriptor) -> RepoResult<()> {
    let readme = dir.join(README_FILE);
    tokio::fs::write(
        &readme,
        format!("{} for application '{}'.\n", repo.description, repo.name),
    )
    .await
    .map_err(|e| RepoAdminError::io(&readme, e))?;

    let gitignore = dir.join(GITIGNORE_FILE);
    let content: String = GITIGNORE_LINES.iter().map(|line| format!("{}\n", line)).collect();
    tokio::fs::write(&gitignore, content)
        .await
        .map_err(|e| RepoAdminError::io(&gitignore, e))?;

    Ok(())
}
