//! Configuration file loading and saving

use super::validation::{self, validation_errors_to_anyhow};
use crate::bundle::{RepoBundle, RepoDescriptor};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A repository outside the standard five, e.g. a shared framework repo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraRepo {
    pub project: String,
    pub subproject: String,
    #[serde(default)]
    pub description: String,
}

impl ExtraRepo {
    pub fn new(project: &str, subproject: &str, description: &str) -> Self {
        Self {
            project: project.to_string(),
            subproject: subproject.to_string(),
            description: description.to_string(),
        }
    }

    pub fn descriptor(&self) -> RepoDescriptor {
        RepoDescriptor::new(&self.project, &self.subproject, &self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Folder holding the working copies
    pub local_root: String,
    /// Folder holding the remotes, or a GitHub owner URL such as `https://github.com/acme`
    pub remote_root: String,
    pub project: String,
    /// Restrict every operation to these repositories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_repos: Vec<ExtraRepo>,
    /// GitHub account whose token is used when pushing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_user: Option<String>,
    /// YAML file with `secrets: {github_token: ...}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets_path: Option<String>,

    /// Directory of the file this configuration was loaded from
    #[serde(skip)]
    config_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(local_root: &str, remote_root: &str, project: &str) -> Self {
        Self {
            local_root: local_root.to_string(),
            remote_root: remote_root.to_string(),
            project: project.to_string(),
            repos: None,
            extra_repos: Vec::new(),
            github_user: None,
            secrets_path: None,
            config_dir: None,
        }
    }

    /// Load configuration from a file
    ///
    /// Relative roots and secrets paths are taken relative to the file's directory.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file '{}'", path))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file '{}'", path))?;

        config.config_dir = Path::new(path).parent().map(|p| p.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;

        // Add document marker for yamllint compliance
        let yaml_content = format!("---\n{}", yaml);

        std::fs::write(path, yaml_content)
            .with_context(|| format!("Failed to write configuration file '{}'", path))?;

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self).map_err(validation_errors_to_anyhow)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.config_dir {
            Some(dir) if Path::new(path).is_relative() => dir.join(path),
            _ => PathBuf::from(path),
        }
    }

    pub fn local_root_path(&self) -> PathBuf {
        self.resolve(&self.local_root)
    }

    /// Remote root as handed to the locator; URLs are left alone
    pub fn remote_root_location(&self) -> String {
        if self.remote_root.contains("://") || self.remote_root.starts_with("git@") {
            self.remote_root.clone()
        } else {
            self.resolve(&self.remote_root).to_string_lossy().into_owned()
        }
    }

    pub fn secrets_file(&self) -> Option<PathBuf> {
        self.secrets_path.as_deref().map(|path| self.resolve(path))
    }

    /// The standard five repositories of the project
    pub fn standard_bundle(&self) -> RepoBundle {
        RepoBundle::standard(&self.project)
    }

    /// Standard repositories plus the configured extras
    pub fn full_bundle(&self) -> RepoBundle {
        self.standard_bundle()
            .extend(self.extra_repos.iter().map(ExtraRepo::descriptor))
    }

    /// The bundle operations act on
    ///
    /// `names` overrides the configured `repos` subset; unknown names are an error.
    pub fn bundle(&self, names: Option<&[String]>) -> Result<RepoBundle> {
        let full = self.full_bundle();
        let Some(names) = names.or(self.repos.as_deref()) else {
            return Ok(full);
        };

        let known: HashSet<String> = full.names().into_iter().collect();
        validation::validate_repository_names(&known, names).map_err(validation_errors_to_anyhow)?;

        Ok(full.subset(names))
    }
}
