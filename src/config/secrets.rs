//! Where credentials come from

use super::Config;
use crate::constants::github::{TOKEN_ENV_VAR, TOKEN_SECRET_KEY};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait SecretStore {
    /// Look up `key`; `Ok(None)` when the store has no such secret
    fn secret(&self, key: &str) -> Result<Option<String>>;
}

#[derive(Deserialize)]
struct SecretsFile {
    #[serde(default)]
    secrets: HashMap<String, String>,
}

/// Secrets kept in a YAML file under a top-level `secrets` mapping
#[derive(Debug, Clone)]
pub struct YamlSecretStore {
    path: PathBuf,
}

impl YamlSecretStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SecretStore for YamlSecretStore {
    fn secret(&self, key: &str) -> Result<Option<String>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read secrets file '{}'", self.path.display()))?;
        let file: SecretsFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse secrets file '{}'", self.path.display()))?;
        Ok(file.secrets.get(key).cloned())
    }
}

/// Secrets taken from the process environment
///
/// `github_token` maps to `GITHUB_TOKEN`; other keys are looked up upper-cased.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn secret(&self, key: &str) -> Result<Option<String>> {
        let var = if key == TOKEN_SECRET_KEY {
            TOKEN_ENV_VAR.to_string()
        } else {
            key.to_uppercase()
        };
        Ok(std::env::var(var).ok().filter(|value| !value.trim().is_empty()))
    }
}

/// GitHub token for `config`: its secrets file when one is configured, else the environment
pub fn github_token(config: &Config) -> Result<Option<String>> {
    match config.secrets_file() {
        Some(path) => YamlSecretStore::new(path).secret(TOKEN_SECRET_KEY),
        None => EnvSecretStore.secret(TOKEN_SECRET_KEY),
    }
}
