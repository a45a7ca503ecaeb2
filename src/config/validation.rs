//! Configuration validation
//!
//! All problems of a configuration are collected before reporting, so that a
//! broken file can be fixed in one go.

use super::Config;
use anyhow::{Result, anyhow};
use std::collections::HashSet;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required setting is missing or blank
    EmptyField(&'static str),
    /// An extra repository lacks its project or subproject
    IncompleteExtraRepo(usize),
    /// Two extra repositories share a name, or one repeats a standard repository
    DuplicateRepositoryName(String),
    /// The `repos` subset names a repository that is not in the bundle
    UnknownRepository(String),
    /// The `repos` subset is present but lists nothing
    EmptyRepositorySubset,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyField(field) => {
                write!(f, "'{}' cannot be empty", field)
            }
            ValidationError::IncompleteExtraRepo(idx) => {
                write!(
                    f,
                    "Extra repository #{} needs both a project and a subproject",
                    idx + 1
                )
            }
            ValidationError::DuplicateRepositoryName(name) => {
                write!(f, "Duplicate repository name: '{}'", name)
            }
            ValidationError::UnknownRepository(name) => {
                write!(f, "Repository '{}' is not part of the bundle", name)
            }
            ValidationError::EmptyRepositorySubset => {
                write!(f, "'repos' must list at least one repository when present")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("local_root", &config.local_root),
        ("remote_root", &config.remote_root),
        ("project", &config.project),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyField(field));
        }
    }

    let mut names: HashSet<String> = config.standard_bundle().names().into_iter().collect();
    for (idx, extra) in config.extra_repos.iter().enumerate() {
        if extra.project.trim().is_empty() || extra.subproject.trim().is_empty() {
            errors.push(ValidationError::IncompleteExtraRepo(idx));
            continue;
        }
        let name = extra.descriptor().name;
        if !names.insert(name.clone()) {
            errors.push(ValidationError::DuplicateRepositoryName(name));
        }
    }

    if let Some(subset) = &config.repos {
        if subset.is_empty() {
            errors.push(ValidationError::EmptyRepositorySubset);
        }
        if let Err(mut unknown) = validate_repository_names(&names, subset) {
            errors.append(&mut unknown);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that every requested name belongs to the bundle
pub fn validate_repository_names(
    known: &HashSet<String>,
    requested: &[String],
) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = requested
        .iter()
        .filter(|name| !known.contains(*name))
        .map(|name| ValidationError::UnknownRepository(name.clone()))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Convert validation errors to anyhow::Error
pub fn validation_errors_to_anyhow(errors: Vec<ValidationError>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    anyhow!("Configuration validation failed:\n  - {}", messages.join("\n  - "))
}
