//! Command argument validation utilities
//!
//! This module provides centralized validation logic for command arguments
//! after clap parsing. Rules that belong to the domain (feature branch names,
//! bundle membership) live with the domain types; these checks only reject
//! input that is unusable on its face.

use anyhow::{Result, anyhow};
use std::path::Path;

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
    /// Empty collection when at least one item is required
    EmptyCollection { argument: String },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
            CommandValidationError::EmptyCollection { argument } => {
                write!(f, "{} cannot be empty", argument)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

/// Convert validation error to anyhow::Error
pub fn validation_error_to_anyhow(error: CommandValidationError) -> anyhow::Error {
    anyhow!(error.to_string())
}

fn not_blank(argument: &str, value: &str, reason: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: argument.to_string(),
                value: value.to_string(),
                reason: reason.to_string(),
            },
        ));
    }
    Ok(())
}

/// Validate repository names
///
/// `None` means the whole bundle; an explicit but empty list is a mistake.
pub fn validate_repository_names(repos: &Option<Vec<String>>) -> Result<()> {
    let Some(repos) = repos else {
        return Ok(());
    };
    if repos.is_empty() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::EmptyCollection {
                argument: "--repos".to_string(),
            },
        ));
    }
    for repo in repos {
        not_blank(
            "repository name",
            repo,
            "repository name cannot be empty or whitespace only",
        )?;
    }
    Ok(())
}

/// Validate commit message
pub fn validate_commit_message(message: &str) -> Result<()> {
    not_blank(
        "commit message",
        message,
        "commit message cannot be empty or whitespace only",
    )
}

/// Validate a branch to check out
///
/// Any role or feature name is acceptable here; only blanks are rejected.
pub fn validate_branch_name(branch: &str) -> Result<()> {
    not_blank(
        "branch",
        branch,
        "branch name cannot be empty or whitespace only",
    )
}

/// Validate the publications folder of a report
pub fn validate_publications_folder(folder: &Path) -> Result<()> {
    not_blank(
        "publications folder",
        &folder.to_string_lossy(),
        "publications folder cannot be empty",
    )?;
    if folder.exists() && !folder.is_dir() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "publications folder".to_string(),
                value: folder.display().to_string(),
                reason: "path exists and is not a directory".to_string(),
            },
        ));
    }
    Ok(())
}
