//! Common git utilities and shared helpers
//!
//! This module contains utilities that are shared across the git backend,
//! the lifecycle workflows and the reports, such as logging.

use colored::*;

/// Logger for bundle operations with consistent formatting
///
/// Provides standardized logging methods, ensuring consistent output
/// formatting across all workflows. Each log message is prefixed with the
/// repository name in cyan/bold for easy identification.
///
/// There is no global logger: a `Logger` value is handed to every component
/// that reports progress.
///
/// ## Example
///
/// ```rust,no_run
/// use bundle_ops::git::Logger;
///
/// let logger = Logger::default();
/// logger.info("cash.svc", "Starting operation");
/// logger.success("cash.svc", "Operation completed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    quiet: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A logger that only reports errors
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    /// Separator printed before the steps applied to one repository
    pub fn section(&self, repo: &str) {
        if !self.quiet {
            println!("\n{}", format!("----------- {} -----------", repo).cyan().bold());
        }
    }

    pub fn info(&self, repo: &str, msg: &str) {
        if !self.quiet {
            println!("{} | {}", repo.cyan().bold(), msg);
        }
    }

    pub fn success(&self, repo: &str, msg: &str) {
        if !self.quiet {
            println!("{} | {}", repo.cyan().bold(), msg.green());
        }
    }

    pub fn warn(&self, repo: &str, msg: &str) {
        if !self.quiet {
            println!("{} | {}", repo.cyan().bold(), msg.yellow());
        }
    }

    pub fn error(&self, repo: &str, msg: &str) {
        eprintln!("{} | {}", repo.cyan().bold(), msg.red());
    }
}
