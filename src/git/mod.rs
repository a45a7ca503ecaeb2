//! Git operations using the system git client
//!
//! This module is organized into sub-modules:
//!
//! ## Sub-modules
//!
//! - [`runner`]: Execution of git subcommands
//!   - `GitRunner` - Seam between the filesystem backend and the git process
//!   - `SystemGit` - Runs the `git` executable found on `PATH`
//!
//! - [`parse`]: Parsers turning git's textual output into records
//!   - `parse_file_list()` - `git ls-files` output
//!   - `parse_branch_list()` - `git branch` output
//!   - `parse_last_commit()` - one-line `git log` output
//!   - `parse_name_only_log()` - full `git log --name-only` output
//!
//! - [`common`]: Shared utilities and helpers
//!   - `Logger` - Consistent logging for bundle operations

pub mod common;
pub mod parse;
pub mod runner;

pub use common::Logger;
pub use parse::{parse_branch_list, parse_file_list, parse_last_commit, parse_name_only_log};
pub use runner::{GitRunner, SystemGit};
