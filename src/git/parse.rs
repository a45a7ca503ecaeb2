//! Parsers for git's textual output
//!
//! All functions here are pure: they take the stdout of one git invocation
//! and return structured records, so they can be tested without a repository.

use crate::constants::git::LOG_COMMIT_MARKER;
use crate::error::{RepoAdminError, RepoResult};
use crate::inspector::types::{BranchName, CommitRecord, CommitTimestamp, CommittedFileEntry};

/// Split `git ls-files` output into paths, dropping empty lines
pub fn parse_file_list(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize `git branch` output
///
/// Raw output looks like `"  ah-dev\n  integration\n* story_1485\n  HEAD -> origin/master"`:
/// the current branch is starred, worktree checkouts carry a `+`, and
/// symbolic refs show up as `a -> b`. Only plain branch names are kept.
pub fn parse_branch_list(raw: &str) -> Vec<BranchName> {
    raw.lines()
        .filter(|line| !line.contains("->"))
        .map(|line| line.trim().trim_start_matches(['*', '+']).trim())
        // Detached heads are listed as "(HEAD detached at ...)"
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .map(BranchName::parse)
        .collect()
}

/// Parse `git log -1 --pretty=format:%H|%ai|%s`
///
/// The message is everything after the second delimiter, so a `|` inside the
/// subject line survives.
pub fn parse_last_commit(raw: &str) -> RepoResult<CommitRecord> {
    let mut tokens = raw.trim().splitn(3, '|');

    let hash = tokens.next().unwrap_or_default();
    let date = tokens.next();
    let message = tokens.next().unwrap_or_default();

    let date = match date {
        Some(date) if !hash.is_empty() => date,
        _ => {
            return Err(RepoAdminError::malformed(
                "git log -1",
                format!("expected 'hash|date|message', got '{}'", raw),
            ));
        }
    };

    Ok(CommitRecord {
        hash: hash.to_string(),
        message: message.to_string(),
        timestamp: CommitTimestamp::from_git(date)?,
    })
}

/// One commit block of `git log --name-only`, before ordinals are assigned
#[derive(Debug, Default)]
struct LogBlock<'a> {
    hash: &'a str,
    author: Option<&'a str>,
    date: Option<&'a str>,
    summary: Vec<&'a str>,
    files: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Header,
    Summary,
    Files,
}

fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

/// A block starts at `commit <hex>` in column 0; message lines are always
/// indented, so only a file literally named like that could be mistaken for one
fn block_hash(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(LOG_COMMIT_MARKER)?;
    let hash = rest.split_whitespace().next()?;
    (hash.len() >= 7 && hash.chars().all(|c| c.is_ascii_hexdigit())).then_some(hash)
}

fn split_blocks(raw: &str) -> Vec<(&str, Vec<&str>)> {
    let mut blocks: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in raw.lines() {
        if let Some(hash) = block_hash(line) {
            blocks.push((hash, Vec::new()));
        } else if let Some((_, lines)) = blocks.last_mut() {
            lines.push(line);
        }
    }
    blocks
}

/// Scan one block in three phases: header, summary, changed files
fn parse_block<'a>(hash: &'a str, lines: &[&'a str]) -> LogBlock<'a> {
    let mut block = LogBlock {
        hash,
        ..LogBlock::default()
    };
    let mut phase = Phase::Header;
    let mut header_closed = false;

    for &line in lines {
        match phase {
            Phase::Header => {
                // "Merge:" lines of merge commits fall through untouched
                if let Some(author) = line.strip_prefix("Author:") {
                    block.author = Some(author.trim());
                } else if let Some(date) = line.strip_prefix("Date:") {
                    block.date = Some(date.trim());
                } else if is_indented(line) {
                    phase = Phase::Summary;
                    if !line.trim().is_empty() {
                        block.summary.push(line.trim());
                    }
                } else if line.is_empty() {
                    header_closed = block.date.is_some();
                } else if header_closed {
                    // Empty commit message: files follow the header directly
                    phase = Phase::Files;
                    block.files.push(line);
                }
            }
            Phase::Summary => {
                if line.is_empty() {
                    continue;
                } else if is_indented(line) {
                    if !line.trim().is_empty() {
                        block.summary.push(line.trim());
                    }
                } else {
                    phase = Phase::Files;
                    block.files.push(line);
                }
            }
            Phase::Files => {
                if !line.is_empty() {
                    block.files.push(line);
                }
            }
        }
    }

    block
}

/// Parse `git log --name-only --date=iso` into one entry per (commit, file)
///
/// git lists the newest commit first; ordinals are assigned so that the
/// oldest commit is 0. Entries are returned in ascending ordinal order.
pub fn parse_name_only_log(raw: &str) -> RepoResult<Vec<CommittedFileEntry>> {
    let blocks = split_blocks(raw);
    let count = blocks.len();
    let mut entries = Vec::new();

    for (idx, (hash, lines)) in blocks.iter().enumerate().rev() {
        let commit_ordinal = count - 1 - idx;
        let block = parse_block(hash, lines);

        let date = block.date.ok_or_else(|| {
            RepoAdminError::malformed("git log", format!("commit {} has no Date line", hash))
        })?;
        let commit_date = CommitTimestamp::from_git(date)?;
        let summary = block.summary.join("; ");
        let author = block.author.unwrap_or_default().to_string();

        let entry = |file_ordinal: usize, file_path: &str| CommittedFileEntry {
            commit_ordinal,
            commit_date,
            summary: summary.clone(),
            file_ordinal,
            file_path: file_path.to_string(),
            commit_hash: block.hash.to_string(),
            author: author.clone(),
        };

        if block.files.is_empty() {
            entries.push(entry(0, ""));
        } else {
            entries.extend(
                block
                    .files
                    .iter()
                    .enumerate()
                    .map(|(file_ordinal, file)| entry(file_ordinal, file)),
            );
        }
    }

    Ok(entries)
}
