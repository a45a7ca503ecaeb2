//! Tabular reports and where they go

use crate::constants::report::{DEV_OPS_REPORTS_FOLDER, OPERATOR_REPORTS, REPORT_REPO_STATS};
use crate::utils::filesystem::ensure_directory_exists;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A named grid of cells, one report sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// All cells of `column`, top to bottom
    pub fn column(&self, column: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or_default())
                .collect(),
        )
    }

    /// Overwrite every cell of the given columns with `value`
    pub fn fill_columns(&mut self, columns: &[&str], value: &str) {
        let indices: Vec<usize> = columns
            .iter()
            .filter_map(|column| self.column_index(column))
            .collect();
        for row in &mut self.rows {
            for &idx in &indices {
                if let Some(cell) = row.get_mut(idx) {
                    *cell = value.to_string();
                }
            }
        }
    }
}

/// Destination for report tables
pub trait ReportSink: Send {
    fn add_table(&mut self, table: Table);
}

impl ReportSink for Vec<Table> {
    fn add_table(&mut self, table: Table) {
        self.push(table);
    }
}

/// Collects tables and writes them as one JSON document
///
/// The file lives at `<publications>/Operator Reports/DevOps/Repo Stats.json`.
#[derive(Debug)]
pub struct JsonReportWriter {
    path: PathBuf,
    tables: Vec<Table>,
}

impl JsonReportWriter {
    pub fn in_publications(publications_folder: impl AsRef<Path>) -> Self {
        let path = publications_folder
            .as_ref()
            .join(OPERATOR_REPORTS)
            .join(DEV_OPS_REPORTS_FOLDER)
            .join(format!("{}.json", REPORT_REPO_STATS));
        Self {
            path,
            tables: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Write the collected tables, creating the report folders as needed
    pub fn save(&self) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent() {
            ensure_directory_exists(parent)
                .with_context(|| format!("Failed to create report folder {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.tables)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write report {}", self.path.display()))?;
        Ok(self.path.clone())
    }
}

impl ReportSink for JsonReportWriter {
    fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }
}

/// Prints each table as soon as it arrives
#[derive(Debug, Default)]
pub struct ConsoleReport;

impl ConsoleReport {
    fn render(table: &Table) -> String {
        let widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let mut out = String::new();
        out.push_str(&format!("{}\n", table.name.bold()));
        out.push_str(&format!("{}\n", line(&table.columns).cyan()));
        for row in &table.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }
}

impl ReportSink for ConsoleReport {
    fn add_table(&mut self, table: Table) {
        println!("{}", Self::render(&table));
    }
}
