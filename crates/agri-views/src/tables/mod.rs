//! Tabular form of the summaries for display and export

mod summaries;

use std::cmp::Ordering;
use std::io;

use serde::{Deserialize, Serialize};

use crate::stats::CategoryCount;
use crate::ViewError;

/// Rows shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A titled grid of display-ready cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SummaryTable {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Two-column table of label counts
    pub fn from_counts(title: impl Into<String>, label: &str, value: &str, counts: &[CategoryCount]) -> Self {
        let mut table = Self::new(title, &[label, value]);
        table.rows = counts
            .iter()
            .map(|c| vec![c.label.clone(), c.count.to_string()])
            .collect();
        table
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(column))
    }

    /// Sort rows by a column; numeric cells compare as numbers, ties keep their order
    pub fn sort_by(&mut self, column: &str, direction: SortDirection) -> Result<(), ViewError> {
        let index = self
            .column_index(column)
            .ok_or_else(|| ViewError::UnknownColumn(column.to_string()))?;

        self.rows.sort_by(|a, b| {
            let ordering = compare_cells(
                a.get(index).map(String::as_str).unwrap_or_default(),
                b.get(index).map(String::as_str).unwrap_or_default(),
            );
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        Ok(())
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.rows.len().div_ceil(page_size)
    }

    /// Rows of the zero-based page `index`; empty past the last page
    pub fn page(&self, index: usize, page_size: usize) -> &[Vec<String>] {
        let start = index.saturating_mul(page_size).min(self.rows.len());
        let end = start.saturating_add(page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    /// File name used when exporting, e.g. `crops-summary-table.csv`
    pub fn export_file_name(&self) -> String {
        let slug = self
            .title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("{}.csv", slug)
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ViewError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().replace(',', "").parse::<f64>().ok()
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.cmp(b),
    }
}
