//! Plain text and JSON rendering of a domain's views

use std::fmt::Write;

use serde::Serialize;

use agri_core::{Domain, FilterOptions, FilterSelection};
use agri_views::{Dashboard, KeyInsight, SummaryTable, ViewError};

/// Everything shown for one domain
#[derive(Debug, Clone, Serialize)]
pub struct DomainReport {
    pub domain: Domain,
    pub records: usize,
    pub selection: FilterSelection,
    pub options: FilterOptions,
    pub insights: Vec<KeyInsight>,
    pub tables: Vec<SummaryTable>,
}

impl DomainReport {
    pub fn build(dashboard: &Dashboard, domain: Domain) -> Result<Self, ViewError> {
        Ok(Self {
            domain,
            records: dashboard.filtered_len(domain)?,
            selection: dashboard.selection(domain),
            options: dashboard.options(domain),
            insights: dashboard.insights(domain)?,
            tables: dashboard.tables(domain)?,
        })
    }

    /// Text report showing page `page` of every table
    pub fn render_text(&self, page: usize, page_size: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ({} records) ==", self.domain.title(), self.records);
        let _ = writeln!(
            out,
            "County: {} | Subcounty: {} | Ward: {}",
            self.selection.region, self.selection.subregion, self.selection.locality
        );
        let _ = writeln!(out, "  counties:    {}", self.options.regions.join(", "));
        let _ = writeln!(out, "  subcounties: {}", self.options.subregions.join(", "));
        let _ = writeln!(out, "  wards:       {}", self.options.localities.join(", "));
        out.push('\n');

        let _ = writeln!(out, "Key Insights");
        for insight in &self.insights {
            let _ = writeln!(out, "  - {}: {}", insight.label, insight.value);
        }

        for table in &self.tables {
            out.push('\n');
            render_table(&mut out, table, page, page_size);
        }
        out
    }
}

fn render_table(out: &mut String, table: &SummaryTable, page: usize, page_size: usize) {
    let pages = table.page_count(page_size);
    let _ = writeln!(out, "{} (page {} of {})", table.title, page + 1, pages.max(1));

    let rows = table.page(page, page_size);
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "  {}", line(&table.headers));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "  {}", line(&rule));
    if rows.is_empty() {
        let _ = writeln!(out, "  (no records)");
    }
    for row in rows {
        let _ = writeln!(out, "  {}", line(row));
    }
}
