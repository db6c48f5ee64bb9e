//! One-shot rendering for the `search` and `table` subcommands

use anyhow::Result;
use satchel_core::{ObjectTextSearcher, SatchelConfig, TableConfig, TablePrinter};
use serde_json::Value;
use tracing::info;

/// Column and row options for the `table` subcommand
#[derive(Debug, Clone, Default)]
pub struct TableRequest {
    pub title: Option<String>,
    pub sample: Option<usize>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl TableRequest {
    fn printer(&self, config: &TableConfig) -> TablePrinter {
        let mut printer = TablePrinter::with_config(config);
        if let Some(title) = &self.title {
            printer = printer.title(title.clone());
        }
        if let Some(sample) = self.sample {
            printer = printer.sample(sample);
        }
        if !self.include.is_empty() {
            printer = printer.include(self.include.iter().cloned());
        }
        if !self.exclude.is_empty() {
            printer = printer.exclude(self.exclude.iter().cloned());
        }
        printer
    }
}

/// Render the records matching `query` as a table
pub fn search_report(records: &[Value], query: &str, config: &SatchelConfig) -> Result<String> {
    let searcher = ObjectTextSearcher::with_config(&config.search);
    let matches = searcher.find_matches(records, query).to_vec();
    info!(query, matched = matches.len(), total = records.len(), "search finished");

    let printer = TablePrinter::with_config(&config.table)
        .title(format!("Matches for '{}'", matches_title(query)));
    Ok(printer.render(&matches)?)
}

/// Render records as a table with the requested options
pub fn table_report(records: &[Value], request: &TableRequest, config: &TableConfig) -> Result<String> {
    Ok(request.printer(config).render(records)?)
}

fn matches_title(query: &str) -> &str {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        "*"
    } else {
        trimmed
    }
}
