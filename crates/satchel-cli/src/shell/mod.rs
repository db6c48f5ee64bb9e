//! Interactive query shell
//!
//! Each input line is a query over the loaded records; the matches are
//! printed as a table. Dot-commands inspect the dataset and move a selection
//! through the current matches.

use std::time::Instant;

use anyhow::Result;
use satchel_core::{smart_combine, ObjectTextSearcher, SatchelConfig, Searchable, SearchableSelection, TablePrinter};
use serde_json::Value;
use tracing::debug;

pub mod commands;
pub mod notifier;

pub use commands::ShellCommand;
pub use notifier::{DefaultNotifier, ShellNotifier};

/// Interactive shell over a set of JSON records
pub struct Shell {
    /// Records narrowed by the current query
    selection: SearchableSelection<Value>,
    config: SatchelConfig,
    /// Row limit for rendered tables
    sample: Option<usize>,
    notifier: Box<dyn ShellNotifier>,
    running: bool,
    queries: usize,
}

impl Shell {
    pub fn new(records: Vec<Value>, config: SatchelConfig) -> Self {
        let searcher = ObjectTextSearcher::with_config(&config.search);
        let selection = SearchableSelection::with_searcher(records, searcher);
        selection
            .model()
            .subscribe(|change| debug!(?change, "selection changed"));

        Self {
            selection,
            sample: config.table.sample,
            config,
            notifier: Box::new(DefaultNotifier::new()),
            running: true,
            queries: 0,
        }
    }

    /// Set the notifier for this shell
    pub fn set_notifier(&mut self, notifier: Box<dyn ShellNotifier>) {
        self.notifier = notifier;
    }

    pub fn notifier(&self) -> &dyn ShellNotifier {
        self.notifier.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of records matching the current query
    pub fn matched(&self) -> usize {
        self.selection.model().len()
    }

    pub fn total(&self) -> usize {
        self.selection.source_len()
    }

    /// Parse shell input into a command
    pub fn parse_input(&self, input: &str) -> Result<ShellCommand> {
        commands::parse_command(input)
    }

    /// Run a query. Returns the rendered table, the match count and the
    /// elapsed milliseconds.
    pub fn execute(&mut self, query: &str) -> Result<(String, usize, u64)> {
        let start = Instant::now();
        self.selection.set_query(query);
        self.queries += 1;

        let matches = self.selection.model().items();
        let table = self.printer().render(&matches)?;
        Ok((table, matches.len(), start.elapsed().as_millis() as u64))
    }

    /// Handle a shell command
    pub fn handle_command(&mut self, command: ShellCommand) -> Result<String> {
        match command {
            ShellCommand::Help => Ok(help_text()),
            ShellCommand::Quit => {
                self.running = false;
                Ok("Goodbye!".to_string())
            }
            ShellCommand::Count => Ok(format!(
                "{} of {} records match '{}'",
                self.matched(),
                self.total(),
                self.selection.query()
            )),
            ShellCommand::Columns => {
                let columns = self.columns();
                if columns.is_empty() {
                    Ok("No columns".to_string())
                } else {
                    Ok(smart_combine(", ", &columns))
                }
            }
            ShellCommand::Sample(sample) => {
                self.sample = sample;
                Ok(match sample {
                    Some(rows) => format!("Sample: {rows} rows"),
                    None => "Sample: all rows".to_string(),
                })
            }
            ShellCommand::Reset => {
                self.selection.set_query("");
                Ok(format!("Query cleared, {} records", self.matched()))
            }
            ShellCommand::Next => self.describe_selection(self.selection.model().select_next()),
            ShellCommand::Previous => self.describe_selection(self.selection.model().select_previous()),
        }
    }

    /// Field names of the first record among the current matches
    pub fn columns(&self) -> Vec<String> {
        self.selection
            .model()
            .items()
            .iter()
            .find(|record| record.is_object())
            .map(|record| {
                record
                    .fields()
                    .iter()
                    .map(|field| field.name.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn show_exit_stats(&self) {
        self.notifier.on_output(&format!(
            "Ran {} queries over {} records",
            self.queries,
            self.total()
        ));
    }

    fn printer(&self) -> TablePrinter {
        let printer = TablePrinter::new().decimal_places(self.config.table.decimal_places);
        match self.sample {
            Some(rows) => printer.sample(rows),
            None => printer,
        }
    }

    fn describe_selection(&self, selected: Option<Value>) -> Result<String> {
        let Some(record) = selected else {
            return Ok("No matches to select".to_string());
        };
        let position = self.selection.model().selected_index().map_or(0, |index| index + 1);
        Ok(format!(
            "[{position}/{}]\n{}",
            self.matched(),
            serde_json::to_string_pretty(&record)?
        ))
    }
}

fn help_text() -> String {
    r#"Satchel shell

Type a query to list matching records. Terms are matched case-insensitively
against every field, nested records included. Prefix a term with '-' to
exclude records containing it.

Commands:
  .help, .h          Show this help
  .quit, .q, .exit   Exit the shell
  .count             Show how many records match
  .columns           List the columns of the current matches
  .sample <n|all>    Limit the rows printed per query
  .reset             Clear the current query
  .next, .n          Select the next match
  .prev, .p          Select the previous match"#
        .to_string()
}
