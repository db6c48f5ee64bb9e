//! Plain-text table printing
//!
//! ```text
//!  | name | quantity |
//!  |-----------------|
//!  | A B  | 125      |
//! ```
//!
//! Rows are any [`Searchable`] values; columns are the top-level fields of
//! the first present row.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::search::{FieldValue, Searchable, SHORT_DATE_FORMAT};
use crate::strings::StrExt;
use crate::{Result, SatchelError, TableConfig};

/// Fractional digits kept for decimal cells unless configured otherwise
pub const DEFAULT_DECIMAL_PLACES: u32 = 5;

/// Width of the `=` rule printed above a titled table
const TITLE_RULE_WIDTH: usize = 80;

const DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Lay out a grid of cells. The first row is the header.
pub fn render_grid(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let splitter_width = widths.iter().map(|w| w + 3).sum::<usize>().saturating_sub(1);
    let splitter = "-".repeat(splitter_width);

    let mut out = String::new();
    for (row_index, row) in rows.iter().enumerate() {
        for (index, &width) in widths.iter().enumerate() {
            let cell = row.get(index).map(String::as_str).unwrap_or("");
            out.push_str(" | ");
            out.push_str(&format!("{cell:<width$}"));
        }
        out.push_str(" | \n");

        if row_index == 0 {
            out.push_str(&format!(" |{splitter}| \n"));
        }
    }
    out
}

/// A column rendered from each row by a selector
pub type Selector<'f, T> = &'f dyn Fn(&T) -> String;

/// Render `values` with explicit headers and one selector per header
pub fn to_string_table<T>(values: &[T], headers: &[&str], selectors: &[Selector<'_, T>]) -> Result<String> {
    if headers.len() != selectors.len() {
        return Err(SatchelError::InvalidOperation(format!(
            "{} headers but {} selectors",
            headers.len(),
            selectors.len()
        )));
    }

    let mut grid = Vec::with_capacity(values.len() + 1);
    grid.push(headers.iter().map(|h| h.to_string()).collect());
    for value in values {
        grid.push(selectors.iter().map(|select| select(value)).collect());
    }
    Ok(render_grid(&grid))
}

/// Format a single cell
pub fn format_cell(value: &FieldValue<'_>, decimal_places: u32) -> String {
    match value {
        FieldValue::Null => "null".to_string(),
        FieldValue::Boolean(flag) => flag.to_string(),
        FieldValue::Text(text) => (*text).to_string(),
        FieldValue::Integer(number) => number.to_string(),
        FieldValue::Decimal(number) => format_decimal(*number, decimal_places),
        FieldValue::Float(number) => number.to_string(),
        FieldValue::Date(date) => date.format(SHORT_DATE_FORMAT).to_string(),
        FieldValue::DateTime(stamp) => stamp.format(DATETIME_FORMAT).to_string(),
        FieldValue::Nested(_) => "{..}".to_string(),
        FieldValue::List(list) => format!("List ({} items)", list.len()),
    }
}

/// Group the integer digits with commas and keep at most `places` fractional
/// digits, dropping trailing zeros.
pub fn format_decimal(value: Decimal, places: u32) -> String {
    let rounded = value
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Builder for rendering [`Searchable`] rows as a table
#[derive(Debug, Clone)]
pub struct TablePrinter {
    title: Option<String>,
    sample: Option<usize>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    decimal_places: u32,
}

impl Default for TablePrinter {
    fn default() -> Self {
        Self {
            title: None,
            sample: None,
            include: None,
            exclude: None,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &TableConfig) -> Self {
        Self {
            sample: config.sample,
            decimal_places: config.decimal_places,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render at most `count` rows
    pub fn sample(mut self, count: usize) -> Self {
        self.sample = Some(count);
        self
    }

    /// Only render these columns
    pub fn include<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Render every column except these
    pub fn exclude<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    pub fn render<T: Searchable>(&self, values: &[T]) -> Result<String> {
        if let (Some(include), Some(exclude)) = (&self.include, &self.exclude) {
            return Err(SatchelError::InvalidOperation(format!(
                "cannot have both include and exclude columns (include: {}; exclude: {})",
                include.join(", "),
                exclude.join(", ")
            )));
        }

        let total = values.len();
        let shown = &values[..self.sample.unwrap_or(total).min(total)];

        let mut out = String::new();
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_blank()) {
            out.push_str(&"=".repeat(TITLE_RULE_WIDTH));
            out.push('\n');
            let section = if shown.len() < total {
                format!(" Sampling {}/{} rows", shown.len(), total)
            } else {
                format!(" Showing all {total} rows")
            };
            out.push_str(&format!("{title} |{section}\n"));
        }

        out.push_str(&self.render_rows(shown));
        debug!(rows = shown.len(), total, "rendered table");
        Ok(out)
    }

    /// Render and write to standard output
    pub fn print<T: Searchable>(&self, values: &[T]) -> Result<()> {
        println!("{}", self.render(values)?);
        Ok(())
    }

    fn render_rows<T: Searchable>(&self, values: &[T]) -> String {
        let Some(first) = values.iter().find(|v| !v.as_field_value().is_null()) else {
            return String::new();
        };

        if !matches!(first.as_field_value(), FieldValue::Nested(_)) {
            let mut out = String::new();
            for value in values {
                out.push_str(&format_cell(&value.as_field_value(), self.decimal_places));
                out.push('\n');
            }
            return out;
        }

        let columns: Vec<String> = first
            .fields()
            .iter()
            .map(|field| field.name.to_string())
            .filter(|name| self.keeps_column(name))
            .collect();

        let mut grid = Vec::with_capacity(values.len() + 1);
        grid.push(columns.clone());
        for value in values {
            let fields = value.fields();
            let row = columns
                .iter()
                .map(|column| {
                    fields
                        .iter()
                        .find(|field| field.name == column)
                        .map(|field| format_cell(&field.value, self.decimal_places))
                        .unwrap_or_else(|| "null".to_string())
                })
                .collect();
            grid.push(row);
        }
        render_grid(&grid)
    }

    fn keeps_column(&self, name: &str) -> bool {
        if let Some(include) = &self.include {
            return include.iter().any(|column| column == name);
        }
        if let Some(exclude) = &self.exclude {
            return !exclude.iter().any(|column| column == name);
        }
        true
    }
}
