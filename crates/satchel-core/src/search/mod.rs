//! Text search over object graphs
//!
//! Finds the items of a collection whose fields contain every term of a
//! query. The searcher walks records, nested records and collections through
//! the [`Searchable`] capability, stopping at a fixed depth so deep or
//! self-referencing graphs always terminate.
//!
//! Matching rules:
//! - terms are separated by whitespace and all of them must match
//! - a positive term matches when some field, case-insensitively, contains it
//! - a `-term` matches when no field contains `term`
//! - text, integers, decimals, floats and dates are compared by their text;
//!   dates use the `MM/dd/yyyy` short form
//! - a null item never matches a non-empty query

pub mod term;
pub mod value;

use tracing::trace;

use crate::strings::StrExt;
use crate::SearchConfig;

pub use term::{Query, SearchTerm};
pub use value::{Elements, Field, FieldValue, Searchable, SearchableList, SHORT_DATE_FORMAT};

/// Nesting levels below the root item that are still searched
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Depth-bounded text searcher
#[derive(Debug, Clone, Copy)]
pub struct ObjectTextSearcher {
    max_depth: usize,
}

impl Default for ObjectTextSearcher {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ObjectTextSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &SearchConfig) -> Self {
        Self {
            max_depth: config.max_depth,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Lazily select the items matching `query`. Each pass over the result
    /// scans the items again.
    pub fn find_matches<'a, T: Searchable>(&self, items: &'a [T], query: &str) -> Matches<'a, T> {
        Matches {
            items,
            query: Query::parse(query),
            searcher: *self,
        }
    }

    /// Filter any iterator of item references with an already parsed query
    pub fn filter<'q, 'i: 'q, I, T>(&'q self, items: I, query: &'q Query) -> impl Iterator<Item = &'i T> + 'q
    where
        I: IntoIterator<Item = &'i T>,
        I::IntoIter: 'q,
        T: Searchable + ?Sized + 'i,
    {
        items
            .into_iter()
            .filter(move |item| self.matches(*item, query))
    }

    /// Check a single item against a raw query string
    pub fn search<T: Searchable + ?Sized>(&self, item: &T, query: &str) -> bool {
        self.matches(item, &Query::parse(query))
    }

    /// Check a single item against a parsed query
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T, query: &Query) -> bool {
        if query.is_empty() {
            return true;
        }

        let root = item.as_field_value();
        if root.is_null() {
            return false;
        }

        query.terms().iter().all(|term| {
            let found = self.node_contains(root, term.text(), 0);
            trace!(term = %term, found, "evaluated search term");
            found != term.is_negated()
        })
    }

    /// A node is a root item, a list element or a nested record, sitting at `depth`
    fn node_contains(&self, node: FieldValue<'_>, needle: &str, depth: usize) -> bool {
        if depth > self.max_depth {
            return false;
        }

        match node {
            FieldValue::Nested(record) => record
                .fields()
                .into_iter()
                .any(|field| self.field_contains(field.value, needle, depth)),
            FieldValue::List(list) => list
                .elements()
                .any(|element| self.node_contains(element.as_field_value(), needle, depth + 1)),
            scalar => scalar_contains(&scalar, needle),
        }
    }

    /// A field belongs to a record at `depth`; records and lists below it sit one level deeper
    fn field_contains(&self, value: FieldValue<'_>, needle: &str, depth: usize) -> bool {
        match value {
            FieldValue::Nested(_) => self.node_contains(value, needle, depth + 1),
            FieldValue::List(list) => {
                if depth + 1 > self.max_depth {
                    return false;
                }
                list.elements()
                    .any(|element| self.node_contains(element.as_field_value(), needle, depth + 1))
            }
            scalar => scalar_contains(&scalar, needle),
        }
    }
}

fn scalar_contains(value: &FieldValue<'_>, needle: &str) -> bool {
    match value {
        FieldValue::Text(text) => text.insensitive_contains(needle),
        other => other
            .render()
            .is_some_and(|text| text.insensitive_contains(needle)),
    }
}

/// Lazily evaluated search result. Iterating rescans the source items.
#[derive(Debug, Clone)]
pub struct Matches<'a, T> {
    items: &'a [T],
    query: Query,
    searcher: ObjectTextSearcher,
}

impl<'a, T: Searchable> Matches<'a, T> {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn iter(&self) -> MatchesIter<'_, 'a, T> {
        MatchesIter {
            inner: self.items.iter(),
            query: &self.query,
            searcher: &self.searcher,
        }
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<&'a T> {
        self.iter().collect()
    }
}

impl<'m, 'a, T: Searchable> IntoIterator for &'m Matches<'a, T> {
    type Item = &'a T;
    type IntoIter = MatchesIter<'m, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over one pass of a [`Matches`]
pub struct MatchesIter<'m, 'a, T> {
    inner: std::slice::Iter<'a, T>,
    query: &'m Query,
    searcher: &'m ObjectTextSearcher,
}

impl<'m, 'a, T: Searchable> Iterator for MatchesIter<'m, 'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let query = self.query;
        let searcher = self.searcher;
        self.inner.by_ref().find(|item| searcher.matches(*item, query))
    }
}

/// Select the items matching `query` with the default depth bound
pub fn find_matches<'a, T: Searchable>(items: &'a [T], query: &str) -> Matches<'a, T> {
    ObjectTextSearcher::default().find_matches(items, query)
}

/// Check one item against `query` with the default depth bound
pub fn search<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    ObjectTextSearcher::default().search(item, query)
}
