//! Query parsing
//!
//! A query is a whitespace separated list of terms. A term that starts with
//! `-` and has text after the dash excludes items containing that text.

use std::fmt;

use crate::strings::StrExt;

/// A single unit of a query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm {
    negated: bool,
    text: String,
}

impl SearchTerm {
    /// Parse one raw term. Surrounding whitespace is ignored; a lone `-` is
    /// a literal positive term.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.strip_prefix('-') {
            Some(rest) if !rest.is_empty() => Self {
                negated: true,
                text: rest.to_string(),
            },
            _ => Self {
                negated: false,
                text: raw.to_string(),
            },
        }
    }

    /// True for exclusion terms
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The text to look for, without the leading dash
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Match this term against a single piece of text
    pub fn matches_text(&self, text: &str) -> bool {
        let found = text.insensitive_contains(&self.text);
        found != self.negated
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "-{}", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// A parsed query: every term must hold for an item to match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<SearchTerm>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let terms = text.split_whitespace().map(SearchTerm::parse).collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[SearchTerm] {
        &self.terms
    }

    /// An empty query matches everything
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Match every term against a single piece of text
    pub fn matches_text(&self, text: &str) -> bool {
        self.terms.iter().all(|term| term.matches_text(text))
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
