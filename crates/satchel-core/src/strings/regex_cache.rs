//! Compiled regex cache
//!
//! Patterns are compiled once per process and shared between threads. Two
//! threads racing on the same new pattern may both compile it; either result
//! is kept.

use std::sync::OnceLock;

use dashmap::DashMap;
use regex::Regex;
use tracing::debug;

use crate::Result;

/// Concurrent map from pattern text to its compiled regex
#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: DashMap<String, Regex>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache
    pub fn global() -> &'static RegexCache {
        static GLOBAL: OnceLock<RegexCache> = OnceLock::new();
        GLOBAL.get_or_init(RegexCache::new)
    }

    /// Compiled regex for `pattern`, compiling it on first use
    pub fn get(&self, pattern: &str) -> Result<Regex> {
        if let Some(regex) = self.compiled.get(pattern) {
            return Ok(regex.clone());
        }

        let regex = Regex::new(pattern)?;
        debug!(pattern, "compiled regex");
        let entry = self
            .compiled
            .entry(pattern.to_string())
            .or_insert(regex);
        Ok(entry.clone())
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

/// Value of the named group `group` when `pattern` matches `input`
pub fn captures_named(input: &str, pattern: &str, group: &str) -> Result<Option<String>> {
    let regex = RegexCache::global().get(pattern)?;
    let value = regex
        .captures(input)
        .and_then(|captures| captures.name(group))
        .map(|found| found.as_str().to_string());
    Ok(value)
}

/// Non-blank values of the named group `group` across `inputs`
pub fn match_regex<I, S>(inputs: I, pattern: &str, group: &str) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let regex = RegexCache::global().get(pattern)?;
    let values = inputs
        .into_iter()
        .filter_map(|input| {
            regex
                .captures(input.as_ref())
                .and_then(|captures| captures.name(group))
                .map(|found| found.as_str().to_string())
        })
        .filter(|value| !value.trim().is_empty())
        .collect();
    Ok(values)
}
