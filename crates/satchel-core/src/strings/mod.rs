//! String helpers

pub mod regex_cache;

use crate::{Result, SatchelError};

pub use regex_cache::{captures_named, match_regex, RegexCache};

/// Separators used by [`StrExt::split_on_default`]
const DEFAULT_SPLIT_CHARS: [char; 4] = [',', '\r', '\n', '|'];

/// Extension methods for string slices
pub trait StrExt {
    /// `self` followed by a newline and `next`
    fn append_line(&self, next: &str) -> String;

    /// `self`, or `other` when `self` is blank
    fn value_or<'a>(&'a self, other: &'a str) -> &'a str;

    /// Wraps in `[` `]`
    fn bracketize(&self) -> String;

    /// Wraps in `{` `}`
    fn bracify(&self) -> String;

    /// Wraps in `(` `)`
    fn parenthesize(&self) -> String;

    fn insensitive_equals(&self, other: &str) -> bool;

    /// Case-insensitive substring test
    fn insensitive_contains(&self, part: &str) -> bool;

    fn starts_with_insensitive(&self, prefix: &str) -> bool;

    /// Removes carriage returns, line feeds and tabs
    fn remove_all_whitespace(&self) -> String;

    /// Drops the first `count` characters; fails when `count` exceeds the length
    fn remove_left(&self, count: usize) -> Result<&str>;

    /// At most the first `count` characters
    fn left(&self, count: usize) -> &str;

    /// At most the last `count` characters
    fn right(&self, count: usize) -> &str;

    /// Escapes backslashes and double quotes
    fn escape_string(&self) -> String;

    /// Lowercases the first character
    fn to_camel_case(&self) -> String;

    /// `a.b.c` becomes `a/b/c`
    fn namespace_to_path(&self) -> String;

    fn contains_any<S: AsRef<str>>(&self, parts: &[S]) -> bool;

    /// Replaces line breaks with their escaped spelling
    fn to_single_line(&self) -> String;

    /// Splits on commas, line breaks and pipes, trimming and dropping empty pieces
    fn split_on_default(&self) -> Vec<&str>;

    /// Splits on any of `separators`, trimming and dropping empty pieces
    fn split_on(&self, separators: &[char]) -> Vec<&str>;

    /// Empty or whitespace only
    fn is_blank(&self) -> bool;
}

impl StrExt for str {
    fn append_line(&self, next: &str) -> String {
        format!("{self}\n{next}")
    }

    fn value_or<'a>(&'a self, other: &'a str) -> &'a str {
        if self.is_blank() {
            other
        } else {
            self
        }
    }

    fn bracketize(&self) -> String {
        format!("[{self}]")
    }

    fn bracify(&self) -> String {
        format!("{{{self}}}")
    }

    fn parenthesize(&self) -> String {
        format!("({self})")
    }

    fn insensitive_equals(&self, other: &str) -> bool {
        self.to_lowercase() == other.to_lowercase()
    }

    fn insensitive_contains(&self, part: &str) -> bool {
        if part.is_empty() {
            return true;
        }
        self.to_lowercase().contains(&part.to_lowercase())
    }

    fn starts_with_insensitive(&self, prefix: &str) -> bool {
        self.to_lowercase().starts_with(&prefix.to_lowercase())
    }

    fn remove_all_whitespace(&self) -> String {
        self.chars()
            .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
            .collect()
    }

    fn remove_left(&self, count: usize) -> Result<&str> {
        let length = self.chars().count();
        if count > length {
            return Err(SatchelError::out_of_range("characters to remove", count, length));
        }
        let start = self
            .char_indices()
            .nth(count)
            .map(|(index, _)| index)
            .unwrap_or(self.len());
        Ok(&self[start..])
    }

    fn left(&self, count: usize) -> &str {
        match self.char_indices().nth(count) {
            Some((index, _)) => &self[..index],
            None => self,
        }
    }

    fn right(&self, count: usize) -> &str {
        let length = self.chars().count();
        if count >= length {
            return self;
        }
        match self.char_indices().nth(length - count) {
            Some((index, _)) => &self[index..],
            None => "",
        }
    }

    fn escape_string(&self) -> String {
        self.replace('\\', "\\\\").replace('"', "\\\"")
    }

    fn to_camel_case(&self) -> String {
        let mut chars = self.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn namespace_to_path(&self) -> String {
        self.replace('.', "/")
    }

    fn contains_any<S: AsRef<str>>(&self, parts: &[S]) -> bool {
        parts.iter().any(|part| self.contains(part.as_ref()))
    }

    fn to_single_line(&self) -> String {
        self.replace("\r\n", "\\r\\n")
            .replace('\r', "\\r")
            .replace('\n', "\\n")
    }

    fn split_on_default(&self) -> Vec<&str> {
        self.split_on(&DEFAULT_SPLIT_CHARS)
    }

    fn split_on(&self, separators: &[char]) -> Vec<&str> {
        self.split(|c: char| separators.contains(&c))
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

/// Join `pieces` with `separator` without doubling separators that a piece
/// already ends or starts with.
pub fn smart_combine<S: AsRef<str>>(separator: &str, pieces: &[S]) -> String {
    let mut combined = String::new();
    let mut trailing_separator = false;

    for (i, piece) in pieces.iter().enumerate() {
        let piece = piece.as_ref();
        if i == 0 {
            combined.push_str(piece);
        } else {
            let leading_separator = !separator.is_empty() && piece.starts_with(separator);
            match (trailing_separator, leading_separator) {
                (true, true) => combined.push_str(&piece[separator.len()..]),
                (true, false) | (false, true) => combined.push_str(piece),
                (false, false) => {
                    combined.push_str(separator);
                    combined.push_str(piece);
                }
            }
        }
        trailing_separator = !separator.is_empty() && piece.ends_with(separator);
    }

    combined
}
