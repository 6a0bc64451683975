//! Lexical request-path normalization.
//!
//! Client tooling regularly produces paths like `//v1/chat/completions` when a
//! configured base URL ends in `/`. [`normalize_path`] cleans these up while
//! keeping the trailing-slash semantics routers rely on.

use std::fmt;
use std::ops::Deref;

/// A request path that starts with `/`, has no repeated `/`, and keeps a
/// trailing `/` only if the raw input had one and the result is not the root.
///
/// Only produced by [`normalize_path`] (and suffixes of it taken by endpoint
/// extraction, which keep the same invariants).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub(crate) fn from_normalized(path: String) -> Self {
        debug_assert!(path.starts_with('/'));
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedPath {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NormalizedPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<NormalizedPath> for String {
    fn from(path: NormalizedPath) -> Self {
        path.0
    }
}

/// Normalize a raw request path.
///
/// Collapses repeated separators and resolves `.`/`..` lexically, then
/// re-appends one trailing `/` when the raw path had one (and was longer than
/// one byte) unless the cleaned result is the root.
///
/// # Examples
///
/// ```
/// use llm_relay_core::routing::normalize_path;
///
/// assert_eq!(normalize_path("///v1///chat//completions"), "/v1/chat/completions");
/// assert_eq!(normalize_path("/v1/models/"), "/v1/models/");
/// assert_eq!(normalize_path("/"), "/");
/// ```
pub fn normalize_path(path: &str) -> NormalizedPath {
    let has_trailing_slash = path.len() > 1 && path.ends_with('/');

    let mut cleaned = clean_rooted(path);
    if has_trailing_slash && cleaned != "/" {
        cleaned.push('/');
    }

    NormalizedPath(cleaned)
}

/// Lexically clean `path` as if it were rooted at `/`.
///
/// `..` above the root is dropped, so the result always starts with `/`.
fn clean_rooted(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut cleaned = String::with_capacity(path.len() + 1);
    if segments.is_empty() {
        cleaned.push('/');
        return cleaned;
    }
    for segment in segments {
        cleaned.push('/');
        cleaned.push_str(segment);
    }
    cleaned
}
