//! Fully qualified names.
//!
//! An `FqName` is a dot-separated sequence of segments. The empty string is the
//! root name (the root package, or an empty declaration path). Segments are
//! never empty and never contain `.`; special names such as `<init>` or
//! `<get-value>` are ordinary segments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dot-separated fully qualified name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FqName(String);

impl FqName {
    /// The root name (no segments).
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Parse a dotted name. Empty input yields the root name.
    pub fn new(dotted: impl Into<String>) -> Self {
        Self(dotted.into())
    }

    /// Build a name from its segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for segment in segments {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(segment.as_ref());
        }
        Self(out)
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the segments. The root name has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next()
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Append a segment, returning the child name.
    pub fn child(&self, segment: &str) -> Self {
        if self.is_root() {
            Self(segment.to_string())
        } else {
            Self(format!("{}.{}", self.0, segment))
        }
    }

    /// Drop the last segment. The parent of a single-segment name is root;
    /// the root name has no parent.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind('.') {
            Some(dot) => Self(self.0[..dot].to_string()),
            None => Self::root(),
        })
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FqName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FqName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[path = "../tests/fq_name_tests.rs"]
mod tests;
