//! Dot-delimited field paths.
//!
//! A field path addresses a leaf or branch inside a form value tree, e.g.
//! `address.geo.lat`. The first segment names the top-level field that owns
//! the addressed node; touched and error bookkeeping is keyed by that owner.

use std::fmt;

/// Addresses a leaf or branch inside a form value tree.
///
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Return a new path parsed from a dot-delimited string.
    ///
    /// # Panics
    /// Panics if the string is empty or contains an empty segment (e.g.
    /// `"address..city"`). Paths are written by hand in field specs, so a
    /// malformed one is a programming error rather than a runtime condition.
    pub fn new(path: &str) -> FieldPath {
        assert!(!path.is_empty(), "field path must not be empty");
        let segments: Vec<String> = path.split('.').map(str::to_owned).collect();
        assert!(
            segments.iter().all(|segment| !segment.is_empty()),
            "field path '{}' contains an empty segment",
            path
        );
        FieldPath { segments }
    }

    /// Return the top-level field that owns the addressed node.
    ///
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Return an iterator over the path segments in order.
    ///
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Return the number of segments.
    ///
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Return true for a single-segment path.
    ///
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> FieldPath {
        FieldPath::new(path)
    }
}
