//! Locations inside a property bag, for error reporting.

use core::fmt;

/// Path from a property to the node being decoded.
///
/// Built on the stack during recursion; only rendered when an error occurs.
#[derive(Debug, Clone, Copy)]
pub(crate) enum PropertyPath<'a> {
    Root,
    Property(&'a str),
    Key(&'a PropertyPath<'a>, &'a str),
    Index(&'a PropertyPath<'a>, usize),
}

impl<'a> PropertyPath<'a> {
    pub(crate) fn key(&'a self, key: &'a str) -> Self {
        Self::Key(self, key)
    }

    pub(crate) fn index(&'a self, index: usize) -> Self {
        Self::Index(self, index)
    }
}

impl fmt::Display for PropertyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("$"),
            Self::Property(name) => f.write_str(name),
            Self::Key(parent, key) => write!(f, "{parent}.{key}"),
            Self::Index(parent, index) => write!(f, "{parent}[{index}]"),
        }
    }
}
