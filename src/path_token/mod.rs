//! OData path-segment tokens
//!
//! A path is a singly-linked chain of segments, root first. Two kinds exist:
//!
//! - **System** segments are reserved query identifiers such as the implicit
//!   range variable `$it`. They are terminal and are never extended, trimmed
//!   or rendered.
//! - **Non-system** segments name a real member. The structural flag decides
//!   whether the member renders under `$select` (primitive or complex) or
//!   under `$expand` (navigation).
//!
//! Chains are plain owned values. The three passes (`append_ending`,
//! `trim_wildcard`, `stringify`) consume or borrow a chain and hand back a new
//! one, so two owners of the "same" path never observe each other's edits.

mod append_ending;
mod errors;
mod stringify;
mod trim_wildcard;

pub use errors::{PathTokenError, SegmentOperation};

/// Marker for "all members" at the end of a select path.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    System(SystemToken),
    NonSystem(NonSystemToken),
}

/// A reserved query identifier, e.g. `$it`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemToken {
    pub keyword: String,
}

/// An ordinary member segment with an optional successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonSystemToken {
    pub name: String,
    /// `true` for primitive/complex members, `false` for navigations.
    pub is_structural_property: bool,
    pub next: Option<Box<PathSegment>>,
}

impl PathSegment {
    pub fn system(keyword: impl Into<String>) -> Self {
        PathSegment::System(SystemToken {
            keyword: keyword.into(),
        })
    }

    pub fn non_system(name: impl Into<String>, is_structural_property: bool) -> Self {
        PathSegment::NonSystem(NonSystemToken {
            name: name.into(),
            is_structural_property,
            next: None,
        })
    }

    /// Build a chain from `(name, is_structural)` steps, root first.
    ///
    /// Returns `None` for an empty step list.
    pub fn from_steps<I, S>(steps: I) -> Option<Self>
    where
        I: IntoIterator<Item = (S, bool)>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        steps
            .into_iter()
            .rev()
            .fold(None, |next, (name, is_structural_property)| {
                Some(PathSegment::NonSystem(NonSystemToken {
                    name: name.into(),
                    is_structural_property,
                    next: next.map(Box::new),
                }))
            })
    }

    /// Name of this segment: the member name, or the keyword for system segments.
    pub fn identifier(&self) -> &str {
        match self {
            PathSegment::System(token) => &token.keyword,
            PathSegment::NonSystem(token) => &token.name,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, PathSegment::System(_))
    }

    pub fn next(&self) -> Option<&PathSegment> {
        match self {
            PathSegment::System(_) => None,
            PathSegment::NonSystem(token) => token.next.as_deref(),
        }
    }

    /// Iterate the chain from this segment to its terminal.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            current: Some(self),
        }
    }

    /// Number of segments in the chain starting here.
    pub fn len(&self) -> usize {
        self.segments().count()
    }

    /// A chain always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The last segment of the chain.
    pub fn terminal(&self) -> &PathSegment {
        let mut current = self;
        while let Some(next) = current.next() {
            current = next;
        }
        current
    }
}

pub struct Segments<'a> {
    current: Option<&'a PathSegment>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a PathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.next();
        Some(current)
    }
}
