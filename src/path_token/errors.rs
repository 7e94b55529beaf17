use std::fmt;

use thiserror::Error;

/// The path-token pass that was attempted on a reserved segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentOperation {
    AppendEnding,
    TrimWildcard,
    Stringify,
}

impl fmt::Display for SegmentOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentOperation::AppendEnding => write!(f, "append a segment to"),
            SegmentOperation::TrimWildcard => write!(f, "trim a wildcard from"),
            SegmentOperation::Stringify => write!(f, "render"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PathTokenError {
    #[error("Cannot {operation} system segment `{keyword}` (reserved segments are terminal)")]
    IllegalSystemSegmentOperation {
        keyword: String,
        operation: SegmentOperation,
    },
}

impl PathTokenError {
    pub(crate) fn illegal_system(keyword: impl Into<String>, operation: SegmentOperation) -> Self {
        PathTokenError::IllegalSystemSegmentOperation {
            keyword: keyword.into(),
            operation,
        }
    }

    /// The reserved keyword named by this error.
    pub fn keyword(&self) -> &str {
        match self {
            PathTokenError::IllegalSystemSegmentOperation { keyword, .. } => keyword,
        }
    }
}
