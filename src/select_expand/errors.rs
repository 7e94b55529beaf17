use thiserror::Error;

use crate::path_token::PathTokenError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SelectExpandError {
    #[error(transparent)]
    PathToken(#[from] PathTokenError),

    #[error("Type segment `{type_name}` requested for `{member}` after the start of the chain (casts are only valid as the first segment)")]
    TypeSegmentMidChain { type_name: String, member: String },

    #[error("Cannot traverse `{member}` through structural property `{through}` (only navigations can be expanded)")]
    StructuralTraversal { member: String, through: String },

    #[error("Path `{path}` has {depth} segments, exceeding the configured maximum of {max}")]
    ExpandDepthExceeded { path: String, depth: usize, max: usize },

    #[error("Unknown property `{property}` on type `{type_name}`")]
    UnknownProperty { type_name: String, property: String },

    #[error("Empty segment in path `{0}`")]
    EmptySegment(String),
}
