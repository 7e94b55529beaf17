//! Crate-level error for a whole translation call.
//!
//! Every module error converts into `TranslationError`, so callers of
//! `Translator::translate` handle a single type. Translation is
//! all-or-nothing: no partial query text is returned alongside an error.

use thiserror::Error;

use crate::aggregation::AggregationError;
use crate::edm::EdmError;
use crate::path_token::PathTokenError;
use crate::select_expand::SelectExpandError;
use crate::uri_composer::ComposeError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslationError {
    #[error(transparent)]
    PathToken(#[from] PathTokenError),

    #[error(transparent)]
    SelectExpand(#[from] SelectExpandError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Edm(#[from] EdmError),

    #[error("Unknown entity type `{0}`")]
    UnknownEntityType(String),

    #[error("Cast to unknown type `{type_name}` on member `{member}`")]
    UnknownCastType { type_name: String, member: String },
}

impl TranslationError {
    /// The aggregation error behind this failure, however it was wrapped.
    pub fn as_aggregation(&self) -> Option<&AggregationError> {
        match self {
            TranslationError::Aggregation(e) => Some(e),
            TranslationError::Compose(ComposeError::Aggregation(e)) => Some(e),
            _ => None,
        }
    }

    /// The path-token error behind this failure, however it was wrapped.
    pub fn as_path_token(&self) -> Option<&PathTokenError> {
        match self {
            TranslationError::PathToken(e) => Some(e),
            TranslationError::SelectExpand(SelectExpandError::PathToken(e)) => Some(e),
            _ => None,
        }
    }
}
