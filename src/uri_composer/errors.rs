use thiserror::Error;

use crate::aggregation::AggregationError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ComposeError {
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("Query option `{0}` is specified more than once")]
    DuplicateQueryOption(&'static str),

    #[error("`{stage}` cannot follow `{after}` (options apply as filter, orderby, skip, top)")]
    StageOrderingViolation { stage: String, after: String },
}
