use std::fmt;

use thiserror::Error;

use super::kind::AggregationKind;
use crate::edm::EdmPrimitiveType;

/// Why a path cannot be aggregated or grouped on.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetIssue {
    /// The path ends at an entity or complex value.
    NotPrimitive { found: String },
    /// The path traverses or ends at a collection-valued member.
    CollectionValued { segment: String },
    /// The path continues past a primitive member.
    ThroughPrimitive { segment: String },
    /// No overload of the aggregate accepts the primitive type.
    NoOverload {
        kind: AggregationKind,
        ty: EdmPrimitiveType,
    },
}

impl fmt::Display for TargetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetIssue::NotPrimitive { found } => {
                write!(f, "target is {}, not a primitive value", found)
            }
            TargetIssue::CollectionValued { segment } => {
                write!(f, "`{}` is collection-valued", segment)
            }
            TargetIssue::ThroughPrimitive { segment } => {
                write!(f, "`{}` is primitive and cannot be traversed", segment)
            }
            TargetIssue::NoOverload { kind, ty } => {
                write!(f, "{} is not defined for {}", kind.keyword(), ty)
            }
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AggregationError {
    #[error("Unsupported aggregation target `{path}`: {issue}")]
    UnsupportedAggregationTarget { path: String, issue: TargetIssue },

    #[error("Invalid group-by key selector `{selector}` (constructor-initialized keys are not supported; use member initialization, a constant or a single member path)")]
    InvalidGroupByKeySelector { selector: String },

    #[error("`{stage}` is applied before aggregation (only filter may precede groupby/aggregate)")]
    AggregationOrderingViolation { stage: String },

    #[error("Only one aggregation stage is supported per query")]
    MultipleAggregationStages,

    #[error("Unsupported grouping key `{path}`: {issue}")]
    UnsupportedGroupingKey { path: String, issue: TargetIssue },

    #[error("Aggregate over `{path}` has an empty alias")]
    EmptyAlias { path: String },

    #[error("Alias `{0}` is used more than once in the same aggregation")]
    DuplicateAlias(String),

    #[error("Alias `{alias}` collides with grouping key `{key}` in the result row")]
    AliasCollidesWithGroupingKey { alias: String, key: String },

    #[error("Alias `{0}` is not a valid OData identifier")]
    InvalidAlias(String),

    #[error("Aggregate `{alias}` ({kind}) has no source path")]
    MissingAggregateTarget {
        alias: String,
        kind: AggregationKind,
    },

    #[error("Count `{alias}` takes no source path but got `{path}`")]
    UnexpectedCountTarget { alias: String, path: String },

    #[error("Grouping keys must name at least one non-empty member path")]
    EmptyGroupingKey,

    #[error("Aggregation without grouping keys needs at least one aggregate")]
    EmptyAggregation,

    #[error("Unknown property `{property}` on type `{type_name}`")]
    UnknownProperty { type_name: String, property: String },

    #[error("Unknown type `{0}`")]
    UnknownType(String),
}

impl AggregationError {
    pub(crate) fn unsupported_target(path: &[String], issue: TargetIssue) -> Self {
        AggregationError::UnsupportedAggregationTarget {
            path: path.join("/"),
            issue,
        }
    }
}
