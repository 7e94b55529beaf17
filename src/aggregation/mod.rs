//! Aggregation and group-by clauses for `$apply`

mod alias;
mod clause_builder;
mod errors;
mod facts;
mod kind;
mod resolver;

pub use alias::{is_odata_identifier, AliasNamer, DefaultAliasNamer};
pub use clause_builder::{render_aggregate_item, AggregationClause, AggregationClauseBuilder};
pub use errors::{AggregationError, TargetIssue};
pub use facts::{AggregateFact, GroupingKey, GroupingSpec, KeySelector};
pub use kind::AggregationKind;

pub(crate) use facts::deserialize_path;
