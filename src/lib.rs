//! odata-translator - Compile structured collection queries into OData query options
//!
//! This crate provides the query-to-wire core of an OData client:
//! - Path-segment tokens with append / wildcard-trim / stringify passes
//! - `$select` / `$expand` item building from member-access chains
//! - `$apply` aggregation and group-by clauses with legality checks
//! - Composition of the final query-option string
//! - Row-shape rules for mapping aggregated responses back to result members
//!
//! # Example
//!
//! ```
//! use odata_translator::aggregation::{AggregateFact, AggregationKind, GroupingKey, GroupingSpec};
//! use odata_translator::edm::EdmCatalog;
//! use odata_translator::uri_composer::{QueryStage, UriComposer};
//! use odata_translator::{SelectExpandPaths, TranslatorConfig};
//!
//! let catalog = EdmCatalog::from_yaml_str(r#"
//! entity_types:
//!   - name: Row
//!     properties:
//!       - { name: RowParity, type: Edm.String }
//!       - { name: IntProp, type: Edm.Int32 }
//! "#).unwrap();
//! let config = TranslatorConfig::default();
//! let stages = [QueryStage::Aggregate {
//!     grouping: GroupingSpec::Keys(vec![GroupingKey::new(["RowParity"])]),
//!     facts: vec![AggregateFact::new("SumIntProp", ["IntProp"], AggregationKind::Sum)],
//! }];
//! let composed = UriComposer::new(&catalog, "Row", &config)
//!     .compose(&stages, SelectExpandPaths::default())
//!     .unwrap();
//! assert_eq!(
//!     composed.options.to_query_string(),
//!     "$apply=groupby((RowParity),aggregate(IntProp with sum as SumIntProp))"
//! );
//! ```

pub mod aggregation;
pub mod config;
pub mod edm;
pub mod errors;
pub mod path_token;
pub mod response_shape;
pub mod select_expand;
pub mod translator;
pub mod uri_composer;

// Re-export commonly used types
pub use config::{ConfigError, TranslatorConfig};
pub use errors::TranslationError;
pub use path_token::{PathSegment, PathTokenError};
pub use response_shape::{ResultShape, ResponseShapeError};
pub use select_expand::{SelectExpandPathBuilder, SelectExpandPaths};
pub use translator::{QueryDescription, Translator};
pub use uri_composer::{ComposedQuery, QueryOptions};
