//! Alias rules for aggregate results.
//!
//! Caller-declared member names are used verbatim. Only aggregates reported
//! without a name get a generated default, e.g. a count-distinct over
//! `Customer/Country` becomes `CountDistinctCustomerCountry`.

use std::sync::LazyLock;

use regex::Regex;

use super::kind::AggregationKind;
use crate::config::TranslatorConfig;

/// OData simple identifier (CSDL `SimpleIdentifier`)
static ODATA_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{Nl}_][\p{L}\p{Nl}\p{Nd}\p{Mn}\p{Mc}\p{Pc}\p{Cf}]{0,127}$").unwrap()
});

pub fn is_odata_identifier(alias: &str) -> bool {
    ODATA_IDENTIFIER.is_match(alias)
}

/// Produces aliases for aggregates the caller did not name.
pub trait AliasNamer {
    fn default_alias(&self, kind: AggregationKind, source_path: &[String]) -> String;
}

/// `<PascalKind><PascalSegment>...`, parts joined with a configurable separator.
#[derive(Debug, Clone, Default)]
pub struct DefaultAliasNamer {
    separator: String,
}

impl DefaultAliasNamer {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self::new(config.alias_separator.clone())
    }
}

impl AliasNamer for DefaultAliasNamer {
    fn default_alias(&self, kind: AggregationKind, source_path: &[String]) -> String {
        std::iter::once(kind.pascal_name().to_string())
            .chain(source_path.iter().map(|s| pascal_case(s)))
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

fn pascal_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
