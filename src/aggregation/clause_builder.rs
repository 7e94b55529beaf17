//! `$apply` aggregation clause builder
//!
//! Turns a grouping spec and aggregate facts into one transformation:
//!
//! - `GroupingSpec::None` → `aggregate(item,...)`
//! - `GroupingSpec::Keys` → `groupby((k1,k2),aggregate(item,...))`
//!
//! Items render as `<path> with <kind> as <alias>`, or `$count as <alias>`.
//! Everything is validated before any text is produced.

use crate::config::TranslatorConfig;
use crate::edm::{EdmModel, EdmPrimitiveType, EdmPropertyKind};
use crate::response_shape::{ColumnType, ResultColumn};

use super::alias::is_odata_identifier;
use super::errors::{AggregationError, TargetIssue};
use super::facts::{AggregateFact, GroupingKey, GroupingSpec};
use super::kind::AggregationKind;
use super::resolver::{describe, resolve_path};

/// Rendered transformation plus the columns it yields per result row.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationClause {
    pub text: String,
    pub columns: Vec<ResultColumn>,
}

pub struct AggregationClauseBuilder<'a> {
    model: &'a dyn EdmModel,
    root_type: &'a str,
    validate_identifiers: bool,
}

impl<'a> AggregationClauseBuilder<'a> {
    pub fn new(
        model: &'a dyn EdmModel,
        root_type: &'a str,
        config: &TranslatorConfig,
    ) -> Result<Self, AggregationError> {
        if !model.has_type(root_type) {
            return Err(AggregationError::UnknownType(root_type.to_string()));
        }
        Ok(Self {
            model,
            root_type,
            validate_identifiers: config.validate_alias_identifiers,
        })
    }

    pub fn build(
        &self,
        grouping: &GroupingSpec,
        facts: &[AggregateFact],
    ) -> Result<AggregationClause, AggregationError> {
        if facts.is_empty() && matches!(grouping, GroupingSpec::None) {
            return Err(AggregationError::EmptyAggregation);
        }

        let mut columns = self.check_grouping(grouping)?;
        let aggregate_columns = self.check_facts(facts, &columns)?;
        columns.extend(aggregate_columns);

        let text = render(grouping, facts);
        log::debug!("$apply aggregation: {}", text);
        Ok(AggregationClause { text, columns })
    }

    fn check_grouping(&self, grouping: &GroupingSpec) -> Result<Vec<ResultColumn>, AggregationError> {
        let keys = match grouping {
            GroupingSpec::None => return Ok(Vec::new()),
            GroupingSpec::Keys(keys) => keys,
        };
        if keys.is_empty() || keys.iter().any(|k| k.path.is_empty()) {
            return Err(AggregationError::EmptyGroupingKey);
        }
        keys.iter().map(|key| self.check_key(key)).collect()
    }

    fn check_key(&self, key: &GroupingKey) -> Result<ResultColumn, AggregationError> {
        let unsupported = |issue: TargetIssue| AggregationError::UnsupportedGroupingKey {
            path: key.path_text(),
            issue,
        };
        let property = resolve_path(self.model, self.root_type, &key.path)
            .map_err(|failure| failure.into_error(unsupported))?;

        let (ty, nullable) = match &property.kind {
            EdmPropertyKind::Primitive { ty, nullable } => (ColumnType::Primitive(*ty), *nullable),
            EdmPropertyKind::Complex { type_name } => (ColumnType::Complex(type_name.clone()), true),
            _ => {
                return Err(unsupported(TargetIssue::NotPrimitive {
                    found: describe(property),
                }))
            }
        };

        Ok(ResultColumn {
            name: key.member.clone().unwrap_or_else(|| key.path_text()),
            location: key.path.clone(),
            ty,
            nullable,
        })
    }

    fn check_facts(
        &self,
        facts: &[AggregateFact],
        key_columns: &[ResultColumn],
    ) -> Result<Vec<ResultColumn>, AggregationError> {
        let mut seen: Vec<&str> = Vec::with_capacity(facts.len());
        let mut columns = Vec::with_capacity(facts.len());

        for fact in facts {
            if fact.alias.is_empty() {
                return Err(AggregationError::EmptyAlias {
                    path: fact.path_text(),
                });
            }
            if seen.contains(&fact.alias.as_str()) {
                return Err(AggregationError::DuplicateAlias(fact.alias.clone()));
            }
            // Keys come back nested under their first segment, aliases at the top level.
            if let Some(key) = key_columns.iter().find(|key| {
                key.name == fact.alias || key.location.first() == Some(&fact.alias)
            }) {
                return Err(AggregationError::AliasCollidesWithGroupingKey {
                    alias: fact.alias.clone(),
                    key: key.name.clone(),
                });
            }
            if !is_odata_identifier(&fact.alias) {
                if self.validate_identifiers {
                    return Err(AggregationError::InvalidAlias(fact.alias.clone()));
                }
                log::warn!("alias `{}` is not an OData identifier, sending as-is", fact.alias);
            }
            seen.push(&fact.alias);
            columns.push(self.check_fact(fact)?);
        }

        Ok(columns)
    }

    fn check_fact(&self, fact: &AggregateFact) -> Result<ResultColumn, AggregationError> {
        let column = |ty: EdmPrimitiveType, nullable: bool| ResultColumn {
            name: fact.alias.clone(),
            location: vec![fact.alias.clone()],
            ty: ColumnType::Primitive(ty),
            nullable,
        };

        if fact.kind == AggregationKind::Count {
            if !fact.source_path.is_empty() {
                return Err(AggregationError::UnexpectedCountTarget {
                    alias: fact.alias.clone(),
                    path: fact.path_text(),
                });
            }
            return Ok(column(AggregationKind::count_result_type(), false));
        }

        if fact.source_path.is_empty() {
            return Err(AggregationError::MissingAggregateTarget {
                alias: fact.alias.clone(),
                kind: fact.kind,
            });
        }

        let path = &fact.source_path;
        let property = resolve_path(self.model, self.root_type, path).map_err(|failure| {
            failure.into_error(|issue| AggregationError::unsupported_target(path, issue))
        })?;

        match &property.kind {
            EdmPropertyKind::Primitive { ty, nullable } => {
                let result = fact.kind.result_type(*ty).ok_or_else(|| {
                    AggregationError::unsupported_target(
                        path,
                        TargetIssue::NoOverload {
                            kind: fact.kind,
                            ty: *ty,
                        },
                    )
                })?;
                Ok(column(result, *nullable && fact.kind.propagates_null()))
            }
            _ => Err(AggregationError::unsupported_target(
                path,
                TargetIssue::NotPrimitive {
                    found: describe(property),
                },
            )),
        }
    }
}

/// Render one aggregate item.
pub fn render_aggregate_item(fact: &AggregateFact) -> String {
    match fact.kind {
        AggregationKind::Count => format!("$count as {}", fact.alias),
        kind => format!("{} with {} as {}", fact.path_text(), kind.keyword(), fact.alias),
    }
}

fn render(grouping: &GroupingSpec, facts: &[AggregateFact]) -> String {
    let aggregate = if facts.is_empty() {
        None
    } else {
        let items: Vec<String> = facts.iter().map(render_aggregate_item).collect();
        Some(format!("aggregate({})", items.join(",")))
    };

    match (grouping, aggregate) {
        (GroupingSpec::Keys(keys), Some(aggregate)) => {
            format!("groupby(({}),{})", render_keys(keys), aggregate)
        }
        (GroupingSpec::Keys(keys), None) => format!("groupby(({}))", render_keys(keys)),
        (GroupingSpec::None, Some(aggregate)) => aggregate,
        // rejected by `build` before rendering
        (GroupingSpec::None, None) => String::new(),
    }
}

fn render_keys(keys: &[GroupingKey]) -> String {
    keys.iter()
        .map(|k| k.path_text())
        .collect::<Vec<_>>()
        .join(",")
}
