//! Translation entry point
//!
//! Takes the structured facts reported by the expression walker
//! (`QueryDescription`), resolves member kinds against the EDM and produces
//! the final query options. One call owns its builders from start to finish.
//!
//! ```yaml
//! entity_type: Sale
//! stages:
//!   - filter: "CurrencyCode eq 'USD'"
//!   - aggregate:
//!       key_selector:
//!         member: Product/Color
//!       aggregates:
//!         - alias: ProductAvgTaxRate
//!           source_path: Product/TaxRate
//!           kind: average
//! projection:
//!   - root: s
//!     chains:
//!       - [Product, Color]
//!     paths:
//!       - Customer/*
//! ```

use serde::{Deserialize, Serialize};

use crate::aggregation::{
    deserialize_path, AggregateFact, AggregationKind, AliasNamer, DefaultAliasNamer,
    GroupingSpec, KeySelector,
};
use crate::config::TranslatorConfig;
use crate::edm::EdmModel;
use crate::errors::TranslationError;
use crate::select_expand::{
    parse_select_path, SelectExpandError, SelectExpandPathBuilder, SelectExpandPaths,
};
use crate::uri_composer::{ComposedQuery, QueryStage, UriComposer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDescription {
    pub entity_type: String,
    /// Stages are written as one-key maps (`- filter: ...`), nested selectors likewise.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub stages: Vec<StageDescription>,
    #[serde(default)]
    pub projection: Vec<ScopeDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageDescription {
    Filter(String),
    OrderBy(String),
    Skip(u64),
    Top(u64),
    Aggregate(AggregateDescription),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateDescription {
    /// Missing selector means a constant key.
    #[serde(default)]
    pub key_selector: Option<KeySelector>,
    #[serde(default)]
    pub aggregates: Vec<AggregateItemDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateItemDescription {
    /// Member name assigned in the result projection; generated when absent.
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "deserialize_path")]
    pub source_path: Vec<String>,
    pub kind: AggregationKind,
}

/// Member accesses discovered under one lambda parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeDescription {
    pub root: String,
    #[serde(default)]
    pub chains: Vec<Vec<MemberStep>>,
    /// Textual select paths, e.g. `Orders/Customer/Name` or `Orders/*`
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberStep {
    Member(String),
    Cast { member: String, cast: String },
}

impl MemberStep {
    fn member(&self) -> &str {
        match self {
            MemberStep::Member(member) => member,
            MemberStep::Cast { member, .. } => member,
        }
    }

    fn cast(&self) -> Option<&str> {
        match self {
            MemberStep::Member(_) => None,
            MemberStep::Cast { cast, .. } => Some(cast),
        }
    }
}

pub struct Translator<'a> {
    model: &'a dyn EdmModel,
    config: TranslatorConfig,
    alias_namer: Box<dyn AliasNamer + 'a>,
}

impl<'a> Translator<'a> {
    pub fn new(model: &'a dyn EdmModel, config: TranslatorConfig) -> Self {
        let alias_namer = Box::new(DefaultAliasNamer::from_config(&config));
        Self {
            model,
            config,
            alias_namer,
        }
    }

    /// Replace the namer used for aggregates reported without an alias.
    pub fn with_alias_namer(mut self, namer: impl AliasNamer + 'a) -> Self {
        self.alias_namer = Box::new(namer);
        self
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn translate(&self, query: &QueryDescription) -> Result<ComposedQuery, TranslationError> {
        log::debug!("Translating query over `{}`", query.entity_type);
        if !self.model.has_type(&query.entity_type) {
            return Err(TranslationError::UnknownEntityType(query.entity_type.clone()));
        }

        let paths = self.collect_select_expand(query)?;
        let stages = query
            .stages
            .iter()
            .map(|stage| self.to_stage(stage))
            .collect::<Result<Vec<_>, _>>()?;

        let composed = UriComposer::new(self.model, &query.entity_type, &self.config)
            .compose(&stages, paths)?;
        Ok(composed)
    }

    fn collect_select_expand(
        &self,
        query: &QueryDescription,
    ) -> Result<SelectExpandPaths, TranslationError> {
        let mut builder = SelectExpandPathBuilder::new(&self.config);

        for scope in &query.projection {
            builder.push_root_scope(scope.root.clone())?;
            for chain in &scope.chains {
                builder.start_new_chain()?;
                self.append_chain(&mut builder, &query.entity_type, chain)?;
            }
            for path in &scope.paths {
                let parsed =
                    parse_select_path(path, &query.entity_type, self.model, &self.config)?;
                builder.add_parsed_path(parsed)?;
            }
            builder.pop_root_scope()?;
        }

        Ok(builder.finish()?)
    }

    fn append_chain(
        &self,
        builder: &mut SelectExpandPathBuilder,
        root_type: &str,
        chain: &[MemberStep],
    ) -> Result<(), TranslationError> {
        let mut current_type = Some(root_type.to_string());
        let mut previous: Option<&str> = None;

        for step in chain {
            let member = step.member();
            let qualified_cast = match step.cast() {
                Some(cast) => {
                    if !self.model.has_type(cast) {
                        return Err(TranslationError::UnknownCastType {
                            type_name: cast.to_string(),
                            member: member.to_string(),
                        });
                    }
                    current_type = Some(cast.to_string());
                    Some(self.model.qualified_type_name(cast))
                }
                None => None,
            };

            let Some(type_name) = current_type.as_deref() else {
                return Err(SelectExpandError::StructuralTraversal {
                    member: member.to_string(),
                    through: previous.unwrap_or_default().to_string(),
                }
                .into());
            };
            let property = self.model.property(type_name, member).ok_or_else(|| {
                SelectExpandError::UnknownProperty {
                    type_name: type_name.to_string(),
                    property: member.to_string(),
                }
            })?;

            builder.append_step(member, property.is_structural(), qualified_cast.as_deref())?;
            current_type = property.traversal_type().map(str::to_string);
            previous = Some(member);
        }

        Ok(())
    }

    fn to_stage(&self, stage: &StageDescription) -> Result<QueryStage, TranslationError> {
        Ok(match stage {
            StageDescription::Filter(text) => QueryStage::Filter(text.clone()),
            StageDescription::OrderBy(text) => QueryStage::OrderBy(text.clone()),
            StageDescription::Skip(n) => QueryStage::Skip(*n),
            StageDescription::Top(n) => QueryStage::Top(*n),
            StageDescription::Aggregate(aggregate) => {
                let grouping = match &aggregate.key_selector {
                    Some(selector) => GroupingSpec::try_from(selector.clone())?,
                    None => GroupingSpec::None,
                };
                let facts = aggregate
                    .aggregates
                    .iter()
                    .map(|item| {
                        let alias = item.alias.clone().unwrap_or_else(|| {
                            self.alias_namer.default_alias(item.kind, &item.source_path)
                        });
                        AggregateFact::new(alias, item.source_path.clone(), item.kind)
                    })
                    .collect();
                QueryStage::Aggregate { grouping, facts }
            }
        })
    }
}
