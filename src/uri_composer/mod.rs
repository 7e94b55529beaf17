//! Query-option composition
//!
//! Joins the aggregation clause, caller-supplied filter text and the
//! select/expand items into final query-option values. With an aggregation
//! stage the filters become `$apply` transformations around it:
//!
//! `filter(A)/groupby((K),aggregate(...))/filter(B)`
//!
//! Without one they are combined into `$filter`.

mod errors;
mod query_options;
mod stages;

pub use errors::ComposeError;
pub use query_options::QueryOptions;
pub use stages::QueryStage;

use crate::aggregation::AggregationClauseBuilder;
use crate::config::TranslatorConfig;
use crate::edm::EdmModel;
use crate::response_shape::ResultShape;
use crate::select_expand::SelectExpandPaths;

/// Query options plus the row shape an aggregated response will have.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedQuery {
    pub options: QueryOptions,
    pub result_shape: Option<ResultShape>,
}

pub struct UriComposer<'a> {
    model: &'a dyn EdmModel,
    root_type: &'a str,
    config: &'a TranslatorConfig,
}

impl<'a> UriComposer<'a> {
    pub fn new(model: &'a dyn EdmModel, root_type: &'a str, config: &'a TranslatorConfig) -> Self {
        Self {
            model,
            root_type,
            config,
        }
    }

    pub fn compose(
        &self,
        stages: &[QueryStage],
        paths: SelectExpandPaths,
    ) -> Result<ComposedQuery, ComposeError> {
        let aggregate_at = stages::aggregate_position(stages)?;
        stages::check_option_order(stages)?;

        let mut options = QueryOptions {
            select: paths.projection_paths,
            expand: paths.expansion_paths,
            ..Default::default()
        };
        let mut apply_stages = Vec::new();
        let mut filters = Vec::new();
        let mut orderings = Vec::new();
        let mut result_shape = None;

        for stage in stages {
            match stage {
                QueryStage::Filter(text) if aggregate_at.is_some() => {
                    apply_stages.push(format!("filter({})", text))
                }
                QueryStage::Filter(text) => filters.push(text.as_str()),
                QueryStage::OrderBy(text) => orderings.push(text.as_str()),
                QueryStage::Skip(n) => set_once(&mut options.skip, *n, "$skip")?,
                QueryStage::Top(n) => set_once(&mut options.top, *n, "$top")?,
                QueryStage::Aggregate { grouping, facts } => {
                    let clause = AggregationClauseBuilder::new(self.model, self.root_type, self.config)?
                        .build(grouping, facts)?;
                    apply_stages.push(clause.text);
                    result_shape = Some(ResultShape::new(clause.columns));
                }
            }
        }

        if !apply_stages.is_empty() {
            options.apply = Some(apply_stages.join("/"));
        }
        options.filter = match filters.as_slice() {
            [] => None,
            [single] => Some(single.to_string()),
            many => Some(
                many.iter()
                    .map(|f| format!("({})", f))
                    .collect::<Vec<_>>()
                    .join(" and "),
            ),
        };
        if !orderings.is_empty() {
            options.orderby = Some(orderings.join(","));
        }

        log::info!("Composed query options: {}", options);
        Ok(ComposedQuery {
            options,
            result_shape,
        })
    }
}

fn set_once(slot: &mut Option<u64>, value: u64, option: &'static str) -> Result<(), ComposeError> {
    if slot.replace(value).is_some() {
        return Err(ComposeError::DuplicateQueryOption(option));
    }
    Ok(())
}
