use std::fmt;

use crate::aggregation::{AggregateFact, AggregationError, GroupingSpec};

use super::errors::ComposeError;

/// One query operator, in the order the caller applied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStage {
    /// Already-compiled filter predicate text
    Filter(String),
    /// Already-compiled ordering text
    OrderBy(String),
    Skip(u64),
    Top(u64),
    Aggregate {
        grouping: GroupingSpec,
        facts: Vec<AggregateFact>,
    },
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStage::Filter(text) => write!(f, "filter({})", text),
            QueryStage::OrderBy(text) => write!(f, "orderby({})", text),
            QueryStage::Skip(n) => write!(f, "skip({})", n),
            QueryStage::Top(n) => write!(f, "top({})", n),
            QueryStage::Aggregate { grouping, .. } => match grouping {
                GroupingSpec::None => write!(f, "aggregate"),
                GroupingSpec::Keys(_) => write!(f, "groupby"),
            },
        }
    }
}

/// Locate the aggregation stage and check that only filters precede it.
pub(crate) fn aggregate_position(stages: &[QueryStage]) -> Result<Option<usize>, AggregationError> {
    let mut position = None;
    let mut blocking: Option<&QueryStage> = None;

    for (index, stage) in stages.iter().enumerate() {
        match stage {
            QueryStage::Aggregate { .. } => {
                if position.is_some() {
                    return Err(AggregationError::MultipleAggregationStages);
                }
                if let Some(stage) = blocking {
                    return Err(AggregationError::AggregationOrderingViolation {
                        stage: stage.to_string(),
                    });
                }
                position = Some(index);
            }
            QueryStage::Filter(_) => {}
            other => {
                if position.is_none() && blocking.is_none() {
                    blocking = Some(other);
                }
            }
        }
    }

    Ok(position)
}

/// Position in the fixed evaluation order of plain query options.
fn option_rank(stage: &QueryStage) -> Option<u8> {
    match stage {
        QueryStage::Filter(_) => Some(0),
        QueryStage::OrderBy(_) => Some(1),
        QueryStage::Skip(_) => Some(2),
        QueryStage::Top(_) => Some(3),
        QueryStage::Aggregate { .. } => None,
    }
}

/// Reject stage sequences that the fixed option order would silently rearrange,
/// e.g. `top` followed by `filter`.
pub(crate) fn check_option_order(stages: &[QueryStage]) -> Result<(), ComposeError> {
    let mut latest: Option<(u8, &QueryStage)> = None;

    for stage in stages {
        let Some(rank) = option_rank(stage) else {
            continue;
        };
        match latest {
            Some((latest_rank, after)) if rank < latest_rank => {
                return Err(ComposeError::StageOrderingViolation {
                    stage: stage.to_string(),
                    after: after.to_string(),
                });
            }
            Some((latest_rank, _)) if rank == latest_rank => {}
            _ => latest = Some((rank, stage)),
        }
    }

    Ok(())
}
