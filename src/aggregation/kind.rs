use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edm::{EdmPrimitiveType, NumericCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKind {
    Sum,
    Average,
    Min,
    Max,
    Count,
    CountDistinct,
}

impl AggregationKind {
    /// Keyword used after `with` in an aggregate item.
    pub fn keyword(&self) -> &'static str {
        match self {
            AggregationKind::Sum => "sum",
            AggregationKind::Average => "average",
            AggregationKind::Min => "min",
            AggregationKind::Max => "max",
            AggregationKind::Count => "count",
            AggregationKind::CountDistinct => "countdistinct",
        }
    }

    pub fn pascal_name(&self) -> &'static str {
        match self {
            AggregationKind::Sum => "Sum",
            AggregationKind::Average => "Average",
            AggregationKind::Min => "Min",
            AggregationKind::Max => "Max",
            AggregationKind::Count => "Count",
            AggregationKind::CountDistinct => "CountDistinct",
        }
    }

    /// Result type of this aggregate over a value of type `input`.
    ///
    /// `None` means no overload exists and the target must be rejected.
    pub fn result_type(&self, input: EdmPrimitiveType) -> Option<EdmPrimitiveType> {
        AGGREGATE_OVERLOADS.get(&(*self, input)).copied()
    }

    /// Result type of a bare `$count`.
    pub fn count_result_type() -> EdmPrimitiveType {
        EdmPrimitiveType::Int32
    }

    /// Whether the result can be null when the input is nullable.
    pub fn propagates_null(&self) -> bool {
        !matches!(self, AggregationKind::Count | AggregationKind::CountDistinct)
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

fn sum_result(input: EdmPrimitiveType) -> Option<EdmPrimitiveType> {
    match input {
        EdmPrimitiveType::Byte
        | EdmPrimitiveType::SByte
        | EdmPrimitiveType::Int16
        | EdmPrimitiveType::Int32 => Some(EdmPrimitiveType::Int32),
        EdmPrimitiveType::Int64 => Some(EdmPrimitiveType::Int64),
        other if other.numeric_category().is_some() => Some(other),
        _ => None,
    }
}

fn average_result(input: EdmPrimitiveType) -> Option<EdmPrimitiveType> {
    match input.numeric_category()? {
        NumericCategory::Integral => Some(EdmPrimitiveType::Double),
        NumericCategory::Floating | NumericCategory::Decimal => Some(input),
    }
}

// Static overload table: (kind, input type) -> result type
lazy_static::lazy_static! {
    static ref AGGREGATE_OVERLOADS: HashMap<(AggregationKind, EdmPrimitiveType), EdmPrimitiveType> = {
        let mut m = HashMap::new();

        for ty in EdmPrimitiveType::ALL {
            if let Some(result) = sum_result(ty) {
                m.insert((AggregationKind::Sum, ty), result);
            }
            if let Some(result) = average_result(ty) {
                m.insert((AggregationKind::Average, ty), result);
            }
            if ty.is_orderable() {
                m.insert((AggregationKind::Min, ty), ty);
                m.insert((AggregationKind::Max, ty), ty);
            }
            m.insert((AggregationKind::CountDistinct, ty), EdmPrimitiveType::Int32);
        }

        m
    };
}
