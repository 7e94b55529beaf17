//! Rules for mapping aggregated response rows back onto result members.
//!
//! Each `$apply` result row is a JSON object. Grouping keys come back nested
//! along their path (`Product/Color` → `{"Product":{"Color":...}}`), aggregate
//! values sit at the top level under their alias.

use serde_json::Value;
use thiserror::Error;

use crate::edm::EdmPrimitiveType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Primitive(EdmPrimitiveType),
    Complex(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    /// Member name in the caller's result type
    pub name: String,
    /// Property names leading to the value inside a row object
    pub location: Vec<String>,
    pub ty: ColumnType,
    pub nullable: bool,
}

impl ResultColumn {
    /// RFC 6901 pointer to the value inside a row.
    pub fn json_pointer(&self) -> String {
        self.location
            .iter()
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect()
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResponseShapeError {
    #[error("Result row is not a JSON object")]
    NotAnObject,
    #[error("Response payload has no `value` array")]
    MissingValueArray,
    #[error("Column `{column}` missing at `{pointer}`")]
    MissingColumn { column: String, pointer: String },
    #[error("Column `{column}` is null but not nullable")]
    UnexpectedNull { column: String },
    #[error("Column `{column}` expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultShape {
    columns: Vec<ResultColumn>,
}

impl ResultShape {
    pub fn new(columns: Vec<ResultColumn>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ResultColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check one result row against the expected columns.
    pub fn validate_row(&self, row: &Value) -> Result<(), ResponseShapeError> {
        if !row.is_object() {
            return Err(ResponseShapeError::NotAnObject);
        }
        for column in &self.columns {
            let pointer = column.json_pointer();
            let value = row
                .pointer(&pointer)
                .ok_or_else(|| ResponseShapeError::MissingColumn {
                    column: column.name.clone(),
                    pointer: pointer.clone(),
                })?;
            check_value(column, value)?;
        }
        Ok(())
    }

    /// Check every row of an OData collection payload (`{"value": [...]}`).
    pub fn validate_payload(&self, payload: &Value) -> Result<usize, ResponseShapeError> {
        let rows = payload
            .get("value")
            .and_then(Value::as_array)
            .ok_or(ResponseShapeError::MissingValueArray)?;
        for row in rows {
            self.validate_row(row)?;
        }
        log::debug!("validated {} aggregated rows", rows.len());
        Ok(rows.len())
    }
}

fn check_value(column: &ResultColumn, value: &Value) -> Result<(), ResponseShapeError> {
    if value.is_null() {
        return if column.nullable {
            Ok(())
        } else {
            Err(ResponseShapeError::UnexpectedNull {
                column: column.name.clone(),
            })
        };
    }

    let compatible = match &column.ty {
        ColumnType::Complex(_) => value.is_object(),
        ColumnType::Primitive(ty) => primitive_compatible(*ty, value),
    };
    if compatible {
        Ok(())
    } else {
        Err(ResponseShapeError::TypeMismatch {
            column: column.name.clone(),
            expected: match &column.ty {
                ColumnType::Primitive(ty) => ty.to_string(),
                ColumnType::Complex(name) => name.clone(),
            },
            found: json_kind(value).to_string(),
        })
    }
}

fn primitive_compatible(ty: EdmPrimitiveType, value: &Value) -> bool {
    match ty {
        EdmPrimitiveType::Boolean => value.is_boolean(),
        EdmPrimitiveType::Byte
        | EdmPrimitiveType::SByte
        | EdmPrimitiveType::Int16
        | EdmPrimitiveType::Int32 => value.is_i64() || value.is_u64(),
        // IEEE754Compatible payloads send 64-bit and decimal values as strings
        EdmPrimitiveType::Int64 => {
            value.is_i64()
                || value.is_u64()
                || value.as_str().is_some_and(|s| s.parse::<i64>().is_ok())
        }
        EdmPrimitiveType::Decimal => {
            value.is_number() || value.as_str().is_some_and(|s| s.parse::<f64>().is_ok())
        }
        EdmPrimitiveType::Single | EdmPrimitiveType::Double => {
            value.is_number()
                || value
                    .as_str()
                    .is_some_and(|s| matches!(s, "INF" | "-INF" | "NaN"))
        }
        EdmPrimitiveType::String
        | EdmPrimitiveType::Guid
        | EdmPrimitiveType::Date
        | EdmPrimitiveType::DateTimeOffset
        | EdmPrimitiveType::TimeOfDay
        | EdmPrimitiveType::Duration
        | EdmPrimitiveType::Binary => value.is_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
