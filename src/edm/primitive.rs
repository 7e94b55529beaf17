use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::EdmError;

/// OData primitive types understood by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EdmPrimitiveType {
    Boolean,
    Byte,
    SByte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    String,
    Guid,
    Date,
    DateTimeOffset,
    TimeOfDay,
    Duration,
    Binary,
}

/// Arithmetic family of a primitive type, used to pick aggregate overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericCategory {
    Integral,
    Floating,
    Decimal,
}

impl EdmPrimitiveType {
    pub const ALL: [EdmPrimitiveType; 16] = [
        EdmPrimitiveType::Boolean,
        EdmPrimitiveType::Byte,
        EdmPrimitiveType::SByte,
        EdmPrimitiveType::Int16,
        EdmPrimitiveType::Int32,
        EdmPrimitiveType::Int64,
        EdmPrimitiveType::Single,
        EdmPrimitiveType::Double,
        EdmPrimitiveType::Decimal,
        EdmPrimitiveType::String,
        EdmPrimitiveType::Guid,
        EdmPrimitiveType::Date,
        EdmPrimitiveType::DateTimeOffset,
        EdmPrimitiveType::TimeOfDay,
        EdmPrimitiveType::Duration,
        EdmPrimitiveType::Binary,
    ];

    /// Qualified name, e.g. `Edm.Int32`.
    pub fn qualified_name(&self) -> &'static str {
        match self {
            EdmPrimitiveType::Boolean => "Edm.Boolean",
            EdmPrimitiveType::Byte => "Edm.Byte",
            EdmPrimitiveType::SByte => "Edm.SByte",
            EdmPrimitiveType::Int16 => "Edm.Int16",
            EdmPrimitiveType::Int32 => "Edm.Int32",
            EdmPrimitiveType::Int64 => "Edm.Int64",
            EdmPrimitiveType::Single => "Edm.Single",
            EdmPrimitiveType::Double => "Edm.Double",
            EdmPrimitiveType::Decimal => "Edm.Decimal",
            EdmPrimitiveType::String => "Edm.String",
            EdmPrimitiveType::Guid => "Edm.Guid",
            EdmPrimitiveType::Date => "Edm.Date",
            EdmPrimitiveType::DateTimeOffset => "Edm.DateTimeOffset",
            EdmPrimitiveType::TimeOfDay => "Edm.TimeOfDay",
            EdmPrimitiveType::Duration => "Edm.Duration",
            EdmPrimitiveType::Binary => "Edm.Binary",
        }
    }

    pub fn numeric_category(&self) -> Option<NumericCategory> {
        match self {
            EdmPrimitiveType::Byte
            | EdmPrimitiveType::SByte
            | EdmPrimitiveType::Int16
            | EdmPrimitiveType::Int32
            | EdmPrimitiveType::Int64 => Some(NumericCategory::Integral),
            EdmPrimitiveType::Single | EdmPrimitiveType::Double => Some(NumericCategory::Floating),
            EdmPrimitiveType::Decimal => Some(NumericCategory::Decimal),
            _ => None,
        }
    }

    /// Whether values of this type have a total order usable by `min`/`max`.
    pub fn is_orderable(&self) -> bool {
        !matches!(self, EdmPrimitiveType::Boolean | EdmPrimitiveType::Binary)
    }
}

impl fmt::Display for EdmPrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

impl FromStr for EdmPrimitiveType {
    type Err = EdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdmPrimitiveType::ALL
            .iter()
            .copied()
            .find(|ty| ty.qualified_name() == s)
            .ok_or_else(|| EdmError::UnknownPrimitiveType(s.to_string()))
    }
}

impl TryFrom<String> for EdmPrimitiveType {
    type Error = EdmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EdmPrimitiveType> for String {
    fn from(ty: EdmPrimitiveType) -> Self {
        ty.qualified_name().to_string()
    }
}
