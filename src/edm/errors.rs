use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EdmError {
    #[error("Unknown primitive type `{0}` (expected an `Edm.*` name such as `Edm.Int32`)")]
    UnknownPrimitiveType(String),
    #[error("Property `{type_name}.{property}` must declare exactly one of `type` or `navigation`")]
    AmbiguousProperty { type_name: String, property: String },
    #[error("Property `{type_name}.{property}` references undeclared type `{referenced}`")]
    UndeclaredType {
        type_name: String,
        property: String,
        referenced: String,
    },
    #[error("Type `{type_name}` declares unknown base type `{base_type}`")]
    UnknownBaseType { type_name: String, base_type: String },
    #[error("Type `{0}` inherits from itself")]
    InheritanceCycle(String),
    #[error("Type `{0}` is declared more than once")]
    DuplicateType(String),
    #[error("Failed to read EDM catalog: {error}")]
    CatalogReadError { error: String },
    #[error("Failed to parse EDM catalog: {error}")]
    CatalogParseError { error: String },
}
