use super::primitive::EdmPrimitiveType;

/// What a property holds, as far as query translation cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdmPropertyKind {
    Primitive { ty: EdmPrimitiveType, nullable: bool },
    Complex { type_name: String },
    Navigation { target_type: String, is_collection: bool },
    PrimitiveCollection { ty: EdmPrimitiveType },
    ComplexCollection { type_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmProperty {
    pub name: String,
    pub kind: EdmPropertyKind,
}

impl EdmProperty {
    /// Structural members render under `$select`, navigations under `$expand`.
    pub fn is_structural(&self) -> bool {
        !matches!(self.kind, EdmPropertyKind::Navigation { .. })
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self.kind,
            EdmPropertyKind::Navigation {
                is_collection: true,
                ..
            } | EdmPropertyKind::PrimitiveCollection { .. }
                | EdmPropertyKind::ComplexCollection { .. }
        )
    }

    /// The type a path continues into after this property, if it can be traversed.
    pub fn traversal_type(&self) -> Option<&str> {
        match &self.kind {
            EdmPropertyKind::Complex { type_name } => Some(type_name),
            EdmPropertyKind::Navigation { target_type, .. } => Some(target_type),
            EdmPropertyKind::ComplexCollection { type_name } => Some(type_name),
            EdmPropertyKind::Primitive { .. } | EdmPropertyKind::PrimitiveCollection { .. } => {
                None
            }
        }
    }
}

/// Read-only view of the entity data model.
///
/// The translator only asks two questions of it: does a type exist, and what
/// kind of member is `type.property`. Lookups must see inherited members.
pub trait EdmModel {
    fn has_type(&self, type_name: &str) -> bool;

    fn property(&self, type_name: &str, property: &str) -> Option<&EdmProperty>;

    /// Name to use for a type-cast path segment. Defaults to the bare name.
    fn qualified_type_name(&self, type_name: &str) -> String {
        type_name.to_string()
    }
}
