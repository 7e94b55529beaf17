//! Entity data model collaborator
//!
//! The translator consults the EDM to tell structural members from
//! navigations, to find the declared primitive type at the end of an
//! aggregate path, and to reject collection-valued traversals.

mod catalog;
mod errors;
mod model;
mod primitive;

pub use catalog::{CatalogDefinition, EdmCatalog, PropertyDefinition, TypeDefinition};
pub use errors::EdmError;
pub use model::{EdmModel, EdmProperty, EdmPropertyKind};
pub use primitive::{EdmPrimitiveType, NumericCategory};
