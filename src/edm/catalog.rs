//! In-memory EDM loaded from YAML.
//!
//! ```yaml
//! namespace: Test.Model
//! entity_types:
//!   - name: Sale
//!     properties:
//!       - name: Amount
//!         type: Edm.Decimal
//!         nullable: false
//!       - name: Product
//!         navigation: Product
//!       - name: Lines
//!         navigation: SaleLine
//!         collection: true
//!   - name: Product
//!     properties:
//!       - name: Color
//!         type: Edm.String
//! complex_types:
//!   - name: Address
//!     properties:
//!       - name: City
//!         type: Edm.String
//! ```
//!
//! A property `type` starting with `Edm.` is primitive, anything else names a
//! complex type. `navigation` names an entity type.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::EdmError;
use super::model::{EdmModel, EdmProperty, EdmPropertyKind};
use super::primitive::EdmPrimitiveType;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub entity_types: Vec<TypeDefinition>,
    #[serde(default)]
    pub complex_types: Vec<TypeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub navigation: Option<String>,
    #[serde(default)]
    pub collection: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

#[derive(Debug, Clone)]
struct TypeEntry {
    base_type: Option<String>,
    properties: Vec<EdmProperty>,
}

#[derive(Debug, Clone, Default)]
pub struct EdmCatalog {
    namespace: Option<String>,
    types: HashMap<String, TypeEntry>,
}

impl EdmCatalog {
    pub fn from_definition(definition: CatalogDefinition) -> Result<Self, EdmError> {
        let declared: Vec<&str> = definition
            .entity_types
            .iter()
            .chain(definition.complex_types.iter())
            .map(|t| t.name.as_str())
            .collect();
        let entity_names: Vec<&str> = definition
            .entity_types
            .iter()
            .map(|t| t.name.as_str())
            .collect();

        let mut types = HashMap::new();
        for type_def in definition
            .entity_types
            .iter()
            .chain(definition.complex_types.iter())
        {
            if let Some(base) = &type_def.base_type {
                if !declared.contains(&base.as_str()) {
                    return Err(EdmError::UnknownBaseType {
                        type_name: type_def.name.clone(),
                        base_type: base.clone(),
                    });
                }
            }

            let properties = type_def
                .properties
                .iter()
                .map(|p| resolve_property(&type_def.name, p, &declared, &entity_names))
                .collect::<Result<Vec<_>, _>>()?;

            let entry = TypeEntry {
                base_type: type_def.base_type.clone(),
                properties,
            };
            if types.insert(type_def.name.clone(), entry).is_some() {
                return Err(EdmError::DuplicateType(type_def.name.clone()));
            }
        }

        let catalog = EdmCatalog {
            namespace: definition.namespace,
            types,
        };
        catalog.check_inheritance()?;

        log::debug!(
            "Loaded EDM catalog with {} types (namespace: {:?})",
            catalog.types.len(),
            catalog.namespace
        );
        Ok(catalog)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, EdmError> {
        let definition: CatalogDefinition =
            serde_yaml::from_str(content).map_err(|e| EdmError::CatalogParseError {
                error: e.to_string(),
            })?;
        Self::from_definition(definition)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, EdmError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| EdmError::CatalogReadError {
                error: format!("{}: {}", path.as_ref().display(), e),
            })?;
        Self::from_yaml_str(&content)
    }

    fn check_inheritance(&self) -> Result<(), EdmError> {
        for name in self.types.keys() {
            let mut current = self.types.get(name).and_then(|t| t.base_type.as_deref());
            let mut hops = 0;
            while let Some(base) = current {
                hops += 1;
                if base == name || hops > self.types.len() {
                    return Err(EdmError::InheritanceCycle(name.clone()));
                }
                current = self.types.get(base).and_then(|t| t.base_type.as_deref());
            }
        }
        Ok(())
    }
}

fn resolve_property(
    type_name: &str,
    def: &PropertyDefinition,
    declared: &[&str],
    entity_names: &[&str],
) -> Result<EdmProperty, EdmError> {
    let undeclared = |referenced: &str| EdmError::UndeclaredType {
        type_name: type_name.to_string(),
        property: def.name.clone(),
        referenced: referenced.to_string(),
    };

    let kind = match (&def.type_name, &def.navigation) {
        (Some(ty), None) if ty.starts_with("Edm.") => {
            let ty: EdmPrimitiveType = ty.parse()?;
            if def.collection {
                EdmPropertyKind::PrimitiveCollection { ty }
            } else {
                EdmPropertyKind::Primitive {
                    ty,
                    nullable: def.nullable,
                }
            }
        }
        (Some(complex), None) => {
            if !declared.contains(&complex.as_str()) {
                return Err(undeclared(complex));
            }
            if def.collection {
                EdmPropertyKind::ComplexCollection {
                    type_name: complex.clone(),
                }
            } else {
                EdmPropertyKind::Complex {
                    type_name: complex.clone(),
                }
            }
        }
        (None, Some(target)) => {
            if !entity_names.contains(&target.as_str()) {
                return Err(undeclared(target));
            }
            EdmPropertyKind::Navigation {
                target_type: target.clone(),
                is_collection: def.collection,
            }
        }
        _ => {
            return Err(EdmError::AmbiguousProperty {
                type_name: type_name.to_string(),
                property: def.name.clone(),
            })
        }
    };

    Ok(EdmProperty {
        name: def.name.clone(),
        kind,
    })
}

impl EdmModel for EdmCatalog {
    fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    fn property(&self, type_name: &str, property: &str) -> Option<&EdmProperty> {
        let mut current = Some(type_name);
        while let Some(name) = current {
            let entry = self.types.get(name)?;
            if let Some(found) = entry.properties.iter().find(|p| p.name == property) {
                return Some(found);
            }
            current = entry.base_type.as_deref();
        }
        None
    }

    fn qualified_type_name(&self, type_name: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, type_name),
            None => type_name.to_string(),
        }
    }
}
