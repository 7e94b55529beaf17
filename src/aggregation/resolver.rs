use crate::edm::{EdmModel, EdmProperty, EdmPropertyKind};

use super::errors::{AggregationError, TargetIssue};

pub(crate) enum ResolveFailure {
    Unknown { type_name: String, property: String },
    Issue(TargetIssue),
}

impl ResolveFailure {
    /// Map to the error for the given use, keeping unknown members distinct.
    pub(crate) fn into_error(
        self,
        wrap: impl FnOnce(TargetIssue) -> AggregationError,
    ) -> AggregationError {
        match self {
            ResolveFailure::Unknown {
                type_name,
                property,
            } => AggregationError::UnknownProperty {
                type_name,
                property,
            },
            ResolveFailure::Issue(issue) => wrap(issue),
        }
    }
}

/// Walk `path` from `root_type` and return the terminal member.
///
/// Navigations and complex members are traversed; collection-valued members
/// are rejected anywhere on the path.
pub(crate) fn resolve_path<'m>(
    model: &'m dyn EdmModel,
    root_type: &str,
    path: &[String],
) -> Result<&'m EdmProperty, ResolveFailure> {
    let mut current = root_type.to_string();
    let mut terminal = None;

    for (index, segment) in path.iter().enumerate() {
        let property =
            model
                .property(&current, segment)
                .ok_or_else(|| ResolveFailure::Unknown {
                    type_name: current.clone(),
                    property: segment.clone(),
                })?;

        if property.is_collection() {
            return Err(ResolveFailure::Issue(TargetIssue::CollectionValued {
                segment: segment.clone(),
            }));
        }

        if index + 1 < path.len() {
            current = property
                .traversal_type()
                .ok_or_else(|| {
                    ResolveFailure::Issue(TargetIssue::ThroughPrimitive {
                        segment: segment.clone(),
                    })
                })?
                .to_string();
        }
        terminal = Some(property);
    }

    terminal.ok_or_else(|| {
        ResolveFailure::Issue(TargetIssue::NotPrimitive {
            found: "an empty path".to_string(),
        })
    })
}

/// Human-readable kind of a non-primitive terminal, for diagnostics.
pub(crate) fn describe(property: &EdmProperty) -> String {
    match &property.kind {
        EdmPropertyKind::Primitive { ty, .. } => ty.to_string(),
        EdmPropertyKind::Complex { type_name } => format!("complex value `{}`", type_name),
        EdmPropertyKind::Navigation { target_type, .. } => {
            format!("entity reference `{}`", target_type)
        }
        EdmPropertyKind::PrimitiveCollection { ty } => format!("collection of {}", ty),
        EdmPropertyKind::ComplexCollection { type_name } => {
            format!("collection of `{}`", type_name)
        }
    }
}
