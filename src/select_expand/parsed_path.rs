use crate::config::TranslatorConfig;
use crate::edm::EdmModel;
use crate::path_token::{PathSegment, WILDCARD};

use super::errors::SelectExpandError;

/// Parse a textual `Nav/Nav/Leaf` select path into a token chain.
///
/// Structural flags come from the EDM, walking from `root_type`. A leading
/// range-variable keyword becomes a system segment, which cannot be
/// extended; `*` is accepted as a structural wildcard.
pub fn parse_select_path(
    text: &str,
    root_type: &str,
    model: &dyn EdmModel,
    config: &TranslatorConfig,
) -> Result<PathSegment, SelectExpandError> {
    let mut chain: Option<PathSegment> = None;
    let mut current_type: Option<String> = Some(root_type.to_string());
    let mut previous: Option<&str> = None;
    let mut previous_structural = false;

    for (index, segment) in text.split('/').enumerate() {
        if segment.is_empty() {
            return Err(SelectExpandError::EmptySegment(text.to_string()));
        }
        // Same rule as `SelectExpandPathBuilder::append_step`: only the last step may be structural.
        if previous_structural {
            return Err(SelectExpandError::StructuralTraversal {
                member: segment.to_string(),
                through: previous.unwrap_or_default().to_string(),
            });
        }

        let token = if index == 0 && segment == config.range_variable {
            PathSegment::system(segment)
        } else if segment == WILDCARD {
            PathSegment::non_system(WILDCARD, true)
        } else {
            let Some(type_name) = current_type.as_deref() else {
                return Err(SelectExpandError::StructuralTraversal {
                    member: segment.to_string(),
                    through: previous.unwrap_or_default().to_string(),
                });
            };
            let property = model.property(type_name, segment).ok_or_else(|| {
                SelectExpandError::UnknownProperty {
                    type_name: type_name.to_string(),
                    property: segment.to_string(),
                }
            })?;
            current_type = property.traversal_type().map(|t| t.to_string());
            PathSegment::non_system(segment, property.is_structural())
        };
        previous_structural = match &token {
            PathSegment::NonSystem(parsed) => parsed.is_structural_property,
            PathSegment::System(_) => false,
        };

        chain = Some(match chain {
            None => token,
            Some(chain) => chain.append_ending(Some(token))?,
        });
        previous = Some(segment);
    }

    chain.ok_or_else(|| SelectExpandError::EmptySegment(text.to_string()))
}
