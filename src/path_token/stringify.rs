use super::{NonSystemToken, PathSegment, PathTokenError, SegmentOperation};

impl PathSegment {
    /// Render the chain in `$select`/`$expand` item syntax.
    ///
    /// - `A` → `A`
    /// - `A/B` with structural leaf `B` → `A($select=B)`
    /// - `A/B/...` otherwise → `A($expand=B...)`, recursively
    ///
    /// Only the last segment may pick `$select`; every segment before it is
    /// traversed and therefore expanded. This is the same shape the
    /// select/expand builder produces.
    pub fn stringify(&self) -> Result<String, PathTokenError> {
        match self {
            PathSegment::System(token) => Err(PathTokenError::illegal_system(
                token.keyword.clone(),
                SegmentOperation::Stringify,
            )),
            PathSegment::NonSystem(token) => token.render(),
        }
    }
}

impl NonSystemToken {
    fn render(&self) -> Result<String, PathTokenError> {
        match self.next.as_deref() {
            None => Ok(self.name.clone()),
            Some(PathSegment::System(token)) => Err(PathTokenError::illegal_system(
                token.keyword.clone(),
                SegmentOperation::Stringify,
            )),
            Some(PathSegment::NonSystem(next)) => {
                let option = if next.next.is_none() && next.is_structural_property {
                    "$select"
                } else {
                    "$expand"
                };
                Ok(format!("{}({}={})", self.name, option, next.render()?))
            }
        }
    }
}
