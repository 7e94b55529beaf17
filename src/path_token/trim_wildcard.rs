use super::{NonSystemToken, PathSegment, PathTokenError, SegmentOperation, WILDCARD};

impl PathSegment {
    /// Drop a trailing `*` segment, making its predecessor the new terminal.
    ///
    /// Chains without a trailing wildcard, including a lone `*` which has no
    /// predecessor to fall back to, come back unchanged.
    pub fn trim_wildcard(self) -> Result<PathSegment, PathTokenError> {
        match self {
            PathSegment::System(token) => Err(PathTokenError::illegal_system(
                token.keyword,
                SegmentOperation::TrimWildcard,
            )),
            PathSegment::NonSystem(token) => Ok(PathSegment::NonSystem(token.trim_wildcard())),
        }
    }
}

impl NonSystemToken {
    fn trim_wildcard(mut self) -> Self {
        self.next = match self.next.take().map(|next| *next) {
            Some(PathSegment::NonSystem(next)) if next.next.is_none() && next.name == WILDCARD => {
                None
            }
            Some(PathSegment::NonSystem(next)) => {
                Some(Box::new(PathSegment::NonSystem(next.trim_wildcard())))
            }
            other => other.map(Box::new),
        };
        self
    }
}
