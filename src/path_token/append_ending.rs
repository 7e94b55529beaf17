use super::{NonSystemToken, PathSegment, PathTokenError, SegmentOperation};

impl PathSegment {
    /// Attach `tail` after the terminal segment of this chain.
    ///
    /// A `None` tail hands the chain back unchanged. System segments are
    /// terminal, so appending to a chain rooted at (or ending in) one fails.
    pub fn append_ending(self, tail: Option<PathSegment>) -> Result<PathSegment, PathTokenError> {
        match self {
            PathSegment::System(token) => Err(PathTokenError::illegal_system(
                token.keyword,
                SegmentOperation::AppendEnding,
            )),
            PathSegment::NonSystem(token) => match tail {
                None => Ok(PathSegment::NonSystem(token)),
                Some(tail) => Ok(PathSegment::NonSystem(token.link_tail(tail)?)),
            },
        }
    }
}

impl NonSystemToken {
    fn link_tail(mut self, tail: PathSegment) -> Result<Self, PathTokenError> {
        let next = match self.next.take() {
            None => tail,
            Some(next) => match *next {
                PathSegment::System(token) => {
                    return Err(PathTokenError::illegal_system(
                        token.keyword,
                        SegmentOperation::AppendEnding,
                    ))
                }
                PathSegment::NonSystem(token) => PathSegment::NonSystem(token.link_tail(tail)?),
            },
        };
        self.next = Some(Box::new(next));
        Ok(self)
    }
}
