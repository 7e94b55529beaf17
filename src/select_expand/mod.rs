//! `$select` / `$expand` path construction
//!
//! Two discovery mechanisms feed the same item sets: member-access chains
//! reported step by step (`SelectExpandPathBuilder::append_step`) and textual
//! paths parsed into token chains (`parse_select_path`). Both render through
//! `PathSegment::stringify`, so equal inputs give equal items.

mod builder;
mod errors;
mod parsed_path;

pub use builder::{SelectExpandPathBuilder, SelectExpandPaths};
pub use errors::SelectExpandError;
pub use parsed_path::parse_select_path;
