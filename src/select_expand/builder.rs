//! Accumulates member-access chains into `$select` / `$expand` items.
//!
//! One builder serves one query translation. Chains are collected per root
//! scope; a chain is finalized explicitly by `start_new_chain`,
//! `push_root_scope`, `pop_root_scope`, `add_parsed_path` and `finish`.
//!
//! Destination rules for a finalized chain:
//! - one structural member → `$select` item `Name`
//! - one navigation → `$expand` item `Nav`
//! - anything longer → `$expand` item `Nav($expand=...($select=Leaf))`

use crate::config::TranslatorConfig;
use crate::path_token::PathSegment;

use super::errors::SelectExpandError;

/// Rendered `$select` and `$expand` items, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectExpandPaths {
    pub projection_paths: Vec<String>,
    pub expansion_paths: Vec<String>,
}

impl SelectExpandPaths {
    pub fn is_empty(&self) -> bool {
        self.projection_paths.is_empty() && self.expansion_paths.is_empty()
    }
}

#[derive(Debug, Clone)]
struct ChainStep {
    name: String,
    is_structural_property: bool,
}

#[derive(Debug)]
pub struct SelectExpandPathBuilder {
    max_depth: usize,
    root_scopes: Vec<String>,
    type_segment: Option<String>,
    current_chain: Vec<ChainStep>,
    paths: SelectExpandPaths,
}

impl SelectExpandPathBuilder {
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            max_depth: config.max_expand_depth as usize,
            root_scopes: Vec::new(),
            type_segment: None,
            current_chain: Vec::new(),
            paths: SelectExpandPaths::default(),
        }
    }

    /// Enter a new lambda-parameter scope. Finalized items are kept.
    pub fn push_root_scope(&mut self, root: impl Into<String>) -> Result<(), SelectExpandError> {
        self.finalize_chain()?;
        let root = root.into();
        log::debug!("select/expand: entering root scope `{}`", root);
        self.root_scopes.push(root);
        Ok(())
    }

    /// Leave the innermost root scope, returning its identity.
    pub fn pop_root_scope(&mut self) -> Result<Option<String>, SelectExpandError> {
        self.finalize_chain()?;
        Ok(self.root_scopes.pop())
    }

    pub fn current_root(&self) -> Option<&str> {
        self.root_scopes.last().map(|s| s.as_str())
    }

    /// Begin a new chain from the current root.
    pub fn start_new_chain(&mut self) -> Result<(), SelectExpandError> {
        self.finalize_chain()
    }

    /// Append one member access to the chain under construction.
    ///
    /// `cast_type` carries the qualified name of the declaring type when it is
    /// more specific than the root's static type. It becomes a leading
    /// `Type/` segment and is only accepted on the first step.
    pub fn append_step(
        &mut self,
        member: impl Into<String>,
        is_structural_property: bool,
        cast_type: Option<&str>,
    ) -> Result<(), SelectExpandError> {
        let member = member.into();

        if let Some(type_name) = cast_type {
            if !self.current_chain.is_empty() {
                return Err(SelectExpandError::TypeSegmentMidChain {
                    type_name: type_name.to_string(),
                    member,
                });
            }
            self.type_segment = Some(type_name.to_string());
        }

        if let Some(last) = self.current_chain.last() {
            if last.is_structural_property {
                return Err(SelectExpandError::StructuralTraversal {
                    member,
                    through: last.name.clone(),
                });
            }
        }

        if self.current_chain.len() + 1 > self.max_depth {
            let mut names: Vec<&str> = self.current_chain.iter().map(|s| s.name.as_str()).collect();
            names.push(&member);
            return Err(SelectExpandError::ExpandDepthExceeded {
                path: names.join("/"),
                depth: names.len(),
                max: self.max_depth,
            });
        }

        self.current_chain.push(ChainStep {
            name: member,
            is_structural_property,
        });
        Ok(())
    }

    /// Finalize the current chain and add an already-built path token chain.
    ///
    /// A trailing `*` is trimmed first, so `Nav/*` expands `Nav` in full.
    pub fn add_parsed_path(&mut self, path: PathSegment) -> Result<(), SelectExpandError> {
        self.finalize_chain()?;
        let path = path.trim_wildcard()?;
        if path.len() > self.max_depth {
            return Err(SelectExpandError::ExpandDepthExceeded {
                path: path.stringify()?,
                depth: path.len(),
                max: self.max_depth,
            });
        }
        let is_single_structural = match &path {
            PathSegment::NonSystem(token) => token.next.is_none() && token.is_structural_property,
            PathSegment::System(_) => false,
        };
        let rendered = path.stringify()?;
        self.record(rendered, is_single_structural);
        Ok(())
    }

    /// Finalize any pending chain and return the collected items.
    pub fn finish(mut self) -> Result<SelectExpandPaths, SelectExpandError> {
        self.finalize_chain()?;
        Ok(self.paths)
    }

    fn finalize_chain(&mut self) -> Result<(), SelectExpandError> {
        let steps = std::mem::take(&mut self.current_chain);
        let type_segment = self.type_segment.take();

        let is_single_structural = steps.len() == 1 && steps[0].is_structural_property;
        let Some(chain) = PathSegment::from_steps(
            steps
                .into_iter()
                .map(|step| (step.name, step.is_structural_property)),
        ) else {
            return Ok(());
        };

        let mut rendered = chain.stringify()?;
        if let Some(type_name) = type_segment {
            rendered = format!("{}/{}", type_name, rendered);
        }
        self.record(rendered, is_single_structural);
        Ok(())
    }

    fn record(&mut self, rendered: String, is_single_structural: bool) {
        let (target, option) = if is_single_structural {
            (&mut self.paths.projection_paths, "$select")
        } else {
            (&mut self.paths.expansion_paths, "$expand")
        };
        if target.contains(&rendered) {
            log::debug!("select/expand: `{}` already in {}", rendered, option);
            return;
        }
        log::debug!(
            "select/expand: root `{}` adds `{}` to {}",
            self.root_scopes.last().map(|s| s.as_str()).unwrap_or("<none>"),
            rendered,
            option
        );
        target.push(rendered);
    }
}
