//! Edge table: how the engine discovers children.
//!
//! Lookup order for a node type's child edges:
//! 1. the caller-supplied override table,
//! 2. the built-in default table (unless disabled),
//! 3. the fallback policy: walk every edge the node actually carries, or
//!    reject the node type as unsupported.

use rustc_hash::FxHashMap;
use sable_ast::{default_edges, EdgeName, NodeType};
use thiserror::Error;

/// Traversal failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraverseError {
    /// A node type had no entry in the override or default tables and the
    /// fallback policy is [`FallbackPolicy::Reject`].
    #[error("no child edges known for node type {0:?} and fallback is disabled")]
    UnknownNodeType(NodeType),
}

/// What to do for a node type absent from both edge tables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Visit every child edge the node carries, in declaration order.
    OwnEdges,
    /// Halt the traversal with [`TraverseError::UnknownNodeType`].
    #[default]
    Reject,
}

/// Per-node-type child-edge configuration.
#[derive(Debug, Default, Clone)]
pub struct EdgeTable {
    overrides: FxHashMap<NodeType, Vec<EdgeName>>,
    defaults_disabled: bool,
    fallback: FallbackPolicy,
}

impl EdgeTable {
    /// Table with built-in defaults and no overrides.
    pub fn new() -> Self {
        EdgeTable::default()
    }

    /// Replace the edge order for one node type.
    pub fn with_override(mut self, ty: NodeType, edges: Vec<EdgeName>) -> Self {
        self.overrides.insert(ty, edges);
        self
    }

    /// Disable the built-in default table, leaving only overrides and the
    /// fallback policy.
    pub fn without_defaults(mut self) -> Self {
        self.defaults_disabled = true;
        self
    }

    /// Set the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Resolve the edge order for a node type.
    pub fn edges_for(&self, ty: NodeType) -> Result<&[EdgeName], TraverseError> {
        if let Some(edges) = self.overrides.get(&ty) {
            return Ok(edges);
        }
        if !self.defaults_disabled {
            return Ok(default_edges(ty));
        }
        match self.fallback {
            // The closed node union carries exactly its default edges, so
            // "own edges" and the built-in table coincide.
            FallbackPolicy::OwnEdges => Ok(default_edges(ty)),
            FallbackPolicy::Reject => Err(TraverseError::UnknownNodeType(ty)),
        }
    }
}
