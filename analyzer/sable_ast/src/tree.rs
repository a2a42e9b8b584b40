//! The node arena.
//!
//! All nodes of one syntax tree live in a single `Vec`, addressed by
//! [`NodeId`]. The arena also owns the interner for identifier names and
//! string literal values, so a whole tree is two contiguous allocations
//! plus per-node child lists.

use crate::{Name, Node, NodeId, NodeKind, NodeType, Span, StringInterner};

/// An arena-allocated syntax tree.
#[derive(Debug, Default, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl Ast {
    /// Create an empty tree.
    pub fn new() -> Self {
        Ast::default()
    }

    /// Allocate a node, returning its handle.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node::new(kind, span));
        id
    }

    /// Get a node.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a node's kind.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    /// Get a node's type tag.
    #[inline]
    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.get(id).kind.node_type()
    }

    /// Get a node's span.
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).span
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Intern an identifier or string value.
    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Look up an interned string without interning it.
    pub fn lookup(&self, s: &str) -> Option<Name> {
        self.interner.get(s)
    }

    /// Resolve an interned name back to its text.
    pub fn resolve(&self, name: Name) -> &str {
        self.interner.resolve(name)
    }
}
