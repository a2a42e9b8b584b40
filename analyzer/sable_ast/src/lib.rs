//! sable_ast - Syntax Tree Data Model
//!
//! This crate contains the input-side data structures for the sable scope
//! analyzer:
//! - [`Span`] for source locations
//! - [`Name`] / [`StringInterner`] for interned identifiers
//! - [`Node`] / [`NodeKind`] / [`NodeType`], the closed tagged union of
//!   syntax constructs, arena-allocated in [`Ast`] and addressed by
//!   [`NodeId`] handles
//! - the child-edge model ([`EdgeName`], [`Edge`], [`default_edges`])
//!   through which traversal discovers children
//!
//! # Design
//!
//! - **Intern everything**: identifier text becomes `Name(u32)`, so name
//!   comparison during resolution is an integer compare.
//! - **Flatten everything**: no `Box<Node>`; children are `NodeId(u32)`
//!   indices into the arena, so the tree has no ownership cycles and no
//!   parent back-links for traversal to trip over.

mod edges;
mod interner;
mod name;
mod node;
mod span;
mod tree;

pub use edges::{default_edges, Edge, EdgeName};
pub use interner::StringInterner;
pub use name::Name;
pub use node::{
    AssignOp, BinaryOp, DeclarationKind, LiteralValue, LogicalOp, Node, NodeId, NodeKind,
    NodeType, UnaryOp, UpdateOp,
};
pub use span::Span;
pub use tree::Ast;
