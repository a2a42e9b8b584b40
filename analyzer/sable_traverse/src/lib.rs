//! sable_traverse - Iterative Tree Traversal Engine
//!
//! A generic, stack-based depth-first walker over [`sable_ast`] trees with
//! enter/leave callbacks, per-call skip-children and abort signals, and a
//! per-node-type child-edge table with override and fallback policy.
//!
//! # Example
//!
//! ```
//! use sable_ast::{Ast, LiteralValue, NodeKind, Span};
//! use sable_traverse::{traverse, EdgeTable, Flow, Outcome, Visitor};
//!
//! struct CountNodes {
//!     count: usize,
//! }
//!
//! impl Visitor for CountNodes {
//!     fn enter(&mut self, _node: sable_ast::NodeId, _ast: &Ast) -> Flow {
//!         self.count += 1;
//!         Flow::Continue
//!     }
//! }
//!
//! let mut ast = Ast::new();
//! let lit = ast.alloc(
//!     NodeKind::Literal { value: LiteralValue::Number(1.0) },
//!     Span::DUMMY,
//! );
//! let stmt = ast.alloc(NodeKind::ExpressionStatement { expression: lit }, Span::DUMMY);
//! let program = ast.alloc(NodeKind::Program { body: vec![stmt] }, Span::DUMMY);
//!
//! let mut counter = CountNodes { count: 0 };
//! let outcome = traverse(&ast, program, &EdgeTable::new(), &mut counter);
//! assert_eq!(outcome, Ok(Outcome::Complete));
//! assert_eq!(counter.count, 3);
//! ```

mod table;
mod walk;

pub use table::{EdgeTable, FallbackPolicy, TraverseError};
pub use walk::{traverse, Flow, Outcome, Visitor};
