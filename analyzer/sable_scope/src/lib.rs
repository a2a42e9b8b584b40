//! Static scope and binding analysis.
//!
//! One pass over a [`sable_ast::Ast`] produces a [`ScopeManager`]: the
//! tree of lexical scopes, the variables each scope declares, and every
//! identifier occurrence resolved to its binding where resolution is
//! statically possible. Hoisting, shadowing, strict-mode propagation,
//! implicit globals, and the `with`/direct-`eval` escape hatches are all
//! modeled; see the module docs for the mechanics.
//!
//! ```
//! use sable_ast::{Ast, DeclarationKind, LiteralValue, NodeKind, Span};
//! use sable_scope::{analyze, AnalyzeOptions};
//!
//! // var answer = 42;
//! let mut ast = Ast::new();
//! let name = ast.intern("answer");
//! let id = ast.alloc(NodeKind::Identifier { name }, Span::new(4, 10));
//! let init = ast.alloc(
//!     NodeKind::Literal { value: LiteralValue::Number(42.0) },
//!     Span::new(13, 15),
//! );
//! let declarator = ast.alloc(
//!     NodeKind::VariableDeclarator { id, init: Some(init) },
//!     Span::new(4, 15),
//! );
//! let stmt = ast.alloc(
//!     NodeKind::VariableDeclaration {
//!         kind: DeclarationKind::Var,
//!         declarations: vec![declarator],
//!     },
//!     Span::new(0, 16),
//! );
//! let program = ast.alloc(NodeKind::Program { body: vec![stmt] }, Span::new(0, 16));
//!
//! let manager = analyze(&mut ast, program, &AnalyzeOptions::default())?;
//! let global = manager.scope(manager.global_scope());
//! assert_eq!(global.variables().len(), 1);
//! assert!(manager.unresolved_references().is_empty());
//! # Ok::<(), sable_scope::AnalyzeError>(())
//! ```

mod error;
mod hoist;
mod manager;
mod options;
mod pattern;
mod reference;
mod referencer;
mod scope;
mod variable;

pub use error::AnalyzeError;
pub use manager::ScopeManager;
pub use options::{AnalyzeOptions, DynamicScopePolicy, FeatureLevel, SourceKind};
pub use reference::{Access, Reference, ReferenceId};
pub use scope::{Scope, ScopeId, ScopeKind};
pub use variable::{Definition, DefinitionKind, Variable, VariableId};

// Edge configuration is part of the analysis options surface.
pub use sable_traverse::{EdgeTable, FallbackPolicy};

use sable_ast::{Ast, NodeId};
use sable_traverse::traverse;

use crate::referencer::Referencer;

/// Analyze the program rooted at `program`.
///
/// The tree's nodes are never modified; the mutable borrow only lets the
/// analysis intern the names of implicit bindings it may materialize.
pub fn analyze(
    ast: &mut Ast,
    program: NodeId,
    options: &AnalyzeOptions,
) -> Result<ScopeManager, AnalyzeError> {
    let arguments_name = ast.intern("arguments");
    let ast: &Ast = ast;

    let mut referencer = Referencer::new(ast, options, arguments_name);
    traverse(ast, program, &options.edges, &mut referencer)?;
    let mut manager = referencer.finish()?;
    if !options.optimistic() {
        manager.finalize_taint();
    }

    tracing::debug!(
        scopes = manager.scopes().count(),
        variables = manager.variables().count(),
        references = manager.references().count(),
        unresolved = manager.unresolved_references().len(),
        "scope analysis complete"
    );
    Ok(manager)
}
