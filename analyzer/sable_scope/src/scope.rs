//! The scope tree.
//!
//! Scopes are arena-allocated in the [`ScopeManager`](crate::ScopeManager)
//! and linked by [`ScopeId`] handles: `upper`, `variable_scope`, and
//! `child_scopes` are indices, never owning references, so the graph has
//! no cycles to manage.

use rustc_hash::FxHashMap;
use sable_ast::{Name, NodeId};
use std::fmt;

use crate::{ReferenceId, VariableId};

/// Index into the scope arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ScopeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

/// The kind of lexical environment a scope models.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Module,
    Function,
    /// The extra innermost scope holding a named function expression's own
    /// name, visible only inside the function.
    FunctionExpressionName,
    Block,
    Switch,
    Catch,
    With,
    For,
    Class,
    ClassFieldInitializer,
    ClassStaticBlock,
}

impl ScopeKind {
    /// Whether scopes of this kind host `var`-kind and function-declaration
    /// bindings.
    #[inline]
    pub const fn is_variable_scope(self) -> bool {
        matches!(
            self,
            ScopeKind::Global
                | ScopeKind::Module
                | ScopeKind::Function
                | ScopeKind::ClassFieldInitializer
                | ScopeKind::ClassStaticBlock
        )
    }

    /// Whether taint stops at scopes of this kind instead of crossing into
    /// them. Function bodies insulate their contents from an enclosing
    /// dynamic-scope construct.
    #[inline]
    pub(crate) const fn is_taint_boundary(self) -> bool {
        matches!(
            self,
            ScopeKind::Function | ScopeKind::ClassFieldInitializer | ScopeKind::ClassStaticBlock
        )
    }
}

/// One lexical environment.
#[derive(Debug, Clone)]
pub struct Scope {
    pub(crate) kind: ScopeKind,
    pub(crate) block: NodeId,
    pub(crate) upper: Option<ScopeId>,
    pub(crate) variable_scope: ScopeId,
    pub(crate) variables: Vec<VariableId>,
    pub(crate) names: FxHashMap<Name, VariableId>,
    pub(crate) references: Vec<ReferenceId>,
    pub(crate) through: Vec<ReferenceId>,
    pub(crate) child_scopes: Vec<ScopeId>,
    pub(crate) is_strict: bool,
    pub(crate) tainted: bool,
}

impl Scope {
    /// The scope's kind.
    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// The syntax node that opens this scope.
    #[inline]
    pub fn block(&self) -> NodeId {
        self.block
    }

    /// The parent scope; `None` only for the global scope.
    #[inline]
    pub fn upper(&self) -> Option<ScopeId> {
        self.upper
    }

    /// The nearest ancestor-or-self scope that hosts `var`-kind bindings.
    #[inline]
    pub fn variable_scope(&self) -> ScopeId {
        self.variable_scope
    }

    /// Variables owned by this scope, in declaration (insertion) order.
    #[inline]
    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    /// Look up an owned variable by name.
    #[inline]
    pub fn variable_by_name(&self, name: Name) -> Option<VariableId> {
        self.names.get(&name).copied()
    }

    /// References created while this scope was open, in encounter order.
    #[inline]
    pub fn references(&self) -> &[ReferenceId] {
        &self.references
    }

    /// References that could not be resolved here. For inner scopes these
    /// have been propagated upward on close; on the global scope, the
    /// permanently unresolved reads remain.
    #[inline]
    pub fn through(&self) -> &[ReferenceId] {
        &self.through
    }

    /// Child scopes, in creation order.
    #[inline]
    pub fn child_scopes(&self) -> &[ScopeId] {
        &self.child_scopes
    }

    /// Whether code in this scope is strict.
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.is_strict
    }

    /// Whether a dynamic-scope construct affects this scope.
    #[inline]
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }
}
