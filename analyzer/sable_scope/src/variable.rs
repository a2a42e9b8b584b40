//! Declared name records.

use sable_ast::{DeclarationKind, Name, NodeId};
use std::fmt;

use crate::{ReferenceId, ScopeId};

/// Index into the variable arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct VariableId(u32);

impl VariableId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        VariableId(index)
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

impl fmt::Debug for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VariableId({})", self.0)
    }
}

/// What kind of syntax declared a binding occurrence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// A function parameter.
    Parameter,
    /// A function declaration or function expression name.
    FunctionName,
    /// A class declaration or class expression name.
    ClassName,
    /// A catch clause parameter.
    CatchParameter,
    /// A declarator in a `var`/`let`/`const` declaration.
    Variable(DeclarationKind),
    /// A binding introduced by an import specifier.
    ImportBinding,
    /// A global binding synthesized from an unresolved write.
    ImplicitGlobal,
}

/// One declaring occurrence of a variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    /// The declaring identifier node.
    pub name: NodeId,
    /// The declaring syntax (declarator, function, class, catch clause,
    /// import specifier; the write target for implicit globals).
    pub node: NodeId,
    /// The enclosing declaration construct, where one exists (e.g. the
    /// variable declaration statement around a declarator).
    pub parent: Option<NodeId>,
}

/// A declared name, owned by exactly one scope.
///
/// The implicit `arguments` binding of a function scope has no declaring
/// identifiers and no definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub(crate) name: Name,
    pub(crate) scope: ScopeId,
    pub(crate) identifiers: Vec<NodeId>,
    pub(crate) defs: Vec<Definition>,
    pub(crate) references: Vec<ReferenceId>,
}

impl Variable {
    pub(crate) fn new(name: Name, scope: ScopeId) -> Self {
        Variable {
            name,
            scope,
            identifiers: Vec::new(),
            defs: Vec::new(),
            references: Vec::new(),
        }
    }

    /// The interned name.
    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    /// The scope that owns this variable.
    #[inline]
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Identifier nodes that declare this variable, in encounter order.
    #[inline]
    pub fn identifiers(&self) -> &[NodeId] {
        &self.identifiers
    }

    /// Declaring occurrences, in encounter order.
    #[inline]
    pub fn defs(&self) -> &[Definition] {
        &self.defs
    }

    /// References resolved to this variable, in resolution order.
    #[inline]
    pub fn references(&self) -> &[ReferenceId] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_accumulate_in_order() {
        let mut var = Variable::new(Name::from_raw(0), ScopeId::new(0));
        for (i, kind) in [
            DefinitionKind::FunctionName,
            DefinitionKind::Variable(DeclarationKind::Var),
        ]
        .into_iter()
        .enumerate()
        {
            let name = NodeId::new(u32::try_from(i).unwrap_or(0));
            var.identifiers.push(name);
            var.defs.push(Definition {
                kind,
                name,
                node: name,
                parent: None,
            });
        }

        assert_eq!(var.defs().len(), 2);
        assert_eq!(var.defs()[0].kind, DefinitionKind::FunctionName);
        assert_eq!(
            var.defs()[1].kind,
            DefinitionKind::Variable(DeclarationKind::Var)
        );
        assert_eq!(var.identifiers().len(), 2);
    }
}
