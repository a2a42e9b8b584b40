//! Arena-owning analysis result.
//!
//! All scopes, variables, and references live in flat `Vec` arenas here and
//! point at each other through id newtypes. The builder mutates the arenas
//! while the tree walk is in flight; once [`analyze`](crate::analyze)
//! returns, the manager is immutable.

use rustc_hash::FxHashMap;
use sable_ast::{Name, NodeId};
use smallvec::SmallVec;

use crate::reference::{Access, Reference, ReferenceId};
use crate::scope::{Scope, ScopeId, ScopeKind};
use crate::variable::{Definition, DefinitionKind, Variable, VariableId};

/// The result of one analysis run.
#[derive(Debug)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
    variables: Vec<Variable>,
    references: Vec<Reference>,
    /// Scopes opened by each block node, in creation order. Most nodes open
    /// at most one scope; functions with a name scope open two.
    node_scopes: FxHashMap<NodeId, SmallVec<[ScopeId; 2]>>,
    /// Variables declared by each declaring node (declarator, declaration
    /// statement, function, class, catch clause, import declaration).
    declared: FxHashMap<NodeId, Vec<VariableId>>,
    /// Reads that resolved nowhere, not even as implicit globals.
    unresolved: Vec<ReferenceId>,
}

impl ScopeManager {
    pub(crate) fn new() -> Self {
        ScopeManager {
            scopes: Vec::new(),
            variables: Vec::new(),
            references: Vec::new(),
            node_scopes: FxHashMap::default(),
            declared: FxHashMap::default(),
            unresolved: Vec::new(),
        }
    }

    /// All scopes, in creation (pre-order) order. The global scope is
    /// always first.
    #[inline]
    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, s)| (ScopeId::new(i as u32), s))
    }

    /// The outermost scope.
    #[inline]
    pub fn global_scope(&self) -> ScopeId {
        ScopeId::new(0)
    }

    /// All variables, in creation order.
    #[inline]
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| (VariableId::new(i as u32), v))
    }

    /// All references, in encounter order.
    #[inline]
    pub fn references(&self) -> impl Iterator<Item = (ReferenceId, &Reference)> {
        self.references
            .iter()
            .enumerate()
            .map(|(i, r)| (ReferenceId::new(i as u32), r))
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    #[inline]
    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    #[inline]
    pub fn reference(&self, id: ReferenceId) -> &Reference {
        &self.references[id.index()]
    }

    /// The scope a block node opens. With `inner` set, the innermost scope
    /// opened by the node (the function scope of a named function
    /// expression rather than its name scope); otherwise the outermost.
    pub fn acquire(&self, node: NodeId, inner: bool) -> Option<ScopeId> {
        let opened = self.node_scopes.get(&node)?;
        if inner {
            opened.last().copied()
        } else {
            opened.first().copied()
        }
    }

    /// Variables declared by a declaring node. Both the individual
    /// declarator and its enclosing declaration statement answer here.
    pub fn declared_variables(&self, node: NodeId) -> &[VariableId] {
        self.declared.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Reads that resolved to no binding anywhere, in encounter order.
    #[inline]
    pub fn unresolved_references(&self) -> &[ReferenceId] {
        &self.unresolved
    }

    // --- construction, driven by the referencer ---

    pub(crate) fn create_scope(
        &mut self,
        kind: ScopeKind,
        block: NodeId,
        upper: Option<ScopeId>,
        is_strict: bool,
    ) -> ScopeId {
        let id = ScopeId::new(self.scopes.len() as u32);
        let variable_scope = if kind.is_variable_scope() {
            id
        } else {
            // upper is None only for the global scope, which is a variable
            // scope itself.
            upper.map_or(id, |up| self.scopes[up.index()].variable_scope)
        };
        self.scopes.push(Scope {
            kind,
            block,
            upper,
            variable_scope,
            variables: Vec::new(),
            names: FxHashMap::default(),
            references: Vec::new(),
            through: Vec::new(),
            child_scopes: Vec::new(),
            is_strict,
            tainted: false,
        });
        if let Some(up) = upper {
            self.scopes[up.index()].child_scopes.push(id);
        }
        self.node_scopes.entry(block).or_default().push(id);
        tracing::trace!(?kind, scope = id.raw(), strict = is_strict, "open scope");
        id
    }

    pub(crate) fn taint_scope(&mut self, scope: ScopeId) {
        self.scopes[scope.index()].tainted = true;
    }

    /// Record one declaring occurrence, creating the variable on first
    /// sight of the name in `scope`.
    pub(crate) fn define(&mut self, scope: ScopeId, name: Name, def: Definition) -> VariableId {
        let var = self.find_or_create(scope, name);
        self.variables[var.index()].identifiers.push(def.name);
        self.declared.entry(def.node).or_default().push(var);
        if let Some(parent) = def.parent {
            self.declared.entry(parent).or_default().push(var);
        }
        self.variables[var.index()].defs.push(def);
        var
    }

    /// Materialize a binding with no declaring syntax (`arguments`).
    pub(crate) fn define_implicit(&mut self, scope: ScopeId, name: Name) -> VariableId {
        self.find_or_create(scope, name)
    }

    fn find_or_create(&mut self, scope: ScopeId, name: Name) -> VariableId {
        if let Some(&existing) = self.scopes[scope.index()].names.get(&name) {
            return existing;
        }
        let var = VariableId::new(self.variables.len() as u32);
        self.variables.push(Variable::new(name, scope));
        let slot = &mut self.scopes[scope.index()];
        slot.variables.push(var);
        slot.names.insert(name, var);
        var
    }

    /// Record an identifier occurrence and resolve it eagerly against the
    /// open scope chain. Misses land on the current scope's `through` list
    /// and ride upward as scopes close.
    pub(crate) fn add_reference(
        &mut self,
        scope: ScopeId,
        name: Name,
        identifier: NodeId,
        access: Access,
        init: bool,
    ) -> ReferenceId {
        let id = ReferenceId::new(self.references.len() as u32);
        let mut reference = Reference::new(identifier, scope, access, init);

        let mut cursor = Some(scope);
        while let Some(at) = cursor {
            if let Some(&var) = self.scopes[at.index()].names.get(&name) {
                reference.resolved = Some(var);
                self.variables[var.index()].references.push(id);
                break;
            }
            cursor = self.scopes[at.index()].upper;
        }

        self.references.push(reference);
        if self.references[id.index()].resolved.is_none() {
            self.scopes[scope.index()].through.push(id);
        }
        self.scopes[scope.index()].references.push(id);
        id
    }

    /// Close an inner scope: whatever it could not resolve becomes the
    /// upper scope's problem.
    pub(crate) fn close_scope(&mut self, scope: ScopeId) -> Option<ScopeId> {
        let upper = self.scopes[scope.index()].upper;
        if let Some(up) = upper {
            let pending = std::mem::take(&mut self.scopes[scope.index()].through);
            tracing::trace!(scope = scope.raw(), pending = pending.len(), "close scope");
            self.scopes[up.index()].through.extend(pending);
        }
        upper
    }

    /// Close the global scope. Unresolved writes synthesize implicit
    /// global variables; what still resolves nowhere after that is
    /// retained as permanently unresolved reads.
    pub(crate) fn close_global(&mut self, global: ScopeId, ast: &sable_ast::Ast) {
        let pending = std::mem::take(&mut self.scopes[global.index()].through);

        for &reference in &pending {
            if !self.references[reference.index()].is_write() {
                continue;
            }
            let identifier = self.references[reference.index()].identifier;
            let Some(name) = ast.kind(identifier).as_identifier() else {
                continue;
            };
            self.define(
                global,
                name,
                Definition {
                    kind: DefinitionKind::ImplicitGlobal,
                    name: identifier,
                    node: identifier,
                    parent: None,
                },
            );
        }

        let mut retained = Vec::new();
        for reference in pending {
            let identifier = self.references[reference.index()].identifier;
            let resolved = ast
                .kind(identifier)
                .as_identifier()
                .and_then(|name| self.scopes[global.index()].names.get(&name).copied());
            match resolved {
                Some(var) => {
                    self.references[reference.index()].resolved = Some(var);
                    self.variables[var.index()].references.push(reference);
                }
                None => retained.push(reference),
            }
        }
        tracing::trace!(retained = retained.len(), "close global scope");
        self.unresolved.clone_from(&retained);
        self.scopes[global.index()].through = retained;
    }

    /// Propagate taint down the scope tree and onto references. Creation
    /// order is pre-order, so each scope's upper is finalized before it.
    pub(crate) fn finalize_taint(&mut self) {
        for i in 0..self.scopes.len() {
            let inherited = match self.scopes[i].upper {
                Some(up) if !self.scopes[i].kind.is_taint_boundary() => {
                    self.scopes[up.index()].tainted
                }
                _ => false,
            };
            if inherited {
                self.scopes[i].tainted = true;
            }
            if self.scopes[i].tainted {
                let refs = std::mem::take(&mut self.scopes[i].references);
                for &r in &refs {
                    self.references[r.index()].tainted = true;
                }
                self.scopes[i].references = refs;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_ast::{Ast, NodeKind, Span};

    fn ident(ast: &mut Ast, text: &str) -> NodeId {
        let name = ast.intern(text);
        ast.alloc(NodeKind::Identifier { name }, Span::DUMMY)
    }

    #[test]
    fn eager_resolution_walks_the_open_chain() {
        let mut ast = Ast::new();
        let block = ast.alloc(NodeKind::Program { body: Vec::new() }, Span::DUMMY);
        let decl = ident(&mut ast, "x");
        let usage = ident(&mut ast, "x");
        let name = ast.intern("x");

        let mut mgr = ScopeManager::new();
        let global = mgr.create_scope(ScopeKind::Global, block, None, false);
        let var = mgr.define(
            global,
            name,
            Definition {
                kind: DefinitionKind::Variable(sable_ast::DeclarationKind::Var),
                name: decl,
                node: decl,
                parent: None,
            },
        );
        let inner = mgr.create_scope(ScopeKind::Block, block, Some(global), false);
        let r = mgr.add_reference(inner, name, usage, Access::READ, false);

        assert_eq!(mgr.reference(r).resolved(), Some(var));
        assert_eq!(mgr.variable(var).references(), &[r]);
        assert!(mgr.scope(inner).through().is_empty());
    }

    #[test]
    fn misses_propagate_upward_on_close() {
        let mut ast = Ast::new();
        let block = ast.alloc(NodeKind::Program { body: Vec::new() }, Span::DUMMY);
        let usage = ident(&mut ast, "ghost");
        let name = ast.intern("ghost");

        let mut mgr = ScopeManager::new();
        let global = mgr.create_scope(ScopeKind::Global, block, None, false);
        let inner = mgr.create_scope(ScopeKind::Block, block, Some(global), false);
        let r = mgr.add_reference(inner, name, usage, Access::READ, false);

        assert_eq!(mgr.scope(inner).through(), &[r]);
        assert_eq!(mgr.close_scope(inner), Some(global));
        assert!(mgr.scope(inner).through().is_empty());
        assert_eq!(mgr.scope(global).through(), &[r]);

        mgr.close_global(global, &ast);
        assert_eq!(mgr.unresolved_references(), &[r]);
        assert_eq!(mgr.reference(r).resolved(), None);
    }

    #[test]
    fn unresolved_writes_become_implicit_globals() {
        let mut ast = Ast::new();
        let block = ast.alloc(NodeKind::Program { body: Vec::new() }, Span::DUMMY);
        let write = ident(&mut ast, "leaked");
        let read = ident(&mut ast, "leaked");
        let name = ast.intern("leaked");

        let mut mgr = ScopeManager::new();
        let global = mgr.create_scope(ScopeKind::Global, block, None, false);
        let w = mgr.add_reference(global, name, write, Access::WRITE, false);
        let r = mgr.add_reference(global, name, read, Access::READ, false);
        mgr.close_global(global, &ast);

        let var = mgr.reference(w).resolved();
        assert!(var.is_some());
        assert_eq!(mgr.reference(r).resolved(), var);
        assert!(mgr.unresolved_references().is_empty());

        let Some(var) = var else { return };
        assert_eq!(mgr.variable(var).defs().len(), 1);
        assert_eq!(
            mgr.variable(var).defs()[0].kind,
            DefinitionKind::ImplicitGlobal
        );
    }

    #[test]
    fn taint_stops_at_function_boundaries() {
        let mut ast = Ast::new();
        let block = ast.alloc(NodeKind::Program { body: Vec::new() }, Span::DUMMY);

        let mut mgr = ScopeManager::new();
        let global = mgr.create_scope(ScopeKind::Global, block, None, false);
        let with = mgr.create_scope(ScopeKind::With, block, Some(global), false);
        mgr.taint_scope(with);
        let inner_block = mgr.create_scope(ScopeKind::Block, block, Some(with), false);
        let func = mgr.create_scope(ScopeKind::Function, block, Some(inner_block), false);

        mgr.finalize_taint();
        assert!(!mgr.scope(global).is_tainted());
        assert!(mgr.scope(with).is_tainted());
        assert!(mgr.scope(inner_block).is_tainted());
        assert!(!mgr.scope(func).is_tainted());
    }
}
