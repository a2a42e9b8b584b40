//! The scope-building visitor.
//!
//! One depth-first pass drives everything. Entering a scope-introducing
//! node opens its scope and pre-registers every binding the scope owns
//! (see [`crate::hoist`]); identifier occurrences then resolve eagerly
//! against the open chain. Leaving a node closes whatever scopes it
//! opened, handing unresolved references upward.
//!
//! Declaring identifiers must not be visited as references, and a few
//! constructs evaluate a leading child in the scope *around* the one their
//! node opens (switch discriminants, `with` objects, computed class-field
//! keys). Both are handled within the single iterative walk:
//! [`Flow::Descend`] substitutes an explicit child list, and a deferred
//! scope open fires when the leading child is left, so the engine never
//! re-enters itself.

use sable_ast::{Ast, Name, NodeId, NodeKind};
use sable_traverse::{Flow, Visitor};
use smallvec::{smallvec, SmallVec};

use crate::error::AnalyzeError;
use crate::hoist::{references_arguments, register_hoisted, register_imports, register_lexical};
use crate::manager::ScopeManager;
use crate::options::{AnalyzeOptions, SourceKind};
use crate::pattern::{walk_pattern, PatternElement};
use crate::reference::Access;
use crate::scope::{ScopeId, ScopeKind};
use crate::variable::{Definition, DefinitionKind};

/// A scope open postponed until a leading child, which evaluates in the
/// enclosing scope, has been fully visited.
struct Deferred {
    after: NodeId,
    open: DeferredOpen,
}

enum DeferredOpen {
    /// Switch scope for the statement, past its discriminant.
    Switch { statement: NodeId },
    /// With scope for the statement, past its object.
    With { statement: NodeId },
    /// Field initializer scope whose block is the value node, past the
    /// computed key.
    FieldInitializer { value: NodeId },
}

pub(crate) struct Referencer<'a> {
    ast: &'a Ast,
    options: &'a AnalyzeOptions,
    mgr: ScopeManager,
    current: Option<ScopeId>,
    deferred: Vec<Deferred>,
    fatal: Option<AnalyzeError>,
    arguments_name: Name,
    eval_name: Option<Name>,
    use_strict: Option<Name>,
}

impl<'a> Referencer<'a> {
    pub(crate) fn new(ast: &'a Ast, options: &'a AnalyzeOptions, arguments_name: Name) -> Self {
        Referencer {
            ast,
            options,
            mgr: ScopeManager::new(),
            current: None,
            deferred: Vec::new(),
            fatal: None,
            arguments_name,
            eval_name: ast.lookup("eval"),
            use_strict: ast.lookup("use strict"),
        }
    }

    pub(crate) fn finish(self) -> Result<ScopeManager, AnalyzeError> {
        if let Some(fatal) = self.fatal {
            return Err(fatal);
        }
        if self.current.is_some() || !self.deferred.is_empty() {
            return Err(AnalyzeError::Internal("a scope was left open after traversal"));
        }
        Ok(self.mgr)
    }

    fn fail(&mut self, message: &'static str) -> Flow {
        if self.fatal.is_none() {
            self.fatal = Some(AnalyzeError::Internal(message));
        }
        Flow::Break
    }

    fn open(&mut self, kind: ScopeKind, block: NodeId, is_strict: bool) -> ScopeId {
        let id = self.mgr.create_scope(kind, block, self.current, is_strict);
        self.current = Some(id);
        id
    }

    fn inherited_strict(&self) -> bool {
        self.current
            .is_some_and(|scope| self.mgr.scope(scope).is_strict())
    }

    /// Whether a statement list begins with a `"use strict"` directive.
    fn has_use_strict(&self, stmts: &[NodeId]) -> bool {
        let Some(target) = self.use_strict else {
            return false;
        };
        for &stmt in stmts {
            let NodeKind::ExpressionStatement { expression } = self.ast.kind(stmt) else {
                return false;
            };
            match self.ast.kind(*expression) {
                NodeKind::Literal { value: sable_ast::LiteralValue::String(s) } => {
                    if *s == target {
                        return true;
                    }
                }
                _ => return false,
            }
        }
        false
    }

    /// Perform a scope open that was deferred past a leading child.
    fn open_deferred(&mut self, open: DeferredOpen) {
        let ast = self.ast;
        match open {
            DeferredOpen::Switch { statement } => {
                let switch = self.open(ScopeKind::Switch, statement, self.inherited_strict());
                if let NodeKind::SwitchStatement { cases, .. } = ast.kind(statement) {
                    for &case in cases {
                        if let NodeKind::SwitchCase { consequent, .. } = ast.kind(case) {
                            register_lexical(&mut self.mgr, ast, switch, consequent);
                        }
                    }
                }
            }
            DeferredOpen::With { statement } => {
                let with = self.open(ScopeKind::With, statement, self.inherited_strict());
                if !self.options.optimistic() {
                    self.mgr.taint_scope(with);
                }
            }
            DeferredOpen::FieldInitializer { value } => {
                self.open(ScopeKind::ClassFieldInitializer, value, true);
            }
        }
    }

    /// Register every identifier a pattern binds as a definition in
    /// `scope`, collecting the pattern's embedded expressions into `rhs`
    /// for ordinary traversal.
    fn define_pattern(
        &mut self,
        scope: ScopeId,
        root: NodeId,
        kind: DefinitionKind,
        node: NodeId,
        rhs: &mut SmallVec<[NodeId; 8]>,
    ) {
        let ast = self.ast;
        walk_pattern(ast, root, |element| match element {
            PatternElement::Binding { ident, name } => {
                self.mgr.define(
                    scope,
                    name,
                    Definition { kind, name: ident, node, parent: None },
                );
            }
            PatternElement::Expression(expr) => rhs.push(expr),
        });
    }

    /// Record a reference for every identifier a pattern binds, collecting
    /// the embedded expressions into `rhs`.
    fn write_pattern(
        &mut self,
        root: NodeId,
        access: Access,
        init: bool,
        rhs: &mut SmallVec<[NodeId; 8]>,
    ) {
        let Some(scope) = self.current else { return };
        let ast = self.ast;
        walk_pattern(ast, root, |element| match element {
            PatternElement::Binding { ident, name } => {
                self.mgr.add_reference(scope, name, ident, access, init);
            }
            PatternElement::Expression(expr) => rhs.push(expr),
        });
    }

    /// Collect only the embedded expressions of a pattern.
    fn pattern_exprs(&self, root: NodeId, rhs: &mut SmallVec<[NodeId; 8]>) {
        walk_pattern(self.ast, root, |element| {
            if let PatternElement::Expression(expr) = element {
                rhs.push(expr);
            }
        });
    }

    fn enter_program(&mut self, node: NodeId, body: &[NodeId]) -> Flow {
        if self.current.is_some() {
            return self.fail("nested program node");
        }
        let ast = self.ast;
        let lexical = self.options.level.has_block_scopes();
        let top_strict = self.options.implied_strict || self.has_use_strict(body);

        match self.options.source {
            SourceKind::Script => {
                let global = self.open(ScopeKind::Global, node, top_strict);
                register_hoisted(&mut self.mgr, ast, global, body, !lexical);
                if lexical {
                    register_lexical(&mut self.mgr, ast, global, body);
                }
            }
            SourceKind::Module => {
                self.open(ScopeKind::Global, node, self.options.implied_strict);
                let module = self.open(ScopeKind::Module, node, true);
                register_imports(&mut self.mgr, ast, module, body);
                register_hoisted(&mut self.mgr, ast, module, body, !lexical);
                if lexical {
                    register_lexical(&mut self.mgr, ast, module, body);
                }
            }
            SourceKind::Embedded => {
                self.open(ScopeKind::Global, node, self.options.implied_strict);
                let wrapper = self.open(ScopeKind::Function, node, top_strict);
                if self.options.always_arguments || references_arguments(ast, &[], node) {
                    self.mgr.define_implicit(wrapper, self.arguments_name);
                }
                register_hoisted(&mut self.mgr, ast, wrapper, body, !lexical);
                if lexical {
                    register_lexical(&mut self.mgr, ast, wrapper, body);
                }
            }
        }
        Flow::Continue
    }

    /// Common entry for the three function forms. `name` is set only for
    /// named function expressions, whose name lives in its own scope
    /// wrapped around the function scope.
    fn enter_function(
        &mut self,
        node: NodeId,
        name: Option<NodeId>,
        params: &[NodeId],
        body: NodeId,
        is_arrow: bool,
    ) -> Flow {
        let ast = self.ast;
        if let Some(name_node) = name {
            let name_scope =
                self.open(ScopeKind::FunctionExpressionName, node, self.inherited_strict());
            if let Some(n) = ast.kind(name_node).as_identifier() {
                self.mgr.define(
                    name_scope,
                    n,
                    Definition {
                        kind: DefinitionKind::FunctionName,
                        name: name_node,
                        node,
                        parent: None,
                    },
                );
            }
        }

        let body_stmts = match ast.kind(body) {
            NodeKind::BlockStatement { body } => Some(body.as_slice()),
            _ => None,
        };
        let strict =
            self.inherited_strict() || body_stmts.is_some_and(|stmts| self.has_use_strict(stmts));
        let scope = self.open(ScopeKind::Function, node, strict);

        let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
        for &param in params {
            self.define_pattern(scope, param, DefinitionKind::Parameter, node, &mut children);
        }
        if !is_arrow && (self.options.always_arguments || references_arguments(ast, params, body))
        {
            self.mgr.define_implicit(scope, self.arguments_name);
        }

        // The body block does not get a scope of its own; the function
        // scope covers it, so its statements are descended into directly.
        if let Some(stmts) = body_stmts {
            let lexical = self.options.level.has_block_scopes();
            register_hoisted(&mut self.mgr, ast, scope, stmts, !lexical);
            if lexical {
                register_lexical(&mut self.mgr, ast, scope, stmts);
            }
            children.extend_from_slice(stmts);
        } else {
            children.push(body);
        }
        Flow::Descend(children)
    }
}

impl Visitor for Referencer<'_> {
    fn enter(&mut self, node: NodeId, _ast: &Ast) -> Flow {
        if self.fatal.is_some() {
            return Flow::Break;
        }
        let ast = self.ast;
        if let NodeKind::Program { body } = ast.kind(node) {
            return self.enter_program(node, body);
        }
        let Some(scope) = self.current else {
            return self.fail("analysis must start at a program node");
        };

        match ast.kind(node) {
            NodeKind::Identifier { name } => {
                self.mgr.add_reference(scope, *name, node, Access::READ, false);
                Flow::Continue
            }

            NodeKind::FunctionDeclaration { params, body, .. } => {
                // The name was pre-registered in the enclosing scope.
                self.enter_function(node, None, params, *body, false)
            }
            NodeKind::FunctionExpression { id, params, body } => {
                self.enter_function(node, *id, params, *body, false)
            }
            NodeKind::ArrowFunctionExpression { params, body } => {
                self.enter_function(node, None, params, *body, true)
            }

            NodeKind::BlockStatement { body } => {
                if self.options.level.has_block_scopes() {
                    let block = self.open(ScopeKind::Block, node, self.inherited_strict());
                    register_lexical(&mut self.mgr, ast, block, body);
                }
                Flow::Continue
            }

            NodeKind::VariableDeclaration { declarations, .. } => {
                // Bindings were pre-registered when their scope opened;
                // only the initializing writes are recorded here.
                let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
                for &declarator in declarations {
                    let NodeKind::VariableDeclarator { id, init } = ast.kind(declarator) else {
                        continue;
                    };
                    match *init {
                        Some(init) => {
                            self.write_pattern(*id, Access::WRITE, true, &mut children);
                            children.push(init);
                        }
                        None => self.pattern_exprs(*id, &mut children),
                    }
                }
                Flow::Descend(children)
            }

            NodeKind::AssignmentExpression { op, left, right } => {
                let access = if op.is_plain() {
                    Access::WRITE
                } else {
                    Access::READ | Access::WRITE
                };
                let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
                self.write_pattern(*left, access, false, &mut children);
                children.push(*right);
                Flow::Descend(children)
            }

            NodeKind::UpdateExpression { argument, .. } => {
                match ast.kind(*argument).as_identifier() {
                    Some(name) => {
                        self.mgr.add_reference(
                            scope,
                            name,
                            *argument,
                            Access::READ | Access::WRITE,
                            false,
                        );
                        Flow::Skip
                    }
                    None => Flow::Continue,
                }
            }

            NodeKind::ForStatement { init, .. } => {
                if let Some(init) = *init {
                    if self.options.level.has_block_scopes() && is_lexical_declaration(ast, init) {
                        let for_scope = self.open(ScopeKind::For, node, self.inherited_strict());
                        register_lexical(&mut self.mgr, ast, for_scope, &[init]);
                    }
                }
                Flow::Continue
            }

            NodeKind::ForInStatement { left, right, body }
            | NodeKind::ForOfStatement { left, right, body } => {
                let (left, right, body) = (*left, *right, *body);
                let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
                if let NodeKind::VariableDeclaration { kind, declarations } = ast.kind(left) {
                    if self.options.level.has_block_scopes() && !kind.is_var() {
                        let for_scope = self.open(ScopeKind::For, node, self.inherited_strict());
                        register_lexical(&mut self.mgr, ast, for_scope, &[left]);
                    }
                    for &declarator in declarations {
                        if let NodeKind::VariableDeclarator { id, .. } = ast.kind(declarator) {
                            self.write_pattern(*id, Access::WRITE, true, &mut children);
                        }
                    }
                } else {
                    self.write_pattern(left, Access::WRITE, false, &mut children);
                }
                children.push(right);
                children.push(body);
                Flow::Descend(children)
            }

            NodeKind::SwitchStatement { discriminant, cases } => {
                // The discriminant evaluates outside the switch scope, so
                // the open waits until the discriminant is left.
                if self.options.level.has_block_scopes() {
                    self.deferred.push(Deferred {
                        after: *discriminant,
                        open: DeferredOpen::Switch { statement: node },
                    });
                }
                let mut children: SmallVec<[NodeId; 8]> = smallvec![*discriminant];
                children.extend_from_slice(cases);
                Flow::Descend(children)
            }

            NodeKind::CatchClause { param, body } => {
                let catch = self.open(ScopeKind::Catch, node, self.inherited_strict());
                let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
                if let Some(param) = *param {
                    self.define_pattern(
                        catch,
                        param,
                        DefinitionKind::CatchParameter,
                        node,
                        &mut children,
                    );
                }
                children.push(*body);
                Flow::Descend(children)
            }

            NodeKind::WithStatement { object, body } => {
                // The object evaluates outside the with scope.
                self.deferred.push(Deferred {
                    after: *object,
                    open: DeferredOpen::With { statement: node },
                });
                Flow::Descend(smallvec![*object, *body])
            }

            NodeKind::CallExpression { callee, .. } => {
                // A direct eval escapes static resolution for the scope it
                // occurs in and everything below it, up to the next
                // function boundary.
                if let (Some(eval), Some(name)) =
                    (self.eval_name, ast.kind(*callee).as_identifier())
                {
                    if eval == name && !self.options.optimistic() {
                        self.mgr.taint_scope(scope);
                    }
                }
                Flow::Continue
            }

            NodeKind::ClassDeclaration { id, super_class, body }
            | NodeKind::ClassExpression { id, super_class, body } => {
                // Class bodies are unconditionally strict; the heritage
                // clause evaluates inside the class scope, where the inner
                // class name is already visible. At the legacy level no
                // class scope exists and the body evaluates in place.
                if self.options.level.has_block_scopes() {
                    let class = self.open(ScopeKind::Class, node, true);
                    if let Some(id) = *id {
                        if let Some(n) = ast.kind(id).as_identifier() {
                            self.mgr.define(
                                class,
                                n,
                                Definition {
                                    kind: DefinitionKind::ClassName,
                                    name: id,
                                    node,
                                    parent: None,
                                },
                            );
                        }
                    }
                }
                let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
                if let Some(super_class) = *super_class {
                    children.push(super_class);
                }
                children.push(*body);
                Flow::Descend(children)
            }

            NodeKind::MethodDefinition { key, value, computed, .. } => {
                if *computed {
                    Flow::Descend(smallvec![*key, *value])
                } else {
                    Flow::Descend(smallvec![*value])
                }
            }

            NodeKind::PropertyDefinition { key, value, computed, .. } => {
                // A computed key evaluates in the class scope, before any
                // field initializer scope opens.
                match *value {
                    Some(value) => {
                        let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
                        if *computed {
                            children.push(*key);
                        }
                        if self.options.level.has_class_field_scopes() {
                            if *computed {
                                self.deferred.push(Deferred {
                                    after: *key,
                                    open: DeferredOpen::FieldInitializer { value },
                                });
                            } else {
                                self.open(ScopeKind::ClassFieldInitializer, value, true);
                            }
                        }
                        children.push(value);
                        Flow::Descend(children)
                    }
                    None if *computed => Flow::Descend(smallvec![*key]),
                    None => Flow::Skip,
                }
            }

            NodeKind::StaticBlock { body } => {
                let block = self.open(ScopeKind::ClassStaticBlock, node, true);
                let lexical = self.options.level.has_block_scopes();
                register_hoisted(&mut self.mgr, ast, block, body, !lexical);
                if lexical {
                    register_lexical(&mut self.mgr, ast, block, body);
                }
                Flow::Continue
            }

            NodeKind::MemberExpression { object, computed, .. } => {
                if *computed {
                    Flow::Continue
                } else {
                    Flow::Descend(smallvec![*object])
                }
            }

            NodeKind::Property { key: _, value, computed, .. } => {
                // Only reached in object expressions; pattern properties
                // are flattened by the pattern walker.
                if *computed {
                    Flow::Continue
                } else {
                    Flow::Descend(smallvec![*value])
                }
            }

            NodeKind::LabeledStatement { body, .. } => Flow::Descend(smallvec![*body]),
            NodeKind::BreakStatement { .. } | NodeKind::ContinueStatement { .. } => Flow::Skip,

            // Import bindings were pre-registered when the module scope
            // opened; nothing inside is a reference.
            NodeKind::ImportDeclaration { .. } => Flow::Skip,

            NodeKind::ExportNamedDeclaration { declaration, specifiers, source } => {
                if let Some(declaration) = *declaration {
                    return Flow::Descend(smallvec![declaration]);
                }
                if source.is_none() {
                    // `export { x }` reads the local binding; a re-export
                    // with a source does not touch this module's scope.
                    for &spec in specifiers {
                        if let NodeKind::ExportSpecifier { local, .. } = ast.kind(spec) {
                            if let Some(name) = ast.kind(*local).as_identifier() {
                                self.mgr.add_reference(scope, name, *local, Access::READ, false);
                            }
                        }
                    }
                }
                Flow::Skip
            }
            NodeKind::ExportDefaultDeclaration { declaration } => {
                Flow::Descend(smallvec![*declaration])
            }

            _ => Flow::Continue,
        }
    }

    fn leave(&mut self, node: NodeId, ast: &Ast) -> Flow {
        if self.fatal.is_some() {
            return Flow::Break;
        }
        // A node may have opened more than one scope (a named function
        // expression, a module program); close them innermost-first.
        while let Some(current) = self.current {
            if self.mgr.scope(current).block() != node {
                break;
            }
            match self.mgr.scope(current).upper() {
                Some(_) => {
                    self.current = self.mgr.close_scope(current);
                }
                None => {
                    self.mgr.close_global(current, ast);
                    self.current = None;
                }
            }
        }
        // Leaving the leading child of a switch, with, or computed field
        // opens the scope its siblings evaluate in.
        if self.deferred.last().is_some_and(|deferred| deferred.after == node) {
            if let Some(deferred) = self.deferred.pop() {
                self.open_deferred(deferred.open);
            }
        }
        Flow::Continue
    }
}

fn is_lexical_declaration(ast: &Ast, node: NodeId) -> bool {
    matches!(ast.kind(node), NodeKind::VariableDeclaration { kind, .. } if !kind.is_var())
}
