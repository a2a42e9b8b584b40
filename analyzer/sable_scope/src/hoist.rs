//! Binding pre-registration.
//!
//! Every scope registers all of its bindings the moment it opens, before
//! any code in it is visited. That is what makes eager reference
//! resolution sound: by the time an identifier occurrence is seen, every
//! binding that could capture it already exists, so a resolution that
//! succeeds can never be invalidated by a later declaration.

use sable_ast::{Ast, DeclarationKind, NodeId, NodeKind};

use crate::manager::ScopeManager;
use crate::pattern::each_bound_identifier;
use crate::scope::ScopeId;
use crate::variable::{Definition, DefinitionKind};

/// Pre-register the hoisted bindings reachable from `body` statements:
/// `var` declarators and function declarations, at any statement depth
/// short of a nested variable scope. With `include_lexical` set (the
/// legacy feature level), lexical declarations and classes degrade to the
/// same target scope.
pub(crate) fn register_hoisted(
    mgr: &mut ScopeManager,
    ast: &Ast,
    target: ScopeId,
    body: &[NodeId],
    include_lexical: bool,
) {
    let mut stack: Vec<NodeId> = body.iter().rev().copied().collect();
    while let Some(node) = stack.pop() {
        match ast.kind(node) {
            NodeKind::VariableDeclaration { kind, declarations } => {
                if kind.is_var() || include_lexical {
                    register_declarators(mgr, ast, target, node, declarations, *kind);
                }
            }
            NodeKind::FunctionDeclaration { id, .. } => {
                if let Some(id) = *id {
                    define_named(mgr, ast, target, DefinitionKind::FunctionName, id, node, None);
                }
            }
            NodeKind::ClassDeclaration { id, .. } => {
                if include_lexical {
                    if let Some(id) = *id {
                        define_named(mgr, ast, target, DefinitionKind::ClassName, id, node, None);
                    }
                }
            }
            NodeKind::BlockStatement { body } => {
                stack.extend(body.iter().rev());
            }
            NodeKind::IfStatement { consequent, alternate, .. } => {
                if let Some(alternate) = *alternate {
                    stack.push(alternate);
                }
                stack.push(*consequent);
            }
            NodeKind::LabeledStatement { body, .. } | NodeKind::WithStatement { body, .. } => {
                stack.push(*body);
            }
            NodeKind::SwitchStatement { cases, .. } => {
                stack.extend(cases.iter().rev());
            }
            NodeKind::SwitchCase { consequent, .. } => {
                stack.extend(consequent.iter().rev());
            }
            NodeKind::TryStatement { block, handler, finalizer } => {
                if let Some(finalizer) = *finalizer {
                    stack.push(finalizer);
                }
                if let Some(handler) = *handler {
                    stack.push(handler);
                }
                stack.push(*block);
            }
            // The catch parameter is not hoisted, but `var` inside the
            // handler body still is.
            NodeKind::CatchClause { body, .. } => {
                stack.push(*body);
            }
            NodeKind::WhileStatement { body, .. } | NodeKind::DoWhileStatement { body, .. } => {
                stack.push(*body);
            }
            NodeKind::ForStatement { init, body, .. } => {
                stack.push(*body);
                if let Some(init) = *init {
                    if matches!(ast.kind(init), NodeKind::VariableDeclaration { .. }) {
                        stack.push(init);
                    }
                }
            }
            NodeKind::ForInStatement { left, body, .. }
            | NodeKind::ForOfStatement { left, body, .. } => {
                stack.push(*body);
                if matches!(ast.kind(*left), NodeKind::VariableDeclaration { .. }) {
                    stack.push(*left);
                }
            }
            NodeKind::ExportNamedDeclaration { declaration: Some(declaration), .. }
            | NodeKind::ExportDefaultDeclaration { declaration } => {
                stack.push(*declaration);
            }
            // Nested variable scopes own their hoisted bindings; nothing
            // inside an expression can introduce one here.
            _ => {}
        }
    }
}

/// Register the lexical declarations among `stmts` into `scope`. Only the
/// immediate statement list is inspected: nested blocks open their own
/// scopes and register their own lexicals.
pub(crate) fn register_lexical(
    mgr: &mut ScopeManager,
    ast: &Ast,
    scope: ScopeId,
    stmts: &[NodeId],
) {
    for &stmt in stmts {
        let stmt = unwrap_export(ast, stmt);
        match ast.kind(stmt) {
            NodeKind::VariableDeclaration { kind, declarations } if !kind.is_var() => {
                register_declarators(mgr, ast, scope, stmt, declarations, *kind);
            }
            NodeKind::ClassDeclaration { id: Some(id), .. } => {
                define_named(mgr, ast, scope, DefinitionKind::ClassName, *id, stmt, None);
            }
            _ => {}
        }
    }
}

/// Register the import bindings among a module's top-level statements.
pub(crate) fn register_imports(
    mgr: &mut ScopeManager,
    ast: &Ast,
    scope: ScopeId,
    body: &[NodeId],
) {
    for &stmt in body {
        let NodeKind::ImportDeclaration { specifiers, .. } = ast.kind(stmt) else {
            continue;
        };
        for &spec in specifiers {
            let local = match ast.kind(spec) {
                NodeKind::ImportSpecifier { local, .. }
                | NodeKind::ImportDefaultSpecifier { local }
                | NodeKind::ImportNamespaceSpecifier { local } => *local,
                _ => continue,
            };
            define_named(mgr, ast, scope, DefinitionKind::ImportBinding, local, spec, Some(stmt));
        }
    }
}

fn register_declarators(
    mgr: &mut ScopeManager,
    ast: &Ast,
    scope: ScopeId,
    declaration: NodeId,
    declarators: &[NodeId],
    kind: DeclarationKind,
) {
    for &declarator in declarators {
        let NodeKind::VariableDeclarator { id, .. } = ast.kind(declarator) else {
            continue;
        };
        each_bound_identifier(ast, *id, |ident, name| {
            mgr.define(
                scope,
                name,
                Definition {
                    kind: DefinitionKind::Variable(kind),
                    name: ident,
                    node: declarator,
                    parent: Some(declaration),
                },
            );
        });
    }
}

fn define_named(
    mgr: &mut ScopeManager,
    ast: &Ast,
    scope: ScopeId,
    kind: DefinitionKind,
    ident: NodeId,
    node: NodeId,
    parent: Option<NodeId>,
) {
    if let Some(name) = ast.kind(ident).as_identifier() {
        mgr.define(scope, name, Definition { kind, name: ident, node, parent });
    }
}

fn unwrap_export(ast: &Ast, stmt: NodeId) -> NodeId {
    match ast.kind(stmt) {
        NodeKind::ExportNamedDeclaration { declaration: Some(declaration), .. }
        | NodeKind::ExportDefaultDeclaration { declaration } => *declaration,
        _ => stmt,
    }
}

/// Whether a function's parameters or body textually mention `arguments`
/// in a position that could read the implicit binding. Arrow bodies are
/// transparent (arrows have no `arguments` of their own); nested ordinary
/// functions and class static blocks shadow it and are not entered.
///
/// Property accesses, non-computed keys, and labels named `arguments` do
/// not count. The scan over-approximates shadowing by intermediate
/// declarations, which only ever materializes a harmless unused binding.
pub(crate) fn references_arguments(ast: &Ast, params: &[NodeId], body: NodeId) -> bool {
    let Some(target) = ast.lookup("arguments") else {
        return false;
    };

    let mut stack: Vec<NodeId> = params.to_vec();
    stack.push(body);
    while let Some(node) = stack.pop() {
        match ast.kind(node) {
            NodeKind::Identifier { name } => {
                if *name == target {
                    return true;
                }
            }
            NodeKind::FunctionDeclaration { .. }
            | NodeKind::FunctionExpression { .. }
            | NodeKind::StaticBlock { .. } => {}
            NodeKind::MemberExpression { object, property, computed } => {
                if *computed {
                    stack.push(*property);
                }
                stack.push(*object);
            }
            NodeKind::Property { key, value, computed, .. } => {
                stack.push(*value);
                if *computed {
                    stack.push(*key);
                }
            }
            NodeKind::MethodDefinition { key, value, computed, .. } => {
                stack.push(*value);
                if *computed {
                    stack.push(*key);
                }
            }
            NodeKind::PropertyDefinition { key, value, computed, .. } => {
                if let Some(value) = *value {
                    stack.push(value);
                }
                if *computed {
                    stack.push(*key);
                }
            }
            NodeKind::LabeledStatement { body, .. } => {
                stack.push(*body);
            }
            NodeKind::BreakStatement { .. } | NodeKind::ContinueStatement { .. } => {}
            kind => {
                for &edge in sable_ast::default_edges(kind.node_type()) {
                    match kind.edge(edge) {
                        sable_ast::Edge::None => {}
                        sable_ast::Edge::One(child) => stack.push(child),
                        sable_ast::Edge::Seq(children) => stack.extend(children),
                        sable_ast::Edge::Sparse(children) => {
                            stack.extend(children.iter().flatten());
                        }
                    }
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_ast::Span;

    fn ident(ast: &mut Ast, text: &str) -> NodeId {
        let name = ast.intern(text);
        ast.alloc(NodeKind::Identifier { name }, Span::DUMMY)
    }

    fn arrow_returning(ast: &mut Ast, expr: NodeId) -> NodeId {
        ast.alloc(
            NodeKind::ArrowFunctionExpression { params: Vec::new(), body: expr },
            Span::DUMMY,
        )
    }

    #[test]
    fn sees_arguments_through_arrows_but_not_functions() {
        let mut ast = Ast::new();
        let args = ident(&mut ast, "arguments");
        let arrow = arrow_returning(&mut ast, args);
        let stmt = ast.alloc(NodeKind::ExpressionStatement { expression: arrow }, Span::DUMMY);
        let body = ast.alloc(NodeKind::BlockStatement { body: vec![stmt] }, Span::DUMMY);
        assert!(references_arguments(&ast, &[], body));

        let mut ast = Ast::new();
        let args = ident(&mut ast, "arguments");
        let ret = ast.alloc(NodeKind::ReturnStatement { argument: Some(args) }, Span::DUMMY);
        let inner_body = ast.alloc(NodeKind::BlockStatement { body: vec![ret] }, Span::DUMMY);
        let inner = ast.alloc(
            NodeKind::FunctionExpression { id: None, params: Vec::new(), body: inner_body },
            Span::DUMMY,
        );
        let stmt = ast.alloc(NodeKind::ExpressionStatement { expression: inner }, Span::DUMMY);
        let body = ast.alloc(NodeKind::BlockStatement { body: vec![stmt] }, Span::DUMMY);
        assert!(!references_arguments(&ast, &[], body));
    }

    #[test]
    fn property_access_named_arguments_does_not_count() {
        let mut ast = Ast::new();
        let obj = ident(&mut ast, "o");
        let prop = ident(&mut ast, "arguments");
        let member = ast.alloc(
            NodeKind::MemberExpression { object: obj, property: prop, computed: false },
            Span::DUMMY,
        );
        let stmt = ast.alloc(NodeKind::ExpressionStatement { expression: member }, Span::DUMMY);
        let body = ast.alloc(NodeKind::BlockStatement { body: vec![stmt] }, Span::DUMMY);
        assert!(!references_arguments(&ast, &[], body));
    }

    #[test]
    fn absent_name_is_a_fast_negative() {
        let mut ast = Ast::new();
        let x = ident(&mut ast, "x");
        let body = ast.alloc(
            NodeKind::ExpressionStatement { expression: x },
            Span::DUMMY,
        );
        assert!(!references_arguments(&ast, &[], body));
    }
}
