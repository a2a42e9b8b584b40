//! Shared tree-building helpers for the integration tests.

#![allow(dead_code)]

use sable_ast::{AssignOp, Ast, DeclarationKind, LiteralValue, NodeId, NodeKind, Span, UpdateOp};
use sable_scope::{analyze, AnalyzeOptions, ScopeId, ScopeManager, VariableId};

pub struct Builder {
    pub ast: Ast,
}

impl Builder {
    pub fn new() -> Self {
        Builder { ast: Ast::new() }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.ast.alloc(kind, Span::DUMMY)
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        let name = self.ast.intern(name);
        self.alloc(NodeKind::Identifier { name })
    }

    pub fn num(&mut self, value: f64) -> NodeId {
        self.alloc(NodeKind::Literal { value: LiteralValue::Number(value) })
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        let value = self.ast.intern(value);
        self.alloc(NodeKind::Literal { value: LiteralValue::String(value) })
    }

    pub fn expr_stmt(&mut self, expression: NodeId) -> NodeId {
        self.alloc(NodeKind::ExpressionStatement { expression })
    }

    /// An expression statement that just reads a name.
    pub fn read(&mut self, name: &str) -> NodeId {
        let id = self.ident(name);
        self.expr_stmt(id)
    }

    pub fn directive(&mut self, text: &str) -> NodeId {
        let lit = self.string(text);
        self.expr_stmt(lit)
    }

    pub fn block(&mut self, body: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::BlockStatement { body })
    }

    pub fn empty(&mut self) -> NodeId {
        self.alloc(NodeKind::EmptyStatement)
    }

    /// A single-declarator declaration of a plain identifier.
    pub fn var(&mut self, kind: DeclarationKind, name: &str, init: Option<NodeId>) -> NodeId {
        let id = self.ident(name);
        self.declare(kind, id, init)
    }

    /// A single-declarator declaration of an arbitrary pattern.
    pub fn declare(&mut self, kind: DeclarationKind, id: NodeId, init: Option<NodeId>) -> NodeId {
        let declarator = self.alloc(NodeKind::VariableDeclarator { id, init });
        self.alloc(NodeKind::VariableDeclaration { kind, declarations: vec![declarator] })
    }

    pub fn func_decl(&mut self, name: &str, params: Vec<NodeId>, body: Vec<NodeId>) -> NodeId {
        let id = self.ident(name);
        let body = self.block(body);
        self.alloc(NodeKind::FunctionDeclaration { id: Some(id), params, body })
    }

    pub fn func_expr(&mut self, name: Option<&str>, params: Vec<NodeId>, body: Vec<NodeId>) -> NodeId {
        let id = name.map(|n| self.ident(n));
        let body = self.block(body);
        self.alloc(NodeKind::FunctionExpression { id, params, body })
    }

    /// An arrow function; `body` may be a block statement or an expression.
    pub fn arrow(&mut self, params: Vec<NodeId>, body: NodeId) -> NodeId {
        self.alloc(NodeKind::ArrowFunctionExpression { params, body })
    }

    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::CallExpression { callee, arguments })
    }

    pub fn assign(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(NodeKind::AssignmentExpression { op: AssignOp::Assign, left, right })
    }

    pub fn assign_op(&mut self, op: AssignOp, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(NodeKind::AssignmentExpression { op, left, right })
    }

    pub fn increment(&mut self, argument: NodeId) -> NodeId {
        self.alloc(NodeKind::UpdateExpression {
            op: UpdateOp::Increment,
            argument,
            prefix: false,
        })
    }

    pub fn ret(&mut self, argument: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::ReturnStatement { argument })
    }

    pub fn class_body(&mut self, members: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::ClassBody { body: members })
    }

    pub fn class_decl(
        &mut self,
        name: &str,
        super_class: Option<NodeId>,
        members: Vec<NodeId>,
    ) -> NodeId {
        let id = self.ident(name);
        let body = self.class_body(members);
        self.alloc(NodeKind::ClassDeclaration { id: Some(id), super_class, body })
    }

    pub fn class_expr(
        &mut self,
        name: Option<&str>,
        super_class: Option<NodeId>,
        members: Vec<NodeId>,
    ) -> NodeId {
        let id = name.map(|n| self.ident(n));
        let body = self.class_body(members);
        self.alloc(NodeKind::ClassExpression { id, super_class, body })
    }

    pub fn program(&mut self, body: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::Program { body })
    }
}

pub fn analyze_with(b: &mut Builder, program: NodeId, options: &AnalyzeOptions) -> ScopeManager {
    match analyze(&mut b.ast, program, options) {
        Ok(manager) => manager,
        Err(err) => panic!("analysis failed: {err}"),
    }
}

pub fn analyze_script(b: &mut Builder, program: NodeId) -> ScopeManager {
    analyze_with(b, program, &AnalyzeOptions::default())
}

/// The names of the variables a scope owns, in declaration order.
pub fn scope_names(mgr: &ScopeManager, ast: &Ast, scope: ScopeId) -> Vec<String> {
    mgr.scope(scope)
        .variables()
        .iter()
        .map(|&v| ast.resolve(mgr.variable(v).name()).to_owned())
        .collect()
}

pub fn find_var(mgr: &ScopeManager, ast: &Ast, scope: ScopeId, name: &str) -> VariableId {
    let Some(interned) = ast.lookup(name) else {
        panic!("name {name:?} was never interned");
    };
    match mgr.scope(scope).variable_by_name(interned) {
        Some(var) => var,
        None => panic!("no variable named {name:?} in scope {scope:?}"),
    }
}
