//! Child-edge model.
//!
//! Every node type has an ordered list of named edges through which its
//! children are reachable. The built-in order ([`default_edges`]) is the
//! source-text order of the construct. Non-child relations (labels are
//! children here, but e.g. comment attachments or parent back-links in
//! other representations) simply have no edge, so traversal can never
//! follow them.
//!
//! Resolving an edge against a concrete node yields an [`Edge`]: nothing,
//! one child, a dense child list, or a sparse list whose holes (array
//! elisions) traversal skips.

use crate::{NodeId, NodeKind, NodeType};

/// A named child edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeName {
    Alternate,
    Argument,
    Arguments,
    Block,
    Body,
    Callee,
    Cases,
    Consequent,
    Declaration,
    Declarations,
    Discriminant,
    Elements,
    Exported,
    Expression,
    Expressions,
    Finalizer,
    Handler,
    Id,
    Imported,
    Init,
    Key,
    Label,
    Left,
    Local,
    Object,
    Param,
    Params,
    Properties,
    Property,
    Right,
    Source,
    Specifiers,
    SuperClass,
    Test,
    Update,
    Value,
}

/// The value of one edge on one concrete node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edge<'a> {
    /// The edge is absent on this node (optional child not present, or the
    /// edge name does not apply to this node type).
    None,
    /// A single child.
    One(NodeId),
    /// An ordered child list.
    Seq(&'a [NodeId]),
    /// An ordered child list with holes; holes are skipped.
    Sparse(&'a [Option<NodeId>]),
}

#[inline]
fn opt(id: Option<NodeId>) -> Edge<'static> {
    match id {
        Some(id) => Edge::One(id),
        None => Edge::None,
    }
}

/// Built-in edge order for every node type, in source-text order.
pub const fn default_edges(ty: NodeType) -> &'static [EdgeName] {
    use EdgeName as E;
    match ty {
        NodeType::Program | NodeType::BlockStatement | NodeType::ClassBody | NodeType::StaticBlock => {
            &[E::Body]
        }
        NodeType::Identifier
        | NodeType::Literal
        | NodeType::EmptyStatement
        | NodeType::DebuggerStatement
        | NodeType::ThisExpression => &[],
        NodeType::TemplateLiteral | NodeType::SequenceExpression => &[E::Expressions],
        NodeType::ExpressionStatement => &[E::Expression],
        NodeType::IfStatement => &[E::Test, E::Consequent, E::Alternate],
        NodeType::LabeledStatement => &[E::Label, E::Body],
        NodeType::BreakStatement | NodeType::ContinueStatement => &[E::Label],
        NodeType::WithStatement => &[E::Object, E::Body],
        NodeType::SwitchStatement => &[E::Discriminant, E::Cases],
        NodeType::SwitchCase => &[E::Test, E::Consequent],
        NodeType::ReturnStatement
        | NodeType::ThrowStatement
        | NodeType::UnaryExpression
        | NodeType::UpdateExpression
        | NodeType::SpreadElement
        | NodeType::RestElement => &[E::Argument],
        NodeType::TryStatement => &[E::Block, E::Handler, E::Finalizer],
        NodeType::CatchClause => &[E::Param, E::Body],
        NodeType::WhileStatement => &[E::Test, E::Body],
        NodeType::DoWhileStatement => &[E::Body, E::Test],
        NodeType::ForStatement => &[E::Init, E::Test, E::Update, E::Body],
        NodeType::ForInStatement | NodeType::ForOfStatement => &[E::Left, E::Right, E::Body],
        NodeType::FunctionDeclaration | NodeType::FunctionExpression => {
            &[E::Id, E::Params, E::Body]
        }
        NodeType::ArrowFunctionExpression => &[E::Params, E::Body],
        NodeType::VariableDeclaration => &[E::Declarations],
        NodeType::VariableDeclarator => &[E::Id, E::Init],
        NodeType::ClassDeclaration | NodeType::ClassExpression => &[E::Id, E::SuperClass, E::Body],
        NodeType::ArrayExpression | NodeType::ArrayPattern => &[E::Elements],
        NodeType::ObjectExpression | NodeType::ObjectPattern => &[E::Properties],
        NodeType::Property
        | NodeType::MethodDefinition
        | NodeType::PropertyDefinition => &[E::Key, E::Value],
        NodeType::BinaryExpression
        | NodeType::LogicalExpression
        | NodeType::AssignmentExpression
        | NodeType::AssignmentPattern => &[E::Left, E::Right],
        NodeType::ConditionalExpression => &[E::Test, E::Consequent, E::Alternate],
        NodeType::CallExpression | NodeType::NewExpression => &[E::Callee, E::Arguments],
        NodeType::MemberExpression => &[E::Object, E::Property],
        NodeType::ImportDeclaration => &[E::Specifiers, E::Source],
        NodeType::ImportSpecifier => &[E::Imported, E::Local],
        NodeType::ImportDefaultSpecifier | NodeType::ImportNamespaceSpecifier => &[E::Local],
        NodeType::ExportNamedDeclaration => &[E::Declaration, E::Specifiers, E::Source],
        NodeType::ExportSpecifier => &[E::Local, E::Exported],
        NodeType::ExportDefaultDeclaration => &[E::Declaration],
    }
}

impl NodeKind {
    /// Resolve a named edge against this node.
    ///
    /// Edge names that do not apply to the node type yield [`Edge::None`].
    pub fn edge(&self, name: EdgeName) -> Edge<'_> {
        use EdgeName as E;
        match self {
            NodeKind::Program { body }
            | NodeKind::BlockStatement { body }
            | NodeKind::ClassBody { body }
            | NodeKind::StaticBlock { body } => match name {
                E::Body => Edge::Seq(body),
                _ => Edge::None,
            },
            NodeKind::Identifier { .. }
            | NodeKind::Literal { .. }
            | NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement
            | NodeKind::ThisExpression => Edge::None,
            NodeKind::TemplateLiteral { expressions }
            | NodeKind::SequenceExpression { expressions } => match name {
                E::Expressions => Edge::Seq(expressions),
                _ => Edge::None,
            },
            NodeKind::ExpressionStatement { expression } => match name {
                E::Expression => Edge::One(*expression),
                _ => Edge::None,
            },
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => match name {
                E::Test => Edge::One(*test),
                E::Consequent => Edge::One(*consequent),
                E::Alternate => opt(*alternate),
                _ => Edge::None,
            },
            NodeKind::LabeledStatement { label, body } => match name {
                E::Label => Edge::One(*label),
                E::Body => Edge::One(*body),
                _ => Edge::None,
            },
            NodeKind::BreakStatement { label } | NodeKind::ContinueStatement { label } => {
                match name {
                    E::Label => opt(*label),
                    _ => Edge::None,
                }
            }
            NodeKind::WithStatement { object, body } => match name {
                E::Object => Edge::One(*object),
                E::Body => Edge::One(*body),
                _ => Edge::None,
            },
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => match name {
                E::Discriminant => Edge::One(*discriminant),
                E::Cases => Edge::Seq(cases),
                _ => Edge::None,
            },
            NodeKind::SwitchCase { test, consequent } => match name {
                E::Test => opt(*test),
                E::Consequent => Edge::Seq(consequent),
                _ => Edge::None,
            },
            NodeKind::ReturnStatement { argument } => match name {
                E::Argument => opt(*argument),
                _ => Edge::None,
            },
            NodeKind::ThrowStatement { argument }
            | NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. }
            | NodeKind::SpreadElement { argument }
            | NodeKind::RestElement { argument } => match name {
                E::Argument => Edge::One(*argument),
                _ => Edge::None,
            },
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => match name {
                E::Block => Edge::One(*block),
                E::Handler => opt(*handler),
                E::Finalizer => opt(*finalizer),
                _ => Edge::None,
            },
            NodeKind::CatchClause { param, body } => match name {
                E::Param => opt(*param),
                E::Body => Edge::One(*body),
                _ => Edge::None,
            },
            NodeKind::WhileStatement { test, body } | NodeKind::DoWhileStatement { body, test } => {
                match name {
                    E::Test => Edge::One(*test),
                    E::Body => Edge::One(*body),
                    _ => Edge::None,
                }
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => match name {
                E::Init => opt(*init),
                E::Test => opt(*test),
                E::Update => opt(*update),
                E::Body => Edge::One(*body),
                _ => Edge::None,
            },
            NodeKind::ForInStatement { left, right, body }
            | NodeKind::ForOfStatement { left, right, body } => match name {
                E::Left => Edge::One(*left),
                E::Right => Edge::One(*right),
                E::Body => Edge::One(*body),
                _ => Edge::None,
            },
            NodeKind::FunctionDeclaration { id, params, body }
            | NodeKind::FunctionExpression { id, params, body } => match name {
                E::Id => opt(*id),
                E::Params => Edge::Seq(params),
                E::Body => Edge::One(*body),
                _ => Edge::None,
            },
            NodeKind::ArrowFunctionExpression { params, body } => match name {
                E::Params => Edge::Seq(params),
                E::Body => Edge::One(*body),
                _ => Edge::None,
            },
            NodeKind::VariableDeclaration { declarations, .. } => match name {
                E::Declarations => Edge::Seq(declarations),
                _ => Edge::None,
            },
            NodeKind::VariableDeclarator { id, init } => match name {
                E::Id => Edge::One(*id),
                E::Init => opt(*init),
                _ => Edge::None,
            },
            NodeKind::ClassDeclaration {
                id,
                super_class,
                body,
            }
            | NodeKind::ClassExpression {
                id,
                super_class,
                body,
            } => match name {
                E::Id => opt(*id),
                E::SuperClass => opt(*super_class),
                E::Body => Edge::One(*body),
                _ => Edge::None,
            },
            NodeKind::ArrayExpression { elements } | NodeKind::ArrayPattern { elements } => {
                match name {
                    E::Elements => Edge::Sparse(elements),
                    _ => Edge::None,
                }
            }
            NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties } => {
                match name {
                    E::Properties => Edge::Seq(properties),
                    _ => Edge::None,
                }
            }
            NodeKind::Property { key, value, .. }
            | NodeKind::MethodDefinition { key, value, .. } => match name {
                E::Key => Edge::One(*key),
                E::Value => Edge::One(*value),
                _ => Edge::None,
            },
            NodeKind::PropertyDefinition { key, value, .. } => match name {
                E::Key => Edge::One(*key),
                E::Value => opt(*value),
                _ => Edge::None,
            },
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::AssignmentPattern { left, right } => match name {
                E::Left => Edge::One(*left),
                E::Right => Edge::One(*right),
                _ => Edge::None,
            },
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => match name {
                E::Test => Edge::One(*test),
                E::Consequent => Edge::One(*consequent),
                E::Alternate => Edge::One(*alternate),
                _ => Edge::None,
            },
            NodeKind::CallExpression { callee, arguments }
            | NodeKind::NewExpression { callee, arguments } => match name {
                E::Callee => Edge::One(*callee),
                E::Arguments => Edge::Seq(arguments),
                _ => Edge::None,
            },
            NodeKind::MemberExpression {
                object, property, ..
            } => match name {
                E::Object => Edge::One(*object),
                E::Property => Edge::One(*property),
                _ => Edge::None,
            },
            NodeKind::ImportDeclaration { specifiers, source } => match name {
                E::Specifiers => Edge::Seq(specifiers),
                E::Source => Edge::One(*source),
                _ => Edge::None,
            },
            NodeKind::ImportSpecifier { imported, local } => match name {
                E::Imported => Edge::One(*imported),
                E::Local => Edge::One(*local),
                _ => Edge::None,
            },
            NodeKind::ImportDefaultSpecifier { local }
            | NodeKind::ImportNamespaceSpecifier { local } => match name {
                E::Local => Edge::One(*local),
                _ => Edge::None,
            },
            NodeKind::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => match name {
                E::Declaration => opt(*declaration),
                E::Specifiers => Edge::Seq(specifiers),
                E::Source => opt(*source),
                _ => Edge::None,
            },
            NodeKind::ExportSpecifier { local, exported } => match name {
                E::Local => Edge::One(*local),
                E::Exported => Edge::One(*exported),
                _ => Edge::None,
            },
            NodeKind::ExportDefaultDeclaration { declaration } => match name {
                E::Declaration => Edge::One(*declaration),
                _ => Edge::None,
            },
        }
    }
}
