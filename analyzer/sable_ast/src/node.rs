//! Syntax tree nodes.
//!
//! The tree is a closed tagged union: every construct the analyzer
//! understands is a [`NodeKind`] variant, and child nodes are referenced by
//! [`NodeId`] handles into the owning [`Ast`](crate::Ast) arena rather than
//! by owning pointers. [`NodeType`] is the fieldless tag used for edge-table
//! lookups and error reporting.

use std::fmt;

use crate::Name;

/// Index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Variable declaration kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl DeclarationKind {
    /// Whether bindings of this kind hoist to the nearest variable scope.
    #[inline]
    pub const fn is_var(self) -> bool {
        matches!(self, DeclarationKind::Var)
    }
}

/// Literal value payload.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Number(f64),
    String(Name),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    In,
    InstanceOf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
    Nullish,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

/// Assignment operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
}

impl AssignOp {
    /// Plain `=` assignment, as opposed to a compound read-modify-write.
    #[inline]
    pub const fn is_plain(self) -> bool {
        matches!(self, AssignOp::Assign)
    }
}

/// One syntax tree node: a tagged kind plus its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: crate::Span,
}

impl Node {
    /// Create a new node.
    #[inline]
    pub const fn new(kind: NodeKind, span: crate::Span) -> Self {
        Node { kind, span }
    }
}

/// The closed union of syntax constructs.
///
/// Shapes follow the conventional estree vocabulary: statements,
/// declarations, expressions, patterns, class elements, and module items.
/// `ArrayExpression` and `ArrayPattern` elements are `Option` to model
/// elision holes, which traversal skips.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },
    Identifier {
        name: Name,
    },
    Literal {
        value: LiteralValue,
    },
    TemplateLiteral {
        expressions: Vec<NodeId>,
    },

    // Statements
    ExpressionStatement {
        expression: NodeId,
    },
    BlockStatement {
        body: Vec<NodeId>,
    },
    EmptyStatement,
    DebuggerStatement,
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    LabeledStatement {
        label: NodeId,
        body: NodeId,
    },
    BreakStatement {
        label: Option<NodeId>,
    },
    ContinueStatement {
        label: Option<NodeId>,
    },
    WithStatement {
        object: NodeId,
        body: NodeId,
    },
    SwitchStatement {
        discriminant: NodeId,
        cases: Vec<NodeId>,
    },
    SwitchCase {
        test: Option<NodeId>,
        consequent: Vec<NodeId>,
    },
    ReturnStatement {
        argument: Option<NodeId>,
    },
    ThrowStatement {
        argument: NodeId,
    },
    TryStatement {
        block: NodeId,
        handler: Option<NodeId>,
        finalizer: Option<NodeId>,
    },
    CatchClause {
        param: Option<NodeId>,
        body: NodeId,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    DoWhileStatement {
        body: NodeId,
        test: NodeId,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ForInStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForOfStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },

    // Declarations
    FunctionDeclaration {
        id: Option<NodeId>,
        params: Vec<NodeId>,
        body: NodeId,
    },
    VariableDeclaration {
        kind: DeclarationKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    ClassDeclaration {
        id: Option<NodeId>,
        super_class: Option<NodeId>,
        body: NodeId,
    },

    // Expressions
    ThisExpression,
    ArrayExpression {
        elements: Vec<Option<NodeId>>,
    },
    ObjectExpression {
        properties: Vec<NodeId>,
    },
    Property {
        key: NodeId,
        value: NodeId,
        computed: bool,
        shorthand: bool,
    },
    FunctionExpression {
        id: Option<NodeId>,
        params: Vec<NodeId>,
        body: NodeId,
    },
    ArrowFunctionExpression {
        params: Vec<NodeId>,
        body: NodeId,
    },
    UnaryExpression {
        op: UnaryOp,
        argument: NodeId,
    },
    UpdateExpression {
        op: UpdateOp,
        argument: NodeId,
        prefix: bool,
    },
    BinaryExpression {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    LogicalExpression {
        op: LogicalOp,
        left: NodeId,
        right: NodeId,
    },
    AssignmentExpression {
        op: AssignOp,
        left: NodeId,
        right: NodeId,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    NewExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    SequenceExpression {
        expressions: Vec<NodeId>,
    },
    MemberExpression {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    SpreadElement {
        argument: NodeId,
    },

    // Patterns
    AssignmentPattern {
        left: NodeId,
        right: NodeId,
    },
    ArrayPattern {
        elements: Vec<Option<NodeId>>,
    },
    ObjectPattern {
        properties: Vec<NodeId>,
    },
    RestElement {
        argument: NodeId,
    },

    // Classes
    ClassExpression {
        id: Option<NodeId>,
        super_class: Option<NodeId>,
        body: NodeId,
    },
    ClassBody {
        body: Vec<NodeId>,
    },
    MethodDefinition {
        key: NodeId,
        value: NodeId,
        computed: bool,
        is_static: bool,
    },
    PropertyDefinition {
        key: NodeId,
        value: Option<NodeId>,
        computed: bool,
        is_static: bool,
    },
    StaticBlock {
        body: Vec<NodeId>,
    },

    // Modules
    ImportDeclaration {
        specifiers: Vec<NodeId>,
        source: NodeId,
    },
    ImportSpecifier {
        imported: NodeId,
        local: NodeId,
    },
    ImportDefaultSpecifier {
        local: NodeId,
    },
    ImportNamespaceSpecifier {
        local: NodeId,
    },
    ExportNamedDeclaration {
        declaration: Option<NodeId>,
        specifiers: Vec<NodeId>,
        source: Option<NodeId>,
    },
    ExportSpecifier {
        local: NodeId,
        exported: NodeId,
    },
    ExportDefaultDeclaration {
        declaration: NodeId,
    },
}

impl NodeKind {
    /// The fieldless tag for this node.
    pub const fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Program { .. } => NodeType::Program,
            NodeKind::Identifier { .. } => NodeType::Identifier,
            NodeKind::Literal { .. } => NodeType::Literal,
            NodeKind::TemplateLiteral { .. } => NodeType::TemplateLiteral,
            NodeKind::ExpressionStatement { .. } => NodeType::ExpressionStatement,
            NodeKind::BlockStatement { .. } => NodeType::BlockStatement,
            NodeKind::EmptyStatement => NodeType::EmptyStatement,
            NodeKind::DebuggerStatement => NodeType::DebuggerStatement,
            NodeKind::IfStatement { .. } => NodeType::IfStatement,
            NodeKind::LabeledStatement { .. } => NodeType::LabeledStatement,
            NodeKind::BreakStatement { .. } => NodeType::BreakStatement,
            NodeKind::ContinueStatement { .. } => NodeType::ContinueStatement,
            NodeKind::WithStatement { .. } => NodeType::WithStatement,
            NodeKind::SwitchStatement { .. } => NodeType::SwitchStatement,
            NodeKind::SwitchCase { .. } => NodeType::SwitchCase,
            NodeKind::ReturnStatement { .. } => NodeType::ReturnStatement,
            NodeKind::ThrowStatement { .. } => NodeType::ThrowStatement,
            NodeKind::TryStatement { .. } => NodeType::TryStatement,
            NodeKind::CatchClause { .. } => NodeType::CatchClause,
            NodeKind::WhileStatement { .. } => NodeType::WhileStatement,
            NodeKind::DoWhileStatement { .. } => NodeType::DoWhileStatement,
            NodeKind::ForStatement { .. } => NodeType::ForStatement,
            NodeKind::ForInStatement { .. } => NodeType::ForInStatement,
            NodeKind::ForOfStatement { .. } => NodeType::ForOfStatement,
            NodeKind::FunctionDeclaration { .. } => NodeType::FunctionDeclaration,
            NodeKind::VariableDeclaration { .. } => NodeType::VariableDeclaration,
            NodeKind::VariableDeclarator { .. } => NodeType::VariableDeclarator,
            NodeKind::ClassDeclaration { .. } => NodeType::ClassDeclaration,
            NodeKind::ThisExpression => NodeType::ThisExpression,
            NodeKind::ArrayExpression { .. } => NodeType::ArrayExpression,
            NodeKind::ObjectExpression { .. } => NodeType::ObjectExpression,
            NodeKind::Property { .. } => NodeType::Property,
            NodeKind::FunctionExpression { .. } => NodeType::FunctionExpression,
            NodeKind::ArrowFunctionExpression { .. } => NodeType::ArrowFunctionExpression,
            NodeKind::UnaryExpression { .. } => NodeType::UnaryExpression,
            NodeKind::UpdateExpression { .. } => NodeType::UpdateExpression,
            NodeKind::BinaryExpression { .. } => NodeType::BinaryExpression,
            NodeKind::LogicalExpression { .. } => NodeType::LogicalExpression,
            NodeKind::AssignmentExpression { .. } => NodeType::AssignmentExpression,
            NodeKind::ConditionalExpression { .. } => NodeType::ConditionalExpression,
            NodeKind::CallExpression { .. } => NodeType::CallExpression,
            NodeKind::NewExpression { .. } => NodeType::NewExpression,
            NodeKind::SequenceExpression { .. } => NodeType::SequenceExpression,
            NodeKind::MemberExpression { .. } => NodeType::MemberExpression,
            NodeKind::SpreadElement { .. } => NodeType::SpreadElement,
            NodeKind::AssignmentPattern { .. } => NodeType::AssignmentPattern,
            NodeKind::ArrayPattern { .. } => NodeType::ArrayPattern,
            NodeKind::ObjectPattern { .. } => NodeType::ObjectPattern,
            NodeKind::RestElement { .. } => NodeType::RestElement,
            NodeKind::ClassExpression { .. } => NodeType::ClassExpression,
            NodeKind::ClassBody { .. } => NodeType::ClassBody,
            NodeKind::MethodDefinition { .. } => NodeType::MethodDefinition,
            NodeKind::PropertyDefinition { .. } => NodeType::PropertyDefinition,
            NodeKind::StaticBlock { .. } => NodeType::StaticBlock,
            NodeKind::ImportDeclaration { .. } => NodeType::ImportDeclaration,
            NodeKind::ImportSpecifier { .. } => NodeType::ImportSpecifier,
            NodeKind::ImportDefaultSpecifier { .. } => NodeType::ImportDefaultSpecifier,
            NodeKind::ImportNamespaceSpecifier { .. } => NodeType::ImportNamespaceSpecifier,
            NodeKind::ExportNamedDeclaration { .. } => NodeType::ExportNamedDeclaration,
            NodeKind::ExportSpecifier { .. } => NodeType::ExportSpecifier,
            NodeKind::ExportDefaultDeclaration { .. } => NodeType::ExportDefaultDeclaration,
        }
    }

    /// The identifier's name, if this node is an identifier.
    pub const fn as_identifier(&self) -> Option<Name> {
        match self {
            NodeKind::Identifier { name } => Some(*name),
            _ => None,
        }
    }
}

/// Fieldless node type tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Program,
    Identifier,
    Literal,
    TemplateLiteral,
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    IfStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    WithStatement,
    SwitchStatement,
    SwitchCase,
    ReturnStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    ClassDeclaration,
    ThisExpression,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    ArrowFunctionExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    SequenceExpression,
    MemberExpression,
    SpreadElement,
    AssignmentPattern,
    ArrayPattern,
    ObjectPattern,
    RestElement,
    ClassExpression,
    ClassBody,
    MethodDefinition,
    PropertyDefinition,
    StaticBlock,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportSpecifier,
    ExportDefaultDeclaration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_type_matches_variant() {
        let kind = NodeKind::BreakStatement { label: None };
        assert_eq!(kind.node_type(), NodeType::BreakStatement);

        let kind = NodeKind::ThisExpression;
        assert_eq!(kind.node_type(), NodeType::ThisExpression);
    }

    #[test]
    fn as_identifier() {
        let name = Name::from_raw(7);
        assert_eq!(NodeKind::Identifier { name }.as_identifier(), Some(name));
        assert_eq!(NodeKind::EmptyStatement.as_identifier(), None);
    }

    #[test]
    fn assign_op_plainness() {
        assert!(AssignOp::Assign.is_plain());
        assert!(!AssignOp::Add.is_plain());
    }
}
