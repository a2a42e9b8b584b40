//! Binding-pattern enumeration.
//!
//! Declarations, parameters, and assignment targets may be arbitrary
//! destructuring patterns. This walker flattens a pattern into its parts in
//! source-text order: the identifiers it binds, and the embedded expressions
//! (default values, computed keys, member-expression targets) that are not
//! bindings and must be visited as ordinary code.

use sable_ast::{Ast, Name, NodeId, NodeKind};

/// One part of a flattened pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PatternElement {
    /// An identifier bound by the pattern.
    Binding { ident: NodeId, name: Name },
    /// An embedded expression subtree the pattern does not bind.
    Expression(NodeId),
}

enum Item {
    Pattern(NodeId),
    Expr(NodeId),
}

/// Invoke `f` for each element of the pattern rooted at `root`, in
/// source-text order.
pub(crate) fn walk_pattern(ast: &Ast, root: NodeId, mut f: impl FnMut(PatternElement)) {
    let mut stack = vec![Item::Pattern(root)];
    while let Some(item) = stack.pop() {
        let node = match item {
            Item::Expr(node) => {
                f(PatternElement::Expression(node));
                continue;
            }
            Item::Pattern(node) => node,
        };
        match ast.kind(node) {
            NodeKind::Identifier { name } => {
                f(PatternElement::Binding { ident: node, name: *name });
            }
            NodeKind::ObjectPattern { properties } => {
                for &prop in properties.iter().rev() {
                    stack.push(Item::Pattern(prop));
                }
            }
            NodeKind::Property { key, value, computed, .. } => {
                stack.push(Item::Pattern(*value));
                if *computed {
                    stack.push(Item::Expr(*key));
                }
            }
            NodeKind::ArrayPattern { elements } => {
                for &element in elements.iter().rev() {
                    if let Some(element) = element {
                        stack.push(Item::Pattern(element));
                    }
                }
            }
            NodeKind::AssignmentPattern { left, right } => {
                stack.push(Item::Expr(*right));
                stack.push(Item::Pattern(*left));
            }
            NodeKind::RestElement { argument } => {
                stack.push(Item::Pattern(*argument));
            }
            // Assignment targets may also be member expressions or other
            // non-binding forms; hand those back whole.
            _ => f(PatternElement::Expression(node)),
        }
    }
}

/// Invoke `f` for each identifier the pattern binds, ignoring embedded
/// expressions.
pub(crate) fn each_bound_identifier(ast: &Ast, root: NodeId, mut f: impl FnMut(NodeId, Name)) {
    walk_pattern(ast, root, |element| {
        if let PatternElement::Binding { ident, name } = element {
            f(ident, name);
        }
    });
}
