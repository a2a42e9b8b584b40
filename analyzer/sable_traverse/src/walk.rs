//! The iterative walker.
//!
//! Depth-first, enter-then-leave, driven by an explicit work stack so that
//! traversal depth is bounded by heap memory rather than call-stack frames.
//! Generated or deeply nested inputs routinely exceed call-stack limits, so
//! the engine never recurses.

use sable_ast::{Ast, Edge, NodeId};
use smallvec::SmallVec;

use crate::{EdgeTable, TraverseError};

/// Control flow signal returned by visitor callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Flow {
    /// Descend into the node's children per the edge table.
    #[default]
    Continue,
    /// Do not visit the children. The current node's `leave` still fires;
    /// enter/leave for the pruned descendants never does.
    Skip,
    /// Descend into exactly these children, in order, instead of the edge
    /// table's children. Only meaningful from `enter`.
    Descend(SmallVec<[NodeId; 8]>),
    /// Abort the whole traversal immediately; no further callbacks fire.
    Break,
}

/// How a traversal ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every reachable node was entered and left.
    Complete,
    /// A callback returned [`Flow::Break`].
    Aborted,
}

/// Tree visitor with enter/leave callbacks.
///
/// The visitor may mutate its own state freely; the tree is immutable.
/// `leave` may only `Continue` or `Break`; `Skip` and `Descend` are
/// meaningless after the children have been visited and are ignored.
pub trait Visitor {
    fn enter(&mut self, node: NodeId, ast: &Ast) -> Flow {
        let _ = (node, ast);
        Flow::Continue
    }

    fn leave(&mut self, node: NodeId, ast: &Ast) -> Flow {
        let _ = (node, ast);
        Flow::Continue
    }
}

enum Task {
    Enter(NodeId),
    Leave(NodeId),
}

/// Walk the tree rooted at `root` depth-first.
///
/// `enter` fires before a node's children, `leave` after all of them;
/// on a [`Outcome::Complete`] walk the two counts are equal. Children are
/// discovered through `table` (see [`EdgeTable`]); an unresolvable node
/// type halts the walk with an error.
pub fn traverse<V: Visitor>(
    ast: &Ast,
    root: NodeId,
    table: &EdgeTable,
    visitor: &mut V,
) -> Result<Outcome, TraverseError> {
    let mut stack: Vec<Task> = vec![Task::Enter(root)];

    while let Some(task) = stack.pop() {
        match task {
            Task::Enter(node) => match visitor.enter(node, ast) {
                Flow::Break => return Ok(Outcome::Aborted),
                Flow::Skip => stack.push(Task::Leave(node)),
                Flow::Descend(children) => {
                    stack.push(Task::Leave(node));
                    for &child in children.iter().rev() {
                        stack.push(Task::Enter(child));
                    }
                }
                Flow::Continue => {
                    stack.push(Task::Leave(node));
                    let children = collect_children(ast, node, table)?;
                    for &child in children.iter().rev() {
                        stack.push(Task::Enter(child));
                    }
                }
            },
            Task::Leave(node) => {
                if visitor.leave(node, ast) == Flow::Break {
                    return Ok(Outcome::Aborted);
                }
            }
        }
    }

    Ok(Outcome::Complete)
}

fn collect_children(
    ast: &Ast,
    node: NodeId,
    table: &EdgeTable,
) -> Result<SmallVec<[NodeId; 8]>, TraverseError> {
    let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();
    let kind = ast.kind(node);
    for &edge in table.edges_for(kind.node_type())? {
        match kind.edge(edge) {
            Edge::None => {}
            Edge::One(id) => children.push(id),
            Edge::Seq(ids) => children.extend_from_slice(ids),
            Edge::Sparse(slots) => children.extend(slots.iter().copied().flatten()),
        }
    }
    Ok(children)
}
