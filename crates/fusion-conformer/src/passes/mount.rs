use super::utils::{assignment_of, find_first, is_call_named};
use super::{Pass, PassResult, VisitAction};
use crate::error::SemanticError;
use fusion_parser::{Node, NodeIndex, SyntaxTree};
use tracing::trace;

/// Rewrites `mount(fn)` to `$this->mount(fn)`, standalone or assigned.
#[derive(Default)]
pub struct MountPass;

impl MountPass {
    pub fn new() -> Self {
        MountPass
    }
}

/// The mount call on `$this`, after checking it takes exactly one closure
/// or arrow function.
fn rewrite(tree: &mut SyntaxTree, call: NodeIndex) -> Result<NodeIndex, SemanticError> {
    let args = tree
        .arena
        .get_func_call(call)
        .map(|data| data.args.clone())
        .unwrap_or_default();
    let [arg] = args.as_slice() else {
        return Err(SemanticError::MountArity);
    };
    let value = tree.arena.get_arg(*arg).map_or(NodeIndex::NONE, |data| data.value);
    if !tree.arena.is_function_literal(value) {
        return Err(SemanticError::MountArgument);
    }
    trace!("rewriting mount call");
    Ok(tree.arena.make_this_call("mount", args))
}

impl Pass for MountPass {
    fn name(&self) -> &'static str {
        "mount"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        find_first(tree, tree.root, |tree, idx| is_call_named(tree, idx, "mount")).is_some()
    }

    fn enter_node(&mut self, tree: &mut SyntaxTree, node: NodeIndex) -> PassResult<VisitAction> {
        if let Some(assignment) = assignment_of(tree, node) {
            if is_call_named(tree, assignment.value, "mount") {
                let rewritten = rewrite(tree, assignment.value)?;
                if let Some(data) = tree.arena.get_assign_mut(assignment.assign) {
                    data.value = rewritten;
                }
                tree.connect_subtree(assignment.assign);
            }
            return Ok(VisitAction::Continue);
        }

        let Some(call) = tree.arena.get_expr_stmt(node) else {
            return Ok(VisitAction::Continue);
        };
        if !is_call_named(tree, call, "mount") {
            return Ok(VisitAction::Continue);
        }
        let rewritten = rewrite(tree, call)?;
        Ok(VisitAction::Replace(tree.add(Node::ExprStmt(rewritten))))
    }
}
