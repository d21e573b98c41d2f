use super::utils::{assignment_of, find_first, is_call_named};
use super::{Pass, PassResult, VisitAction};
use crate::error::SemanticError;
use fusion_parser::{Node, NodeIndex, SyntaxTree};
use tracing::trace;

/// Rewrites standalone `expose(name: fn)` statements to `$this->expose(...)`.
#[derive(Default)]
pub struct ExposePass;

impl ExposePass {
    pub fn new() -> Self {
        ExposePass
    }
}

impl Pass for ExposePass {
    fn name(&self) -> &'static str {
        "expose"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        find_first(tree, tree.root, |tree, idx| is_call_named(tree, idx, "expose")).is_some()
    }

    fn enter_node(&mut self, tree: &mut SyntaxTree, node: NodeIndex) -> PassResult<VisitAction> {
        if let Some(assignment) = assignment_of(tree, node)
            && is_call_named(tree, assignment.value, "expose")
        {
            return Err(SemanticError::AssignedExpose.into());
        }

        let Some(call) = tree.arena.get_expr_stmt(node) else {
            return Ok(VisitAction::Continue);
        };
        if !is_call_named(tree, call, "expose") {
            return Ok(VisitAction::Continue);
        }

        let args = tree
            .arena
            .get_func_call(call)
            .map(|data| data.args.clone())
            .unwrap_or_default();
        let unnamed = args
            .iter()
            .any(|arg| tree.arena.get_arg(*arg).is_some_and(|data| data.name.is_none()));
        if unnamed {
            return Err(SemanticError::UnnamedExpose.into());
        }

        trace!(actions = args.len(), "rewriting expose call");
        let call = tree.arena.make_this_call("expose", args);
        Ok(VisitAction::Replace(tree.add(Node::ExprStmt(call))))
    }
}
