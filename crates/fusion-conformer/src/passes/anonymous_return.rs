use super::{Pass, PassResult, VisitAction};
use fusion_parser::{Node, NodeIndex, SyntaxTree};
use tracing::trace;

/// Turns a top-level `new class { ... };` statement into
/// `return new class { ... };`.
#[derive(Default)]
pub struct AnonymousReturnPass;

impl AnonymousReturnPass {
    pub fn new() -> Self {
        AnonymousReturnPass
    }
}

/// The `new class` expression of a bare expression statement.
fn anonymous_new(tree: &SyntaxTree, stmt: NodeIndex) -> Option<NodeIndex> {
    let expr = tree.arena.get_expr_stmt(stmt)?;
    tree.arena.get_anonymous_class_of_new(expr).map(|_| expr)
}

impl Pass for AnonymousReturnPass {
    fn name(&self) -> &'static str {
        "anonymous-return"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        tree.root_statements()
            .iter()
            .any(|stmt| anonymous_new(tree, *stmt).is_some())
    }

    fn enter_node(&mut self, tree: &mut SyntaxTree, node: NodeIndex) -> PassResult<VisitAction> {
        if tree.parent(node) != tree.root {
            return Ok(VisitAction::SkipChildren);
        }
        let Some(new) = anonymous_new(tree, node) else {
            return Ok(VisitAction::SkipChildren);
        };
        trace!("returning anonymous class");
        Ok(VisitAction::Replace(tree.add(Node::Return(new))))
    }
}
