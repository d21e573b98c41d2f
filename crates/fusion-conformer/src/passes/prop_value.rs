//! Ends every `$this->prop(...)` chain with `->value()`.

use super::utils::{
    find_all, find_first, gather_chain, is_instance_call_named, is_method_call_named,
};
use super::{Pass, PassResult};
use fusion_parser::{NodeIndex, SyntaxTree};
use tracing::trace;

#[derive(Default)]
pub struct PropValuePass;

impl PropValuePass {
    pub fn new() -> Self {
        PropValuePass
    }
}

/// A method call that is not itself the receiver of another method call.
fn is_outermost_call(tree: &SyntaxTree, idx: NodeIndex) -> bool {
    if tree.arena.get_method_call(idx).is_none() {
        return false;
    }
    tree.arena
        .get_method_call(tree.parent(idx))
        .is_none_or(|parent| parent.receiver != idx)
}

fn complete_chain(tree: &mut SyntaxTree, outermost: NodeIndex) {
    let chain = gather_chain(tree, outermost);
    let Some(&innermost) = chain.last() else {
        return;
    };
    if !is_instance_call_named(tree, innermost, "prop") {
        return;
    }
    if chain
        .iter()
        .any(|call| is_method_call_named(tree, *call, "value"))
    {
        return;
    }

    let completed = tree.arena.make_method_call(outermost, "value", Vec::new());
    if tree.replace_node(outermost, completed) {
        tree.set_parent(outermost, completed);
        trace!(links = chain.len(), "appended value()");
    }
}

impl Pass for PropValuePass {
    fn name(&self) -> &'static str {
        "prop-value"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        find_first(tree, tree.root, |tree, idx| is_instance_call_named(tree, idx, "prop")).is_some()
    }

    fn after_traverse(&mut self, tree: &mut SyntaxTree) -> PassResult<()> {
        for outermost in find_all(tree, tree.root, is_outermost_call) {
            complete_chain(tree, outermost);
        }
        Ok(())
    }
}
