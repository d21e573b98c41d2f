//! Rewrites free `prop(...)` calls into `$this->prop(...)` with named
//! arguments.
//!
//! The prop's name comes from, in order: a `name:` argument, the variable
//! the call is assigned to, or the variable passed as the default. Extra
//! positional arguments are dropped. The positional default becomes
//! `default:`. Chained modifiers (`->readonly()`, ...) are kept on top of
//! the rewritten call.

use super::utils::{
    apply_chain, assignment_of, chain_base, find_first, is_call_named, named_arg, positional_args,
};
use super::{Pass, PassResult, VisitAction};
use fusion_parser::{NodeIndex, NodeList, SyntaxTree};
use tracing::trace;

#[derive(Default)]
pub struct PropPass;

impl PropPass {
    pub fn new() -> Self {
        PropPass
    }
}

/// `prop(...)` or a method chain whose innermost receiver is one.
fn is_prop_node(tree: &SyntaxTree, node: NodeIndex) -> bool {
    if is_call_named(tree, node, "prop") {
        return true;
    }
    if tree.arena.get_method_call(node).is_none() {
        return false;
    }
    let (base, _) = chain_base(tree, node);
    is_call_named(tree, base, "prop")
}

fn arg_value(tree: &SyntaxTree, arg: NodeIndex) -> NodeIndex {
    tree.arena.get_arg(arg).map_or(NodeIndex::NONE, |data| data.value)
}

/// Arguments of the rewritten call: `name:`, `default:`, then any other
/// named arguments in their original order.
fn build_arguments(
    tree: &mut SyntaxTree,
    args: &[NodeIndex],
    assigned: Option<&str>,
) -> NodeList {
    let positional = positional_args(tree, args);
    let explicit_name = named_arg(tree, args, "name");
    let default = named_arg(tree, args, "default")
        .or_else(|| positional.first().copied())
        .map(|arg| arg_value(tree, arg));
    let default_variable = default
        .and_then(|value| tree.arena.get_variable_name(value))
        .map(str::to_string);

    let mut out = Vec::with_capacity(args.len() + 1);
    if let Some(name) = explicit_name {
        out.push(name);
    } else if let Some(name) = assigned.map(str::to_string).or(default_variable) {
        let value = tree.arena.make_string(&name);
        out.push(tree.arena.make_arg(value, Some("name")));
    }

    if let Some(value) = default {
        out.push(tree.arena.make_arg(value, Some("default")));
    }

    for &arg in args {
        let passthrough = tree
            .arena
            .get_arg(arg)
            .and_then(|data| data.name.as_deref())
            .is_some_and(|name| name != "name" && name != "default");
        if passthrough {
            out.push(arg);
        }
    }
    out
}

/// Rebuild `node` (a prop call or chain) on `$this`.
fn rewrite(tree: &mut SyntaxTree, node: NodeIndex, assigned: Option<&str>) -> NodeIndex {
    let (base, links) = chain_base(tree, node);
    let args = tree
        .arena
        .get_func_call(base)
        .map(|call| call.args.clone())
        .unwrap_or_default();

    // Two bare positional arguments without an assignment are ambiguous;
    // keep them as written.
    let keep_as_written =
        assigned.is_none() && args.len() == 2 && positional_args(tree, &args).len() == 2;
    let args = if keep_as_written {
        args
    } else {
        build_arguments(tree, &args, assigned)
    };

    trace!(links = links.len(), assigned, "rewriting prop call");
    let call = tree.arena.make_this_call("prop", args);
    let rewritten = apply_chain(tree, call, links);
    tree.connect_subtree(rewritten);
    rewritten
}

impl Pass for PropPass {
    fn name(&self) -> &'static str {
        "prop"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        find_first(tree, tree.root, |tree, idx| is_call_named(tree, idx, "prop")).is_some()
    }

    fn enter_node(&mut self, tree: &mut SyntaxTree, node: NodeIndex) -> PassResult<VisitAction> {
        if is_prop_node(tree, node) {
            return Ok(VisitAction::Replace(rewrite(tree, node, None)));
        }

        let Some(assignment) = assignment_of(tree, node) else {
            return Ok(VisitAction::Continue);
        };
        if !is_prop_node(tree, assignment.value) {
            return Ok(VisitAction::Continue);
        }

        let assigned = tree
            .arena
            .get_variable_name(assignment.target)
            .map(str::to_string);
        let rewritten = rewrite(tree, assignment.value, assigned.as_deref());
        if let Some(data) = tree.arena.get_assign_mut(assignment.assign) {
            data.value = rewritten;
        }
        tree.set_parent(rewritten, assignment.assign);
        Ok(VisitAction::Continue)
    }
}
