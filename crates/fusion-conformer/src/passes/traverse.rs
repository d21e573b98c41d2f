//! Depth-first walk that applies a pass's hooks.
//!
//! The root itself is never visited; the walk starts at its children. A
//! node's child slots are snapshotted before its children are visited and
//! only slots whose contents changed are written back, so hooks are free to
//! edit the node they were called for.

use super::{Pass, PassResult, VisitAction};
use fusion_parser::{ChildSlot, ChildSlotMut, NodeIndex, NodeList, SyntaxTree};
use tracing::trace;

enum OwnedSlot {
    One(NodeIndex),
    Many(NodeList),
}

#[tracing::instrument(level = "debug", skip_all, fields(pass = pass.name()))]
pub fn traverse(tree: &mut SyntaxTree, pass: &mut dyn Pass) -> PassResult<()> {
    pass.before_traverse(tree)?;
    let root = tree.root;
    traverse_children(tree, pass, root)?;
    pass.after_traverse(tree)
}

fn snapshot(tree: &SyntaxTree, parent: NodeIndex) -> Vec<OwnedSlot> {
    let Some(node) = tree.get(parent) else {
        return Vec::new();
    };
    node.slots()
        .into_iter()
        .map(|slot| match slot {
            ChildSlot::One(child) => OwnedSlot::One(*child),
            ChildSlot::Many(list) => OwnedSlot::Many(list.clone()),
        })
        .collect()
}

fn traverse_children(
    tree: &mut SyntaxTree,
    pass: &mut dyn Pass,
    parent: NodeIndex,
) -> PassResult<()> {
    for (position, slot) in snapshot(tree, parent).into_iter().enumerate() {
        match slot {
            OwnedSlot::One(child) => {
                if child.is_none() {
                    continue;
                }
                let visited = visit(tree, pass, parent, child)?.unwrap_or(NodeIndex::NONE);
                if visited != child {
                    write_slot(tree, parent, position, OwnedSlot::One(visited));
                }
            }
            OwnedSlot::Many(list) => {
                let mut visited_list = Vec::with_capacity(list.len());
                for &child in &list {
                    if child.is_none() {
                        visited_list.push(child);
                        continue;
                    }
                    if let Some(visited) = visit(tree, pass, parent, child)? {
                        visited_list.push(visited);
                    }
                }
                if visited_list != list {
                    write_slot(tree, parent, position, OwnedSlot::Many(visited_list));
                }
            }
        }
    }
    Ok(())
}

/// Visit `child` and its subtree. Returns the node that now occupies the
/// child's place, or `None` when it was removed.
fn visit(
    tree: &mut SyntaxTree,
    pass: &mut dyn Pass,
    parent: NodeIndex,
    child: NodeIndex,
) -> PassResult<Option<NodeIndex>> {
    tree.set_parent(child, parent);

    let mut current = child;
    let mut descend = true;
    match pass.enter_node(tree, current)? {
        VisitAction::Continue => {}
        VisitAction::SkipChildren => descend = false,
        VisitAction::Replace(replacement) => {
            current = adopt(tree, parent, current, replacement);
        }
        VisitAction::Remove => {
            trace!(node = child.0, "removed on enter");
            tree.set_parent(child, NodeIndex::NONE);
            return Ok(None);
        }
    }

    if descend {
        traverse_children(tree, pass, current)?;
    }

    match pass.leave_node(tree, current)? {
        VisitAction::Continue | VisitAction::SkipChildren => Ok(Some(current)),
        VisitAction::Replace(replacement) => Ok(Some(adopt(tree, parent, current, replacement))),
        VisitAction::Remove => {
            trace!(node = current.0, "removed on leave");
            tree.set_parent(current, NodeIndex::NONE);
            Ok(None)
        }
    }
}

/// Link `replacement` into `parent` in place of `old`, carrying comments
/// over when the replacement has none.
fn adopt(
    tree: &mut SyntaxTree,
    parent: NodeIndex,
    old: NodeIndex,
    replacement: NodeIndex,
) -> NodeIndex {
    if replacement != old {
        trace!(old = old.0, new = replacement.0, "replaced");
        if tree.comments(replacement).is_empty() {
            let comments = tree.take_comments(old);
            tree.set_comments(replacement, comments);
        }
    }
    tree.set_parent(replacement, parent);
    tree.connect_subtree(replacement);
    replacement
}

fn write_slot(tree: &mut SyntaxTree, parent: NodeIndex, position: usize, value: OwnedSlot) {
    let Some(node) = tree.get_mut(parent) else {
        return;
    };
    match (node.slots_mut().into_iter().nth(position), value) {
        (Some(ChildSlotMut::One(slot)), OwnedSlot::One(child)) => *slot = child,
        (Some(ChildSlotMut::Many(slot)), OwnedSlot::Many(list)) => *slot = list,
        _ => {}
    }
}
