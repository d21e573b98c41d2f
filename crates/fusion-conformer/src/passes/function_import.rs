//! Drops imports of the magic functions (`use function Fusion\prop;`).
//!
//! Once calls are rewritten to `$this->...` the imports point at functions
//! that are never called.

use super::utils::find_first;
use super::{Pass, PassResult, VisitAction};
use crate::registry::FunctionRegistry;
use fusion_parser::{Node, NodeIndex, SyntaxTree, UseKind};
use tracing::trace;

pub struct FunctionImportPass {
    registry: FunctionRegistry,
}

impl FunctionImportPass {
    pub fn new(registry: FunctionRegistry) -> Self {
        FunctionImportPass { registry }
    }

    fn is_registered(&self, tree: &SyntaxTree, item: NodeIndex) -> bool {
        let Some(Node::UseItem(data)) = tree.get(item) else {
            return false;
        };
        tree.arena
            .get_name(data.name)
            .is_some_and(|name| self.registry.contains(name.last_segment()))
    }

    fn is_function_import(tree: &SyntaxTree, idx: NodeIndex) -> bool {
        match tree.get(idx) {
            Some(Node::Use(data)) => data.kind == UseKind::Function && !data.items.is_empty(),
            _ => false,
        }
    }

    fn group_imports_function(&self, tree: &SyntaxTree, idx: NodeIndex) -> bool {
        let Some(Node::GroupUse(data)) = tree.get(idx) else {
            return false;
        };
        data.kind == UseKind::Function
            || data.items.iter().any(|item| {
                let is_function = matches!(
                    tree.get(*item),
                    Some(Node::UseItem(use_item)) if use_item.kind == UseKind::Function
                );
                is_function || self.is_registered(tree, *item)
            })
    }

    /// Remove registered items from the import at `idx`. Returns whether any
    /// item is left.
    fn prune(&self, tree: &mut SyntaxTree, idx: NodeIndex) -> bool {
        let items = match tree.get(idx) {
            Some(Node::Use(data)) => data.items.clone(),
            Some(Node::GroupUse(data)) => data.items.clone(),
            _ => return true,
        };
        let kept: Vec<NodeIndex> = items
            .iter()
            .copied()
            .filter(|item| !self.is_registered(tree, *item))
            .collect();
        trace!(removed = items.len() - kept.len(), "pruned function imports");

        let remaining = !kept.is_empty();
        match tree.get_mut(idx) {
            Some(Node::Use(data)) => data.items = kept,
            Some(Node::GroupUse(data)) => data.items = kept,
            _ => {}
        }
        remaining
    }
}

impl Pass for FunctionImportPass {
    fn name(&self) -> &'static str {
        "function-import"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        if self.registry.is_empty() {
            return false;
        }
        find_first(tree, tree.root, |tree, idx| {
            Self::is_function_import(tree, idx) || self.group_imports_function(tree, idx)
        })
        .is_some()
    }

    fn enter_node(&mut self, tree: &mut SyntaxTree, node: NodeIndex) -> PassResult<VisitAction> {
        let is_import = Self::is_function_import(tree, node)
            || matches!(tree.get(node), Some(Node::GroupUse(_)));
        if !is_import {
            return Ok(VisitAction::Continue);
        }
        Ok(if self.prune(tree, node) {
            VisitAction::SkipChildren
        } else {
            VisitAction::Remove
        })
    }
}
