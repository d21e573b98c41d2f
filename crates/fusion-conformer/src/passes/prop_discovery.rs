//! Records the names of all props on a procedural page.
//!
//! The names end up in a server-only property at the top of the class:
//!
//! ```php
//! #[\Fusion\Attributes\ServerOnly]
//! public array $discoveredProps = ['test', 'other'];
//! ```
//!
//! Only names spelled as string literals are recorded; a computed name is
//! left for the runtime to resolve.

use super::literal::LiteralValue;
use super::utils::{
    find_class, is_instance_call_named, named_arg, positional_args, uses_procedural_trait,
};
use super::{Pass, PassResult, VisitAction};
use crate::config::ConformOptions;
use fusion_parser::{Modifiers, NameKind, Node, NodeIndex, PropertyData, PropertyItem, SyntaxTree};
use indexmap::IndexSet;
use tracing::{debug, trace};

pub struct PropDiscoveryPass {
    trait_name: String,
    attribute: String,
    property: String,
    discovered: IndexSet<String>,
}

impl PropDiscoveryPass {
    pub fn new(options: &ConformOptions) -> Self {
        PropDiscoveryPass {
            trait_name: options.procedural_trait.clone(),
            attribute: options.server_only_attribute.clone(),
            property: options.discovered_props_property.clone(),
            discovered: IndexSet::new(),
        }
    }

    /// The value node naming the prop: a `name:` argument, else the second
    /// positional argument.
    fn name_value(tree: &SyntaxTree, call: NodeIndex) -> Option<NodeIndex> {
        let args = &tree.arena.get_method_call(call)?.args;
        let arg = named_arg(tree, args, "name")
            .or_else(|| positional_args(tree, args).get(1).copied())?;
        tree.arena.get_arg(arg).map(|data| data.value)
    }

    fn discovered_props(&self, tree: &mut SyntaxTree) -> NodeIndex {
        let names = LiteralValue::Array(
            self.discovered
                .iter()
                .map(|name| (None, LiteralValue::String(name.clone())))
                .collect(),
        );
        let default = names.to_node(tree);
        let item = tree.add(Node::PropertyItem(PropertyItem {
            name: self.property.clone(),
            default,
        }));
        let ty = tree.arena.make_name("array", NameKind::Normal);
        let attribute = tree.arena.make_attribute_group(&self.attribute);
        tree.add(Node::Property(PropertyData {
            attr_groups: vec![attribute],
            modifiers: Modifiers::PUBLIC,
            ty,
            items: vec![item],
        }))
    }
}

impl Pass for PropDiscoveryPass {
    fn name(&self) -> &'static str {
        "prop-discovery"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        uses_procedural_trait(tree, &self.trait_name)
    }

    fn before_traverse(&mut self, _tree: &mut SyntaxTree) -> PassResult<()> {
        self.discovered.clear();
        Ok(())
    }

    fn enter_node(&mut self, tree: &mut SyntaxTree, node: NodeIndex) -> PassResult<VisitAction> {
        if !is_instance_call_named(tree, node, "prop") {
            return Ok(VisitAction::Continue);
        }
        let name = Self::name_value(tree, node).and_then(|value| tree.arena.get_string(value));
        match name {
            Some(name) => {
                self.discovered.insert(name.value.clone());
            }
            None => trace!("skipping prop without a literal name"),
        }
        Ok(VisitAction::Continue)
    }

    fn after_traverse(&mut self, tree: &mut SyntaxTree) -> PassResult<()> {
        if self.discovered.is_empty() {
            return Ok(());
        }
        let Some(class) = find_class(tree) else {
            return Ok(());
        };
        debug!(props = ?self.discovered, "discovered props");

        let property = self.discovered_props(tree);
        if let Some(data) = tree.arena.get_class_mut(class) {
            data.members.insert(0, property);
        }
        tree.connect_subtree(class);
        Ok(())
    }
}
