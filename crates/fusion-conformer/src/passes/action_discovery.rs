//! Turns exposed closures into public action methods.
//!
//! For `$this->expose(favorite: function (int $id) { ... })` the class gains
//!
//! ```php
//! #[\Fusion\Attributes\Expose]
//! public function favorite(int $id)
//! {
//!     return call_user_func($this->actions[__FUNCTION__], ...func_get_args());
//! }
//! ```

use super::utils::{find_class, find_first, is_instance_call_named, uses_procedural_trait};
use super::{Pass, PassResult, VisitAction};
use crate::config::ConformOptions;
use fusion_parser::{
    ArgData, ArrayDimFetchData, MethodData, Modifiers, NameKind, Node, NodeIndex, NodeList,
    PropertyFetchData, SyntaxTree,
};
use tracing::debug;

struct Action {
    name: String,
    params: NodeList,
}

pub struct ActionDiscoveryPass {
    trait_name: String,
    attribute: String,
    actions: Vec<Action>,
}

impl ActionDiscoveryPass {
    pub fn new(options: &ConformOptions) -> Self {
        ActionDiscoveryPass {
            trait_name: options.procedural_trait.clone(),
            attribute: options.expose_attribute.clone(),
            actions: Vec::new(),
        }
    }

    /// `return call_user_func($this->actions[__FUNCTION__], ...func_get_args());`
    fn forwarding_body(tree: &mut SyntaxTree) -> NodeIndex {
        let this = tree.arena.make_variable("this");
        let actions = tree.arena.make_identifier("actions");
        let handlers = tree.add(Node::PropertyFetch(PropertyFetchData {
            receiver: this,
            name: actions,
            nullsafe: false,
        }));
        let function_name = tree.arena.make_name("__FUNCTION__", NameKind::Normal);
        let function_name = tree.add(Node::ConstFetch(function_name));
        let handler = tree.add(Node::ArrayDimFetch(ArrayDimFetchData {
            array: handlers,
            dim: function_name,
        }));
        let handler = tree.arena.make_arg(handler, None);

        let received = tree.arena.make_func_call("func_get_args", Vec::new());
        let received = tree.add(Node::Arg(ArgData {
            name: None,
            value: received,
            unpack: true,
            by_ref: false,
        }));

        let call = tree
            .arena
            .make_func_call("call_user_func", vec![handler, received]);
        tree.add(Node::Return(call))
    }

    fn action_method(&self, tree: &mut SyntaxTree, action: &Action) -> NodeIndex {
        let params = action
            .params
            .iter()
            .map(|param| tree.arena.deep_clone(*param))
            .collect();
        let attribute = tree.arena.make_attribute_group(&self.attribute);
        let body = Self::forwarding_body(tree);
        tree.add(Node::ClassMethod(MethodData {
            attr_groups: vec![attribute],
            modifiers: Modifiers::PUBLIC,
            by_ref: false,
            name: action.name.clone(),
            params,
            return_type: NodeIndex::NONE,
            body: vec![body],
            has_body: true,
        }))
    }
}

impl Pass for ActionDiscoveryPass {
    fn name(&self) -> &'static str {
        "action-discovery"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        let exposes =
            find_first(tree, tree.root, |tree, idx| is_instance_call_named(tree, idx, "expose"));
        exposes.is_some() && uses_procedural_trait(tree, &self.trait_name)
    }

    fn before_traverse(&mut self, _tree: &mut SyntaxTree) -> PassResult<()> {
        self.actions.clear();
        Ok(())
    }

    fn enter_node(&mut self, tree: &mut SyntaxTree, node: NodeIndex) -> PassResult<VisitAction> {
        let Some(call) = tree.arena.get_method_call(node) else {
            return Ok(VisitAction::Continue);
        };
        if !is_instance_call_named(tree, node, "expose") {
            return Ok(VisitAction::Continue);
        }
        for &arg in &call.args {
            let Some(ArgData {
                name: Some(name),
                value,
                ..
            }) = tree.arena.get_arg(arg)
            else {
                continue;
            };
            if let Some(params) = tree.arena.get_function_params(*value) {
                self.actions.push(Action {
                    name: name.clone(),
                    params: params.clone(),
                });
            }
        }
        Ok(VisitAction::Continue)
    }

    fn after_traverse(&mut self, tree: &mut SyntaxTree) -> PassResult<()> {
        if self.actions.is_empty() {
            return Ok(());
        }
        let Some(class) = find_class(tree) else {
            return Ok(());
        };
        debug!(actions = self.actions.len(), "synthesizing action methods");

        let actions = std::mem::take(&mut self.actions);
        let methods: Vec<NodeIndex> = actions
            .iter()
            .map(|action| self.action_method(tree, action))
            .collect();
        if let Some(data) = tree.arena.get_class_mut(class) {
            data.members.extend(methods);
        }
        tree.connect_subtree(class);
        Ok(())
    }
}
