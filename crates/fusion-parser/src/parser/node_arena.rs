//! NodeArena creation methods.
//!
//! This module contains node creation, replacement and deep cloning, plus the
//! `make_*` builders passes use to synthesize nodes.

use super::base::{NodeIndex, NodeList};
use super::node::*;

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow on huge inputs.
    const MAX_NODE_PREALLOC: usize = 1_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(Self::MAX_NODE_PREALLOC)),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node and return its index.
    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        index
    }

    /// Overwrite the node stored at `index`. Returns false for absent indices.
    pub fn set(&mut self, index: NodeIndex, node: Node) -> bool {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = node;
                true
            }
            None => false,
        }
    }

    /// Copy the subtree rooted at `index` into fresh nodes.
    pub fn deep_clone(&mut self, index: NodeIndex) -> NodeIndex {
        let Some(mut node) = self.get(index).cloned() else {
            return NodeIndex::NONE;
        };
        for slot in node.slots_mut() {
            match slot {
                ChildSlotMut::One(child) => *child = self.deep_clone(*child),
                ChildSlotMut::Many(list) => {
                    for child in list.iter_mut() {
                        *child = self.deep_clone(*child);
                    }
                }
            }
        }
        self.add(node)
    }

    pub fn make_name(&mut self, text: &str, kind: NameKind) -> NodeIndex {
        self.add(Node::Name(NameData::new(text, kind)))
    }

    /// Build a name from source spelling, honoring a leading `\`.
    pub fn make_name_from_source(&mut self, text: &str) -> NodeIndex {
        match text.strip_prefix('\\') {
            Some(rest) => self.make_name(rest, NameKind::FullyQualified),
            None => self.make_name(text, NameKind::Normal),
        }
    }

    pub fn make_identifier(&mut self, text: &str) -> NodeIndex {
        self.add(Node::Identifier(text.to_string()))
    }

    pub fn make_variable(&mut self, name: &str) -> NodeIndex {
        self.add(Node::Variable(name.to_string()))
    }

    /// A synthesized (single-quoted when printed) string.
    pub fn make_string(&mut self, value: &str) -> NodeIndex {
        self.add(Node::StringLit(StringLit {
            value: value.to_string(),
            raw: None,
        }))
    }

    pub fn make_arg(&mut self, value: NodeIndex, name: Option<&str>) -> NodeIndex {
        self.add(Node::Arg(ArgData {
            name: name.map(str::to_string),
            value,
            unpack: false,
            by_ref: false,
        }))
    }

    pub fn make_func_call(&mut self, name: &str, args: NodeList) -> NodeIndex {
        let callee = self.make_name_from_source(name);
        self.add(Node::FuncCall(CallData { callee, args }))
    }

    pub fn make_method_call(
        &mut self,
        receiver: NodeIndex,
        name: &str,
        args: NodeList,
    ) -> NodeIndex {
        let name = self.make_identifier(name);
        self.add(Node::MethodCall(MethodCallData {
            receiver,
            name,
            args,
            nullsafe: false,
        }))
    }

    /// `$this->name(args)`
    pub fn make_this_call(&mut self, name: &str, args: NodeList) -> NodeIndex {
        let this = self.make_variable("this");
        self.make_method_call(this, name, args)
    }

    /// `#[\Name]` as a single-attribute group.
    pub fn make_attribute_group(&mut self, name: &str) -> NodeIndex {
        let name = self.make_name_from_source(name);
        let attribute = self.add(Node::Attribute(AttributeData {
            name,
            args: Vec::new(),
        }));
        self.add(Node::AttributeGroup(vec![attribute]))
    }
}
