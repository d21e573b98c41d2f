//! NodeArena access methods.
//!
//! Typed accessors return `None` when the index is absent or the node is of
//! another kind, so callers can chain them with `?`.

use super::base::{NodeIndex, NodeList};
use super::node::*;

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    /// Direct children of a node in source order.
    pub fn children(&self, index: NodeIndex) -> NodeList {
        self.get(index).map(Node::children).unwrap_or_default()
    }

    /// All nodes below `index` (excluding it) in pre-order.
    pub fn descendants(&self, index: NodeIndex) -> NodeList {
        let mut out = Vec::new();
        let mut stack: Vec<NodeIndex> = self.children(index).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        out
    }

    #[inline]
    pub fn get_name(&self, index: NodeIndex) -> Option<&NameData> {
        match self.get(index)? {
            Node::Name(data) => Some(data),
            _ => None,
        }
    }

    /// Text of an `Identifier` node.
    #[inline]
    pub fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.get(index)? {
            Node::Identifier(text) => Some(text),
            _ => None,
        }
    }

    /// Name of a plain `$variable` (without `$`).
    #[inline]
    pub fn get_variable_name(&self, index: NodeIndex) -> Option<&str> {
        match self.get(index)? {
            Node::Variable(name) => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn get_string(&self, index: NodeIndex) -> Option<&StringLit> {
        match self.get(index)? {
            Node::StringLit(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_func_call(&self, index: NodeIndex) -> Option<&CallData> {
        match self.get(index)? {
            Node::FuncCall(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_method_call(&self, index: NodeIndex) -> Option<&MethodCallData> {
        match self.get(index)? {
            Node::MethodCall(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_method_call_mut(&mut self, index: NodeIndex) -> Option<&mut MethodCallData> {
        match self.get_mut(index)? {
            Node::MethodCall(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_arg(&self, index: NodeIndex) -> Option<&ArgData> {
        match self.get(index)? {
            Node::Arg(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_assign(&self, index: NodeIndex) -> Option<&AssignData> {
        match self.get(index)? {
            Node::Assign(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_assign_mut(&mut self, index: NodeIndex) -> Option<&mut AssignData> {
        match self.get_mut(index)? {
            Node::Assign(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_class(&self, index: NodeIndex) -> Option<&ClassData> {
        match self.get(index)? {
            Node::Class(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_class_mut(&mut self, index: NodeIndex) -> Option<&mut ClassData> {
        match self.get_mut(index)? {
            Node::Class(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_new(&self, index: NodeIndex) -> Option<&NewData> {
        match self.get(index)? {
            Node::New(data) => Some(data),
            _ => None,
        }
    }

    /// The expression of an expression statement.
    #[inline]
    pub fn get_expr_stmt(&self, index: NodeIndex) -> Option<NodeIndex> {
        match self.get(index)? {
            Node::ExprStmt(expr) => Some(*expr),
            _ => None,
        }
    }

    /// The operand of a `return` (may be `NONE`).
    #[inline]
    pub fn get_return(&self, index: NodeIndex) -> Option<NodeIndex> {
        match self.get(index)? {
            Node::Return(expr) => Some(*expr),
            _ => None,
        }
    }

    /// Parameters of a closure or arrow function.
    pub fn get_function_params(&self, index: NodeIndex) -> Option<&NodeList> {
        match self.get(index)? {
            Node::Closure(data) => Some(&data.params),
            Node::ArrowFunction(data) => Some(&data.params),
            _ => None,
        }
    }

    /// Closure or arrow function literal.
    #[inline]
    pub fn is_function_literal(&self, index: NodeIndex) -> bool {
        matches!(
            self.get(index),
            Some(Node::Closure(_) | Node::ArrowFunction(_))
        )
    }

    /// `new class { ... }`: returns the anonymous `Class` node.
    pub fn get_anonymous_class_of_new(&self, index: NodeIndex) -> Option<NodeIndex> {
        let new = self.get_new(index)?;
        let class = self.get_class(new.class)?;
        class.name.is_none().then_some(new.class)
    }
}
