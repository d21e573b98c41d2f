//! Syntax tree with parent and comment side tables.
//!
//! Nodes never store their parent or comments. `SyntaxTree` keeps both in
//! tables keyed by `NodeIndex`, so replacing a node is a matter of
//! overwriting one slot in the recorded parent.

use super::base::{NodeIndex, NodeList};
use super::node::{ChildSlotMut, Node, NodeArena};
use fusion_common::Comment;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
pub struct SyntaxTree {
    pub arena: NodeArena,
    /// The `File` node.
    pub root: NodeIndex,
    parents: Vec<NodeIndex>,
    comments: FxHashMap<NodeIndex, Vec<Comment>>,
}

impl SyntaxTree {
    pub fn new(
        arena: NodeArena,
        root: NodeIndex,
        comments: FxHashMap<NodeIndex, Vec<Comment>>,
    ) -> Self {
        let mut tree = SyntaxTree {
            arena,
            root,
            parents: Vec::new(),
            comments,
        };
        tree.connect_parents();
        tree
    }

    /// A tree holding an empty file.
    pub fn empty() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.add(Node::File(Vec::new()));
        SyntaxTree::new(arena, root, FxHashMap::default())
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.arena.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.arena.get_mut(index)
    }

    #[inline]
    pub fn add(&mut self, node: Node) -> NodeIndex {
        self.arena.add(node)
    }

    /// Rebuild the parent table from the root.
    ///
    /// Every node reachable from the root, except the root itself, has a
    /// valid parent afterwards. Unreachable nodes have none.
    pub fn connect_parents(&mut self) {
        self.parents.clear();
        self.parents.resize(self.arena.len(), NodeIndex::NONE);
        self.connect_subtree(self.root);
    }

    /// Record parents for every node below `index`.
    pub fn connect_subtree(&mut self, index: NodeIndex) {
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            for child in self.arena.children(current) {
                self.set_parent(child, current);
                stack.push(child);
            }
        }
    }

    /// Recorded parent, or `NONE` for the root and detached nodes.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.parents
            .get(index.0 as usize)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    pub fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_none() {
            return;
        }
        let slot = child.0 as usize;
        if slot >= self.parents.len() {
            self.parents.resize(slot + 1, NodeIndex::NONE);
        }
        self.parents[slot] = parent;
    }

    pub fn comments(&self, index: NodeIndex) -> &[Comment] {
        self.comments.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_comments(&mut self, index: NodeIndex, comments: Vec<Comment>) {
        if comments.is_empty() {
            self.comments.remove(&index);
        } else {
            self.comments.insert(index, comments);
        }
    }

    pub fn take_comments(&mut self, index: NodeIndex) -> Vec<Comment> {
        self.comments.remove(&index).unwrap_or_default()
    }

    pub fn prepend_comment(&mut self, index: NodeIndex, comment: Comment) {
        self.comments.entry(index).or_default().insert(0, comment);
    }

    /// Top-level statements of the file.
    pub fn root_statements(&self) -> &[NodeIndex] {
        match self.arena.get(self.root) {
            Some(Node::File(stmts)) => stmts,
            _ => &[],
        }
    }

    pub fn set_root_statements(&mut self, stmts: NodeList) {
        for stmt in &stmts {
            self.set_parent(*stmt, self.root);
        }
        if let Some(Node::File(list)) = self.arena.get_mut(self.root) {
            *list = stmts;
        }
    }

    /// Substitute `new` for the child `old` of `parent`, by identity.
    ///
    /// Comments attached to `old` move to `new` unless `new` has its own.
    pub fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) -> bool {
        let Some(node) = self.arena.get_mut(parent) else {
            return false;
        };

        let mut replaced = false;
        for slot in node.slots_mut() {
            match slot {
                ChildSlotMut::One(child) if *child == old => {
                    *child = new;
                    replaced = true;
                    break;
                }
                ChildSlotMut::Many(list) => {
                    if let Some(pos) = list.iter().position(|child| *child == old) {
                        list[pos] = new;
                        replaced = true;
                        break;
                    }
                }
                _ => {}
            }
        }

        if replaced {
            self.set_parent(new, parent);
            if old != new && !self.comments.contains_key(&new) {
                let moved = self.take_comments(old);
                self.set_comments(new, moved);
            }
        }
        replaced
    }

    /// Replace `old` wherever its recorded parent holds it.
    pub fn replace_node(&mut self, old: NodeIndex, new: NodeIndex) -> bool {
        let parent = self.parent(old);
        if parent.is_none() {
            return false;
        }
        self.replace_child(parent, old, new)
    }

    /// Detach `child` from `parent`: list slots drop the entry, single slots
    /// become `NONE`.
    pub fn remove_child(&mut self, parent: NodeIndex, child: NodeIndex) -> bool {
        let Some(node) = self.arena.get_mut(parent) else {
            return false;
        };

        let mut removed = false;
        for slot in node.slots_mut() {
            match slot {
                ChildSlotMut::One(slot) if *slot == child => {
                    *slot = NodeIndex::NONE;
                    removed = true;
                    break;
                }
                ChildSlotMut::Many(list) => {
                    if let Some(pos) = list.iter().position(|c| *c == child) {
                        list.remove(pos);
                        removed = true;
                        break;
                    }
                }
                _ => {}
            }
        }

        if removed {
            self.set_parent(child, NodeIndex::NONE);
        }
        removed
    }

    pub fn remove_node(&mut self, index: NodeIndex) -> bool {
        let parent = self.parent(index);
        if parent.is_none() {
            return false;
        }
        self.remove_child(parent, index)
    }
}
