//! Names the page class after its destination.
//!
//! `return new class { ... };` is replaced by a class declaration in a
//! namespace derived from the destination path:
//!
//! ```php
//! /**
//!  * This file was automatically generated by Fusion.
//!  * You should not edit it.
//!  */
//! namespace Fusion\Generated\Bar;
//!
//! use App\Models\User;
//! class TestGenerated extends \Fusion\FusionPage
//! {
//!     ...
//! }
//! ```
//!
//! This runs last; every other pass works on the anonymous form.

use super::{Pass, PassResult};
use crate::config::ConformOptions;
use crate::identity::DestinationIdentity;
use fusion_common::Comment;
use fusion_parser::{NameKind, NamespaceData, Node, NodeIndex, SyntaxTree};
use tracing::{debug, trace};

pub struct AnonymousClassPass {
    base_class: String,
    file_header: Vec<String>,
    identity: Option<DestinationIdentity>,
}

impl AnonymousClassPass {
    pub fn new(options: &ConformOptions, identity: Option<DestinationIdentity>) -> Self {
        AnonymousClassPass {
            base_class: options.page_base_class.clone(),
            file_header: options.file_header.clone(),
            identity,
        }
    }

    fn header(&self) -> Option<Comment> {
        if self.file_header.is_empty() {
            return None;
        }
        let lines: Vec<&str> = self.file_header.iter().map(String::as_str).collect();
        Some(Comment::doc(&lines))
    }
}

/// Position of the top-level `return new class ...;` and its class node.
fn returned_class(tree: &SyntaxTree) -> Option<(usize, NodeIndex)> {
    tree.root_statements()
        .iter()
        .enumerate()
        .find_map(|(position, stmt)| {
            let new = tree.arena.get_return(*stmt)?;
            let class = tree.arena.get_anonymous_class_of_new(new)?;
            Some((position, class))
        })
}

impl Pass for AnonymousClassPass {
    fn name(&self) -> &'static str {
        "anonymous-class"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        self.identity.is_some() && returned_class(tree).is_some()
    }

    fn after_traverse(&mut self, tree: &mut SyntaxTree) -> PassResult<()> {
        let (Some(identity), Some((position, class))) = (&self.identity, returned_class(tree))
        else {
            return Ok(());
        };
        debug!(
            namespace = %identity.namespace,
            class = %identity.class_name,
            "naming anonymous class"
        );

        let statements = tree.root_statements().to_vec();
        let return_stmt = statements[position];
        if statements.len() > position + 1 {
            trace!(dropped = statements.len() - position - 1, "dropping statements after return");
        }

        let extends = match tree.arena.get_class(class) {
            Some(data) if data.extends.is_some() => data.extends,
            _ => tree.arena.make_name_from_source(&self.base_class),
        };
        if let Some(data) = tree.arena.get_class_mut(class) {
            data.name = Some(identity.class_name.clone());
            data.extends = extends;
        }
        let comments = tree.take_comments(return_stmt);
        if !comments.is_empty() {
            tree.set_comments(class, comments);
        }

        let (mut body, others): (Vec<NodeIndex>, Vec<NodeIndex>) = statements[..position]
            .iter()
            .partition(|stmt| matches!(tree.get(**stmt), Some(Node::Use(_) | Node::GroupUse(_))));
        body.extend(others);
        body.push(class);

        let root = if identity.namespace.is_empty() {
            body
        } else {
            let name = tree.arena.make_name(&identity.namespace, NameKind::Normal);
            vec![tree.add(Node::Namespace(NamespaceData {
                name,
                stmts: body,
                braced: false,
            }))]
        };
        if let (Some(header), Some(&first)) = (self.header(), root.first()) {
            tree.prepend_comment(first, header);
        }
        tree.set_root_statements(root);
        tree.connect_subtree(tree.root);
        Ok(())
    }
}
