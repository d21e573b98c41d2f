//! Node queries shared by the passes.

use fusion_parser::{AssignOp, Node, NodeIndex, NodeList, SyntaxTree, UseKind};

/// Every node below `from` (excluding it) matching `predicate`, in pre-order.
pub fn find_all(
    tree: &SyntaxTree,
    from: NodeIndex,
    mut predicate: impl FnMut(&SyntaxTree, NodeIndex) -> bool,
) -> Vec<NodeIndex> {
    tree.arena
        .descendants(from)
        .into_iter()
        .filter(|idx| predicate(tree, *idx))
        .collect()
}

pub fn find_first(
    tree: &SyntaxTree,
    from: NodeIndex,
    mut predicate: impl FnMut(&SyntaxTree, NodeIndex) -> bool,
) -> Option<NodeIndex> {
    tree.arena
        .descendants(from)
        .into_iter()
        .find(|idx| predicate(tree, *idx))
}

/// `name(...)` with a plain name callee.
pub fn is_call_named(tree: &SyntaxTree, idx: NodeIndex, name: &str) -> bool {
    tree.arena
        .get_func_call(idx)
        .and_then(|call| tree.arena.get_name(call.callee))
        .is_some_and(|callee| callee.text == name)
}

/// `$receiver->name(...)`, excluding nullsafe calls and dynamic names.
pub fn is_method_call_named(tree: &SyntaxTree, idx: NodeIndex, name: &str) -> bool {
    tree.arena.get_method_call(idx).is_some_and(|call| {
        !call.nullsafe && tree.arena.get_identifier_text(call.name) == Some(name)
    })
}

/// `$this->name(...)`
pub fn is_instance_call_named(tree: &SyntaxTree, idx: NodeIndex, name: &str) -> bool {
    is_method_call_named(tree, idx, name)
        && tree
            .arena
            .get_method_call(idx)
            .is_some_and(|call| tree.arena.get_variable_name(call.receiver) == Some("this"))
}

/// A plain `target = value;` statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub assign: NodeIndex,
    pub target: NodeIndex,
    pub value: NodeIndex,
}

/// The assignment of an expression statement. Compound and by-reference
/// assignments do not count.
pub fn assignment_of(tree: &SyntaxTree, stmt: NodeIndex) -> Option<Assignment> {
    let assign = tree.arena.get_expr_stmt(stmt)?;
    let data = tree.arena.get_assign(assign)?;
    (data.op == AssignOp::Assign && !data.by_ref).then_some(Assignment {
        assign,
        target: data.target,
        value: data.value,
    })
}

/// `stmt` assigns to a variable, to `$var_name` when given.
pub fn is_assignment_to(tree: &SyntaxTree, stmt: NodeIndex, var_name: Option<&str>) -> bool {
    let Some(assignment) = assignment_of(tree, stmt) else {
        return false;
    };
    match var_name {
        None => true,
        Some(expected) => tree.arena.get_variable_name(assignment.target) == Some(expected),
    }
}

/// Method calls of the chain starting at `outermost`, outermost first.
pub fn gather_chain(tree: &SyntaxTree, outermost: NodeIndex) -> Vec<NodeIndex> {
    let mut chain = Vec::new();
    let mut current = outermost;
    while let Some(call) = tree.arena.get_method_call(current) {
        chain.push(current);
        current = call.receiver;
    }
    chain
}

/// One `->name(args)` link of a method chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainLink {
    pub name: NodeIndex,
    pub args: NodeList,
    pub nullsafe: bool,
}

/// The innermost receiver of a method chain and the links applied to it, in
/// source order. A node that is not a method call is its own base.
pub fn chain_base(tree: &SyntaxTree, node: NodeIndex) -> (NodeIndex, Vec<ChainLink>) {
    let mut links = Vec::new();
    let mut current = node;
    while let Some(call) = tree.arena.get_method_call(current) {
        links.push(ChainLink {
            name: call.name,
            args: call.args.clone(),
            nullsafe: call.nullsafe,
        });
        current = call.receiver;
    }
    links.reverse();
    (current, links)
}

/// Rebuild `links` as method calls on top of `base`.
pub fn apply_chain(tree: &mut SyntaxTree, base: NodeIndex, links: Vec<ChainLink>) -> NodeIndex {
    links.into_iter().fold(base, |receiver, link| {
        tree.add(Node::MethodCall(fusion_parser::MethodCallData {
            receiver,
            name: link.name,
            args: link.args,
            nullsafe: link.nullsafe,
        }))
    })
}

/// Whether the fragment has been wrapped into a procedural page: some class
/// uses the procedural trait by its fully qualified name, or by its short
/// name with a matching top-level import.
pub fn uses_procedural_trait(tree: &SyntaxTree, trait_name: &str) -> bool {
    let trait_name = trait_name.trim_start_matches('\\');
    let short_name = trait_name.rsplit('\\').next().unwrap_or(trait_name);

    let imported = || {
        tree.root_statements().iter().any(|stmt| match tree.get(*stmt) {
            Some(Node::Use(data)) if data.kind == UseKind::Normal => {
                data.items.iter().any(|item| use_item_text(tree, *item) == Some(trait_name))
            }
            _ => false,
        })
    };

    find_first(tree, tree.root, |tree, idx| {
        let Some(Node::TraitUse(traits)) = tree.get(idx) else {
            return false;
        };
        traits.iter().any(|name| match tree.arena.get_name(*name) {
            Some(name) if name.text == trait_name => true,
            Some(name) if name.text == short_name => imported(),
            _ => false,
        })
    })
    .is_some()
}

fn use_item_text(tree: &SyntaxTree, item: NodeIndex) -> Option<&str> {
    match tree.get(item)? {
        Node::UseItem(data) => tree.arena.get_name(data.name).map(|name| name.text.as_str()),
        _ => None,
    }
}

/// First class declaration or anonymous class in the tree.
pub fn find_class(tree: &SyntaxTree) -> Option<NodeIndex> {
    find_first(tree, tree.root, |tree, idx| tree.arena.get_class(idx).is_some())
}

/// Argument named `name`.
pub fn named_arg(tree: &SyntaxTree, args: &[NodeIndex], name: &str) -> Option<NodeIndex> {
    args.iter().copied().find(|arg| {
        tree.arena
            .get_arg(*arg)
            .is_some_and(|data| data.name.as_deref() == Some(name))
    })
}

/// Positional (unnamed) arguments in order.
pub fn positional_args(tree: &SyntaxTree, args: &[NodeIndex]) -> Vec<NodeIndex> {
    args.iter()
        .copied()
        .filter(|arg| tree.arena.get_arg(*arg).is_some_and(|data| data.name.is_none()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_parser::parse_source;

    fn first_stmt(tree: &SyntaxTree) -> NodeIndex {
        tree.root_statements()[0]
    }

    #[test]
    fn matches_calls_by_name() {
        let tree = parse_source("<?php prop(); $this->prop(); $other->prop(); $this?->prop();")
            .expect("source should parse");
        let calls: Vec<NodeIndex> = tree
            .root_statements()
            .iter()
            .filter_map(|stmt| tree.arena.get_expr_stmt(*stmt))
            .collect();
        assert!(is_call_named(&tree, calls[0], "prop"));
        assert!(!is_call_named(&tree, calls[1], "prop"));
        assert!(is_instance_call_named(&tree, calls[1], "prop"));
        assert!(is_method_call_named(&tree, calls[2], "prop"));
        assert!(!is_instance_call_named(&tree, calls[2], "prop"));
        assert!(!is_instance_call_named(&tree, calls[3], "prop"));
    }

    #[test]
    fn recognizes_plain_assignments() {
        let tree = parse_source("<?php $a = 1;").expect("source should parse");
        assert!(is_assignment_to(&tree, first_stmt(&tree), None));
        assert!(is_assignment_to(&tree, first_stmt(&tree), Some("a")));
        assert!(!is_assignment_to(&tree, first_stmt(&tree), Some("b")));

        let tree = parse_source("<?php $a .= 1;").expect("source should parse");
        assert!(assignment_of(&tree, first_stmt(&tree)).is_none());
    }

    #[test]
    fn walks_method_chains() {
        let tree = parse_source("<?php prop(1)->readonly()->fromRoute('id');")
            .expect("source should parse");
        let outer = tree.arena.get_expr_stmt(first_stmt(&tree)).expect("expr");
        assert_eq!(gather_chain(&tree, outer).len(), 2);

        let (base, links) = chain_base(&tree, outer);
        assert!(is_call_named(&tree, base, "prop"));
        let names: Vec<&str> = links
            .iter()
            .filter_map(|link| tree.arena.get_identifier_text(link.name))
            .collect();
        assert_eq!(names, vec!["readonly", "fromRoute"]);
    }

    #[test]
    fn detects_procedural_trait() {
        let fq = parse_source(
            "<?php return new class { use \\Fusion\\Concerns\\IsProceduralPage; };",
        )
        .expect("source should parse");
        assert!(uses_procedural_trait(&fq, "\\Fusion\\Concerns\\IsProceduralPage"));

        let imported = parse_source(
            "<?php use Fusion\\Concerns\\IsProceduralPage; return new class { use IsProceduralPage; };",
        )
        .expect("source should parse");
        assert!(uses_procedural_trait(&imported, "\\Fusion\\Concerns\\IsProceduralPage"));

        let short = parse_source("<?php return new class { use IsProceduralPage; };")
            .expect("source should parse");
        assert!(!uses_procedural_trait(&short, "\\Fusion\\Concerns\\IsProceduralPage"));
    }
}
