use fusion_common::Comment;
use fusion_parser::{Node, NodeIndex, SyntaxTree, parse_source};

fn parse(source: &str) -> SyntaxTree {
    parse_source(source).expect("source should parse")
}

#[test]
fn parents_are_connected_after_parse() {
    let tree = parse("<?php\n$x = foo($y);");
    let stmt = tree.root_statements()[0];
    assert_eq!(tree.parent(stmt), tree.root);
    assert_eq!(tree.parent(tree.root), NodeIndex::NONE);

    let assign = tree.arena.get_expr_stmt(stmt).expect("expr");
    assert_eq!(tree.parent(assign), stmt);
    let value = tree.arena.get_assign(assign).expect("assign").value;
    assert_eq!(tree.parent(value), assign);
}

#[test]
fn replace_node_swaps_slot_and_moves_comments() {
    let mut tree = parse("<?php\n// keep me\n$x = 1;");
    let stmt = tree.root_statements()[0];
    let call = tree.arena.make_func_call("bar", Vec::new());
    let replacement = tree.add(Node::ExprStmt(call));

    assert!(tree.replace_node(stmt, replacement));
    assert_eq!(tree.root_statements(), &[replacement]);
    assert_eq!(tree.parent(replacement), tree.root);
    assert_eq!(tree.comments(replacement)[0].text, "// keep me");
    assert!(tree.comments(stmt).is_empty());
}

#[test]
fn replace_keeps_replacement_comments() {
    let mut tree = parse("<?php\n// old\n$x = 1;");
    let stmt = tree.root_statements()[0];
    let replacement = tree.add(Node::Nop);
    tree.set_comments(replacement, vec![Comment::doc(&["new"])]);

    assert!(tree.replace_node(stmt, replacement));
    assert_eq!(tree.comments(replacement).len(), 1);
    assert!(tree.comments(replacement)[0].text.contains("new"));
}

#[test]
fn replace_single_slot_child() {
    let mut tree = parse("<?php\n$x = 1;");
    let stmt = tree.root_statements()[0];
    let assign = tree.arena.get_expr_stmt(stmt).expect("expr");
    let old_value = tree.arena.get_assign(assign).expect("assign").value;
    let new_value = tree.arena.make_string("one");

    assert!(tree.replace_child(assign, old_value, new_value));
    assert_eq!(tree.arena.get_assign(assign).map(|a| a.value), Some(new_value));
    assert_eq!(tree.parent(new_value), assign);
}

#[test]
fn remove_node_from_list_and_slot() {
    let mut tree = parse("<?php\n$a = 1;\n$b = 2;\nreturn $c;");
    let stmts = tree.root_statements().to_vec();
    assert!(tree.remove_node(stmts[1]));
    assert_eq!(tree.root_statements(), &[stmts[0], stmts[2]]);
    assert_eq!(tree.parent(stmts[1]), NodeIndex::NONE);

    let operand = tree.arena.get_return(stmts[2]).expect("return");
    assert!(tree.remove_node(operand));
    assert_eq!(tree.arena.get_return(stmts[2]), Some(NodeIndex::NONE));
}

#[test]
fn removing_detached_node_fails() {
    let mut tree = parse("<?php\n$a = 1;");
    let orphan = tree.arena.make_variable("z");
    assert!(!tree.remove_node(orphan));
    assert!(!tree.replace_node(orphan, orphan));
}

#[test]
fn deep_clone_copies_subtree() {
    let mut tree = parse("<?php\nfn(int $a = 1) => $a;");
    let stmt = tree.root_statements()[0];
    let arrow = tree.arena.get_expr_stmt(stmt).expect("expr");
    let params = tree.arena.get_function_params(arrow).expect("params").clone();

    let copy = tree.arena.deep_clone(params[0]);
    assert_ne!(copy, params[0]);
    assert_eq!(tree.get(copy).map(Node::kind_name), Some("Param"));

    let (Some(Node::Param(original)), Some(Node::Param(cloned))) =
        (tree.get(params[0]), tree.get(copy))
    else {
        panic!("expected params");
    };
    assert_ne!(original.ty, cloned.ty);
    assert_eq!(tree.get(original.ty), tree.get(cloned.ty));
    assert_eq!(tree.get(original.default), tree.get(cloned.default));
}

#[test]
fn descendants_are_preorder() {
    let tree = parse("<?php\nfoo($a, bar($b));");
    let kinds: Vec<&str> = tree
        .arena
        .descendants(tree.root)
        .into_iter()
        .filter_map(|idx| tree.get(idx).map(Node::kind_name))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "Expression",
            "FuncCall",
            "Name",
            "Arg",
            "Variable",
            "Arg",
            "FuncCall",
            "Name",
            "Arg",
            "Variable",
        ]
    );
}

#[test]
fn set_root_statements_reparents() {
    let mut tree = parse("<?php\n$a = 1;");
    let extra = tree.add(Node::Nop);
    let mut stmts = tree.root_statements().to_vec();
    stmts.insert(0, extra);
    tree.set_root_statements(stmts);
    assert_eq!(tree.parent(extra), tree.root);
    assert_eq!(tree.root_statements().len(), 2);
}

#[test]
fn empty_tree_has_no_statements() {
    let tree = SyntaxTree::empty();
    assert!(tree.root_statements().is_empty());
}

#[test]
fn connect_subtree_links_synthesized_nodes() {
    let mut tree = parse("<?php\n$x = 1;");
    let arg_value = tree.arena.make_variable("y");
    let arg = tree.arena.make_arg(arg_value, None);
    let call = tree.arena.make_func_call("foo", vec![arg]);
    let stmt = tree.add(Node::ExprStmt(call));

    tree.connect_subtree(stmt);
    assert_eq!(tree.parent(call), stmt);
    assert_eq!(tree.parent(arg), call);
    assert_eq!(tree.parent(arg_value), arg);
    assert_eq!(tree.parent(stmt), NodeIndex::NONE);

    tree.set_parent(stmt, tree.root);
    assert_eq!(tree.parent(stmt), tree.root);
}
