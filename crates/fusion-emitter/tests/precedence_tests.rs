use fusion_emitter::{PrintOptions, print_file};
use fusion_parser::{BinaryData, BinaryOp, Node, UnaryData, UnaryOp, parse_source};

fn print_expr(expr: &str) -> String {
    let tree = parse_source(&format!("<?php {expr};")).expect("source should parse");
    let printed = print_file(&tree, &PrintOptions::default());
    printed
        .strip_prefix("<?php\n\n")
        .and_then(|s| s.strip_suffix(';'))
        .map(str::to_string)
        .unwrap_or(printed)
}

#[test]
fn redundant_parentheses_are_dropped() {
    assert_eq!(print_expr("($a + $b) + $c"), "$a + $b + $c");
    assert_eq!(print_expr("$a + ($b * $c)"), "$a + $b * $c");
    assert_eq!(print_expr("($a)"), "$a");
    assert_eq!(print_expr("!($a instanceof B)"), "!$a instanceof B");
}

#[test]
fn required_parentheses_are_kept() {
    assert_eq!(print_expr("$a - ($b - $c)"), "$a - ($b - $c)");
    assert_eq!(print_expr("($a + $b) * $c"), "($a + $b) * $c");
    assert_eq!(print_expr("!($a && $b)"), "!($a && $b)");
    assert_eq!(print_expr("-($a + 1)"), "-($a + 1)");
    assert_eq!(print_expr("($a ? $b : $c) ? $d : $e"), "($a ? $b : $c) ? $d : $e");
}

#[test]
fn right_associative_operators_nest_without_parentheses() {
    assert_eq!(print_expr("$a ** $b ** $c"), "$a ** $b ** $c");
    assert_eq!(print_expr("($a ** $b) ** $c"), "($a ** $b) ** $c");
    assert_eq!(print_expr("$a ?? $b ?? $c"), "$a ?? $b ?? $c");
    assert_eq!(print_expr("$a = $b = 1"), "$a = $b = 1");
}

#[test]
fn concatenation_binds_looser_than_arithmetic() {
    assert_eq!(print_expr("'a' . ($b + 1)"), "'a' . $b + 1");
    assert_eq!(print_expr("('a' . $b) + 1"), "('a' . $b) + 1");
}

#[test]
fn non_associative_comparisons_are_parenthesized() {
    assert_eq!(print_expr("($a == $b) == $c"), "($a == $b) == $c");
    assert_eq!(print_expr("$a < ($b < $c)"), "$a < ($b < $c)");
}

#[test]
fn dereferenced_expressions_are_wrapped() {
    assert_eq!(print_expr("(new Foo())->bar()"), "(new Foo())->bar()");
    assert_eq!(print_expr("($a ?? $b)->c"), "($a ?? $b)->c");
    assert_eq!(print_expr("(function () {\n})()"), "(function () {\n})()");
    assert_eq!(print_expr("foo()->bar"), "foo()->bar");
}

#[test]
fn nested_signs_do_not_fuse() {
    let mut tree = parse_source("<?php $a;").expect("source should parse");
    let a = tree.arena.make_variable("a");
    let inner = tree.add(Node::Unary(UnaryData {
        op: UnaryOp::Minus,
        operand: a,
    }));
    let outer = tree.add(Node::Unary(UnaryData {
        op: UnaryOp::Minus,
        operand: inner,
    }));
    let printed = fusion_emitter::print_node(&tree, outer, &PrintOptions::default());
    assert_eq!(printed, "-(-$a)");
}

#[test]
fn synthesized_trees_get_parentheses() {
    let mut tree = parse_source("<?php $a;").expect("source should parse");
    let a = tree.arena.make_variable("a");
    let b = tree.arena.make_variable("b");
    let c = tree.arena.make_variable("c");
    let sum = tree.add(Node::Binary(BinaryData {
        left: a,
        op: BinaryOp::Plus,
        right: b,
    }));
    let product = tree.add(Node::Binary(BinaryData {
        left: sum,
        op: BinaryOp::Mul,
        right: c,
    }));
    let printed = fusion_emitter::print_node(&tree, product, &PrintOptions::default());
    assert_eq!(printed, "($a + $b) * $c");
}
