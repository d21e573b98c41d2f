use fusion_parser::{
    ArrayKind, AssignOp, BinaryOp, NameKind, Node, NodeIndex, SyntaxTree, UnaryOp, parse_source,
};

/// Parse `<?php <expr>;` and return the tree with the expression index.
fn parse_expr(expr: &str) -> (SyntaxTree, NodeIndex) {
    let source = format!("<?php\n{expr};");
    let tree = parse_source(&source).expect("expression should parse");
    let stmt = tree.root_statements()[0];
    let expr = tree.arena.get_expr_stmt(stmt).expect("expression statement");
    (tree, expr)
}

fn binary(tree: &SyntaxTree, idx: NodeIndex) -> (NodeIndex, BinaryOp, NodeIndex) {
    match tree.get(idx) {
        Some(Node::Binary(data)) => (data.left, data.op, data.right),
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let (tree, expr) = parse_expr("1 + 2 * 3");
    let (left, op, right) = binary(&tree, expr);
    assert_eq!(op, BinaryOp::Plus);
    assert!(matches!(tree.get(left), Some(Node::IntLit(v)) if v == "1"));
    assert_eq!(binary(&tree, right).1, BinaryOp::Mul);
}

#[test]
fn concat_binds_looser_than_addition() {
    let (tree, expr) = parse_expr("'a' . 1 + 2");
    let (_, op, right) = binary(&tree, expr);
    assert_eq!(op, BinaryOp::Concat);
    assert_eq!(binary(&tree, right).1, BinaryOp::Plus);
}

#[test]
fn power_is_right_associative() {
    let (tree, expr) = parse_expr("2 ** 3 ** 4");
    let (left, op, right) = binary(&tree, expr);
    assert_eq!(op, BinaryOp::Pow);
    assert!(matches!(tree.get(left), Some(Node::IntLit(_))));
    assert_eq!(binary(&tree, right).1, BinaryOp::Pow);
}

#[test]
fn coalesce_is_right_associative() {
    let (tree, expr) = parse_expr("$a ?? $b ?? $c");
    let (left, op, right) = binary(&tree, expr);
    assert_eq!(op, BinaryOp::Coalesce);
    assert!(matches!(tree.get(left), Some(Node::Variable(v)) if v == "a"));
    assert_eq!(binary(&tree, right).1, BinaryOp::Coalesce);
}

#[test]
fn assignment_inside_logical_and() {
    let (tree, expr) = parse_expr("$a = $b and $c");
    let (left, op, _) = binary(&tree, expr);
    assert_eq!(op, BinaryOp::LogicalAnd);
    assert!(matches!(tree.get(left), Some(Node::Assign(_))));
}

#[test]
fn assignment_after_negation() {
    let (tree, expr) = parse_expr("!$a = foo()");
    let Some(Node::Unary(unary)) = tree.get(expr) else {
        panic!("expected unary");
    };
    assert_eq!(unary.op, UnaryOp::Not);
    assert!(matches!(tree.get(unary.operand), Some(Node::Assign(_))));
}

#[test]
fn compound_and_reference_assignment() {
    let (tree, expr) = parse_expr("$a ??= $b");
    assert_eq!(tree.arena.get_assign(expr).map(|a| a.op), Some(AssignOp::Coalesce));

    let (tree, expr) = parse_expr("$a = &$b");
    assert!(tree.arena.get_assign(expr).is_some_and(|a| a.by_ref));
}

#[test]
fn ternary_and_short_ternary() {
    let (tree, expr) = parse_expr("$a ? $b : $c");
    let Some(Node::Ternary(t)) = tree.get(expr) else {
        panic!("expected ternary");
    };
    assert!(t.then.is_some());

    let (tree, expr) = parse_expr("$a ?: $c");
    let Some(Node::Ternary(t)) = tree.get(expr) else {
        panic!("expected ternary");
    };
    assert!(t.then.is_none());
}

#[test]
fn chained_method_calls_nest_left() {
    let (tree, expr) = parse_expr("prop('x')->fromRoute(param: 'id')->value()");
    let outer = tree.arena.get_method_call(expr).expect("outer call");
    assert_eq!(tree.arena.get_identifier_text(outer.name), Some("value"));
    let inner = tree.arena.get_method_call(outer.receiver).expect("inner call");
    assert_eq!(tree.arena.get_identifier_text(inner.name), Some("fromRoute"));
    let arg = tree.arena.get_arg(inner.args[0]).expect("arg");
    assert_eq!(arg.name.as_deref(), Some("param"));
    assert!(tree.arena.get_func_call(inner.receiver).is_some());
}

#[test]
fn new_without_parentheses_allows_member_access() {
    let (tree, expr) = parse_expr("new Finder()->files()");
    let call = tree.arena.get_method_call(expr).expect("method call");
    assert!(tree.arena.get_new(call.receiver).is_some());
}

#[test]
fn anonymous_class_expression() {
    let (tree, expr) = parse_expr("new class($x) extends Page { public $a; }");
    let class = tree.arena.get_anonymous_class_of_new(expr).expect("anonymous class");
    let data = tree.arena.get_class(class).expect("class");
    assert!(data.name.is_none());
    assert_eq!(data.members.len(), 1);
    assert_eq!(tree.arena.get_new(expr).map(|n| n.args.len()), Some(1));
}

#[test]
fn closures_and_arrow_functions() {
    let (tree, expr) =
        parse_expr("static function (int $a, &$b) use ($c, &$d): ?string { return $a; }");
    let Some(Node::Closure(closure)) = tree.get(expr) else {
        panic!("expected closure");
    };
    assert!(closure.is_static);
    assert_eq!(closure.params.len(), 2);
    assert_eq!(closure.uses.len(), 2);
    assert!(matches!(tree.get(closure.return_type), Some(Node::NullableType(_))));

    let (tree, expr) = parse_expr("fn(Podcast $p) => $p->delete()");
    let Some(Node::ArrowFunction(arrow)) = tree.get(expr) else {
        panic!("expected arrow function");
    };
    assert_eq!(arrow.params.len(), 1);
    assert!(tree.arena.get_method_call(arrow.body).is_some());
}

#[test]
fn named_spread_and_placeholder_arguments() {
    let (tree, expr) = parse_expr("foo(default: 1, ...$rest)");
    let call = tree.arena.get_func_call(expr).expect("call");
    assert_eq!(tree.arena.get_arg(call.args[0]).and_then(|a| a.name.as_deref()), Some("default"));
    assert!(tree.arena.get_arg(call.args[1]).is_some_and(|a| a.unpack));

    let (tree, expr) = parse_expr("strlen(...)");
    let call = tree.arena.get_func_call(expr).expect("call");
    assert!(matches!(tree.get(call.args[0]), Some(Node::VariadicPlaceholder)));
}

#[test]
fn name_forms() {
    let (tree, expr) = parse_expr("\\Fusion\\prop()");
    let call = tree.arena.get_func_call(expr).expect("call");
    let name = tree.arena.get_name(call.callee).expect("name");
    assert_eq!(name.kind, NameKind::FullyQualified);
    assert_eq!(name.text, "Fusion\\prop");
    assert_eq!(name.last_segment(), "prop");

    let (tree, expr) = parse_expr("Podcast::class");
    assert!(matches!(tree.get(expr), Some(Node::ClassConstFetch(_))));

    let (tree, expr) = parse_expr("null");
    assert!(matches!(tree.get(expr), Some(Node::ConstFetch(_))));
}

#[test]
fn strings_are_decoded_or_kept_raw() {
    let (tree, expr) = parse_expr(r#""line\n""#);
    let lit = tree.arena.get_string(expr).expect("string");
    assert_eq!(lit.value, "line\n");
    assert_eq!(lit.raw.as_deref(), Some(r#""line\n""#));

    let (tree, expr) = parse_expr(r#""Hello {$name}""#);
    assert!(matches!(
        tree.get(expr),
        Some(Node::InterpolatedString(raw)) if raw == r#""Hello {$name}""#
    ));
}

#[test]
fn arrays_and_destructuring() {
    let (tree, expr) = parse_expr("['a' => 1, ...$rest, &$ref]");
    let Some(Node::ArrayLit(array)) = tree.get(expr) else {
        panic!("expected array");
    };
    assert_eq!(array.kind, ArrayKind::Short);
    assert_eq!(array.items.len(), 3);

    let (tree, expr) = parse_expr("[, $b] = $pair");
    let assign = tree.arena.get_assign(expr).expect("assign");
    let Some(Node::ArrayLit(target)) = tree.get(assign.target) else {
        panic!("expected array target");
    };
    assert!(target.items[0].is_none());

    let (tree, expr) = parse_expr("array(1, 2)");
    assert!(matches!(tree.get(expr), Some(Node::ArrayLit(a)) if a.kind == ArrayKind::Long));
}

#[test]
fn match_expression() {
    let (tree, expr) = parse_expr("match ($x) { 1, 2 => 'low', default => 'high', }");
    let Some(Node::Match(m)) = tree.get(expr) else {
        panic!("expected match");
    };
    assert_eq!(m.arms.len(), 2);
    let Some(Node::MatchArm(default_arm)) = tree.get(m.arms[1]) else {
        panic!("expected arm");
    };
    assert!(default_arm.conditions.is_empty());
}

#[test]
fn casts_and_instanceof() {
    let (tree, expr) = parse_expr("(integer) $x");
    assert!(matches!(tree.get(expr), Some(Node::Cast(c)) if c.ty == "int"));

    let (tree, expr) = parse_expr("!$x instanceof Foo");
    let Some(Node::Unary(unary)) = tree.get(expr) else {
        panic!("expected unary");
    };
    assert!(matches!(tree.get(unary.operand), Some(Node::Instanceof(_))));
}
