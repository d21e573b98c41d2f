use fusion_common::CommentKind;
use fusion_parser::{Node, NodeIndex, ParseErrorKind, SyntaxTree, UseKind, parse_source};

fn parse(source: &str) -> SyntaxTree {
    parse_source(source).expect("source should parse")
}

fn root_kinds(tree: &SyntaxTree) -> Vec<&'static str> {
    tree.root_statements()
        .iter()
        .map(|idx| tree.get(*idx).map(Node::kind_name).unwrap_or("<missing>"))
        .collect()
}

#[test]
fn parses_simple_statements() {
    let tree = parse("<?php\n$x = 1;\necho $x;\nreturn;");
    assert_eq!(root_kinds(&tree), vec!["Expression", "Echo", "Return"]);
}

#[test]
fn stray_semicolons_are_dropped() {
    let tree = parse("<?php\n;;$x = 1;;");
    assert_eq!(root_kinds(&tree), vec!["Expression"]);
}

#[test]
fn missing_semicolon_at_end_is_unexpected_eof() {
    let err = parse_source("<?php\n$x = function () {}").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(err.message, "Syntax error, unexpected EOF");
    assert!(err.is_unexpected_eof());
}

#[test]
fn unexpected_token_reports_line() {
    let err = parse_source("<?php\n\n$x = ;").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.line(), 3);
    assert_eq!(err.message, "Syntax error, unexpected token \";\"");
    assert_eq!(err.to_string(), "Syntax error, unexpected token \";\" on line 3");
}

#[test]
fn parses_use_statements() {
    let tree = parse(
        "<?php\nuse App\\Models\\Podcast;\nuse \\Fusion\\Attributes\\Expose as E;\nuse function Fusion\\prop;",
    );
    let stmts = tree.root_statements().to_vec();
    assert_eq!(stmts.len(), 3);

    let Some(Node::Use(first)) = tree.get(stmts[0]) else {
        panic!("expected use");
    };
    assert_eq!(first.kind, UseKind::Normal);
    let Some(Node::UseItem(item)) = tree.get(first.items[0]) else {
        panic!("expected use item");
    };
    let name = tree.arena.get_name(item.name).expect("name");
    assert_eq!(name.text, "App\\Models\\Podcast");

    let Some(Node::Use(second)) = tree.get(stmts[1]) else {
        panic!("expected use");
    };
    let Some(Node::UseItem(item)) = tree.get(second.items[0]) else {
        panic!("expected use item");
    };
    assert_eq!(
        tree.arena.get_name(item.name).map(|n| n.text.as_str()),
        Some("Fusion\\Attributes\\Expose")
    );
    assert_eq!(item.alias.as_deref(), Some("E"));

    let Some(Node::Use(third)) = tree.get(stmts[2]) else {
        panic!("expected use");
    };
    assert_eq!(third.kind, UseKind::Function);
}

#[test]
fn parses_group_use() {
    let tree =
        parse("<?php\nuse function Fusion\\{prop, expose};\nuse Fusion\\{function mount, Foo};");
    let stmts = tree.root_statements().to_vec();

    let Some(Node::GroupUse(group)) = tree.get(stmts[0]) else {
        panic!("expected group use");
    };
    assert_eq!(group.kind, UseKind::Function);
    assert_eq!(tree.arena.get_name(group.prefix).map(|n| n.text.as_str()), Some("Fusion"));
    assert_eq!(group.items.len(), 2);

    let Some(Node::GroupUse(mixed)) = tree.get(stmts[1]) else {
        panic!("expected group use");
    };
    assert_eq!(mixed.kind, UseKind::Normal);
    let kinds: Vec<UseKind> = mixed
        .items
        .iter()
        .filter_map(|item| match tree.get(*item) {
            Some(Node::UseItem(data)) => Some(data.kind),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec![UseKind::Function, UseKind::Normal]);
}

#[test]
fn unbraced_namespace_collects_following_statements() {
    let tree = parse("<?php\nnamespace App\\Pages;\nuse Foo;\nclass Index {}\n");
    assert_eq!(root_kinds(&tree), vec!["Namespace"]);
    let Some(Node::Namespace(ns)) = tree.get(tree.root_statements()[0]) else {
        panic!("expected namespace");
    };
    assert!(!ns.braced);
    assert_eq!(ns.stmts.len(), 2);
    assert_eq!(tree.arena.get_name(ns.name).map(|n| n.text.as_str()), Some("App\\Pages"));
}

#[test]
fn parses_class_declaration_with_members() {
    let source = r#"<?php
#[Layout('app')]
final class Index extends Page implements A, B
{
    use \Fusion\Concerns\IsProceduralPage;

    const LIMIT = 10;

    #[ServerOnly]
    public array $discoveredProps = ['a'];

    public static function make(int $x = 1, ...$rest): static
    {
        return new static();
    }

    abstract protected function render();
}
"#;
    let tree = parse(source);
    let class_idx = tree.root_statements()[0];
    let class = tree.arena.get_class(class_idx).expect("class");
    assert_eq!(class.name.as_deref(), Some("Index"));
    assert_eq!(class.attr_groups.len(), 1);
    assert!(class.extends.is_some());
    assert_eq!(class.implements.len(), 2);

    let kinds: Vec<&str> = class
        .members
        .iter()
        .map(|m| tree.get(*m).map(Node::kind_name).unwrap_or(""))
        .collect();
    assert_eq!(kinds, vec!["TraitUse", "ClassConst", "Property", "ClassMethod", "ClassMethod"]);

    let Some(Node::ClassMethod(render)) = tree.get(class.members[4]) else {
        panic!("expected method");
    };
    assert!(!render.has_body);
}

#[test]
fn parses_control_flow() {
    let source = r#"<?php
if ($a) {
    foo();
} elseif ($b) {
    bar();
} else if ($c) {
    baz();
}
foreach ($items as $key => &$item) {}
for ($i = 0; $i < 10; $i++) {}
while (true) { break; }
do { continue 2; } while (false);
switch ($x) {
    case 1:
        echo 'one';
        break;
    default:
        echo 'other';
}
try {
    risky();
} catch (A | B $e) {
} finally {
}
"#;
    let tree = parse(source);
    assert_eq!(
        root_kinds(&tree),
        vec!["If", "Foreach", "For", "While", "Do", "Switch", "TryCatch"]
    );

    let Some(Node::If(if_data)) = tree.get(tree.root_statements()[0]) else {
        panic!("expected if");
    };
    assert_eq!(if_data.else_ifs.len(), 1);
    let Some(Node::Else(else_stmts)) = tree.get(if_data.else_branch) else {
        panic!("expected else");
    };
    assert!(matches!(tree.get(else_stmts[0]), Some(Node::If(_))));

    let Some(Node::Foreach(foreach)) = tree.get(tree.root_statements()[1]) else {
        panic!("expected foreach");
    };
    assert!(foreach.key.is_some());
    assert!(foreach.by_ref);

    let Some(Node::Switch(switch)) = tree.get(tree.root_statements()[5]) else {
        panic!("expected switch");
    };
    assert_eq!(switch.cases.len(), 2);
    let Some(Node::Case(default_case)) = tree.get(switch.cases[1]) else {
        panic!("expected case");
    };
    assert_eq!(default_case.cond, NodeIndex::NONE);
}

#[test]
fn comments_attach_to_following_statement() {
    let tree = parse("<?php\n// first\n/** doc */\n$x = 1;\n# trailing\n");
    let stmts = tree.root_statements().to_vec();
    assert_eq!(root_kinds(&tree), vec!["Expression", "Nop"]);

    let comments = tree.comments(stmts[0]);
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "// first");
    assert_eq!(comments[1].kind, CommentKind::Doc);
    assert_eq!(tree.comments(stmts[1])[0].text, "# trailing");
}

#[test]
fn unsupported_constructs_are_reported() {
    for source in [
        "<?php\ninterface Foo {}",
        "<?php\ntrait Foo {}",
        "<?php\nenum Suit {}",
        "<?php\nfunction f() { static $x; }",
        "<?php\ndeclare(strict_types=1);",
        "<?php\nfunction g() { yield 1; }",
        "<?php\nif ($a): endif;",
    ] {
        let err = parse_source(source).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Unsupported, "source: {source}");
    }
}

#[test]
fn scanner_errors_become_lexical_parse_errors() {
    let err = parse_source("<?php\n/* never closed").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Lexical);
    assert!(err.message.starts_with("Syntax error"));
}
