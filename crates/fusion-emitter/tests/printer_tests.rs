use fusion_emitter::{PrintOptions, print_file, print_node};
use fusion_parser::{NameKind, Node, parse_source};

fn print(source: &str) -> String {
    let tree = parse_source(source).expect("source should parse");
    print_file(&tree, &PrintOptions::default())
}

/// Canonical source prints back unchanged.
fn assert_stable(source: &str) {
    assert_eq!(print(source), source);
}

#[test]
fn prints_prologue_and_statements() {
    assert_eq!(print("<?php $a = 1; echo $a;"), "<?php\n\n$a = 1;\necho $a;");
}

#[test]
fn normalizes_whitespace() {
    assert_eq!(
        print("<?php\nif($a){return   $b ;}else{ $c=[1,2]; }"),
        "<?php\n\nif ($a) {\n    return $b;\n} else {\n    $c = [1, 2];\n}"
    );
}

#[test]
fn prints_control_flow() {
    assert_stable(
        "<?php\n\nif ($a) {\n    $b = 1;\n} elseif ($c) {\n    $b = 2;\n} else if ($d) {\n    $b = 3;\n}",
    );
    assert_stable("<?php\n\nwhile ($i < 10) {\n    $i++;\n}");
    assert_stable("<?php\n\ndo {\n    $i--;\n} while ($i > 0);");
    assert_stable("<?php\n\nfor ($i = 0; $i < 3; $i++) {\n    continue;\n}");
    assert_stable("<?php\n\nfor (;;) {\n    break 2;\n}");
    assert_stable("<?php\n\nforeach ($items as $key => &$item) {\n    unset($item);\n}");
    assert_stable(
        "<?php\n\nswitch ($a) {\n    case 1:\n        $b = 1;\n        break;\n    default:\n        $b = 2;\n}",
    );
    assert_stable(
        "<?php\n\ntry {\n    run();\n} catch (A|B $e) {\n    throw $e;\n} finally {\n    done();\n}",
    );
}

#[test]
fn prints_imports_and_namespaces() {
    assert_stable("<?php\n\nnamespace App\\Pages;\n\nuse App\\Models\\Podcast;\nuse function Fusion\\prop as p;\nuse const App\\LIMIT;");
    assert_stable("<?php\n\nuse function Fusion\\{prop, expose};");
    assert_stable("<?php\n\nuse App\\{Models\\Podcast, function helper};");
    assert_stable("<?php\n\nnamespace App {\n    $a = 1;\n}");
}

#[test]
fn prints_class_declarations() {
    assert_stable(
        "<?php\n\n#[Attr]\nfinal class Page extends \\Fusion\\FusionPage implements A, B\n{\n    use \\Fusion\\Concerns\\IsProceduralPage;\n    public const LIMIT = 10;\n    #[\\Fusion\\Attributes\\ServerOnly]\n    public array $discoveredProps = ['test'];\n    var $legacy;\n    protected static ?int $count = null;\n    public function mount(int $id, ...$rest): void\n    {\n        $this->id = $id;\n    }\n    abstract protected function handle();\n}",
    );
}

#[test]
fn prints_functions_and_closures() {
    assert_stable("<?php\n\nfunction &collect(array $items = [], ?string $label = null): array\n{\n    return $items;\n}");
    assert_stable("<?php\n\n$f = function () use ($podcast, &$count) {\n    return $podcast;\n};");
    assert_stable("<?php\n\n$f = static function (int $a): int {\n    return $a;\n};");
    assert_stable("<?php\n\n$f = fn($x) => $x * 2;");
    assert_stable("<?php\n\n$f = static fn&(array $a): array => $a;");
}

#[test]
fn prints_calls_and_arguments() {
    assert_stable("<?php\n\n$test = $this->prop(name: 'test', default: \"hey\")->value();");
    assert_stable("<?php\n\n$files = (new Finder())->files()->in(__DIR__)->name('*.vue');");
    assert_stable("<?php\n\nfoo(...$args);\n$g = strlen(...);\nA::create($x)?->save();");
    assert_stable("<?php\n\n$x = A::$prop;\n$y = A::CONSTANT;\n$z = static::class;");
}

#[test]
fn prints_new_expressions() {
    assert_eq!(print("<?php $a = new Foo;"), "<?php\n\n$a = new Foo();");
    assert_stable("<?php\n\n$a = new \\App\\Foo(1, 2);");
    assert_stable("<?php\n\n$a = new class(1) extends Base\n{\n    public $x;\n};");
}

#[test]
fn prints_arrays_and_destructuring() {
    assert_stable("<?php\n\n$a = ['a' => 1, 'b' => &$b, ...$rest];");
    assert_stable("<?php\n\n$a = array(1, 2);");
    assert_stable("<?php\n\n[$a, , $c] = $items;");
    assert_stable("<?php\n\nlist($a, $b) = $items;");
}

#[test]
fn prints_match() {
    assert_stable("<?php\n\n$v = match ($x) {\n    1, 2 => 'low',\n    default => 'high',\n};");
}

#[test]
fn prints_misc_expressions() {
    assert_stable("<?php\n\n$a = isset($b, $c) ? empty($d) : !$e;");
    assert_stable("<?php\n\n$a = $b ?: $c;\n$a ??= $d;\n$a =& $e;");
    assert_stable("<?php\n\n$a = (int) $b;\n$c = $d instanceof Foo;\n$e = clone $f;");
    assert_stable("<?php\n\nglobal $a, $b;\nexit(1);");
}

#[test]
fn synthesized_strings_are_single_quoted() {
    let mut tree = parse_source("<?php\nfoo();").expect("source should parse");
    let value = tree.arena.make_string("it's");
    let arg = tree.arena.make_arg(value, Some("label"));
    let call = tree.arena.make_func_call("foo", vec![arg]);
    assert_eq!(
        print_node(&tree, call, &PrintOptions::default()),
        "foo(label: 'it\\'s')"
    );
}

#[test]
fn fully_qualified_names_keep_their_prefix() {
    let mut tree = parse_source("<?php").expect("source should parse");
    let name = tree.arena.make_name("Fusion\\FusionPage", NameKind::FullyQualified);
    assert_eq!(
        print_node(&tree, name, &PrintOptions::default()),
        "\\Fusion\\FusionPage"
    );
}

#[test]
fn indent_width_is_configurable() {
    let tree = parse_source("<?php if ($a) { b(); }").expect("source should parse");
    let options: PrintOptions = serde_json::from_str(r#"{"indentWidth": 2}"#).expect("options");
    assert_eq!(print_file(&tree, &options), "<?php\n\nif ($a) {\n  b();\n}");
}

#[test]
fn missing_nodes_print_nothing() {
    let tree = parse_source("<?php").expect("source should parse");
    assert!(matches!(tree.get(tree.root), Some(Node::File(_))));
    assert_eq!(
        print_node(&tree, fusion_parser::NodeIndex::NONE, &PrintOptions::default()),
        ""
    );
}
