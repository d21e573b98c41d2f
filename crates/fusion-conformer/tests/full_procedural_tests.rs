//! Whole-pipeline runs on procedural page scripts.

use fusion_conformer::{ConformOptions, Conformer};

const DESTINATION: &str = "/storage/fusion/PHP/Bar/TestGenerated.php";

fn conform(source: &str) -> String {
    let options = ConformOptions {
        destination_root: Some("/storage/fusion/PHP".into()),
        ..ConformOptions::default()
    };
    let output = Conformer::new(source)
        .with_options(options)
        .with_destination(DESTINATION)
        .conform()
        .expect("fragment should conform");
    output
        .split_once("*/")
        .map(|(_, rest)| rest.trim_start().to_string())
        .expect("output has a file header")
}

#[test]
fn basic_procedural_page() {
    let source = r#"$test = prop("hey");

$podcast = mount(fn(Podcast $podcast) => $podcast);

expose(favorite: function() use ($podcast) {
    $podcast->favorite();
});"#;

    let expected = r#"namespace Fusion\Generated\Bar;

class TestGenerated extends \Fusion\FusionPage
{
    #[\Fusion\Attributes\ServerOnly]
    public array $discoveredProps = ['test'];
    use \Fusion\Concerns\IsProceduralPage;
    public function runProceduralCode()
    {
        $test = $this->prop(name: 'test', default: "hey")->value();
        $podcast = $this->mount(fn(Podcast $podcast) => $podcast);
        $this->expose(favorite: function () use ($podcast) {
            $podcast->favorite();
        });
        $this->syncProps(get_defined_vars());
    }
    #[\Fusion\Attributes\Expose]
    public function favorite()
    {
        return call_user_func($this->actions[__FUNCTION__], ...func_get_args());
    }
}"#;

    assert_eq!(conform(source), expected);
}

#[test]
fn imports_comments_and_loops() {
    let source = r#"use Symfony\Component\Finder\Finder;

// Create a Finder instance.
$files = new Finder()->files()->in(__DIR__)->name('*.vue');

$paths = prop([])->readonly();

// Iterate over the results and output each file's relative path.
foreach ($files as $file) {
    $paths[] = $file->getRelativePathname();
}"#;

    let expected = r#"namespace Fusion\Generated\Bar;

use Symfony\Component\Finder\Finder;
class TestGenerated extends \Fusion\FusionPage
{
    #[\Fusion\Attributes\ServerOnly]
    public array $discoveredProps = ['paths'];
    use \Fusion\Concerns\IsProceduralPage;
    public function runProceduralCode()
    {
        // Create a Finder instance.
        $files = (new Finder())->files()->in(__DIR__)->name('*.vue');
        $paths = $this->prop(name: 'paths', default: [])->readonly()->value();
        // Iterate over the results and output each file's relative path.
        foreach ($files as $file) {
            $paths[] = $file->getRelativePathname();
        }
        $this->syncProps(get_defined_vars());
    }
}"#;

    assert_eq!(conform(source), expected);
}

#[test]
fn magic_function_imports_are_dropped() {
    let source = r#"use function Fusion\{prop, expose};
use App\Models\Podcast;

$podcast = prop(Podcast::first())->readonly();
expose(save: fn() => $podcast->save());"#;

    let output = conform(source);
    assert!(output.starts_with(
        "namespace Fusion\\Generated\\Bar;\n\nuse App\\Models\\Podcast;\nclass TestGenerated"
    ));
    assert!(!output.contains("use function"));
    assert!(output.contains(
        "$podcast = $this->prop(name: 'podcast', default: Podcast::first())->readonly()->value();"
    ));
    assert!(output.contains("    public function save()\n"));
}

#[test]
fn several_props_and_actions() {
    let source = r#"$name = prop('Aaron');
$email = prop()->fromRoute();
$name2 = prop($name, name: 'name');
expose(rename: fn(string $to) => rename_page($to), clear: function () {
    return null;
});"#;

    let output = conform(source);
    assert!(output.contains("    public array $discoveredProps = ['name', 'email'];\n"));
    assert!(output.contains("$email = $this->prop(name: 'email')->fromRoute()->value();"));
    assert!(output.contains("$name2 = $this->prop(name: 'name', default: $name)->value();"));
    assert!(output.contains(
        "    #[\\Fusion\\Attributes\\Expose]\n    public function rename(string $to)\n"
    ));
    assert!(output.contains("    #[\\Fusion\\Attributes\\Expose]\n    public function clear()\n"));
}

#[test]
fn class_based_page_is_only_named() {
    let source = "new class {\n    public string $name = 'A';\n};";
    assert_eq!(
        conform(source),
        "namespace Fusion\\Generated\\Bar;\n\nclass TestGenerated extends \\Fusion\\FusionPage\n{\n    public string $name = 'A';\n}"
    );
}

#[test]
fn conforming_twice_gives_the_same_output() {
    let source = "$x = prop(\"hey\");";
    let mut conformer = Conformer::new(source).with_destination("Pages/Show.php");
    let first = conformer.conform().expect("fragment should conform");
    let second = conformer.conform().expect("fragment should conform");
    assert_eq!(first, second);
    assert_eq!(
        conformer.qualified_name(),
        Some("\\Fusion\\Generated\\Pages\\Show")
    );
}

#[test]
fn single_prop_page() {
    let output = conform("$x = prop(\"hey\");");
    assert!(output.starts_with(
        "namespace Fusion\\Generated\\Bar;\n\nclass TestGenerated extends \\Fusion\\FusionPage\n{\n    #[\\Fusion\\Attributes\\ServerOnly]\n    public array $discoveredProps = ['x'];\n"
    ));
    assert!(output.contains(
        "        $x = $this->prop(name: 'x', default: \"hey\")->value();\n        $this->syncProps(get_defined_vars());\n    }\n}"
    ));
    assert_eq!(output.matches("class ").count(), 1);
    assert!(!output.contains("return new"));
}

#[test]
fn assigned_prop_with_two_positionals_uses_the_variable_name() {
    let output = conform("$x = prop('hey', 'y');");
    assert!(output.contains("$x = $this->prop(name: 'x', default: 'hey')->value();"));
    assert!(output.contains("$discoveredProps = ['x'];"));
}

#[test]
fn dynamic_prop_names_still_conform() {
    let output =
        conform("$x = prop(name: $dyn);\n$y = prop(name: 'a' . 'b');\n$z = prop(1);");
    assert!(output.contains("$x = $this->prop(name: $dyn)->value();"));
    assert!(output.contains("$y = $this->prop(name: 'a' . 'b')->value();"));
    assert!(output.contains("$discoveredProps = ['z'];"));
}

#[test]
fn each_exposed_name_gets_one_method() {
    let output = conform("expose(a: fn() => 1, b: function () {\n    return 2;\n});");
    assert_eq!(output.matches("#[\\Fusion\\Attributes\\Expose]").count(), 2);
    assert_eq!(output.matches("    public function a()\n").count(), 1);
    assert_eq!(output.matches("    public function b()\n").count(), 1);
    let forward = "return call_user_func($this->actions[__FUNCTION__], ...func_get_args());";
    assert_eq!(output.matches(forward).count(), 2);
}
