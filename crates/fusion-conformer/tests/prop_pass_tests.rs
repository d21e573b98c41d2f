use fusion_conformer::{Conformer, PassKind};

fn conform(source: &str) -> String {
    let output = Conformer::new(source)
        .with_pipeline(vec![PassKind::Prop])
        .conform()
        .expect("fragment should conform");
    output
        .strip_prefix("<?php\n\n")
        .expect("output starts with the prologue")
        .to_string()
}

// =============================================================================
// Assigned props
// =============================================================================

#[test]
fn positional_default_becomes_named() {
    assert_eq!(
        conform("$username = prop(Auth::user()->name);"),
        "$username = $this->prop(name: 'username', default: Auth::user()->name);"
    );
}

#[test]
fn assigned_variable_names_prop_over_second_positional() {
    assert_eq!(
        conform("$x = prop('hey', 'y');"),
        "$x = $this->prop(name: 'x', default: 'hey');"
    );
}

#[test]
fn named_default_is_kept() {
    assert_eq!(
        conform("$username = prop(default: Auth::user()->name);"),
        "$username = $this->prop(name: 'username', default: Auth::user()->name);"
    );
}

#[test]
fn method_chain_is_kept() {
    assert_eq!(
        conform("$username = prop(default: Auth::user()->name)->readonly();"),
        "$username = $this->prop(name: 'username', default: Auth::user()->name)->readonly();"
    );
    assert_eq!(
        conform("$config = prop()->fromRoute(withTrashed: true);"),
        "$config = $this->prop(name: 'config')->fromRoute(withTrashed: true);"
    );
}

#[test]
fn expression_defaults_are_kept_verbatim() {
    assert_eq!(
        conform("$message = prop('Hello ' . $name)->readonly();"),
        "$message = $this->prop(name: 'message', default: 'Hello ' . $name)->readonly();"
    );
    assert_eq!(
        conform("$config = prop(Config::get(\"app.name\") . \"-\" . env(\"APP_ENV\"));"),
        "$config = $this->prop(name: 'config', default: Config::get(\"app.name\") . \"-\" . env(\"APP_ENV\"));"
    );
}

#[test]
fn function_defaults() {
    assert_eq!(
        conform("$message = prop(fn() => 1);"),
        "$message = $this->prop(name: 'message', default: fn() => 1);"
    );
    assert_eq!(
        conform("$message = prop(function() use ($bar) { return $bar; });"),
        "$message = $this->prop(name: 'message', default: function () use ($bar) {\n    return $bar;\n});"
    );
}

#[test]
fn prop_without_arguments() {
    assert_eq!(
        conform("$message = prop();"),
        "$message = $this->prop(name: 'message');"
    );
}

#[test]
fn imports_are_untouched() {
    assert_eq!(
        conform("use function Fusion\\{prop, expose};\n\n$message = prop(1);"),
        "use function Fusion\\{prop, expose};\n$message = $this->prop(name: 'message', default: 1);"
    );
}

#[test]
fn other_named_arguments_follow_name_and_default() {
    assert_eq!(
        conform("$id = prop(queryString: true, default: 1);"),
        "$id = $this->prop(name: 'id', default: 1, queryString: true);"
    );
}

#[test]
fn explicit_name_wins_over_variable() {
    assert_eq!(
        conform("$id = prop(1, name: 'identifier');"),
        "$id = $this->prop(name: 'identifier', default: 1);"
    );
}

// =============================================================================
// Standalone props
// =============================================================================

#[test]
fn standalone_prop_takes_default_variable_name() {
    assert_eq!(
        conform("$test = 1;\n\nprop($test);"),
        "$test = 1;\n$this->prop(name: 'test', default: $test);"
    );
}

#[test]
fn standalone_prop_with_named_name() {
    assert_eq!(
        conform("$test = 1;\n\nprop($test, name: 'buzz');"),
        "$test = 1;\n$this->prop(name: 'buzz', default: $test);"
    );
}

#[test]
fn standalone_prop_with_two_positionals_is_kept_as_written() {
    assert_eq!(
        conform("$test = 1;\n\nprop($test, 'buzz');"),
        "$test = 1;\n$this->prop($test, 'buzz');"
    );
}

#[test]
fn standalone_chains() {
    assert_eq!(
        conform("prop(name: 'podcast', default: $podcast)->readonly();"),
        "$this->prop(name: 'podcast', default: $podcast)->readonly();"
    );
    assert_eq!(
        conform("prop($podcast)->readonly();"),
        "$this->prop(name: 'podcast', default: $podcast)->readonly();"
    );
}

#[test]
fn nested_props_are_rewritten() {
    assert_eq!(
        conform("if ($a) {\n    $b = prop(2);\n}"),
        "if ($a) {\n    $b = $this->prop(name: 'b', default: 2);\n}"
    );
}

#[test]
fn instance_calls_are_not_rewritten_again() {
    let source = "$a = $this->prop(name: 'a');";
    assert_eq!(conform(source), source);
}
