use fusion_conformer::{Conformer, PassKind};

fn conform(source: &str) -> String {
    let output = Conformer::new(source)
        .with_pipeline(vec![PassKind::PropValue])
        .conform()
        .expect("fragment should conform");
    output
        .strip_prefix("<?php\n\n")
        .expect("output starts with the prologue")
        .to_string()
}

#[test]
fn appends_value_to_assigned_prop() {
    assert_eq!(
        conform("$username = $this->prop(name: 'username', default: Auth::user()->name);"),
        "$username = $this->prop(name: 'username', default: Auth::user()->name)->value();"
    );
}

#[test]
fn appends_value_after_existing_chain() {
    assert_eq!(
        conform("$username = $this->prop(name: 'username', default: Auth::user()->name)->readonly();"),
        "$username = $this->prop(name: 'username', default: Auth::user()->name)->readonly()->value();"
    );
    assert_eq!(
        conform("$url = $this->prop(name: 'url')->fromRoute('profile')->syncQueryString('profile_url')->readonly();"),
        "$url = $this->prop(name: 'url')->fromRoute('profile')->syncQueryString('profile_url')->readonly()->value();"
    );
}

#[test]
fn closure_defaults() {
    assert_eq!(
        conform("use Illuminate\\Support\\Facades\\Auth;\n$message = $this->prop(name: 'message', default: function () use ($bar) {\n    return $bar;\n});"),
        "use Illuminate\\Support\\Facades\\Auth;\n$message = $this->prop(name: 'message', default: function () use ($bar) {\n    return $bar;\n})->value();"
    );
}

#[test]
fn standalone_props() {
    assert_eq!(
        conform("$this->prop(name: 'buzz', default: $test);"),
        "$this->prop(name: 'buzz', default: $test)->value();"
    );
    assert_eq!(
        conform("$this->prop($test, 'buzz');"),
        "$this->prop($test, 'buzz')->value();"
    );
    assert_eq!(
        conform("$this->prop()->readonly();"),
        "$this->prop()->readonly()->value();"
    );
}

#[test]
fn prop_inside_another_call() {
    assert_eq!(
        conform("$result = $someObject->process($this->prop(name: 'input')->readonly())->transform();"),
        "$result = $someObject->process($this->prop(name: 'input')->readonly()->value())->transform();"
    );
}

#[test]
fn completion_is_idempotent() {
    let once = conform("$a = $this->prop(name: 'a')->readonly();");
    assert_eq!(once, "$a = $this->prop(name: 'a')->readonly()->value();");
    assert_eq!(conform(&once), once);

    let source = "$a = $this->prop(name: 'a')->value()->format();";
    assert_eq!(conform(source), source);
}

#[test]
fn other_receivers_are_ignored() {
    let source = "$a = $other->prop(name: 'a');\n$b = prop();\n$c = $this?->prop();";
    assert_eq!(conform(source), source);
}
