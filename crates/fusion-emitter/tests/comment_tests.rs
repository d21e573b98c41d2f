use fusion_common::Comment;
use fusion_emitter::{PrintOptions, print_file};
use fusion_parser::parse_source;

fn print(source: &str) -> String {
    let tree = parse_source(source).expect("source should parse");
    print_file(&tree, &PrintOptions::default())
}

#[test]
fn line_comments_stay_above_their_statement() {
    assert_eq!(
        print("<?php\n// first\n$a = 1;\n# second\n$b = 2;"),
        "<?php\n\n// first\n$a = 1;\n# second\n$b = 2;"
    );
}

#[test]
fn comments_are_reindented_inside_blocks() {
    assert_eq!(
        print("<?php\nif ($a) {\n// inside\n$b = 1;\n}"),
        "<?php\n\nif ($a) {\n    // inside\n    $b = 1;\n}"
    );
}

#[test]
fn doc_blocks_are_realigned() {
    assert_eq!(
        print("<?php\nfunction f()\n{\n        /**\n         * Doc.\n         */\n        return 1;\n}"),
        "<?php\n\nfunction f()\n{\n    /**\n     * Doc.\n     */\n    return 1;\n}"
    );
}

#[test]
fn trailing_comments_survive_as_comment_only_statements() {
    assert_eq!(
        print("<?php\n$a = 1;\n// done"),
        "<?php\n\n$a = 1;\n// done"
    );
}

#[test]
fn class_member_comments_are_kept() {
    assert_eq!(
        print("<?php\nclass A\n{\n    // the count\n    public $count;\n}"),
        "<?php\n\nclass A\n{\n    // the count\n    public $count;\n}"
    );
}

#[test]
fn attached_comments_print_before_synthesized_statements() {
    let mut tree = parse_source("<?php\n$a = 1;").expect("source should parse");
    let first = tree.root_statements()[0];
    tree.prepend_comment(first, Comment::doc(&["Generated."]));
    assert_eq!(
        print_file(&tree, &PrintOptions::default()),
        "<?php\n\n/**\n * Generated.\n */\n$a = 1;"
    );
}
