//! Printer entry points and options.

use crate::emitter::Printer;
use fusion_parser::{NodeIndex, SyntaxTree};
use serde::{Deserialize, Serialize};

/// Printer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions { indent_width: 4 }
    }
}

/// Print a whole file: `<?php`, a blank line, then the statements.
pub fn print_file(tree: &SyntaxTree, options: &PrintOptions) -> String {
    Printer::new(tree, options).print_file()
}

/// Print a single node (statement or expression) without the file prologue.
pub fn print_node(tree: &SyntaxTree, node: NodeIndex, options: &PrintOptions) -> String {
    let mut printer = Printer::new(tree, options);
    printer.emit(node);
    printer.finish()
}
