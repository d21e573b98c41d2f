//! Strings and arrays.

use super::Printer;
use fusion_parser::{ArrayItem, ArrayKind, ArrayLit, StringLit};

impl<'a> Printer<'a> {
    /// Parsed strings keep their source spelling; synthesized ones are
    /// printed single-quoted.
    pub(crate) fn emit_string_literal(&mut self, lit: &StringLit) {
        match &lit.raw {
            Some(raw) => self.write(raw),
            None => {
                let quoted = single_quote(&lit.value);
                self.write(&quoted);
            }
        }
    }

    pub(crate) fn emit_array_literal(&mut self, array: &ArrayLit) {
        let (open, close) = match array.kind {
            ArrayKind::Short => ("[", "]"),
            ArrayKind::Long => ("array(", ")"),
            ArrayKind::List => ("list(", ")"),
        };
        self.write(open);
        self.emit_comma_separated(&array.items);
        self.write(close);
    }

    pub(crate) fn emit_array_item(&mut self, item: &ArrayItem) {
        if item.key.is_some() {
            self.emit(item.key);
            self.write(" => ");
        }
        if item.by_ref {
            self.write("&");
        }
        if item.unpack {
            self.write("...");
        }
        self.emit(item.value);
    }
}

/// Single-quoted PHP literal for `value`.
///
/// Quotes are always escaped. A backslash is doubled only where it would
/// otherwise combine with a neighbour: next to another backslash, before a
/// quote, or at the end of the string.
pub(crate) fn single_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    let mut chars = value.chars().peekable();
    let mut after_backslash = false;
    while let Some(ch) = chars.next() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => {
                let significant =
                    after_backslash || matches!(chars.peek(), None | Some('\\') | Some('\''));
                out.push_str(if significant { "\\\\" } else { "\\" });
            }
            _ => out.push(ch),
        }
        after_backslash = ch == '\\';
    }
    out.push('\'');
    out
}
