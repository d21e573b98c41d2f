//! Compile-time literal values.
//!
//! Only strings, integers, floats, `true`/`false`/`null` and arrays built
//! from those are understood. Anything else is an `UnsupportedLiteralError`
//! rather than a guess.

use crate::error::UnsupportedLiteralError;
use fusion_parser::{ArrayItem, ArrayKind, ArrayLit, Node, NodeIndex, SyntaxTree, UnaryOp};

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Entries in source order; `None` keys were not written out.
    Array(Vec<(Option<LiteralValue>, LiteralValue)>),
}

impl LiteralValue {
    /// Build the value back as syntax.
    pub fn to_node(&self, tree: &mut SyntaxTree) -> NodeIndex {
        match self {
            LiteralValue::Null => constant(tree, "null"),
            LiteralValue::Bool(true) => constant(tree, "true"),
            LiteralValue::Bool(false) => constant(tree, "false"),
            LiteralValue::Int(value) => tree.add(Node::IntLit(value.to_string())),
            LiteralValue::Float(value) => tree.add(Node::FloatLit(format_float(*value))),
            LiteralValue::String(value) => tree.arena.make_string(value),
            LiteralValue::Array(entries) => {
                let items = entries
                    .iter()
                    .map(|(key, value)| {
                        let key = key
                            .as_ref()
                            .map_or(NodeIndex::NONE, |key| key.to_node(tree));
                        let value = value.to_node(tree);
                        tree.add(Node::ArrayItem(ArrayItem {
                            key,
                            value,
                            by_ref: false,
                            unpack: false,
                        }))
                    })
                    .collect();
                tree.add(Node::ArrayLit(ArrayLit {
                    kind: ArrayKind::Short,
                    items,
                }))
            }
        }
    }
}

fn constant(tree: &mut SyntaxTree, name: &str) -> NodeIndex {
    let name = tree.arena.make_name(name, fusion_parser::NameKind::Normal);
    tree.add(Node::ConstFetch(name))
}

fn format_float(value: f64) -> String {
    let text = format!("{value:?}");
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

fn unsupported(tree: &SyntaxTree, idx: NodeIndex) -> UnsupportedLiteralError {
    UnsupportedLiteralError {
        kind: tree.get(idx).map_or("None", Node::kind_name),
    }
}

pub fn extract_literal(
    tree: &SyntaxTree,
    idx: NodeIndex,
) -> Result<LiteralValue, UnsupportedLiteralError> {
    let Some(node) = tree.get(idx) else {
        return Err(unsupported(tree, idx));
    };
    match node {
        Node::StringLit(data) => Ok(LiteralValue::String(data.value.clone())),
        Node::IntLit(text) => Ok(parse_int(text)),
        Node::FloatLit(text) => text
            .replace('_', "")
            .parse()
            .map(LiteralValue::Float)
            .map_err(|_| unsupported(tree, idx)),
        Node::ConstFetch(name) => {
            let name = tree.arena.get_name(*name).ok_or_else(|| unsupported(tree, idx))?;
            match name.text.to_ascii_lowercase().as_str() {
                "true" => Ok(LiteralValue::Bool(true)),
                "false" => Ok(LiteralValue::Bool(false)),
                "null" => Ok(LiteralValue::Null),
                _ => Err(unsupported(tree, idx)),
            }
        }
        Node::Unary(data) if data.op == UnaryOp::Minus => {
            match extract_literal(tree, data.operand)? {
                LiteralValue::Int(value) => Ok(LiteralValue::Int(value.wrapping_neg())),
                LiteralValue::Float(value) => Ok(LiteralValue::Float(-value)),
                _ => Err(unsupported(tree, idx)),
            }
        }
        Node::ArrayLit(array) if array.kind != ArrayKind::List => {
            let mut entries = Vec::with_capacity(array.items.len());
            for &item in &array.items {
                let Some(Node::ArrayItem(data)) = tree.get(item) else {
                    return Err(unsupported(tree, item));
                };
                if data.by_ref || data.unpack {
                    return Err(unsupported(tree, item));
                }
                let key = if data.key.is_some() {
                    Some(extract_literal(tree, data.key)?)
                } else {
                    None
                };
                entries.push((key, extract_literal(tree, data.value)?));
            }
            Ok(LiteralValue::Array(entries))
        }
        _ => Err(unsupported(tree, idx)),
    }
}

/// Integer literal in any base. Values past `i64` become floats.
fn parse_int(text: &str) -> LiteralValue {
    let digits = text.replace('_', "");
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    match i64::from_str_radix(body, radix) {
        Ok(value) => LiteralValue::Int(value),
        Err(_) => LiteralValue::Float(
            body.chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit)),
        ),
    }
}
