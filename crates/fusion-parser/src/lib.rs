//! PHP parser and syntax tree for the Fusion page conformer.
//!
//! This crate provides:
//! - `NodeArena` / `NodeIndex` - Arena storage for syntax nodes
//! - `Node` - The closed set of node kinds
//! - `SyntaxTree` - Arena plus root, parent links and comment side tables
//! - `ParserState` - Recursive descent parser for the PHP page-script surface
//! - `parse_source` - Convenience entry point

pub mod parser;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::error::{ParseError, ParseErrorKind};
pub use parser::node::*;
pub use parser::state::{ParserState, parse_source};
pub use parser::tree::SyntaxTree;
