//! Parser module.
//!
//! The parser turns a token stream into an arena-backed syntax tree. Parsing
//! logic is split across the `state_*` files by syntactic area.

pub mod base;
pub mod error;
pub mod node;
mod node_access;
mod node_arena;
pub mod state;
mod state_expressions;
mod state_statements;
mod state_statements_class_members;
mod state_types;
pub mod tree;
