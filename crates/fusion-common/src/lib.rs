//! Common types and utilities for the Fusion page conformer.
//!
//! This crate provides foundational types used across all fusion crates:
//! - Line/column positions for error reporting (`LineMap`, `Position`)
//! - Comment trivia carried from source to printed output (`Comment`, `CommentKind`)

// Position types for 1-based line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Comment trivia
pub mod comments;
pub use comments::{Comment, CommentKind};
