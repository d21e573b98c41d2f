//! PHP scanner/tokenizer for the Fusion page conformer.
//!
//! This crate provides the lexical analysis phase:
//! - `TokenKind` - Token types
//! - `Scanner` - Tokenizer over a `<?php` source text
//! - `Token` - A scanned token with its leading comment trivia

pub mod syntax_kind;
pub use syntax_kind::TokenKind;

pub mod scanner;
pub use scanner::{ScanError, Scanner, Token};
