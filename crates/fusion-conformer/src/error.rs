//! Errors raised while conforming a fragment.
//!
//! Every variant is fatal for the conform call that produced it: there is no
//! partial output.

use fusion_parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

pub type ConformResult<T> = Result<T, ConformError>;

#[derive(Debug, Error)]
pub enum ConformError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    UnsupportedLiteral(#[from] UnsupportedLiteralError),
}

impl ConformError {
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ConformError::Syntax(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_semantic(&self) -> Option<&SemanticError> {
        match self {
            ConformError::Semantic(err) => Some(err),
            _ => None,
        }
    }
}

/// The fragment does not parse, even after the trailing-semicolon repair.
///
/// `line` and `column` are 1-based and refer to the text that was parsed,
/// which includes any `<?php` marker the conformer prepended.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} on line {line}")]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub column: u32,
    /// Lines added in front of the fragment before parsing.
    pub prepended_lines: u32,
}

impl SyntaxError {
    pub(crate) fn from_parse(err: &ParseError, prepended_lines: u32) -> Self {
        SyntaxError {
            message: err.message.clone(),
            line: err.line(),
            column: err.column(),
            prepended_lines,
        }
    }

    /// Line in the fragment as the author wrote it.
    pub fn fragment_line(&self) -> u32 {
        self.line.saturating_sub(self.prepended_lines).max(1)
    }
}

/// An author-facing rule violated by the fragment.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Cannot expose an unnamed function.")]
    UnnamedExpose,
    #[error("Cannot assign the result of `expose` to a variable.")]
    AssignedExpose,
    #[error("Mount function must have exactly one argument.")]
    MountArity,
    #[error("Mount function argument must be an anonymous function or arrow function.")]
    MountArgument,
}

/// Literal extraction reached a node kind it has no mapping for.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unsupported literal of kind `{kind}`")]
pub struct UnsupportedLiteralError {
    pub kind: &'static str,
}

/// Loading `ConformOptions` failed.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid conform options")]
    Parse(#[from] serde_json::Error),
}
