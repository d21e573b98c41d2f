//! Parse errors.

use fusion_common::Position;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended where more tokens were required.
    UnexpectedEof,
    /// A token that cannot appear at this point.
    UnexpectedToken,
    /// The scanner rejected the input.
    Lexical,
    /// Valid PHP outside the supported page-script surface.
    Unsupported,
}

/// A syntax error with its 1-based location in the parsed text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} on line {}", .position.line)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Message without location, e.g. `Syntax error, unexpected EOF`.
    pub message: String,
    /// Byte offset of the offending token.
    pub pos: u32,
    pub position: Position,
}

impl ParseError {
    pub fn is_unexpected_eof(&self) -> bool {
        self.kind == ParseErrorKind::UnexpectedEof
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }
}
