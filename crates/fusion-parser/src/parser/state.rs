//! Parser state: token cursor, error construction and the file entry point.
//!
//! The grammar itself lives in the `state_*` modules, each adding methods to
//! `ParserState`.

use super::base::{NodeIndex, NodeList};
use super::error::{ParseError, ParseErrorKind};
use super::node::{Node, NodeArena};
use super::tree::SyntaxTree;
use fusion_common::{Comment, LineMap};
use fusion_scanner::syntax_kind::keyword_eq;
use fusion_scanner::{Scanner, Token, TokenKind};
use rustc_hash::FxHashMap;
use tracing::debug;

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse a complete `<?php` source text.
pub fn parse_source(source: &str) -> Result<SyntaxTree, ParseError> {
    ParserState::new(source)?.parse_file()
}

pub struct ParserState<'a> {
    pub(crate) source: &'a str,
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) arena: NodeArena,
    pub(crate) comments: FxHashMap<NodeIndex, Vec<Comment>>,
    line_map: LineMap,
}

impl<'a> ParserState<'a> {
    pub fn new(source: &'a str) -> ParseResult<Self> {
        let line_map = LineMap::build(source);
        let tokens = Scanner::tokenize(source).map_err(|err| ParseError {
            kind: ParseErrorKind::Lexical,
            message: format!("Syntax error, {}", err.message),
            pos: err.pos,
            position: line_map.position_of(err.pos),
        })?;

        Ok(ParserState {
            source,
            arena: NodeArena::with_capacity(tokens.len()),
            tokens,
            pos: 0,
            comments: FxHashMap::default(),
            line_map,
        })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(bytes = self.source.len()))]
    pub fn parse_file(mut self) -> ParseResult<SyntaxTree> {
        self.expect(TokenKind::OpenTag)?;
        let stmts = self.parse_top_level_statements()?;
        let root = self.arena.add(Node::File(stmts));
        debug!(nodes = self.arena.len(), "parsed file");
        Ok(SyntaxTree::new(self.arena, root, self.comments))
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    #[inline]
    pub(crate) fn kind(&self) -> TokenKind {
        self.token_at(0).kind
    }

    #[inline]
    pub(crate) fn peek_kind(&self, offset: usize) -> TokenKind {
        self.token_at(offset).kind
    }

    #[inline]
    pub(crate) fn text(&self) -> &'a str {
        self.token_at(0).text(self.source)
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    #[inline]
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.at(TokenKind::EndOfFile)
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Whether the current token is the (case-insensitive) keyword.
    #[inline]
    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        self.peek_keyword(0, keyword)
    }

    #[inline]
    pub(crate) fn peek_keyword(&self, offset: usize, keyword: &str) -> bool {
        let token = self.token_at(offset);
        token.kind == TokenKind::Identifier && keyword_eq(token.text(self.source), keyword)
    }

    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consume any word token (keywords included) and return its text.
    pub(crate) fn expect_identifier(&mut self) -> ParseResult<String> {
        if !self.at(TokenKind::Identifier) {
            return Err(self.unexpected());
        }
        let text = self.text().to_string();
        self.advance();
        Ok(text)
    }

    /// Consume a `$variable` token and return its name without `$`.
    pub(crate) fn expect_variable(&mut self) -> ParseResult<String> {
        if !self.at(TokenKind::Variable) {
            return Err(self.unexpected());
        }
        let name = self.text()[1..].to_string();
        self.advance();
        Ok(name)
    }

    pub(crate) fn expect_semicolon(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::Semicolon)
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Take the comments that precede the current token.
    pub(crate) fn take_leading_comments(&mut self) -> Vec<Comment> {
        let last = self.tokens.len() - 1;
        std::mem::take(&mut self.tokens[self.pos.min(last)].comments)
    }

    /// Give comments back to the current token.
    pub(crate) fn restore_leading_comments(&mut self, mut comments: Vec<Comment>) {
        if comments.is_empty() {
            return;
        }
        let last = self.tokens.len() - 1;
        let token = &mut self.tokens[self.pos.min(last)];
        comments.append(&mut token.comments);
        token.comments = comments;
    }

    pub(crate) fn attach_comments(&mut self, node: NodeIndex, comments: Vec<Comment>) {
        if !comments.is_empty() {
            self.comments.insert(node, comments);
        }
    }

    /// Turn comments left before a closing token into a `Nop` statement.
    pub(crate) fn push_trailing_comments(&mut self, stmts: &mut NodeList) {
        let comments = self.take_leading_comments();
        if !comments.is_empty() {
            let nop = self.arena.add(Node::Nop);
            self.attach_comments(nop, comments);
            stmts.push(nop);
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    fn error_at_current(&self, kind: ParseErrorKind, message: String) -> ParseError {
        let token = self.token_at(0);
        ParseError {
            kind,
            message,
            pos: token.start,
            position: self.line_map.position_of(token.start),
        }
    }

    /// `Syntax error, unexpected ...` for the current token.
    pub(crate) fn unexpected(&self) -> ParseError {
        let token = self.token_at(0);
        if token.kind == TokenKind::EndOfFile {
            return self.error_at_current(
                ParseErrorKind::UnexpectedEof,
                "Syntax error, unexpected EOF".to_string(),
            );
        }
        let text = token.text(self.source);
        self.error_at_current(
            ParseErrorKind::UnexpectedToken,
            format!(
                "Syntax error, unexpected {} \"{}\"",
                token.kind.describe(),
                text
            ),
        )
    }

    pub(crate) fn unsupported(&self, what: &str) -> ParseError {
        if self.at_eof() {
            return self.unexpected();
        }
        self.error_at_current(
            ParseErrorKind::Unsupported,
            format!("Unsupported syntax: {what}"),
        )
    }
}
