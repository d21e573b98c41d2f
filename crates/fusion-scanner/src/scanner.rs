//! Scanner implementation.
//!
//! The scanner walks a `<?php` source text and yields tokens with byte
//! offsets. Comments and whitespace are trivia: comments are collected onto
//! the token that follows them so the parser can attach them to statements.

use crate::syntax_kind::{CAST_TYPES, TokenKind, keyword_eq};
use fusion_common::Comment;
use thiserror::Error;

/// A lexical error at a byte offset.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScanError {
    pub message: String,
    pub pos: u32,
}

impl ScanError {
    fn new(message: impl Into<String>, pos: usize) -> Self {
        ScanError {
            message: message.into(),
            pos: pos as u32,
        }
    }
}

/// A scanned token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Start position (byte offset)
    pub start: u32,
    /// End position (byte offset, exclusive)
    pub end: u32,
    /// Comments between the previous token and this one.
    pub comments: Vec<Comment>,
}

impl Token {
    /// Get the token text from source.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start as usize..self.end as usize).unwrap_or("")
    }
}

pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    started: bool,
}

#[inline]
fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte >= 0x80
}

#[inline]
fn is_ident_part(byte: u8) -> bool {
    is_ident_start(byte) || byte.is_ascii_digit()
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            started: false,
        }
    }

    /// Scan the whole source, ending with an `EndOfFile` token.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token()?;
            let done = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn starts_with(&self, text: &str) -> bool {
        self.bytes[self.pos..].starts_with(text.as_bytes())
    }

    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        if !self.started {
            self.started = true;
            return self.scan_open_tag();
        }

        let comments = self.skip_trivia()?;
        let start = self.pos;
        let kind = if start >= self.bytes.len() {
            TokenKind::EndOfFile
        } else {
            self.scan_kind()?
        };

        Ok(Token {
            kind,
            start: start as u32,
            end: self.pos as u32,
            comments,
        })
    }

    fn scan_open_tag(&mut self) -> Result<Token, ScanError> {
        let tag_len = "<?php".len();
        let is_tag = self.bytes.len() >= tag_len
            && keyword_eq(&self.source[..tag_len], "<?php")
            && self
                .bytes
                .get(tag_len)
                .is_none_or(|byte| byte.is_ascii_whitespace());
        if !is_tag {
            return Err(ScanError::new(
                "Inline HTML outside of `<?php` is not supported",
                0,
            ));
        }
        self.pos = tag_len;
        Ok(Token {
            kind: TokenKind::OpenTag,
            start: 0,
            end: tag_len as u32,
            comments: Vec::new(),
        })
    }

    fn skip_trivia(&mut self) -> Result<Vec<Comment>, ScanError> {
        let mut comments = Vec::new();
        loop {
            let Some(byte) = self.peek(0) else {
                return Ok(comments);
            };
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c => self.pos += 1,
                b'#' if self.peek(1) != Some(b'[') => comments.push(self.scan_line_comment()),
                b'/' if self.peek(1) == Some(b'/') => comments.push(self.scan_line_comment()),
                b'/' if self.peek(1) == Some(b'*') => comments.push(self.scan_block_comment()?),
                _ => return Ok(comments),
            }
        }
    }

    fn scan_line_comment(&mut self) -> Comment {
        let start = self.pos;
        let end = memchr::memchr2(b'\n', b'\r', &self.bytes[start..])
            .map(|offset| start + offset)
            .unwrap_or(self.bytes.len());
        self.pos = end;
        Comment::from_source(&self.source[start..end], start as u32)
    }

    fn scan_block_comment(&mut self) -> Result<Comment, ScanError> {
        let start = self.pos;
        let Some(offset) = memchr::memmem::find(&self.bytes[start + 2..], b"*/") else {
            return Err(ScanError::new("Unterminated comment", start));
        };
        self.pos = start + 2 + offset + 2;
        Ok(Comment::from_source(
            &self.source[start..self.pos],
            start as u32,
        ))
    }

    fn scan_kind(&mut self) -> Result<TokenKind, ScanError> {
        let byte = self.bytes[self.pos];

        if is_ident_start(byte) {
            return Ok(self.scan_name());
        }
        if byte.is_ascii_digit()
            || (byte == b'.' && self.peek(1).is_some_and(|b| b.is_ascii_digit()))
        {
            return Ok(self.scan_number());
        }

        let kind = match byte {
            b'$' => {
                if self.peek(1).is_some_and(is_ident_start) {
                    self.pos += 1;
                    self.eat_ident_chars();
                    return Ok(TokenKind::Variable);
                }
                self.single(TokenKind::Dollar)
            }
            b'\\' => {
                if self.peek(1).is_some_and(is_ident_start) {
                    self.pos += 1;
                    self.eat_ident_chars();
                    self.eat_name_segments();
                    return Ok(TokenKind::FullyQualifiedName);
                }
                self.single(TokenKind::Backslash)
            }
            b'\'' => {
                self.scan_single_quoted()?;
                TokenKind::StringLiteral
            }
            b'"' => {
                self.scan_double_quoted()?;
                TokenKind::StringLiteral
            }
            b'`' => {
                return Err(ScanError::new(
                    "Shell-exec strings are not supported",
                    self.pos,
                ));
            }
            b'#' => {
                self.pos += 2;
                TokenKind::AttributeOpen
            }
            b'(' => self.scan_cast_or_paren(),
            b')' => self.single(TokenKind::CloseParen),
            b'[' => self.single(TokenKind::OpenBracket),
            b']' => self.single(TokenKind::CloseBracket),
            b'{' => self.single(TokenKind::OpenBrace),
            b'}' => self.single(TokenKind::CloseBrace),
            b';' => self.single(TokenKind::Semicolon),
            b',' => self.single(TokenKind::Comma),
            b'~' => self.single(TokenKind::Tilde),
            b'@' => self.single(TokenKind::At),
            b'<' => {
                if self.starts_with("<<<") {
                    self.scan_heredoc()?;
                    return Ok(TokenKind::HeredocLiteral);
                }
                self.longest(&[
                    ("<<=", TokenKind::LessLessEquals),
                    ("<=>", TokenKind::Spaceship),
                    ("<<", TokenKind::LessLess),
                    ("<=", TokenKind::LessEquals),
                    ("<>", TokenKind::ExclamationEquals),
                    ("<", TokenKind::Less),
                ])
            }
            b'>' => self.longest(&[
                (">>=", TokenKind::GreaterGreaterEquals),
                (">>", TokenKind::GreaterGreater),
                (">=", TokenKind::GreaterEquals),
                (">", TokenKind::Greater),
            ]),
            b'=' => self.longest(&[
                ("===", TokenKind::EqualsEqualsEquals),
                ("==", TokenKind::EqualsEquals),
                ("=>", TokenKind::DoubleArrow),
                ("=", TokenKind::Equals),
            ]),
            b'!' => self.longest(&[
                ("!==", TokenKind::ExclamationEqualsEquals),
                ("!=", TokenKind::ExclamationEquals),
                ("!", TokenKind::Exclamation),
            ]),
            b'+' => self.longest(&[
                ("++", TokenKind::PlusPlus),
                ("+=", TokenKind::PlusEquals),
                ("+", TokenKind::Plus),
            ]),
            b'-' => self.longest(&[
                ("--", TokenKind::MinusMinus),
                ("-=", TokenKind::MinusEquals),
                ("->", TokenKind::Arrow),
                ("-", TokenKind::Minus),
            ]),
            b'*' => self.longest(&[
                ("**=", TokenKind::StarStarEquals),
                ("**", TokenKind::StarStar),
                ("*=", TokenKind::StarEquals),
                ("*", TokenKind::Star),
            ]),
            b'/' => self.longest(&[("/=", TokenKind::SlashEquals), ("/", TokenKind::Slash)]),
            b'%' => self.longest(&[("%=", TokenKind::PercentEquals), ("%", TokenKind::Percent)]),
            b'.' => self.longest(&[
                ("...", TokenKind::Ellipsis),
                (".=", TokenKind::DotEquals),
                (".", TokenKind::Dot),
            ]),
            b'&' => self.longest(&[
                ("&&", TokenKind::AmpersandAmpersand),
                ("&=", TokenKind::AmpersandEquals),
                ("&", TokenKind::Ampersand),
            ]),
            b'|' => self.longest(&[
                ("||", TokenKind::BarBar),
                ("|=", TokenKind::BarEquals),
                ("|", TokenKind::Bar),
            ]),
            b'^' => self.longest(&[("^=", TokenKind::CaretEquals), ("^", TokenKind::Caret)]),
            b'?' => self.longest(&[
                ("?->", TokenKind::NullsafeArrow),
                ("??=", TokenKind::QuestionQuestionEquals),
                ("??", TokenKind::QuestionQuestion),
                ("?>", TokenKind::CloseTag),
                ("?", TokenKind::Question),
            ]),
            b':' => self.longest(&[("::", TokenKind::DoubleColon), (":", TokenKind::Colon)]),
            _ => {
                return Err(ScanError::new(
                    format!("Unexpected character \"{}\"", char::from(byte)),
                    self.pos,
                ));
            }
        };
        Ok(kind)
    }

    #[inline]
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    /// Match the first (longest-first ordered) operator spelling.
    fn longest(&mut self, candidates: &[(&str, TokenKind)]) -> TokenKind {
        for (text, kind) in candidates {
            if self.starts_with(text) {
                self.pos += text.len();
                return *kind;
            }
        }
        // The last candidate is always the single leading byte.
        self.pos += 1;
        candidates[candidates.len() - 1].1
    }

    fn eat_ident_chars(&mut self) {
        while self.peek(0).is_some_and(is_ident_part) {
            self.pos += 1;
        }
    }

    /// Consume `\Segment` continuations. Returns true if any were consumed.
    fn eat_name_segments(&mut self) -> bool {
        let mut any = false;
        while self.peek(0) == Some(b'\\') && self.peek(1).is_some_and(is_ident_start) {
            self.pos += 1;
            self.eat_ident_chars();
            any = true;
        }
        any
    }

    fn scan_name(&mut self) -> TokenKind {
        let start = self.pos;
        self.eat_ident_chars();
        let is_namespace_word = keyword_eq(&self.source[start..self.pos], "namespace");
        if self.eat_name_segments() {
            if is_namespace_word {
                return TokenKind::RelativeName;
            }
            return TokenKind::QualifiedName;
        }
        TokenKind::Identifier
    }

    fn eat_digits(&mut self, accept: fn(u8) -> bool) {
        while self.peek(0).is_some_and(|b| accept(b) || b == b'_') {
            self.pos += 1;
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        if self.peek(0) == Some(b'0') {
            match self.peek(1) {
                Some(b'x' | b'X') => {
                    self.pos += 2;
                    self.eat_digits(|b| b.is_ascii_hexdigit());
                    return TokenKind::IntLiteral;
                }
                Some(b'b' | b'B') => {
                    self.pos += 2;
                    self.eat_digits(|b| b == b'0' || b == b'1');
                    return TokenKind::IntLiteral;
                }
                Some(b'o' | b'O') => {
                    self.pos += 2;
                    self.eat_digits(|b| (b'0'..=b'7').contains(&b));
                    return TokenKind::IntLiteral;
                }
                _ => {}
            }
        }

        let mut kind = TokenKind::IntLiteral;
        self.eat_digits(|b| b.is_ascii_digit());
        if self.peek(0) == Some(b'.') && self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
            kind = TokenKind::FloatLiteral;
            self.pos += 1;
            self.eat_digits(|b| b.is_ascii_digit());
        }
        if matches!(self.peek(0), Some(b'e' | b'E')) {
            let digit_at = if matches!(self.peek(1), Some(b'+' | b'-')) {
                2
            } else {
                1
            };
            if self.peek(digit_at).is_some_and(|b| b.is_ascii_digit()) {
                kind = TokenKind::FloatLiteral;
                self.pos += digit_at;
                self.eat_digits(|b| b.is_ascii_digit());
            }
        }
        kind
    }

    fn scan_single_quoted(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None => return Err(ScanError::new("Unterminated string", start)),
                Some(b'\\') => self.pos += 2,
                Some(b'\'') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_double_quoted(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None => return Err(ScanError::new("Unterminated string", start)),
                Some(b'\\') => self.pos += 2,
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(b'{') if self.peek(1) == Some(b'$') => self.skip_interpolation(start)?,
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Skip a `{$...}` interpolation, including nested braces and strings.
    fn skip_interpolation(&mut self, string_start: usize) -> Result<(), ScanError> {
        let mut depth = 0usize;
        loop {
            match self.peek(0) {
                None => return Err(ScanError::new("Unterminated string", string_start)),
                Some(b'{') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b'}') => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(b'\'') => self.scan_single_quoted()?,
                Some(b'"') => self.scan_double_quoted()?,
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_heredoc(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        self.pos += 3;
        while matches!(self.peek(0), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
        let quote = match self.peek(0) {
            Some(q @ (b'\'' | b'"')) => {
                self.pos += 1;
                Some(q)
            }
            _ => None,
        };
        let label_start = self.pos;
        self.eat_ident_chars();
        let label = &self.source[label_start..self.pos];
        if label.is_empty() {
            return Err(ScanError::new("Invalid heredoc label", start));
        }
        if let Some(q) = quote {
            if self.peek(0) != Some(q) {
                return Err(ScanError::new("Invalid heredoc label", start));
            }
            self.pos += 1;
        }

        // Find a line whose first non-blank text is the label.
        let mut line_start = match memchr::memchr(b'\n', &self.bytes[self.pos..]) {
            Some(offset) => self.pos + offset + 1,
            None => return Err(ScanError::new("Unterminated heredoc", start)),
        };
        loop {
            let mut cursor = line_start;
            while matches!(self.bytes.get(cursor), Some(b' ' | b'\t')) {
                cursor += 1;
            }
            if self.bytes[cursor..].starts_with(label.as_bytes())
                && !self
                    .bytes
                    .get(cursor + label.len())
                    .is_some_and(|b| is_ident_part(*b))
            {
                self.pos = cursor + label.len();
                return Ok(());
            }
            line_start = match memchr::memchr(b'\n', &self.bytes[line_start..]) {
                Some(offset) => line_start + offset + 1,
                None => return Err(ScanError::new("Unterminated heredoc", start)),
            };
        }
    }

    fn scan_cast_or_paren(&mut self) -> TokenKind {
        let mut cursor = self.pos + 1;
        while matches!(self.bytes.get(cursor), Some(b' ' | b'\t')) {
            cursor += 1;
        }
        let word_start = cursor;
        while self.bytes.get(cursor).is_some_and(|b| b.is_ascii_alphabetic()) {
            cursor += 1;
        }
        let word = &self.source[word_start..cursor];
        while matches!(self.bytes.get(cursor), Some(b' ' | b'\t')) {
            cursor += 1;
        }
        if self.bytes.get(cursor) == Some(&b')')
            && CAST_TYPES.iter().any(|cast| keyword_eq(word, cast))
        {
            self.pos = cursor + 1;
            return TokenKind::Cast;
        }
        self.single(TokenKind::OpenParen)
    }
}
