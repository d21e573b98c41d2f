//! Token kinds produced by the scanner.
//!
//! Words (keywords included) are all scanned as `Identifier`; PHP keywords are
//! case-insensitive and many of them are legal member names, so the parser
//! decides from context whether a word is a keyword.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Structure
    OpenTag,
    CloseTag,
    EndOfFile,

    // Names and values
    Identifier,
    /// `Foo\Bar`
    QualifiedName,
    /// `\Foo\Bar` or `\Foo`
    FullyQualifiedName,
    /// `namespace\Foo`
    RelativeName,
    Variable,
    IntLiteral,
    FloatLiteral,
    /// Single- or double-quoted string, raw text including quotes.
    StringLiteral,
    /// Heredoc or nowdoc, raw text from `<<<` through the closing label.
    HeredocLiteral,
    /// `(int)`, `(string)`, ... raw text including parentheses.
    Cast,

    // Punctuation
    Semicolon,
    Comma,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Arrow,
    NullsafeArrow,
    DoubleArrow,
    DoubleColon,
    Ellipsis,
    Question,
    Colon,
    Dollar,
    AttributeOpen,
    Backslash,

    // Assignment
    Equals,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    DotEquals,
    PercentEquals,
    StarStarEquals,
    AmpersandEquals,
    BarEquals,
    CaretEquals,
    LessLessEquals,
    GreaterGreaterEquals,
    QuestionQuestionEquals,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    Dot,
    Ampersand,
    Bar,
    Caret,
    Tilde,
    LessLess,
    GreaterGreater,
    AmpersandAmpersand,
    BarBar,
    QuestionQuestion,
    EqualsEquals,
    EqualsEqualsEquals,
    ExclamationEquals,
    ExclamationEqualsEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Spaceship,
    Exclamation,
    PlusPlus,
    MinusMinus,
    At,
}

impl TokenKind {
    /// Whether the token can name something (identifier or any name form).
    pub fn is_name(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::QualifiedName
                | TokenKind::FullyQualifiedName
                | TokenKind::RelativeName
        )
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::DotEquals
                | TokenKind::PercentEquals
                | TokenKind::StarStarEquals
                | TokenKind::AmpersandEquals
                | TokenKind::BarEquals
                | TokenKind::CaretEquals
                | TokenKind::LessLessEquals
                | TokenKind::GreaterGreaterEquals
                | TokenKind::QuestionQuestionEquals
        )
    }

    /// Description used in "unexpected ..." syntax errors.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::EndOfFile => "EOF",
            TokenKind::Identifier => "identifier",
            TokenKind::QualifiedName => "fully qualified name",
            TokenKind::FullyQualifiedName => "fully qualified name",
            TokenKind::RelativeName => "namespace-relative name",
            TokenKind::Variable => "variable",
            TokenKind::IntLiteral => "integer",
            TokenKind::FloatLiteral => "floating-point number",
            TokenKind::StringLiteral => "string content",
            TokenKind::HeredocLiteral => "heredoc",
            _ => "token",
        }
    }
}

/// Case-insensitive keyword comparison.
#[inline]
pub fn keyword_eq(text: &str, keyword: &str) -> bool {
    text.eq_ignore_ascii_case(keyword)
}

/// Type names accepted inside a cast, e.g. `(int)`.
pub const CAST_TYPES: &[&str] = &[
    "int", "integer", "bool", "boolean", "float", "double", "real", "string", "binary", "array",
    "object", "unset",
];
