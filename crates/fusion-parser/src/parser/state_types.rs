//! Names, type declarations, parameters and attributes.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::{ParseResult, ParserState};
use fusion_scanner::TokenKind;

impl<'a> ParserState<'a> {
    /// Any name token as a `Name` node.
    pub(crate) fn parse_name(&mut self) -> ParseResult<NodeIndex> {
        let text = self.text();
        let (text, kind) = match self.kind() {
            TokenKind::Identifier | TokenKind::QualifiedName => (text, NameKind::Normal),
            TokenKind::FullyQualifiedName => (&text[1..], NameKind::FullyQualified),
            // `namespace\` is ten bytes.
            TokenKind::RelativeName => (&text[10..], NameKind::Relative),
            _ => return Err(self.unexpected()),
        };
        self.advance();
        Ok(self.arena.make_name(text, kind))
    }

    /// A type declaration: `T`, `?T`, `A|B`, `A&B`, or DNF `(A&B)|C`.
    pub(crate) fn parse_type(&mut self) -> ParseResult<NodeIndex> {
        if self.eat(TokenKind::Question) {
            let inner = self.parse_name()?;
            return Ok(self.arena.add(Node::NullableType(inner)));
        }

        let first = self.parse_type_atom()?;
        if self.at(TokenKind::Bar) {
            let mut types = vec![first];
            while self.eat(TokenKind::Bar) {
                types.push(self.parse_type_atom()?);
            }
            return Ok(self.arena.add(Node::UnionType(types)));
        }
        if self.at_intersection_ampersand() {
            let mut types = vec![first];
            while self.at_intersection_ampersand() {
                self.advance();
                types.push(self.parse_name()?);
            }
            return Ok(self.arena.add(Node::IntersectionType(types)));
        }
        Ok(first)
    }

    /// A name, or a parenthesized intersection inside a union.
    fn parse_type_atom(&mut self) -> ParseResult<NodeIndex> {
        if !self.eat(TokenKind::OpenParen) {
            return self.parse_name();
        }
        let mut types = vec![self.parse_name()?];
        while self.eat(TokenKind::Ampersand) {
            types.push(self.parse_name()?);
        }
        self.expect(TokenKind::CloseParen)?;
        Ok(self.arena.add(Node::IntersectionType(types)))
    }

    /// `&` followed by another type, as opposed to a by-reference marker.
    fn at_intersection_ampersand(&self) -> bool {
        self.at(TokenKind::Ampersand) && self.peek_kind(1).is_name()
    }

    /// `: Type` after a parameter list, or `NONE`.
    pub(crate) fn parse_optional_return_type(&mut self) -> ParseResult<NodeIndex> {
        if self.eat(TokenKind::Colon) {
            self.parse_type()
        } else {
            Ok(NodeIndex::NONE)
        }
    }

    /// `( param, ... )`
    pub(crate) fn parse_params(&mut self) -> ParseResult<NodeList> {
        self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        while !self.at(TokenKind::CloseParen) {
            params.push(self.parse_param()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::CloseParen)?;
        Ok(params)
    }

    fn parse_param(&mut self) -> ParseResult<NodeIndex> {
        let attr_groups = self.parse_attribute_groups()?;
        let modifiers = self.parse_modifiers();
        let ty = match self.kind() {
            TokenKind::Variable | TokenKind::Ampersand | TokenKind::Ellipsis => NodeIndex::NONE,
            _ => self.parse_type()?,
        };
        let by_ref = self.eat(TokenKind::Ampersand);
        let variadic = self.eat(TokenKind::Ellipsis);
        let name = self.expect_variable()?;
        let default = if self.eat(TokenKind::Equals) {
            self.parse_expression()?
        } else {
            NodeIndex::NONE
        };

        Ok(self.arena.add(Node::Param(ParamData {
            attr_groups,
            modifiers,
            ty,
            by_ref,
            variadic,
            name,
            default,
        })))
    }

    /// Zero or more `#[A, B(args)]` groups.
    pub(crate) fn parse_attribute_groups(&mut self) -> ParseResult<NodeList> {
        let mut groups = Vec::new();
        while self.eat(TokenKind::AttributeOpen) {
            let mut attributes = Vec::new();
            while !self.at(TokenKind::CloseBracket) {
                let name = self.parse_name()?;
                let args = if self.at(TokenKind::OpenParen) {
                    self.parse_args()?
                } else {
                    Vec::new()
                };
                attributes.push(self.arena.add(Node::Attribute(AttributeData { name, args })));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::CloseBracket)?;
            groups.push(self.arena.add(Node::AttributeGroup(attributes)));
        }
        Ok(groups)
    }
}
