//! Class declarations and class member parsing.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::{ParseResult, ParserState};
use fusion_scanner::TokenKind;

impl<'a> ParserState<'a> {
    /// `[modifiers] class Name ...` at statement level.
    pub(crate) fn parse_class_declaration(
        &mut self,
        attr_groups: NodeList,
    ) -> ParseResult<NodeIndex> {
        let modifiers = self.parse_modifiers();
        self.expect_keyword("class")?;
        let name = self.expect_identifier()?;
        let class = self.parse_class_remainder(attr_groups, modifiers, Some(name))?;
        Ok(self.arena.add(Node::Class(class)))
    }

    /// Everything after the class name: `extends`, `implements` and the body.
    /// Shared with anonymous classes.
    pub(crate) fn parse_class_remainder(
        &mut self,
        attr_groups: NodeList,
        modifiers: Modifiers,
        name: Option<String>,
    ) -> ParseResult<ClassData> {
        let extends = if self.eat_keyword("extends") {
            self.parse_name()?
        } else {
            NodeIndex::NONE
        };

        let mut implements = Vec::new();
        if self.eat_keyword("implements") {
            loop {
                implements.push(self.parse_name()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::OpenBrace)?;
        let mut members = Vec::new();
        loop {
            if self.at(TokenKind::CloseBrace) {
                self.push_trailing_comments(&mut members);
                break;
            }
            members.push(self.parse_class_member()?);
        }
        self.expect(TokenKind::CloseBrace)?;

        Ok(ClassData {
            attr_groups,
            modifiers,
            name,
            extends,
            implements,
            members,
        })
    }

    /// Consume any run of modifier keywords.
    pub(crate) fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        loop {
            let flag = match self.text().to_ascii_lowercase().as_str() {
                _ if !self.at(TokenKind::Identifier) => break,
                "public" => Modifiers::PUBLIC,
                "protected" => Modifiers::PROTECTED,
                "private" => Modifiers::PRIVATE,
                "static" => Modifiers::STATIC,
                "abstract" => Modifiers::ABSTRACT,
                "final" => Modifiers::FINAL,
                "readonly" => Modifiers::READONLY,
                _ => break,
            };
            // `static function` closures and `static::` are not modifiers.
            if flag == Modifiers::STATIC
                && matches!(self.peek_kind(1), TokenKind::DoubleColon | TokenKind::OpenParen)
            {
                break;
            }
            modifiers |= flag;
            self.advance();
        }
        modifiers
    }

    fn parse_class_member(&mut self) -> ParseResult<NodeIndex> {
        let comments = self.take_leading_comments();
        let member = self.parse_class_member_inner()?;
        self.attach_comments(member, comments);
        Ok(member)
    }

    fn parse_class_member_inner(&mut self) -> ParseResult<NodeIndex> {
        let attr_groups = self.parse_attribute_groups()?;

        if attr_groups.is_empty() && self.at_keyword("use") {
            return self.parse_trait_use();
        }
        if self.at_keyword("case") {
            return Err(self.unsupported("enum cases"));
        }

        let var = self.eat_keyword("var");
        let modifiers = self.parse_modifiers();

        if self.at_keyword("const") {
            return self.parse_class_const(attr_groups, modifiers);
        }
        if self.at_keyword("function") {
            return self.parse_method(attr_groups, modifiers);
        }
        if !var && modifiers.is_empty() {
            return Err(self.unexpected());
        }
        self.parse_property(attr_groups, modifiers)
    }

    fn parse_trait_use(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("use")?;
        let mut traits = Vec::new();
        loop {
            traits.push(self.parse_name()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if self.at(TokenKind::OpenBrace) {
            return Err(self.unsupported("trait adaptations"));
        }
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::TraitUse(traits)))
    }

    fn parse_class_const(
        &mut self,
        attr_groups: NodeList,
        modifiers: Modifiers,
    ) -> ParseResult<NodeIndex> {
        self.expect_keyword("const")?;
        if self.peek_kind(1) != TokenKind::Equals {
            return Err(self.unsupported("typed class constants"));
        }
        let items = self.parse_const_items()?;
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::ClassConst(ClassConstData {
            attr_groups,
            modifiers,
            items,
        })))
    }

    fn parse_method(
        &mut self,
        attr_groups: NodeList,
        modifiers: Modifiers,
    ) -> ParseResult<NodeIndex> {
        self.expect_keyword("function")?;
        let by_ref = self.eat(TokenKind::Ampersand);
        let name = self.expect_identifier()?;
        let params = self.parse_params()?;
        let return_type = self.parse_optional_return_type()?;

        let (body, has_body) = if self.eat(TokenKind::Semicolon) {
            (Vec::new(), false)
        } else {
            (self.parse_block_body()?, true)
        };

        Ok(self.arena.add(Node::ClassMethod(MethodData {
            attr_groups,
            modifiers,
            by_ref,
            name,
            params,
            return_type,
            body,
            has_body,
        })))
    }

    fn parse_property(
        &mut self,
        attr_groups: NodeList,
        modifiers: Modifiers,
    ) -> ParseResult<NodeIndex> {
        let ty = if self.at(TokenKind::Variable) {
            NodeIndex::NONE
        } else {
            self.parse_type()?
        };

        let mut items = Vec::new();
        loop {
            let name = self.expect_variable()?;
            let default = if self.eat(TokenKind::Equals) {
                self.parse_expression()?
            } else {
                NodeIndex::NONE
            };
            items.push(self.arena.add(Node::PropertyItem(PropertyItem { name, default })));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if self.at(TokenKind::OpenBrace) {
            return Err(self.unsupported("property hooks"));
        }
        self.expect_semicolon()?;

        Ok(self.arena.add(Node::Property(PropertyData {
            attr_groups,
            modifiers,
            ty,
            items,
        })))
    }
}
