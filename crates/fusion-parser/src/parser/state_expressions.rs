//! Expression parsing.
//!
//! Binary operators are handled by precedence climbing over the table in
//! `binary_operator`. Higher numbers bind tighter. Assignment is not in the
//! table: it is recognized right after an assignable operand, whatever the
//! current minimum precedence, which matches how PHP accepts `!$a = f()`.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::{ParseResult, ParserState};
use fusion_scanner::TokenKind;
use fusion_scanner::syntax_kind::keyword_eq;

const PREC_ASSIGN: u8 = 4;
const PREC_TERNARY: u8 = 5;
const PREC_INSTANCEOF: u8 = 18;
const PREC_UNARY: u8 = 19;

impl<'a> ParserState<'a> {
    pub(crate) fn parse_expression(&mut self) -> ParseResult<NodeIndex> {
        self.parse_expression_bp(0)
    }

    /// Operator info for the current token: (precedence, right associative, op).
    fn binary_operator(&self) -> Option<(u8, bool, BinaryOp)> {
        let info = match self.kind() {
            TokenKind::QuestionQuestion => (6, true, BinaryOp::Coalesce),
            TokenKind::BarBar => (7, false, BinaryOp::BooleanOr),
            TokenKind::AmpersandAmpersand => (8, false, BinaryOp::BooleanAnd),
            TokenKind::Bar => (9, false, BinaryOp::BitOr),
            TokenKind::Caret => (10, false, BinaryOp::BitXor),
            TokenKind::Ampersand => (11, false, BinaryOp::BitAnd),
            TokenKind::EqualsEquals => (12, false, BinaryOp::Equal),
            TokenKind::ExclamationEquals => (12, false, BinaryOp::NotEqual),
            TokenKind::EqualsEqualsEquals => (12, false, BinaryOp::Identical),
            TokenKind::ExclamationEqualsEquals => (12, false, BinaryOp::NotIdentical),
            TokenKind::Spaceship => (12, false, BinaryOp::Spaceship),
            TokenKind::Less => (13, false, BinaryOp::Smaller),
            TokenKind::LessEquals => (13, false, BinaryOp::SmallerOrEqual),
            TokenKind::Greater => (13, false, BinaryOp::Greater),
            TokenKind::GreaterEquals => (13, false, BinaryOp::GreaterOrEqual),
            TokenKind::Dot => (14, false, BinaryOp::Concat),
            TokenKind::LessLess => (15, false, BinaryOp::ShiftLeft),
            TokenKind::GreaterGreater => (15, false, BinaryOp::ShiftRight),
            TokenKind::Plus => (16, false, BinaryOp::Plus),
            TokenKind::Minus => (16, false, BinaryOp::Minus),
            TokenKind::Star => (17, false, BinaryOp::Mul),
            TokenKind::Slash => (17, false, BinaryOp::Div),
            TokenKind::Percent => (17, false, BinaryOp::Mod),
            TokenKind::StarStar => (21, true, BinaryOp::Pow),
            TokenKind::Identifier => {
                let text = self.text();
                if keyword_eq(text, "or") {
                    (1, false, BinaryOp::LogicalOr)
                } else if keyword_eq(text, "xor") {
                    (2, false, BinaryOp::LogicalXor)
                } else if keyword_eq(text, "and") {
                    (3, false, BinaryOp::LogicalAnd)
                } else {
                    return None;
                }
            }
            _ => return None,
        };
        Some(info)
    }

    pub(crate) fn parse_expression_bp(&mut self, min_prec: u8) -> ParseResult<NodeIndex> {
        let left = self.parse_unary_expression()?;
        self.parse_binary_rest(left, min_prec)
    }

    fn parse_binary_rest(&mut self, mut left: NodeIndex, min_prec: u8) -> ParseResult<NodeIndex> {
        loop {
            if self.at(TokenKind::Question) {
                if PREC_TERNARY < min_prec {
                    break;
                }
                self.advance();
                let then = if self.at(TokenKind::Colon) {
                    NodeIndex::NONE
                } else {
                    self.parse_expression()?
                };
                self.expect(TokenKind::Colon)?;
                let otherwise = self.parse_expression_bp(PREC_TERNARY + 1)?;
                left = self.arena.add(Node::Ternary(TernaryData {
                    cond: left,
                    then,
                    otherwise,
                }));
                continue;
            }

            if self.at_keyword("instanceof") {
                if PREC_INSTANCEOF < min_prec {
                    break;
                }
                self.advance();
                let class = self.parse_class_reference()?;
                left = self.arena.add(Node::Instanceof(InstanceofData { expr: left, class }));
                continue;
            }

            let Some((prec, right_assoc, op)) = self.binary_operator() else {
                break;
            };
            if prec < min_prec {
                break;
            }
            self.advance();
            let next_min = if right_assoc { prec } else { prec + 1 };
            let right = self.parse_expression_bp(next_min)?;
            left = self.arena.add(Node::Binary(BinaryData { left, op, right }));
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<NodeIndex> {
        let op = match self.kind() {
            TokenKind::Exclamation => Some((UnaryOp::Not, PREC_INSTANCEOF)),
            TokenKind::Minus => Some((UnaryOp::Minus, PREC_UNARY)),
            TokenKind::Plus => Some((UnaryOp::Plus, PREC_UNARY)),
            TokenKind::Tilde => Some((UnaryOp::BitNot, PREC_UNARY)),
            TokenKind::At => Some((UnaryOp::Silence, PREC_UNARY)),
            _ => None,
        };
        if let Some((op, operand_prec)) = op {
            self.advance();
            let operand = self.parse_expression_bp(operand_prec)?;
            return Ok(self.arena.add(Node::Unary(UnaryData { op, operand })));
        }

        match self.kind() {
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = if self.at(TokenKind::PlusPlus) {
                    UnaryOp::PreInc
                } else {
                    UnaryOp::PreDec
                };
                self.advance();
                let operand = self.parse_postfix_expression()?;
                return Ok(self.arena.add(Node::Unary(UnaryData { op, operand })));
            }
            TokenKind::Cast => {
                let ty = canonical_cast_type(self.text());
                self.advance();
                let operand = self.parse_expression_bp(PREC_UNARY)?;
                return Ok(self.arena.add(Node::Cast(CastData { ty, operand })));
            }
            TokenKind::Identifier => {
                if let Some(expr) = self.parse_keyword_operator()? {
                    return Ok(expr);
                }
            }
            _ => {}
        }

        let expr = self.parse_postfix_expression()?;
        if self.kind().is_assignment() && self.is_assignable(expr) {
            return self.parse_assignment(expr);
        }
        Ok(expr)
    }

    /// Prefix keyword operators: `clone`, `print`, `throw`, `include` and friends.
    fn parse_keyword_operator(&mut self) -> ParseResult<Option<NodeIndex>> {
        let keyword = self.text().to_ascii_lowercase();
        let node = match keyword.as_str() {
            "clone" => {
                self.advance();
                Node::Clone(self.parse_unary_expression()?)
            }
            "print" => {
                self.advance();
                Node::Print(self.parse_expression_bp(PREC_TERNARY)?)
            }
            "throw" => {
                self.advance();
                Node::Throw(self.parse_expression()?)
            }
            "include" | "include_once" | "require" | "require_once" => {
                let kind = match keyword.as_str() {
                    "include" => IncludeKind::Include,
                    "include_once" => IncludeKind::IncludeOnce,
                    "require" => IncludeKind::Require,
                    _ => IncludeKind::RequireOnce,
                };
                self.advance();
                let expr = self.parse_expression_bp(PREC_TERNARY)?;
                Node::Include(IncludeData { kind, expr })
            }
            "yield" => return Err(self.unsupported("generators")),
            _ => return Ok(None),
        };
        Ok(Some(self.arena.add(node)))
    }

    fn is_assignable(&self, expr: NodeIndex) -> bool {
        match self.arena.get(expr) {
            Some(
                Node::Variable(_)
                | Node::VariableVariable(_)
                | Node::PropertyFetch(_)
                | Node::StaticPropertyFetch(_)
                | Node::ArrayDimFetch(_),
            ) => true,
            Some(Node::ArrayLit(array)) => array.kind != ArrayKind::Long,
            _ => false,
        }
    }

    fn parse_assignment(&mut self, target: NodeIndex) -> ParseResult<NodeIndex> {
        let op = match self.kind() {
            TokenKind::PlusEquals => AssignOp::Plus,
            TokenKind::MinusEquals => AssignOp::Minus,
            TokenKind::StarEquals => AssignOp::Mul,
            TokenKind::SlashEquals => AssignOp::Div,
            TokenKind::DotEquals => AssignOp::Concat,
            TokenKind::PercentEquals => AssignOp::Mod,
            TokenKind::StarStarEquals => AssignOp::Pow,
            TokenKind::AmpersandEquals => AssignOp::BitAnd,
            TokenKind::BarEquals => AssignOp::BitOr,
            TokenKind::CaretEquals => AssignOp::BitXor,
            TokenKind::LessLessEquals => AssignOp::ShiftLeft,
            TokenKind::GreaterGreaterEquals => AssignOp::ShiftRight,
            TokenKind::QuestionQuestionEquals => AssignOp::Coalesce,
            _ => AssignOp::Assign,
        };
        self.advance();
        let by_ref = op == AssignOp::Assign && self.eat(TokenKind::Ampersand);
        let value = self.parse_expression_bp(PREC_ASSIGN)?;
        Ok(self.arena.add(Node::Assign(AssignData {
            target,
            op,
            value,
            by_ref,
        })))
    }

    // =========================================================================
    // Postfix chains
    // =========================================================================

    fn parse_postfix_expression(&mut self) -> ParseResult<NodeIndex> {
        let primary = self.parse_primary()?;
        self.parse_postfix_rest(primary, true)
    }

    /// Dereferences, calls and postfix `++`/`--` after `expr`. With
    /// `allow_calls` false (class references after `new`), calls stop the chain.
    fn parse_postfix_rest(
        &mut self,
        mut expr: NodeIndex,
        allow_calls: bool,
    ) -> ParseResult<NodeIndex> {
        loop {
            match self.kind() {
                TokenKind::OpenBracket => {
                    self.advance();
                    let dim = if self.at(TokenKind::CloseBracket) {
                        NodeIndex::NONE
                    } else {
                        self.parse_expression()?
                    };
                    self.expect(TokenKind::CloseBracket)?;
                    expr = self
                        .arena
                        .add(Node::ArrayDimFetch(ArrayDimFetchData { array: expr, dim }));
                }
                TokenKind::Arrow | TokenKind::NullsafeArrow => {
                    let nullsafe = self.at(TokenKind::NullsafeArrow);
                    self.advance();
                    let name = self.parse_member_name()?;
                    if allow_calls && self.at(TokenKind::OpenParen) {
                        let args = self.parse_args()?;
                        expr = self.arena.add(Node::MethodCall(MethodCallData {
                            receiver: expr,
                            name,
                            args,
                            nullsafe,
                        }));
                    } else {
                        expr = self.arena.add(Node::PropertyFetch(PropertyFetchData {
                            receiver: expr,
                            name,
                            nullsafe,
                        }));
                    }
                }
                TokenKind::DoubleColon => {
                    self.advance();
                    expr = self.parse_static_member(expr, allow_calls)?;
                }
                TokenKind::OpenParen if allow_calls => {
                    let args = self.parse_args()?;
                    expr = self.arena.add(Node::FuncCall(CallData { callee: expr, args }));
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus if allow_calls => {
                    if !self.is_assignable(expr) {
                        break;
                    }
                    let op = if self.at(TokenKind::PlusPlus) {
                        UnaryOp::PostInc
                    } else {
                        UnaryOp::PostDec
                    };
                    self.advance();
                    expr = self.arena.add(Node::Unary(UnaryData { op, operand: expr }));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Name after `->`: an identifier, a variable, or `{expr}`.
    fn parse_member_name(&mut self) -> ParseResult<NodeIndex> {
        match self.kind() {
            TokenKind::Identifier => {
                let name = self.expect_identifier()?;
                Ok(self.arena.make_identifier(&name))
            }
            TokenKind::Variable => {
                let name = self.expect_variable()?;
                Ok(self.arena.make_variable(&name))
            }
            TokenKind::OpenBrace => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseBrace)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Member after `::`.
    fn parse_static_member(
        &mut self,
        class: NodeIndex,
        allow_calls: bool,
    ) -> ParseResult<NodeIndex> {
        match self.kind() {
            TokenKind::Variable => {
                let name = self.expect_variable()?;
                if allow_calls && self.at(TokenKind::OpenParen) {
                    let name = self.arena.make_variable(&name);
                    let args = self.parse_args()?;
                    return Ok(self
                        .arena
                        .add(Node::StaticCall(StaticCallData { class, name, args })));
                }
                let name = self.arena.make_identifier(&name);
                Ok(self
                    .arena
                    .add(Node::StaticPropertyFetch(StaticPropertyFetchData { class, name })))
            }
            TokenKind::Identifier => {
                let text = self.expect_identifier()?;
                let name = self.arena.make_identifier(&text);
                if allow_calls && self.at(TokenKind::OpenParen) {
                    let args = self.parse_args()?;
                    return Ok(self
                        .arena
                        .add(Node::StaticCall(StaticCallData { class, name, args })));
                }
                Ok(self
                    .arena
                    .add(Node::ClassConstFetch(ClassConstFetchData { class, name })))
            }
            _ => Err(self.unexpected()),
        }
    }

    // =========================================================================
    // Primaries
    // =========================================================================

    fn parse_primary(&mut self) -> ParseResult<NodeIndex> {
        match self.kind() {
            TokenKind::Variable => {
                let name = self.expect_variable()?;
                Ok(self.arena.make_variable(&name))
            }
            TokenKind::Dollar => self.parse_variable_variable(),
            TokenKind::IntLiteral => {
                let raw = self.text().to_string();
                self.advance();
                Ok(self.arena.add(Node::IntLit(raw)))
            }
            TokenKind::FloatLiteral => {
                let raw = self.text().to_string();
                self.advance();
                Ok(self.arena.add(Node::FloatLit(raw)))
            }
            TokenKind::StringLiteral => {
                let node = string_literal_node(self.text());
                self.advance();
                Ok(self.arena.add(node))
            }
            TokenKind::HeredocLiteral => {
                let raw = self.text().to_string();
                self.advance();
                Ok(self.arena.add(Node::InterpolatedString(raw)))
            }
            TokenKind::OpenParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expr)
            }
            TokenKind::OpenBracket => {
                self.advance();
                let items = self.parse_array_items(TokenKind::CloseBracket)?;
                Ok(self.arena.add(Node::ArrayLit(ArrayLit {
                    kind: ArrayKind::Short,
                    items,
                })))
            }
            TokenKind::AttributeOpen => {
                let attr_groups = self.parse_attribute_groups()?;
                self.parse_function_literal(attr_groups)
            }
            TokenKind::Identifier => self.parse_keyword_primary(),
            TokenKind::QualifiedName | TokenKind::FullyQualifiedName | TokenKind::RelativeName => {
                self.parse_name_primary()
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_keyword_primary(&mut self) -> ParseResult<NodeIndex> {
        let keyword = self.text().to_ascii_lowercase();
        let next = self.peek_kind(1);
        match keyword.as_str() {
            "new" => self.parse_new(),
            "function" | "fn" => self.parse_function_literal(Vec::new()),
            "static" if self.peek_keyword(1, "function") || self.peek_keyword(1, "fn") => {
                self.parse_function_literal(Vec::new())
            }
            "match" if next == TokenKind::OpenParen => self.parse_match(),
            "isset" if next == TokenKind::OpenParen => {
                self.advance();
                self.expect(TokenKind::OpenParen)?;
                let mut exprs = Vec::new();
                while !self.at(TokenKind::CloseParen) {
                    exprs.push(self.parse_expression()?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::CloseParen)?;
                Ok(self.arena.add(Node::Isset(exprs)))
            }
            "empty" if next == TokenKind::OpenParen => {
                self.advance();
                self.expect(TokenKind::OpenParen)?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(self.arena.add(Node::Empty(expr)))
            }
            "exit" | "die" => {
                self.advance();
                let mut expr = NodeIndex::NONE;
                if self.eat(TokenKind::OpenParen) {
                    if !self.at(TokenKind::CloseParen) {
                        expr = self.parse_expression()?;
                    }
                    self.expect(TokenKind::CloseParen)?;
                }
                Ok(self.arena.add(Node::Exit(ExitData {
                    die: keyword == "die",
                    expr,
                })))
            }
            "array" | "list" if next == TokenKind::OpenParen => {
                self.advance();
                self.advance();
                let items = self.parse_array_items(TokenKind::CloseParen)?;
                let kind = if keyword == "list" {
                    ArrayKind::List
                } else {
                    ArrayKind::Long
                };
                Ok(self.arena.add(Node::ArrayLit(ArrayLit { kind, items })))
            }
            _ => self.parse_name_primary(),
        }
    }

    /// A name used as an expression: call, class reference or constant.
    fn parse_name_primary(&mut self) -> ParseResult<NodeIndex> {
        let name = self.parse_name()?;
        match self.kind() {
            TokenKind::OpenParen => {
                let args = self.parse_args()?;
                Ok(self.arena.add(Node::FuncCall(CallData { callee: name, args })))
            }
            TokenKind::DoubleColon => Ok(name),
            _ => Ok(self.arena.add(Node::ConstFetch(name))),
        }
    }

    /// `$$name` or `${expr}`
    fn parse_variable_variable(&mut self) -> ParseResult<NodeIndex> {
        self.expect(TokenKind::Dollar)?;
        let inner = match self.kind() {
            TokenKind::OpenBrace => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseBrace)?;
                expr
            }
            TokenKind::Variable => {
                let name = self.expect_variable()?;
                self.arena.make_variable(&name)
            }
            TokenKind::Dollar => self.parse_variable_variable()?,
            _ => return Err(self.unexpected()),
        };
        Ok(self.arena.add(Node::VariableVariable(inner)))
    }

    /// Class reference after `instanceof`: a name or a dynamic expression.
    fn parse_class_reference(&mut self) -> ParseResult<NodeIndex> {
        if self.kind().is_name() {
            return self.parse_name();
        }
        let base = match self.kind() {
            TokenKind::Variable => {
                let name = self.expect_variable()?;
                self.arena.make_variable(&name)
            }
            TokenKind::Dollar => self.parse_variable_variable()?,
            TokenKind::OpenParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseParen)?;
                return Ok(expr);
            }
            _ => return Err(self.unexpected()),
        };
        self.parse_postfix_rest(base, false)
    }

    fn parse_new(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("new")?;
        let attr_groups = self.parse_attribute_groups()?;

        if self.at_keyword("class") {
            self.advance();
            let args = if self.at(TokenKind::OpenParen) {
                self.parse_args()?
            } else {
                Vec::new()
            };
            let class = self.parse_class_remainder(attr_groups, Modifiers::empty(), None)?;
            let class = self.arena.add(Node::Class(class));
            return Ok(self.arena.add(Node::New(NewData { class, args })));
        }
        if !attr_groups.is_empty() {
            return Err(self.unexpected());
        }

        let class = self.parse_class_reference()?;
        let args = if self.at(TokenKind::OpenParen) {
            self.parse_args()?
        } else {
            Vec::new()
        };
        Ok(self.arena.add(Node::New(NewData { class, args })))
    }

    // =========================================================================
    // Arguments and arrays
    // =========================================================================

    /// `( arg, ... )`, including named, spread and `...` placeholder forms.
    pub(crate) fn parse_args(&mut self) -> ParseResult<NodeList> {
        self.expect(TokenKind::OpenParen)?;
        let mut args = Vec::new();
        while !self.at(TokenKind::CloseParen) {
            args.push(self.parse_arg()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::CloseParen)?;
        Ok(args)
    }

    fn parse_arg(&mut self) -> ParseResult<NodeIndex> {
        if self.at(TokenKind::Ellipsis) {
            self.advance();
            if self.at(TokenKind::CloseParen) {
                return Ok(self.arena.add(Node::VariadicPlaceholder));
            }
            let value = self.parse_expression()?;
            return Ok(self.arena.add(Node::Arg(ArgData {
                name: None,
                value,
                unpack: true,
                by_ref: false,
            })));
        }

        let name = if self.at(TokenKind::Identifier) && self.peek_kind(1) == TokenKind::Colon {
            let name = self.expect_identifier()?;
            self.advance();
            Some(name)
        } else {
            None
        };
        let by_ref = name.is_none() && self.eat(TokenKind::Ampersand);
        let value = self.parse_expression()?;
        Ok(self.arena.add(Node::Arg(ArgData {
            name,
            value,
            unpack: false,
            by_ref,
        })))
    }

    /// Items up to and including `close`. Empty slots become `NONE`.
    fn parse_array_items(&mut self, close: TokenKind) -> ParseResult<NodeList> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            if self.eat(TokenKind::Comma) {
                items.push(NodeIndex::NONE);
                continue;
            }
            items.push(self.parse_array_item()?);
            if !self.eat(TokenKind::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    fn parse_array_item(&mut self) -> ParseResult<NodeIndex> {
        if self.eat(TokenKind::Ellipsis) {
            let value = self.parse_expression()?;
            return Ok(self.arena.add(Node::ArrayItem(ArrayItem {
                key: NodeIndex::NONE,
                value,
                by_ref: false,
                unpack: true,
            })));
        }

        let mut key = NodeIndex::NONE;
        let mut by_ref = self.eat(TokenKind::Ampersand);
        let mut value = self.parse_expression()?;
        if !by_ref && self.eat(TokenKind::DoubleArrow) {
            key = value;
            by_ref = self.eat(TokenKind::Ampersand);
            value = self.parse_expression()?;
        }
        Ok(self.arena.add(Node::ArrayItem(ArrayItem {
            key,
            value,
            by_ref,
            unpack: false,
        })))
    }

    // =========================================================================
    // Functions and match
    // =========================================================================

    /// `[static] function (...) use (...) { }` or `[static] fn (...) => expr`.
    fn parse_function_literal(&mut self, attr_groups: NodeList) -> ParseResult<NodeIndex> {
        let is_static = self.eat_keyword("static");
        if self.eat_keyword("fn") {
            let by_ref = self.eat(TokenKind::Ampersand);
            let params = self.parse_params()?;
            let return_type = self.parse_optional_return_type()?;
            self.expect(TokenKind::DoubleArrow)?;
            let body = self.parse_expression_bp(PREC_ASSIGN)?;
            return Ok(self.arena.add(Node::ArrowFunction(ArrowFunctionData {
                attr_groups,
                is_static,
                by_ref,
                params,
                return_type,
                body,
            })));
        }

        self.expect_keyword("function")?;
        let by_ref = self.eat(TokenKind::Ampersand);
        let params = self.parse_params()?;
        let mut uses = Vec::new();
        if self.eat_keyword("use") {
            self.expect(TokenKind::OpenParen)?;
            while !self.at(TokenKind::CloseParen) {
                let by_ref = self.eat(TokenKind::Ampersand);
                let name = self.expect_variable()?;
                uses.push(self.arena.add(Node::ClosureUse(ClosureUse { name, by_ref })));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::CloseParen)?;
        }
        let return_type = self.parse_optional_return_type()?;
        let body = self.parse_block_body()?;

        Ok(self.arena.add(Node::Closure(ClosureData {
            attr_groups,
            is_static,
            by_ref,
            params,
            uses,
            return_type,
            body,
        })))
    }

    fn parse_match(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("match")?;
        self.expect(TokenKind::OpenParen)?;
        let subject = self.parse_expression()?;
        self.expect(TokenKind::CloseParen)?;
        self.expect(TokenKind::OpenBrace)?;

        let mut arms = Vec::new();
        while !self.at(TokenKind::CloseBrace) {
            let mut conditions = Vec::new();
            if self.at_keyword("default") && self.peek_kind(1) == TokenKind::DoubleArrow {
                self.advance();
            } else {
                loop {
                    conditions.push(self.parse_expression()?);
                    if !self.eat(TokenKind::Comma) || self.at(TokenKind::DoubleArrow) {
                        break;
                    }
                }
            }
            self.expect(TokenKind::DoubleArrow)?;
            let body = self.parse_expression()?;
            arms.push(self.arena.add(Node::MatchArm(MatchArm { conditions, body })));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::CloseBrace)?;

        Ok(self.arena.add(Node::Match(MatchData { subject, arms })))
    }
}

/// `(integer)` -> `int`, `( double )` -> `float`, and so on.
fn canonical_cast_type(text: &str) -> String {
    let inner = text
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .to_ascii_lowercase();
    match inner.as_str() {
        "integer" => "int".to_string(),
        "boolean" => "bool".to_string(),
        "double" | "real" => "float".to_string(),
        "binary" => "string".to_string(),
        _ => inner,
    }
}

/// A quoted literal: plain strings are decoded, interpolating ones kept raw.
fn string_literal_node(raw: &str) -> Node {
    if let Some(body) = raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return Node::StringLit(StringLit {
            value: decode_single_quoted(body),
            raw: Some(raw.to_string()),
        });
    }
    let body = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);
    if has_interpolation(body) {
        return Node::InterpolatedString(raw.to_string());
    }
    Node::StringLit(StringLit {
        value: decode_double_quoted(body),
        raw: Some(raw.to_string()),
    })
}

fn decode_single_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && matches!(chars.peek(), Some('\\' | '\'')) {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Whether an unescaped `$name`, `${` or `{$` occurs.
pub(crate) fn has_interpolation(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' => {
                if bytes.get(i + 1).is_some_and(|&b| {
                    b == b'{' || b == b'_' || b.is_ascii_alphabetic() || b >= 0x80
                }) {
                    return true;
                }
                i += 1;
            }
            b'{' if bytes.get(i + 1) == Some(&b'$') => return true,
            _ => i += 1,
        }
    }
    false
}

fn decode_double_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&next) = chars.peek() else {
            out.push('\\');
            break;
        };
        let simple = match next {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'v' => Some('\u{0B}'),
            'e' => Some('\u{1B}'),
            'f' => Some('\u{0C}'),
            '\\' => Some('\\'),
            '$' => Some('$'),
            '"' => Some('"'),
            _ => None,
        };
        if let Some(decoded) = simple {
            chars.next();
            out.push(decoded);
            continue;
        }

        match next {
            '0'..='7' => {
                let mut value = 0u32;
                for _ in 0..3 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value & 0xFF).unwrap_or('\u{FFFD}'));
            }
            'x' => {
                chars.next();
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2 {
                    match chars.peek().and_then(|c| c.to_digit(16)) {
                        Some(digit) => {
                            value = value * 16 + digit;
                            chars.next();
                            digits += 1;
                        }
                        None => break,
                    }
                }
                if digits == 0 {
                    out.push_str("\\x");
                } else {
                    out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
                }
            }
            'u' => {
                chars.next();
                if chars.peek() != Some(&'{') {
                    out.push_str("\\u");
                    continue;
                }
                chars.next();
                let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u{");
                        out.push_str(&hex);
                        out.push('}');
                    }
                }
            }
            _ => out.push('\\'),
        }
    }
    out
}
