//! Statement parsing.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::{ParseResult, ParserState};
use fusion_scanner::TokenKind;

impl<'a> ParserState<'a> {
    // =========================================================================
    // Statement lists
    // =========================================================================

    /// Statements of a file, collecting unbraced namespace bodies.
    pub(crate) fn parse_top_level_statements(&mut self) -> ParseResult<NodeList> {
        self.parse_statements_until(|p| p.at_eof())
    }

    /// Parse statements until `stop` holds. Comments before the stopping
    /// token are kept as a `Nop`.
    pub(crate) fn parse_statements_until(
        &mut self,
        stop: fn(&ParserState<'a>) -> bool,
    ) -> ParseResult<NodeList> {
        let mut stmts = Vec::new();
        loop {
            if stop(self) {
                self.push_trailing_comments(&mut stmts);
                return Ok(stmts);
            }
            if self.at_eof() {
                return Err(self.unexpected());
            }
            if let Some(stmt) = self.parse_statement()? {
                stmts.push(stmt);
            }
        }
    }

    /// `{ statements }`
    pub(crate) fn parse_block_body(&mut self) -> ParseResult<NodeList> {
        self.expect(TokenKind::OpenBrace)?;
        let stmts = self.parse_statements_until(|p| p.at(TokenKind::CloseBrace))?;
        self.expect(TokenKind::CloseBrace)?;
        Ok(stmts)
    }

    /// Body of a control structure: a block or a single statement.
    fn parse_control_body(&mut self) -> ParseResult<NodeList> {
        match self.kind() {
            TokenKind::OpenBrace => self.parse_block_body(),
            TokenKind::Colon => Err(self.unsupported("alternative control structure syntax")),
            _ => Ok(self.parse_statement()?.into_iter().collect()),
        }
    }

    /// `( expr )`
    fn parse_parenthesized(&mut self) -> ParseResult<NodeIndex> {
        self.expect(TokenKind::OpenParen)?;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(expr)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse one statement with its leading comments. Returns `None` for a
    /// stray `;`.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Option<NodeIndex>> {
        let comments = self.take_leading_comments();
        match self.parse_statement_inner()? {
            Some(stmt) => {
                self.attach_comments(stmt, comments);
                Ok(Some(stmt))
            }
            None => {
                self.restore_leading_comments(comments);
                Ok(None)
            }
        }
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Option<NodeIndex>> {
        match self.kind() {
            TokenKind::Semicolon => {
                self.advance();
                return Ok(None);
            }
            TokenKind::OpenBrace => {
                let stmts = self.parse_block_body()?;
                return Ok(Some(self.arena.add(Node::Block(stmts))));
            }
            TokenKind::CloseTag => return Err(self.unsupported("closing tag `?>`")),
            TokenKind::AttributeOpen => return self.parse_attributed_statement().map(Some),
            TokenKind::Identifier => {}
            _ => return self.parse_expression_statement().map(Some),
        }

        let keyword = self.text().to_ascii_lowercase();
        let next = self.peek_kind(1);
        let stmt = match keyword.as_str() {
            "if" => self.parse_if()?,
            "while" => self.parse_while()?,
            "do" => self.parse_do_while()?,
            "for" => self.parse_for()?,
            "foreach" => self.parse_foreach()?,
            "switch" => self.parse_switch()?,
            "try" => self.parse_try()?,
            "break" | "continue" => self.parse_break_continue()?,
            "return" => self.parse_return()?,
            "echo" => self.parse_echo()?,
            "global" => self.parse_global()?,
            "unset" if next == TokenKind::OpenParen => self.parse_unset()?,
            "use" => self.parse_use()?,
            "namespace" if self.at_namespace_declaration() => self.parse_namespace()?,
            "const" => self.parse_const()?,
            "function" if self.is_function_declaration() => {
                self.parse_function_declaration(Vec::new())?
            }
            "abstract" | "final" | "readonly" | "class"
                if self.is_class_declaration() =>
            {
                self.parse_class_declaration(Vec::new())?
            }
            "interface" | "trait" | "enum" if next == TokenKind::Identifier => {
                return Err(self.unsupported(&format!("{keyword} declarations")));
            }
            "static" if next == TokenKind::Variable => {
                return Err(self.unsupported("static variables"));
            }
            "declare" | "goto" | "__halt_compiler" => {
                return Err(self.unsupported(&format!("`{keyword}`")));
            }
            _ if next == TokenKind::Colon => return Err(self.unsupported("goto labels")),
            _ => self.parse_expression_statement()?,
        };
        Ok(Some(stmt))
    }

    fn is_function_declaration(&self) -> bool {
        match self.peek_kind(1) {
            TokenKind::Identifier => true,
            TokenKind::Ampersand => self.peek_kind(2) == TokenKind::Identifier,
            _ => false,
        }
    }

    /// `class Foo`, or modifiers followed by `class`.
    fn is_class_declaration(&self) -> bool {
        let mut offset = 0;
        while ["abstract", "final", "readonly"]
            .iter()
            .any(|m| self.peek_keyword(offset, m))
        {
            offset += 1;
        }
        self.peek_keyword(offset, "class") && self.peek_kind(offset + 1) == TokenKind::Identifier
    }

    /// Declarations (or closures) preceded by `#[...]`.
    fn parse_attributed_statement(&mut self) -> ParseResult<NodeIndex> {
        let start = self.pos;
        let attr_groups = self.parse_attribute_groups()?;
        if self.at_keyword("function") && self.is_function_declaration() {
            return self.parse_function_declaration(attr_groups);
        }
        if self.is_class_declaration() {
            return self.parse_class_declaration(attr_groups);
        }
        if ["interface", "trait", "enum"].iter().any(|k| self.at_keyword(k)) {
            return Err(self.unsupported("attributed type declarations"));
        }

        // Attributed closure: the expression parser reads the attributes itself.
        self.pos = start;
        self.parse_expression_statement()
    }

    fn parse_expression_statement(&mut self) -> ParseResult<NodeIndex> {
        let expr = self.parse_expression()?;
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::ExprStmt(expr)))
    }

    fn parse_if(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("if")?;
        let cond = self.parse_parenthesized()?;
        let stmts = self.parse_control_body()?;

        let mut else_ifs = Vec::new();
        let mut else_branch = NodeIndex::NONE;
        loop {
            if self.eat_keyword("elseif") {
                let cond = self.parse_parenthesized()?;
                let stmts = self.parse_control_body()?;
                else_ifs.push(self.arena.add(Node::ElseIf(ElseIfData { cond, stmts })));
                continue;
            }
            if self.eat_keyword("else") {
                let stmts = self.parse_control_body()?;
                else_branch = self.arena.add(Node::Else(stmts));
            }
            break;
        }

        Ok(self.arena.add(Node::If(IfData {
            cond,
            stmts,
            else_ifs,
            else_branch,
        })))
    }

    fn parse_while(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("while")?;
        let cond = self.parse_parenthesized()?;
        let stmts = self.parse_control_body()?;
        Ok(self.arena.add(Node::While(WhileData { cond, stmts })))
    }

    fn parse_do_while(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("do")?;
        let stmts = self.parse_control_body()?;
        self.expect_keyword("while")?;
        let cond = self.parse_parenthesized()?;
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::DoWhile(DoWhileData { stmts, cond })))
    }

    /// Comma-separated expressions up to (not including) `end`.
    fn parse_expression_list_until(&mut self, end: TokenKind) -> ParseResult<NodeList> {
        let mut exprs = Vec::new();
        if self.at(end) {
            return Ok(exprs);
        }
        loop {
            exprs.push(self.parse_expression()?);
            if !self.eat(TokenKind::Comma) {
                return Ok(exprs);
            }
        }
    }

    fn parse_for(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("for")?;
        self.expect(TokenKind::OpenParen)?;
        let init = self.parse_expression_list_until(TokenKind::Semicolon)?;
        self.expect(TokenKind::Semicolon)?;
        let cond = self.parse_expression_list_until(TokenKind::Semicolon)?;
        self.expect(TokenKind::Semicolon)?;
        let step = self.parse_expression_list_until(TokenKind::CloseParen)?;
        self.expect(TokenKind::CloseParen)?;
        let stmts = self.parse_control_body()?;
        Ok(self.arena.add(Node::For(ForData {
            init,
            cond,
            step,
            stmts,
        })))
    }

    fn parse_foreach(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("foreach")?;
        self.expect(TokenKind::OpenParen)?;
        let expr = self.parse_expression()?;
        self.expect_keyword("as")?;

        let mut key = NodeIndex::NONE;
        let mut by_ref = self.eat(TokenKind::Ampersand);
        let mut value = self.parse_expression()?;
        if self.eat(TokenKind::DoubleArrow) {
            key = value;
            by_ref = self.eat(TokenKind::Ampersand);
            value = self.parse_expression()?;
        }
        self.expect(TokenKind::CloseParen)?;
        let stmts = self.parse_control_body()?;

        Ok(self.arena.add(Node::Foreach(ForeachData {
            expr,
            key,
            value,
            by_ref,
            stmts,
        })))
    }

    fn parse_switch(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("switch")?;
        let subject = self.parse_parenthesized()?;
        self.expect(TokenKind::OpenBrace)?;

        let mut cases = Vec::new();
        while !self.at(TokenKind::CloseBrace) {
            let comments = self.take_leading_comments();
            let cond = if self.eat_keyword("default") {
                NodeIndex::NONE
            } else {
                self.expect_keyword("case")?;
                self.parse_expression()?
            };
            if !self.eat(TokenKind::Colon) {
                self.expect(TokenKind::Semicolon)?;
            }
            let stmts = self.parse_statements_until(|p| {
                p.at(TokenKind::CloseBrace) || p.at_keyword("case") || p.at_keyword("default")
            })?;
            let case = self.arena.add(Node::Case(CaseData { cond, stmts }));
            self.attach_comments(case, comments);
            cases.push(case);
        }
        self.expect(TokenKind::CloseBrace)?;

        Ok(self.arena.add(Node::Switch(SwitchData { subject, cases })))
    }

    fn parse_try(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("try")?;
        let stmts = self.parse_block_body()?;

        let mut catches = Vec::new();
        while self.eat_keyword("catch") {
            self.expect(TokenKind::OpenParen)?;
            let mut types = vec![self.parse_name()?];
            while self.eat(TokenKind::Bar) {
                types.push(self.parse_name()?);
            }
            let var = if self.at(TokenKind::Variable) {
                Some(self.expect_variable()?)
            } else {
                None
            };
            self.expect(TokenKind::CloseParen)?;
            let stmts = self.parse_block_body()?;
            catches.push(self.arena.add(Node::Catch(CatchData { types, var, stmts })));
        }

        let finally = if self.eat_keyword("finally") {
            let stmts = self.parse_block_body()?;
            self.arena.add(Node::Finally(stmts))
        } else {
            NodeIndex::NONE
        };

        if catches.is_empty() && finally.is_none() {
            return Err(self.unexpected());
        }

        Ok(self.arena.add(Node::TryCatch(TryData {
            stmts,
            catches,
            finally,
        })))
    }

    fn parse_break_continue(&mut self) -> ParseResult<NodeIndex> {
        let is_break = self.at_keyword("break");
        self.advance();
        let depth = if self.at(TokenKind::Semicolon) {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.expect_semicolon()?;
        let node = if is_break {
            Node::Break(depth)
        } else {
            Node::Continue(depth)
        };
        Ok(self.arena.add(node))
    }

    fn parse_return(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("return")?;
        let expr = if self.at(TokenKind::Semicolon) {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::Return(expr)))
    }

    fn parse_echo(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("echo")?;
        let exprs = self.parse_expression_list_until(TokenKind::Semicolon)?;
        if exprs.is_empty() {
            return Err(self.unexpected());
        }
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::Echo(exprs)))
    }

    fn parse_global(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("global")?;
        let mut vars = Vec::new();
        loop {
            let name = self.expect_variable()?;
            vars.push(self.arena.make_variable(&name));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::Global(vars)))
    }

    fn parse_unset(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("unset")?;
        self.expect(TokenKind::OpenParen)?;
        let exprs = self.parse_expression_list_until(TokenKind::CloseParen)?;
        self.expect(TokenKind::CloseParen)?;
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::Unset(exprs)))
    }

    fn parse_const(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("const")?;
        let items = self.parse_const_items()?;
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::Const(items)))
    }

    /// `NAME = expr, ...`
    pub(crate) fn parse_const_items(&mut self) -> ParseResult<NodeList> {
        let mut items = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            self.expect(TokenKind::Equals)?;
            let value = self.parse_expression()?;
            items.push(self.arena.add(Node::ConstItem(ConstItem { name, value })));
            if !self.eat(TokenKind::Comma) {
                return Ok(items);
            }
        }
    }

    fn parse_function_declaration(&mut self, attr_groups: NodeList) -> ParseResult<NodeIndex> {
        self.expect_keyword("function")?;
        let by_ref = self.eat(TokenKind::Ampersand);
        let name = self.expect_identifier()?;
        let params = self.parse_params()?;
        let return_type = self.parse_optional_return_type()?;
        let body = self.parse_block_body()?;
        Ok(self.arena.add(Node::Function(FunctionData {
            attr_groups,
            by_ref,
            name,
            params,
            return_type,
            body,
        })))
    }

    // =========================================================================
    // Namespaces and imports
    // =========================================================================

    fn at_namespace_declaration(&self) -> bool {
        self.at_keyword("namespace")
            && matches!(
                self.peek_kind(1),
                TokenKind::Identifier | TokenKind::QualifiedName | TokenKind::OpenBrace
            )
    }

    fn parse_namespace(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("namespace")?;
        let name = if self.at(TokenKind::OpenBrace) {
            NodeIndex::NONE
        } else {
            self.parse_name()?
        };

        if self.at(TokenKind::OpenBrace) {
            let stmts = self.parse_block_body()?;
            return Ok(self.arena.add(Node::Namespace(NamespaceData {
                name,
                stmts,
                braced: true,
            })));
        }

        self.expect_semicolon()?;
        let stmts = self.parse_statements_until(|p| p.at_eof() || p.at_namespace_declaration())?;
        Ok(self.arena.add(Node::Namespace(NamespaceData {
            name,
            stmts,
            braced: false,
        })))
    }

    fn parse_use_kind(&mut self) -> UseKind {
        if self.eat_keyword("function") {
            UseKind::Function
        } else if self.eat_keyword("const") {
            UseKind::Const
        } else {
            UseKind::Normal
        }
    }

    /// A name in a `use` statement, stored without any leading `\`.
    fn parse_use_name(&mut self) -> ParseResult<NodeIndex> {
        let text = match self.kind() {
            TokenKind::Identifier | TokenKind::QualifiedName => self.text(),
            TokenKind::FullyQualifiedName => &self.text()[1..],
            _ => return Err(self.unexpected()),
        };
        self.advance();
        Ok(self.arena.make_name(text, NameKind::Normal))
    }

    fn parse_use_alias(&mut self) -> ParseResult<Option<String>> {
        if self.eat_keyword("as") {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    fn parse_use(&mut self) -> ParseResult<NodeIndex> {
        self.expect_keyword("use")?;
        let kind = self.parse_use_kind();
        let first = self.parse_use_name()?;

        if self.eat(TokenKind::Backslash) {
            self.expect(TokenKind::OpenBrace)?;
            let mut items = Vec::new();
            while !self.at(TokenKind::CloseBrace) {
                let item_kind = if kind == UseKind::Normal {
                    self.parse_use_kind()
                } else {
                    UseKind::Normal
                };
                let name = self.parse_use_name()?;
                let alias = self.parse_use_alias()?;
                items.push(self.arena.add(Node::UseItem(UseItemData {
                    kind: item_kind,
                    name,
                    alias,
                })));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::CloseBrace)?;
            self.expect_semicolon()?;
            return Ok(self.arena.add(Node::GroupUse(GroupUseData {
                kind,
                prefix: first,
                items,
            })));
        }

        let mut items = Vec::new();
        let mut name = first;
        loop {
            let alias = self.parse_use_alias()?;
            items.push(self.arena.add(Node::UseItem(UseItemData {
                kind: UseKind::Normal,
                name,
                alias,
            })));
            if !self.eat(TokenKind::Comma) {
                break;
            }
            name = self.parse_use_name()?;
        }
        self.expect_semicolon()?;
        Ok(self.arena.add(Node::Use(UseData { kind, items })))
    }
}
