use super::Printer;
use fusion_parser::{
    ArrowFunctionData, AssignData, BinaryData, ClosureData, MatchData, NewData, Node, NodeIndex,
    ParamData, TernaryData, UnaryData, UnaryOp,
};

impl<'a> Printer<'a> {
    // =========================================================================
    // Operators
    // =========================================================================

    pub(crate) fn emit_assign(&mut self, idx: NodeIndex, assign: &AssignData) {
        self.emit_operand(idx, assign.target, -1);
        self.write(" ");
        self.write(assign.op.as_str());
        if assign.by_ref {
            self.write("&");
        }
        self.write(" ");
        self.emit_operand(idx, assign.value, 1);
    }

    pub(crate) fn emit_binary(&mut self, idx: NodeIndex, binary: &BinaryData) {
        self.emit_operand(idx, binary.left, -1);
        self.write(" ");
        self.write(binary.op.as_str());
        self.write(" ");
        self.emit_operand(idx, binary.right, 1);
    }

    pub(crate) fn emit_unary(&mut self, idx: NodeIndex, unary: &UnaryData) {
        match unary.op {
            UnaryOp::PostInc | UnaryOp::PostDec => {
                self.emit_operand(idx, unary.operand, -1);
                self.write(if unary.op == UnaryOp::PostInc { "++" } else { "--" });
            }
            UnaryOp::Minus | UnaryOp::Plus => {
                let sign = if unary.op == UnaryOp::Minus { "-" } else { "+" };
                // `- -$a` and `- --$a` must not fuse into `--`.
                let fuses = match self.arena.get(unary.operand) {
                    Some(Node::Unary(inner)) if unary.op == UnaryOp::Minus => {
                        matches!(inner.op, UnaryOp::Minus | UnaryOp::PreDec)
                    }
                    Some(Node::Unary(inner)) => {
                        matches!(inner.op, UnaryOp::Plus | UnaryOp::PreInc)
                    }
                    _ => false,
                };
                self.write(sign);
                if fuses {
                    self.write("(");
                    self.emit(unary.operand);
                    self.write(")");
                } else {
                    self.emit_operand(idx, unary.operand, 1);
                }
            }
            op => {
                self.write(match op {
                    UnaryOp::Not => "!",
                    UnaryOp::BitNot => "~",
                    UnaryOp::Silence => "@",
                    UnaryOp::PreInc => "++",
                    _ => "--",
                });
                self.emit_operand(idx, unary.operand, 1);
            }
        }
    }

    pub(crate) fn emit_ternary(&mut self, idx: NodeIndex, ternary: &TernaryData) {
        self.emit_operand(idx, ternary.cond, -1);
        self.write(" ?");
        if ternary.then.is_some() {
            self.write(" ");
            self.emit(ternary.then);
            self.write(" ");
        }
        self.write(": ");
        self.emit_operand(idx, ternary.otherwise, 1);
    }

    // =========================================================================
    // Member access and calls
    // =========================================================================

    /// Left-hand side of `->`, `?->`, `::` and `[`.
    pub(crate) fn emit_dereference_lhs(&mut self, lhs: NodeIndex) {
        let bare = matches!(
            self.arena.get(lhs),
            Some(
                Node::Variable(_)
                    | Node::VariableVariable(_)
                    | Node::Name(_)
                    | Node::ArrayDimFetch(_)
                    | Node::PropertyFetch(_)
                    | Node::StaticPropertyFetch(_)
                    | Node::FuncCall(_)
                    | Node::MethodCall(_)
                    | Node::StaticCall(_)
                    | Node::ArrayLit(_)
                    | Node::StringLit(_)
                    | Node::ConstFetch(_)
                    | Node::ClassConstFetch(_)
            ) | None
        );
        self.emit_maybe_parenthesized(lhs, bare);
    }

    /// Callee of a function call.
    pub(crate) fn emit_call_lhs(&mut self, callee: NodeIndex) {
        let bare = matches!(
            self.arena.get(callee),
            Some(
                Node::Name(_)
                    | Node::Variable(_)
                    | Node::VariableVariable(_)
                    | Node::ArrayDimFetch(_)
                    | Node::FuncCall(_)
                    | Node::MethodCall(_)
                    | Node::StaticCall(_)
                    | Node::ArrayLit(_)
            ) | None
        );
        self.emit_maybe_parenthesized(callee, bare);
    }

    fn emit_maybe_parenthesized(&mut self, node: NodeIndex, bare: bool) {
        if bare {
            self.emit(node);
        } else {
            self.write("(");
            self.emit(node);
            self.write(")");
        }
    }

    /// Member name after `->` or `::`; dynamic names are braced.
    pub(crate) fn emit_object_property(&mut self, name: NodeIndex) {
        if let Some(Node::Identifier(text)) = self.arena.get(name) {
            self.write(text);
        } else {
            self.write("{");
            self.emit(name);
            self.write("}");
        }
    }

    pub(crate) fn emit_args(&mut self, args: &[NodeIndex]) {
        self.write("(");
        self.emit_comma_separated(args);
        self.write(")");
    }

    pub(crate) fn emit_variable_variable(&mut self, inner: NodeIndex) {
        self.write("${");
        self.emit(inner);
        self.write("}");
    }

    pub(crate) fn emit_new(&mut self, new: &NewData) {
        self.write("new ");
        if let Some(Node::Class(class)) = self.arena.get(new.class) {
            self.emit_attribute_groups(&class.attr_groups, true);
            self.emit_modifiers(class.modifiers);
            self.write("class");
            if !new.args.is_empty() {
                self.emit_args(&new.args);
            }
            self.emit_class_tail(class);
            return;
        }
        let bare = matches!(
            self.arena.get(new.class),
            Some(
                Node::Name(_)
                    | Node::Variable(_)
                    | Node::ArrayDimFetch(_)
                    | Node::PropertyFetch(_)
                    | Node::StaticPropertyFetch(_)
            ) | None
        );
        self.emit_maybe_parenthesized(new.class, bare);
        self.emit_args(&new.args);
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub(crate) fn emit_closure(&mut self, closure: &ClosureData) {
        self.emit_attribute_groups(&closure.attr_groups, true);
        if closure.is_static {
            self.write("static ");
        }
        self.write("function ");
        if closure.by_ref {
            self.write("&");
        }
        self.emit_args(&closure.params);
        if !closure.uses.is_empty() {
            self.write(" use ");
            self.emit_args(&closure.uses);
        }
        self.emit_return_type(closure.return_type);
        self.emit_inline_block(&closure.body);
    }

    pub(crate) fn emit_arrow_function(&mut self, arrow: &ArrowFunctionData) {
        self.emit_attribute_groups(&arrow.attr_groups, true);
        if arrow.is_static {
            self.write("static ");
        }
        self.write("fn");
        if arrow.by_ref {
            self.write("&");
        }
        self.emit_args(&arrow.params);
        self.emit_return_type(arrow.return_type);
        self.write(" => ");
        self.emit(arrow.body);
    }

    pub(crate) fn emit_return_type(&mut self, return_type: NodeIndex) {
        if return_type.is_some() {
            self.write(": ");
            self.emit(return_type);
        }
    }

    pub(crate) fn emit_param(&mut self, param: &ParamData) {
        self.emit_attribute_groups(&param.attr_groups, true);
        self.emit_modifiers(param.modifiers);
        if param.ty.is_some() {
            self.emit(param.ty);
            self.write(" ");
        }
        if param.by_ref {
            self.write("&");
        }
        if param.variadic {
            self.write("...");
        }
        self.write("$");
        self.write(&param.name);
        if param.default.is_some() {
            self.write(" = ");
            self.emit(param.default);
        }
    }

    pub(crate) fn emit_match(&mut self, m: &MatchData) {
        self.write("match (");
        self.emit(m.subject);
        self.write(") {");
        self.increase_indent();
        for &arm in &m.arms {
            self.write_line();
            self.emit(arm);
            self.write(",");
        }
        self.decrease_indent();
        self.write_line();
        self.write("}");
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(crate) fn emit_union_type(&mut self, types: &[NodeIndex]) {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                self.write("|");
            }
            if let Some(Node::IntersectionType(_)) = self.arena.get(ty) {
                self.write("(");
                self.emit(ty);
                self.write(")");
            } else {
                self.emit(ty);
            }
        }
    }
}
