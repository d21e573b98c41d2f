use super::Printer;
use fusion_parser::{CatchData, ForData, ForeachData, IfData, Node, NodeIndex, TryData};

impl<'a> Printer<'a> {
    pub(crate) fn emit_if(&mut self, data: &IfData) {
        self.write("if (");
        self.emit(data.cond);
        self.write(")");
        self.emit_inline_block(&data.stmts);
        for &else_if in &data.else_ifs {
            self.write(" ");
            self.emit(else_if);
        }
        if data.else_branch.is_some() {
            self.write(" ");
            self.emit(data.else_branch);
        }
    }

    /// `else if` is kept when the else branch holds nothing but an `if`.
    pub(crate) fn emit_else(&mut self, stmts: &[NodeIndex]) {
        if let [only] = stmts
            && let Some(Node::If(_)) = self.arena.get(*only)
        {
            self.write("else ");
            self.emit(*only);
            return;
        }
        self.write("else");
        self.emit_inline_block(stmts);
    }

    pub(crate) fn emit_for(&mut self, data: &ForData) {
        self.write("for (");
        self.emit_comma_separated(&data.init);
        self.write(";");
        if !data.cond.is_empty() {
            self.write(" ");
        }
        self.emit_comma_separated(&data.cond);
        self.write(";");
        if !data.step.is_empty() {
            self.write(" ");
        }
        self.emit_comma_separated(&data.step);
        self.write(")");
        self.emit_inline_block(&data.stmts);
    }

    pub(crate) fn emit_foreach(&mut self, data: &ForeachData) {
        self.write("foreach (");
        self.emit(data.expr);
        self.write(" as ");
        if data.key.is_some() {
            self.emit(data.key);
            self.write(" => ");
        }
        if data.by_ref {
            self.write("&");
        }
        self.emit(data.value);
        self.write(")");
        self.emit_inline_block(&data.stmts);
    }

    pub(crate) fn emit_try(&mut self, data: &TryData) {
        self.write("try");
        self.emit_inline_block(&data.stmts);
        for &catch in &data.catches {
            self.write(" ");
            self.emit(catch);
        }
        if data.finally.is_some() {
            self.write(" ");
            self.emit(data.finally);
        }
    }

    pub(crate) fn emit_catch(&mut self, data: &CatchData) {
        self.write("catch (");
        self.emit_separated(&data.types, "|");
        if let Some(var) = &data.var {
            self.write(" $");
            self.write(var);
        }
        self.write(")");
        self.emit_inline_block(&data.stmts);
    }

    pub(crate) fn emit_jump(&mut self, keyword: &str, depth: NodeIndex) {
        self.write(keyword);
        if depth.is_some() {
            self.write(" ");
            self.emit(depth);
        }
        self.write(";");
    }
}
