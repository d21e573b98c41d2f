//! Node emission.
//!
//! `Printer::emit` dispatches on the node kind; the per-area methods live in
//! the submodules. Output conventions follow the common PHP pretty printers:
//! statements one per line, class and method braces on their own lines,
//! closures and argument lists inline, parentheses only where precedence
//! requires them.

mod comments;
mod declarations;
mod expressions;
mod literals;
mod precedence;
mod statements;

use crate::printer::PrintOptions;
use crate::source_writer::SourceWriter;
use fusion_parser::{Modifiers, Node, NodeArena, NodeIndex, SyntaxTree};
use tracing::trace;

pub use precedence::{Assoc, Precedence, precedence_of};

pub struct Printer<'a> {
    pub(crate) tree: &'a SyntaxTree,
    pub(crate) arena: &'a NodeArena,
    pub(crate) writer: SourceWriter,
}

impl<'a> Printer<'a> {
    pub fn new(tree: &'a SyntaxTree, options: &PrintOptions) -> Self {
        Printer {
            tree,
            arena: &tree.arena,
            writer: SourceWriter::with_capacity(1024, options.indent_width),
        }
    }

    /// Print the root file node.
    pub fn print_file(mut self) -> String {
        let stmts = self.tree.root_statements();
        trace!(statements = stmts.len(), "printing file");
        self.emit_statements(stmts, false);
        let body = self.writer.take_output();
        format!("<?php\n\n{}", body.trim_start())
    }

    pub fn finish(self) -> String {
        self.writer.take_output()
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    #[inline]
    pub(crate) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    #[inline]
    pub(crate) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(crate) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(crate) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    /// Emit nodes separated by `separator`; `NONE` entries print as nothing.
    pub(crate) fn emit_separated(&mut self, nodes: &[NodeIndex], separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            self.emit(*node);
        }
    }

    pub(crate) fn emit_comma_separated(&mut self, nodes: &[NodeIndex]) {
        self.emit_separated(nodes, ", ");
    }

    /// Statement list: each statement on its own line, preceded by its
    /// comments. With `indent`, the list is one level deeper than the
    /// current position.
    pub(crate) fn emit_statements(&mut self, stmts: &[NodeIndex], indent: bool) {
        if indent {
            self.increase_indent();
        }
        for &stmt in stmts {
            let comments = self.tree.comments(stmt);
            if !comments.is_empty() {
                self.write_line();
                self.emit_comments(comments);
            }
            if matches!(self.arena.get(stmt), Some(Node::Nop) | None) {
                continue;
            }
            self.write_line();
            self.emit(stmt);
        }
        if indent {
            self.decrease_indent();
        }
    }

    /// ` {` body `}` as used by control structures and closures.
    pub(crate) fn emit_inline_block(&mut self, stmts: &[NodeIndex]) {
        self.write(" {");
        self.emit_statements(stmts, true);
        self.write_line();
        self.write("}");
    }

    /// Body on its own lines, as used by classes, methods and functions.
    pub(crate) fn emit_own_line_block(&mut self, stmts: &[NodeIndex]) {
        self.write_line();
        self.write("{");
        self.emit_statements(stmts, true);
        self.write_line();
        self.write("}");
    }

    pub(crate) fn emit_modifiers(&mut self, modifiers: Modifiers) {
        const ORDER: [(Modifiers, &str); 7] = [
            (Modifiers::PUBLIC, "public "),
            (Modifiers::PROTECTED, "protected "),
            (Modifiers::PRIVATE, "private "),
            (Modifiers::STATIC, "static "),
            (Modifiers::ABSTRACT, "abstract "),
            (Modifiers::FINAL, "final "),
            (Modifiers::READONLY, "readonly "),
        ];
        for (flag, text) in ORDER {
            if modifiers.contains(flag) {
                self.write(text);
            }
        }
    }

    /// Attribute groups, each followed by a newline or, `inline`, a space.
    pub(crate) fn emit_attribute_groups(&mut self, groups: &[NodeIndex], inline: bool) {
        for &group in groups {
            self.emit(group);
            if inline {
                self.write(" ");
            } else {
                self.write_line();
            }
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Emit any node. Absent indices print nothing.
    pub fn emit(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };

        match node {
            Node::File(stmts) => self.emit_statements(stmts, false),

            // Names and types
            Node::Name(name) => self.write(&name.to_source()),
            Node::Identifier(text) => self.write(text),
            Node::NullableType(inner) => {
                self.write("?");
                self.emit(*inner);
            }
            Node::UnionType(types) => self.emit_union_type(types),
            Node::IntersectionType(types) => self.emit_separated(types, "&"),

            // Literals
            Node::StringLit(lit) => self.emit_string_literal(lit),
            Node::InterpolatedString(raw) | Node::IntLit(raw) | Node::FloatLit(raw) => {
                self.write(raw)
            }
            Node::ArrayLit(array) => self.emit_array_literal(array),
            Node::ArrayItem(item) => self.emit_array_item(item),

            // Expressions
            Node::Variable(name) => {
                self.write("$");
                self.write(name);
            }
            Node::VariableVariable(inner) => self.emit_variable_variable(*inner),
            Node::ConstFetch(name) => self.emit(*name),
            Node::ClassConstFetch(fetch) => {
                self.emit_dereference_lhs(fetch.class);
                self.write("::");
                self.emit_object_property(fetch.name);
            }
            Node::Assign(assign) => self.emit_assign(idx, assign),
            Node::Binary(binary) => self.emit_binary(idx, binary),
            Node::Unary(unary) => self.emit_unary(idx, unary),
            Node::Cast(cast) => {
                self.write("(");
                self.write(&cast.ty);
                self.write(") ");
                self.emit_operand(idx, cast.operand, 1);
            }
            Node::Ternary(ternary) => self.emit_ternary(idx, ternary),
            Node::Instanceof(instanceof) => {
                self.emit_operand(idx, instanceof.expr, -1);
                self.write(" instanceof ");
                self.emit_operand(idx, instanceof.class, 1);
            }
            Node::FuncCall(call) => {
                self.emit_call_lhs(call.callee);
                self.emit_args(&call.args);
            }
            Node::MethodCall(call) => {
                self.emit_dereference_lhs(call.receiver);
                self.write(if call.nullsafe { "?->" } else { "->" });
                self.emit_object_property(call.name);
                self.emit_args(&call.args);
            }
            Node::StaticCall(call) => {
                self.emit_dereference_lhs(call.class);
                self.write("::");
                match self.arena.get(call.name) {
                    Some(Node::Identifier(_) | Node::Variable(_)) => self.emit(call.name),
                    _ => {
                        self.write("{");
                        self.emit(call.name);
                        self.write("}");
                    }
                }
                self.emit_args(&call.args);
            }
            Node::PropertyFetch(fetch) => {
                self.emit_dereference_lhs(fetch.receiver);
                self.write(if fetch.nullsafe { "?->" } else { "->" });
                self.emit_object_property(fetch.name);
            }
            Node::StaticPropertyFetch(fetch) => {
                self.emit_dereference_lhs(fetch.class);
                self.write("::$");
                self.emit_object_property(fetch.name);
            }
            Node::ArrayDimFetch(fetch) => {
                self.emit_dereference_lhs(fetch.array);
                self.write("[");
                self.emit(fetch.dim);
                self.write("]");
            }
            Node::New(new) => self.emit_new(new),
            Node::Clone(inner) => {
                self.write("clone ");
                self.emit_operand(idx, *inner, 1);
            }
            Node::Print(inner) => {
                self.write("print ");
                self.emit_operand(idx, *inner, 1);
            }
            Node::Throw(inner) => {
                self.write("throw ");
                self.emit(*inner);
            }
            Node::Include(include) => {
                self.write(include.kind.as_str());
                self.write(" ");
                self.emit_operand(idx, include.expr, 1);
            }
            Node::Isset(exprs) => {
                self.write("isset(");
                self.emit_comma_separated(exprs);
                self.write(")");
            }
            Node::Empty(inner) => {
                self.write("empty(");
                self.emit(*inner);
                self.write(")");
            }
            Node::Exit(exit) => {
                self.write(if exit.die { "die" } else { "exit" });
                if exit.expr.is_some() {
                    self.write("(");
                    self.emit(exit.expr);
                    self.write(")");
                }
            }
            Node::Closure(closure) => self.emit_closure(closure),
            Node::ClosureUse(closure_use) => {
                if closure_use.by_ref {
                    self.write("&");
                }
                self.write("$");
                self.write(&closure_use.name);
            }
            Node::ArrowFunction(arrow) => self.emit_arrow_function(arrow),
            Node::Match(m) => self.emit_match(m),
            Node::MatchArm(arm) => {
                if arm.conditions.is_empty() {
                    self.write("default");
                } else {
                    self.emit_comma_separated(&arm.conditions);
                }
                self.write(" => ");
                self.emit(arm.body);
            }
            Node::Arg(arg) => {
                if let Some(name) = &arg.name {
                    self.write(name);
                    self.write(": ");
                }
                if arg.by_ref {
                    self.write("&");
                }
                if arg.unpack {
                    self.write("...");
                }
                self.emit(arg.value);
            }
            Node::VariadicPlaceholder => self.write("..."),
            Node::Param(param) => self.emit_param(param),
            Node::AttributeGroup(attributes) => {
                self.write("#[");
                self.emit_comma_separated(attributes);
                self.write("]");
            }
            Node::Attribute(attribute) => {
                self.emit(attribute.name);
                if !attribute.args.is_empty() {
                    self.emit_args(&attribute.args);
                }
            }

            // Statements
            Node::ExprStmt(expr) => {
                self.emit(*expr);
                self.write(";");
            }
            Node::Echo(exprs) => {
                self.write("echo ");
                self.emit_comma_separated(exprs);
                self.write(";");
            }
            Node::Return(expr) => {
                self.write("return");
                if expr.is_some() {
                    self.write(" ");
                    self.emit(*expr);
                }
                self.write(";");
            }
            Node::If(data) => self.emit_if(data),
            Node::ElseIf(data) => {
                self.write("elseif (");
                self.emit(data.cond);
                self.write(")");
                self.emit_inline_block(&data.stmts);
            }
            Node::Else(stmts) => self.emit_else(stmts),
            Node::While(data) => {
                self.write("while (");
                self.emit(data.cond);
                self.write(")");
                self.emit_inline_block(&data.stmts);
            }
            Node::DoWhile(data) => {
                self.write("do");
                self.emit_inline_block(&data.stmts);
                self.write(" while (");
                self.emit(data.cond);
                self.write(");");
            }
            Node::For(data) => self.emit_for(data),
            Node::Foreach(data) => self.emit_foreach(data),
            Node::Switch(data) => {
                self.write("switch (");
                self.emit(data.subject);
                self.write(")");
                self.emit_inline_block(&data.cases);
            }
            Node::Case(data) => {
                if data.cond.is_some() {
                    self.write("case ");
                    self.emit(data.cond);
                } else {
                    self.write("default");
                }
                self.write(":");
                self.emit_statements(&data.stmts, true);
            }
            Node::Break(depth) => self.emit_jump("break", *depth),
            Node::Continue(depth) => self.emit_jump("continue", *depth),
            Node::TryCatch(data) => self.emit_try(data),
            Node::Catch(data) => self.emit_catch(data),
            Node::Finally(stmts) => {
                self.write("finally");
                self.emit_inline_block(stmts);
            }
            Node::Unset(exprs) => {
                self.write("unset(");
                self.emit_comma_separated(exprs);
                self.write(");");
            }
            Node::Global(vars) => {
                self.write("global ");
                self.emit_comma_separated(vars);
                self.write(";");
            }
            Node::Block(stmts) => {
                self.write("{");
                self.emit_statements(stmts, true);
                self.write_line();
                self.write("}");
            }
            Node::Nop => {}

            // Declarations
            Node::Use(data) => self.emit_use(data),
            Node::GroupUse(data) => self.emit_group_use(data),
            Node::UseItem(data) => self.emit_use_item(data),
            Node::Namespace(data) => self.emit_namespace(data),
            Node::Class(data) => self.emit_class(data),
            Node::ClassMethod(data) => self.emit_method(data),
            Node::Property(data) => self.emit_property(data),
            Node::PropertyItem(item) => {
                self.write("$");
                self.write(&item.name);
                if item.default.is_some() {
                    self.write(" = ");
                    self.emit(item.default);
                }
            }
            Node::ClassConst(data) => {
                self.emit_attribute_groups(&data.attr_groups, false);
                self.emit_modifiers(data.modifiers);
                self.write("const ");
                self.emit_comma_separated(&data.items);
                self.write(";");
            }
            Node::ConstItem(item) => {
                self.write(&item.name);
                self.write(" = ");
                self.emit(item.value);
            }
            Node::TraitUse(traits) => {
                self.write("use ");
                self.emit_comma_separated(traits);
                self.write(";");
            }
            Node::Function(data) => self.emit_function(data),
            Node::Const(items) => {
                self.write("const ");
                self.emit_comma_separated(items);
                self.write(";");
            }
        }
    }
}
