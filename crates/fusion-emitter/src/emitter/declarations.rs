//! Namespaces, imports, classes and functions.

use super::Printer;
use fusion_parser::{
    ClassData, FunctionData, GroupUseData, MethodData, NamespaceData, PropertyData, UseData,
    UseItemData, UseKind,
};

fn use_kind_prefix(kind: UseKind) -> &'static str {
    match kind {
        UseKind::Normal => "",
        UseKind::Function => "function ",
        UseKind::Const => "const ",
    }
}

impl<'a> Printer<'a> {
    // =========================================================================
    // Namespaces and imports
    // =========================================================================

    /// Unbraced namespaces print their statements at the same level,
    /// separated from the declaration by a blank line.
    pub(crate) fn emit_namespace(&mut self, data: &NamespaceData) {
        if data.braced {
            self.write("namespace");
            if data.name.is_some() {
                self.write(" ");
                self.emit(data.name);
            }
            self.emit_inline_block(&data.stmts);
        } else {
            self.write("namespace ");
            self.emit(data.name);
            self.write(";");
            self.write_line();
            self.emit_statements(&data.stmts, false);
        }
    }

    pub(crate) fn emit_use(&mut self, data: &UseData) {
        self.write("use ");
        self.write(use_kind_prefix(data.kind));
        self.emit_comma_separated(&data.items);
        self.write(";");
    }

    pub(crate) fn emit_group_use(&mut self, data: &GroupUseData) {
        self.write("use ");
        self.write(use_kind_prefix(data.kind));
        self.emit(data.prefix);
        self.write("\\{");
        self.emit_comma_separated(&data.items);
        self.write("};");
    }

    pub(crate) fn emit_use_item(&mut self, data: &UseItemData) {
        self.write(use_kind_prefix(data.kind));
        self.emit(data.name);
        if let Some(alias) = &data.alias {
            self.write(" as ");
            self.write(alias);
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn emit_class(&mut self, data: &ClassData) {
        self.emit_attribute_groups(&data.attr_groups, false);
        self.emit_modifiers(data.modifiers);
        self.write("class");
        if let Some(name) = &data.name {
            self.write(" ");
            self.write(name);
        }
        self.emit_class_tail(data);
    }

    /// Everything after the class name (or anonymous class arguments).
    pub(crate) fn emit_class_tail(&mut self, data: &ClassData) {
        if data.extends.is_some() {
            self.write(" extends ");
            self.emit(data.extends);
        }
        if !data.implements.is_empty() {
            self.write(" implements ");
            self.emit_comma_separated(&data.implements);
        }
        self.emit_own_line_block(&data.members);
    }

    pub(crate) fn emit_method(&mut self, data: &MethodData) {
        self.emit_attribute_groups(&data.attr_groups, false);
        self.emit_modifiers(data.modifiers);
        self.write("function ");
        if data.by_ref {
            self.write("&");
        }
        self.write(&data.name);
        self.emit_args(&data.params);
        self.emit_return_type(data.return_type);
        if data.has_body {
            self.emit_own_line_block(&data.body);
        } else {
            self.write(";");
        }
    }

    pub(crate) fn emit_property(&mut self, data: &PropertyData) {
        self.emit_attribute_groups(&data.attr_groups, false);
        if data.modifiers.is_empty() {
            self.write("var ");
        } else {
            self.emit_modifiers(data.modifiers);
        }
        if data.ty.is_some() {
            self.emit(data.ty);
            self.write(" ");
        }
        self.emit_comma_separated(&data.items);
        self.write(";");
    }

    pub(crate) fn emit_function(&mut self, data: &FunctionData) {
        self.emit_attribute_groups(&data.attr_groups, false);
        self.write("function ");
        if data.by_ref {
            self.write("&");
        }
        self.write(&data.name);
        self.emit_args(&data.params);
        self.emit_return_type(data.return_type);
        self.emit_own_line_block(&data.body);
    }
}
