//! Wraps a procedural script into an anonymous page class.
//!
//! ```php
//! use App\Models\Podcast;
//! $test = "hey";
//! ```
//!
//! becomes
//!
//! ```php
//! use App\Models\Podcast;
//! return new class extends \Fusion\FusionPage
//! {
//!     use \Fusion\Concerns\IsProceduralPage;
//!     public function runProceduralCode()
//!     {
//!         $test = "hey";
//!         $this->syncProps(get_defined_vars());
//!     }
//! };
//! ```

use super::{Pass, PassResult, VisitAction};
use crate::config::ConformOptions;
use fusion_parser::{
    ClassData, MethodData, Modifiers, NewData, Node, NodeIndex, NodeList, SyntaxTree,
};
use tracing::debug;

pub struct ProceduralPass {
    base_class: String,
    trait_name: String,
    method_name: String,
    imports: NodeList,
    statements: NodeList,
}

impl ProceduralPass {
    pub fn new(options: &ConformOptions) -> Self {
        ProceduralPass {
            base_class: options.page_base_class.clone(),
            trait_name: options.procedural_trait.clone(),
            method_name: options.procedural_method.clone(),
            imports: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// `$this->syncProps(get_defined_vars());`
    fn sync_props_statement(tree: &mut SyntaxTree) -> NodeIndex {
        let defined_vars = tree.arena.make_func_call("get_defined_vars", Vec::new());
        let arg = tree.arena.make_arg(defined_vars, None);
        let call = tree.arena.make_this_call("syncProps", vec![arg]);
        tree.add(Node::ExprStmt(call))
    }
}

/// A class declaration, or an anonymous class built at top level.
fn declares_class(tree: &SyntaxTree, stmt: NodeIndex) -> bool {
    match tree.get(stmt) {
        Some(Node::Class(_)) => true,
        Some(Node::ExprStmt(expr) | Node::Return(expr)) => {
            tree.arena.get_anonymous_class_of_new(*expr).is_some()
        }
        Some(Node::Namespace(namespace)) => {
            namespace.stmts.iter().any(|stmt| declares_class(tree, *stmt))
        }
        _ => false,
    }
}

impl Pass for ProceduralPass {
    fn name(&self) -> &'static str {
        "procedural"
    }

    fn should_handle(&self, tree: &SyntaxTree) -> bool {
        !tree
            .root_statements()
            .iter()
            .any(|stmt| declares_class(tree, *stmt))
    }

    fn before_traverse(&mut self, _tree: &mut SyntaxTree) -> PassResult<()> {
        self.imports.clear();
        self.statements.clear();
        Ok(())
    }

    fn enter_node(&mut self, tree: &mut SyntaxTree, node: NodeIndex) -> PassResult<VisitAction> {
        if tree.parent(node) != tree.root {
            return Ok(VisitAction::Continue);
        }
        match tree.get(node) {
            Some(Node::Use(_) | Node::GroupUse(_)) => self.imports.push(node),
            _ => self.statements.push(node),
        }
        Ok(VisitAction::Remove)
    }

    fn after_traverse(&mut self, tree: &mut SyntaxTree) -> PassResult<()> {
        let mut body = std::mem::take(&mut self.statements);
        body.push(Self::sync_props_statement(tree));
        debug!(statements = body.len(), "wrapping procedural code");

        let method = tree.add(Node::ClassMethod(MethodData {
            attr_groups: Vec::new(),
            modifiers: Modifiers::PUBLIC,
            by_ref: false,
            name: self.method_name.clone(),
            params: Vec::new(),
            return_type: NodeIndex::NONE,
            body,
            has_body: true,
        }));
        let trait_name = tree.arena.make_name_from_source(&self.trait_name);
        let trait_use = tree.add(Node::TraitUse(vec![trait_name]));
        let extends = tree.arena.make_name_from_source(&self.base_class);
        let class = tree.add(Node::Class(ClassData {
            attr_groups: Vec::new(),
            modifiers: Modifiers::empty(),
            name: None,
            extends,
            implements: Vec::new(),
            members: vec![trait_use, method],
        }));
        let new = tree.add(Node::New(NewData {
            class,
            args: Vec::new(),
        }));
        let ret = tree.add(Node::Return(new));

        let mut root = std::mem::take(&mut self.imports);
        root.push(ret);
        tree.set_root_statements(root);
        tree.connect_subtree(tree.root);
        Ok(())
    }
}
