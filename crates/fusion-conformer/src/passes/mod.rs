//! Tree rewriting passes.
//!
//! Each pass is a visitor over the `SyntaxTree`: the conformer asks it
//! whether it applies, then walks the tree calling `enter_node` and
//! `leave_node` for every node below the root. Passes run one after another
//! in the order given by `default_pipeline`; later passes rely on the shapes
//! earlier ones produce.
//!
//! Pass instances are created fresh for every conform call, so any state a
//! pass accumulates is local to one fragment.

mod action_discovery;
mod anonymous_class;
mod anonymous_return;
mod expose;
mod function_import;
pub mod literal;
mod mount;
mod procedural;
mod prop;
mod prop_discovery;
mod prop_value;
mod traverse;
pub mod utils;

pub use action_discovery::ActionDiscoveryPass;
pub use anonymous_class::AnonymousClassPass;
pub use anonymous_return::AnonymousReturnPass;
pub use expose::ExposePass;
pub use function_import::FunctionImportPass;
pub use mount::MountPass;
pub use procedural::ProceduralPass;
pub use prop::PropPass;
pub use prop_discovery::PropDiscoveryPass;
pub use prop_value::PropValuePass;
pub use traverse::traverse;

use crate::config::ConformOptions;
use crate::error::ConformError;
use crate::identity::DestinationIdentity;
use crate::registry::FunctionRegistry;
use fusion_parser::{NodeIndex, SyntaxTree};

pub type PassResult<T> = Result<T, ConformError>;

/// What the traversal does with the node a hook was called for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitAction {
    /// Keep the node and walk its children.
    Continue,
    /// Keep the node but do not walk its children (enter only).
    SkipChildren,
    /// Put another node in its place. After `enter_node` the replacement's
    /// children are walked instead.
    Replace(NodeIndex),
    /// Drop the node from its parent.
    Remove,
}

pub trait Pass {
    fn name(&self) -> &'static str;

    /// Whether this pass has anything to do for `tree`. Called after parent
    /// links have been connected.
    fn should_handle(&self, tree: &SyntaxTree) -> bool;

    fn before_traverse(&mut self, _tree: &mut SyntaxTree) -> PassResult<()> {
        Ok(())
    }

    fn enter_node(&mut self, _tree: &mut SyntaxTree, _node: NodeIndex) -> PassResult<VisitAction> {
        Ok(VisitAction::Continue)
    }

    fn leave_node(&mut self, _tree: &mut SyntaxTree, _node: NodeIndex) -> PassResult<VisitAction> {
        Ok(VisitAction::Continue)
    }

    fn after_traverse(&mut self, _tree: &mut SyntaxTree) -> PassResult<()> {
        Ok(())
    }
}

/// Inputs shared by every pass of one conform call.
#[derive(Clone, Copy, Debug)]
pub struct PassContext<'a> {
    pub options: &'a ConformOptions,
    pub registry: &'a FunctionRegistry,
    pub identity: Option<&'a DestinationIdentity>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    Procedural,
    Prop,
    FunctionImport,
    PropValue,
    Expose,
    Mount,
    PropDiscovery,
    ActionDiscovery,
    AnonymousReturn,
    AnonymousClass,
}

impl PassKind {
    pub fn name(self) -> &'static str {
        match self {
            PassKind::Procedural => "procedural",
            PassKind::Prop => "prop",
            PassKind::FunctionImport => "function-import",
            PassKind::PropValue => "prop-value",
            PassKind::Expose => "expose",
            PassKind::Mount => "mount",
            PassKind::PropDiscovery => "prop-discovery",
            PassKind::ActionDiscovery => "action-discovery",
            PassKind::AnonymousReturn => "anonymous-return",
            PassKind::AnonymousClass => "anonymous-class",
        }
    }

    pub fn instantiate(self, context: &PassContext<'_>) -> Box<dyn Pass> {
        let options = context.options;
        match self {
            PassKind::Procedural => Box::new(ProceduralPass::new(options)),
            PassKind::Prop => Box::new(PropPass::new()),
            PassKind::FunctionImport => {
                Box::new(FunctionImportPass::new(context.registry.clone()))
            }
            PassKind::PropValue => Box::new(PropValuePass::new()),
            PassKind::Expose => Box::new(ExposePass::new()),
            PassKind::Mount => Box::new(MountPass::new()),
            PassKind::PropDiscovery => Box::new(PropDiscoveryPass::new(options)),
            PassKind::ActionDiscovery => Box::new(ActionDiscoveryPass::new(options)),
            PassKind::AnonymousReturn => Box::new(AnonymousReturnPass::new()),
            PassKind::AnonymousClass => {
                Box::new(AnonymousClassPass::new(options, context.identity.cloned()))
            }
        }
    }
}

/// The fixed pass order.
///
/// Prop rewriting must precede value completion and discovery, and the
/// anonymous-class pass must come last: it consumes the
/// `return new class { ... };` shape every other pass works on.
pub fn default_pipeline() -> Vec<PassKind> {
    vec![
        PassKind::Procedural,
        PassKind::Prop,
        PassKind::FunctionImport,
        PassKind::PropValue,
        PassKind::Expose,
        PassKind::Mount,
        PassKind::PropDiscovery,
        PassKind::ActionDiscovery,
        PassKind::AnonymousReturn,
        PassKind::AnonymousClass,
    ]
}
